//! Linear congruential generator used for food placement
//!
//! Every draw first adds a caller supplied increment to the state (the game
//! feeds in how many input polls it has made so far, which is where the
//! randomness comes from) and then applies the usual
//! `1664525 * s + 1013904223` step. Same seed and same increments give the
//! same sequence, bit for bit.

pub const DEFAULT_SEED: u32 = 1;

const MULTIPLIER: u32 = 1664525;
const INCREMENT: u32 = 1013904223;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lcg {
    state: u32,
}

impl Default for Lcg {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl Lcg {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    /// Advance the generator and return a value in `min..=max`
    pub fn next(&mut self, increment: u32, min: u32, max: u32) -> u32 {
        self.state = self.state.wrapping_add(increment);
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        let (low, high) = if min <= max { (min, max) } else { (max, min) };
        let range = u64::from(high - low) + 1;
        low + (u64::from(self.state) % range) as u32
    }
}
