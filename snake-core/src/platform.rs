//! Input and timing collaborators
//!
//! The game never touches a terminal, window or clock directly. Backends
//! implement these traits; tests implement them with scripts.

use std::time::{Duration, Instant};

use crate::error::GameError;
use crate::point::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Escape,
    Enter,
    Char(char),
}

impl Key {
    pub fn direction(self) -> Option<Direction> {
        match self {
            Key::Up => Some(Direction::Up),
            Key::Down => Some(Direction::Down),
            Key::Left => Some(Direction::Left),
            Key::Right => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Non-blocking key source
pub trait InputSource {
    /// The next key press, or `None` when nothing is queued. Must not
    /// block for longer than a short poll.
    fn read_key(&mut self) -> Result<Option<Key>, GameError>;
}

/// Periodic "has the period elapsed" signal. Teardown happens on drop.
pub trait TickSource {
    fn set_period(&mut self, period: Duration) -> Result<(), GameError>;

    /// True once per elapsed period. Missed periods collapse into one
    /// signal, like a periodic timer event that was not checked in time.
    fn check(&mut self) -> Result<bool, GameError>;
}

/// [`TickSource`] on the monotonic clock
#[derive(Debug, Clone)]
pub struct ClockTimer {
    period: Option<Duration>,
    deadline: Instant,
}

impl Default for ClockTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockTimer {
    /// A timer with no period. It never fires until [`TickSource::set_period`].
    pub fn new() -> Self {
        Self {
            period: None,
            deadline: Instant::now(),
        }
    }

    pub fn period(&self) -> Option<Duration> {
        self.period
    }
}

impl TickSource for ClockTimer {
    fn set_period(&mut self, period: Duration) -> Result<(), GameError> {
        if period.is_zero() {
            return Err(GameError::platform("timer period must be non-zero"));
        }
        self.period = Some(period);
        self.deadline = Instant::now() + period;
        Ok(())
    }

    fn check(&mut self) -> Result<bool, GameError> {
        let Some(period) = self.period else {
            return Ok(false);
        };
        let now = Instant::now();
        if now < self.deadline {
            return Ok(false);
        }
        self.deadline += period;
        if self.deadline <= now {
            // fell more than a period behind, skip ahead instead of bursting
            self.deadline = now + period;
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_key_directions() {
        assert_eq!(Key::Up.direction(), Some(Direction::Up));
        assert_eq!(Key::Right.direction(), Some(Direction::Right));
        assert_eq!(Key::Escape.direction(), None);
        assert_eq!(Key::Char('w').direction(), None);
    }

    #[test]
    fn test_timer_without_period_never_fires() {
        let mut timer = ClockTimer::new();
        assert_eq!(timer.check(), Ok(false));
        assert_eq!(timer.period(), None);
    }

    #[test]
    fn test_zero_period_rejected() {
        let mut timer = ClockTimer::new();
        assert!(timer.set_period(Duration::ZERO).is_err());
    }

    #[test]
    fn test_timer_fires_once_per_period() {
        let mut timer = ClockTimer::new();
        timer.set_period(Duration::from_millis(20)).unwrap();
        assert_eq!(timer.check(), Ok(false));
        thread::sleep(Duration::from_millis(70));
        // several periods elapsed, but they collapse into one signal
        assert_eq!(timer.check(), Ok(true));
        assert_eq!(timer.check(), Ok(false));
    }
}
