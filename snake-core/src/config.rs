//! Game configuration
//!
//! Every field has a default, so a config file only needs the keys it wants
//! to change. The binary layers command line flags on top.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use snake_gfx::Color;

use crate::error::GameError;

pub const DEFAULT_COLS: u32 = 60;
pub const DEFAULT_ROWS: u32 = 50;
pub const DEFAULT_TICK_RATE: u32 = 10;
pub const DEFAULT_FPS_PERIOD_SECONDS: u32 = 3;
pub const DEFAULT_TEXT_SCALE: u32 = 2;
/// Glyphs are 8x8 pixels, so 64 is already 512 pixels a character
pub const MAX_TEXT_SCALE: u32 = 64;
pub const DEFAULT_SCORE_PER_FOOD: u32 = 10;

/// Colors as `[red, green, blue]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub snake: [u8; 3],
    pub food: [u8; 3],
    pub text: [u8; 3],
    pub game_over: [u8; 3],
    pub background: [u8; 3],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            snake: [255, 0, 0],
            food: [0, 255, 0],
            text: [255, 255, 255],
            game_over: [255, 0, 0],
            background: [0, 0, 0],
        }
    }
}

fn color([red, green, blue]: [u8; 3]) -> Color {
    Color::rgb(red, green, blue)
}

impl Palette {
    pub fn snake(&self) -> Color {
        color(self.snake)
    }

    pub fn food(&self) -> Color {
        color(self.food)
    }

    pub fn text(&self) -> Color {
        color(self.text)
    }

    pub fn game_over(&self) -> Color {
        color(self.game_over)
    }

    pub fn background(&self) -> Color {
        color(self.background)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Grid columns
    pub cols: u32,
    /// Grid rows
    pub rows: u32,
    /// Simulation ticks per second
    pub tick_rate: u32,
    /// How often the FPS counter is refreshed
    pub fps_period_seconds: u32,
    /// Bitmap font scale for the HUD and messages
    pub text_scale: u32,
    /// Initial food generator state
    pub seed: u32,
    pub score_per_food: u32,
    pub initial_length: usize,
    pub palette: Palette,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cols: DEFAULT_COLS,
            rows: DEFAULT_ROWS,
            tick_rate: DEFAULT_TICK_RATE,
            fps_period_seconds: DEFAULT_FPS_PERIOD_SECONDS,
            text_scale: DEFAULT_TEXT_SCALE,
            seed: crate::rng::DEFAULT_SEED,
            score_per_food: DEFAULT_SCORE_PER_FOOD,
            initial_length: 1,
            palette: Palette::default(),
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if self.cols == 0 || self.rows == 0 {
            return Err(GameError::config(format!(
                "grid must have at least one cell, got {}x{}",
                self.cols, self.rows
            )));
        }
        if self.tick_rate == 0 {
            return Err(GameError::config("tick rate must be at least 1 per second"));
        }
        if self.fps_period_seconds == 0 {
            return Err(GameError::config("FPS period must be at least 1 second"));
        }
        if self.text_scale == 0 || self.text_scale > MAX_TEXT_SCALE {
            return Err(GameError::config(format!(
                "text scale {} must be between 1 and {MAX_TEXT_SCALE}",
                self.text_scale
            )));
        }
        let cells = self.cols as usize * self.rows as usize;
        if self.initial_length == 0 || self.initial_length >= cells {
            return Err(GameError::config(format!(
                "initial length {} must be between 1 and {}",
                self.initial_length,
                cells.saturating_sub(1)
            )));
        }
        Ok(())
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate.max(1)
    }

    pub fn fps_period(&self) -> Duration {
        Duration::from_secs(u64::from(self.fps_period_seconds))
    }

    /// Height of the score/FPS strip above the grid
    pub fn hud_height(&self) -> u32 {
        16 * self.text_scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        config.validate().unwrap();
        assert_eq!(config.tick_period(), Duration::from_millis(100));
        assert_eq!(config.hud_height(), 32);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{ "cols": 20, "palette": { "food": [1, 2, 3] } }"#).unwrap();
        assert_eq!(config.cols, 20);
        assert_eq!(config.rows, DEFAULT_ROWS);
        assert_eq!(config.palette.food(), Color::rgb(1, 2, 3));
        assert_eq!(config.palette.snake(), Color::RED);
    }

    #[test]
    fn test_validate_rejects_nonsense() {
        let bad = [
            GameConfig { cols: 0, ..GameConfig::default() },
            GameConfig { tick_rate: 0, ..GameConfig::default() },
            GameConfig { text_scale: 0, ..GameConfig::default() },
            GameConfig { text_scale: MAX_TEXT_SCALE + 1, ..GameConfig::default() },
            GameConfig { text_scale: 300_000_000, ..GameConfig::default() },
            GameConfig { fps_period_seconds: 0, ..GameConfig::default() },
            GameConfig { initial_length: 0, ..GameConfig::default() },
            GameConfig { cols: 2, rows: 2, initial_length: 4, ..GameConfig::default() },
        ];
        for config in bad {
            assert!(
                matches!(config.validate(), Err(GameError::InvalidConfig { .. })),
                "{config:?} should be rejected"
            );
        }
    }
}
