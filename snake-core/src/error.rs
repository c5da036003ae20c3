//! Error handling for the game
//!
//! Resource and platform failures are fatal and travel up to the entry
//! point; off-screen geometry never shows up here because the graphics
//! library clips it.

use snake_gfx::GfxError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    Gfx(#[from] GfxError),

    #[error("Platform error: {message}")]
    Platform { message: String },

    #[error("No free cell left on the {cols}x{rows} grid")]
    NoSpace { cols: u32, rows: u32 },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl GameError {
    pub fn platform(message: impl Into<String>) -> Self {
        GameError::Platform {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        GameError::InvalidConfig {
            message: message.into(),
        }
    }
}
