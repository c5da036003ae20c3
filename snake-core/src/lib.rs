//! Grid Snake - Game Logic
//!
//! The snake state machine, the food placement generator and the game loop
//! that ties them to the graphics library. The platform the game runs on
//! is reached only through the [`platform`] traits and
//! [`snake_gfx::Display`], so the whole game can be driven from tests.

pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod platform;
pub mod point;
pub mod rng;
pub mod session;
pub mod snake;

pub use config::GameConfig;
pub use error::GameError;
pub use game::{run, Ending, GameSummary};
pub use platform::{ClockTimer, InputSource, Key, TickSource};
pub use point::{Direction, Point};
pub use rng::Lcg;
pub use session::{GameSession, TickOutcome};
pub use snake::{Snake, SnakeState};
