//! Grid Snake - Graphics Library
//!
//! A flat back-buffer blitter: a [`Surface`] mirrors the display in memory,
//! a [`Grid`] lays a rows x columns overlay on top of it and only repaints
//! the cells that changed, and [`font`] paints 8x8 bitmap text.

pub mod color;
pub mod display;
pub mod error;
pub mod font;
pub mod grid;
pub mod surface;

pub use color::Color;
pub use display::{Display, MemoryDisplay, Rect};
pub use error::GfxError;
pub use grid::{span, Grid};
pub use surface::Surface;
