//! Error types for the graphics library

use thiserror::Error;

/// Errors raised by surface, grid and display operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GfxError {
    #[error("Out of memory allocating {what} ({count} entries)")]
    OutOfMemory { what: &'static str, count: usize },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Origin ({x}, {y}) lies outside the {width}x{height} surface")]
    OriginOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("Display error: {message}")]
    Display { message: String },
}

impl GfxError {
    pub fn invalid(message: impl Into<String>) -> Self {
        GfxError::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn display(message: impl Into<String>) -> Self {
        GfxError::Display {
            message: message.into(),
        }
    }
}

/// Allocate a table of `count` copies of `value`, reporting allocation
/// failure instead of aborting.
pub(crate) fn try_alloc<T: Clone>(
    what: &'static str,
    count: usize,
    value: T,
) -> Result<Vec<T>, GfxError> {
    let mut table = Vec::new();
    table
        .try_reserve_exact(count)
        .map_err(|_| GfxError::OutOfMemory { what, count })?;
    table.resize(count, value);
    Ok(table)
}
