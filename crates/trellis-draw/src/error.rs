//! Error types for the drawing layer.

use thiserror::Error;

/// Errors that can occur during canvas operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DrawError {
    /// An offscreen target was requested with zero or negative dimensions.
    #[error("invalid offscreen target dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Requested width in pixels.
        width: i32,
        /// Requested height in pixels.
        height: i32,
    },

    /// `pop_target` was called with no offscreen target active.
    #[error("no offscreen target to pop")]
    NoActiveTarget,

    /// A bitmap handle was used with a canvas that did not create it.
    #[error("unknown bitmap handle {0}")]
    UnknownBitmap(u64),
}

/// Result type for canvas operations.
pub type DrawResult<T> = std::result::Result<T, DrawError>;
