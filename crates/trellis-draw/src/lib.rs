//! Drawing capability layer for trellis.
//!
//! This crate defines the geometry types and the [`Canvas`] trait through
//! which the component tree consumes the platform's drawing primitives.
//! No rasterization happens here: a backend crate (or the console's native
//! blitter behind an FFI shim) implements [`Canvas`]; tests use
//! [`RecordingCanvas`].
//!
//! # Offscreen Composition
//!
//! The one non-trivial service this layer provides is offscreen target
//! management: scrolling containers render their content subtree into a
//! buffer and blit a panned, clipped window of it. See [`OffscreenTarget`].

mod canvas;
mod error;
mod recording;
mod types;

pub use canvas::{Bitmap, Canvas, OffscreenTarget};
pub use error::{DrawError, DrawResult};
pub use recording::{DrawOp, RecordingCanvas};
pub use types::{Color, Point, Rect, Size};
