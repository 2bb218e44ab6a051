//! The canvas capability trait and offscreen target management.
//!
//! The platform's drawing primitives are consumed through the [`Canvas`]
//! trait: a real backend forwards to the device's blitter, while tests use
//! [`RecordingCanvas`](crate::RecordingCanvas). Components never talk to
//! the hardware directly; they receive a `&mut dyn Canvas` per draw pass.
//!
//! # Offscreen Targets
//!
//! Scrolling containers composite their content through an offscreen
//! buffer: push a target, render into it, pop it back as a [`Bitmap`], and
//! blit a panned window of that bitmap to the screen. The
//! [`OffscreenTarget`] guard scopes the redirection so the previous target
//! is restored on every exit path, including unwinding.
//!
//! ```
//! use trellis_draw::{Canvas, Color, OffscreenTarget, Point, Rect, RecordingCanvas};
//!
//! let mut canvas = RecordingCanvas::new();
//! let mut target = OffscreenTarget::begin(&mut canvas, Rect::new(0.0, 0.0, 64.0, 32.0)).unwrap();
//! target.canvas().fill_rect(Rect::new(0.0, 0.0, 64.0, 32.0), Color::BLACK);
//! let bitmap = target.finish().unwrap();
//! canvas.draw_bitmap(&bitmap, Point::new(8.0, 8.0));
//! ```

use crate::error::DrawResult;
use crate::types::{Color, Point, Rect, Size};

/// A captured drawing, usable as a blit source.
///
/// Bitmaps are minted by [`Canvas::pop_target`]; the handle is only
/// meaningful to the canvas that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    handle: u64,
    size: Size,
}

impl Bitmap {
    /// Construct a bitmap from a backend handle and its pixel size.
    ///
    /// Canvas implementations call this from `pop_target`; application code
    /// normally never does.
    pub fn from_handle(handle: u64, size: Size) -> Self {
        Self { handle, size }
    }

    /// The backend handle identifying this bitmap.
    #[inline]
    pub fn handle(&self) -> u64 {
        self.handle
    }

    /// The bitmap's pixel size.
    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }
}

/// Drawing capability consumed by the component tree.
///
/// All coordinates are in the current target's space. While an offscreen
/// target pushed with bounds `b` is active, drawing is translated by
/// `-b.origin`, so content drawn at its own (absolute) bounds lands at the
/// buffer's origin.
pub trait Canvas {
    /// Redirect subsequent drawing into a fresh offscreen buffer.
    ///
    /// The buffer is sized to `bounds.size`; drawing is translated by
    /// `-bounds.origin` while the target is active. Targets nest.
    fn push_target(&mut self, bounds: Rect) -> DrawResult<()>;

    /// End the current offscreen target, restoring the previous one.
    ///
    /// Returns the captured buffer as a [`Bitmap`].
    fn pop_target(&mut self) -> DrawResult<Bitmap>;

    /// Blit a bitmap with its top-left corner at `at`.
    ///
    /// Honors the current clip rectangle, if any.
    fn draw_bitmap(&mut self, bitmap: &Bitmap, at: Point);

    /// Fill a rectangle with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Stroke a rectangle outline with a solid color.
    fn stroke_rect(&mut self, rect: Rect, color: Color);

    /// Restrict subsequent drawing to `rect` (in current target space).
    ///
    /// Clipping is visual only; it never rejects draw calls, it trims them.
    fn set_clip(&mut self, rect: Rect);

    /// Remove the clip rectangle.
    fn clear_clip(&mut self);
}

/// RAII scope for an offscreen drawing target.
///
/// `begin` pushes the target; `finish` pops it and returns the captured
/// bitmap. If the guard is dropped without `finish` (early return, unwind),
/// the target is popped anyway and the capture discarded, so the canvas is
/// never left redirected.
pub struct OffscreenTarget<'a> {
    canvas: &'a mut dyn Canvas,
    finished: bool,
}

impl<'a> OffscreenTarget<'a> {
    /// Push an offscreen target sized to `bounds` and return the guard.
    pub fn begin(canvas: &'a mut dyn Canvas, bounds: Rect) -> DrawResult<Self> {
        canvas.push_target(bounds)?;
        Ok(Self {
            canvas,
            finished: false,
        })
    }

    /// The canvas, now drawing into the offscreen buffer.
    pub fn canvas(&mut self) -> &mut dyn Canvas {
        &mut *self.canvas
    }

    /// Pop the target and return the captured bitmap.
    pub fn finish(mut self) -> DrawResult<Bitmap> {
        self.finished = true;
        self.canvas.pop_target()
    }
}

impl Drop for OffscreenTarget<'_> {
    fn drop(&mut self) {
        if !self.finished {
            tracing::debug!(target: "trellis_draw", "offscreen target dropped without finish, discarding capture");
            let _ = self.canvas.pop_target();
        }
    }
}
