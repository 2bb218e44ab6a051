//! A recording canvas for tests and headless use.
//!
//! [`RecordingCanvas`] implements [`Canvas`] without any hardware: draw
//! calls are logged as [`DrawOp`] values, and offscreen targets capture
//! their op list as the bitmap contents. Tests assert on the recorded ops
//! to verify what a component tree would have put on screen.

use std::collections::HashMap;

use crate::canvas::{Bitmap, Canvas};
use crate::error::{DrawError, DrawResult};
use crate::types::{Color, Point, Rect, Size};

/// A single recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// A filled rectangle.
    FillRect {
        /// Rectangle in target space.
        rect: Rect,
        /// Fill color.
        color: Color,
    },
    /// A stroked rectangle outline.
    StrokeRect {
        /// Rectangle in target space.
        rect: Rect,
        /// Stroke color.
        color: Color,
    },
    /// A bitmap blit.
    Blit {
        /// Handle of the blitted bitmap.
        bitmap: u64,
        /// Top-left corner in target space.
        at: Point,
        /// Clip rectangle active at blit time, if any.
        clip: Option<Rect>,
    },
}

/// Contents captured for a popped offscreen target.
#[derive(Debug, Clone)]
struct CapturedBitmap {
    size: Size,
    ops: Vec<DrawOp>,
}

/// An active offscreen frame.
struct TargetFrame {
    bounds: Rect,
    ops: Vec<DrawOp>,
}

/// A [`Canvas`] that records operations instead of rasterizing them.
#[derive(Default)]
pub struct RecordingCanvas {
    /// Ops recorded against the root (screen) target.
    root_ops: Vec<DrawOp>,
    /// Stack of active offscreen frames, innermost last.
    targets: Vec<TargetFrame>,
    /// Captured buffers by handle.
    bitmaps: HashMap<u64, CapturedBitmap>,
    next_handle: u64,
    clip: Option<Rect>,
}

impl RecordingCanvas {
    /// Create an empty recording canvas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ops recorded against the root target, in call order.
    pub fn ops(&self) -> &[DrawOp] {
        &self.root_ops
    }

    /// Ops captured into a bitmap when its target was popped.
    pub fn bitmap_ops(&self, bitmap: &Bitmap) -> DrawResult<&[DrawOp]> {
        self.bitmaps
            .get(&bitmap.handle())
            .map(|c| c.ops.as_slice())
            .ok_or(DrawError::UnknownBitmap(bitmap.handle()))
    }

    /// Number of offscreen targets currently active.
    pub fn target_depth(&self) -> usize {
        self.targets.len()
    }

    /// Forget all recorded ops and captures.
    pub fn clear(&mut self) {
        self.root_ops.clear();
        self.targets.clear();
        self.bitmaps.clear();
        self.clip = None;
    }

    fn record(&mut self, op: DrawOp) {
        match self.targets.last_mut() {
            Some(frame) => frame.ops.push(op),
            None => self.root_ops.push(op),
        }
    }

    /// Translate a rect into the active target's space.
    fn to_target_space(&self, rect: Rect) -> Rect {
        match self.targets.last() {
            Some(frame) => rect.translated(-frame.bounds.origin.x, -frame.bounds.origin.y),
            None => rect,
        }
    }

    fn point_to_target_space(&self, point: Point) -> Point {
        match self.targets.last() {
            Some(frame) => Point::new(
                point.x - frame.bounds.origin.x,
                point.y - frame.bounds.origin.y,
            ),
            None => point,
        }
    }
}

impl Canvas for RecordingCanvas {
    fn push_target(&mut self, bounds: Rect) -> DrawResult<()> {
        if bounds.is_empty() {
            return Err(DrawError::InvalidDimensions {
                width: bounds.width() as i32,
                height: bounds.height() as i32,
            });
        }
        self.targets.push(TargetFrame {
            bounds,
            ops: Vec::new(),
        });
        Ok(())
    }

    fn pop_target(&mut self) -> DrawResult<Bitmap> {
        let frame = self.targets.pop().ok_or(DrawError::NoActiveTarget)?;
        let handle = self.next_handle;
        self.next_handle += 1;
        let size = frame.bounds.size;
        self.bitmaps.insert(
            handle,
            CapturedBitmap {
                size,
                ops: frame.ops,
            },
        );
        Ok(Bitmap::from_handle(handle, size))
    }

    fn draw_bitmap(&mut self, bitmap: &Bitmap, at: Point) {
        let at = self.point_to_target_space(at);
        let clip = self.clip;
        self.record(DrawOp::Blit {
            bitmap: bitmap.handle(),
            at,
            clip,
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let rect = self.to_target_space(rect);
        self.record(DrawOp::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color) {
        let rect = self.to_target_space(rect);
        self.record(DrawOp::StrokeRect { rect, color });
    }

    fn set_clip(&mut self, rect: Rect) {
        self.clip = Some(self.to_target_space(rect));
    }

    fn clear_clip(&mut self) {
        self.clip = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_root_ops_in_order() {
        let mut canvas = RecordingCanvas::new();
        canvas.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Color::BLACK);
        canvas.stroke_rect(Rect::new(1.0, 1.0, 2.0, 2.0), Color::WHITE);

        assert_eq!(
            canvas.ops(),
            &[
                DrawOp::FillRect {
                    rect: Rect::new(0.0, 0.0, 4.0, 4.0),
                    color: Color::BLACK,
                },
                DrawOp::StrokeRect {
                    rect: Rect::new(1.0, 1.0, 2.0, 2.0),
                    color: Color::WHITE,
                },
            ]
        );
    }

    #[test]
    fn test_target_translates_into_buffer_space() {
        let mut canvas = RecordingCanvas::new();
        canvas
            .push_target(Rect::new(10.0, 20.0, 50.0, 50.0))
            .unwrap();
        // Drawn at absolute (10, 20): lands at the buffer origin.
        canvas.fill_rect(Rect::new(10.0, 20.0, 5.0, 5.0), Color::BLACK);
        let bitmap = canvas.pop_target().unwrap();

        assert_eq!(
            canvas.bitmap_ops(&bitmap).unwrap(),
            &[DrawOp::FillRect {
                rect: Rect::new(0.0, 0.0, 5.0, 5.0),
                color: Color::BLACK,
            }]
        );
        assert_eq!(bitmap.size(), Size::new(50.0, 50.0));
    }

    #[test]
    fn test_pop_without_push_fails() {
        let mut canvas = RecordingCanvas::new();
        assert_eq!(canvas.pop_target(), Err(DrawError::NoActiveTarget));
    }

    #[test]
    fn test_zero_size_target_rejected() {
        let mut canvas = RecordingCanvas::new();
        let result = canvas.push_target(Rect::ZERO);
        assert!(matches!(result, Err(DrawError::InvalidDimensions { .. })));
        assert_eq!(canvas.target_depth(), 0);
    }

    #[test]
    fn test_blit_records_active_clip() {
        let mut canvas = RecordingCanvas::new();
        canvas.push_target(Rect::new(0.0, 0.0, 8.0, 8.0)).unwrap();
        let bitmap = canvas.pop_target().unwrap();

        canvas.set_clip(Rect::new(0.0, 0.0, 4.0, 4.0));
        canvas.draw_bitmap(&bitmap, Point::new(1.0, 2.0));
        canvas.clear_clip();
        canvas.draw_bitmap(&bitmap, Point::new(3.0, 4.0));

        assert_eq!(
            canvas.ops(),
            &[
                DrawOp::Blit {
                    bitmap: bitmap.handle(),
                    at: Point::new(1.0, 2.0),
                    clip: Some(Rect::new(0.0, 0.0, 4.0, 4.0)),
                },
                DrawOp::Blit {
                    bitmap: bitmap.handle(),
                    at: Point::new(3.0, 4.0),
                    clip: None,
                },
            ]
        );
    }

    #[test]
    fn test_nested_targets() {
        let mut canvas = RecordingCanvas::new();
        canvas.push_target(Rect::new(0.0, 0.0, 20.0, 20.0)).unwrap();
        canvas.push_target(Rect::new(5.0, 5.0, 10.0, 10.0)).unwrap();
        canvas.fill_rect(Rect::new(5.0, 5.0, 2.0, 2.0), Color::BLACK);
        let inner = canvas.pop_target().unwrap();
        assert_eq!(canvas.target_depth(), 1);
        canvas.draw_bitmap(&inner, Point::new(5.0, 5.0));
        let outer = canvas.pop_target().unwrap();
        assert_eq!(canvas.target_depth(), 0);

        assert_eq!(
            canvas.bitmap_ops(&inner).unwrap(),
            &[DrawOp::FillRect {
                rect: Rect::new(0.0, 0.0, 2.0, 2.0),
                color: Color::BLACK,
            }]
        );
        // The inner blit was translated into the outer buffer's space.
        assert_eq!(
            canvas.bitmap_ops(&outer).unwrap(),
            &[DrawOp::Blit {
                bitmap: inner.handle(),
                at: Point::new(5.0, 5.0),
                clip: None,
            }]
        );
    }
}
