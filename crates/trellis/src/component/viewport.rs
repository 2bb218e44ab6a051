//! Scrollable viewport component.
//!
//! A [`Viewport`] shows a panned window onto a content component. Every
//! draw it renders the content's entire subtree into a fresh offscreen
//! buffer and blits that buffer, shifted by the pan offset and clipped to
//! the viewport's own bounds, onto the current target. Content components
//! are written with no awareness of scrolling; only the viewport is
//! pan-aware.
//!
//! The whole-subtree offscreen render trades efficiency for that
//! simplicity, which is the right trade at handheld screen sizes.

use trellis_core::{Object, ObjectId, Signal};
use trellis_draw::{OffscreenTarget, Point};

use super::base::ComponentBase;
use super::traits::{Component, DrawContext};
use super::tree::render_tree;

/// A component that renders a content subtree through an offscreen buffer
/// and displays a panned window of it.
pub struct Viewport {
    base: ComponentBase,

    /// Non-owning reference to the content component.
    content: Option<ObjectId>,

    /// Pan offset in pixels. Unconstrained: panning beyond the content is
    /// legal, clipping is visual only.
    offset_x: i32,
    offset_y: i32,

    /// Signal emitted when the pan offset changes.
    pub scrolled: Signal<(i32, i32)>,
}

impl Viewport {
    /// Create a viewport with no content.
    pub fn new() -> Self {
        Self {
            base: ComponentBase::new::<Self>(),
            content: None,
            offset_x: 0,
            offset_y: 0,
            scrolled: Signal::new(),
        }
    }

    /// Replace the content reference.
    pub fn set_content(&mut self, content: Option<ObjectId>) {
        self.content = content;
    }

    /// The current content reference.
    pub fn content(&self) -> Option<ObjectId> {
        self.content
    }

    /// The pan offset.
    pub fn content_offset(&self) -> (i32, i32) {
        (self.offset_x, self.offset_y)
    }

    /// Set the pan offset.
    pub fn set_content_offset(&mut self, x: i32, y: i32) {
        if (x, y) != (self.offset_x, self.offset_y) {
            self.offset_x = x;
            self.offset_y = y;
            tracing::trace!(target: "trellis::component", id = ?self.base.object_id(), x, y, "viewport panned");
            self.scrolled.emit((x, y));
        }
    }

    /// Pan the content by a delta.
    pub fn move_content_by(&mut self, dx: i32, dy: i32) {
        self.set_content_offset(self.offset_x + dx, self.offset_y + dy);
    }

    /// Where in content space the visible window's top-left sits.
    ///
    /// This is the pan offset negated.
    pub fn view_position(&self) -> (i32, i32) {
        (-self.offset_x, -self.offset_y)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

impl Object for Viewport {
    fn object_id(&self) -> ObjectId {
        self.base.object_id()
    }
}

impl Component for Viewport {
    fn component_base(&self) -> &ComponentBase {
        &self.base
    }

    fn component_base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) {
        let Some(content_id) = self.content else {
            return;
        };
        let (store, canvas) = ctx.parts();
        let Some(content) = store.get(content_id) else {
            return;
        };
        let content_bounds = content.bounds();
        if content_bounds.is_empty() {
            return;
        }

        // Render the content subtree into a buffer sized to the content.
        // The guard restores the previous target on every exit path.
        let Ok(mut target) = OffscreenTarget::begin(canvas, content_bounds) else {
            return;
        };
        render_tree(store, content_id, target.canvas());
        let Ok(captured) = target.finish() else {
            return;
        };

        // Blit the panned window, clipped to our own bounds.
        let bounds = self.bounds();
        let canvas = ctx.canvas();
        canvas.set_clip(bounds);
        canvas.draw_bitmap(
            &captured,
            Point::new(
                bounds.origin.x + self.offset_x as f32,
                bounds.origin.y + self.offset_y as f32,
            ),
        );
        canvas.clear_clip();
    }
}
