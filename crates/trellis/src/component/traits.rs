//! Core component trait definitions.
//!
//! This module defines the [`Component`] trait which is the foundation for
//! every drawable element in trellis, and [`DrawContext`], the rendering
//! context handed to [`Component::draw`].
//!
//! # Coordinate System
//!
//! Components draw at their own bounds: the canvas is shared by the whole
//! tree and a component's `draw` uses `self.bounds()` (or
//! [`local_bounds`](Component::local_bounds) plus its origin) to place its
//! content. Scrolling containers redirect the canvas to an offscreen
//! target; content components never need to know.

use std::sync::Arc;

use trellis_core::{Object, ObjectId};
use trellis_draw::{Canvas, Rect};

use super::base::ComponentBase;
use super::store::ComponentAccess;
use super::tree::render_tree;
use crate::style::LookAndFeel;

/// Context provided during a draw pass.
///
/// Wraps the canvas together with read access to the component store, so
/// container components can render their subtrees.
pub struct DrawContext<'a> {
    store: &'a dyn ComponentAccess,
    canvas: &'a mut dyn Canvas,
}

impl<'a> DrawContext<'a> {
    /// Create a draw context over a store and canvas.
    pub fn new(store: &'a dyn ComponentAccess, canvas: &'a mut dyn Canvas) -> Self {
        Self { store, canvas }
    }

    /// Read access to the component store.
    pub fn store(&self) -> &'a dyn ComponentAccess {
        self.store
    }

    /// The canvas to draw with.
    pub fn canvas(&mut self) -> &mut dyn Canvas {
        &mut *self.canvas
    }

    /// Split into store and canvas borrows.
    ///
    /// Useful when a scoped canvas borrow (an offscreen target guard) must
    /// coexist with store reads.
    pub fn parts(&mut self) -> (&'a dyn ComponentAccess, &mut dyn Canvas) {
        (self.store, &mut *self.canvas)
    }

    /// Draw a component and its children onto the current canvas target.
    pub fn render_subtree(&mut self, id: ObjectId) {
        render_tree(self.store, id, &mut *self.canvas);
    }
}

/// The core trait for all drawable components.
///
/// `Component` extends [`Object`] with a bounds rectangle, a draw hook,
/// and a resize hook. Implementations embed a [`ComponentBase`] and
/// delegate to it:
///
/// ```
/// use trellis::component::{Component, ComponentBase, DrawContext};
/// use trellis_core::{Object, ObjectId, init_global_registry};
/// use trellis_draw::{Color, Rect};
///
/// init_global_registry();
///
/// struct Badge {
///     base: ComponentBase,
/// }
///
/// impl Badge {
///     fn new() -> Self {
///         Self { base: ComponentBase::new::<Self>() }
///     }
/// }
///
/// impl Object for Badge {
///     fn object_id(&self) -> ObjectId {
///         self.base.object_id()
///     }
/// }
///
/// impl Component for Badge {
///     fn component_base(&self) -> &ComponentBase { &self.base }
///     fn component_base_mut(&mut self) -> &mut ComponentBase { &mut self.base }
///
///     fn draw(&self, ctx: &mut DrawContext<'_>) {
///         let bounds = self.bounds();
///         ctx.canvas().fill_rect(bounds, Color::BLACK);
///     }
/// }
///
/// let mut badge = Badge::new();
/// badge.set_bounds(Rect::new(4.0, 4.0, 16.0, 16.0));
/// assert_eq!(badge.local_bounds(), Rect::new(0.0, 0.0, 16.0, 16.0));
/// ```
pub trait Component: Object {
    /// Get a reference to the component's base.
    fn component_base(&self) -> &ComponentBase;

    /// Get a mutable reference to the component's base.
    fn component_base_mut(&mut self) -> &mut ComponentBase;

    /// The component's bounds (position and size, in parent space).
    fn bounds(&self) -> Rect {
        self.component_base().bounds()
    }

    /// Set the component's bounds.
    ///
    /// Stores the rectangle, then invokes [`resized`](Self::resized)
    /// synchronously, exactly once per call, including the first
    /// assignment and including assignment of an unchanged rectangle.
    fn set_bounds(&mut self, bounds: Rect) {
        self.component_base_mut().set_bounds(bounds);
        self.resized(bounds);
    }

    /// The component's rectangle with origin (0, 0).
    ///
    /// Drawing code that wants content-relative coordinates uses this.
    fn local_bounds(&self) -> Rect {
        self.component_base().local_bounds()
    }

    /// Hook: the bounds were just assigned.
    ///
    /// Override to re-layout children or internal geometry. Default no-op.
    fn resized(&mut self, _new_bounds: Rect) {}

    /// Hook: draw this component's own visual content.
    ///
    /// Children are drawn by the tree walk after this returns; a component
    /// only draws itself. Default no-op.
    fn draw(&self, _ctx: &mut DrawContext<'_>) {}

    /// The look-and-feel in effect for this component.
    ///
    /// The component's own override if set, otherwise the process-wide
    /// default.
    fn look_and_feel(&self) -> Arc<LookAndFeel> {
        self.component_base().look_and_feel()
    }
}
