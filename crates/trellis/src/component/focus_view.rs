//! Focus tracking over a scrollable collection of components.
//!
//! A [`FocusView`] owns a [`Viewport`] and a content
//! [`Container`](crate::component::Container), keeps an ordered collection of child
//! components registered with that container, and tracks which one is
//! focused. Changing focus arms a transition that pans the viewport toward
//! the focused child's centered position over a configurable number of
//! frames.
//!
//! # Transition Schedule
//!
//! `set_component_focus(index, n)` with `n == 0` jumps immediately. With
//! `n > 0`, each `update_transition` call steps the offset `1/remaining`
//! of the distance to the target and decrements the countdown; the final
//! step assigns the target exactly. `n` calls land exactly on target, the
//! per-step gap shrinks geometrically, and the offset never overshoots.
//! Once the countdown is spent, further calls do nothing until a new
//! focus change re-arms it.

use trellis_core::{Object, ObjectId, Signal};
use trellis_draw::Rect;

use super::base::{ComponentBase, Container};
use super::store::{ComponentAccess, ComponentStore};
use super::traits::{Component, DrawContext};
use super::tree::resize_to_fit_children;
use super::viewport::Viewport;

/// A viewport with exactly-one-focused-child semantics and an animated
/// bring-into-view pan.
pub struct FocusView {
    base: ComponentBase,

    /// The pan-aware window onto the container.
    viewport: Viewport,

    /// The content component holding the focusable children.
    container: ObjectId,

    /// Focusable children, in registration order.
    order: Vec<ObjectId>,

    /// Index of the focused child, if any.
    focus: Option<usize>,

    /// Remaining transition frames; `None` when idle.
    transition: Option<u32>,

    /// Signal emitted when the focus index changes.
    pub focus_changed: Signal<usize>,
}

impl FocusView {
    /// Create a focus view, allocating its content container in `store`.
    pub fn new(store: &mut ComponentStore) -> Self {
        let container = store.add(Container::new());
        let mut viewport = Viewport::new();
        viewport.set_content(Some(container));
        Self {
            base: ComponentBase::new::<Self>(),
            viewport,
            container,
            order: Vec::new(),
            focus: None,
            transition: None,
            focus_changed: Signal::new(),
        }
    }

    /// The content container's id.
    pub fn container(&self) -> ObjectId {
        self.container
    }

    /// The underlying viewport.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The underlying viewport, mutably.
    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Number of registered children.
    pub fn child_count(&self) -> usize {
        self.order.len()
    }

    /// The registered children, in registration order.
    pub fn children(&self) -> &[ObjectId] {
        &self.order
    }

    /// The focused child's index, if any.
    pub fn focused_index(&self) -> Option<usize> {
        self.focus
    }

    /// The focused child's id, if any.
    pub fn focused_child(&self) -> Option<ObjectId> {
        self.focus.and_then(|index| self.order.get(index).copied())
    }

    /// Whether a pan transition is currently armed.
    pub fn has_active_transition(&self) -> bool {
        self.transition.is_some()
    }

    /// Register a child with the focus container.
    ///
    /// The child becomes part of the container's subtree and the
    /// container's bounds are recomputed to enclose all children. Adding
    /// an id twice is a no-op.
    pub fn add_child(&mut self, store: &mut dyn ComponentAccess, child: ObjectId) {
        if self.order.contains(&child) {
            return;
        }
        let Some(container) = store.get(self.container) else {
            return;
        };
        if let Err(error) = container.component_base().add_child(child) {
            tracing::warn!(target: "trellis::component", ?child, %error, "could not register focus child");
            return;
        }
        self.order.push(child);
        resize_to_fit_children(store, self.container);
    }

    /// Remove a child from the focus container.
    ///
    /// The focus index is re-clamped so it never points past the end of
    /// the shrunk collection; removing the last child clears focus.
    pub fn remove_child(&mut self, store: &mut dyn ComponentAccess, child: ObjectId) {
        let Some(position) = self.order.iter().position(|&c| c == child) else {
            return;
        };
        if let Some(container) = store.get(self.container) {
            let _ = container.component_base().remove_child(child);
        }
        self.order.remove(position);

        if let Some(focus) = self.focus {
            if self.order.is_empty() {
                self.focus = None;
                self.transition = None;
            } else if focus == position {
                let clamped = focus.min(self.order.len() - 1);
                self.focus = Some(clamped);
                self.focus_changed.emit(clamped);
            } else if focus > position {
                // Keep pointing at the same child.
                self.focus = Some(focus - 1);
            }
        }
        resize_to_fit_children(store, self.container);
    }

    /// Replace the child collection wholesale, in the given order.
    ///
    /// Used by grid refresh: membership and ordering both follow the new
    /// list, and the focus index is clamped into the new range.
    pub(crate) fn sync_children(
        &mut self,
        store: &mut dyn ComponentAccess,
        children: Vec<ObjectId>,
    ) {
        for &old in &self.order {
            if !children.contains(&old) {
                if let Some(container) = store.get(self.container) {
                    let _ = container.component_base().remove_child(old);
                }
            }
        }
        // Re-adding every child re-parents it to the end of the container's
        // list, so the container's draw order matches `children`.
        for &child in &children {
            if let Some(container) = store.get(self.container) {
                let _ = container.component_base().add_child(child);
            }
        }
        self.order = children;

        if let Some(focus) = self.focus {
            if self.order.is_empty() {
                self.focus = None;
                self.transition = None;
            } else if focus >= self.order.len() {
                self.focus = Some(self.order.len() - 1);
            }
        }
        resize_to_fit_children(store, self.container);
    }

    /// Focus the child at `index`, panning it into view.
    ///
    /// An out-of-range index leaves the focus state unchanged and returns
    /// `false`. With `transition_frames == 0` the viewport jumps to the
    /// centering offset synchronously; otherwise the transition is armed
    /// and resolved by [`update_transition`](Self::update_transition).
    pub fn set_component_focus(
        &mut self,
        store: &dyn ComponentAccess,
        index: usize,
        transition_frames: u32,
    ) -> bool {
        if index >= self.order.len() {
            tracing::trace!(target: "trellis::component", index, len = self.order.len(), "focus index out of range, ignored");
            return false;
        }

        self.focus = Some(index);
        self.focus_changed.emit(index);

        if transition_frames == 0 {
            self.transition = None;
            if let Some((x, y)) = self.centering_offset(store, self.order[index]) {
                self.viewport.set_content_offset(x, y);
            }
        } else {
            self.transition = Some(transition_frames);
        }
        true
    }

    /// Drop the focus entirely.
    pub fn clear_focus(&mut self) {
        self.focus = None;
        self.transition = None;
    }

    /// Advance an armed pan transition by one frame.
    ///
    /// The target is recomputed each call, so children that move mid-pan
    /// are tracked. No-op when no transition is armed.
    pub fn update_transition(&mut self, store: &dyn ComponentAccess) {
        let Some(frames) = self.transition else {
            return;
        };
        let Some(child) = self.focused_child() else {
            self.transition = None;
            return;
        };
        let Some((target_x, target_y)) = self.centering_offset(store, child) else {
            self.transition = None;
            return;
        };

        let (current_x, current_y) = self.viewport.content_offset();
        if frames <= 1 {
            // Final step lands exactly.
            self.viewport.set_content_offset(target_x, target_y);
            self.transition = None;
        } else {
            let remaining = frames as i32;
            self.viewport.set_content_offset(
                current_x + (target_x - current_x) / remaining,
                current_y + (target_y - current_y) / remaining,
            );
            self.transition = Some(frames - 1);
        }
    }

    /// The pan offset that centers `child` in the viewport.
    fn centering_offset(&self, store: &dyn ComponentAccess, child: ObjectId) -> Option<(i32, i32)> {
        let child_center = store.get(child)?.bounds().center();
        let content_origin = store.get(self.container)?.bounds().origin;
        let bounds = self.bounds();
        let x = bounds.width() / 2.0 - (child_center.x - content_origin.x);
        let y = bounds.height() / 2.0 - (child_center.y - content_origin.y);
        Some((x.round() as i32, y.round() as i32))
    }
}

impl Object for FocusView {
    fn object_id(&self) -> ObjectId {
        self.base.object_id()
    }
}

impl Component for FocusView {
    fn component_base(&self) -> &ComponentBase {
        &self.base
    }

    fn component_base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn resized(&mut self, new_bounds: Rect) {
        // The viewport window follows the view's own bounds.
        self.viewport.set_bounds(new_bounds);
    }

    fn draw(&self, ctx: &mut DrawContext<'_>) {
        self.viewport.draw(ctx);
    }
}
