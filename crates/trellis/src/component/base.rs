//! Component base implementation.
//!
//! This module provides [`ComponentBase`], the common implementation
//! details for all components: object-system integration, the bounds
//! rectangle, child membership, and the look-and-feel override. Component
//! implementations include it as a field and delegate to it.

use std::sync::Arc;

use trellis_core::{Object, ObjectBase, ObjectError, ObjectId, ObjectResult, Signal, global_registry};
use trellis_draw::Rect;

use crate::style::{LookAndFeel, default_look_and_feel};

use super::traits::Component;

/// The base implementation for all components.
pub struct ComponentBase {
    /// The underlying object base for Object trait implementation.
    object_base: ObjectBase,

    /// The component's bounds (position relative to the screen and size).
    bounds: Rect,

    /// Per-component look-and-feel override.
    look: Option<Arc<LookAndFeel>>,

    /// Signal emitted when the bounds actually change.
    pub bounds_changed: Signal<Rect>,
}

impl ComponentBase {
    /// Create a new component base.
    ///
    /// # Panics
    ///
    /// Panics if the global object registry is not initialized.
    pub fn new<T: Object + 'static>() -> Self {
        Self {
            object_base: ObjectBase::new::<T>(),
            bounds: Rect::ZERO,
            look: None,
            bounds_changed: Signal::new(),
        }
    }

    // =========================================================================
    // Object System Delegation
    // =========================================================================

    /// Get the component's unique object ID.
    #[inline]
    pub fn object_id(&self) -> ObjectId {
        self.object_base.id()
    }

    /// Get the component's name.
    pub fn name(&self) -> String {
        self.object_base.name()
    }

    /// Set the component's name.
    pub fn set_name(&self, name: impl Into<String>) {
        self.object_base.set_name(name);
    }

    /// Get the parent component's object ID.
    pub fn parent_id(&self) -> Option<ObjectId> {
        self.object_base.parent()
    }

    /// Get the IDs of child components, in insertion order.
    pub fn children_ids(&self) -> Vec<ObjectId> {
        self.object_base.children()
    }

    /// Find a child by name.
    pub fn find_child_by_name(&self, name: &str) -> Option<ObjectId> {
        self.object_base.find_child_by_name(name)
    }

    // =========================================================================
    // Child Membership
    // =========================================================================

    /// Append `child` to this component's child list.
    ///
    /// A component must never be its own child: the redraw walk would
    /// recurse forever. Self-addition asserts in development builds and is
    /// rejected with [`ObjectError::CircularParentage`] otherwise, leaving
    /// the child list untouched. An already-present child is moved to the
    /// end of the list.
    pub fn add_child(&self, child: ObjectId) -> ObjectResult<()> {
        debug_assert_ne!(
            child,
            self.object_id(),
            "component cannot be its own child"
        );
        if child == self.object_id() {
            return Err(ObjectError::CircularParentage);
        }
        global_registry()?.set_parent(child, Some(self.object_id()))
    }

    /// Detach `child` from this component.
    ///
    /// Removing an id that is not currently a child is a no-op.
    pub fn remove_child(&self, child: ObjectId) -> ObjectResult<()> {
        let registry = global_registry()?;
        if registry.parent(child)? == Some(self.object_id()) {
            registry.set_parent(child, None)
        } else {
            Ok(())
        }
    }

    // =========================================================================
    // Bounds
    // =========================================================================

    /// Get the component's bounds.
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Store new bounds.
    ///
    /// Emits `bounds_changed` when the rectangle actually differs. The
    /// `resized` hook is the [`Component::set_bounds`] trait method's job
    /// and fires on every call regardless.
    pub fn set_bounds(&mut self, bounds: Rect) {
        if self.bounds != bounds {
            self.bounds = bounds;
            tracing::trace!(target: "trellis::component", id = ?self.object_id(), ?bounds, "bounds changed");
            self.bounds_changed.emit(bounds);
        }
    }

    /// The component's rectangle with origin (0, 0).
    #[inline]
    pub fn local_bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.bounds.size.width, self.bounds.size.height)
    }

    // =========================================================================
    // Look and Feel
    // =========================================================================

    /// The look-and-feel in effect: the override if set, else the
    /// process-wide default.
    pub fn look_and_feel(&self) -> Arc<LookAndFeel> {
        self.look.clone().unwrap_or_else(default_look_and_feel)
    }

    /// Set or clear this component's look-and-feel override.
    pub fn set_look_and_feel(&mut self, look: Option<Arc<LookAndFeel>>) {
        self.look = look;
    }
}

impl Object for ComponentBase {
    fn object_id(&self) -> ObjectId {
        self.object_base.id()
    }
}

// ComponentBase doesn't implement Drop; the registry entry lives until the
// owning store destroys it.

/// A plain component with no visual content of its own.
///
/// Used wherever a grouping node is needed, most notably as the content
/// holder behind [`FocusView`](super::FocusView).
pub struct Container {
    base: ComponentBase,
}

impl Container {
    /// Create an empty container.
    pub fn new() -> Self {
        Self {
            base: ComponentBase::new::<Self>(),
        }
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl Object for Container {
    fn object_id(&self) -> ObjectId {
        self.base.object_id()
    }
}

impl Component for Container {
    fn component_base(&self) -> &ComponentBase {
        &self.base
    }

    fn component_base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }
}
