//! Component storage and access.
//!
//! Components are owned by the application in a [`ComponentStore`] and
//! addressed by [`ObjectId`]. Tree operations (drawing, layout, focus) go
//! through the [`ComponentAccess`] trait so they work against any storage
//! an application chooses; `ComponentStore` is the stock implementation.

use std::any::Any;
use std::collections::HashMap;

use trellis_core::{ObjectId, global_registry};

use super::traits::Component;

/// Trait for accessing components by their ObjectId.
pub trait ComponentAccess {
    /// Get an immutable reference to a component by its ID.
    fn get(&self, id: ObjectId) -> Option<&dyn Component>;

    /// Get a mutable reference to a component by its ID.
    fn get_mut(&mut self, id: ObjectId) -> Option<&mut dyn Component>;

    /// Get the children of a component, in insertion (draw) order.
    ///
    /// The default implementation queries the global object registry,
    /// which is where child membership canonically lives.
    fn children(&self, id: ObjectId) -> Vec<ObjectId> {
        global_registry()
            .and_then(|r| r.children(id))
            .unwrap_or_default()
    }
}

/// Application-owned arena of boxed components.
#[derive(Default)]
pub struct ComponentStore {
    components: HashMap<ObjectId, Box<dyn Component>>,
}

impl ComponentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component, returning its object id.
    pub fn add(&mut self, component: impl Component + 'static) -> ObjectId {
        self.add_boxed(Box::new(component))
    }

    /// Add an already-boxed component.
    pub fn add_boxed(&mut self, component: Box<dyn Component>) -> ObjectId {
        let id = component.object_id();
        self.components.insert(id, component);
        id
    }

    /// Check whether an id refers to a stored component.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.components.contains_key(&id)
    }

    /// Borrow a component downcast to its concrete type.
    pub fn get_as<T: Component>(&self, id: ObjectId) -> Option<&T> {
        let component: &dyn Any = self.components.get(&id)?.as_ref();
        component.downcast_ref::<T>()
    }

    /// Mutably borrow a component downcast to its concrete type.
    pub fn get_as_mut<T: Component>(&mut self, id: ObjectId) -> Option<&mut T> {
        let component: &mut dyn Any = self.components.get_mut(&id)?.as_mut();
        component.downcast_mut::<T>()
    }

    /// Remove a component and its registry subtree.
    ///
    /// Descendant components stored here are dropped along with the
    /// registry bookkeeping; the removed component itself is returned.
    pub fn remove(&mut self, id: ObjectId) -> Option<Box<dyn Component>> {
        let descendants = global_registry()
            .ok()
            .and_then(|r| r.depth_first_preorder(id).ok())
            .unwrap_or_default();
        if let Ok(registry) = global_registry() {
            let _ = registry.destroy(id);
        }
        for descendant in descendants.iter().skip(1) {
            self.components.remove(descendant);
        }
        self.components.remove(&id)
    }

    /// Temporarily take a component out of the store to operate on it and
    /// the rest of the store at once.
    ///
    /// Controllers that live in the store (a grid on a screen, say) need
    /// `&mut self` plus `&mut store` for operations like refreshing cells;
    /// this split-borrow helper makes that possible. Returns `None` if the
    /// id is not stored.
    pub fn with_mut<R>(
        &mut self,
        id: ObjectId,
        f: impl FnOnce(&mut dyn Component, &mut ComponentStore) -> R,
    ) -> Option<R> {
        let mut component = self.components.remove(&id)?;
        let result = f(component.as_mut(), self);
        self.components.insert(id, component);
        Some(result)
    }

    /// Number of stored components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Check whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl ComponentAccess for ComponentStore {
    fn get(&self, id: ObjectId) -> Option<&dyn Component> {
        self.components.get(&id).map(|c| c.as_ref())
    }

    fn get_mut(&mut self, id: ObjectId) -> Option<&mut dyn Component> {
        self.components.get_mut(&id).map(|c| c.as_mut())
    }
}
