//! Object model for trellis.
//!
//! Provides the base object system with:
//! - Unique object identifiers via arena-based storage
//! - Parent-child relationships with automatic drop cascade
//! - Object naming and lookup
//!
//! Components, contexts and anything else that participates in a tree get
//! their identity from here. The registry stores only the bookkeeping
//! (name, parent, children); the values themselves live in whatever store
//! the application chooses.
//!
//! # Key Types
//!
//! - [`Object`] - Base trait that all objects implement
//! - [`ObjectBase`] - Helper struct for implementing [`Object`]
//! - [`ObjectId`] - Unique stable identifier for each object
//! - [`ObjectRegistry`] - Central registry managing all objects
//! - [`SharedObjectRegistry`] - Thread-safe wrapper around [`ObjectRegistry`]

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::OnceLock;

use parking_lot::RwLock;
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// A unique identifier for an object in the registry.
    ///
    /// `ObjectId`s are stable handles that remain valid even as the object
    /// tree changes. They become invalid when the object is destroyed.
    pub struct ObjectId;
}

impl ObjectId {
    /// Convert the ObjectId to a raw u64 value.
    ///
    /// Useful for interop with external systems that need a numeric ID.
    /// The raw value can be converted back using [`ObjectId::from_raw`].
    #[inline]
    pub fn as_raw(self) -> u64 {
        use slotmap::Key;
        self.data().as_ffi()
    }

    /// Create an ObjectId from a raw u64 value.
    ///
    /// Note: this does not check if the ObjectId exists in the registry.
    #[inline]
    pub fn from_raw(raw: u64) -> Option<Self> {
        let key_data = slotmap::KeyData::from_ffi(raw);
        Some(Self::from(key_data))
    }
}

/// Errors that can occur during object operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectError {
    /// The object ID is invalid or has been destroyed.
    InvalidObjectId,
    /// Attempted to set an object as its own parent/ancestor.
    CircularParentage,
    /// The object registry is not initialized.
    RegistryNotInitialized,
}

impl fmt::Display for ObjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidObjectId => write!(f, "Invalid or destroyed object ID"),
            Self::CircularParentage => {
                write!(f, "Cannot set an object as its own parent or ancestor")
            }
            Self::RegistryNotInitialized => write!(f, "Object registry not initialized"),
        }
    }
}

impl std::error::Error for ObjectError {}

/// Result type for object operations.
pub type ObjectResult<T> = std::result::Result<T, ObjectError>;

/// Internal data stored in the registry for each object.
struct ObjectData {
    /// Human-readable name for debugging and lookup.
    name: String,
    /// The type ID of the concrete Object implementation.
    type_id: TypeId,
    /// The type name for debugging.
    type_name: &'static str,
    /// Parent object (if any).
    parent: Option<ObjectId>,
    /// Child objects, in insertion order (which is also draw order).
    children: Vec<ObjectId>,
}

impl ObjectData {
    fn new(type_id: TypeId, type_name: &'static str) -> Self {
        Self {
            name: String::new(),
            type_id,
            type_name,
            parent: None,
            children: Vec::new(),
        }
    }
}

/// The central registry that manages all objects and their relationships.
///
/// Uses arena-based storage via SlotMap for stable object IDs and efficient
/// parent-child relationship management.
pub struct ObjectRegistry {
    objects: SlotMap<ObjectId, ObjectData>,
}

impl ObjectRegistry {
    /// Create a new empty object registry.
    pub fn new() -> Self {
        Self {
            objects: SlotMap::with_key(),
        }
    }

    /// Register a new object and return its ID.
    pub fn register<T: Object + 'static>(&mut self) -> ObjectId {
        let data = ObjectData::new(TypeId::of::<T>(), std::any::type_name::<T>());
        let id = self.objects.insert(data);
        tracing::trace!(target: "trellis_core::object", ?id, type_name = std::any::type_name::<T>(), "registered object");
        id
    }

    /// Remove an object and all its children from the registry.
    ///
    /// Destroying a parent also destroys all descendants.
    pub fn destroy(&mut self, id: ObjectId) -> ObjectResult<()> {
        let descendants = self.collect_descendants(id)?;
        tracing::trace!(target: "trellis_core::object", ?id, descendant_count = descendants.len(), "destroying object tree");

        // Remove from parent's children list.
        if let Some(data) = self.objects.get(id) {
            if let Some(parent_id) = data.parent {
                if let Some(parent_data) = self.objects.get_mut(parent_id) {
                    parent_data.children.retain(|&child| child != id);
                }
            }
        }

        for child_id in descendants {
            self.objects.remove(child_id);
        }
        self.objects.remove(id);

        Ok(())
    }

    /// Collect all descendant IDs in depth-first order (children before parents).
    fn collect_descendants(&self, id: ObjectId) -> ObjectResult<Vec<ObjectId>> {
        let mut result = Vec::new();
        self.collect_descendants_recursive(id, &mut result)?;
        Ok(result)
    }

    fn collect_descendants_recursive(
        &self,
        id: ObjectId,
        result: &mut Vec<ObjectId>,
    ) -> ObjectResult<()> {
        let data = self.objects.get(id).ok_or(ObjectError::InvalidObjectId)?;
        for &child_id in &data.children {
            self.collect_descendants_recursive(child_id, result)?;
            result.push(child_id);
        }
        Ok(())
    }

    /// Check if an object exists in the registry.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(id)
    }

    /// Set the parent of an object.
    ///
    /// Handles removing from the old parent and adding to the new parent.
    /// Passing `None` makes the object a root object. Making an object its
    /// own parent or ancestor is rejected with
    /// [`ObjectError::CircularParentage`] and leaves the tree untouched.
    pub fn set_parent(&mut self, id: ObjectId, new_parent: Option<ObjectId>) -> ObjectResult<()> {
        if !self.objects.contains_key(id) {
            return Err(ObjectError::InvalidObjectId);
        }

        if let Some(parent_id) = new_parent {
            if !self.objects.contains_key(parent_id) {
                return Err(ObjectError::InvalidObjectId);
            }
            if self.is_ancestor_of(id, parent_id)? {
                return Err(ObjectError::CircularParentage);
            }
        }

        // Remove from old parent.
        let old_parent = self.objects.get(id).and_then(|d| d.parent);
        if let Some(old_parent_id) = old_parent {
            if let Some(parent_data) = self.objects.get_mut(old_parent_id) {
                parent_data.children.retain(|&child| child != id);
            }
        }

        if let Some(data) = self.objects.get_mut(id) {
            data.parent = new_parent;
        }

        if let Some(parent_id) = new_parent {
            if let Some(parent_data) = self.objects.get_mut(parent_id) {
                parent_data.children.push(id);
            }
        }

        tracing::trace!(target: "trellis_core::object", ?id, ?new_parent, "reparented object");
        Ok(())
    }

    /// Check if `potential_ancestor` is an ancestor of `id` (or `id` itself).
    fn is_ancestor_of(&self, potential_ancestor: ObjectId, id: ObjectId) -> ObjectResult<bool> {
        let mut current = Some(id);
        while let Some(current_id) = current {
            if current_id == potential_ancestor {
                return Ok(true);
            }
            current = self.objects.get(current_id).and_then(|d| d.parent);
        }
        Ok(false)
    }

    /// Get the parent of an object.
    pub fn parent(&self, id: ObjectId) -> ObjectResult<Option<ObjectId>> {
        self.objects
            .get(id)
            .map(|d| d.parent)
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Get the children of an object, in insertion order.
    pub fn children(&self, id: ObjectId) -> ObjectResult<&[ObjectId]> {
        self.objects
            .get(id)
            .map(|d| d.children.as_slice())
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Get the object's name.
    pub fn object_name(&self, id: ObjectId) -> ObjectResult<&str> {
        self.objects
            .get(id)
            .map(|d| d.name.as_str())
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Set the object's name.
    pub fn set_object_name(&mut self, id: ObjectId, name: String) -> ObjectResult<()> {
        self.objects
            .get_mut(id)
            .map(|d| d.name = name)
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Get the type ID of an object.
    pub fn type_id(&self, id: ObjectId) -> ObjectResult<TypeId> {
        self.objects
            .get(id)
            .map(|d| d.type_id)
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Get the type name of an object.
    pub fn type_name(&self, id: ObjectId) -> ObjectResult<&'static str> {
        self.objects
            .get(id)
            .map(|d| d.type_name)
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Find a child by name (direct children only).
    pub fn find_child_by_name(&self, id: ObjectId, name: &str) -> ObjectResult<Option<ObjectId>> {
        let children = self.children(id)?;
        for &child_id in children {
            if let Some(data) = self.objects.get(child_id) {
                if data.name == name {
                    return Ok(Some(child_id));
                }
            }
        }
        Ok(None)
    }

    /// Get all ancestors of an object from immediate parent to root.
    pub fn ancestors(&self, id: ObjectId) -> ObjectResult<Vec<ObjectId>> {
        if !self.objects.contains_key(id) {
            return Err(ObjectError::InvalidObjectId);
        }

        let mut result = Vec::new();
        let mut current = self.objects.get(id).and_then(|d| d.parent);
        while let Some(current_id) = current {
            result.push(current_id);
            current = self.objects.get(current_id).and_then(|d| d.parent);
        }
        Ok(result)
    }

    /// Perform a depth-first pre-order traversal starting from an object.
    ///
    /// Visits the node first, then its children recursively, in the same
    /// order the draw pass walks the tree.
    pub fn depth_first_preorder(&self, id: ObjectId) -> ObjectResult<Vec<ObjectId>> {
        let mut result = Vec::new();
        self.depth_first_preorder_recursive(id, &mut result)?;
        Ok(result)
    }

    fn depth_first_preorder_recursive(
        &self,
        id: ObjectId,
        result: &mut Vec<ObjectId>,
    ) -> ObjectResult<()> {
        let data = self.objects.get(id).ok_or(ObjectError::InvalidObjectId)?;
        result.push(id);
        for &child_id in &data.children {
            self.depth_first_preorder_recursive(child_id, result)?;
        }
        Ok(())
    }

    /// Get the number of registered objects.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Iterate over all root objects (objects with no parent).
    pub fn root_objects(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.objects
            .iter()
            .filter(|(_, data)| data.parent.is_none())
            .map(|(id, _)| id)
    }

    /// Debug dump of the object tree.
    pub fn dump_object_tree(&self, id: ObjectId) -> ObjectResult<String> {
        let mut output = String::new();
        self.dump_object_tree_recursive(id, 0, &mut output)?;
        Ok(output)
    }

    fn dump_object_tree_recursive(
        &self,
        id: ObjectId,
        depth: usize,
        output: &mut String,
    ) -> ObjectResult<()> {
        let data = self.objects.get(id).ok_or(ObjectError::InvalidObjectId)?;
        let indent = "  ".repeat(depth);
        let name_display = if data.name.is_empty() {
            "(unnamed)"
        } else {
            &data.name
        };
        output.push_str(&format!(
            "{}[{:?}] {} ({})\n",
            indent, id, name_display, data.type_name
        ));
        for &child_id in &data.children {
            self.dump_object_tree_recursive(child_id, depth + 1, output)?;
        }
        Ok(())
    }
}

impl Default for ObjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// A thread-safe wrapper around [`ObjectRegistry`].
///
/// Provides concurrent read access with exclusive write access via `RwLock`.
pub struct SharedObjectRegistry {
    inner: RwLock<ObjectRegistry>,
}

impl SharedObjectRegistry {
    /// Create a new shared object registry.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(ObjectRegistry::new()),
        }
    }

    /// Register a new object.
    pub fn register<T: Object + 'static>(&self) -> ObjectId {
        self.inner.write().register::<T>()
    }

    /// Destroy an object and its children.
    pub fn destroy(&self, id: ObjectId) -> ObjectResult<()> {
        self.inner.write().destroy(id)
    }

    /// Check if an object exists.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.inner.read().contains(id)
    }

    /// Set the parent of an object.
    pub fn set_parent(&self, id: ObjectId, parent: Option<ObjectId>) -> ObjectResult<()> {
        self.inner.write().set_parent(id, parent)
    }

    /// Get the parent of an object.
    pub fn parent(&self, id: ObjectId) -> ObjectResult<Option<ObjectId>> {
        self.inner.read().parent(id)
    }

    /// Get the children of an object (returns owned Vec for thread safety).
    pub fn children(&self, id: ObjectId) -> ObjectResult<Vec<ObjectId>> {
        self.inner.read().children(id).map(|c| c.to_vec())
    }

    /// Get the object's name.
    pub fn object_name(&self, id: ObjectId) -> ObjectResult<String> {
        self.inner.read().object_name(id).map(|s| s.to_string())
    }

    /// Set the object's name.
    pub fn set_object_name(&self, id: ObjectId, name: String) -> ObjectResult<()> {
        self.inner.write().set_object_name(id, name)
    }

    /// Get the type name of an object.
    pub fn type_name(&self, id: ObjectId) -> ObjectResult<&'static str> {
        self.with_read(|r| r.type_name(id))
    }

    /// Find a child by name.
    pub fn find_child_by_name(&self, id: ObjectId, name: &str) -> ObjectResult<Option<ObjectId>> {
        self.inner.read().find_child_by_name(id, name)
    }

    /// Get all ancestors of an object from immediate parent to root.
    pub fn ancestors(&self, id: ObjectId) -> ObjectResult<Vec<ObjectId>> {
        self.inner.read().ancestors(id)
    }

    /// Perform a depth-first pre-order traversal starting from an object.
    pub fn depth_first_preorder(&self, id: ObjectId) -> ObjectResult<Vec<ObjectId>> {
        self.inner.read().depth_first_preorder(id)
    }

    /// Get the number of registered objects.
    pub fn object_count(&self) -> usize {
        self.inner.read().object_count()
    }

    /// Get all root objects.
    pub fn root_objects(&self) -> Vec<ObjectId> {
        self.inner.read().root_objects().collect()
    }

    /// Debug dump of the object tree.
    pub fn dump_object_tree(&self, id: ObjectId) -> ObjectResult<String> {
        self.inner.read().dump_object_tree(id)
    }

    /// Access the registry with a read lock for complex operations.
    pub fn with_read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ObjectRegistry) -> R,
    {
        f(&self.inner.read())
    }

    /// Access the registry with a write lock for complex operations.
    pub fn with_write<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut ObjectRegistry) -> R,
    {
        f(&mut self.inner.write())
    }
}

impl Default for SharedObjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Global object registry (lazy initialized).
static GLOBAL_REGISTRY: OnceLock<SharedObjectRegistry> = OnceLock::new();

/// Initialize the global object registry.
///
/// Calling this more than once is harmless; later calls are no-ops.
pub fn init_global_registry() {
    let _ = GLOBAL_REGISTRY.set(SharedObjectRegistry::new());
}

/// Get a reference to the global object registry.
///
/// Returns an error if the registry hasn't been initialized.
pub fn global_registry() -> ObjectResult<&'static SharedObjectRegistry> {
    GLOBAL_REGISTRY
        .get()
        .ok_or(ObjectError::RegistryNotInitialized)
}

/// The base trait that all objects must implement.
///
/// Types implementing this trait can participate in the object tree and
/// support notification through the [`Signal`](crate::Signal) system.
pub trait Object: Any + Send + Sync {
    /// Get this object's unique identifier.
    fn object_id(&self) -> ObjectId;
}

/// Helper for implementing the [`Object`] trait.
///
/// Include this as a field in your object types to handle registration and
/// provide the object ID. On construction, it automatically registers the
/// object with the [`global_registry`].
///
/// # Example
///
/// ```
/// use trellis_core::{Object, ObjectId, ObjectBase, init_global_registry};
///
/// init_global_registry();
///
/// struct Badge {
///     base: ObjectBase,
/// }
///
/// impl Badge {
///     fn new() -> Self {
///         Self { base: ObjectBase::new::<Self>() }
///     }
/// }
///
/// impl Object for Badge {
///     fn object_id(&self) -> ObjectId {
///         self.base.id()
///     }
/// }
///
/// let badge = Badge::new();
/// badge.base.set_name("badge");
/// assert_eq!(badge.base.name(), "badge");
/// ```
pub struct ObjectBase {
    id: ObjectId,
}

impl ObjectBase {
    /// Create a new ObjectBase, registering the object in the global registry.
    ///
    /// # Panics
    ///
    /// Panics if the global registry is not initialized.
    pub fn new<T: Object + 'static>() -> Self {
        let registry = global_registry().expect("Object registry not initialized");
        let id = registry.register::<T>();
        Self { id }
    }

    /// Get the object's ID.
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Get the object's name from the registry.
    pub fn name(&self) -> String {
        global_registry()
            .and_then(|r| r.object_name(self.id))
            .unwrap_or_default()
    }

    /// Set the object's name in the registry.
    pub fn set_name(&self, name: impl Into<String>) {
        if let Ok(registry) = global_registry() {
            let _ = registry.set_object_name(self.id, name.into());
        }
    }

    /// Get the parent object ID.
    pub fn parent(&self) -> Option<ObjectId> {
        global_registry()
            .and_then(|r| r.parent(self.id))
            .ok()
            .flatten()
    }

    /// Set the parent object.
    pub fn set_parent(&self, parent: Option<ObjectId>) -> ObjectResult<()> {
        global_registry()?.set_parent(self.id, parent)
    }

    /// Get child object IDs.
    pub fn children(&self) -> Vec<ObjectId> {
        global_registry()
            .and_then(|r| r.children(self.id))
            .unwrap_or_default()
    }

    /// Find a child by name.
    pub fn find_child_by_name(&self, name: &str) -> Option<ObjectId> {
        global_registry()
            .and_then(|r| r.find_child_by_name(self.id, name))
            .ok()
            .flatten()
    }

    /// Get all ancestors from immediate parent to root.
    pub fn ancestors(&self) -> Vec<ObjectId> {
        global_registry()
            .and_then(|r| r.ancestors(self.id))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Node {
        base: ObjectBase,
    }

    impl Node {
        fn new() -> Self {
            Self {
                base: ObjectBase::new::<Self>(),
            }
        }
    }

    impl Object for Node {
        fn object_id(&self) -> ObjectId {
            self.base.id()
        }
    }

    fn setup() {
        init_global_registry();
    }

    #[test]
    fn test_register_and_contains() {
        setup();

        let node = Node::new();
        let registry = global_registry().unwrap();
        assert!(registry.contains(node.object_id()));
    }

    #[test]
    fn test_parent_child() {
        setup();

        let parent = Node::new();
        let child = Node::new();

        child.base.set_parent(Some(parent.object_id())).unwrap();
        assert_eq!(child.base.parent(), Some(parent.object_id()));
        assert_eq!(parent.base.children(), vec![child.object_id()]);

        // Detach
        child.base.set_parent(None).unwrap();
        assert_eq!(child.base.parent(), None);
        assert!(parent.base.children().is_empty());
    }

    #[test]
    fn test_self_parent_rejected() {
        setup();

        let node = Node::new();
        let result = node.base.set_parent(Some(node.object_id()));
        assert_eq!(result, Err(ObjectError::CircularParentage));
        assert_eq!(node.base.parent(), None);
        assert!(node.base.children().is_empty());
    }

    #[test]
    fn test_circular_parentage_rejected() {
        setup();

        let a = Node::new();
        let b = Node::new();
        let c = Node::new();

        b.base.set_parent(Some(a.object_id())).unwrap();
        c.base.set_parent(Some(b.object_id())).unwrap();

        // a would become a descendant of itself
        let result = a.base.set_parent(Some(c.object_id()));
        assert_eq!(result, Err(ObjectError::CircularParentage));
        assert_eq!(a.base.parent(), None);
    }

    #[test]
    fn test_destroy_cascades() {
        setup();

        let parent = Node::new();
        let child = Node::new();
        let grandchild = Node::new();
        child.base.set_parent(Some(parent.object_id())).unwrap();
        grandchild.base.set_parent(Some(child.object_id())).unwrap();

        let registry = global_registry().unwrap();
        registry.destroy(parent.object_id()).unwrap();

        assert!(!registry.contains(parent.object_id()));
        assert!(!registry.contains(child.object_id()));
        assert!(!registry.contains(grandchild.object_id()));
    }

    #[test]
    fn test_children_keep_insertion_order() {
        setup();

        let parent = Node::new();
        let first = Node::new();
        let second = Node::new();
        let third = Node::new();
        for node in [&first, &second, &third] {
            node.base.set_parent(Some(parent.object_id())).unwrap();
        }

        assert_eq!(
            parent.base.children(),
            vec![first.object_id(), second.object_id(), third.object_id()]
        );
    }

    #[test]
    fn test_find_child_by_name() {
        setup();

        let parent = Node::new();
        let child = Node::new();
        child.base.set_parent(Some(parent.object_id())).unwrap();
        child.base.set_name("status_bar");

        assert_eq!(
            parent.base.find_child_by_name("status_bar"),
            Some(child.object_id())
        );
        assert_eq!(parent.base.find_child_by_name("missing"), None);
    }

    #[test]
    fn test_preorder_traversal() {
        setup();

        let root = Node::new();
        let a = Node::new();
        let b = Node::new();
        let a1 = Node::new();
        a.base.set_parent(Some(root.object_id())).unwrap();
        b.base.set_parent(Some(root.object_id())).unwrap();
        a1.base.set_parent(Some(a.object_id())).unwrap();

        let registry = global_registry().unwrap();
        let order = registry.depth_first_preorder(root.object_id()).unwrap();
        assert_eq!(
            order,
            vec![
                root.object_id(),
                a.object_id(),
                a1.object_id(),
                b.object_id()
            ]
        );
    }
}
