//! Integration tests for the object registry and tree bookkeeping.

use trellis_core::{Object, ObjectBase, ObjectError, ObjectId, global_registry, init_global_registry};

fn setup() {
    init_global_registry();
}

struct Widget {
    base: ObjectBase,
}

impl Widget {
    fn new() -> Self {
        Self {
            base: ObjectBase::new::<Self>(),
        }
    }

    fn named(name: &str) -> Self {
        let widget = Self::new();
        widget.base.set_name(name);
        widget
    }
}

impl Object for Widget {
    fn object_id(&self) -> ObjectId {
        self.base.id()
    }
}

#[test]
fn reparenting_moves_between_children_lists() {
    setup();

    let old_parent = Widget::new();
    let new_parent = Widget::new();
    let child = Widget::new();

    child.base.set_parent(Some(old_parent.object_id())).unwrap();
    assert_eq!(old_parent.base.children(), vec![child.object_id()]);

    child.base.set_parent(Some(new_parent.object_id())).unwrap();
    assert!(old_parent.base.children().is_empty());
    assert_eq!(new_parent.base.children(), vec![child.object_id()]);
    assert_eq!(child.base.parent(), Some(new_parent.object_id()));
}

#[test]
fn ancestors_walk_to_root() {
    setup();

    let root = Widget::new();
    let mid = Widget::new();
    let leaf = Widget::new();
    mid.base.set_parent(Some(root.object_id())).unwrap();
    leaf.base.set_parent(Some(mid.object_id())).unwrap();

    assert_eq!(
        leaf.base.ancestors(),
        vec![mid.object_id(), root.object_id()]
    );
    assert!(root.base.ancestors().is_empty());
}

#[test]
fn destroyed_ids_become_invalid() {
    setup();

    let widget = Widget::new();
    let id = widget.object_id();
    let registry = global_registry().unwrap();

    registry.destroy(id).unwrap();
    assert!(!registry.contains(id));
    assert_eq!(registry.parent(id), Err(ObjectError::InvalidObjectId));
    assert_eq!(registry.destroy(id), Err(ObjectError::InvalidObjectId));
}

#[test]
fn dump_object_tree_lists_descendants() {
    setup();

    let root = Widget::named("screen");
    let menu = Widget::named("menu");
    menu.base.set_parent(Some(root.object_id())).unwrap();

    let registry = global_registry().unwrap();
    let dump = registry.dump_object_tree(root.object_id()).unwrap();
    assert!(dump.contains("screen"));
    assert!(dump.contains("menu"));
}

#[test]
fn raw_id_roundtrip() {
    setup();

    let widget = Widget::new();
    let id = widget.object_id();
    let raw = id.as_raw();
    assert_eq!(ObjectId::from_raw(raw), Some(id));
}
