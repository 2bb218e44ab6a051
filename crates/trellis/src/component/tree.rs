//! Tree operations over stored components.
//!
//! The visual-update protocol is a pull: the host (or a container) calls
//! [`render_tree`] on a root id, which draws the component and then every
//! child in insertion order, recursively. There is no dirty-region
//! tracking at this layer; concrete backends may coalesce on their side.

use trellis_core::ObjectId;
use trellis_draw::{Canvas, Rect};

use super::store::ComponentAccess;
use super::traits::DrawContext;

/// Draw a component and its children, depth-first in insertion order.
///
/// Unknown ids are skipped silently: the registry may know children whose
/// component values live in a different store.
pub fn render_tree(store: &dyn ComponentAccess, id: ObjectId, canvas: &mut dyn Canvas) {
    let Some(component) = store.get(id) else {
        return;
    };
    {
        let mut ctx = DrawContext::new(store, &mut *canvas);
        component.draw(&mut ctx);
    }
    for child_id in store.children(id) {
        render_tree(store, child_id, canvas);
    }
}

/// Shrink or grow a component to the minimal rectangle enclosing all of
/// its children's bounds.
///
/// With no children the component collapses to a zero-size rectangle at
/// the origin. Applied via `set_bounds`, so the component's `resized` hook
/// fires.
pub fn resize_to_fit_children(store: &mut dyn ComponentAccess, id: ObjectId) {
    let children = store.children(id);
    let mut enclosing: Option<Rect> = None;
    for child_id in &children {
        if let Some(child) = store.get(*child_id) {
            let child_bounds = child.bounds();
            enclosing = Some(match enclosing {
                Some(acc) => acc.union(&child_bounds),
                None => child_bounds,
            });
        }
    }

    let target = enclosing.unwrap_or(Rect::ZERO);
    if let Some(component) = store.get_mut(id) {
        component.set_bounds(target);
    }
}
