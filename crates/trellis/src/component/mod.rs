//! Component system for trellis.
//!
//! This module provides the component architecture:
//!
//! - [`Component`] trait: the base for every drawable element
//! - [`ComponentBase`]: common implementation for component functionality
//! - [`ComponentStore`]/[`ComponentAccess`]: application-owned storage
//! - [`Viewport`]: offscreen-composited scrolling window
//! - [`FocusView`]/[`GridView`]: focus tracking with bring-into-view pans
//!
//! # Overview
//!
//! Components form a tree through the object registry: each has a bounds
//! rectangle and an ordered child list, and redrawing is a pull: the host
//! calls [`render_tree`] on a root once per frame, which draws each node
//! and then its children in insertion order.
//!
//! # Creating a Component
//!
//! 1. Define a struct with a [`ComponentBase`] field
//! 2. Implement `Object` (delegate `object_id` to the base)
//! 3. Implement [`Component`], overriding `draw` and, when the component
//!    manages internal geometry, `resized`
//!
//! See the [`Component`] docs for a worked example.

mod base;
mod focus_view;
mod grid;
mod store;
mod traits;
mod tree;
mod viewport;


pub use base::{ComponentBase, Container};
pub use focus_view::FocusView;
pub use grid::{CellProvider, GridView};
pub use store::{ComponentAccess, ComponentStore};
pub use traits::{Component, DrawContext};
pub use tree::{render_tree, resize_to_fit_children};
pub use viewport::Viewport;
