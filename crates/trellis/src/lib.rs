//! A component and input toolkit for crank-and-button handheld consoles.
//!
//! trellis provides the two cooperating pieces a handheld UI needs:
//!
//! - **Modal input routing** ([`input`]): a LIFO stack of input contexts.
//!   Exactly one context, the top, receives the frame's button and
//!   crank notifications; pushing a menu or dialog suspends the context
//!   below it, popping resumes it. Handlers request stack changes through
//!   a deferred queue, so a dialog can pop itself from inside its own
//!   button handler.
//! - **A component tree** ([`component`]): rectangular drawable
//!   components composed parent/child, redrawn top-down once per frame.
//!   [`Viewport`](component::Viewport) composites a content subtree
//!   through an offscreen buffer for scrolling;
//!   [`GridView`](component::GridView) adds focusable cells with an
//!   animated bring-into-view pan.
//!
//! The platform is consumed through injected capabilities, `InputSource`
//! for polling and `Canvas` (from `trellis-draw`) for drawing, so the
//! whole toolkit runs headless in tests.
//!
//! # Per-frame Flow
//!
//! ```text
//! host tick
//!   └─ Shell::frame
//!        ├─ ContextStack::update   poll once, dispatch to active context
//!        │                         (context mutates component state)
//!        └─ render_tree(root)      draw components top-down; viewports
//!                                  composite via offscreen buffers
//! ```
//!
//! # Example
//!
//! ```
//! use trellis::component::{ComponentStore, Container, Component};
//! use trellis::input::{ContextStore, DispatchOrder, InputContext, ScriptedInput};
//! use trellis::Shell;
//! use trellis_draw::{Rect, RecordingCanvas};
//!
//! struct Home;
//! impl InputContext for Home {}
//!
//! trellis_core::init_global_registry();
//!
//! let mut components = ComponentStore::new();
//! let mut screen = Container::new();
//! screen.set_bounds(Rect::new(0.0, 0.0, 400.0, 240.0));
//! let root = components.add(screen);
//!
//! let mut contexts = ContextStore::new();
//! let base = contexts.add(Home);
//! let mut shell = Shell::new(contexts, base, DispatchOrder::ButtonsFirst);
//! shell.set_root(Some(root));
//!
//! let mut input = ScriptedInput::new();
//! let mut canvas = RecordingCanvas::new();
//! shell.frame(&mut components, &mut input, &mut canvas);
//! ```

pub mod component;
pub mod input;
mod shell;
pub mod style;

pub use shell::Shell;
pub use style::{LookAndFeel, default_look_and_feel, set_default_look_and_feel};

// Re-export the identity and notification primitives components build on.
pub use trellis_core::{ObjectId, Signal, init_global_registry};
