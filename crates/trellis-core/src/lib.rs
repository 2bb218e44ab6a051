//! Core systems for trellis.
//!
//! This crate provides the foundational components of the trellis toolkit:
//!
//! - **Object Model**: arena-based identity, parent-child ownership, naming
//! - **Signal/Slot System**: type-safe change notification
//! - **Logging**: `tracing` integration and object-tree debug dumps
//!
//! The toolkit crate (`trellis`) builds its component tree and input
//! routing on top of these primitives.
//!
//! # Signal/Slot Example
//!
//! ```
//! use trellis_core::Signal;
//!
//! // Create a signal that notifies when a value changes
//! let value_changed = Signal::<i32>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // Emit the signal
//! value_changed.emit(42);
//!
//! // Disconnect when done
//! value_changed.disconnect(conn_id);
//! ```
//!
//! # Object Tree Example
//!
//! ```
//! use trellis_core::{Object, ObjectBase, ObjectId, init_global_registry};
//!
//! init_global_registry();
//!
//! struct Panel {
//!     base: ObjectBase,
//! }
//!
//! impl Object for Panel {
//!     fn object_id(&self) -> ObjectId {
//!         self.base.id()
//!     }
//! }
//!
//! let panel = Panel { base: ObjectBase::new::<Panel>() };
//! let item = Panel { base: ObjectBase::new::<Panel>() };
//! item.base.set_parent(Some(panel.object_id())).unwrap();
//! assert_eq!(panel.base.children(), vec![item.object_id()]);
//! ```

mod error;
pub mod logging;
pub mod object;
pub mod signal;

pub use error::{CoreError, Result, SignalError};
pub use logging::{ObjectTreeDebug, TreeFormatOptions};
pub use object::{
    Object, ObjectBase, ObjectError, ObjectId, ObjectRegistry, ObjectResult,
    SharedObjectRegistry, global_registry, init_global_registry,
};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
