//! Signal/slot system for trellis.
//!
//! This module provides a type-safe signal/slot mechanism for inter-object
//! communication. Signals are emitted by objects when their state changes,
//! and connected slots (callbacks) are invoked in response.
//!
//! Unlike desktop frameworks with background event loops, trellis targets a
//! single-threaded, poll-driven frame loop, so every slot is invoked
//! directly in the emitting call. There is no queued delivery.
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - The main signal type for emitting notifications
//! - [`ConnectionId`] - Unique identifier returned when connecting a slot
//! - [`ConnectionGuard`] - RAII guard that disconnects when dropped
//!
//! # Example
//!
//! ```
//! use trellis_core::Signal;
//!
//! let bounds_changed = Signal::<(f32, f32)>::new();
//!
//! let conn_id = bounds_changed.connect(|&(w, h)| {
//!     println!("resized to {w}x{h}");
//! });
//!
//! bounds_changed.emit((400.0, 240.0));
//! bounds_changed.disconnect(conn_id);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via
    /// [`Signal::disconnect`]. The ID remains valid until the connection is
    /// explicitly disconnected or the signal is dropped.
    pub struct ConnectionId;
}

/// Internal storage for a single connection.
struct Connection<Args> {
    /// The slot function to invoke (Arc-wrapped so emission can run without
    /// holding the connection lock).
    slot: Arc<dyn Fn(&Args) + Send + Sync>,
}

/// A type-safe signal that can have multiple connected slots.
///
/// When a signal is emitted, all connected slots are invoked with a
/// reference to the provided arguments, in no guaranteed order.
///
/// # Type Parameter
///
/// - `Args`: The argument type passed to connected slots. Use `()` for
///   signals with no arguments, or a tuple for multiple arguments.
///
/// # Re-entrancy
///
/// Slots may connect or disconnect other slots on the same signal while an
/// emission is in flight: `emit` iterates over a snapshot of the connection
/// list taken at the start of the call, so in-flight emission neither skips
/// nor double-invokes anything.
pub struct Signal<Args> {
    /// All active connections.
    connections: Mutex<SlotMap<ConnectionId, Connection<Args>>>,
    /// Whether signal emission is temporarily blocked.
    blocked: AtomicBool,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a `ConnectionId` that can be used to disconnect the slot
    /// later.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let connection = Connection {
            slot: Arc::new(slot),
        };
        self.connections.lock().insert(connection)
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Block signal emission temporarily.
    ///
    /// While blocked, calls to `emit()` do nothing. Useful during
    /// initialization or batch updates to prevent cascading notifications.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Check if signal emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking all connected slots.
    ///
    /// If the signal is blocked, this does nothing.
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: "trellis_core::signal", "signal blocked, skipping emit");
            return;
        }

        // Snapshot the slots so handlers can connect/disconnect during
        // emission without deadlocking or invalidating the iteration.
        let slots: Vec<Arc<dyn Fn(&Args) + Send + Sync>> = {
            let connections = self.connections.lock();
            connections.values().map(|c| Arc::clone(&c.slot)).collect()
        };

        tracing::trace!(target: "trellis_core::signal", connection_count = slots.len(), "emitting signal");
        for slot in slots {
            slot(&args);
        }
    }
}

/// RAII guard that disconnects a signal connection when dropped.
///
/// Useful for scoping a connection to the lifetime of an observer:
///
/// ```
/// use trellis_core::{Signal, ConnectionGuard};
///
/// let signal = Signal::<i32>::new();
/// {
///     let _guard = ConnectionGuard::new(&signal, signal.connect(|_| {}));
///     assert_eq!(signal.connection_count(), 1);
/// }
/// assert_eq!(signal.connection_count(), 0);
/// ```
pub struct ConnectionGuard<'a, Args: 'static> {
    signal: &'a Signal<Args>,
    id: Option<ConnectionId>,
}

impl<'a, Args: 'static> ConnectionGuard<'a, Args> {
    /// Wrap an existing connection in a guard.
    pub fn new(signal: &'a Signal<Args>, id: ConnectionId) -> Self {
        Self {
            signal,
            id: Some(id),
        }
    }

    /// Release the connection from the guard without disconnecting it.
    pub fn release(mut self) -> ConnectionId {
        self.id.take().expect("guard already released")
    }
}

impl<Args: 'static> Drop for ConnectionGuard<'_, Args> {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.signal.disconnect(id);
        }
    }
}
