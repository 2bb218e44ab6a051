//! Poll-and-notify dispatch primitives.
//!
//! [`ButtonDispatcher`] and [`CrankDispatcher`] are the leaf layer of the
//! input system: each keeps a listener list of context ids and forwards a
//! frame's snapshot to every listener. The
//! [`ContextStack`](super::ContextStack) keeps the lists at exactly one
//! entry, the active context, but the dispatchers themselves don't care.
//!
//! Dispatch iterates over a copy of the listener list, so a handler that
//! registers or unregisters listeners mid-dispatch can neither skip nor
//! double-deliver a notification.

use crate::component::ComponentStore;

use super::buttons::ButtonSnapshot;
use super::context::{ContextActions, ContextEnv, ContextId, ContextStore};
use super::crank::{CrankEvent, CrankSnapshot};

/// Listener list for button notifications.
#[derive(Debug, Default)]
pub struct ButtonDispatcher {
    listeners: Vec<ContextId>,
}

impl ButtonDispatcher {
    /// Create a dispatcher with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. Duplicate registrations are ignored.
    pub fn register(&mut self, id: ContextId) {
        if !self.listeners.contains(&id) {
            self.listeners.push(id);
        }
    }

    /// Unregister a listener.
    pub fn unregister(&mut self, id: ContextId) {
        self.listeners.retain(|&listener| listener != id);
    }

    /// The registered listeners, in registration order.
    pub fn listeners(&self) -> &[ContextId] {
        &self.listeners
    }

    /// Expand `snapshot` into events and deliver them to every listener.
    pub fn dispatch(
        &self,
        contexts: &mut ContextStore,
        components: &mut ComponentStore,
        actions: &mut ContextActions,
        snapshot: &ButtonSnapshot,
    ) {
        let events = snapshot.events();
        if events.is_empty() {
            return;
        }

        // Stable copy: listeners may mutate during delivery.
        for id in self.listeners.to_vec() {
            let Some(context) = contexts.get_mut(id) else {
                tracing::trace!(target: "trellis::input", ?id, "skipping dead button listener");
                continue;
            };
            let mut env = ContextEnv::new(components, actions);
            for event in &events {
                context.button_event(event, &mut env);
            }
        }
    }
}

/// Listener list for crank notifications.
#[derive(Debug, Default)]
pub struct CrankDispatcher {
    listeners: Vec<ContextId>,
}

impl CrankDispatcher {
    /// Create a dispatcher with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. Duplicate registrations are ignored.
    pub fn register(&mut self, id: ContextId) {
        if !self.listeners.contains(&id) {
            self.listeners.push(id);
        }
    }

    /// Unregister a listener.
    pub fn unregister(&mut self, id: ContextId) {
        self.listeners.retain(|&listener| listener != id);
    }

    /// The registered listeners, in registration order.
    pub fn listeners(&self) -> &[ContextId] {
        &self.listeners
    }

    /// Deliver this frame's crank activity to every listener.
    ///
    /// A dock-state edge (if any) is delivered before rotation, so a
    /// handler seeing motion already knows the crank is out.
    pub fn dispatch(
        &self,
        contexts: &mut ContextStore,
        components: &mut ComponentStore,
        actions: &mut ContextActions,
        snapshot: &CrankSnapshot,
        docked_changed: Option<bool>,
    ) {
        if docked_changed.is_none() && !snapshot.moved() {
            return;
        }

        for id in self.listeners.to_vec() {
            let Some(context) = contexts.get_mut(id) else {
                tracing::trace!(target: "trellis::input", ?id, "skipping dead crank listener");
                continue;
            };
            let mut env = ContextEnv::new(components, actions);
            if let Some(docked) = docked_changed {
                context.crank_docked_changed(docked, &mut env);
            }
            if snapshot.moved() {
                let event = CrankEvent {
                    angle: snapshot.angle,
                    change: snapshot.change,
                };
                context.crank_moved(&event, &mut env);
            }
        }
    }
}
