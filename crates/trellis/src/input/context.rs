//! Modal input contexts and the context stack.
//!
//! An [`InputContext`] is a modal unit of input-handling focus: the screen
//! currently in control, a menu over it, a dialog over that. Contexts live
//! in an application-owned [`ContextStore`]; the [`ContextStack`] holds
//! their ids and routes every polled button/crank notification to exactly
//! one of them: the top of the stack.
//!
//! # Lifecycle
//!
//! Pushing a context deactivates the previous top (unregisters it from
//! dispatch, fires its [`exited`](InputContext::exited) hook) and activates
//! the new one (fires [`entered`](InputContext::entered), registers it).
//! Popping reverses this; the context below the popped one is *re-entered*,
//! so `entered` fires every time a context regains control, not just on its
//! first push. The base context passed at construction is never popped.
//!
//! # Re-entrant mutation
//!
//! Handlers frequently end themselves: a dialog's cancel handler pops the
//! dialog. Handlers therefore never mutate the stack directly; they file
//! requests through [`ContextEnv`], and the stack applies the requests
//! after the dispatch loop has finished with the frame.
//!
//! ```
//! use trellis::input::{
//!     ButtonEvent, ButtonPhase, Buttons, ContextEnv, ContextStack, ContextStore,
//!     DispatchOrder, InputContext,
//! };
//!
//! struct Dialog;
//!
//! impl InputContext for Dialog {
//!     fn button_event(&mut self, event: &ButtonEvent, env: &mut ContextEnv<'_>) {
//!         if event.button == Buttons::B && event.phase == ButtonPhase::Pressed {
//!             env.pop_context(); // applied after dispatch completes
//!         }
//!     }
//! }
//! ```

use std::any::Any;

use slotmap::{SlotMap, new_key_type};

use crate::component::ComponentStore;

use super::buttons::ButtonEvent;
use super::crank::CrankEvent;
use super::dispatch::{ButtonDispatcher, CrankDispatcher};
use super::source::InputSource;

new_key_type! {
    /// A unique identifier for a context in a [`ContextStore`].
    pub struct ContextId;
}

/// A modal unit of input-handling focus.
///
/// Implement the hooks you need; every method has a default no-op body, so
/// a context that only cares about buttons implements only `button_event`.
pub trait InputContext: Any + Send + Sync {
    /// The context became the active top of the stack.
    ///
    /// Fires on every activation, including when a pop above re-exposes
    /// this context.
    fn entered(&mut self) {}

    /// The context stopped being the active top of the stack.
    fn exited(&mut self) {}

    /// A button notification for the active context.
    fn button_event(&mut self, _event: &ButtonEvent, _env: &mut ContextEnv<'_>) {}

    /// The crank rotated.
    fn crank_moved(&mut self, _event: &CrankEvent, _env: &mut ContextEnv<'_>) {}

    /// The crank was docked or undocked.
    fn crank_docked_changed(&mut self, _docked: bool, _env: &mut ContextEnv<'_>) {}
}

/// Application-owned storage for contexts.
///
/// The stack references contexts by id only; ownership stays here.
#[derive(Default)]
pub struct ContextStore {
    contexts: SlotMap<ContextId, Box<dyn InputContext>>,
}

impl ContextStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a context, returning its id.
    pub fn add(&mut self, context: impl InputContext) -> ContextId {
        self.contexts.insert(Box::new(context))
    }

    /// Add an already-boxed context.
    pub fn add_boxed(&mut self, context: Box<dyn InputContext>) -> ContextId {
        self.contexts.insert(context)
    }

    /// Check whether an id refers to a live context.
    pub fn contains(&self, id: ContextId) -> bool {
        self.contexts.contains_key(id)
    }

    /// Borrow a context.
    pub fn get(&self, id: ContextId) -> Option<&dyn InputContext> {
        self.contexts.get(id).map(|c| c.as_ref())
    }

    /// Mutably borrow a context.
    pub fn get_mut(&mut self, id: ContextId) -> Option<&mut dyn InputContext> {
        self.contexts.get_mut(id).map(|c| c.as_mut())
    }

    /// Borrow a context downcast to its concrete type.
    pub fn get_as<T: InputContext>(&self, id: ContextId) -> Option<&T> {
        let context: &dyn Any = self.get(id)?;
        context.downcast_ref::<T>()
    }

    /// Mutably borrow a context downcast to its concrete type.
    pub fn get_as_mut<T: InputContext>(&mut self, id: ContextId) -> Option<&mut T> {
        let context: &mut dyn Any = self.get_mut(id)?;
        context.downcast_mut::<T>()
    }

    /// Remove a context, returning it.
    ///
    /// Removing a context that is still on a stack leaves a dangling id
    /// there; the stack skips dead ids during dispatch.
    pub fn remove(&mut self, id: ContextId) -> Option<Box<dyn InputContext>> {
        self.contexts.remove(id)
    }

    /// Number of stored contexts.
    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    /// Check whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }
}

/// A stack-mutation request filed by a handler during dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextRequest {
    /// Push a context on top of the stack.
    Push(ContextId),
    /// Pop the top context (no-op on the base).
    Pop,
    /// Pop everything above the base context.
    ResetToBase,
}

/// Deferred stack-mutation queue.
///
/// Collected while a frame's notifications are dispatched, applied by the
/// stack afterwards, in filing order.
#[derive(Debug, Default)]
pub struct ContextActions {
    requests: Vec<ContextRequest>,
}

impl ContextActions {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a push.
    pub fn push_context(&mut self, id: ContextId) {
        self.requests.push(ContextRequest::Push(id));
    }

    /// Request a pop.
    pub fn pop_context(&mut self) {
        self.requests.push(ContextRequest::Pop);
    }

    /// Request a reset to the base context.
    pub fn reset_to_base(&mut self) {
        self.requests.push(ContextRequest::ResetToBase);
    }

    /// Drain the queued requests in filing order.
    pub fn into_requests(self) -> Vec<ContextRequest> {
        self.requests
    }

    /// Number of queued requests.
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Check whether any requests are queued.
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

/// What a handler can reach while processing a notification.
///
/// Component mutation goes through [`components`](Self::components); stack
/// mutation is deferred through the request methods.
pub struct ContextEnv<'a> {
    components: &'a mut ComponentStore,
    actions: &'a mut ContextActions,
}

impl<'a> ContextEnv<'a> {
    /// Build an environment over the frame's component store and queue.
    pub fn new(components: &'a mut ComponentStore, actions: &'a mut ContextActions) -> Self {
        Self {
            components,
            actions,
        }
    }

    /// The application's component store.
    pub fn components(&mut self) -> &mut ComponentStore {
        self.components
    }

    /// Request that a context be pushed after dispatch completes.
    pub fn push_context(&mut self, id: ContextId) {
        self.actions.push_context(id);
    }

    /// Request that the top context be popped after dispatch completes.
    pub fn pop_context(&mut self) {
        self.actions.pop_context();
    }

    /// Request a reset to the base context after dispatch completes.
    pub fn reset_to_base(&mut self) {
        self.actions.reset_to_base();
    }
}

/// Relative order of crank and button notifications within one frame.
///
/// Fixed at stack construction. Only affects the ordering of the two
/// notification groups; never correctness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchOrder {
    /// Dispatch button events, then crank events.
    #[default]
    ButtonsFirst,
    /// Dispatch crank events, then button events.
    CrankFirst,
}

/// The LIFO stack of modal input contexts.
///
/// Exactly one context (the top) is registered with the button and crank
/// dispatchers at any time. See the [module docs](self) for lifecycle
/// rules.
pub struct ContextStack {
    stack: Vec<ContextId>,
    order: DispatchOrder,
    button_dispatch: ButtonDispatcher,
    crank_dispatch: CrankDispatcher,
    last_docked: Option<bool>,
}

impl ContextStack {
    /// Create a stack with `base` as its permanent bottom context.
    ///
    /// The base is activated immediately: its `entered` hook fires and it
    /// is registered for dispatch.
    ///
    /// # Panics
    ///
    /// Panics if `base` is not in the store.
    pub fn new(store: &mut ContextStore, base: ContextId, order: DispatchOrder) -> Self {
        assert!(
            store.contains(base),
            "base context must exist in the store"
        );
        let mut stack = Self {
            stack: vec![base],
            order,
            button_dispatch: ButtonDispatcher::new(),
            crank_dispatch: CrankDispatcher::new(),
            last_docked: None,
        };
        stack.activate(store, base);
        tracing::debug!(target: "trellis::input", ?base, "context stack created");
        stack
    }

    /// The active (top) context.
    pub fn active(&self) -> ContextId {
        // The stack is never empty after construction.
        self.stack[self.stack.len() - 1]
    }

    /// Number of contexts on the stack (≥ 1).
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// The configured dispatch order.
    pub fn dispatch_order(&self) -> DispatchOrder {
        self.order
    }

    /// The button dispatcher (its listener list is the active context).
    pub fn button_dispatcher(&self) -> &ButtonDispatcher {
        &self.button_dispatch
    }

    /// The crank dispatcher (its listener list is the active context).
    pub fn crank_dispatcher(&self) -> &CrankDispatcher {
        &self.crank_dispatch
    }

    /// Push a context, making it the active top.
    ///
    /// The previous top is deactivated first: unregistered from dispatch,
    /// `exited` fired. Pushing an id that is unknown to the store, or that
    /// is already the active top, is a caller error and is ignored.
    pub fn push(&mut self, store: &mut ContextStore, id: ContextId) {
        if !store.contains(id) {
            tracing::warn!(target: "trellis::input", ?id, "push of unknown context ignored");
            return;
        }
        if self.active() == id {
            tracing::warn!(target: "trellis::input", ?id, "context is already active, push ignored");
            return;
        }

        let top = self.active();
        self.deactivate(store, top);
        self.stack.push(id);
        self.activate(store, id);
        tracing::debug!(target: "trellis::input", ?id, depth = self.stack.len(), "pushed input context");
    }

    /// Pop the active context, returning control to the one below it.
    ///
    /// Popping with only the base on the stack is a no-op: the base is
    /// un-poppable. The newly exposed context is re-activated (`entered`
    /// fires again).
    pub fn pop(&mut self, store: &mut ContextStore) {
        if self.stack.len() <= 1 {
            tracing::trace!(target: "trellis::input", "pop on base context ignored");
            return;
        }

        if let Some(top) = self.stack.pop() {
            self.deactivate(store, top);
            tracing::debug!(target: "trellis::input", popped = ?top, depth = self.stack.len(), "popped input context");
        }
        let top = self.active();
        self.activate(store, top);
    }

    /// Pop everything above the base context.
    ///
    /// The active top is deactivated normally; contexts between it and the
    /// base were already inactive and leave the stack without further
    /// hooks. The base is then re-activated.
    pub fn reset_to_base(&mut self, store: &mut ContextStore) {
        if self.stack.len() <= 1 {
            return;
        }

        if let Some(top) = self.stack.pop() {
            self.deactivate(store, top);
        }
        self.stack.truncate(1);
        let base = self.active();
        self.activate(store, base);
        tracing::debug!(target: "trellis::input", ?base, "reset to base context");
    }

    /// Poll input once and dispatch this frame's notifications.
    ///
    /// Buttons and crank are each polled exactly once. Notifications go to
    /// the active context only, in the configured [`DispatchOrder`]. Stack
    /// mutations requested by handlers are applied after dispatch, in
    /// filing order.
    pub fn update(
        &mut self,
        store: &mut ContextStore,
        components: &mut ComponentStore,
        input: &mut dyn InputSource,
    ) {
        let buttons = input.buttons();
        let crank = input.crank();

        // The first poll establishes the docked baseline without an event.
        let docked_changed = match self.last_docked {
            Some(previous) if previous != crank.docked => Some(crank.docked),
            _ => None,
        };
        self.last_docked = Some(crank.docked);

        let mut actions = ContextActions::new();
        match self.order {
            DispatchOrder::ButtonsFirst => {
                self.button_dispatch
                    .dispatch(store, components, &mut actions, &buttons);
                self.crank_dispatch
                    .dispatch(store, components, &mut actions, &crank, docked_changed);
            }
            DispatchOrder::CrankFirst => {
                self.crank_dispatch
                    .dispatch(store, components, &mut actions, &crank, docked_changed);
                self.button_dispatch
                    .dispatch(store, components, &mut actions, &buttons);
            }
        }

        self.apply(store, actions);
    }

    /// Apply deferred stack mutations collected during dispatch.
    fn apply(&mut self, store: &mut ContextStore, actions: ContextActions) {
        for request in actions.into_requests() {
            match request {
                ContextRequest::Push(id) => self.push(store, id),
                ContextRequest::Pop => self.pop(store),
                ContextRequest::ResetToBase => self.reset_to_base(store),
            }
        }
    }

    fn activate(&mut self, store: &mut ContextStore, id: ContextId) {
        if let Some(context) = store.get_mut(id) {
            context.entered();
        }
        self.button_dispatch.register(id);
        self.crank_dispatch.register(id);
    }

    fn deactivate(&mut self, store: &mut ContextStore, id: ContextId) {
        self.button_dispatch.unregister(id);
        self.crank_dispatch.unregister(id);
        if let Some(context) = store.get_mut(id) {
            context.exited();
        }
    }
}
