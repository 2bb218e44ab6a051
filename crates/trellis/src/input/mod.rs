//! Input polling, dispatch, and the modal context stack.
//!
//! Per frame, the host calls [`ContextStack::update`] once. The stack
//! polls the injected [`InputSource`], expands the snapshots into events,
//! and delivers them to the active (top) context through the button and
//! crank dispatchers. Contexts request stack changes (including popping
//! themselves) through [`ContextEnv`]; the requests apply after the
//! dispatch loop completes.

mod buttons;
mod context;
mod crank;
mod dispatch;
mod source;

pub use buttons::{ButtonEvent, ButtonPhase, ButtonSnapshot, Buttons};
pub use context::{
    ContextActions, ContextEnv, ContextId, ContextRequest, ContextStack, ContextStore,
    DispatchOrder, InputContext,
};
pub use crank::{CrankEvent, CrankSnapshot};
pub use dispatch::{ButtonDispatcher, CrankDispatcher};
pub use source::{InputSource, ScriptedInput};
