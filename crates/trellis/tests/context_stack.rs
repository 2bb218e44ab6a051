//! Integration tests for the input context stack: activation invariants,
//! enter/exit pairing, and re-entrant stack mutation from handlers.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use trellis::component::ComponentStore;
use trellis::input::{
    ButtonEvent, ButtonPhase, Buttons, ContextEnv, ContextId, ContextStack, ContextStore,
    CrankEvent, DispatchOrder, InputContext, ScriptedInput,
};

fn setup() {
    trellis_core::init_global_registry();
}

/// Shared counters observed from outside the store.
#[derive(Clone, Default)]
struct Counters {
    entered: Arc<AtomicUsize>,
    exited: Arc<AtomicUsize>,
    buttons: Arc<AtomicUsize>,
    cranks: Arc<AtomicUsize>,
}

impl Counters {
    fn entered(&self) -> usize {
        self.entered.load(Ordering::SeqCst)
    }

    fn exited(&self) -> usize {
        self.exited.load(Ordering::SeqCst)
    }

    fn buttons(&self) -> usize {
        self.buttons.load(Ordering::SeqCst)
    }

    fn cranks(&self) -> usize {
        self.cranks.load(Ordering::SeqCst)
    }
}

/// A context that counts its hooks and can pop itself on B.
#[derive(Default)]
struct Probe {
    counters: Counters,
    pop_on_b: bool,
}

impl Probe {
    fn new(counters: &Counters) -> Self {
        Self {
            counters: counters.clone(),
            pop_on_b: false,
        }
    }

    fn popping_on_b(counters: &Counters) -> Self {
        Self {
            counters: counters.clone(),
            pop_on_b: true,
        }
    }
}

impl InputContext for Probe {
    fn entered(&mut self) {
        self.counters.entered.fetch_add(1, Ordering::SeqCst);
    }

    fn exited(&mut self) {
        self.counters.exited.fetch_add(1, Ordering::SeqCst);
    }

    fn button_event(&mut self, event: &ButtonEvent, env: &mut ContextEnv<'_>) {
        self.counters.buttons.fetch_add(1, Ordering::SeqCst);
        if self.pop_on_b && event.button == Buttons::B && event.phase == ButtonPhase::Pressed {
            env.pop_context();
        }
    }

    fn crank_moved(&mut self, _event: &CrankEvent, _env: &mut ContextEnv<'_>) {
        self.counters.cranks.fetch_add(1, Ordering::SeqCst);
    }
}

/// One active listener, equal to the top, on both dispatchers.
fn assert_sole_listener(stack: &ContextStack, expected: ContextId) {
    assert_eq!(stack.active(), expected);
    assert_eq!(stack.button_dispatcher().listeners(), &[expected]);
    assert_eq!(stack.crank_dispatcher().listeners(), &[expected]);
}

#[test]
fn base_is_activated_at_construction() {
    setup();

    let base_counters = Counters::default();
    let mut contexts = ContextStore::new();
    let base = contexts.add(Probe::new(&base_counters));
    let stack = ContextStack::new(&mut contexts, base, DispatchOrder::ButtonsFirst);

    assert_eq!(stack.depth(), 1);
    assert_sole_listener(&stack, base);
    assert_eq!(base_counters.entered(), 1);
    assert_eq!(base_counters.exited(), 0);
}

#[test]
fn scenario_a_push_suspends_base_and_activates_menu() {
    setup();

    let base_counters = Counters::default();
    let menu_counters = Counters::default();
    let mut contexts = ContextStore::new();
    let base = contexts.add(Probe::new(&base_counters));
    let menu = contexts.add(Probe::new(&menu_counters));
    let mut stack = ContextStack::new(&mut contexts, base, DispatchOrder::ButtonsFirst);

    stack.push(&mut contexts, menu);

    assert_eq!(stack.depth(), 2);
    assert_sole_listener(&stack, menu);
    assert_eq!(base_counters.exited(), 1);
    assert_eq!(menu_counters.entered(), 1);
}

#[test]
fn pop_reactivates_the_context_below() {
    setup();

    let base_counters = Counters::default();
    let menu_counters = Counters::default();
    let mut contexts = ContextStore::new();
    let base = contexts.add(Probe::new(&base_counters));
    let menu = contexts.add(Probe::new(&menu_counters));
    let mut stack = ContextStack::new(&mut contexts, base, DispatchOrder::ButtonsFirst);

    stack.push(&mut contexts, menu);
    stack.pop(&mut contexts);

    assert_eq!(stack.depth(), 1);
    assert_sole_listener(&stack, base);
    assert_eq!(menu_counters.exited(), 1);
    // Re-entry fires `entered` again, beyond the construction-time one.
    assert_eq!(base_counters.entered(), 2);
}

#[test]
fn pop_on_base_is_a_no_op() {
    setup();

    let base_counters = Counters::default();
    let mut contexts = ContextStore::new();
    let base = contexts.add(Probe::new(&base_counters));
    let mut stack = ContextStack::new(&mut contexts, base, DispatchOrder::ButtonsFirst);

    stack.pop(&mut contexts);

    assert_eq!(stack.depth(), 1);
    assert_sole_listener(&stack, base);
    assert_eq!(base_counters.entered(), 1);
    assert_eq!(base_counters.exited(), 0);
}

#[test]
fn double_push_of_active_top_is_ignored() {
    setup();

    let base_counters = Counters::default();
    let menu_counters = Counters::default();
    let mut contexts = ContextStore::new();
    let base = contexts.add(Probe::new(&base_counters));
    let menu = contexts.add(Probe::new(&menu_counters));
    let mut stack = ContextStack::new(&mut contexts, base, DispatchOrder::ButtonsFirst);

    stack.push(&mut contexts, menu);
    stack.push(&mut contexts, menu);

    assert_eq!(stack.depth(), 2);
    assert_sole_listener(&stack, menu);
    assert_eq!(menu_counters.entered(), 1);
    assert_eq!(base_counters.exited(), 1);
}

#[test]
fn stack_invariant_holds_across_operation_sequences() {
    setup();

    let mut contexts = ContextStore::new();
    let counters: Vec<Counters> = (0..3).map(|_| Counters::default()).collect();
    let base = contexts.add(Probe::new(&counters[0]));
    let menu = contexts.add(Probe::new(&counters[1]));
    let dialog = contexts.add(Probe::new(&counters[2]));
    let mut stack = ContextStack::new(&mut contexts, base, DispatchOrder::ButtonsFirst);

    stack.push(&mut contexts, menu);
    assert_sole_listener(&stack, menu);
    stack.push(&mut contexts, dialog);
    assert_sole_listener(&stack, dialog);
    stack.pop(&mut contexts);
    assert_sole_listener(&stack, menu);
    stack.pop(&mut contexts);
    assert_sole_listener(&stack, base);
    stack.pop(&mut contexts);
    assert_sole_listener(&stack, base);
}

#[test]
fn scenario_b_menu_pops_itself_from_its_own_button_handler() {
    setup();

    let base_counters = Counters::default();
    let menu_counters = Counters::default();
    let mut contexts = ContextStore::new();
    let base = contexts.add(Probe::new(&base_counters));
    let menu = contexts.add(Probe::popping_on_b(&menu_counters));
    let mut stack = ContextStack::new(&mut contexts, base, DispatchOrder::ButtonsFirst);
    stack.push(&mut contexts, menu);

    let mut components = ComponentStore::new();
    let mut input = ScriptedInput::new();
    input.press(Buttons::B);

    stack.update(&mut contexts, &mut components, &mut input);

    // The menu saw the press exactly once; the pop applied afterwards.
    assert_eq!(menu_counters.buttons(), 1);
    assert_eq!(menu_counters.exited(), 1);
    assert_eq!(base_counters.entered(), 2);
    assert_eq!(stack.depth(), 1);
    assert_sole_listener(&stack, base);

    // The base receives the next frame's input.
    input.press(Buttons::A);
    stack.update(&mut contexts, &mut components, &mut input);
    assert_eq!(base_counters.buttons(), 1);
    assert_eq!(menu_counters.buttons(), 1);
}

#[test]
fn handler_push_is_deferred_until_after_dispatch() {
    setup();

    struct Opener {
        child: ContextId,
        opened: Arc<AtomicUsize>,
    }

    impl InputContext for Opener {
        fn button_event(&mut self, event: &ButtonEvent, env: &mut ContextEnv<'_>) {
            if event.phase == ButtonPhase::Pressed {
                self.opened.fetch_add(1, Ordering::SeqCst);
                env.push_context(self.child);
            }
        }
    }

    let child_counters = Counters::default();
    let mut contexts = ContextStore::new();
    let child = contexts.add(Probe::new(&child_counters));
    let opened = Arc::new(AtomicUsize::new(0));
    let base = contexts.add(Opener {
        child,
        opened: Arc::clone(&opened),
    });
    let mut stack = ContextStack::new(&mut contexts, base, DispatchOrder::ButtonsFirst);

    let mut components = ComponentStore::new();
    let mut input = ScriptedInput::new();
    input.press(Buttons::A);
    stack.update(&mut contexts, &mut components, &mut input);

    assert_eq!(opened.load(Ordering::SeqCst), 1);
    assert_eq!(stack.depth(), 2);
    assert_sole_listener(&stack, child);
    assert_eq!(child_counters.entered(), 1);
    // The push happened after dispatch: the child saw none of the frame's
    // button events.
    assert_eq!(child_counters.buttons(), 0);
}

#[test]
fn reset_to_base_exits_top_and_reenters_base_once() {
    setup();

    let base_counters = Counters::default();
    let menu_counters = Counters::default();
    let dialog_counters = Counters::default();
    let mut contexts = ContextStore::new();
    let base = contexts.add(Probe::new(&base_counters));
    let menu = contexts.add(Probe::new(&menu_counters));
    let dialog = contexts.add(Probe::new(&dialog_counters));
    let mut stack = ContextStack::new(&mut contexts, base, DispatchOrder::ButtonsFirst);

    stack.push(&mut contexts, menu);
    stack.push(&mut contexts, dialog);
    stack.reset_to_base(&mut contexts);

    assert_eq!(stack.depth(), 1);
    assert_sole_listener(&stack, base);
    // The active dialog exits; the already-inactive menu exits only the
    // once from when the dialog covered it.
    assert_eq!(dialog_counters.exited(), 1);
    assert_eq!(menu_counters.exited(), 1);
    assert_eq!(menu_counters.entered(), 1);
    assert_eq!(base_counters.entered(), 2);
}

#[test]
fn crank_rotation_reaches_active_context_only() {
    setup();

    let base_counters = Counters::default();
    let menu_counters = Counters::default();
    let mut contexts = ContextStore::new();
    let base = contexts.add(Probe::new(&base_counters));
    let menu = contexts.add(Probe::new(&menu_counters));
    let mut stack = ContextStack::new(&mut contexts, base, DispatchOrder::ButtonsFirst);
    stack.push(&mut contexts, menu);

    let mut components = ComponentStore::new();
    let mut input = ScriptedInput::new();
    input.turn_crank(45.0, 15.0);
    stack.update(&mut contexts, &mut components, &mut input);

    assert_eq!(menu_counters.cranks(), 1);
    assert_eq!(base_counters.cranks(), 0);
}

#[test]
fn crank_dock_edge_fires_after_baseline() {
    setup();

    struct DockProbe {
        docked_events: Arc<Mutex<Vec<bool>>>,
    }

    impl InputContext for DockProbe {
        fn crank_docked_changed(&mut self, docked: bool, _env: &mut ContextEnv<'_>) {
            self.docked_events.lock().push(docked);
        }
    }

    let docked_events = Arc::new(Mutex::new(Vec::new()));
    let mut contexts = ContextStore::new();
    let base = contexts.add(DockProbe {
        docked_events: Arc::clone(&docked_events),
    });
    let mut stack = ContextStack::new(&mut contexts, base, DispatchOrder::ButtonsFirst);

    let mut components = ComponentStore::new();
    let mut input = ScriptedInput::new();
    input.dock_crank(true); // establishes the baseline, no event
    input.dock_crank(false); // undock: one event
    input.dock_crank(false); // unchanged: no event

    stack.update(&mut contexts, &mut components, &mut input);
    stack.update(&mut contexts, &mut components, &mut input);
    stack.update(&mut contexts, &mut components, &mut input);

    assert_eq!(*docked_events.lock(), vec![false]);
}

#[test]
fn dispatch_order_controls_group_ordering_within_a_frame() {
    setup();

    struct OrderProbe {
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    impl InputContext for OrderProbe {
        fn button_event(&mut self, _event: &ButtonEvent, _env: &mut ContextEnv<'_>) {
            self.log.lock().push("button");
        }

        fn crank_moved(&mut self, _event: &CrankEvent, _env: &mut ContextEnv<'_>) {
            self.log.lock().push("crank");
        }
    }

    for (order, expected) in [
        (DispatchOrder::ButtonsFirst, vec!["button", "crank"]),
        (DispatchOrder::CrankFirst, vec!["crank", "button"]),
    ] {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut contexts = ContextStore::new();
        let base = contexts.add(OrderProbe {
            log: Arc::clone(&log),
        });
        let mut stack = ContextStack::new(&mut contexts, base, order);

        let mut components = ComponentStore::new();
        let mut input = ScriptedInput::new();
        input.push_frame(
            trellis::input::ButtonSnapshot {
                current: Buttons::A,
                pressed: Buttons::A,
                released: Buttons::empty(),
            },
            trellis::input::CrankSnapshot {
                angle: 10.0,
                change: 10.0,
                docked: false,
            },
        );
        stack.update(&mut contexts, &mut components, &mut input);

        assert_eq!(*log.lock(), expected);
    }
}

#[test]
fn push_of_unknown_context_is_ignored() {
    setup();

    let base_counters = Counters::default();
    let mut contexts = ContextStore::new();
    let base = contexts.add(Probe::new(&base_counters));
    let stale = contexts.add(Probe::default());
    contexts.remove(stale);

    let mut stack = ContextStack::new(&mut contexts, base, DispatchOrder::ButtonsFirst);
    stack.push(&mut contexts, stale);

    assert_eq!(stack.depth(), 1);
    assert_sole_listener(&stack, base);
    assert_eq!(base_counters.exited(), 0);
}
