//! Flat state machines for widget interaction state
//!
//! States and events are plain integer ids, usually declared as constants
//! in `states`/`events` modules next to the widget that owns the machine.
//! States may carry entry and exit hooks.
//!
//! An event with no matching transition from the current state is ignored,
//! so sending a close event to a closed machine does nothing.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

pub type StateId = u32;

pub type EventId = u32;

/// Side effect run by a state hook
pub type Action = Box<dyn FnMut()>;

/// `from --event--> to`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from_state: StateId,
    pub event: EventId,
    pub to_state: StateId,
}

impl Transition {
    pub fn new(from: StateId, event: EventId, to: StateId) -> Self {
        Self {
            from_state: from,
            event,
            to_state: to,
        }
    }
}

/// Callbacks attached to one state
#[derive(Default)]
struct StateHooks {
    enter: SmallVec<[Action; 2]>,
    exit: SmallVec<[Action; 2]>,
}

fn run_all(actions: &mut [Action]) {
    for action in actions {
        action();
    }
}

/// Builder for [`StateMachine`]
pub struct StateMachineBuilder {
    initial_state: StateId,
    transitions: Vec<Transition>,
    hooks: FxHashMap<StateId, StateHooks>,
}

impl StateMachineBuilder {
    pub fn new(initial_state: StateId) -> Self {
        Self {
            initial_state,
            transitions: Vec::new(),
            hooks: FxHashMap::default(),
        }
    }

    pub fn on(mut self, from: StateId, event: EventId, to: StateId) -> Self {
        self.transitions.push(Transition::new(from, event, to));
        self
    }

    /// Run `action` whenever `state` is entered
    pub fn on_enter<F: FnMut() + 'static>(mut self, state: StateId, action: F) -> Self {
        self.hooks.entry(state).or_default().enter.push(Box::new(action));
        self
    }

    /// Run `action` whenever `state` is left
    pub fn on_exit<F: FnMut() + 'static>(mut self, state: StateId, action: F) -> Self {
        self.hooks.entry(state).or_default().exit.push(Box::new(action));
        self
    }

    pub fn build(self) -> StateMachine {
        StateMachine {
            current: self.initial_state,
            transitions: self.transitions,
            hooks: self.hooks,
            history: Vec::new(),
        }
    }
}

/// A running state machine
///
/// Order of one transition: exit hooks of the old state, state change,
/// entry hooks of the new state.
pub struct StateMachine {
    current: StateId,
    transitions: Vec<Transition>,
    hooks: FxHashMap<StateId, StateHooks>,
    history: Vec<Transition>,
}

impl StateMachine {
    pub fn builder(initial_state: StateId) -> StateMachineBuilder {
        StateMachineBuilder::new(initial_state)
    }

    pub fn current_state(&self) -> StateId {
        self.current
    }

    pub fn is_in(&self, state: StateId) -> bool {
        self.current == state
    }

    /// Every transition taken, oldest first
    pub fn history(&self) -> &[Transition] {
        &self.history
    }

    /// Process `event`; returns the state afterwards
    pub fn send(&mut self, event: EventId) -> StateId {
        let from = self.current;
        let Some(transition) = self
            .transitions
            .iter()
            .find(|transition| transition.from_state == from && transition.event == event)
            .copied()
        else {
            tracing::trace!(state = from, event, "event ignored");
            return from;
        };
        let to = transition.to_state;

        if let Some(hooks) = self.hooks.get_mut(&from) {
            run_all(&mut hooks.exit);
        }

        self.current = to;
        self.history.push(transition);
        tracing::trace!(from, event, to, "transition");

        if let Some(hooks) = self.hooks.get_mut(&to) {
            run_all(&mut hooks.enter);
        }
        to
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    const CLOSED: StateId = 0;
    const OPEN: StateId = 1;

    const TOGGLE: EventId = 1;
    const DISMISS: EventId = 2;

    fn menu() -> StateMachine {
        StateMachine::builder(CLOSED)
            .on(CLOSED, TOGGLE, OPEN)
            .on(OPEN, TOGGLE, CLOSED)
            .on(OPEN, DISMISS, CLOSED)
            .build()
    }

    #[test]
    fn test_toggle_round_trip() {
        let mut fsm = menu();
        assert_eq!(fsm.current_state(), CLOSED);

        assert_eq!(fsm.send(TOGGLE), OPEN);
        assert!(fsm.is_in(OPEN));

        assert_eq!(fsm.send(TOGGLE), CLOSED);
        assert!(fsm.is_in(CLOSED));
    }

    #[test]
    fn test_unmatched_event_is_noop() {
        let mut fsm = menu();

        // DISMISS has no transition out of CLOSED
        assert_eq!(fsm.send(DISMISS), CLOSED);
        assert_eq!(fsm.send(DISMISS), CLOSED);
        assert!(fsm.history().is_empty());
    }

    #[test]
    fn test_entry_exit_callbacks() {
        let opened = Rc::new(Cell::new(0));
        let closed = Rc::new(Cell::new(0));
        let opened_clone = opened.clone();
        let closed_clone = closed.clone();

        let mut fsm = StateMachine::builder(CLOSED)
            .on(CLOSED, TOGGLE, OPEN)
            .on(OPEN, DISMISS, CLOSED)
            .on_enter(OPEN, move || opened_clone.set(opened_clone.get() + 1))
            .on_exit(OPEN, move || closed_clone.set(closed_clone.get() + 1))
            .build();

        fsm.send(TOGGLE);
        assert_eq!((opened.get(), closed.get()), (1, 0));

        fsm.send(DISMISS);
        fsm.send(DISMISS);
        assert_eq!((opened.get(), closed.get()), (1, 1));
    }

    #[test]
    fn test_exit_runs_before_entry() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let log = |label: &'static str| {
            let order = order.clone();
            move || order.borrow_mut().push(label)
        };

        let mut fsm = StateMachine::builder(CLOSED)
            .on(CLOSED, TOGGLE, OPEN)
            .on_enter(OPEN, log("enter open"))
            .on_exit(CLOSED, log("exit closed"))
            .build();

        fsm.send(TOGGLE);
        assert_eq!(*order.borrow(), ["exit closed", "enter open"]);
    }

    #[test]
    fn test_history_skips_ignored_events() {
        let mut fsm = menu();
        fsm.send(TOGGLE);
        fsm.send(DISMISS);
        fsm.send(DISMISS);

        assert_eq!(
            fsm.history(),
            &[
                Transition::new(CLOSED, TOGGLE, OPEN),
                Transition::new(OPEN, DISMISS, CLOSED)
            ]
        );
    }
}
