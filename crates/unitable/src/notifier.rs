//! State-change notification.
//!
//! The grid reports to its host through two seams:
//!
//! - [`GridEvents`]: the grid's outputs. `state_change` fires in server-side
//!   mode (so the host can fetch the next page), `state_restored` fires when a
//!   snapshot with external filters is restored, and with `None` on reset.
//! - [`StateObserver`]: an optional callback that sees every state change
//!   regardless of mode.
//!
//! [`Notifier`] decides *when* to report: once at initialization, then only
//! when the tracked state differs from what was last reported.

use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::mpsc::UnboundedSender;

use crate::state::ViewState;

/// Events emitted by the grid.
#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent {
    StateChange(ViewState),
    StateRestored(Option<serde_json::Value>),
}

/// Receiver for the grid's events. Both methods default to doing nothing.
pub trait GridEvents {
    fn state_change(&mut self, _state: &ViewState) {}

    fn state_restored(&mut self, _filters: Option<&serde_json::Value>) {}
}

impl GridEvents for () {}

/// Host callback invoked on every state change.
pub trait StateObserver {
    fn on_state_change(&mut self, state: &ViewState);
}

impl<F> StateObserver for F
where
    F: FnMut(&ViewState),
{
    fn on_state_change(&mut self, state: &ViewState) {
        self(state)
    }
}

/// Records events in memory. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<GridEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<GridEvent> {
        self.events.borrow().clone()
    }

    /// Drains the log.
    pub fn take(&self) -> Vec<GridEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    fn push(&self, event: GridEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl GridEvents for EventLog {
    fn state_change(&mut self, state: &ViewState) {
        self.push(GridEvent::StateChange(state.clone()));
    }

    fn state_restored(&mut self, filters: Option<&serde_json::Value>) {
        self.push(GridEvent::StateRestored(filters.cloned()));
    }
}

/// Forwards events into a channel, e.g. to drive an async fetch loop.
impl GridEvents for UnboundedSender<GridEvent> {
    fn state_change(&mut self, state: &ViewState) {
        send(self, GridEvent::StateChange(state.clone()));
    }

    fn state_restored(&mut self, filters: Option<&serde_json::Value>) {
        send(self, GridEvent::StateRestored(filters.cloned()));
    }
}

fn send(tx: &UnboundedSender<GridEvent>, event: GridEvent) {
    if tx.unbounded_send(event).is_err() {
        log::debug!("event receiver dropped; discarding grid event");
    }
}

/// Tracks the last reported state.
#[derive(Debug, Clone, Default)]
pub struct Notifier {
    last: Option<ViewState>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `state` should be reported, and remembers it.
    ///
    /// The first call always reports.
    pub fn observe(&mut self, state: &ViewState) -> bool {
        if self.last.as_ref() == Some(state) {
            return false;
        }
        self.last = Some(state.clone());
        true
    }

    pub fn last(&self) -> Option<&ViewState> {
        self.last.as_ref()
    }
}
