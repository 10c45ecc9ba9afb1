//! Global pointer capture
//!
//! While a drag is in progress the controller must hear move and release
//! events from anywhere, not just over the track. Listeners are held by a
//! `CaptureGuard`; dropping the guard unsubscribes them, so every exit path
//! (release, cancel, teardown) cleans up the same way.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::trace;

/// Kind of global pointer event a listener receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    PointerMove,
    PointerUp,
}

/// Handle for one registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Host-provided registry of global (document-level) input listeners.
pub trait GlobalInput {
    fn subscribe(&self, kind: ListenerKind) -> ListenerId;
    fn unsubscribe(&self, id: ListenerId);
}

/// Scoped subscription to global move and release events.
pub struct CaptureGuard {
    input: Rc<dyn GlobalInput>,
    listeners: Vec<ListenerId>,
}

impl CaptureGuard {
    pub fn acquire(input: Rc<dyn GlobalInput>) -> Self {
        let listeners = vec![
            input.subscribe(ListenerKind::PointerMove),
            input.subscribe(ListenerKind::PointerUp),
        ];
        trace!(?listeners, "pointer capture acquired");
        Self { input, listeners }
    }
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        for id in self.listeners.drain(..) {
            self.input.unsubscribe(id);
        }
        trace!("pointer capture released");
    }
}

impl std::fmt::Debug for CaptureGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureGuard")
            .field("listeners", &self.listeners)
            .finish()
    }
}

/// Listener table used by the terminal host to route mouse events.
#[derive(Debug, Default)]
pub struct InputRouter {
    next_id: Cell<u64>,
    active: RefCell<Vec<(ListenerId, ListenerKind)>>,
}

impl InputRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any listener wants events of `kind`.
    pub fn is_listening(&self, kind: ListenerKind) -> bool {
        self.active.borrow().iter().any(|(_, k)| *k == kind)
    }

    pub fn listener_count(&self) -> usize {
        self.active.borrow().len()
    }
}

impl GlobalInput for InputRouter {
    fn subscribe(&self, kind: ListenerKind) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        self.active.borrow_mut().push((id, kind));
        id
    }

    fn unsubscribe(&self, id: ListenerId) {
        self.active.borrow_mut().retain(|(active, _)| *active != id);
    }
}
