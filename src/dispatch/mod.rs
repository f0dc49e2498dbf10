//! Event dispatcher for bridged key events.
//!
//! The dispatcher translates a bridged event into an action invocation:
//! look up the registration table, invoke the bound action, done. Lookup
//! misses are silently ignored; an event for an unbound combination is a
//! normal occurrence, not a fault. No retries, fire-and-forget.
//!
//! # Architecture
//!
//! ```text
//! EventQueue receiver → DispatchWorker → Dispatcher::dispatch() → action
//! ```

use std::sync::mpsc::Receiver;
use std::thread::{self, JoinHandle};

use log::trace;

use crate::events::types::{ContextToken, KeyEvent};
use crate::model::KeyCombination;
use crate::registry::ShortcutRegistry;

/// Looks up and invokes registered actions.
#[derive(Clone)]
pub struct Dispatcher {
    registry: ShortcutRegistry,
}

impl Dispatcher {
    /// Create a dispatcher reading from the given registry.
    pub fn new(registry: ShortcutRegistry) -> Self {
        Self { registry }
    }

    /// Dispatch one combination: invoke the bound action synchronously,
    /// exactly once. Returns whether an action ran.
    ///
    /// The action handle is cloned out of the table before invocation, so
    /// no lock is held while the action runs and the action may itself
    /// register or unregister shortcuts.
    pub fn dispatch(&self, combo: &KeyCombination, context: ContextToken) -> bool {
        let Some(action) = self.registry.action_for(combo) else {
            trace!("no binding for {} (context {:#x})", combo, context.as_raw());
            return false;
        };
        trace!("dispatching {} (context {:#x})", combo, context.as_raw());
        action();
        true
    }
}

/// Dedicated thread draining the event queue into a [`Dispatcher`].
///
/// The OS event-delivery thread must never run user actions, so the hook
/// callback publishes to the queue and this worker does the invoking. The
/// worker exits once every sender for its queue is gone, which the bridge
/// arranges on teardown.
pub struct DispatchWorker {
    handle: JoinHandle<()>,
}

impl DispatchWorker {
    /// Spawn the worker.
    ///
    /// # Panics
    ///
    /// Panics if the OS refuses to spawn a thread.
    pub fn spawn(receiver: Receiver<KeyEvent>, dispatcher: Dispatcher) -> Self {
        let handle = thread::Builder::new()
            .name("keybridge-dispatch".into())
            .spawn(move || {
                while let Ok(event) = receiver.recv() {
                    dispatcher.dispatch(&event.combo, event.context);
                }
                trace!("dispatch worker exiting");
            })
            .expect("failed to spawn dispatch worker");
        Self { handle }
    }

    /// Wait for the worker to exit. Only returns once all queue senders
    /// are dropped.
    pub fn join(self) {
        let _ = self.handle.join();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::queue::EventQueue;
    use crate::model::{keycodes, Modifiers};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn combo() -> KeyCombination {
        KeyCombination::new(keycodes::KC_X, Modifiers::CONTROL)
    }

    #[test]
    fn test_dispatch_invokes_bound_action() {
        let registry = ShortcutRegistry::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        registry
            .register(combo(), move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .expect("register");

        let dispatcher = Dispatcher::new(registry);
        assert!(dispatcher.dispatch(&combo(), ContextToken::from_raw(1)));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_dispatch_miss_is_a_no_op() {
        let dispatcher = Dispatcher::new(ShortcutRegistry::new());
        assert!(!dispatcher.dispatch(&combo(), ContextToken::from_raw(1)));
    }

    #[test]
    fn test_action_may_reenter_registry() {
        let registry = ShortcutRegistry::new();
        let inner = registry.clone();
        let id = registry
            .register(combo(), move || {
                // Must not deadlock against the dispatch read.
                inner.unregister_combo(&combo());
            })
            .expect("register");
        let _ = id;

        let dispatcher = Dispatcher::new(registry.clone());
        assert!(dispatcher.dispatch(&combo(), ContextToken::from_raw(1)));
        assert!(!registry.is_registered(&combo()));
    }

    #[test]
    fn test_worker_drains_queue_and_exits() {
        let registry = ShortcutRegistry::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        registry
            .register(combo(), move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .expect("register");

        let queue = EventQueue::new();
        let sender = queue.sender();
        let worker = DispatchWorker::spawn(queue.into_receiver(), Dispatcher::new(registry));

        for _ in 0..3 {
            sender.publish(KeyEvent {
                combo: combo(),
                context: ContextToken::from_raw(2),
            });
        }
        drop(sender);
        worker.join();

        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }
}
