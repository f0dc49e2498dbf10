//! Thread-safe event queue using mpsc channels.
//!
//! The queue provides the handoff point between the OS event-delivery
//! thread and the dispatch worker:
//! - Any thread can publish events via `EventSender::publish()`
//! - The consumer either polls via `EventQueue::drain()` or takes the
//!   receiver with `EventQueue::into_receiver()` for a blocking loop
//!
//! This is pure Rust with no external dependencies beyond std.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use super::types::KeyEvent;

/// Multi-producer, single-consumer queue of bridged key events.
///
/// Multiple publishers can send events concurrently; a single consumer
/// (the dispatch worker, or a test) receives and processes them.
///
/// # Example
///
/// ```
/// use keybridge::events::EventQueue;
/// use keybridge::{ContextToken, KeyCombination, KeyEvent, Modifiers};
/// use keybridge::model::keycodes;
///
/// let queue = EventQueue::new();
/// let sender = queue.sender();
///
/// sender.publish(KeyEvent {
///     combo: KeyCombination::new(keycodes::KC_A, Modifiers::CONTROL),
///     context: ContextToken::from_raw(0),
/// });
///
/// assert_eq!(queue.drain().len(), 1);
/// ```
pub struct EventQueue {
    sender: Sender<KeyEvent>,
    receiver: Receiver<KeyEvent>,
}

impl EventQueue {
    /// Create a new event queue.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self { sender, receiver }
    }

    /// Get a sender handle that can be cloned and moved to other threads.
    ///
    /// Senders are cheap to clone and thread-safe. Each hook callback
    /// holds its own sender through the bridge's shared state.
    pub fn sender(&self) -> EventSender {
        EventSender {
            sender: self.sender.clone(),
        }
    }

    /// Try to receive the next event without blocking.
    ///
    /// Returns `Some(event)` if one is available, `None` otherwise.
    pub fn try_recv(&self) -> Option<KeyEvent> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Drain all pending events into a Vec.
    pub fn drain(&self) -> Vec<KeyEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.try_recv() {
            events.push(event);
        }
        events
    }

    /// Take the receiving end for a blocking consumer loop.
    ///
    /// The queue's own sender is dropped here, so the receiver disconnects
    /// as soon as every `EventSender` obtained earlier is gone. That is
    /// what lets the dispatch worker exit on bridge teardown.
    pub fn into_receiver(self) -> Receiver<KeyEvent> {
        self.receiver
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// A cloneable, thread-safe event sender.
#[derive(Clone)]
pub struct EventSender {
    sender: Sender<KeyEvent>,
}

impl EventSender {
    /// Publish an event to the queue.
    ///
    /// Non-blocking and thread-safe. If the receiver has been dropped
    /// (bridge shutting down), the send silently fails; that is
    /// intentional.
    pub fn publish(&self, event: KeyEvent) {
        let _ = self.sender.send(event);
    }
}
