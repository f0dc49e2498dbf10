//! Bridged key events and the queue that carries them.
//!
//! The OS delivers keyboard events on its own event-delivery thread. The
//! hook callback must return immediately, so it only normalizes the event
//! and publishes it here; the dispatch worker drains the queue and runs
//! the registered actions.
//!
//! ```text
//! ┌──────────────────┐     ┌──────────────────┐
//! │  hook callback   │     │  hook callback   │
//! │    (carbon)      │     │    (win32)       │
//! └────────┬─────────┘     └────────┬─────────┘
//!          │ publish()              │ publish()
//!          ▼                        ▼
//! ┌─────────────────────────────────────────────┐
//! │                 EventQueue                  │
//! │               (mpsc channel)                │
//! └─────────────────────┬───────────────────────┘
//!                       │ recv()
//!                       ▼
//! ┌─────────────────────────────────────────────┐
//! │               DispatchWorker                │
//! │      Dispatcher::dispatch() per event       │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Module Structure
//!
//! - [`types`]: [`KeyEvent`] and [`ContextToken`]
//! - [`queue`]: [`EventQueue`] and [`EventSender`]

pub mod queue;
pub mod types;

// Re-export main types for convenient access
pub use queue::{EventQueue, EventSender};
pub use types::{ContextToken, KeyEvent};
