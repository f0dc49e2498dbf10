//! Global keyboard-shortcut bridge.
//!
//! One OS-level keyboard hook, a thread-safe registration table and a
//! dispatcher that invokes the action bound to a key combination:
//!
//! - [`model`]: [`KeyCombination`] / [`Modifiers`] values and key code
//!   constants. Pure Rust, no FFI, fully testable on any platform.
//! - [`registry`]: [`ShortcutRegistry`], the combo → action table.
//! - [`dispatch`]: [`Dispatcher`] lookup/invoke plus the worker thread that
//!   drains bridged events.
//! - [`events`]: the mpsc queue carrying [`KeyEvent`]s off the OS
//!   event-delivery thread.
//! - [`bridge`]: [`EventBridge`], owner of the OS hook (Carbon on macOS,
//!   `WH_KEYBOARD_LL` on Windows).
//!
//! # Example
//!
//! ```no_run
//! use keybridge::{model::keycodes, EventBridge, KeyCombination, Modifiers, ShortcutRegistry};
//!
//! # fn main() -> Result<(), keybridge::Error> {
//! let registry = ShortcutRegistry::new();
//! registry.register(
//!     KeyCombination::new(keycodes::KC_S, Modifiers::COMMAND | Modifiers::SHIFT),
//!     || println!("snapshot!"),
//! )?;
//!
//! // Installs the OS hook; released again when `bridge` is dropped.
//! let bridge = EventBridge::install(&registry)?;
//! # drop(bridge);
//! # Ok(())
//! # }
//! ```

pub mod bridge;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod model;
pub mod registry;

// Re-export the main types for convenient access
pub use bridge::EventBridge;
pub use dispatch::{DispatchWorker, Dispatcher};
pub use error::Error;
pub use events::{ContextToken, EventQueue, EventSender, KeyEvent};
pub use model::{KeyCombination, Modifiers};
pub use registry::{RegistrationId, ShortcutRegistry};
