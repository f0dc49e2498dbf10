//! Error taxonomy for hook installation and shortcut registration.
//!
//! A dispatch lookup miss is deliberately NOT represented here: an event
//! for an unbound combination is a normal no-op, not a failure.

use thiserror::Error;

use crate::model::KeyCombination;

/// Errors surfaced by the bridge and the registration table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The OS refused to install the keyboard hook, e.g. because the
    /// process lacks input-monitoring permissions. `status` is the raw OS
    /// status code. Installation is not retried automatically.
    #[error("OS keyboard hook installation failed (status {status})")]
    HookInstall { status: i32 },

    /// The combination is already bound. The prior binding is left intact;
    /// use `register_override` to replace it.
    #[error("shortcut {0} is already registered")]
    DuplicateCombo(KeyCombination),

    /// A live `EventBridge` already owns the process-wide hook slot.
    /// There can only be one OS event handler of this type per process.
    #[error("an event bridge is already installed in this process")]
    AlreadyInstalled,

    /// No keyboard hook backend exists for the build target.
    #[error("no keyboard hook backend for this platform")]
    Unsupported,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
