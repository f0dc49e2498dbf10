//! Normalized key events flowing from the bridge to the dispatcher.
//!
//! This module is pure Rust with no FFI dependencies, making it fully
//! testable on platforms without a hook backend.

use crate::model::KeyCombination;

/// Opaque pointer-sized token identifying the bridge instance that raised
/// an event.
///
/// Minted when a bridge is installed (from the address of its shared
/// state) and dead once the bridge is torn down. The core logic never
/// dereferences it, it is only forwarded alongside events so a consumer
/// can tell which bridge produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContextToken(usize);

impl ContextToken {
    /// Wrap a raw token value. Normally only the bridge mints tokens;
    /// this is public so dispatch can be driven directly in tests.
    pub const fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    /// The raw token value, for logging and comparison only.
    pub const fn as_raw(self) -> usize {
        self.0
    }
}

/// A bridged keyboard event: the normalized combination plus the token of
/// the bridge that observed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub combo: KeyCombination,
    pub context: ContextToken,
}
