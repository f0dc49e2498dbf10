//! Shortcut domain model.
//!
//! This module contains pure business logic (no FFI dependencies):
//! the key combination value type, the modifier set and the canonical
//! key code constants used by the platform backends.

pub mod combo;
pub mod keycodes;

pub use combo::{KeyCombination, Modifiers};
