//! Shortcut registration table.
//!
//! Maps a [`KeyCombination`] to a registered action. Registration and
//! unregistration may happen from any thread (typically the UI thread)
//! while the hook callback and the dispatch worker read concurrently, so
//! the table lives behind an `RwLock`: one writer, many readers.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use log::debug;

use crate::error::Error;
use crate::model::KeyCombination;

/// An action bound to a key combination.
///
/// Owned exclusively by the table and removed on unregistration. Invoked
/// on the dispatch worker thread, never on the OS event-delivery thread,
/// so it may take its time (within reason).
pub type Action = Arc<dyn Fn() + Send + Sync + 'static>;

/// Opaque handle returned by [`ShortcutRegistry::register`], used to
/// unregister the binding later. Ids are unique for the lifetime of a
/// table and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegistrationId(u64);

struct Binding {
    id: RegistrationId,
    action: Action,
}

#[derive(Default)]
struct Table {
    bindings: HashMap<KeyCombination, Binding>,
    next_id: u64,
}

impl Table {
    fn alloc_id(&mut self) -> RegistrationId {
        self.next_id += 1;
        RegistrationId(self.next_id)
    }
}

/// The combo → action table.
///
/// The handle is cheap to clone; clones share one table. One clone goes
/// into the bridge (for the hook callback and the dispatcher), the caller
/// keeps another for registration changes.
#[derive(Clone, Default)]
pub struct ShortcutRegistry {
    table: Arc<RwLock<Table>>,
}

impl ShortcutRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `action` to `combo`.
    ///
    /// Fails with [`Error::DuplicateCombo`] if the combination is already
    /// bound; the prior binding is left intact. Use
    /// [`register_override`](Self::register_override) to replace it
    /// explicitly.
    pub fn register(
        &self,
        combo: KeyCombination,
        action: impl Fn() + Send + Sync + 'static,
    ) -> Result<RegistrationId, Error> {
        let mut table = self.write();
        if table.bindings.contains_key(&combo) {
            return Err(Error::DuplicateCombo(combo));
        }
        let id = table.alloc_id();
        table.bindings.insert(
            combo,
            Binding {
                id,
                action: Arc::new(action),
            },
        );
        debug!("registered {} as {:?}", combo, id);
        Ok(id)
    }

    /// Bind `action` to `combo`, replacing any existing binding.
    pub fn register_override(
        &self,
        combo: KeyCombination,
        action: impl Fn() + Send + Sync + 'static,
    ) -> RegistrationId {
        let mut table = self.write();
        let id = table.alloc_id();
        let previous = table.bindings.insert(
            combo,
            Binding {
                id,
                action: Arc::new(action),
            },
        );
        match previous {
            Some(old) => debug!("rebound {} as {:?} (was {:?})", combo, id, old.id),
            None => debug!("registered {} as {:?}", combo, id),
        }
        id
    }

    /// Remove the binding with the given id. No-op if absent.
    pub fn unregister(&self, id: RegistrationId) {
        let mut table = self.write();
        let before = table.bindings.len();
        table.bindings.retain(|_, binding| binding.id != id);
        if table.bindings.len() != before {
            debug!("unregistered {:?}", id);
        }
    }

    /// Remove the binding for the given combination, if any.
    /// Returns whether a binding was removed.
    pub fn unregister_combo(&self, combo: &KeyCombination) -> bool {
        let removed = self.write().bindings.remove(combo).is_some();
        if removed {
            debug!("unregistered {}", combo);
        }
        removed
    }

    /// Remove every binding.
    pub fn unregister_all(&self) {
        let mut table = self.write();
        let count = table.bindings.len();
        table.bindings.clear();
        if count > 0 {
            debug!("unregistered all {} bindings", count);
        }
    }

    /// True if the combination is currently bound.
    ///
    /// The hook callback uses this to decide whether to consume a raw
    /// event or pass it through to the system.
    pub fn is_registered(&self, combo: &KeyCombination) -> bool {
        self.read().bindings.contains_key(combo)
    }

    /// Number of live bindings.
    pub fn len(&self) -> usize {
        self.read().bindings.len()
    }

    /// True if no binding is live.
    pub fn is_empty(&self) -> bool {
        self.read().bindings.is_empty()
    }

    /// Snapshot the action bound to a combination.
    ///
    /// Cloning the `Arc` out lets the dispatcher invoke the action with no
    /// lock held, so actions may re-enter the registry.
    pub(crate) fn action_for(&self, combo: &KeyCombination) -> Option<Action> {
        self.read().bindings.get(combo).map(|b| Arc::clone(&b.action))
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Table> {
        self.table.read().expect("shortcut table lock poisoned")
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Table> {
        self.table.write().expect("shortcut table lock poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{keycodes, Modifiers};

    fn combo() -> KeyCombination {
        KeyCombination::new(keycodes::KC_S, Modifiers::COMMAND | Modifiers::SHIFT)
    }

    #[test]
    fn test_register_and_lookup() {
        let registry = ShortcutRegistry::new();
        assert!(!registry.is_registered(&combo()));

        registry.register(combo(), || {}).expect("register");
        assert!(registry.is_registered(&combo()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_register_fails() {
        let registry = ShortcutRegistry::new();
        registry.register(combo(), || {}).expect("register");

        let err = registry.register(combo(), || {}).unwrap_err();
        assert_eq!(err, Error::DuplicateCombo(combo()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_override_replaces() {
        let registry = ShortcutRegistry::new();
        let first = registry.register(combo(), || {}).expect("register");
        let second = registry.register_override(combo(), || {});

        assert_ne!(first, second);
        assert_eq!(registry.len(), 1);

        // The old id no longer matches anything.
        registry.unregister(first);
        assert!(registry.is_registered(&combo()));
    }

    #[test]
    fn test_unregister_by_id() {
        let registry = ShortcutRegistry::new();
        let id = registry.register(combo(), || {}).expect("register");

        registry.unregister(id);
        assert!(!registry.is_registered(&combo()));

        // No-op on a dead id.
        registry.unregister(id);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_unregister_by_combo() {
        let registry = ShortcutRegistry::new();
        registry.register(combo(), || {}).expect("register");

        assert!(registry.unregister_combo(&combo()));
        assert!(!registry.unregister_combo(&combo()));
    }

    #[test]
    fn test_unregister_all() {
        let registry = ShortcutRegistry::new();
        registry.register(combo(), || {}).expect("register");
        registry
            .register(
                KeyCombination::new(keycodes::KC_A, Modifiers::CONTROL),
                || {},
            )
            .expect("register");

        registry.unregister_all();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let registry = ShortcutRegistry::new();
        let a = registry.register(combo(), || {}).expect("register");
        let b = registry
            .register(
                KeyCombination::new(keycodes::KC_A, Modifiers::CONTROL),
                || {},
            )
            .expect("register");
        assert_ne!(a, b);
    }

    #[test]
    fn test_clones_share_one_table() {
        let registry = ShortcutRegistry::new();
        let other = registry.clone();

        registry.register(combo(), || {}).expect("register");
        assert!(other.is_registered(&combo()));
    }
}
