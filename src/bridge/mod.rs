//! OS keyboard-hook bridge.
//!
//! [`EventBridge`] owns the low-level hook for its whole lifetime: the
//! hook is installed in [`EventBridge::install`] and removed again when
//! the bridge is dropped. There is no free-floating global handler; all
//! process-wide state hangs off the one live bridge instance.
//!
//! The OS invokes the hook callback on its own event-delivery thread. The
//! callback normalizes the raw event into a [`KeyCombination`](crate::model::KeyCombination),
//! consumes it if the combination is registered (unregistered events pass
//! through to the system untouched) and publishes it to the event queue;
//! the dispatch worker does the actual action invocation.

#[cfg(target_os = "macos")]
mod carbon;
#[cfg(target_os = "windows")]
mod win32;
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
mod unsupported;

#[cfg(target_os = "macos")]
use carbon as backend;
#[cfg(target_os = "windows")]
use win32 as backend;
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
use unsupported as backend;

use std::sync::atomic::{AtomicBool, Ordering};

use log::debug;

use crate::dispatch::{DispatchWorker, Dispatcher};
use crate::error::Error;
use crate::events::queue::{EventQueue, EventSender};
use crate::events::types::ContextToken;
use crate::registry::ShortcutRegistry;

/// There can only be one OS event handler of this type per process, so
/// only one bridge may be live at a time.
static BRIDGE_LIVE: AtomicBool = AtomicBool::new(false);

/// State shared with the hook callback through the opaque context pointer.
///
/// Boxed for a stable address: the box's address doubles as the bridge's
/// [`ContextToken`]. Freed only after the hook is removed.
#[cfg_attr(
    not(any(target_os = "macos", target_os = "windows")),
    allow(dead_code)
)]
pub(crate) struct BridgeShared {
    pub(crate) registry: ShortcutRegistry,
    pub(crate) sender: EventSender,
}

/// Live keyboard-event bridge.
///
/// Dropping the bridge removes the OS hook, tears down the shared state
/// and joins the dispatch worker. Install and drop the bridge on the same
/// thread; on macOS that must be the main thread (Carbon requirement).
pub struct EventBridge {
    hook: backend::Hook,
    shared: *mut BridgeShared,
    worker: Option<DispatchWorker>,
    token: ContextToken,
}

impl EventBridge {
    /// Install the process-wide keyboard hook.
    ///
    /// Fails with [`Error::HookInstall`] if the OS denies the hook (for
    /// example due to missing input-monitoring permissions); installation
    /// is not retried, the caller decides whether to try again. Fails
    /// with [`Error::AlreadyInstalled`] while another bridge is live, and
    /// with [`Error::Unsupported`] on targets without a hook backend.
    pub fn install(registry: &ShortcutRegistry) -> Result<Self, Error> {
        if BRIDGE_LIVE.swap(true, Ordering::SeqCst) {
            return Err(Error::AlreadyInstalled);
        }

        let queue = EventQueue::new();
        let sender = queue.sender();
        let worker = DispatchWorker::spawn(
            queue.into_receiver(),
            Dispatcher::new(registry.clone()),
        );

        let shared = Box::into_raw(Box::new(BridgeShared {
            registry: registry.clone(),
            sender,
        }));
        let token = ContextToken::from_raw(shared as usize);

        match backend::install(shared) {
            Ok(hook) => {
                debug!("event bridge installed (context {:#x})", token.as_raw());
                Ok(Self {
                    hook,
                    shared,
                    worker: Some(worker),
                    token,
                })
            }
            Err(err) => {
                // Unwind: free the shared state (dropping the last queue
                // sender) so the worker exits, then clear the slot.
                unsafe { drop(Box::from_raw(shared)) };
                worker.join();
                BRIDGE_LIVE.store(false, Ordering::SeqCst);
                Err(err)
            }
        }
    }

    /// The token this bridge stamps onto every event it publishes.
    pub fn context_token(&self) -> ContextToken {
        self.token
    }
}

impl Drop for EventBridge {
    fn drop(&mut self) {
        self.hook.remove();
        // The hook can no longer fire; release the shared state. This
        // drops the last queue sender, which lets the worker drain the
        // remaining events and exit.
        unsafe { drop(Box::from_raw(self.shared)) };
        if let Some(worker) = self.worker.take() {
            worker.join();
        }
        BRIDGE_LIVE.store(false, Ordering::SeqCst);
        debug!("event bridge removed");
    }
}

#[cfg(all(test, not(any(target_os = "macos", target_os = "windows"))))]
mod tests {
    use super::*;

    #[test]
    fn test_install_reports_unsupported_target() {
        let registry = ShortcutRegistry::new();
        let err = EventBridge::install(&registry).err().expect("no backend");
        assert_eq!(err, Error::Unsupported);
        // The slot must be free again for later attempts.
        assert_eq!(
            EventBridge::install(&registry).err(),
            Some(Error::Unsupported)
        );
    }
}
