//! Fallback backend for targets without a keyboard hook implementation.
//!
//! The rest of the crate (model, registry, dispatcher, queue) works
//! everywhere; only hook installation is refused here.

use super::BridgeShared;
use crate::error::Error;

pub(crate) struct Hook;

pub(crate) fn install(_shared: *mut BridgeShared) -> Result<Hook, Error> {
    Err(Error::Unsupported)
}

impl Hook {
    pub(crate) fn remove(&mut self) {}
}
