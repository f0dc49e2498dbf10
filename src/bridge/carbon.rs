//! Carbon Event Manager backend for macOS.
//!
//! Installs one raw-key event handler with the Carbon dispatcher target.
//! The callback receives the event record, reads the key code and
//! modifier bits via `GetEventParameter`, and publishes the normalized
//! combination. Registered combinations are consumed (`noErr`);
//! everything else is passed back to the system
//! (`eventNotHandledErr`).

use std::ffi::c_void;
use std::ptr;

use log::{debug, warn};

use super::BridgeShared;
use crate::error::Error;
use crate::events::types::{ContextToken, KeyEvent};
use crate::model::{KeyCombination, Modifiers};

// === Types ===

pub type EventTargetRef = *mut c_void;
pub type EventHandlerRef = *mut c_void;
pub type EventHandlerCallRef = *mut c_void;
pub type EventRef = *mut c_void;
pub type EventHandlerUPP = extern "C" fn(EventHandlerCallRef, EventRef, *mut c_void) -> i32;

#[repr(C)]
#[derive(Copy, Clone)]
pub struct EventTypeSpec {
    pub event_class: u32,
    pub event_kind: u32,
}

// === Constants ===

pub const NO_ERR: i32 = 0;
pub const EVENT_NOT_HANDLED_ERR: i32 = -9874;

pub const K_EVENT_CLASS_KEYBOARD: u32 = 0x6B65_7962; // 'keyb'
pub const K_EVENT_RAW_KEY_DOWN: u32 = 1;
pub const K_EVENT_PARAM_KEY_CODE: u32 = 0x6B63_6F64; // 'kcod'
pub const K_EVENT_PARAM_KEY_MODIFIERS: u32 = 0x6B6D_6F64; // 'kmod'
pub const TYPE_UINT32: u32 = 0x6D61_676E; // 'magn'

// Carbon modifier bits
pub const CMD_KEY: u32 = 1 << 8;
pub const SHIFT_KEY: u32 = 1 << 9;
pub const OPTION_KEY: u32 = 1 << 11;
pub const CONTROL_KEY: u32 = 1 << 12;

// === FFI Declarations ===

#[link(name = "Carbon", kind = "framework")]
extern "C" {
    fn InstallEventHandler(
        inTarget: EventTargetRef,
        inHandler: EventHandlerUPP,
        inNumTypes: u32,
        inList: *const EventTypeSpec,
        inUserData: *mut c_void,
        outRef: *mut EventHandlerRef,
    ) -> i32;

    fn RemoveEventHandler(inHandlerRef: EventHandlerRef) -> i32;

    fn GetEventDispatcherTarget() -> EventTargetRef;

    fn GetEventClass(inEvent: EventRef) -> u32;
    fn GetEventKind(inEvent: EventRef) -> u32;

    fn GetEventParameter(
        inEvent: EventRef,
        inName: u32,
        inDesiredType: u32,
        outActualType: *mut u32,
        inBufferSize: u32,
        outActualSize: *mut u32,
        outData: *mut c_void,
    ) -> i32;
}

/// Map Carbon modifier bits onto the canonical set.
fn modifiers_from_carbon(bits: u32) -> Modifiers {
    let mut mods = Modifiers::NONE;
    if bits & SHIFT_KEY != 0 {
        mods |= Modifiers::SHIFT;
    }
    if bits & CONTROL_KEY != 0 {
        mods |= Modifiers::CONTROL;
    }
    if bits & OPTION_KEY != 0 {
        mods |= Modifiers::OPTION;
    }
    if bits & CMD_KEY != 0 {
        mods |= Modifiers::COMMAND;
    }
    mods
}

/// Read a `u32` event parameter, `None` on any status other than `noErr`.
unsafe fn event_param_u32(event: EventRef, name: u32) -> Option<u32> {
    let mut value: u32 = 0;
    let status = GetEventParameter(
        event,
        name,
        TYPE_UINT32,
        ptr::null_mut(),
        std::mem::size_of::<u32>() as u32,
        ptr::null_mut(),
        &mut value as *mut u32 as *mut c_void,
    );
    (status == NO_ERR).then_some(value)
}

/// Carbon event handler for raw key-down events.
///
/// Called by the Carbon runtime on its event-delivery thread. Must not
/// panic and must not block: it normalizes the event, publishes it, and
/// returns. `context` is the bridge's shared-state pointer, valid for as
/// long as the handler is installed.
extern "C" fn key_event_callback(
    _call_ref: EventHandlerCallRef,
    event: EventRef,
    context: *mut c_void,
) -> i32 {
    if context.is_null() {
        return EVENT_NOT_HANDLED_ERR;
    }
    unsafe {
        if GetEventClass(event) != K_EVENT_CLASS_KEYBOARD
            || GetEventKind(event) != K_EVENT_RAW_KEY_DOWN
        {
            return EVENT_NOT_HANDLED_ERR;
        }

        let (Some(key_code), Some(raw_mods)) = (
            event_param_u32(event, K_EVENT_PARAM_KEY_CODE),
            event_param_u32(event, K_EVENT_PARAM_KEY_MODIFIERS),
        ) else {
            return EVENT_NOT_HANDLED_ERR;
        };

        let shared = &*(context as *const BridgeShared);
        let combo = KeyCombination::new(key_code, modifiers_from_carbon(raw_mods));
        if !shared.registry.is_registered(&combo) {
            // Not ours; let the system deliver it normally.
            return EVENT_NOT_HANDLED_ERR;
        }

        shared.sender.publish(KeyEvent {
            combo,
            context: ContextToken::from_raw(context as usize),
        });
        NO_ERR
    }
}

/// Handle to the installed Carbon event handler.
pub(crate) struct Hook {
    handler_ref: EventHandlerRef,
}

/// Install the raw-key event handler with `shared` as its context.
///
/// `shared` must stay valid until [`Hook::remove`] has returned.
pub(crate) fn install(shared: *mut BridgeShared) -> Result<Hook, Error> {
    let types = [EventTypeSpec {
        event_class: K_EVENT_CLASS_KEYBOARD,
        event_kind: K_EVENT_RAW_KEY_DOWN,
    }];
    let mut handler_ref: EventHandlerRef = ptr::null_mut();
    let status = unsafe {
        InstallEventHandler(
            GetEventDispatcherTarget(),
            key_event_callback,
            types.len() as u32,
            types.as_ptr(),
            shared as *mut c_void,
            &mut handler_ref,
        )
    };
    if status != NO_ERR {
        warn!("InstallEventHandler failed: {}", status);
        return Err(Error::HookInstall { status });
    }
    debug!("carbon key event handler installed");
    Ok(Hook { handler_ref })
}

impl Hook {
    /// Remove the handler. Safe to call once; the bridge calls it on drop
    /// before freeing the shared state.
    pub(crate) fn remove(&mut self) {
        if self.handler_ref.is_null() {
            return;
        }
        let status = unsafe { RemoveEventHandler(self.handler_ref) };
        if status != NO_ERR {
            warn!("RemoveEventHandler failed: {}", status);
        }
        self.handler_ref = ptr::null_mut();
        debug!("carbon key event handler removed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carbon_modifier_mapping() {
        assert_eq!(
            modifiers_from_carbon(CMD_KEY | SHIFT_KEY),
            Modifiers::COMMAND | Modifiers::SHIFT
        );
        assert_eq!(
            modifiers_from_carbon(CONTROL_KEY | OPTION_KEY),
            Modifiers::CONTROL | Modifiers::OPTION
        );
        assert_eq!(modifiers_from_carbon(0), Modifiers::NONE);
    }

    #[test]
    fn test_unknown_carbon_bits_are_dropped() {
        // Caps lock (bit 10) is not a shortcut modifier.
        assert_eq!(modifiers_from_carbon(1 << 10), Modifiers::NONE);
    }
}
