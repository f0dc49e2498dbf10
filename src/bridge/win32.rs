//! Low-level keyboard hook backend for Windows.
//!
//! Installs a `WH_KEYBOARD_LL` hook on a dedicated thread running a
//! message loop (low-level hooks are only called while their installing
//! thread pumps messages). The hook procedure normalizes each key-down,
//! publishes registered combinations and swallows them, and passes
//! everything else down the hook chain.
//!
//! Low-level hook procedures carry no user-data parameter, so the shared
//! state is reached through a static pointer; the bridge guarantees a
//! single live instance per process.

use std::sync::atomic::{AtomicIsize, AtomicPtr, Ordering};
use std::sync::mpsc;
use std::thread::{self, JoinHandle};

use log::{debug, warn};

use windows::Win32::Foundation::{LPARAM, LRESULT, WPARAM};
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    GetKeyState, VK_CONTROL, VK_LWIN, VK_MENU, VK_RWIN, VK_SHIFT,
};
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, DispatchMessageW, GetMessageW, PostThreadMessageW, SetWindowsHookExW,
    TranslateMessage, UnhookWindowsHookEx, HHOOK, KBDLLHOOKSTRUCT, MSG, WH_KEYBOARD_LL,
    WM_KEYDOWN, WM_QUIT, WM_SYSKEYDOWN,
};

use super::BridgeShared;
use crate::error::Error;
use crate::events::types::{ContextToken, KeyEvent};
use crate::model::{keycodes::*, KeyCombination, Modifiers};

/// Global keyboard hook handle (must be static for the hook procedure).
static KEYBOARD_HOOK: AtomicIsize = AtomicIsize::new(0);

/// Shared-state pointer for the hook procedure. Non-null exactly while a
/// bridge is live.
static SHARED: AtomicPtr<BridgeShared> = AtomicPtr::new(std::ptr::null_mut());

/// Snapshot the modifier keys currently held down.
fn current_modifiers() -> Modifiers {
    unsafe {
        let mut mods = Modifiers::NONE;
        if GetKeyState(VK_SHIFT.0 as i32) < 0 {
            mods |= Modifiers::SHIFT;
        }
        if GetKeyState(VK_CONTROL.0 as i32) < 0 {
            mods |= Modifiers::CONTROL;
        }
        if GetKeyState(VK_MENU.0 as i32) < 0 {
            mods |= Modifiers::OPTION;
        }
        if GetKeyState(VK_LWIN.0 as i32) < 0 || GetKeyState(VK_RWIN.0 as i32) < 0 {
            mods |= Modifiers::COMMAND;
        }
        mods
    }
}

/// Map a Windows virtual-key code onto the canonical key code set.
/// Returns `None` for keys outside the set (modifiers themselves,
/// media keys, IME keys, ...).
fn keycode_from_vk(vk: u32) -> Option<u32> {
    let code = match vk {
        // Letters: VK 'A'..'Z'
        0x41 => KC_A,
        0x42 => KC_B,
        0x43 => KC_C,
        0x44 => KC_D,
        0x45 => KC_E,
        0x46 => KC_F,
        0x47 => KC_G,
        0x48 => KC_H,
        0x49 => KC_I,
        0x4A => KC_J,
        0x4B => KC_K,
        0x4C => KC_L,
        0x4D => KC_M,
        0x4E => KC_N,
        0x4F => KC_O,
        0x50 => KC_P,
        0x51 => KC_Q,
        0x52 => KC_R,
        0x53 => KC_S,
        0x54 => KC_T,
        0x55 => KC_U,
        0x56 => KC_V,
        0x57 => KC_W,
        0x58 => KC_X,
        0x59 => KC_Y,
        0x5A => KC_Z,

        // Digit row: VK '0'..'9'
        0x30 => KC_0,
        0x31 => KC_1,
        0x32 => KC_2,
        0x33 => KC_3,
        0x34 => KC_4,
        0x35 => KC_5,
        0x36 => KC_6,
        0x37 => KC_7,
        0x38 => KC_8,
        0x39 => KC_9,

        // Editing and navigation
        0x08 => KC_DELETE,         // VK_BACK
        0x09 => KC_TAB,            // VK_TAB
        0x0D => KC_RETURN,         // VK_RETURN
        0x1B => KC_ESCAPE,         // VK_ESCAPE
        0x20 => KC_SPACE,          // VK_SPACE
        0x21 => KC_PAGE_UP,        // VK_PRIOR
        0x22 => KC_PAGE_DOWN,      // VK_NEXT
        0x23 => KC_END,            // VK_END
        0x24 => KC_HOME,           // VK_HOME
        0x25 => KC_LEFT_ARROW,     // VK_LEFT
        0x26 => KC_UP_ARROW,       // VK_UP
        0x27 => KC_RIGHT_ARROW,    // VK_RIGHT
        0x28 => KC_DOWN_ARROW,     // VK_DOWN
        0x2E => KC_FORWARD_DELETE, // VK_DELETE
        0x2F => KC_HELP,           // VK_HELP

        // Function keys: VK_F1..VK_F19
        0x70 => KC_F1,
        0x71 => KC_F2,
        0x72 => KC_F3,
        0x73 => KC_F4,
        0x74 => KC_F5,
        0x75 => KC_F6,
        0x76 => KC_F7,
        0x77 => KC_F8,
        0x78 => KC_F9,
        0x79 => KC_F10,
        0x7A => KC_F11,
        0x7B => KC_F12,
        0x7C => KC_F13,
        0x7D => KC_F14,
        0x7E => KC_F15,
        0x7F => KC_F16,
        0x80 => KC_F17,
        0x81 => KC_F18,
        0x82 => KC_F19,

        // Keypad
        0x60 => KC_KEYPAD_0,
        0x61 => KC_KEYPAD_1,
        0x62 => KC_KEYPAD_2,
        0x63 => KC_KEYPAD_3,
        0x64 => KC_KEYPAD_4,
        0x65 => KC_KEYPAD_5,
        0x66 => KC_KEYPAD_6,
        0x67 => KC_KEYPAD_7,
        0x68 => KC_KEYPAD_8,
        0x69 => KC_KEYPAD_9,
        0x6A => KC_KEYPAD_MULTIPLY, // VK_MULTIPLY
        0x6B => KC_KEYPAD_PLUS,     // VK_ADD
        0x6D => KC_KEYPAD_MINUS,    // VK_SUBTRACT
        0x6E => KC_KEYPAD_DECIMAL,  // VK_DECIMAL
        0x6F => KC_KEYPAD_DIVIDE,   // VK_DIVIDE

        // OEM punctuation (US layout positions)
        0xBA => KC_SEMICOLON,     // VK_OEM_1
        0xBB => KC_EQUAL,         // VK_OEM_PLUS
        0xBC => KC_COMMA,         // VK_OEM_COMMA
        0xBD => KC_MINUS,         // VK_OEM_MINUS
        0xBE => KC_PERIOD,        // VK_OEM_PERIOD
        0xBF => KC_SLASH,         // VK_OEM_2
        0xC0 => KC_GRAVE,         // VK_OEM_3
        0xDB => KC_LEFT_BRACKET,  // VK_OEM_4
        0xDC => KC_BACKSLASH,     // VK_OEM_5
        0xDD => KC_RIGHT_BRACKET, // VK_OEM_6
        0xDE => KC_QUOTE,         // VK_OEM_7

        _ => return None,
    };
    Some(code)
}

/// Low-level keyboard hook procedure.
///
/// Called by the system on the hook thread. Must not panic and must
/// return quickly; slow hook procedures get silently removed by the OS.
extern "system" fn keyboard_hook_proc(ncode: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    unsafe {
        if ncode >= 0 && matches!(wparam.0 as u32, WM_KEYDOWN | WM_SYSKEYDOWN) {
            let shared_ptr = SHARED.load(Ordering::SeqCst);
            if !shared_ptr.is_null() {
                let shared = &*shared_ptr;
                let info = &*(lparam.0 as *const KBDLLHOOKSTRUCT);
                if let Some(key_code) = keycode_from_vk(info.vkCode) {
                    let combo = KeyCombination::new(key_code, current_modifiers());
                    if shared.registry.is_registered(&combo) {
                        shared.sender.publish(KeyEvent {
                            combo,
                            context: ContextToken::from_raw(shared_ptr as usize),
                        });
                        // Swallow the event, like a registered hotkey.
                        return LRESULT(1);
                    }
                }
            }
        }

        let hook = KEYBOARD_HOOK.load(Ordering::SeqCst);
        CallNextHookEx(Some(HHOOK(hook as *mut _)), ncode, wparam, lparam)
    }
}

/// Body of the hook thread: install the hook, report back, pump messages
/// until `WM_QUIT`, then unhook.
fn hook_thread(ready: mpsc::Sender<Result<u32, i32>>) {
    unsafe {
        let hook = match SetWindowsHookExW(WH_KEYBOARD_LL, Some(keyboard_hook_proc), None, 0) {
            Ok(hook) => hook,
            Err(err) => {
                let _ = ready.send(Err(err.code().0));
                return;
            }
        };
        KEYBOARD_HOOK.store(hook.0 as isize, Ordering::SeqCst);
        let _ = ready.send(Ok(GetCurrentThreadId()));

        let mut msg = MSG::default();
        while GetMessageW(&mut msg, None, 0, 0).as_bool() {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }

        if let Err(err) = UnhookWindowsHookEx(hook) {
            warn!("UnhookWindowsHookEx failed: {}", err);
        }
        KEYBOARD_HOOK.store(0, Ordering::SeqCst);
    }
}

/// Handle to the hook thread.
pub(crate) struct Hook {
    thread: Option<JoinHandle<()>>,
    thread_id: u32,
}

/// Spawn the hook thread and wait for it to report the hook status.
///
/// `shared` must stay valid until [`Hook::remove`] has returned.
pub(crate) fn install(shared: *mut BridgeShared) -> Result<Hook, Error> {
    SHARED.store(shared, Ordering::SeqCst);

    let (ready_tx, ready_rx) = mpsc::channel();
    let thread = thread::Builder::new()
        .name("keybridge-hook".into())
        .spawn(move || hook_thread(ready_tx))
        .map_err(|err| {
            SHARED.store(std::ptr::null_mut(), Ordering::SeqCst);
            Error::HookInstall {
                status: err.raw_os_error().unwrap_or(-1),
            }
        })?;

    match ready_rx.recv() {
        Ok(Ok(thread_id)) => {
            debug!("keyboard hook installed on thread {}", thread_id);
            Ok(Hook {
                thread: Some(thread),
                thread_id,
            })
        }
        Ok(Err(status)) => {
            SHARED.store(std::ptr::null_mut(), Ordering::SeqCst);
            let _ = thread.join();
            warn!("SetWindowsHookExW failed: {}", status);
            Err(Error::HookInstall { status })
        }
        // Hook thread died without reporting; treat as install failure.
        Err(_) => {
            SHARED.store(std::ptr::null_mut(), Ordering::SeqCst);
            let _ = thread.join();
            Err(Error::HookInstall { status: -1 })
        }
    }
}

impl Hook {
    /// Stop the message loop, unhook and join the hook thread. Safe to
    /// call once; the bridge calls it on drop before freeing the shared
    /// state.
    pub(crate) fn remove(&mut self) {
        if let Some(thread) = self.thread.take() {
            unsafe {
                if let Err(err) = PostThreadMessageW(self.thread_id, WM_QUIT, WPARAM(0), LPARAM(0))
                {
                    warn!("PostThreadMessageW failed: {}", err);
                }
            }
            let _ = thread.join();
            SHARED.store(std::ptr::null_mut(), Ordering::SeqCst);
            debug!("keyboard hook removed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vk_letter_and_digit_mapping() {
        assert_eq!(keycode_from_vk(0x53), Some(KC_S));
        assert_eq!(keycode_from_vk(0x30), Some(KC_0));
        assert_eq!(keycode_from_vk(0x70), Some(KC_F1));
    }

    #[test]
    fn test_vk_modifier_keys_have_no_canonical_code() {
        // VK_SHIFT, VK_CONTROL, VK_MENU are modifiers, not combo keys.
        assert_eq!(keycode_from_vk(0x10), None);
        assert_eq!(keycode_from_vk(0x11), None);
        assert_eq!(keycode_from_vk(0x12), None);
    }
}
