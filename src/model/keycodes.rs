//! Canonical virtual key codes and display glyphs.
//!
//! The numbering is the classic hardware-independent virtual key code set
//! (the same values Carbon's `Events.h` uses); the Windows backend maps
//! native `VK_*` codes onto it so that a [`super::KeyCombination`] means
//! the same thing on every platform.

// === Modifier glyphs ===

pub const GLYPH_CONTROL: &str = "\u{2303}"; // ⌃
pub const GLYPH_OPTION: &str = "\u{2325}"; // ⌥
pub const GLYPH_SHIFT: &str = "\u{21E7}"; // ⇧
pub const GLYPH_COMMAND: &str = "\u{2318}"; // ⌘

// === Letter keys ===

pub const KC_A: u32 = 0;
pub const KC_S: u32 = 1;
pub const KC_D: u32 = 2;
pub const KC_F: u32 = 3;
pub const KC_H: u32 = 4;
pub const KC_G: u32 = 5;
pub const KC_Z: u32 = 6;
pub const KC_X: u32 = 7;
pub const KC_C: u32 = 8;
pub const KC_V: u32 = 9;
pub const KC_B: u32 = 11;
pub const KC_Q: u32 = 12;
pub const KC_W: u32 = 13;
pub const KC_E: u32 = 14;
pub const KC_R: u32 = 15;
pub const KC_Y: u32 = 16;
pub const KC_T: u32 = 17;
pub const KC_O: u32 = 31;
pub const KC_U: u32 = 32;
pub const KC_I: u32 = 34;
pub const KC_P: u32 = 35;
pub const KC_L: u32 = 37;
pub const KC_J: u32 = 38;
pub const KC_K: u32 = 40;
pub const KC_N: u32 = 45;
pub const KC_M: u32 = 46;

// === Digit row ===

pub const KC_1: u32 = 18;
pub const KC_2: u32 = 19;
pub const KC_3: u32 = 20;
pub const KC_4: u32 = 21;
pub const KC_6: u32 = 22;
pub const KC_5: u32 = 23;
pub const KC_9: u32 = 25;
pub const KC_7: u32 = 26;
pub const KC_8: u32 = 28;
pub const KC_0: u32 = 29;

// === Punctuation ===

pub const KC_EQUAL: u32 = 24;
pub const KC_MINUS: u32 = 27;
pub const KC_RIGHT_BRACKET: u32 = 30;
pub const KC_LEFT_BRACKET: u32 = 33;
pub const KC_QUOTE: u32 = 39;
pub const KC_SEMICOLON: u32 = 41;
pub const KC_BACKSLASH: u32 = 42;
pub const KC_COMMA: u32 = 43;
pub const KC_SLASH: u32 = 44;
pub const KC_PERIOD: u32 = 47;
pub const KC_GRAVE: u32 = 50;

// === Editing and navigation ===

pub const KC_RETURN: u32 = 36;
pub const KC_TAB: u32 = 48;
pub const KC_SPACE: u32 = 49;
/// Backspace on PC keyboards.
pub const KC_DELETE: u32 = 51;
pub const KC_ESCAPE: u32 = 53;
pub const KC_HELP: u32 = 114;
pub const KC_HOME: u32 = 115;
pub const KC_PAGE_UP: u32 = 116;
pub const KC_FORWARD_DELETE: u32 = 117;
pub const KC_END: u32 = 119;
pub const KC_PAGE_DOWN: u32 = 121;
pub const KC_LEFT_ARROW: u32 = 123;
pub const KC_RIGHT_ARROW: u32 = 124;
pub const KC_DOWN_ARROW: u32 = 125;
pub const KC_UP_ARROW: u32 = 126;

// === Function keys ===

pub const KC_F1: u32 = 122;
pub const KC_F2: u32 = 120;
pub const KC_F3: u32 = 99;
pub const KC_F4: u32 = 118;
pub const KC_F5: u32 = 96;
pub const KC_F6: u32 = 97;
pub const KC_F7: u32 = 98;
pub const KC_F8: u32 = 100;
pub const KC_F9: u32 = 101;
pub const KC_F10: u32 = 109;
pub const KC_F11: u32 = 103;
pub const KC_F12: u32 = 111;
pub const KC_F13: u32 = 105;
pub const KC_F14: u32 = 107;
pub const KC_F15: u32 = 113;
pub const KC_F16: u32 = 106;
pub const KC_F17: u32 = 64;
pub const KC_F18: u32 = 79;
pub const KC_F19: u32 = 80;

// === Keypad ===

pub const KC_KEYPAD_DECIMAL: u32 = 65;
pub const KC_KEYPAD_MULTIPLY: u32 = 67;
pub const KC_KEYPAD_PLUS: u32 = 69;
pub const KC_KEYPAD_CLEAR: u32 = 71;
pub const KC_KEYPAD_DIVIDE: u32 = 75;
pub const KC_KEYPAD_ENTER: u32 = 76;
pub const KC_KEYPAD_MINUS: u32 = 78;
pub const KC_KEYPAD_EQUALS: u32 = 81;
pub const KC_KEYPAD_0: u32 = 82;
pub const KC_KEYPAD_1: u32 = 83;
pub const KC_KEYPAD_2: u32 = 84;
pub const KC_KEYPAD_3: u32 = 85;
pub const KC_KEYPAD_4: u32 = 86;
pub const KC_KEYPAD_5: u32 = 87;
pub const KC_KEYPAD_6: u32 = 88;
pub const KC_KEYPAD_7: u32 = 89;
pub const KC_KEYPAD_8: u32 = 91;
pub const KC_KEYPAD_9: u32 = 92;

/// Fixed display name for a key code, like the `S` in `⇧⌘S`.
///
/// Keys with a conventional keyboard glyph (arrows, escape, delete, ...)
/// use that glyph. Returns `None` for codes outside the fixed table;
/// layout-dependent naming of such keys is out of scope here.
pub fn key_name(key_code: u32) -> Option<&'static str> {
    let name = match key_code {
        KC_A => "A",
        KC_S => "S",
        KC_D => "D",
        KC_F => "F",
        KC_H => "H",
        KC_G => "G",
        KC_Z => "Z",
        KC_X => "X",
        KC_C => "C",
        KC_V => "V",
        KC_B => "B",
        KC_Q => "Q",
        KC_W => "W",
        KC_E => "E",
        KC_R => "R",
        KC_Y => "Y",
        KC_T => "T",
        KC_O => "O",
        KC_U => "U",
        KC_I => "I",
        KC_P => "P",
        KC_L => "L",
        KC_J => "J",
        KC_K => "K",
        KC_N => "N",
        KC_M => "M",

        KC_1 => "1",
        KC_2 => "2",
        KC_3 => "3",
        KC_4 => "4",
        KC_5 => "5",
        KC_6 => "6",
        KC_7 => "7",
        KC_8 => "8",
        KC_9 => "9",
        KC_0 => "0",

        KC_EQUAL => "=",
        KC_MINUS => "-",
        KC_RIGHT_BRACKET => "]",
        KC_LEFT_BRACKET => "[",
        KC_QUOTE => "'",
        KC_SEMICOLON => ";",
        KC_BACKSLASH => "\\",
        KC_COMMA => ",",
        KC_SLASH => "/",
        KC_PERIOD => ".",
        KC_GRAVE => "`",

        KC_RETURN => "\u{21A9}",         // ↩
        KC_TAB => "\u{21E5}",            // ⇥
        KC_SPACE => "Space",
        KC_DELETE => "\u{232B}",         // ⌫
        KC_ESCAPE => "\u{238B}",         // ⎋
        KC_HELP => "?",
        KC_HOME => "\u{2196}",           // ↖
        KC_PAGE_UP => "\u{21DE}",        // ⇞
        KC_FORWARD_DELETE => "\u{2326}", // ⌦
        KC_END => "\u{2198}",            // ↘
        KC_PAGE_DOWN => "\u{21DF}",      // ⇟
        KC_LEFT_ARROW => "\u{2190}",     // ←
        KC_RIGHT_ARROW => "\u{2192}",    // →
        KC_DOWN_ARROW => "\u{2193}",     // ↓
        KC_UP_ARROW => "\u{2191}",       // ↑

        KC_F1 => "F1",
        KC_F2 => "F2",
        KC_F3 => "F3",
        KC_F4 => "F4",
        KC_F5 => "F5",
        KC_F6 => "F6",
        KC_F7 => "F7",
        KC_F8 => "F8",
        KC_F9 => "F9",
        KC_F10 => "F10",
        KC_F11 => "F11",
        KC_F12 => "F12",
        KC_F13 => "F13",
        KC_F14 => "F14",
        KC_F15 => "F15",
        KC_F16 => "F16",
        KC_F17 => "F17",
        KC_F18 => "F18",
        KC_F19 => "F19",

        KC_KEYPAD_DECIMAL => ".",
        KC_KEYPAD_MULTIPLY => "*",
        KC_KEYPAD_PLUS => "+",
        KC_KEYPAD_CLEAR => "\u{2327}", // ⌧
        KC_KEYPAD_DIVIDE => "/",
        KC_KEYPAD_ENTER => "\u{2305}", // ⌅
        KC_KEYPAD_MINUS => "-",
        KC_KEYPAD_EQUALS => "=",
        KC_KEYPAD_0 => "0",
        KC_KEYPAD_1 => "1",
        KC_KEYPAD_2 => "2",
        KC_KEYPAD_3 => "3",
        KC_KEYPAD_4 => "4",
        KC_KEYPAD_5 => "5",
        KC_KEYPAD_6 => "6",
        KC_KEYPAD_7 => "7",
        KC_KEYPAD_8 => "8",
        KC_KEYPAD_9 => "9",

        _ => return None,
    };
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_and_function_key_names() {
        assert_eq!(key_name(KC_A), Some("A"));
        assert_eq!(key_name(KC_F12), Some("F12"));
        assert_eq!(key_name(KC_SPACE), Some("Space"));
    }

    #[test]
    fn test_glyph_key_names() {
        assert_eq!(key_name(KC_ESCAPE), Some("\u{238B}"));
        assert_eq!(key_name(KC_LEFT_ARROW), Some("\u{2190}"));
    }

    #[test]
    fn test_unknown_key_code_has_no_name() {
        assert_eq!(key_name(0xFFFF), None);
    }
}
