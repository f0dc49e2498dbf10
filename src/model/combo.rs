//! Key combination value type (pure Rust, no FFI).
//!
//! A [`KeyCombination`] just represents a combination of keys. It does not
//! care whether the combination is valid or currently registered, and it
//! does not watch the input system; that is the job of the registry and
//! the bridge.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::keycodes;

/// Modifier-key set for a shortcut.
///
/// Stored as a bit set. Only the four shortcut modifiers are representable;
/// [`Modifiers::pick`] strips anything else (caps lock, function key, raw
/// device bits) from untrusted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(u32);

impl Modifiers {
    /// The empty set.
    pub const NONE: Modifiers = Modifiers(0);
    /// Shift (⇧).
    pub const SHIFT: Modifiers = Modifiers(1 << 0);
    /// Control (⌃).
    pub const CONTROL: Modifiers = Modifiers(1 << 1);
    /// Option / Alt (⌥).
    pub const OPTION: Modifiers = Modifiers(1 << 2);
    /// Command / Win (⌘).
    pub const COMMAND: Modifiers = Modifiers(1 << 3);

    const KNOWN: u32 = Self::SHIFT.0 | Self::CONTROL.0 | Self::OPTION.0 | Self::COMMAND.0;

    /// Build a set from raw bits, keeping only the four known modifiers.
    pub const fn pick(bits: u32) -> Modifiers {
        Modifiers(bits & Self::KNOWN)
    }

    /// The raw bit representation.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// True if every modifier in `other` is also in `self`.
    pub const fn contains(self, other: Modifiers) -> bool {
        self.0 & other.0 == other.0
    }

    /// True if no modifier is set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Modifiers) -> Modifiers {
        Modifiers(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for Modifiers {
    fn bitor_assign(&mut self, rhs: Modifiers) {
        self.0 |= rhs.0;
    }
}

/// Renders the modifier glyphs in the conventional control, option,
/// shift, command order.
impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.contains(Modifiers::CONTROL) {
            f.write_str(keycodes::GLYPH_CONTROL)?;
        }
        if self.contains(Modifiers::OPTION) {
            f.write_str(keycodes::GLYPH_OPTION)?;
        }
        if self.contains(Modifiers::SHIFT) {
            f.write_str(keycodes::GLYPH_SHIFT)?;
        }
        if self.contains(Modifiers::COMMAND) {
            f.write_str(keycodes::GLYPH_COMMAND)?;
        }
        Ok(())
    }
}

impl Serialize for Modifiers {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.0)
    }
}

impl<'de> Deserialize<'de> for Modifiers {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Stored data may carry unknown bits; keep the invariant airtight.
        u32::deserialize(deserializer).map(Modifiers::pick)
    }
}

/// An immutable key code + modifier set identifying a shortcut.
///
/// The key code is hardware independent and uses the canonical numbering
/// from [`keycodes`]. Two combinations are equal iff key code and modifier
/// set are equal; `Hash` is consistent with that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyCombination {
    /// The virtual key code, e.g. [`keycodes::KC_S`].
    pub key_code: u32,
    /// The modifier set, e.g. `Modifiers::COMMAND | Modifiers::SHIFT`.
    #[serde(rename = "modifier_flags")]
    pub modifiers: Modifiers,
}

impl KeyCombination {
    /// Create a combination from a key code and modifier set.
    pub const fn new(key_code: u32, modifiers: Modifiers) -> Self {
        Self { key_code, modifiers }
    }
}

/// Renders like `⇧⌘S`: modifier glyphs followed by the key name.
/// Key codes without a fixed name fall back to the numeric code.
impl fmt::Display for KeyCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.modifiers)?;
        match keycodes::key_name(self.key_code) {
            Some(name) => f.write_str(name),
            None => write!(f, "<{}>", self.key_code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_strips_unknown_bits() {
        let mods = Modifiers::pick(0xFFFF_FFF0 | Modifiers::SHIFT.bits());
        assert_eq!(mods, Modifiers::SHIFT);
    }

    #[test]
    fn test_pick_keeps_known_bits() {
        let raw = (Modifiers::COMMAND | Modifiers::CONTROL).bits();
        assert_eq!(Modifiers::pick(raw), Modifiers::COMMAND | Modifiers::CONTROL);
    }

    #[test]
    fn test_contains() {
        let mods = Modifiers::COMMAND | Modifiers::SHIFT;
        assert!(mods.contains(Modifiers::COMMAND));
        assert!(mods.contains(Modifiers::SHIFT));
        assert!(mods.contains(Modifiers::COMMAND | Modifiers::SHIFT));
        assert!(!mods.contains(Modifiers::OPTION));
    }

    #[test]
    fn test_empty_set() {
        assert!(Modifiers::NONE.is_empty());
        assert!(!Modifiers::SHIFT.is_empty());
        assert_eq!(Modifiers::default(), Modifiers::NONE);
    }

    #[test]
    fn test_modifier_display_order() {
        // Control, option, shift, command - regardless of construction order
        let mods = Modifiers::COMMAND | Modifiers::SHIFT | Modifiers::OPTION | Modifiers::CONTROL;
        assert_eq!(mods.to_string(), "⌃⌥⇧⌘");
    }

    #[test]
    fn test_combo_equality_requires_both_fields() {
        let a = KeyCombination::new(keycodes::KC_S, Modifiers::COMMAND);
        let b = KeyCombination::new(keycodes::KC_S, Modifiers::COMMAND);
        let c = KeyCombination::new(keycodes::KC_S, Modifiers::OPTION);
        let d = KeyCombination::new(keycodes::KC_D, Modifiers::COMMAND);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn test_combo_display() {
        let combo = KeyCombination::new(keycodes::KC_S, Modifiers::COMMAND | Modifiers::SHIFT);
        assert_eq!(combo.to_string(), "⇧⌘S");
    }

    #[test]
    fn test_combo_display_unknown_key_code() {
        let combo = KeyCombination::new(0xFFFF, Modifiers::CONTROL);
        assert_eq!(combo.to_string(), "⌃<65535>");
    }

    #[test]
    fn test_deserialize_sanitizes_modifiers() {
        let combo: KeyCombination =
            serde_json::from_str(r#"{"key_code":1,"modifier_flags":4294967295}"#)
                .expect("deserialize");
        assert_eq!(combo.modifiers, Modifiers::pick(u32::MAX));
        assert_eq!(combo.modifiers.bits(), 0b1111);
    }
}
