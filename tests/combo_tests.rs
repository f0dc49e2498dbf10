//! Tests for the key combination model: equality/hash invariants,
//! modifier handling, display rendering and the serialized form.

use std::collections::HashMap;

use keybridge::model::keycodes;
use keybridge::{KeyCombination, Modifiers};

fn cmd_shift_s() -> KeyCombination {
    KeyCombination::new(keycodes::KC_S, Modifiers::COMMAND | Modifiers::SHIFT)
}

// === Equality and hashing ===

#[test]
fn combos_equal_iff_key_code_and_modifiers_equal() {
    assert_eq!(cmd_shift_s(), cmd_shift_s());
    assert_ne!(
        cmd_shift_s(),
        KeyCombination::new(keycodes::KC_S, Modifiers::COMMAND)
    );
    assert_ne!(
        cmd_shift_s(),
        KeyCombination::new(keycodes::KC_A, Modifiers::COMMAND | Modifiers::SHIFT)
    );
}

#[test]
fn hash_is_consistent_with_equality() {
    let mut map = HashMap::new();
    map.insert(cmd_shift_s(), "snapshot");

    assert_eq!(map.get(&cmd_shift_s()), Some(&"snapshot"));
    assert_eq!(
        map.get(&KeyCombination::new(keycodes::KC_S, Modifiers::COMMAND)),
        None
    );
}

#[test]
fn modifier_order_does_not_matter() {
    let a = Modifiers::COMMAND | Modifiers::SHIFT;
    let b = Modifiers::SHIFT | Modifiers::COMMAND;
    assert_eq!(
        KeyCombination::new(keycodes::KC_S, a),
        KeyCombination::new(keycodes::KC_S, b)
    );
}

// === Modifier set semantics ===

#[test]
fn pick_keeps_only_shortcut_modifiers() {
    let raw = Modifiers::CONTROL.bits() | 0xFF00;
    assert_eq!(Modifiers::pick(raw), Modifiers::CONTROL);
}

#[test]
fn contains_is_subset_test() {
    let mods = Modifiers::COMMAND | Modifiers::OPTION;
    assert!(mods.contains(Modifiers::COMMAND));
    assert!(!mods.contains(Modifiers::COMMAND | Modifiers::SHIFT));
    assert!(mods.contains(Modifiers::NONE));
}

// === Display ===

#[test]
fn display_renders_glyphs_then_key_name() {
    assert_eq!(cmd_shift_s().to_string(), "⇧⌘S");
    assert_eq!(
        KeyCombination::new(keycodes::KC_F5, Modifiers::CONTROL).to_string(),
        "⌃F5"
    );
    assert_eq!(
        KeyCombination::new(keycodes::KC_SPACE, Modifiers::NONE).to_string(),
        "Space"
    );
}

#[test]
fn display_falls_back_to_numeric_code() {
    let combo = KeyCombination::new(400, Modifiers::COMMAND);
    assert_eq!(combo.to_string(), "⌘<400>");
}

// === Serialized form ===

#[test]
fn serde_round_trip_preserves_value() {
    let json = serde_json::to_string(&cmd_shift_s()).expect("serialize");
    let back: KeyCombination = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, cmd_shift_s());
}

#[test]
fn serialized_form_uses_key_code_and_modifier_flags() {
    let value = serde_json::to_value(cmd_shift_s()).expect("serialize");
    assert_eq!(value["key_code"], keycodes::KC_S);
    assert_eq!(
        value["modifier_flags"],
        (Modifiers::COMMAND | Modifiers::SHIFT).bits()
    );
}

#[test]
fn deserializing_raw_flags_sanitizes_them() {
    let combo: KeyCombination =
        serde_json::from_str(r#"{"key_code":0,"modifier_flags":65535}"#).expect("deserialize");
    assert_eq!(combo.modifiers, Modifiers::pick(65535));
    assert!(combo
        .modifiers
        .contains(Modifiers::SHIFT | Modifiers::CONTROL | Modifiers::OPTION | Modifiers::COMMAND));
}
