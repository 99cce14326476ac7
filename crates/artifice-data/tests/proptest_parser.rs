//! Property-based tests for artifact document parsing.
//!
//! The short forms (`lore` as one string, a bare modifier id) must parse to
//! exactly what their long forms do.

use artifice_core::spec::ModifierSpec;
use artifice_data::parse_artifact_spec;
use proptest::prelude::*;
use serde_json::{Value, json};

// ===========================================================================
// Generators
// ===========================================================================

fn arb_id() -> impl Strategy<Value = String> {
    "[a-z][a-z_]{0,11}"
}

fn arb_line() -> impl Strategy<Value = String> {
    "[ -~]{0,24}"
}

/// (id, level, write level-1 entries in short form)
fn arb_mods() -> impl Strategy<Value = Vec<(String, u32, bool)>> {
    proptest::collection::vec((arb_id(), 1..5u32, any::<bool>()), 0..6)
}

fn long_form_mods(mods: &[(String, u32, bool)]) -> Value {
    Value::Array(
        mods.iter()
            .map(|(id, level, _)| json!({"id": id, "level": level}))
            .collect(),
    )
}

fn mixed_form_mods(mods: &[(String, u32, bool)]) -> Value {
    Value::Array(
        mods.iter()
            .map(|(id, level, short)| match (level, short) {
                (1, true) => json!(id),
                (1, false) => json!({"id": id}),
                _ => json!({"id": id, "level": level}),
            })
            .collect(),
    )
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #[test]
    fn short_and_long_forms_agree(
        name in arb_id(),
        tool in arb_id(),
        materials in proptest::collection::vec(arb_id(), 0..5),
        line in arb_line(),
        free in 0..8u32,
        mods in arb_mods(),
    ) {
        let long = json!({
            "name": name,
            "tool": tool,
            "materials": materials,
            "lore": [line],
            "free_mods": free,
            "mods": long_form_mods(&mods),
        });
        let short = json!({
            "name": name,
            "tool": tool,
            "materials": materials,
            "lore": line,
            "free_mods": free,
            "mods": mixed_form_mods(&mods),
        });

        let from_long = parse_artifact_spec(&long).unwrap();
        let from_short = parse_artifact_spec(&short).unwrap();
        prop_assert_eq!(&from_long, &from_short);

        let expected: Vec<ModifierSpec> = mods
            .iter()
            .map(|(id, level, _)| ModifierSpec::new(id.clone(), *level))
            .collect();
        prop_assert_eq!(from_long.modifiers(), expected.as_slice());
        prop_assert_eq!(from_long.materials(), materials.as_slice());
    }

    #[test]
    fn non_string_modifier_entries_always_fail(n in any::<i64>()) {
        let doc = json!({
            "name": "X",
            "tool": "pickaxe",
            "materials": [],
            "mods": ["ok", n],
        });
        prop_assert!(parse_artifact_spec(&doc).is_err());
    }
}
