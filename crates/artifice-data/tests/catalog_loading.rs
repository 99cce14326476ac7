//! Loading catalogs and artifact documents from disk, then building them.

use artifice_core::builder::{ArtifactBuilder, BuildError, LORE_PREFIX};
use artifice_core::catalog::{CatalogError, CatalogLookup};
use artifice_core::fixed::f64_to_fixed64;
use artifice_core::hooks::CraftingHooks;
use artifice_core::test_utils::ember_spec;
use artifice_data::loader::{DataLoadError, load_catalog, load_catalog_builder};
use artifice_data::{SpecSyntaxError, load_spec_dir, load_spec_file};
use std::fs;
use std::path::{Path, PathBuf};

fn make_test_dir(suffix: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "artifice_catalog_test_{suffix}_{}",
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn cleanup(dir: &Path) {
    let _ = fs::remove_dir_all(dir);
}

// ===========================================================================
// Content in each format
// ===========================================================================

fn write_json_catalog(dir: &Path) {
    fs::write(
        dir.join("materials.json"),
        r#"[
            {"id": "iron", "durability": 250, "mining_speed": 6.0, "attack": 4.0},
            {"id": "wood", "durability": 60, "mining_speed": 2.0, "attack": 2.0}
        ]"#,
    )
    .unwrap();
    fs::write(
        dir.join("parts.json"),
        r#"[{"id": "pick_head"}, {"id": "tool_rod"}, {"id": "binding"}]"#,
    )
    .unwrap();
    fs::write(
        dir.join("tools.json"),
        r#"[{"id": "pickaxe", "components": [["pick_head"], ["tool_rod"], ["binding"]]}]"#,
    )
    .unwrap();
    fs::write(
        dir.join("modifiers.json"),
        r#"[{"id": "shiny", "durability": 25, "modifier_slots": -1}]"#,
    )
    .unwrap();
}

fn write_ron_catalog(dir: &Path) {
    fs::write(
        dir.join("materials.ron"),
        r#"[
            (id: "iron", durability: 250, mining_speed: 6.0, attack: 4.0),
            (id: "wood", durability: 60, mining_speed: 2.0, attack: 2.0),
        ]"#,
    )
    .unwrap();
    fs::write(
        dir.join("parts.ron"),
        r#"[(id: "pick_head"), (id: "tool_rod"), (id: "binding")]"#,
    )
    .unwrap();
    fs::write(
        dir.join("tools.ron"),
        r#"[(id: "pickaxe", components: [["pick_head"], ["tool_rod"], ["binding"]])]"#,
    )
    .unwrap();
    fs::write(
        dir.join("modifiers.ron"),
        r#"[(id: "shiny", durability: 25, modifier_slots: -1)]"#,
    )
    .unwrap();
}

fn write_toml_catalog(dir: &Path) {
    fs::write(
        dir.join("materials.toml"),
        r#"
[[materials]]
id = "iron"
durability = 250
mining_speed = 6.0
attack = 4.0

[[materials]]
id = "wood"
durability = 60
mining_speed = 2.0
attack = 2.0
"#,
    )
    .unwrap();
    fs::write(
        dir.join("parts.toml"),
        r#"
[[parts]]
id = "pick_head"

[[parts]]
id = "tool_rod"

[[parts]]
id = "binding"
"#,
    )
    .unwrap();
    fs::write(
        dir.join("tools.toml"),
        r#"
[[tools]]
id = "pickaxe"
components = [["pick_head"], ["tool_rod"], ["binding"]]
"#,
    )
    .unwrap();
    fs::write(
        dir.join("modifiers.toml"),
        r#"
[[modifiers]]
id = "shiny"
durability = 25
modifier_slots = -1
"#,
    )
    .unwrap();
}

fn assert_ember_builds(dir: &Path) {
    let catalog = load_catalog(dir).unwrap();
    assert_eq!(catalog.base_type_count(), 1);
    assert_eq!(catalog.material_count(), 2);
    assert!(catalog.modifier("shiny").is_some());

    let hooks = CraftingHooks::new();
    let item = ArtifactBuilder::new(&catalog, &hooks)
        .build(&ember_spec())
        .unwrap();

    let stats = item.stats();
    assert_eq!(stats.durability, 610);
    assert_eq!(stats.mining_speed, f64_to_fixed64(6.0));
    assert_eq!(stats.attack, f64_to_fixed64(4.0));
    assert_eq!(stats.free_modifiers, 2);
    assert!(item.is_artifact());
}

// ===========================================================================
// Catalog loading
// ===========================================================================

#[test]
fn json_catalog_builds_ember() {
    let dir = make_test_dir("json");
    write_json_catalog(&dir);
    assert_ember_builds(&dir);
    cleanup(&dir);
}

#[test]
fn ron_catalog_builds_ember() {
    let dir = make_test_dir("ron");
    write_ron_catalog(&dir);
    assert_ember_builds(&dir);
    cleanup(&dir);
}

#[test]
fn toml_catalog_builds_ember() {
    let dir = make_test_dir("toml");
    write_toml_catalog(&dir);
    assert_ember_builds(&dir);
    cleanup(&dir);
}

#[test]
fn modifiers_file_is_optional() {
    let dir = make_test_dir("no_modifiers");
    write_json_catalog(&dir);
    fs::remove_file(dir.join("modifiers.json")).unwrap();

    let catalog = load_catalog(&dir).unwrap();
    assert!(catalog.modifier("shiny").is_none());
    // Built-ins are always present.
    assert!(catalog.modifier("creative").is_some());

    cleanup(&dir);
}

#[test]
fn tool_defaults_and_overrides() {
    let dir = make_test_dir("tool_fields");
    write_json_catalog(&dir);
    fs::write(
        dir.join("tools.json"),
        r#"[{"id": "club", "components": [["tool_rod"]],
             "durability_multiplier": 2.0, "base_attack": 1.5, "modifier_slots": 1}]"#,
    )
    .unwrap();

    let catalog = load_catalog(&dir).unwrap();
    let hooks = CraftingHooks::new();
    let spec = artifice_core::spec::ArtifactSpec::new("Cudgel", "club", vec!["wood".into()]);
    let item = ArtifactBuilder::new(&catalog, &hooks).build(&spec).unwrap();
    let stats = item.stats();
    assert_eq!(stats.durability, 120);
    assert_eq!(stats.mining_speed, f64_to_fixed64(2.0));
    assert_eq!(stats.attack, f64_to_fixed64(3.5));
    assert_eq!(stats.free_modifiers, 1);

    cleanup(&dir);
}

#[test]
fn host_can_extend_loaded_builder() {
    let dir = make_test_dir("extend");
    write_json_catalog(&dir);

    let mut builder = load_catalog_builder(&dir).unwrap();
    builder
        .register_material(artifice_core::test_utils::obsidian())
        .unwrap();
    let catalog = builder.build();
    assert_eq!(catalog.material_count(), 3);

    cleanup(&dir);
}

// ===========================================================================
// Catalog errors
// ===========================================================================

#[test]
fn missing_required_file() {
    let dir = make_test_dir("missing_tools");
    write_json_catalog(&dir);
    fs::remove_file(dir.join("tools.json")).unwrap();

    let err = load_catalog(&dir).unwrap_err();
    assert!(matches!(err, DataLoadError::MissingRequired { kind: "tools", .. }));

    cleanup(&dir);
}

#[test]
fn unresolved_part_reference() {
    let dir = make_test_dir("unresolved_part");
    write_json_catalog(&dir);
    fs::write(
        dir.join("tools.json"),
        r#"[{"id": "pickaxe", "components": [["pick_head"], ["mystery_rod"]]}]"#,
    )
    .unwrap();

    let err = load_catalog(&dir).unwrap_err();
    assert!(matches!(
        err,
        DataLoadError::UnresolvedRef { ref id, kind: "part", .. } if id == "mystery_rod"
    ));

    cleanup(&dir);
}

#[test]
fn duplicate_part() {
    let dir = make_test_dir("dup_part");
    write_json_catalog(&dir);
    fs::write(dir.join("parts.json"), r#"[{"id": "binding"}, {"id": "binding"}]"#).unwrap();

    let err = load_catalog(&dir).unwrap_err();
    assert!(matches!(err, DataLoadError::DuplicateId { ref id, .. } if id == "binding"));

    cleanup(&dir);
}

#[test]
fn reserved_material_rejected() {
    let dir = make_test_dir("reserved_material");
    write_json_catalog(&dir);
    fs::write(
        dir.join("materials.json"),
        r#"[{"id": "unknown", "durability": 1, "mining_speed": 1.0, "attack": 1.0}]"#,
    )
    .unwrap();

    let err = load_catalog(&dir).unwrap_err();
    match err {
        DataLoadError::Catalog { file, source } => {
            assert_eq!(file, dir.join("materials.json"));
            assert_eq!(source, CatalogError::Reserved("unknown".to_string()));
        }
        other => panic!("expected Catalog error, got {other:?}"),
    }

    cleanup(&dir);
}

#[test]
fn modifier_clashing_with_builtin_rejected() {
    let dir = make_test_dir("builtin_clash");
    write_json_catalog(&dir);
    fs::write(dir.join("modifiers.json"), r#"[{"id": "creative"}]"#).unwrap();

    let err = load_catalog(&dir).unwrap_err();
    assert!(matches!(
        err,
        DataLoadError::Catalog {
            source: CatalogError::Duplicate { kind: "modifier", .. },
            ..
        }
    ));

    cleanup(&dir);
}

#[test]
fn conflicting_formats_rejected() {
    let dir = make_test_dir("conflict");
    write_json_catalog(&dir);
    fs::write(dir.join("parts.ron"), "[]").unwrap();

    let err = load_catalog(&dir).unwrap_err();
    assert!(matches!(err, DataLoadError::ConflictingFormats { .. }));

    cleanup(&dir);
}

// ===========================================================================
// Artifact documents end to end
// ===========================================================================

#[test]
fn toml_document_matches_fixture_spec() {
    let dir = make_test_dir("toml_doc");
    let path = dir.join("ember.toml");
    fs::write(
        &path,
        r#"
name = "Ember"
lore = "Forged in fire"
tool = "pickaxe"
materials = ["iron", "iron", "wood"]
free_mods = 1
mods = [{ id = "shiny", level = 2 }]
"#,
    )
    .unwrap();

    assert_eq!(load_spec_file(&path).unwrap(), ember_spec());

    cleanup(&dir);
}

#[test]
fn ron_document_matches_fixture_spec() {
    let dir = make_test_dir("ron_doc");
    let path = dir.join("ember.ron");
    fs::write(
        &path,
        r#"(
            name: "Ember",
            lore: ["Forged in fire"],
            tool: "pickaxe",
            materials: ["iron", "iron", "wood"],
            free_mods: 1,
            mods: [(id: "shiny", level: 2)],
        )"#,
    )
    .unwrap();

    assert_eq!(load_spec_file(&path).unwrap(), ember_spec());

    cleanup(&dir);
}

#[test]
fn spec_dir_builds_against_loaded_catalog() {
    let content = make_test_dir("e2e_content");
    write_toml_catalog(&content);
    let specs_dir = make_test_dir("e2e_specs");
    fs::write(
        specs_dir.join("01_ember.json"),
        r#"{"name": "Ember", "lore": "Forged in fire", "tool": "pickaxe",
            "materials": ["iron", "iron", "wood"], "free_mods": 1,
            "mods": [{"id": "shiny", "level": 2}],
            "data_tag": {"Unbreakable": 1}}"#,
    )
    .unwrap();
    fs::write(
        specs_dir.join("02_splinter.json"),
        r#"{"name": "Splinter", "tool": "pickaxe", "materials": ["wood", "wood"]}"#,
    )
    .unwrap();

    let catalog = load_catalog(&content).unwrap();
    let specs = load_spec_dir(&specs_dir).unwrap();
    let hooks = CraftingHooks::new();
    let builder = ArtifactBuilder::new(&catalog, &hooks);
    let results = builder.build_all(specs.iter().map(|(_, spec)| spec));

    let ember = results[0].as_ref().unwrap();
    let lore_line = format!("{LORE_PREFIX}Forged in fire");
    assert_eq!(ember.lore(), Some(vec!["", lore_line.as_str()]));
    assert_eq!(ember.tag().get("Unbreakable"), Some(&serde_json::json!(1)));

    assert_eq!(
        results[1],
        Err(BuildError::MaterialCount {
            base_type: "pickaxe".to_string(),
            expected: 3,
            actual: 2,
        })
    );

    cleanup(&content);
    cleanup(&specs_dir);
}

#[test]
fn spec_dir_fails_on_first_bad_document() {
    let dir = make_test_dir("bad_dir");
    fs::write(
        dir.join("a.json"),
        r#"{"name": "Fine", "tool": "hatchet", "materials": ["iron", "wood"]}"#,
    )
    .unwrap();
    fs::write(
        dir.join("b.json"),
        r#"{"name": "Bad", "tool": "hatchet", "materials": ["iron", "wood"], "mods": [7]}"#,
    )
    .unwrap();

    let err = load_spec_dir(&dir).unwrap_err();
    match err {
        DataLoadError::Syntax { file, source } => {
            assert_eq!(file, dir.join("b.json"));
            assert!(matches!(source, SpecSyntaxError::BadElement { field: "mods", .. }));
        }
        other => panic!("expected Syntax error, got {other:?}"),
    }

    cleanup(&dir);
}

// ===========================================================================
// Bundled demo content
// ===========================================================================

#[test]
fn demo_content_builds() {
    let demos = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos");
    let catalog = load_catalog(&demos.join("content")).unwrap();
    let specs = load_spec_dir(&demos.join("specs")).unwrap();
    assert_eq!(specs.len(), 3);

    let hooks = CraftingHooks::new();
    let builder = ArtifactBuilder::new(&catalog, &hooks);
    for (path, spec) in &specs {
        let item = builder
            .build(spec)
            .unwrap_or_else(|e| panic!("{}: {e}", path.display()));
        assert!(item.is_artifact());
    }
}
