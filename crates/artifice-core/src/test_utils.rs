//! Shared test fixtures for unit and integration tests.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so downstream
//! crates can use them from their own tests via the `test-utils` feature.

use crate::catalog::{Catalog, CatalogBuilder, CatalogLookup};
use crate::fixed::{Fixed64, f64_to_fixed64};
use crate::item::{StatBonus, ToolItem};
use crate::material::Material;
use crate::modifier::{Modifier, StatModifier};
use crate::spec::{ArtifactSpec, ModifierSpec};
use crate::tool::{BaseType, ComponentSlot, PartKind, ToolDefinition};
use std::cell::Cell;
use std::sync::{Arc, Mutex};

// ===========================================================================
// Materials
// ===========================================================================

pub fn iron() -> Material {
    Material::new("iron", 250, f64_to_fixed64(6.0), f64_to_fixed64(4.0))
}
pub fn wood() -> Material {
    Material::new("wood", 60, f64_to_fixed64(2.0), f64_to_fixed64(2.0))
}
pub fn stone() -> Material {
    Material::new("stone", 130, f64_to_fixed64(4.0), f64_to_fixed64(3.0))
}
pub fn obsidian() -> Material {
    Material::new("obsidian", 800, f64_to_fixed64(7.0), f64_to_fixed64(4.5))
}

// ===========================================================================
// Base types
// ===========================================================================

fn slot(parts: &[&str]) -> ComponentSlot {
    ComponentSlot::new(parts.iter().map(|p| PartKind::new(*p)).collect())
}

/// Three slots: head, rod, binding (binding accepts two part kinds).
pub fn pickaxe() -> ToolDefinition {
    ToolDefinition::new(
        "pickaxe",
        vec![
            slot(&["pick_head"]),
            slot(&["tool_rod"]),
            slot(&["binding", "tough_binding"]),
        ],
    )
}

pub fn sword() -> ToolDefinition {
    let mut def = ToolDefinition::new(
        "sword",
        vec![slot(&["sword_blade"]), slot(&["wide_guard"]), slot(&["tool_rod"])],
    );
    def.base_attack = f64_to_fixed64(2.0);
    def.durability_multiplier = f64_to_fixed64(1.1);
    def
}

pub fn hatchet() -> ToolDefinition {
    ToolDefinition::new("hatchet", vec![slot(&["axe_head"]), slot(&["tool_rod"])])
}

/// A base type with no components at all.
pub fn blank() -> ToolDefinition {
    ToolDefinition::new("blank", vec![])
}

/// A base type whose second slot has no candidate parts.
pub fn broken_tool() -> ToolDefinition {
    ToolDefinition::new("broken_tool", vec![slot(&["pick_head"]), slot(&[])])
}

// ===========================================================================
// Modifiers
// ===========================================================================

pub fn shiny() -> StatModifier {
    StatModifier::new(
        "shiny",
        StatBonus {
            durability: 25,
            modifier_slots: -1,
            ..Default::default()
        },
    )
}

pub fn haste() -> StatModifier {
    StatModifier::new(
        "haste",
        StatBonus {
            mining_speed: f64_to_fixed64(0.5),
            modifier_slots: -1,
            ..Default::default()
        },
    )
}

pub fn sharp() -> StatModifier {
    StatModifier::new(
        "sharp",
        StatBonus {
            attack: Fixed64::ONE,
            modifier_slots: -1,
            ..Default::default()
        },
    )
}

/// A modifier that logs every application to a shared journal.
#[derive(Debug, Clone)]
pub struct RecordingModifier {
    pub identifier: String,
    pub journal: Arc<Mutex<Vec<String>>>,
}

impl RecordingModifier {
    pub fn new(identifier: &str, journal: &Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            identifier: identifier.to_string(),
            journal: Arc::clone(journal),
        }
    }
}

impl Modifier for RecordingModifier {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn apply(&self, item: &mut ToolItem) {
        if let Ok(mut journal) = self.journal.lock() {
            journal.push(self.identifier.clone());
        }
        item.add_modifier_level(&self.identifier, &StatBonus::default());
    }
}

// ===========================================================================
// Catalogs
// ===========================================================================

/// A builder pre-populated with every fixture above.
pub fn fixture_catalog_builder() -> CatalogBuilder {
    let mut b = CatalogBuilder::new();
    for material in [iron(), wood(), stone(), obsidian()] {
        b.register_material(material).unwrap();
    }
    for tool in [pickaxe(), sword(), hatchet(), blank(), broken_tool()] {
        b.register_base_type(tool).unwrap();
    }
    for modifier in [shiny(), haste(), sharp()] {
        b.register_modifier(modifier).unwrap();
    }
    b
}

pub fn fixture_catalog() -> Catalog {
    fixture_catalog_builder().build()
}

/// Wraps a catalog and counts lookups per category.
#[derive(Debug)]
pub struct CountingCatalog<'a> {
    inner: &'a Catalog,
    pub base_type_lookups: Cell<usize>,
    pub material_lookups: Cell<usize>,
    pub modifier_lookups: Cell<usize>,
}

impl<'a> CountingCatalog<'a> {
    pub fn new(inner: &'a Catalog) -> Self {
        Self {
            inner,
            base_type_lookups: Cell::new(0),
            material_lookups: Cell::new(0),
            modifier_lookups: Cell::new(0),
        }
    }
}

impl CatalogLookup for CountingCatalog<'_> {
    fn base_type(&self, identifier: &str) -> Option<&dyn BaseType> {
        self.base_type_lookups.set(self.base_type_lookups.get() + 1);
        self.inner.base_type(identifier)
    }

    fn material(&self, identifier: &str) -> &Material {
        self.material_lookups.set(self.material_lookups.get() + 1);
        self.inner.material(identifier)
    }

    fn modifier(&self, identifier: &str) -> Option<&dyn Modifier> {
        self.modifier_lookups.set(self.modifier_lookups.get() + 1);
        self.inner.modifier(identifier)
    }
}

// ===========================================================================
// Specs
// ===========================================================================

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The "Ember" pickaxe: iron/iron/wood, one free bonus, shiny x2, one lore
/// line.
pub fn ember_spec() -> ArtifactSpec {
    ArtifactSpec::new("Ember", "pickaxe", strings(&["iron", "iron", "wood"]))
        .with_lore(strings(&["Forged in fire"]))
        .with_free_modifiers(1)
        .with_modifiers(vec![ModifierSpec::new("shiny", 2)])
}
