//! Base types: component slots, part kinds, and the data-driven
//! [`ToolDefinition`].

use crate::fixed::{Fixed64, saturating_mul_64};
use crate::item::{TAG_BASE_TYPE, TAG_MATERIALS, TAG_TINKER_DATA, ToolItem, ToolStats};
use crate::material::Material;
use serde_json::Value;

// ---------------------------------------------------------------------------
// Parts and slots
// ---------------------------------------------------------------------------

/// A kind of part that can fill a component slot, e.g. a pick head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartKind {
    pub identifier: String,
}

impl PartKind {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
        }
    }

    /// A component of this kind made from `material`.
    pub fn stack_with_material(&self, material: &Material) -> ComponentStack {
        ComponentStack {
            part: self.identifier.clone(),
            material: material.identifier.clone(),
        }
    }
}

/// A part instantiated with a material. Handed to crafting hooks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentStack {
    pub part: String,
    pub material: String,
}

/// One positional requirement of a base type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComponentSlot {
    candidates: Vec<PartKind>,
}

impl ComponentSlot {
    pub fn new(candidates: Vec<PartKind>) -> Self {
        Self { candidates }
    }

    /// Candidate parts in registration order. May be empty.
    pub fn candidate_parts(&self) -> &[PartKind] {
        &self.candidates
    }
}

// ---------------------------------------------------------------------------
// BaseType trait
// ---------------------------------------------------------------------------

/// A constructible item archetype.
///
/// Implementations are registered in a [`CatalogBuilder`](crate::catalog::CatalogBuilder)
/// and looked up by identifier.
pub trait BaseType: std::fmt::Debug + Send + Sync {
    fn identifier(&self) -> &str;

    /// Component slots, in the order materials are given.
    fn required_components(&self) -> &[ComponentSlot];

    /// Build a raw item from one material per slot.
    fn build_item(&self, materials: &[&Material]) -> ToolItem;
}

// ---------------------------------------------------------------------------
// ToolDefinition
// ---------------------------------------------------------------------------

/// A base type defined entirely by data.
///
/// Durability is the sum of all material durabilities scaled by
/// `durability_multiplier`. Mining speed and attack come from the head
/// material (slot 0).
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDefinition {
    pub identifier: String,
    pub components: Vec<ComponentSlot>,
    pub durability_multiplier: Fixed64,
    pub speed_multiplier: Fixed64,
    pub base_attack: Fixed64,
    pub modifier_slots: i32,
}

impl ToolDefinition {
    pub fn new(identifier: impl Into<String>, components: Vec<ComponentSlot>) -> Self {
        Self {
            identifier: identifier.into(),
            components,
            durability_multiplier: Fixed64::ONE,
            speed_multiplier: Fixed64::ONE,
            base_attack: Fixed64::ZERO,
            modifier_slots: 3,
        }
    }

    fn compute_stats(&self, materials: &[&Material]) -> ToolStats {
        let total: u64 = materials.iter().map(|m| u64::from(m.durability)).sum();
        let durability = saturating_mul_64(
            Fixed64::saturating_from_num(total),
            self.durability_multiplier,
        )
        .max(Fixed64::ZERO)
        .saturating_to_num::<u32>();

        let (speed, attack) = materials
            .first()
            .map(|head| (head.mining_speed, head.attack))
            .unwrap_or((Fixed64::ZERO, Fixed64::ZERO));

        ToolStats {
            durability,
            mining_speed: saturating_mul_64(speed, self.speed_multiplier),
            attack: attack.saturating_add(self.base_attack),
            free_modifiers: self.modifier_slots,
        }
    }
}

impl BaseType for ToolDefinition {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn required_components(&self) -> &[ComponentSlot] {
        &self.components
    }

    fn build_item(&self, materials: &[&Material]) -> ToolItem {
        let mut item = ToolItem::new(self.identifier.clone());

        let data = item.compound_mut(TAG_TINKER_DATA);
        data.insert(
            TAG_BASE_TYPE.to_string(),
            Value::String(self.identifier.clone()),
        );
        data.insert(
            TAG_MATERIALS.to_string(),
            Value::Array(
                materials
                    .iter()
                    .map(|m| Value::String(m.identifier.clone()))
                    .collect(),
            ),
        );

        item.set_original_stats(self.compute_stats(materials));
        item.rebuild();
        item
    }
}
