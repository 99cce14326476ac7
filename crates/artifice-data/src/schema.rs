//! Serde data file structs for catalog content.
//!
//! These structs define the on-disk format for materials, parts, tool types
//! and stat modifiers. They are deserialized from RON, JSON, or TOML files and
//! then resolved into catalog entries by the loader.

use serde::Deserialize;

// ===========================================================================
// Materials and parts
// ===========================================================================

/// A material definition in a data file.
#[derive(Debug, Clone, Deserialize)]
pub struct MaterialData {
    pub id: String,
    pub durability: u32,
    pub mining_speed: f64,
    pub attack: f64,
}

/// A part kind. Tool components reference these by id.
#[derive(Debug, Clone, Deserialize)]
pub struct PartData {
    pub id: String,
}

// ===========================================================================
// Tools
// ===========================================================================

/// A tool base type. Each entry of `components` is one slot, listing the
/// part ids that may fill it (first one wins at build time).
#[derive(Debug, Clone, Deserialize)]
pub struct ToolData {
    pub id: String,
    pub components: Vec<Vec<String>>,
    #[serde(default = "default_multiplier")]
    pub durability_multiplier: f64,
    #[serde(default = "default_multiplier")]
    pub speed_multiplier: f64,
    #[serde(default)]
    pub base_attack: f64,
    #[serde(default = "default_modifier_slots")]
    pub modifier_slots: i32,
}

fn default_multiplier() -> f64 {
    1.0
}

fn default_modifier_slots() -> i32 {
    3
}

// ===========================================================================
// Modifiers
// ===========================================================================

/// A stat modifier. Every field is a per-level delta.
#[derive(Debug, Clone, Deserialize)]
pub struct ModifierData {
    pub id: String,
    #[serde(default)]
    pub durability: i32,
    #[serde(default)]
    pub mining_speed: f64,
    #[serde(default)]
    pub attack: f64,
    #[serde(default)]
    pub modifier_slots: i32,
}
