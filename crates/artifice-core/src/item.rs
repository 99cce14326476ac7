//! The constructed item model.
//!
//! A [`ToolItem`] is a base-type identifier plus a persisted [`Tag`]: a JSON
//! object holding everything the build pipeline writes (display metadata,
//! stats, modifier records). Hosts that persist items store the tag as-is.

use crate::fixed::Fixed64;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Persisted structured data of an item.
pub type Tag = Map<String, Value>;

// ---------------------------------------------------------------------------
// Well-known tag keys
// ---------------------------------------------------------------------------

pub const TAG_DISPLAY: &str = "display";
pub const TAG_NAME: &str = "Name";
pub const TAG_LORE: &str = "Lore";
pub const TAG_STATS: &str = "Stats";
pub const TAG_STATS_ORIGINAL: &str = "StatsOriginal";
pub const TAG_MODIFIERS: &str = "Modifiers";
pub const TAG_TINKER_DATA: &str = "TinkerData";
pub const TAG_MATERIALS: &str = "Materials";
pub const TAG_BASE_TYPE: &str = "BaseType";

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Numeric stats of a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ToolStats {
    pub durability: u32,
    pub mining_speed: Fixed64,
    pub attack: Fixed64,
    pub free_modifiers: i32,
}

impl ToolStats {
    /// Apply a bonus. Durability never drops below zero.
    pub fn with_bonus(self, bonus: &StatBonus) -> Self {
        Self {
            durability: self.durability.saturating_add_signed(bonus.durability),
            mining_speed: self.mining_speed.saturating_add(bonus.mining_speed),
            attack: self.attack.saturating_add(bonus.attack),
            free_modifiers: self.free_modifiers.saturating_add(bonus.modifier_slots),
        }
    }
}

/// Signed stat deltas contributed by a modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatBonus {
    #[serde(default)]
    pub durability: i32,
    #[serde(default)]
    pub mining_speed: Fixed64,
    #[serde(default)]
    pub attack: Fixed64,
    #[serde(default)]
    pub modifier_slots: i32,
}

impl StatBonus {
    pub fn accumulate(&mut self, other: &StatBonus) {
        self.durability = self.durability.saturating_add(other.durability);
        self.mining_speed = self.mining_speed.saturating_add(other.mining_speed);
        self.attack = self.attack.saturating_add(other.attack);
        self.modifier_slots = self.modifier_slots.saturating_add(other.modifier_slots);
    }
}

/// One entry of the item's modifier list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifierRecord {
    pub identifier: String,
    pub level: u32,
    /// Total bonus over all applications so far.
    #[serde(default)]
    pub bonus: StatBonus,
}

// ---------------------------------------------------------------------------
// ToolItem
// ---------------------------------------------------------------------------

/// A constructed item instance.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToolItem {
    base_type: String,
    tag: Tag,
}

impl ToolItem {
    pub fn new(base_type: impl Into<String>) -> Self {
        Self {
            base_type: base_type.into(),
            tag: Tag::new(),
        }
    }

    pub fn base_type(&self) -> &str {
        &self.base_type
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    pub fn tag_mut(&mut self) -> &mut Tag {
        &mut self.tag
    }

    pub fn into_tag(self) -> Tag {
        self.tag
    }

    /// Nested compound under `key`, if present and an object.
    pub fn compound(&self, key: &str) -> Option<&Tag> {
        self.tag.get(key).and_then(Value::as_object)
    }

    /// Nested compound under `key`, created if absent. A non-object value
    /// under that key is replaced.
    pub fn compound_mut(&mut self, key: &str) -> &mut Tag {
        let entry = self
            .tag
            .entry(key.to_string())
            .or_insert_with(|| Value::Object(Tag::new()));
        if !entry.is_object() {
            *entry = Value::Object(Tag::new());
        }
        match entry {
            Value::Object(map) => map,
            _ => unreachable!("entry was just made an object"),
        }
    }

    // -- Display ------------------------------------------------------------

    pub fn set_display_name(&mut self, name: &str) {
        self.compound_mut(TAG_DISPLAY)
            .insert(TAG_NAME.to_string(), Value::String(name.to_string()));
    }

    pub fn display_name(&self) -> Option<&str> {
        self.compound(TAG_DISPLAY)?.get(TAG_NAME)?.as_str()
    }

    /// Lore lines, or `None` when no lore key exists.
    pub fn lore(&self) -> Option<Vec<&str>> {
        let lines = self.compound(TAG_DISPLAY)?.get(TAG_LORE)?.as_array()?;
        Some(lines.iter().filter_map(Value::as_str).collect())
    }

    pub fn set_lore(&mut self, lines: Vec<String>) {
        let lore = lines.into_iter().map(Value::String).collect();
        self.compound_mut(TAG_DISPLAY)
            .insert(TAG_LORE.to_string(), Value::Array(lore));
    }

    // -- Stats --------------------------------------------------------------

    /// Stats as computed by the base type, before any modifier.
    pub fn original_stats(&self) -> ToolStats {
        self.read(TAG_STATS_ORIGINAL).unwrap_or_default()
    }

    pub fn set_original_stats(&mut self, stats: ToolStats) {
        self.write(TAG_STATS_ORIGINAL, &stats);
    }

    /// Derived stats as of the last [`rebuild`](Self::rebuild).
    pub fn stats(&self) -> ToolStats {
        self.read(TAG_STATS).unwrap_or_default()
    }

    // -- Modifiers ----------------------------------------------------------

    /// Modifier records in the order they were first applied. Malformed
    /// entries are skipped.
    pub fn modifiers(&self) -> Vec<ModifierRecord> {
        self.tag
            .get(TAG_MODIFIERS)
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|e| serde_json::from_value(e.clone()).ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn modifier_level(&self, identifier: &str) -> u32 {
        self.modifiers()
            .iter()
            .find(|r| r.identifier == identifier)
            .map(|r| r.level)
            .unwrap_or(0)
    }

    /// Record one application of a modifier: bump its level and add the bonus.
    pub fn add_modifier_level(&mut self, identifier: &str, bonus: &StatBonus) {
        let mut records = self.modifiers();
        match records.iter_mut().find(|r| r.identifier == identifier) {
            Some(record) => {
                record.level += 1;
                record.bonus.accumulate(bonus);
            }
            None => records.push(ModifierRecord {
                identifier: identifier.to_string(),
                level: 1,
                bonus: *bonus,
            }),
        }
        self.write(TAG_MODIFIERS, &records);
    }

    /// Recompute derived stats from the original stats and every modifier
    /// record.
    pub fn rebuild(&mut self) {
        let stats = self
            .modifiers()
            .iter()
            .fold(self.original_stats(), |stats, r| stats.with_bonus(&r.bonus));
        self.write(TAG_STATS, &stats);
    }

    // -- Merging ------------------------------------------------------------

    /// Merge `data` into the tag. Objects merge key by key; any other value
    /// replaces what was there.
    pub fn merge_tag(&mut self, data: &Tag) {
        merge_into(&mut self.tag, data);
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.tag
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    fn write<T: Serialize>(&mut self, key: &str, value: &T) {
        match serde_json::to_value(value) {
            Ok(v) => {
                self.tag.insert(key.to_string(), v);
            }
            Err(e) => tracing::error!("failed to encode tag key {key}: {e}"),
        }
    }
}

fn merge_into(target: &mut Tag, source: &Tag) {
    for (key, value) in source {
        if let (Some(Value::Object(existing)), Value::Object(incoming)) =
            (target.get_mut(key), value)
        {
            merge_into(existing, incoming);
            continue;
        }
        target.insert(key.clone(), value.clone());
    }
}
