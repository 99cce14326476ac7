//! Modifiers: the [`Modifier`] capability trait, the data-driven
//! [`StatModifier`], and the two built-ins every build uses.

use crate::item::{StatBonus, ToolItem};

/// Identifier of the built-in free bonus.
pub const CREATIVE_MODIFIER: &str = "creative";

/// Identifier of the marker applied to every finished artifact.
pub const ARTIFACT_MODIFIER: &str = "artifact";

/// A named transformation applicable to an item.
///
/// `apply` is called once per level; implementations must tolerate
/// repeated application.
pub trait Modifier: std::fmt::Debug + Send + Sync {
    fn identifier(&self) -> &str;

    fn apply(&self, item: &mut ToolItem);
}

/// A modifier that adds a fixed [`StatBonus`] per application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatModifier {
    pub identifier: String,
    pub bonus: StatBonus,
}

impl StatModifier {
    pub fn new(identifier: impl Into<String>, bonus: StatBonus) -> Self {
        Self {
            identifier: identifier.into(),
            bonus,
        }
    }
}

impl Modifier for StatModifier {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn apply(&self, item: &mut ToolItem) {
        item.add_modifier_level(&self.identifier, &self.bonus);
    }
}

/// Grants one extra free modifier slot per application.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreativeBonus;

impl Modifier for CreativeBonus {
    fn identifier(&self) -> &str {
        CREATIVE_MODIFIER
    }

    fn apply(&self, item: &mut ToolItem) {
        let bonus = StatBonus {
            modifier_slots: 1,
            ..Default::default()
        };
        item.add_modifier_level(CREATIVE_MODIFIER, &bonus);
    }
}

/// Marks an item as an artifact. Idempotent.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArtifactMarker;

impl Modifier for ArtifactMarker {
    fn identifier(&self) -> &str {
        ARTIFACT_MODIFIER
    }

    fn apply(&self, item: &mut ToolItem) {
        if item.modifier_level(ARTIFACT_MODIFIER) == 0 {
            item.add_modifier_level(ARTIFACT_MODIFIER, &StatBonus::default());
        }
    }
}

impl ToolItem {
    pub fn is_artifact(&self) -> bool {
        self.modifier_level(ARTIFACT_MODIFIER) > 0
    }
}
