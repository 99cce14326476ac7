//! The validated, immutable description of one artifact.

use crate::item::Tag;

/// A modifier to apply, with the number of times to apply it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifierSpec {
    pub id: String,
    pub level: u32,
}

impl ModifierSpec {
    pub fn new(id: impl Into<String>, level: u32) -> Self {
        Self {
            id: id.into(),
            level,
        }
    }
}

/// Everything needed to build one artifact.
///
/// Constructed through [`ArtifactSpec::new`] and the `with_*` methods and
/// never mutated afterwards; the builder only ever borrows it.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactSpec {
    name: String,
    lore: Vec<String>,
    base_type: String,
    materials: Vec<String>,
    free_modifiers: u32,
    modifiers: Vec<ModifierSpec>,
    data_tag: Option<Tag>,
}

impl ArtifactSpec {
    pub fn new(
        name: impl Into<String>,
        base_type: impl Into<String>,
        materials: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            lore: Vec::new(),
            base_type: base_type.into(),
            materials,
            free_modifiers: 0,
            modifiers: Vec::new(),
            data_tag: None,
        }
    }

    pub fn with_lore(mut self, lore: Vec<String>) -> Self {
        self.lore = lore;
        self
    }

    pub fn with_free_modifiers(mut self, count: u32) -> Self {
        self.free_modifiers = count;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Vec<ModifierSpec>) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_data_tag(mut self, data_tag: Option<Tag>) -> Self {
        self.data_tag = data_tag;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lore(&self) -> &[String] {
        &self.lore
    }

    pub fn base_type(&self) -> &str {
        &self.base_type
    }

    pub fn materials(&self) -> &[String] {
        &self.materials
    }

    pub fn free_modifiers(&self) -> u32 {
        self.free_modifiers
    }

    /// Modifiers in application order.
    pub fn modifiers(&self) -> &[ModifierSpec] {
        &self.modifiers
    }

    pub fn data_tag(&self) -> Option<&Tag> {
        self.data_tag.as_ref()
    }
}
