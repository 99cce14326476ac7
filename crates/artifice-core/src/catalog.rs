use crate::material::{Material, UNKNOWN_MATERIAL};
use crate::modifier::{ArtifactMarker, CreativeBonus, Modifier};
use crate::tool::BaseType;
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Lookup trait
// ---------------------------------------------------------------------------

/// Read access to the three catalogs the build pipeline consumes.
///
/// Base types and modifiers report a miss as `None`. Materials follow a
/// different convention: a miss returns the sentinel material, for which
/// [`Material::is_unknown`] is true.
pub trait CatalogLookup {
    fn base_type(&self, identifier: &str) -> Option<&dyn BaseType>;

    fn material(&self, identifier: &str) -> &Material;

    fn modifier(&self, identifier: &str) -> Option<&dyn Modifier>;
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Builder for constructing an immutable [`Catalog`].
/// Two-phase lifecycle: registration -> finalization.
///
/// The built-in `creative` and `artifact` modifiers are registered up front
/// so specs can name them like any other modifier.
#[derive(Debug)]
pub struct CatalogBuilder {
    base_types: Vec<Box<dyn BaseType>>,
    materials: Vec<Material>,
    material_index: HashMap<String, usize>,
    modifiers: Vec<Box<dyn Modifier>>,
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self {
            base_types: Vec::new(),
            materials: Vec::new(),
            material_index: HashMap::new(),
            modifiers: vec![Box::new(CreativeBonus), Box::new(ArtifactMarker)],
        }
    }

    /// Register a base type. Identifiers must be unique.
    pub fn register_base_type(
        &mut self,
        base_type: impl BaseType + 'static,
    ) -> Result<(), CatalogError> {
        if self.has_base_type(base_type.identifier()) {
            return Err(CatalogError::Duplicate {
                kind: "base type",
                identifier: base_type.identifier().to_string(),
            });
        }
        self.base_types.push(Box::new(base_type));
        Ok(())
    }

    /// Register a material. The sentinel identifier is reserved.
    pub fn register_material(&mut self, material: Material) -> Result<(), CatalogError> {
        if material.identifier == UNKNOWN_MATERIAL {
            return Err(CatalogError::Reserved(material.identifier));
        }
        if self.material_index.contains_key(&material.identifier) {
            return Err(CatalogError::Duplicate {
                kind: "material",
                identifier: material.identifier,
            });
        }
        self.material_index
            .insert(material.identifier.clone(), self.materials.len());
        self.materials.push(material);
        Ok(())
    }

    /// Register a modifier. Identifiers must be unique, including against
    /// the built-ins.
    pub fn register_modifier(
        &mut self,
        modifier: impl Modifier + 'static,
    ) -> Result<(), CatalogError> {
        if self.has_modifier(modifier.identifier()) {
            return Err(CatalogError::Duplicate {
                kind: "modifier",
                identifier: modifier.identifier().to_string(),
            });
        }
        self.modifiers.push(Box::new(modifier));
        Ok(())
    }

    pub fn has_base_type(&self, identifier: &str) -> bool {
        self.base_types.iter().any(|t| t.identifier() == identifier)
    }

    pub fn has_material(&self, identifier: &str) -> bool {
        self.material_index.contains_key(identifier)
    }

    pub fn has_modifier(&self, identifier: &str) -> bool {
        self.modifiers.iter().any(|m| m.identifier() == identifier)
    }

    /// Finalize into the immutable catalog.
    pub fn build(self) -> Catalog {
        Catalog {
            base_types: self.base_types,
            materials: self.materials,
            material_index: self.material_index,
            modifiers: self.modifiers,
            unknown: Material::unknown(),
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Immutable catalog. Frozen after build(). Thread-safe to share.
#[derive(Debug)]
pub struct Catalog {
    base_types: Vec<Box<dyn BaseType>>,
    materials: Vec<Material>,
    material_index: HashMap<String, usize>,
    modifiers: Vec<Box<dyn Modifier>>,
    unknown: Material,
}

impl Catalog {
    pub fn base_type_count(&self) -> usize {
        self.base_types.len()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// Includes the built-in modifiers.
    pub fn modifier_count(&self) -> usize {
        self.modifiers.len()
    }

    pub fn base_type_ids(&self) -> impl Iterator<Item = &str> {
        self.base_types.iter().map(|t| t.identifier())
    }

    pub fn material_ids(&self) -> impl Iterator<Item = &str> {
        self.materials.iter().map(|m| m.identifier.as_str())
    }

    pub fn modifier_ids(&self) -> impl Iterator<Item = &str> {
        self.modifiers.iter().map(|m| m.identifier())
    }
}

impl CatalogLookup for Catalog {
    fn base_type(&self, identifier: &str) -> Option<&dyn BaseType> {
        self.base_types
            .iter()
            .find(|t| t.identifier() == identifier)
            .map(|t| t.as_ref())
    }

    fn material(&self, identifier: &str) -> &Material {
        self.material_index
            .get(identifier)
            .map(|&i| &self.materials[i])
            .unwrap_or(&self.unknown)
    }

    fn modifier(&self, identifier: &str) -> Option<&dyn Modifier> {
        self.modifiers
            .iter()
            .find(|m| m.identifier() == identifier)
            .map(|m| m.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate {kind} \"{identifier}\"")]
    Duplicate {
        kind: &'static str,
        identifier: String,
    },
    #[error("identifier \"{0}\" is reserved")]
    Reserved(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed::f64_to_fixed64;
    use crate::item::StatBonus;
    use crate::modifier::{ARTIFACT_MODIFIER, CREATIVE_MODIFIER, StatModifier};
    use crate::tool::{ComponentSlot, PartKind, ToolDefinition};

    fn iron() -> Material {
        Material::new("iron", 200, f64_to_fixed64(6.0), f64_to_fixed64(4.0))
    }

    fn setup_builder() -> CatalogBuilder {
        let mut b = CatalogBuilder::new();
        b.register_material(iron()).unwrap();
        b.register_base_type(ToolDefinition::new(
            "pickaxe",
            vec![ComponentSlot::new(vec![PartKind::new("pick_head")])],
        ))
        .unwrap();
        b.register_modifier(StatModifier::new("shiny", StatBonus::default()))
            .unwrap();
        b
    }

    #[test]
    fn register_and_build() {
        let catalog = setup_builder().build();
        assert_eq!(catalog.base_type_count(), 1);
        assert_eq!(catalog.material_count(), 1);
        assert_eq!(catalog.modifier_count(), 3);
    }

    #[test]
    fn lookup_by_identifier() {
        let catalog = setup_builder().build();
        assert_eq!(catalog.base_type("pickaxe").unwrap().identifier(), "pickaxe");
        assert!(catalog.base_type("shovel").is_none());
        assert_eq!(catalog.modifier("shiny").unwrap().identifier(), "shiny");
        assert!(catalog.modifier("missing").is_none());
        assert_eq!(catalog.material("iron"), &iron());
    }

    #[test]
    fn missing_material_returns_sentinel() {
        let catalog = setup_builder().build();
        let m = catalog.material("mithril");
        assert!(m.is_unknown());
        assert_eq!(m.identifier, UNKNOWN_MATERIAL);
    }

    #[test]
    fn builtins_are_registered() {
        let catalog = CatalogBuilder::new().build();
        let ids: Vec<&str> = catalog.modifier_ids().collect();
        assert_eq!(ids, vec![CREATIVE_MODIFIER, ARTIFACT_MODIFIER]);
    }

    #[test]
    fn duplicate_material_fails() {
        let mut b = setup_builder();
        let result = b.register_material(iron());
        assert_eq!(
            result,
            Err(CatalogError::Duplicate {
                kind: "material",
                identifier: "iron".to_string()
            })
        );
    }

    #[test]
    fn duplicate_base_type_fails() {
        let mut b = setup_builder();
        let result = b.register_base_type(ToolDefinition::new("pickaxe", vec![]));
        assert!(matches!(result, Err(CatalogError::Duplicate { kind: "base type", .. })));
    }

    #[test]
    fn builtin_modifier_cannot_be_shadowed() {
        let mut b = CatalogBuilder::new();
        let result = b.register_modifier(StatModifier::new(ARTIFACT_MODIFIER, StatBonus::default()));
        assert!(matches!(result, Err(CatalogError::Duplicate { kind: "modifier", .. })));
    }

    #[test]
    fn sentinel_identifier_is_reserved() {
        let mut b = CatalogBuilder::new();
        let result = b.register_material(Material::unknown());
        assert_eq!(result, Err(CatalogError::Reserved("unknown".to_string())));
        let msg = format!("{}", result.unwrap_err());
        assert!(msg.contains("reserved"), "got: {msg}");
    }

    #[test]
    fn empty_catalog_builds_successfully() {
        let catalog = CatalogBuilder::new().build();
        assert_eq!(catalog.base_type_count(), 0);
        assert_eq!(catalog.material_count(), 0);
        assert_eq!(catalog.base_type_ids().count(), 0);
        assert_eq!(catalog.material_ids().count(), 0);
    }

    #[test]
    fn catalog_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Catalog>();
    }
}
