//! The artifact build pipeline.
//!
//! [`ArtifactBuilder::build`] turns an [`ArtifactSpec`] into a finished
//! [`ToolItem`] in fixed phases:
//!
//! 1. **Resolve** the base type, check the material count against its
//!    component slots, and resolve every material.
//! 2. **Assemble** one component stack per slot from the slot's first
//!    candidate part and the matching material.
//! 3. **Construct** the raw item, name it, fire the crafting hook, and take
//!    the pre-modifier snapshot.
//! 4. **Modify** with the free bonus, then each named modifier in order.
//! 5. **Finalize**: fire the modify hook, mark as artifact, rebuild stats.
//! 6. **Decorate** with lore and the extra data tag.
//!
//! The first failure aborts the build; no partially built item escapes.

use crate::catalog::CatalogLookup;
use crate::hooks::{CraftingHooks, ToolCraftingEvent, ToolModifyEvent};
use crate::item::ToolItem;
use crate::material::Material;
use crate::modifier::{ArtifactMarker, CreativeBonus, Modifier};
use crate::spec::{ArtifactSpec, ModifierSpec};
use crate::tool::{BaseType, ComponentStack};
use tracing::{debug, info, warn};

/// Prefix of every artifact's display name (gold text).
pub const ARTIFACT_NAME_PREFIX: &str = "\u{a7}6";

/// Prefix of every lore line (dark purple, italic).
pub const LORE_PREFIX: &str = "\u{a7}5\u{a7}o";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a spec could not be built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("unknown base type \"{0}\"")]
    UnknownBaseType(String),

    #[error("needed {expected} materials but got {actual} for base type \"{base_type}\"")]
    MaterialCount {
        base_type: String,
        expected: usize,
        actual: usize,
    },

    #[error("unknown material \"{0}\"")]
    UnknownMaterial(String),

    #[error("unsatisfiable component slot {slot} for base type \"{base_type}\"")]
    UnsatisfiableSlot { slot: usize, base_type: String },

    #[error("unknown modifier \"{0}\"")]
    UnknownModifier(String),

    #[error("tool building produced error: {0}")]
    CraftingRejected(String),

    #[error("tool modification produced error: {0}")]
    ModificationRejected(String),
}

// ---------------------------------------------------------------------------
// ArtifactBuilder
// ---------------------------------------------------------------------------

/// Builds artifacts against a catalog, firing the given hooks.
pub struct ArtifactBuilder<'a> {
    catalog: &'a dyn CatalogLookup,
    hooks: &'a CraftingHooks,
}

impl<'a> ArtifactBuilder<'a> {
    pub fn new(catalog: &'a dyn CatalogLookup, hooks: &'a CraftingHooks) -> Self {
        Self { catalog, hooks }
    }

    /// Build one artifact.
    pub fn build(&self, spec: &ArtifactSpec) -> Result<ToolItem, BuildError> {
        let base_type = self
            .catalog
            .base_type(spec.base_type())
            .ok_or_else(|| BuildError::UnknownBaseType(spec.base_type().to_string()))?;

        let slot_count = base_type.required_components().len();
        if slot_count != spec.materials().len() {
            return Err(BuildError::MaterialCount {
                base_type: base_type.identifier().to_string(),
                expected: slot_count,
                actual: spec.materials().len(),
            });
        }

        let materials = self.resolve_materials(spec.materials())?;
        let components = assemble_components(base_type, &materials)?;
        debug!(
            "resolved {} with {} components for '{}'",
            base_type.identifier(),
            components.len(),
            spec.name()
        );

        let mut item = base_type.build_item(&materials);
        item.set_display_name(&format!("{ARTIFACT_NAME_PREFIX}{}", spec.name()));
        self.hooks
            .fire_tool_crafting(&ToolCraftingEvent {
                item: &item,
                crafter: None,
                components: &components,
            })
            .map_err(|rejection| {
                warn!("crafting hook rejected '{}': {rejection}", spec.name());
                BuildError::CraftingRejected(rejection.message)
            })?;
        let before_modifiers = item.clone();

        apply_free_bonuses(&mut item, spec.free_modifiers());
        self.apply_modifiers(&mut item, spec.modifiers())?;
        self.finalize(&mut item, &before_modifiers, spec.name())?;

        attach_lore(&mut item, spec.lore());
        if let Some(data) = spec.data_tag() {
            item.merge_tag(data);
        }

        info!("built artifact '{}' ({})", spec.name(), base_type.identifier());
        Ok(item)
    }

    /// Build several artifacts. Each result is independent of the others.
    pub fn build_all<'s, I>(&self, specs: I) -> Vec<Result<ToolItem, BuildError>>
    where
        I: IntoIterator<Item = &'s ArtifactSpec>,
    {
        specs.into_iter().map(|spec| self.build(spec)).collect()
    }

    fn resolve_materials(&self, ids: &[String]) -> Result<Vec<&'a Material>, BuildError> {
        let catalog = self.catalog;
        ids.iter()
            .map(|id| {
                let material = catalog.material(id);
                if material.is_unknown() {
                    Err(BuildError::UnknownMaterial(id.clone()))
                } else {
                    Ok(material)
                }
            })
            .collect()
    }

    fn apply_modifiers(
        &self,
        item: &mut ToolItem,
        modifiers: &[ModifierSpec],
    ) -> Result<(), BuildError> {
        for entry in modifiers {
            let modifier = self
                .catalog
                .modifier(&entry.id)
                .ok_or_else(|| BuildError::UnknownModifier(entry.id.clone()))?;
            for _ in 0..entry.level {
                modifier.apply(item);
            }
            debug!("applied {} x{}", entry.id, entry.level);
        }
        Ok(())
    }

    fn finalize(
        &self,
        item: &mut ToolItem,
        before_modifiers: &ToolItem,
        name: &str,
    ) -> Result<(), BuildError> {
        self.hooks
            .fire_tool_modify(&ToolModifyEvent {
                item: &*item,
                crafter: None,
                before: before_modifiers.clone(),
            })
            .map_err(|rejection| {
                warn!("modify hook rejected '{name}': {rejection}");
                BuildError::ModificationRejected(rejection.message)
            })?;

        // The marker goes on after the modify hook so listeners never see it.
        ArtifactMarker.apply(item);
        item.rebuild();
        Ok(())
    }
}

fn assemble_components(
    base_type: &dyn BaseType,
    materials: &[&Material],
) -> Result<Vec<ComponentStack>, BuildError> {
    base_type
        .required_components()
        .iter()
        .zip(materials)
        .enumerate()
        .map(|(slot, (component, material))| {
            component
                .candidate_parts()
                .first()
                .map(|part| part.stack_with_material(material))
                .ok_or_else(|| BuildError::UnsatisfiableSlot {
                    slot,
                    base_type: base_type.identifier().to_string(),
                })
        })
        .collect()
}

fn apply_free_bonuses(item: &mut ToolItem, count: u32) {
    for _ in 0..count {
        CreativeBonus.apply(item);
    }
}

fn attach_lore(item: &mut ToolItem, lore: &[String]) {
    if lore.is_empty() {
        return;
    }
    let lines = std::iter::once(String::new())
        .chain(lore.iter().map(|line| format!("{LORE_PREFIX}{line}")))
        .collect();
    item.set_lore(lines);
}
