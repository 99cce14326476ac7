//! Artifice Core -- builds fully-realized artifact items from declarative
//! specifications.
//!
//! An [`spec::ArtifactSpec`] names a base type, one material per component
//! slot, free bonuses, named modifiers, lore and extra tag data.
//! [`builder::ArtifactBuilder`] resolves it against a [`catalog::Catalog`]
//! and produces a [`item::ToolItem`], or a [`builder::BuildError`] naming
//! exactly what could not be honored.
//!
//! # Build Pipeline
//!
//! 1. **Resolve** -- Base type, material count, materials.
//! 2. **Assemble** -- One component stack per slot.
//! 3. **Construct** -- Raw item, display name, crafting hook, snapshot.
//! 4. **Modify** -- Free bonuses, then named modifiers in spec order.
//! 5. **Finalize** -- Modify hook, artifact marker, stat rebuild.
//! 6. **Decorate** -- Lore lines and the extra data tag.
//!
//! # Key Types
//!
//! - [`catalog::CatalogLookup`] -- The three lookups the pipeline needs.
//! - [`tool::BaseType`] / [`modifier::Modifier`] -- Pluggable catalog
//!   entries; [`tool::ToolDefinition`] and [`modifier::StatModifier`] are
//!   the data-driven implementations.
//! - [`hooks::CraftingHooks`] -- Listeners that may veto construction.
//! - [`fixed::Fixed64`] -- Q32.32 fixed-point type for deterministic stats.

pub mod builder;
pub mod catalog;
pub mod fixed;
pub mod hooks;
pub mod item;
pub mod material;
pub mod modifier;
pub mod spec;
pub mod tool;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
