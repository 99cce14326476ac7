//! Build command - build documents and print each item's tag as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use artifice_core::builder::ArtifactBuilder;
use artifice_core::catalog::CatalogLookup;
use artifice_core::hooks::CraftingHooks;
use artifice_data::load_catalog;
use clap::Args;
use serde_json::Value;
use tracing::info;

use super::LoadedSpecs;

#[derive(Args)]
pub struct BuildArgs {
    /// Directory holding materials, parts, tools and modifiers files
    #[arg(short, long)]
    catalog: PathBuf,

    /// Artifact document, or a directory of them (printed as a JSON array)
    spec: PathBuf,
}

pub fn execute(args: BuildArgs) -> Result<()> {
    let catalog = load_catalog(&args.catalog)
        .with_context(|| format!("failed to load catalog from {}", args.catalog.display()))?;
    let loaded = super::load_specs(&args.spec)?;

    let output = build_output(&catalog, loaded)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// One tag object for a single document, an array for a directory.
fn build_output(catalog: &dyn CatalogLookup, loaded: LoadedSpecs) -> Result<Value> {
    let hooks = CraftingHooks::new();
    let builder = ArtifactBuilder::new(catalog, &hooks);

    let mut tags = Vec::with_capacity(loaded.specs.len());
    for (file, spec) in &loaded.specs {
        let item = builder
            .build(spec)
            .with_context(|| format!("failed to build '{}' from {file}", spec.name()))?;
        tags.push(Value::Object(item.into_tag()));
    }
    info!("{} artifact(s) built", tags.len());

    if loaded.from_dir {
        Ok(Value::Array(tags))
    } else {
        tags.pop().context("no artifact document loaded")
    }
}
