//! Check command - parse documents and print a summary of each.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::info;

#[derive(Args)]
pub struct CheckArgs {
    /// Artifact document, or a directory of them
    spec: PathBuf,
}

pub fn execute(args: CheckArgs) -> Result<()> {
    let specs = super::load_specs(&args.spec)?.specs;

    for (file, spec) in &specs {
        let modifiers: Vec<String> = spec
            .modifiers()
            .iter()
            .map(|m| format!("{} x{}", m.id, m.level))
            .collect();
        println!("{file}: '{}'", spec.name());
        println!("  base type: {}", spec.base_type());
        println!("  materials: {}", spec.materials().join(", "));
        println!("  free modifiers: {}", spec.free_modifiers());
        if !modifiers.is_empty() {
            println!("  modifiers: {}", modifiers.join(", "));
        }
        if !spec.lore().is_empty() {
            println!("  lore lines: {}", spec.lore().len());
        }
    }

    info!("{} artifact spec(s) parsed", specs.len());
    Ok(())
}
