//! CLI command definitions.

use std::path::Path;

use anyhow::{Context, Result};
use artifice_core::spec::ArtifactSpec;
use artifice_data::{load_spec_dir, load_spec_file};
use clap::{Parser, Subcommand};

pub mod build;
pub mod check;

/// Parse and build artifact specifications
#[derive(Parser)]
#[command(name = "artifice")]
#[command(version, about = "Parse and build declarative artifact specifications")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse artifact documents without building them
    Check(check::CheckArgs),

    /// Build artifact documents against a catalog directory
    Build(build::BuildArgs),
}

/// Documents read from a `<spec>` argument.
struct LoadedSpecs {
    /// The argument was a directory, so output is a list even for one file.
    from_dir: bool,
    specs: Vec<(String, ArtifactSpec)>,
}

/// Load one document, or every document in a directory.
fn load_specs(path: &Path) -> Result<LoadedSpecs> {
    if path.is_dir() {
        let specs = load_spec_dir(path)
            .with_context(|| format!("failed to load artifact specs from {}", path.display()))?;
        Ok(LoadedSpecs {
            from_dir: true,
            specs: specs
                .into_iter()
                .map(|(file, spec)| (file.display().to_string(), spec))
                .collect(),
        })
    } else {
        let spec = load_spec_file(path)
            .with_context(|| format!("failed to load artifact spec {}", path.display()))?;
        Ok(LoadedSpecs {
            from_dir: false,
            specs: vec![(path.display().to_string(), spec)],
        })
    }
}
