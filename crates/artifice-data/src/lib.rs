//! Reading artifacts and catalog content from data files.
//!
//! [`parser`] turns an untyped document into an
//! [`ArtifactSpec`](artifice_core::spec::ArtifactSpec); [`loader`] reads
//! documents and catalog directories from disk in RON, JSON, or TOML.

pub mod loader;
pub mod parser;
pub mod schema;

pub use loader::{DataLoadError, load_catalog, load_spec_dir, load_spec_file};
pub use parser::{SpecSyntaxError, parse_artifact_json, parse_artifact_spec};
