//! Reads catalog data files and artifact documents from disk.
//!
//! A content directory holds one file per kind (`materials`, `parts`,
//! `tools`, optionally `modifiers`) in RON, JSON or TOML. Hosts call
//! [`load_catalog`] for a content directory and [`load_spec_file`] /
//! [`load_spec_dir`] for artifact documents.

use crate::parser::{SpecSyntaxError, parse_artifact_spec};
use crate::schema::{MaterialData, ModifierData, PartData, ToolData};
use artifice_core::catalog::{Catalog, CatalogBuilder, CatalogError};
use artifice_core::fixed::f64_to_fixed64;
use artifice_core::item::StatBonus;
use artifice_core::material::Material;
use artifice_core::modifier::StatModifier;
use artifice_core::spec::ArtifactSpec;
use artifice_core::tool::{ComponentSlot, PartKind, ToolDefinition};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

// ===========================================================================
// Errors
// ===========================================================================

/// Failure while reading content or documents. Every variant that comes from
/// a particular file names it.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    #[error("{dir} has no '{kind}' file")]
    MissingRequired { kind: &'static str, dir: PathBuf },

    #[error("{file} is not a .ron, .json or .toml file")]
    UnsupportedFormat { file: PathBuf },

    #[error("both {first} and {second} exist; keep only one")]
    ConflictingFormats { first: PathBuf, second: PathBuf },

    #[error("cannot read {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// A tool slot names a part that `parts` does not define.
    #[error("{file}: no {kind} named '{id}'")]
    UnresolvedRef {
        file: PathBuf,
        id: String,
        kind: &'static str,
    },

    #[error("{file}: '{id}' is defined twice")]
    DuplicateId { file: PathBuf, id: String },

    /// The catalog refused an entry (duplicate or reserved id).
    #[error("{file}: {source}")]
    Catalog {
        file: PathBuf,
        #[source]
        source: CatalogError,
    },

    /// An artifact document had the wrong shape.
    #[error("invalid artifact spec {file}: {source}")]
    Syntax {
        file: PathBuf,
        #[source]
        source: SpecSyntaxError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Reading files
// ===========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Ron,
    Json,
    Toml,
}

impl Format {
    const ALL: [(Format, &'static str); 3] =
        [(Format::Ron, "ron"), (Format::Json, "json"), (Format::Toml, "toml")];

    fn of(path: &Path) -> Result<Format, DataLoadError> {
        let ext = path.extension().and_then(|e| e.to_str());
        Format::ALL
            .iter()
            .find(|(_, known)| Some(*known) == ext)
            .map(|(format, _)| *format)
            .ok_or_else(|| DataLoadError::UnsupportedFormat {
                file: path.to_path_buf(),
            })
    }
}

/// The single `<kind>.<ext>` file in `dir`, if any.
fn locate(dir: &Path, kind: &'static str) -> Result<Option<PathBuf>, DataLoadError> {
    let mut present = Format::ALL
        .iter()
        .map(|(_, ext)| dir.join(format!("{kind}.{ext}")))
        .filter(|candidate| candidate.is_file());

    match (present.next(), present.next()) {
        (Some(first), Some(second)) => Err(DataLoadError::ConflictingFormats { first, second }),
        (found, _) => Ok(found),
    }
}

fn locate_required(dir: &Path, kind: &'static str) -> Result<PathBuf, DataLoadError> {
    locate(dir, kind)?.ok_or_else(|| DataLoadError::MissingRequired {
        kind,
        dir: dir.to_path_buf(),
    })
}

fn parse_error(path: &Path, detail: impl ToString) -> DataLoadError {
    DataLoadError::Parse {
        file: path.to_path_buf(),
        detail: detail.to_string(),
    }
}

/// Reads the list of `kind` entries from `path`. RON and JSON files hold a
/// bare array; TOML files hold it under the `kind` key (`[[tools]]`).
fn read_entries<T: DeserializeOwned>(path: &Path, kind: &str) -> Result<Vec<T>, DataLoadError> {
    let text = std::fs::read_to_string(path)?;
    match Format::of(path)? {
        Format::Ron => ron::from_str(&text).map_err(|e| parse_error(path, e)),
        Format::Json => serde_json::from_str(&text).map_err(|e| parse_error(path, e)),
        Format::Toml => {
            let mut table: toml::Table = toml::from_str(&text).map_err(|e| parse_error(path, e))?;
            let entries = table
                .remove(kind)
                .ok_or_else(|| parse_error(path, format!("expected a top-level '{kind}' array")))?;
            entries
                .try_into()
                .map_err(|e: toml::de::Error| parse_error(path, e))
        }
    }
}

/// Reads any artifact document into the untyped model the parser checks.
fn read_document(path: &Path) -> Result<Value, DataLoadError> {
    let text = std::fs::read_to_string(path)?;
    match Format::of(path)? {
        Format::Ron => {
            let value: ron::Value = ron::from_str(&text).map_err(|e| parse_error(path, e))?;
            ron_to_json(value).map_err(|detail| parse_error(path, detail))
        }
        Format::Json => serde_json::from_str(&text).map_err(|e| parse_error(path, e)),
        Format::Toml => toml::from_str(&text).map_err(|e| parse_error(path, e)),
    }
}

/// RON struct fields (`(name: "Ember")`) and map entries (`{"name": "Ember"}`)
/// both become object members. Keys must be strings.
fn ron_to_json(value: ron::Value) -> Result<Value, String> {
    Ok(match value {
        ron::Value::Bool(b) => Value::Bool(b),
        ron::Value::Char(c) => Value::String(c.to_string()),
        ron::Value::String(s) => Value::String(s),
        ron::Value::Number(ron::Number::Integer(i)) => Value::from(i),
        ron::Value::Number(ron::Number::Float(f)) => serde_json::Number::from_f64(f.get())
            .map(Value::Number)
            .ok_or_else(|| format!("{} is not a finite number", f.get()))?,
        ron::Value::Option(Some(inner)) => ron_to_json(*inner)?,
        ron::Value::Option(None) | ron::Value::Unit => Value::Null,
        ron::Value::Seq(items) => {
            Value::Array(items.into_iter().map(ron_to_json).collect::<Result<_, _>>()?)
        }
        ron::Value::Map(map) => {
            let mut object = serde_json::Map::new();
            for (key, value) in map {
                match key {
                    ron::Value::String(key) => object.insert(key, ron_to_json(value)?),
                    other => return Err(format!("map key {other:?} is not a string")),
                };
            }
            Value::Object(object)
        }
    })
}

// ===========================================================================
// Catalog loading
// ===========================================================================

/// Load a catalog from a content directory.
///
/// Reads `materials`, `parts`, `tools` (all required) and `modifiers`
/// (optional), each in any one supported format.
pub fn load_catalog(dir: &Path) -> Result<Catalog, DataLoadError> {
    let catalog = load_catalog_builder(dir)?.build();
    info!(
        "catalog loaded from {}: {} base types, {} materials, {} modifiers",
        dir.display(),
        catalog.base_type_count(),
        catalog.material_count(),
        catalog.modifier_count()
    );
    Ok(catalog)
}

/// Like [`load_catalog`], but leaves the builder open so the host can
/// register its own entries before freezing it.
pub fn load_catalog_builder(dir: &Path) -> Result<CatalogBuilder, DataLoadError> {
    let mut builder = CatalogBuilder::new();

    // Phase 1: materials.
    let path = locate_required(dir, "materials")?;
    let materials: Vec<MaterialData> = read_entries(&path, "materials")?;
    for m in materials {
        let material = Material::new(
            m.id,
            m.durability,
            f64_to_fixed64(m.mining_speed),
            f64_to_fixed64(m.attack),
        );
        builder
            .register_material(material)
            .map_err(|source| catalog_error(&path, source))?;
    }
    debug!("loaded materials from {}", path.display());

    // Phase 2: parts. Only used to resolve tool components.
    let path = locate_required(dir, "parts")?;
    let part_list: Vec<PartData> = read_entries(&path, "parts")?;
    let mut parts: HashMap<String, PartKind> = HashMap::new();
    for p in part_list {
        if parts.contains_key(&p.id) {
            return Err(DataLoadError::DuplicateId { file: path, id: p.id });
        }
        parts.insert(p.id.clone(), PartKind::new(p.id));
    }
    debug!("loaded {} parts from {}", parts.len(), path.display());

    // Phase 3: tools (resolve part refs by name).
    let path = locate_required(dir, "tools")?;
    let tools: Vec<ToolData> = read_entries(&path, "tools")?;
    for t in tools {
        let components = t
            .components
            .iter()
            .map(|slot| {
                slot.iter()
                    .map(|part| {
                        parts
                            .get(part)
                            .cloned()
                            .ok_or_else(|| DataLoadError::UnresolvedRef {
                                file: path.clone(),
                                id: part.clone(),
                                kind: "part",
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()
                    .map(ComponentSlot::new)
            })
            .collect::<Result<Vec<_>, _>>()?;
        let mut tool = ToolDefinition::new(t.id, components);
        tool.durability_multiplier = f64_to_fixed64(t.durability_multiplier);
        tool.speed_multiplier = f64_to_fixed64(t.speed_multiplier);
        tool.base_attack = f64_to_fixed64(t.base_attack);
        tool.modifier_slots = t.modifier_slots;
        builder
            .register_base_type(tool)
            .map_err(|source| catalog_error(&path, source))?;
    }
    debug!("loaded tools from {}", path.display());

    // Phase 4: modifiers (optional).
    if let Some(path) = locate(dir, "modifiers")? {
        let modifiers: Vec<ModifierData> = read_entries(&path, "modifiers")?;
        for m in modifiers {
            let bonus = StatBonus {
                durability: m.durability,
                mining_speed: f64_to_fixed64(m.mining_speed),
                attack: f64_to_fixed64(m.attack),
                modifier_slots: m.modifier_slots,
            };
            builder
                .register_modifier(StatModifier::new(m.id, bonus))
                .map_err(|source| catalog_error(&path, source))?;
        }
        debug!("loaded modifiers from {}", path.display());
    }

    Ok(builder)
}

fn catalog_error(path: &Path, source: CatalogError) -> DataLoadError {
    DataLoadError::Catalog {
        file: path.to_path_buf(),
        source,
    }
}

// ===========================================================================
// Artifact documents
// ===========================================================================

/// Read and parse one artifact document.
pub fn load_spec_file(path: &Path) -> Result<ArtifactSpec, DataLoadError> {
    let document = read_document(path)?;
    let spec = parse_artifact_spec(&document).map_err(|source| DataLoadError::Syntax {
        file: path.to_path_buf(),
        source,
    })?;
    debug!("parsed artifact '{}' from {}", spec.name(), path.display());
    Ok(spec)
}

/// Read every artifact document in a directory, sorted by file name.
///
/// Files with unsupported extensions are skipped. The first bad document
/// fails the whole load.
pub fn load_spec_dir(dir: &Path) -> Result<Vec<(PathBuf, ArtifactSpec)>, DataLoadError> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if Format::of(&path).is_err() {
            debug!("skipping {}", path.display());
            continue;
        }
        paths.push(path);
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    let specs = paths
        .into_iter()
        .map(|path| load_spec_file(&path).map(|spec| (path, spec)))
        .collect::<Result<Vec<_>, _>>()?;
    info!("loaded {} artifact specs from {}", specs.len(), dir.display());
    Ok(specs)
}

// ===========================================================================
// Tests
// ===========================================================================
