//! Artifact document parsing.
//!
//! Turns an untyped document into an [`ArtifactSpec`]. Only the shape of
//! the document is checked here; whether the named base type, materials and
//! modifiers exist is decided later, at build time.
//!
//! Accepted shorthands:
//!
//! - `lore`: a single string, or an array of strings.
//! - `mods` entries: `{ "id": ..., "level": ... }`, or a bare id string
//!   (level 1).

use artifice_core::item::Tag;
use artifice_core::spec::{ArtifactSpec, ModifierSpec};
use serde_json::{Map, Value};

// ===========================================================================
// Errors
// ===========================================================================

/// A malformed artifact document.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpecSyntaxError {
    #[error("expected the artifact document to be an object, but got {0}")]
    NotAnObject(Value),

    #[error("missing required field \"{0}\"")]
    MissingField(&'static str),

    #[error("expected {expected} for \"{field}\", but got {found}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
        found: Value,
    },

    #[error("expected {expected} in the \"{field}\" array, but got {found}")]
    BadElement {
        field: &'static str,
        expected: &'static str,
        found: Value,
    },

    #[error("field \"{0}\" must not be empty")]
    EmptyField(&'static str),

    #[error("modifier \"{id}\" has non-positive level {level}")]
    NonPositiveLevel { id: String, level: i64 },

    #[error("\"{field}\" must be between {min} and {max}, but got {found}")]
    OutOfRange {
        field: &'static str,
        min: u32,
        max: u32,
        found: Value,
    },
}

// ===========================================================================
// Field names
// ===========================================================================

const FIELD_NAME: &str = "name";
const FIELD_LORE: &str = "lore";
const FIELD_TOOL: &str = "tool";
const FIELD_MATERIALS: &str = "materials";
const FIELD_FREE_MODS: &str = "free_mods";
const FIELD_MODS: &str = "mods";
const FIELD_MOD_ID: &str = "mods.id";
const FIELD_MOD_LEVEL: &str = "mods.level";
const FIELD_DATA_TAG: &str = "data_tag";

// ===========================================================================
// Parsing
// ===========================================================================

/// Parse an artifact document.
pub fn parse_artifact_spec(document: &Value) -> Result<ArtifactSpec, SpecSyntaxError> {
    let dto = document
        .as_object()
        .ok_or_else(|| SpecSyntaxError::NotAnObject(document.clone()))?;

    let modifiers = parse_modifiers(dto)?;
    let lore = parse_lore(dto)?;
    let name = required_string(dto, FIELD_NAME)?;
    let tool = required_string(dto, FIELD_TOOL)?;
    let materials = parse_materials(dto)?;
    let free_modifiers = parse_free_modifiers(dto)?;
    let data_tag = parse_data_tag(dto)?;

    Ok(ArtifactSpec::new(name, tool, materials)
        .with_lore(lore)
        .with_free_modifiers(free_modifiers)
        .with_modifiers(modifiers)
        .with_data_tag(data_tag))
}

/// Parse an artifact document from JSON text.
///
/// Fails with [`serde_json::Error`] wrapped in the outer `Err` when the text
/// is not JSON at all, and with the inner [`SpecSyntaxError`] when it is
/// JSON of the wrong shape.
pub fn parse_artifact_json(
    json: &str,
) -> Result<Result<ArtifactSpec, SpecSyntaxError>, serde_json::Error> {
    let document: Value = serde_json::from_str(json)?;
    Ok(parse_artifact_spec(&document))
}

fn parse_modifiers(dto: &Map<String, Value>) -> Result<Vec<ModifierSpec>, SpecSyntaxError> {
    let Some(mods) = dto.get(FIELD_MODS) else {
        return Ok(Vec::new());
    };
    let entries = mods.as_array().ok_or_else(|| SpecSyntaxError::WrongType {
        field: FIELD_MODS,
        expected: "an array",
        found: mods.clone(),
    })?;

    entries.iter().map(parse_modifier_entry).collect()
}

fn parse_modifier_entry(entry: &Value) -> Result<ModifierSpec, SpecSyntaxError> {
    match entry {
        Value::String(id) => Ok(ModifierSpec::new(id.clone(), 1)),
        Value::Object(obj) => {
            let id = match obj.get("id") {
                Some(Value::String(id)) => id.clone(),
                Some(other) => {
                    return Err(SpecSyntaxError::WrongType {
                        field: FIELD_MOD_ID,
                        expected: "a string",
                        found: other.clone(),
                    });
                }
                None => {
                    return Err(SpecSyntaxError::BadElement {
                        field: FIELD_MODS,
                        expected: "a modifier object with an \"id\"",
                        found: entry.clone(),
                    });
                }
            };
            let level = match obj.get("level") {
                None => 1,
                Some(value) => parse_level(&id, value)?,
            };
            Ok(ModifierSpec::new(id, level))
        }
        other => Err(SpecSyntaxError::BadElement {
            field: FIELD_MODS,
            expected: "either a modifier object or a string",
            found: other.clone(),
        }),
    }
}

fn parse_level(id: &str, value: &Value) -> Result<u32, SpecSyntaxError> {
    let out_of_range = || SpecSyntaxError::OutOfRange {
        field: FIELD_MOD_LEVEL,
        min: 1,
        max: u32::MAX,
        found: value.clone(),
    };
    match (value.as_i64(), value.as_u64()) {
        (Some(level), _) if level <= 0 => Err(SpecSyntaxError::NonPositiveLevel {
            id: id.to_string(),
            level,
        }),
        (Some(level), _) => u32::try_from(level).map_err(|_| out_of_range()),
        // Above i64::MAX.
        (None, Some(_)) => Err(out_of_range()),
        (None, None) => Err(SpecSyntaxError::WrongType {
            field: FIELD_MOD_LEVEL,
            expected: "an integer",
            found: value.clone(),
        }),
    }
}

fn parse_lore(dto: &Map<String, Value>) -> Result<Vec<String>, SpecSyntaxError> {
    match dto.get(FIELD_LORE) {
        None => Ok(Vec::new()),
        Some(Value::String(line)) => Ok(vec![line.clone()]),
        Some(Value::Array(lines)) => string_elements(FIELD_LORE, lines),
        Some(other) => Err(SpecSyntaxError::WrongType {
            field: FIELD_LORE,
            expected: "either a string array or a string",
            found: other.clone(),
        }),
    }
}

fn parse_materials(dto: &Map<String, Value>) -> Result<Vec<String>, SpecSyntaxError> {
    match dto.get(FIELD_MATERIALS) {
        None => Err(SpecSyntaxError::MissingField(FIELD_MATERIALS)),
        Some(Value::Array(ids)) => string_elements(FIELD_MATERIALS, ids),
        Some(other) => Err(SpecSyntaxError::WrongType {
            field: FIELD_MATERIALS,
            expected: "a string array",
            found: other.clone(),
        }),
    }
}

fn parse_free_modifiers(dto: &Map<String, Value>) -> Result<u32, SpecSyntaxError> {
    let Some(value) = dto.get(FIELD_FREE_MODS) else {
        return Ok(0);
    };
    if !value.is_i64() && !value.is_u64() {
        return Err(SpecSyntaxError::WrongType {
            field: FIELD_FREE_MODS,
            expected: "a non-negative integer",
            found: value.clone(),
        });
    }
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| SpecSyntaxError::OutOfRange {
            field: FIELD_FREE_MODS,
            min: 0,
            max: u32::MAX,
            found: value.clone(),
        })
}

fn parse_data_tag(dto: &Map<String, Value>) -> Result<Option<Tag>, SpecSyntaxError> {
    match dto.get(FIELD_DATA_TAG) {
        None => Ok(None),
        Some(Value::Object(tag)) => Ok(Some(tag.clone())),
        Some(other) => Err(SpecSyntaxError::WrongType {
            field: FIELD_DATA_TAG,
            expected: "an object",
            found: other.clone(),
        }),
    }
}

fn required_string(dto: &Map<String, Value>, field: &'static str) -> Result<String, SpecSyntaxError> {
    match dto.get(field) {
        None => Err(SpecSyntaxError::MissingField(field)),
        Some(Value::String(s)) if s.is_empty() => Err(SpecSyntaxError::EmptyField(field)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(SpecSyntaxError::WrongType {
            field,
            expected: "a string",
            found: other.clone(),
        }),
    }
}

fn string_elements(field: &'static str, values: &[Value]) -> Result<Vec<String>, SpecSyntaxError> {
    values
        .iter()
        .map(|v| match v {
            Value::String(s) => Ok(s.clone()),
            other => Err(SpecSyntaxError::BadElement {
                field,
                expected: "a string",
                found: other.clone(),
            }),
        })
        .collect()
}

// ===========================================================================
// Tests
// ===========================================================================
