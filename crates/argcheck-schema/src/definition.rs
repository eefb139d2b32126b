//! Parsing structure definitions from JSON.
//!
//! | JSON                     | Meaning                        |
//! |--------------------------|--------------------------------|
//! | `"Int"`                  | type name                      |
//! | `["Int"]`                | array schema (exactly one item)|
//! | `{"age": "Int", ...}`    | object schema / inline schema  |
//!
//! At the top level an object becomes an object structure. Below it, objects
//! become inline field schemas and one-element arrays become nested array
//! structures.

use serde_json::{Map, Value as Json};

use argcheck_core::{CheckError, CheckResult};

use crate::specifier::{ObjectSchema, TypeSpecifier};
use crate::structure::Structure;

impl Structure {
    /// Build a structure from its JSON definition.
    ///
    /// # Errors
    ///
    /// [`CheckError::InvalidDefinition`] if the top level is not an object or
    /// a one-element array, or if any nested entry is malformed. The message
    /// carries a `$`-rooted path to the offending entry.
    pub fn from_json(def: &Json) -> CheckResult<Self> {
        match def {
            Json::Array(items) => Ok(Structure::array(parse_array_item(items, "$")?)),
            Json::Object(fields) => Ok(Structure::object(parse_fields(fields, "$")?)),
            other => Err(CheckError::InvalidDefinition(format!(
                "$: structure definition must be an object or a one-element array, got {}",
                json_kind(other)
            ))),
        }
    }

    /// Parse a definition from JSON text.
    pub fn from_json_str(text: &str) -> CheckResult<Self> {
        let def: Json = serde_json::from_str(text)
            .map_err(|e| CheckError::InvalidDefinition(format!("invalid JSON: {e}")))?;
        Self::from_json(&def)
    }
}

fn parse_spec(def: &Json, path: &str) -> CheckResult<TypeSpecifier> {
    match def {
        Json::String(name) if !name.trim().is_empty() => Ok(TypeSpecifier::Name(name.clone())),
        Json::String(_) => Err(CheckError::InvalidDefinition(format!(
            "{path}: type name must not be empty"
        ))),
        Json::Array(items) => Ok(TypeSpecifier::Structure(Structure::array(
            parse_array_item(items, path)?,
        ))),
        Json::Object(fields) => Ok(TypeSpecifier::Inline(parse_fields(fields, path)?)),
        other => Err(CheckError::InvalidDefinition(format!(
            "{path}: expected a type name, object, or one-element array, got {}",
            json_kind(other)
        ))),
    }
}

fn parse_array_item(items: &[Json], path: &str) -> CheckResult<TypeSpecifier> {
    match items {
        [item] => parse_spec(item, &format!("{path}[0]")),
        _ => Err(CheckError::InvalidDefinition(format!(
            "{path}: array schema must declare exactly one item type, found {}",
            items.len()
        ))),
    }
}

fn parse_fields(fields: &Map<String, Json>, path: &str) -> CheckResult<ObjectSchema> {
    let mut schema = ObjectSchema::new();
    for (name, def) in fields {
        schema.insert(name.clone(), parse_spec(def, &format!("{path}.{name}"))?);
    }
    Ok(schema)
}

fn json_kind(v: &Json) -> &'static str {
    match v {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}
