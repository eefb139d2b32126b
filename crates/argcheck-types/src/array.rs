//! Homogeneous array validators (`IntArray`, `StringArray`, and custom ones).
//!
//! An `ArrayOf` is a validator backed by an array [`Structure`]: constructing
//! it validates every element against the item type, and its post-hoc
//! `validate` re-runs that check on the raw value when it appears as a
//! structure field.

use argcheck_core::{CheckResult, TypeCatalog, TypeValidator, Value};
use argcheck_schema::{Structure, TypeSpecifier};

/// An array whose elements all match one item specifier.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayOf {
    name: String,
    schema: Structure,
}

impl ArrayOf {
    /// `name` is the catalog name this validator is registered under;
    /// `item` is resolved through the same catalog at validation time.
    pub fn new(name: impl Into<String>, item: impl Into<TypeSpecifier>) -> Self {
        Self {
            name: name.into(),
            schema: Structure::array(item),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &Structure {
        &self.schema
    }
}

impl TypeValidator for ArrayOf {
    fn construct(&self, raw: &Value, catalog: &TypeCatalog) -> CheckResult<Value> {
        self.schema.normalize(catalog, raw)
    }

    fn validate(&self, raw: &Value, catalog: &TypeCatalog) -> CheckResult<()> {
        self.schema.normalize(catalog, raw).map(|_| ())
    }
}
