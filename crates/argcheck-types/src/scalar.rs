//! Boolean and string validators.

use argcheck_core::{CheckError, CheckResult, TypeCatalog, TypeValidator, Value};

/// A boolean, or one of the literal strings `"true"` / `"false"`.
///
/// Strings are parsed by value: `"false"` normalizes to `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Boolean;

impl TypeValidator for Boolean {
    fn construct(&self, raw: &Value, _catalog: &TypeCatalog) -> CheckResult<Value> {
        match raw {
            Value::Bool(b) => Ok(Value::Bool(*b)),
            Value::String(s) if s == "true" => Ok(Value::Bool(true)),
            Value::String(s) if s == "false" => Ok(Value::Bool(false)),
            _ => Err(CheckError::constraint("Boolean", "Invalid Boolean value")),
        }
    }
}

/// Any string. Registered as `String`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Text;

impl TypeValidator for Text {
    fn construct(&self, raw: &Value, _catalog: &TypeCatalog) -> CheckResult<Value> {
        match raw {
            Value::String(_) => Ok(raw.clone()),
            _ => Err(CheckError::constraint("String", "Expected a string")),
        }
    }
}
