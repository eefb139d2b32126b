//! UUID validator.

use uuid::Uuid;

use argcheck_core::{CheckError, CheckResult, TypeCatalog, TypeValidator, Value};

/// A UUID string in any format `uuid` parses (hyphenated, simple, braced,
/// URN). Normalized to lowercase hyphenated form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UuidType;

impl TypeValidator for UuidType {
    fn construct(&self, raw: &Value, _catalog: &TypeCatalog) -> CheckResult<Value> {
        let s = raw
            .as_str()
            .ok_or_else(|| CheckError::constraint("Uuid", "Uuid must be a string"))?;
        let id = Uuid::parse_str(s)
            .map_err(|e| CheckError::constraint("Uuid", format!("Invalid UUID {s:?}: {e}")))?;
        Ok(Value::from(id.hyphenated().to_string()))
    }
}
