//! Numeric validators.

use argcheck_core::{CheckError, CheckResult, TypeCatalog, TypeValidator, Value};

/// A finite number within an inclusive range.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedNumber {
    name: String,
    min: f64,
    max: f64,
}

impl BoundedNumber {
    /// Accept finite numbers in `[min, max]`. `name` is used in the
    /// rejection message.
    pub fn new(name: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            name: name.into(),
            min,
            max,
        }
    }

    /// The `Float` type: `[0, 1]`.
    pub fn unit_interval() -> Self {
        Self::new("Float", 0.0, 1.0)
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

impl TypeValidator for BoundedNumber {
    fn construct(&self, raw: &Value, _catalog: &TypeCatalog) -> CheckResult<Value> {
        match raw.as_f64() {
            Some(n) if n.is_finite() && n >= self.min && n <= self.max => Ok(raw.clone()),
            _ => Err(CheckError::constraint(
                &self.name,
                format!("{} must be between {} and {}", self.name, self.min, self.max),
            )),
        }
    }
}

/// Any finite number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Double;

impl TypeValidator for Double {
    fn construct(&self, raw: &Value, _catalog: &TypeCatalog) -> CheckResult<Value> {
        match raw.as_f64() {
            Some(n) if n.is_finite() => Ok(raw.clone()),
            _ => Err(CheckError::constraint("Double", "Double must be a finite number")),
        }
    }
}

/// An integer. Floats without a fractional part are accepted and
/// normalized to their integer form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Int;

impl TypeValidator for Int {
    fn construct(&self, raw: &Value, _catalog: &TypeCatalog) -> CheckResult<Value> {
        if let Some(n) = raw.as_number() {
            if n.is_i64() || n.is_u64() {
                return Ok(raw.clone());
            }
        }
        raw.as_i64()
            .map(Value::from)
            .ok_or_else(|| CheckError::constraint("Int", "Int must be an integer"))
    }
}
