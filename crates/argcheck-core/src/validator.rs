//! # Validator Contract
//!
//! A [`TypeValidator`] turns a raw [`Value`] into its normalized form or
//! rejects it. Construction failure is reported as a [`CheckError`], usually
//! [`CheckError::Constraint`]; there is no partially-built result.
//!
//! Validators receive the [`TypeCatalog`] they are registered in, so that
//! composite validators (homogeneous arrays) can resolve their item types
//! without reaching for global state.

use crate::catalog::TypeCatalog;
use crate::error::CheckResult;
use crate::value::Value;

/// A named entry in the type catalog.
pub trait TypeValidator: Send + Sync {
    /// Normalize `raw`, or fail with the violated constraint.
    fn construct(&self, raw: &Value, catalog: &TypeCatalog) -> CheckResult<Value>;

    /// Additional structural check run after a successful construction
    /// during structure validation. The default accepts everything.
    fn validate(&self, raw: &Value, catalog: &TypeCatalog) -> CheckResult<()> {
        let _ = (raw, catalog);
        Ok(())
    }
}

/// Adapter turning a plain function into a [`TypeValidator`].
///
/// Built with [`from_fn`].
pub struct FnValidator<F> {
    construct: F,
}

/// Wrap a normalizing function as a validator.
///
/// ```
/// use argcheck_core::{from_fn, CheckError, TypeCatalog, Value};
///
/// let mut catalog = TypeCatalog::new();
/// catalog
///     .register("Even", from_fn(|raw: &Value| match raw.as_i64() {
///         Some(n) if n % 2 == 0 => Ok(Value::from(n)),
///         _ => Err(CheckError::constraint("Even", "Even must be an even integer")),
///     }))
///     .unwrap();
/// assert!(catalog.instantiate("Even", 4).is_ok());
/// assert!(catalog.instantiate("Even", 5).is_err());
/// ```
pub fn from_fn<F>(construct: F) -> FnValidator<F>
where
    F: Fn(&Value) -> CheckResult<Value> + Send + Sync,
{
    FnValidator { construct }
}

impl<F> TypeValidator for FnValidator<F>
where
    F: Fn(&Value) -> CheckResult<Value> + Send + Sync,
{
    fn construct(&self, raw: &Value, _catalog: &TypeCatalog) -> CheckResult<Value> {
        (self.construct)(raw)
    }
}
