//! # argcheck-types — Built-in Type Catalog
//!
//! Concrete validators for the names most signatures use. Every validator
//! here implements [`TypeValidator`](argcheck_core::TypeValidator) and can be
//! registered individually; [`install_builtins`] registers the full set.
//!
//! | Name          | Accepts                                   | Normalized to            |
//! |---------------|-------------------------------------------|--------------------------|
//! | `Float`       | finite number in `[0, 1]`                 | unchanged                |
//! | `Double`      | finite number                             | unchanged                |
//! | `Int`         | integer (or float with no fraction)       | integer                  |
//! | `Boolean`     | boolean, `"true"`, `"false"`              | boolean                  |
//! | `String`      | string                                    | unchanged                |
//! | `IntArray`    | array of `Int`                            | array                    |
//! | `StringArray` | array of `String`                         | array                    |
//! | `Date`        | `YYYY-MM-DD` or RFC 3339 timestamp        | `YYYY-MM-DD` (UTC date)  |
//! | `DateTime`    | RFC 3339 timestamp or epoch seconds       | `YYYY-MM-DDTHH:MM:SSZ`   |
//! | `Uuid`        | hyphenated or simple UUID string          | lowercase hyphenated     |
//!
//! Bounded ranges other than `Float` are built with
//! [`BoundedNumber::new`] and registered under a caller-chosen name.

pub mod array;
pub mod identity;
pub mod numeric;
pub mod scalar;
pub mod temporal;

use argcheck_core::{CheckResult, TypeCatalog};

pub use array::ArrayOf;
pub use identity::UuidType;
pub use numeric::{BoundedNumber, Double, Int};
pub use scalar::{Boolean, Text};
pub use temporal::{Date, DateTime};

/// Names registered by [`install_builtins`], in registration order.
pub const BUILTIN_TYPES: [&str; 10] = [
    "Float",
    "Double",
    "Int",
    "Boolean",
    "String",
    "IntArray",
    "StringArray",
    "Date",
    "DateTime",
    "Uuid",
];

/// Register every built-in type in `catalog`.
///
/// # Errors
///
/// [`CheckError::DuplicateType`](argcheck_core::CheckError::DuplicateType) if
/// the catalog already holds one of [`BUILTIN_TYPES`]. Types registered
/// before the collision stay registered.
pub fn install_builtins(catalog: &mut TypeCatalog) -> CheckResult<()> {
    catalog.register("Float", BoundedNumber::unit_interval())?;
    catalog.register("Double", Double)?;
    catalog.register("Int", Int)?;
    catalog.register("Boolean", Boolean)?;
    catalog.register("String", Text)?;
    catalog.register("IntArray", ArrayOf::new("IntArray", "Int"))?;
    catalog.register("StringArray", ArrayOf::new("StringArray", "String"))?;
    catalog.register("Date", Date)?;
    catalog.register("DateTime", DateTime)?;
    catalog.register("Uuid", UuidType)?;
    Ok(())
}

/// A fresh catalog holding the built-in types.
pub fn builtin_catalog() -> CheckResult<TypeCatalog> {
    let mut catalog = TypeCatalog::new();
    install_builtins(&mut catalog)?;
    Ok(catalog)
}
