//! # argcheck-core — Foundational Types
//!
//! Every other `argcheck-*` crate depends on this one; it depends on nothing
//! internal.
//!
//! ## Contents
//!
//! - [`Value`] / [`Instance`] — the dynamic value tree passed to wrapped
//!   functions. An `Instance` is a value already normalized by a named
//!   validator and can only be produced by the [`TypeCatalog`]. It is only
//!   trusted by a catalog holding that same validator object.
//! - [`TypeValidator`] — the contract every catalog entry implements:
//!   construct a normalized value from a raw one, optionally run a post-hoc
//!   structural check.
//! - [`TypeCatalog`] — the append-only table mapping type names to
//!   validators. Owned explicitly by the caller, never global.
//! - [`CheckError`] — the validation-time error taxonomy.
//! - [`CheckConfig`] — switches for the coercion behaviours that are
//!   configurable per catalog.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `.unwrap()` or `.expect()` outside tests.

pub mod catalog;
pub mod config;
pub mod error;
pub mod validator;
pub mod value;

pub use catalog::TypeCatalog;
pub use config::{CheckConfig, ConfigError};
pub use error::{CheckError, CheckResult};
pub use validator::{from_fn, FnValidator, TypeValidator};
pub use value::{Instance, Value};
