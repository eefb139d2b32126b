//! # argcheck-schema — Structural Schemas
//!
//! Describes composite argument shapes and validates values against them.
//!
//! ## Specifiers (`specifier`)
//!
//! A [`TypeSpecifier`] is the declared type of a function argument or a
//! structure field: a catalog type name, a nested [`Structure`], or an inline
//! field schema. It is a closed enum resolved by exhaustive matching.
//!
//! ## Structures (`structure`)
//!
//! A [`Structure`] is either a homogeneous array schema or a named-field
//! object schema. [`Structure::validate`] checks a value recursively and
//! rewrites object fields in place with their normalized form;
//! [`Structure::normalize`] does the same on a copy.
//!
//! ## Definitions (`definition`)
//!
//! Structures can be read from plain JSON (or anything serde can turn into
//! JSON, such as YAML): strings are type names, one-element arrays are array
//! schemas, objects are field schemas.

pub mod definition;
pub mod specifier;
pub mod structure;

pub use specifier::{ObjectSchema, TypeSpecifier};
pub use structure::{Definition, Structure};
