//! # Error Types
//!
//! Validation-time errors shared by the catalog, the structural schema
//! validator, and every primitive validator. Registration errors specific to
//! functions live in `argcheck-dispatch`.
//!
//! All errors are synchronous and propagate unchanged to the immediate
//! caller. Nothing here is retried or recovered.

use thiserror::Error;

/// Result alias used throughout the validation engine.
pub type CheckResult<T> = Result<T, CheckError>;

/// Errors raised while registering types or validating values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CheckError {
    /// A type name was registered twice in the same catalog.
    #[error("type \"{name}\" is already registered")]
    DuplicateType {
        /// The colliding type name.
        name: String,
    },

    /// A specifier references a type name absent from the catalog.
    #[error("unknown type \"{name}\"")]
    UnknownType {
        /// The unresolved type name.
        name: String,
    },

    /// The validator binding is malformed and was not stored.
    #[error("invalid validator for type \"{name}\": {reason}")]
    InvalidValidator {
        /// The offending type name.
        name: String,
        /// Why the binding was rejected.
        reason: String,
    },

    /// An object schema's required field is absent from the value.
    #[error("missing key \"{field}\" in object")]
    MissingField {
        /// The absent field name.
        field: String,
    },

    /// The value has the wrong shape for the schema kind.
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        /// The shape the schema requires ("array" or "object").
        expected: &'static str,
        /// The shape that was supplied.
        found: &'static str,
    },

    /// A validator rejected the raw value. The message is opaque to the
    /// engine and is propagated as written by the validator.
    #[error("{message}")]
    Constraint {
        /// Name of the rejecting validator.
        type_name: String,
        /// Validator-provided description of the violated constraint.
        message: String,
    },

    /// A structure definition could not be built.
    #[error("invalid structure definition: {0}")]
    InvalidDefinition(String),
}

impl CheckError {
    /// Shorthand for a [`CheckError::Constraint`].
    pub fn constraint(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Constraint {
            type_name: type_name.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a [`CheckError::UnknownType`].
    pub fn unknown_type(name: impl Into<String>) -> Self {
        Self::UnknownType { name: name.into() }
    }

    /// Shorthand for a [`CheckError::MissingField`].
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }
}
