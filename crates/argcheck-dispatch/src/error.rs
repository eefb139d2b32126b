//! # Dispatch Errors
//!
//! Registration errors abort only the registration in progress. Call errors
//! abort the call before the function body runs, except
//! [`DispatchError::Function`], which is the body's own failure.

use thiserror::Error;

use argcheck_core::CheckError;

/// Errors raised while registering or calling wrapped functions.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// Malformed registration call.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A function name was registered twice.
    #[error("function \"{name}\" is already registered")]
    DuplicateFunction {
        /// The colliding function name.
        name: String,
    },

    /// No function is registered under this name.
    #[error("unknown function \"{name}\"")]
    UnknownFunction {
        /// The unresolved function name.
        name: String,
    },

    /// The call supplied the wrong number of arguments.
    #[error("{function}: Expected {expected} arguments, but got {found}")]
    Arity {
        /// Name of the called function.
        function: String,
        /// Number of declared specifiers.
        expected: usize,
        /// Number of supplied arguments.
        found: usize,
    },

    /// A name-form argument could not be converted to its declared type.
    #[error("{function}: Failed to convert value at index {index} to type {type_name}: {source}")]
    Conversion {
        /// Name of the called function.
        function: String,
        /// Zero-based position of the offending argument.
        index: usize,
        /// The declared type name.
        type_name: String,
        /// The validator's rejection.
        source: CheckError,
    },

    /// A structure-form argument failed validation.
    #[error("{function}: Value at index {index} does not match its structure: {source}")]
    Structure {
        /// Name of the called function.
        function: String,
        /// Zero-based position of the offending argument.
        index: usize,
        /// The first failing check inside the structure.
        source: CheckError,
    },

    /// A validation error raised at registration, such as an unknown type.
    #[error(transparent)]
    Check(#[from] CheckError),

    /// The function body itself failed.
    #[error(transparent)]
    Function(anyhow::Error),
}

impl DispatchError {
    /// The argument index this error refers to, if any.
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Conversion { index, .. } | Self::Structure { index, .. } => Some(*index),
            _ => None,
        }
    }
}
