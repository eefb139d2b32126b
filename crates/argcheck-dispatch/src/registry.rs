//! # Function Registry
//!
//! Maps function names to [`RegisteredFunction`] entries. Like the type
//! catalog, the registry is append-only: an entry is never replaced, and a
//! failed registration leaves every earlier entry untouched.

use std::collections::BTreeMap;

use argcheck_core::{TypeCatalog, Value};
use argcheck_schema::TypeSpecifier;

use crate::error::DispatchError;
use crate::function::NativeFunction;

/// A function bound to its positional argument specifiers.
#[derive(Debug, Clone)]
pub struct RegisteredFunction {
    function: NativeFunction,
    specifiers: Vec<TypeSpecifier>,
}

impl RegisteredFunction {
    pub(crate) fn new(function: NativeFunction, specifiers: Vec<TypeSpecifier>) -> Self {
        Self {
            function,
            specifiers,
        }
    }

    pub fn name(&self) -> &str {
        self.function.name()
    }

    pub fn specifiers(&self) -> &[TypeSpecifier] {
        &self.specifiers
    }

    pub fn arity(&self) -> usize {
        self.specifiers.len()
    }

    /// The unwrapped function.
    pub fn function(&self) -> &NativeFunction {
        &self.function
    }

    /// Check and coerce `args`, then run the body.
    ///
    /// Per position:
    ///
    /// - a structure specifier validates the argument in place and passes
    ///   the (possibly coerced) value through;
    /// - a name specifier passes the inner value of an instance the catalog
    ///   recognizes, otherwise the validator's normalized value.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::Arity`] if `args.len()` differs from the arity.
    /// - [`DispatchError::Structure`] if a structure argument fails validation.
    /// - [`DispatchError::Conversion`] if a name-form argument is rejected.
    /// - [`DispatchError::Function`] if the body fails.
    pub fn invoke(&self, catalog: &TypeCatalog, args: Vec<Value>) -> Result<Value, DispatchError> {
        if args.len() != self.arity() {
            return Err(DispatchError::Arity {
                function: self.name().to_string(),
                expected: self.arity(),
                found: args.len(),
            });
        }

        let mut mapped = Vec::with_capacity(args.len());
        for (index, (mut value, spec)) in args.into_iter().zip(&self.specifiers).enumerate() {
            match spec {
                TypeSpecifier::Structure(structure) => {
                    structure
                        .validate(catalog, &mut value)
                        .map_err(|source| DispatchError::Structure {
                            function: self.name().to_string(),
                            index,
                            source,
                        })?;
                    tracing::trace!(function = %self.name(), index, "validated structure argument");
                    mapped.push(value);
                }
                TypeSpecifier::Name(type_name) => {
                    let normalized = catalog.construct(type_name, &value).map_err(|source| {
                        DispatchError::Conversion {
                            function: self.name().to_string(),
                            index,
                            type_name: type_name.clone(),
                            source,
                        }
                    })?;
                    tracing::trace!(function = %self.name(), index, type_name = %type_name, "coerced argument");
                    mapped.push(normalized);
                }
                TypeSpecifier::Inline(_) => {
                    return Err(DispatchError::InvalidArgument(format!(
                        "argument {index} of \"{}\" uses an inline object schema",
                        self.name()
                    )));
                }
            }
        }

        self.function.call(mapped).map_err(DispatchError::Function)
    }
}

/// Name-keyed table of registered functions.
#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    entries: BTreeMap<String, RegisteredFunction>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `entry` under its function name.
    ///
    /// # Errors
    ///
    /// [`DispatchError::DuplicateFunction`] if the name is taken.
    pub fn insert(&mut self, entry: RegisteredFunction) -> Result<(), DispatchError> {
        if self.entries.contains_key(entry.name()) {
            return Err(DispatchError::DuplicateFunction {
                name: entry.name().to_string(),
            });
        }
        self.entries.insert(entry.name().to_string(), entry);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&RegisteredFunction> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered function names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegisteredFunction> {
        self.entries.values()
    }
}

/// Argument to [`Runtime::register`](crate::Runtime::register): one function
/// or an ordered batch.
#[derive(Debug, Clone)]
pub enum Registration {
    Single(NativeFunction, Vec<TypeSpecifier>),
    Batch(Vec<(NativeFunction, Vec<TypeSpecifier>)>),
}

impl From<(NativeFunction, Vec<TypeSpecifier>)> for Registration {
    fn from((function, specifiers): (NativeFunction, Vec<TypeSpecifier>)) -> Self {
        Self::Single(function, specifiers)
    }
}

impl From<Vec<(NativeFunction, Vec<TypeSpecifier>)>> for Registration {
    fn from(batch: Vec<(NativeFunction, Vec<TypeSpecifier>)>) -> Self {
        Self::Batch(batch)
    }
}
