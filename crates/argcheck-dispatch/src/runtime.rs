//! # Runtime
//!
//! The single context object owning one [`TypeCatalog`] and one
//! [`FunctionRegistry`]. Registration takes `&mut self`; calls take `&self`,
//! so a fully built runtime can be shared read-only.
//!
//! ```
//! use argcheck_core::Value;
//! use argcheck_dispatch::{NativeFunction, Runtime};
//!
//! let mut rt = Runtime::with_builtins().unwrap();
//! rt.register_function(
//!     NativeFunction::new("add", |args| {
//!         let a = args[0].as_i64().unwrap_or_default();
//!         let b = args[1].as_i64().unwrap_or_default();
//!         Ok(Value::from(a + b))
//!     }),
//!     ["Int", "Int"],
//! )
//! .unwrap();
//!
//! assert_eq!(rt.call("add", vec![3.into(), 4.into()]).unwrap(), Value::from(7));
//! assert!(rt.call("add", vec![3.5.into(), 4.into()]).is_err());
//! ```

use argcheck_core::{CheckConfig, CheckResult, TypeCatalog, TypeValidator, Value};
use argcheck_schema::TypeSpecifier;

use crate::error::DispatchError;
use crate::function::NativeFunction;
use crate::registry::{FunctionRegistry, RegisteredFunction, Registration};

/// Owner of a type catalog and the functions checked against it.
#[derive(Debug, Clone, Default)]
pub struct Runtime {
    catalog: TypeCatalog,
    functions: FunctionRegistry,
}

impl Runtime {
    /// Empty runtime with the default policy and no types.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty runtime validating under `config`.
    pub fn with_config(config: CheckConfig) -> Self {
        Self::from_catalog(TypeCatalog::with_config(config))
    }

    /// Runtime over an existing catalog.
    pub fn from_catalog(catalog: TypeCatalog) -> Self {
        Self {
            catalog,
            functions: FunctionRegistry::new(),
        }
    }

    /// Runtime preloaded with the built-in types.
    pub fn with_builtins() -> CheckResult<Self> {
        Self::with_builtins_and_config(CheckConfig::default())
    }

    /// Runtime preloaded with the built-in types, validating under `config`.
    pub fn with_builtins_and_config(config: CheckConfig) -> CheckResult<Self> {
        let mut catalog = TypeCatalog::with_config(config);
        argcheck_types::install_builtins(&mut catalog)?;
        Ok(Self::from_catalog(catalog))
    }

    pub fn catalog(&self) -> &TypeCatalog {
        &self.catalog
    }

    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    /// Add a type to the catalog. See [`TypeCatalog::register`].
    pub fn register_type(
        &mut self,
        name: impl Into<String>,
        validator: impl TypeValidator + 'static,
    ) -> CheckResult<()> {
        self.catalog.register(name, validator)
    }

    /// Wrap `function` so every call is checked against `specifiers`.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::InvalidArgument`] if the function name is blank or
    ///   a specifier is an inline object schema.
    /// - [`DispatchError::DuplicateFunction`] if the name is taken.
    /// - [`DispatchError::Check`] wrapping
    ///   [`CheckError::UnknownType`](argcheck_core::CheckError::UnknownType)
    ///   if a name-form specifier is not in the catalog. Names inside
    ///   structures are only checked here when
    ///   [`CheckConfig::eager_nested_type_check`] is set.
    pub fn register_function<S>(
        &mut self,
        function: NativeFunction,
        specifiers: impl IntoIterator<Item = S>,
    ) -> Result<(), DispatchError>
    where
        S: Into<TypeSpecifier>,
    {
        let specifiers: Vec<TypeSpecifier> = specifiers.into_iter().map(Into::into).collect();
        let name = function.name();

        if name.trim().is_empty() {
            return Err(DispatchError::InvalidArgument(
                "function name must not be empty".to_string(),
            ));
        }
        if self.functions.contains(name) {
            return Err(DispatchError::DuplicateFunction {
                name: name.to_string(),
            });
        }

        let eager_nested = self.catalog.config().eager_nested_type_check;
        for (index, spec) in specifiers.iter().enumerate() {
            match spec {
                TypeSpecifier::Name(type_name) => {
                    self.catalog.lookup(type_name)?;
                }
                TypeSpecifier::Structure(structure) if eager_nested => {
                    structure.check_types(&self.catalog)?;
                }
                TypeSpecifier::Structure(_) => {}
                TypeSpecifier::Inline(_) => {
                    return Err(DispatchError::InvalidArgument(format!(
                        "argument {index} of \"{name}\": inline object schemas are only allowed inside a structure"
                    )));
                }
            }
        }

        tracing::debug!(function = %name, arity = specifiers.len(), "registered function");
        self.functions
            .insert(RegisteredFunction::new(function, specifiers))
    }

    /// Register each pair in order, stopping at the first failure.
    ///
    /// Pairs registered before the failure stay registered.
    pub fn register_functions<I>(&mut self, pairs: I) -> Result<(), DispatchError>
    where
        I: IntoIterator<Item = (NativeFunction, Vec<TypeSpecifier>)>,
    {
        for (function, specifiers) in pairs {
            self.register_function(function, specifiers)?;
        }
        Ok(())
    }

    /// Combined entry point accepting a single pair or a batch.
    pub fn register(&mut self, registration: impl Into<Registration>) -> Result<(), DispatchError> {
        match registration.into() {
            Registration::Single(function, specifiers) => {
                self.register_function(function, specifiers)
            }
            Registration::Batch(pairs) => self.register_functions(pairs),
        }
    }

    /// The wrapped callable registered under `name`.
    pub fn function(&self, name: &str) -> Option<BoundFunction<'_>> {
        self.functions.get(name).map(|entry| BoundFunction {
            catalog: &self.catalog,
            entry,
        })
    }

    /// Registered function names in sorted order.
    pub fn function_names(&self) -> Vec<&str> {
        self.functions.names()
    }

    /// Call the function registered under `name`.
    ///
    /// # Errors
    ///
    /// [`DispatchError::UnknownFunction`] if nothing is registered under
    /// `name`, otherwise see [`RegisteredFunction::invoke`].
    pub fn call(&self, name: &str, args: Vec<Value>) -> Result<Value, DispatchError> {
        self.function(name)
            .ok_or_else(|| DispatchError::UnknownFunction {
                name: name.to_string(),
            })?
            .call(args)
    }
}

/// A registered function paired with the catalog it is checked against.
#[derive(Debug, Clone, Copy)]
pub struct BoundFunction<'a> {
    catalog: &'a TypeCatalog,
    entry: &'a RegisteredFunction,
}

impl<'a> BoundFunction<'a> {
    pub fn name(&self) -> &'a str {
        self.entry.name()
    }

    pub fn arity(&self) -> usize {
        self.entry.arity()
    }

    pub fn specifiers(&self) -> &'a [TypeSpecifier] {
        self.entry.specifiers()
    }

    /// Check `args` and run the function.
    pub fn call(&self, args: Vec<Value>) -> Result<Value, DispatchError> {
        self.entry.invoke(self.catalog, args)
    }
}
