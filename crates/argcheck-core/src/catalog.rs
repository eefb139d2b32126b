//! # Type Catalog
//!
//! Maps type names to validators. The catalog is append-only: there is no
//! removal or replacement, and a duplicate name is rejected without touching
//! the existing entry.
//!
//! The catalog is an ordinary value owned by its caller (usually a
//! `Runtime` in `argcheck-dispatch`). Two catalogs never share state.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::config::CheckConfig;
use crate::error::{CheckError, CheckResult};
use crate::validator::TypeValidator;
use crate::value::{Instance, Value};

/// A table of named validators plus the policy they are applied under.
#[derive(Clone, Default)]
pub struct TypeCatalog {
    validators: BTreeMap<String, Arc<dyn TypeValidator>>,
    config: CheckConfig,
}

impl TypeCatalog {
    /// Create an empty catalog with the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty catalog with an explicit policy.
    pub fn with_config(config: CheckConfig) -> Self {
        Self {
            validators: BTreeMap::new(),
            config,
        }
    }

    /// The policy this catalog validates under.
    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Register a validator under `name`.
    ///
    /// # Errors
    ///
    /// - [`CheckError::InvalidValidator`] if `name` is blank or contains
    ///   whitespace.
    /// - [`CheckError::DuplicateType`] if `name` is already registered.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        validator: impl TypeValidator + 'static,
    ) -> CheckResult<()> {
        self.register_shared(name, Arc::new(validator))
    }

    /// Register an already shared validator under `name`.
    ///
    /// Useful for binding one validator to several names.
    pub fn register_shared(
        &mut self,
        name: impl Into<String>,
        validator: Arc<dyn TypeValidator>,
    ) -> CheckResult<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CheckError::InvalidValidator {
                name,
                reason: "type name must not be empty".to_string(),
            });
        }
        if name.chars().any(char::is_whitespace) {
            return Err(CheckError::InvalidValidator {
                name,
                reason: "type name must not contain whitespace".to_string(),
            });
        }
        if self.validators.contains_key(&name) {
            return Err(CheckError::DuplicateType { name });
        }

        tracing::debug!(type_name = %name, "registered type");
        self.validators.insert(name, validator);
        Ok(())
    }

    /// Resolve a validator by name.
    ///
    /// # Errors
    ///
    /// [`CheckError::UnknownType`] if no validator is registered under `name`.
    pub fn lookup(&self, name: &str) -> CheckResult<&dyn TypeValidator> {
        self.validators
            .get(name)
            .map(|v| v.as_ref())
            .ok_or_else(|| CheckError::unknown_type(name))
    }

    /// Shared handle to a validator, if registered.
    pub fn get(&self, name: &str) -> Option<Arc<dyn TypeValidator>> {
        self.validators.get(name).cloned()
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.validators.contains_key(name)
    }

    /// Registered type names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.validators.keys().map(String::as_str).collect()
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Returns true if no types are registered.
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    fn entry(&self, name: &str) -> CheckResult<&Arc<dyn TypeValidator>> {
        self.validators
            .get(name)
            .ok_or_else(|| CheckError::unknown_type(name))
    }

    /// Whether `inst` was built by the validator registered here under
    /// `name`. A same-named instance from a catalog holding a different
    /// validator is not recognized.
    pub fn recognizes(&self, name: &str, inst: &Instance) -> bool {
        inst.is_instance_of(name)
            && self
                .validators
                .get(name)
                .is_some_and(|validator| inst.is_produced_by(validator))
    }

    /// Construct the normalized value for `raw` under the validator `name`.
    ///
    /// A recognized instance short-circuits to its inner value without
    /// re-running the validator. Any other instance is validated on its inner
    /// value like a raw one.
    pub fn construct(&self, name: &str, raw: &Value) -> CheckResult<Value> {
        let validator = self.entry(name)?;
        if let Value::Instance(inst) = raw {
            if self.recognizes(name, inst) {
                return Ok(inst.value().clone());
            }
        }
        validator.construct(raw.as_raw(), self)
    }

    /// Build an [`Instance`] of type `name` from `raw`.
    ///
    /// This is the only way to obtain an instance. Passing a recognized
    /// instance returns it unchanged.
    ///
    /// # Errors
    ///
    /// [`CheckError::UnknownType`] for an unregistered name, otherwise
    /// whatever the validator rejects `raw` with.
    pub fn instantiate(&self, name: &str, raw: impl Into<Value>) -> CheckResult<Instance> {
        let raw = raw.into();
        let validator = self.entry(name)?;
        if let Value::Instance(inst) = &raw {
            if self.recognizes(name, inst) {
                return Ok(inst.clone());
            }
        }
        let value = validator.construct(raw.as_raw(), self)?;
        Ok(Instance::new(name, value, Arc::clone(validator)))
    }
}

impl fmt::Debug for TypeCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeCatalog")
            .field("types", &self.names())
            .field("config", &self.config)
            .finish()
    }
}
