//! # Native Functions
//!
//! A [`NativeFunction`] is a named body taking positional [`Value`]s. It is
//! the unit the dispatcher wraps: the body only ever sees arguments that
//! already passed their declared type checks.

use std::fmt;
use std::sync::Arc;

use argcheck_core::Value;

/// Signature every function body implements.
pub type FunctionBody = dyn Fn(Vec<Value>) -> anyhow::Result<Value> + Send + Sync;

/// A named, callable function body.
#[derive(Clone)]
pub struct NativeFunction {
    name: String,
    body: Arc<FunctionBody>,
}

impl NativeFunction {
    /// Bind `body` to `name`. The name is the registry key.
    ///
    /// ```
    /// use argcheck_core::Value;
    /// use argcheck_dispatch::NativeFunction;
    ///
    /// let len = NativeFunction::new("len", |args| Ok(Value::from(args.len() as u64)));
    /// assert_eq!(len.name(), "len");
    /// ```
    pub fn new<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(Vec<Value>) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            body: Arc::new(body),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the body directly, bypassing any argument checks.
    pub fn call(&self, args: Vec<Value>) -> anyhow::Result<Value> {
        (self.body)(args)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
