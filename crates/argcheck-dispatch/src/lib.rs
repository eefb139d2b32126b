//! # argcheck-dispatch — Function Registry & Dispatcher
//!
//! Binds a function to a positional list of [`TypeSpecifier`]s and checks
//! every call before the body runs. Name-form specifiers are resolved
//! against the runtime's type catalog at registration time; structure-form
//! specifiers are validated per call.
//!
//! ## Call Semantics
//!
//! 1. Arity: the argument count must equal the specifier count.
//! 2. Each argument is checked in order; the first failure aborts the call.
//! 3. Name-form arguments are replaced by their normalized value;
//!    structure-form arguments are validated in place and passed through.
//! 4. The body receives the mapped arguments and its result is returned
//!    unchanged.
//!
//! ## Crate Policy
//!
//! - Registration is append-only and never rolled back.
//! - No global state: every table lives in a [`Runtime`].
//!
//! [`TypeSpecifier`]: argcheck_schema::TypeSpecifier

pub mod error;
pub mod function;
pub mod registry;
pub mod runtime;

pub use error::DispatchError;
pub use function::{FunctionBody, NativeFunction};
pub use registry::{FunctionRegistry, RegisteredFunction, Registration};
pub use runtime::{BoundFunction, Runtime};
