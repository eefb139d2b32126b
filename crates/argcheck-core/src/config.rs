//! Validation policy configuration.
//!
//! Every switch defaults to `false`, which reproduces the documented
//! coercion contract exactly. Override via explicit construction or
//! environment variables.

/// Coercion and registration policy, owned by a [`TypeCatalog`](crate::TypeCatalog).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CheckConfig {
    /// Replace array elements with their unwrapped instance values, the way
    /// object fields are replaced. Off by default: array schemas check
    /// elements without rewriting them.
    pub coerce_array_elements: bool,

    /// When a structure field is validated by constructing a fresh value
    /// (not an instance pass-through), overwrite the field with the
    /// constructed normalized value.
    pub coerce_constructed_fields: bool,

    /// At function registration, also resolve every type name nested inside
    /// structure specifiers, not just top-level names.
    pub eager_nested_type_check: bool,
}

impl CheckConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables (each accepts `1/true/yes/on` or `0/false/no/off`):
    /// - `ARGCHECK_COERCE_ARRAY_ELEMENTS` (default: false)
    /// - `ARGCHECK_COERCE_CONSTRUCTED_FIELDS` (default: false)
    /// - `ARGCHECK_EAGER_NESTED_TYPE_CHECK` (default: false)
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            coerce_array_elements: env_flag("ARGCHECK_COERCE_ARRAY_ELEMENTS")?,
            coerce_constructed_fields: env_flag("ARGCHECK_COERCE_CONSTRUCTED_FIELDS")?,
            eager_nested_type_check: env_flag("ARGCHECK_EAGER_NESTED_TYPE_CHECK")?,
        })
    }

    /// Enable every coercion and eager check.
    pub fn strict() -> Self {
        Self {
            coerce_array_elements: true,
            coerce_constructed_fields: true,
            eager_nested_type_check: true,
        }
    }
}

fn env_flag(var: &str) -> Result<bool, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => parse_flag(&raw).ok_or_else(|| ConfigError::InvalidFlag(var.to_string(), raw)),
        Err(_) => Ok(false),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid boolean for {0}: {1:?}")]
    InvalidFlag(String, String),
}
