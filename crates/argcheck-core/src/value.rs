//! # Dynamic Values
//!
//! [`Value`] is the argument model for wrapped functions: a JSON-shaped tree
//! extended with [`Instance`], a value that a named validator has already
//! normalized.
//!
//! ## Invariant
//!
//! `Instance` has no public constructor. The only way to obtain one is
//! [`TypeCatalog::instantiate`](crate::TypeCatalog::instantiate), which runs
//! the validator first, so an instance always wraps a value its validator
//! accepted. The instance also holds that validator, and pass-through
//! requires the very same validator object
//! ([`TypeCatalog::recognizes`](crate::TypeCatalog::recognizes)), not just
//! the same type name. An instance built by one catalog is therefore a raw
//! value to any catalog that registered a different validator under that
//! name.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::Number;

use crate::validator::TypeValidator;

/// A dynamically-typed argument or field value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent or explicit null.
    #[default]
    Null,
    /// Boolean.
    Bool(bool),
    /// Number, keeping the integer/float distinction.
    Number(Number),
    /// UTF-8 string.
    String(String),
    /// Ordered sequence.
    Array(Vec<Value>),
    /// Field map, iterated in key order.
    Object(BTreeMap<String, Value>),
    /// A value already normalized by a named validator.
    Instance(Instance),
}

/// A value tagged with the validator that normalized it.
#[derive(Clone)]
pub struct Instance {
    type_name: String,
    value: Box<Value>,
    origin: Arc<dyn TypeValidator>,
}

impl Instance {
    pub(crate) fn new(
        type_name: impl Into<String>,
        value: Value,
        origin: Arc<dyn TypeValidator>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            value: Box::new(value),
            origin,
        }
    }

    /// Name of the validator that produced this instance.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The normalized value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Consume the instance, returning the normalized value.
    pub fn into_value(self) -> Value {
        *self.value
    }

    /// Whether this instance carries the type name `type_name`.
    ///
    /// A name match alone does not make an instance trusted; see
    /// [`Instance::is_produced_by`].
    pub fn is_instance_of(&self, type_name: &str) -> bool {
        self.type_name == type_name
    }

    /// Whether `validator` is the exact validator object that built this
    /// instance. Compares addresses, not behaviour.
    pub fn is_produced_by(&self, validator: &Arc<dyn TypeValidator>) -> bool {
        same_validator(&self.origin, validator)
    }
}

fn same_validator(a: &Arc<dyn TypeValidator>, b: &Arc<dyn TypeValidator>) -> bool {
    Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name
            && self.value == other.value
            && same_validator(&self.origin, &other.origin)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("type_name", &self.type_name)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

impl Value {
    /// Build an object value from `(field, value)` pairs.
    pub fn object<K, V, I>(fields: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Object(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Short name of the value's shape, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
            Self::Instance(_) => "instance",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Integer view. Floats with no fractional part are accepted.
    pub fn as_i64(&self) -> Option<i64> {
        let n = self.as_number()?;
        if let Some(i) = n.as_i64() {
            return Some(i);
        }
        let f = n.as_f64()?;
        // i64::MAX rounds up to 2^63 as a float, so the upper bound is exclusive.
        if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
            Some(f as i64)
        } else {
            None
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().and_then(Number::as_f64)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Object(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut BTreeMap<String, Value>> {
        match self {
            Self::Object(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn as_instance(&self) -> Option<&Instance> {
        match self {
            Self::Instance(inst) => Some(inst),
            _ => None,
        }
    }

    /// The inner value of an instance, or `self` for every other variant.
    pub fn as_raw(&self) -> &Value {
        match self {
            Self::Instance(inst) => inst.value(),
            other => other,
        }
    }

    /// Look up an object field. Returns `None` for non-objects.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.as_object().and_then(|fields| fields.get(field))
    }

    /// Convert to plain JSON. Instances are flattened to their inner value.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Null => serde_json::Value::Null,
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Number(n) => serde_json::Value::Number(n.clone()),
            Self::String(s) => serde_json::Value::String(s.clone()),
            Self::Array(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Self::Object(fields) => serde_json::Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            Self::Instance(inst) => inst.value().to_json(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => n.serialize(serializer),
            Self::String(s) => serializer.serialize_str(s),
            Self::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Object(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (k, v) in fields {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            Self::Instance(inst) => inst.value().serialize(serializer),
        }
    }
}

// ─── Conversions ────────────────────────────────────────────────────

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(fields) => Self::Object(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(v: Value) -> Self {
        v.to_json()
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(n.into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Self::Number(n.into())
    }
}

/// Non-finite floats have no JSON number form and become `Null`.
impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Number::from_f64(n).map_or(Self::Null, Self::Number)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Array(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(fields: BTreeMap<String, Value>) -> Self {
        Self::Object(fields)
    }
}

impl From<Instance> for Value {
    fn from(inst: Instance) -> Self {
        Self::Instance(inst)
    }
}
