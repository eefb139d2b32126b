//! # Structure Validation
//!
//! ## Algorithm
//!
//! - **Array schema** `[item]`: the value must be an array; every element is
//!   checked against `item`. The first failing element aborts validation.
//!   Elements are left as supplied unless
//!   [`CheckConfig::coerce_array_elements`](argcheck_core::CheckConfig) is set.
//! - **Object schema**: the value must be an object; fields are visited in
//!   declaration order, each must be present, and a field whose check yields
//!   a normalized value is overwritten with it.
//!
//! Item-level checks dispatch on the specifier:
//!
//! - nested structure: validated recursively in place, yields nothing;
//! - inline field schema: every declared field must be present and is
//!   checked recursively, yields nothing;
//! - type name: an instance built by this catalog's validator for that name
//!   yields its inner value; any other value (including a same-named
//!   instance from another catalog, checked on its inner value) is run
//!   through the validator's `construct` and then its post-hoc `validate`,
//!   and yields nothing (or the constructed value when
//!   `coerce_constructed_fields` is set).

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use argcheck_core::{CheckError, CheckResult, TypeCatalog, Value};

use crate::specifier::{ObjectSchema, TypeSpecifier};

/// The two schema kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Definition {
    /// Homogeneous array; every element matches the item specifier.
    Array(Box<TypeSpecifier>),
    /// Object with named, typed fields.
    Object(ObjectSchema),
}

/// An immutable structural schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    definition: Definition,
}

impl Structure {
    /// Array schema whose elements all match `item`.
    pub fn array(item: impl Into<TypeSpecifier>) -> Self {
        Self {
            definition: Definition::Array(Box::new(item.into())),
        }
    }

    /// Object schema with the given fields.
    pub fn object(schema: ObjectSchema) -> Self {
        Self {
            definition: Definition::Object(schema),
        }
    }

    /// Object schema from `(field, specifier)` pairs.
    ///
    /// ```
    /// use argcheck_schema::Structure;
    ///
    /// let user = Structure::fields([("name", "String"), ("age", "Int")]);
    /// assert!(user.as_object().is_some());
    /// ```
    pub fn fields<K, V, I>(fields: I) -> Self
    where
        K: Into<String>,
        V: Into<TypeSpecifier>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::object(fields.into_iter().collect())
    }

    pub fn definition(&self) -> &Definition {
        &self.definition
    }

    /// The item specifier, for array schemas.
    pub fn as_array(&self) -> Option<&TypeSpecifier> {
        match &self.definition {
            Definition::Array(item) => Some(item),
            Definition::Object(_) => None,
        }
    }

    /// The field schema, for object schemas.
    pub fn as_object(&self) -> Option<&ObjectSchema> {
        match &self.definition {
            Definition::Array(_) => None,
            Definition::Object(schema) => Some(schema),
        }
    }

    /// Validate `value` against this schema, coercing object fields in place.
    ///
    /// # Errors
    ///
    /// - [`CheckError::TypeMismatch`] if the value has the wrong shape.
    /// - [`CheckError::MissingField`] for an absent required field.
    /// - [`CheckError::UnknownType`] for an unregistered type name.
    /// - Any error raised by a validator, unchanged.
    pub fn validate(&self, catalog: &TypeCatalog, value: &mut Value) -> CheckResult<()> {
        match &self.definition {
            Definition::Array(item) => {
                let found = value.kind();
                let items = value.as_array_mut().ok_or(CheckError::TypeMismatch {
                    expected: "array",
                    found,
                })?;
                let coerce = catalog.config().coerce_array_elements;
                for (index, element) in items.iter_mut().enumerate() {
                    let replacement = validate_item(item, element, catalog)?;
                    if coerce {
                        if let Some(normalized) = replacement {
                            tracing::trace!(index, "coerced array element");
                            *element = normalized;
                        }
                    }
                }
                Ok(())
            }
            Definition::Object(schema) => {
                let found = value.kind();
                let fields = value.as_object_mut().ok_or(CheckError::TypeMismatch {
                    expected: "object",
                    found,
                })?;
                for (key, spec) in schema.iter() {
                    let slot = fields
                        .get_mut(key)
                        .ok_or_else(|| CheckError::missing_field(key))?;
                    if let Some(normalized) = validate_item(spec, slot, catalog)? {
                        tracing::trace!(field = key, "coerced object field");
                        *slot = normalized;
                    }
                }
                Ok(())
            }
        }
    }

    /// Validate a copy of `value` and return the coerced copy.
    ///
    /// The caller's value is never modified.
    pub fn normalize(&self, catalog: &TypeCatalog, value: &Value) -> CheckResult<Value> {
        let mut copy = value.clone();
        self.validate(catalog, &mut copy)?;
        Ok(copy)
    }

    /// Every type name reachable from this schema, sorted and deduplicated.
    pub fn referenced_types(&self) -> BTreeSet<&str> {
        let mut out = BTreeSet::new();
        self.collect_names(&mut out);
        out
    }

    /// Fail with [`CheckError::UnknownType`] for the first referenced type
    /// name (in sorted order) that `catalog` does not know.
    pub fn check_types(&self, catalog: &TypeCatalog) -> CheckResult<()> {
        match self.referenced_types().into_iter().find(|n| !catalog.contains(n)) {
            Some(missing) => Err(CheckError::unknown_type(missing)),
            None => Ok(()),
        }
    }

    pub(crate) fn collect_names<'a>(&'a self, out: &mut BTreeSet<&'a str>) {
        match &self.definition {
            Definition::Array(item) => item.collect_names(out),
            Definition::Object(schema) => schema.collect_names(out),
        }
    }

    /// Render the definition back to its JSON form.
    pub fn to_json(&self) -> serde_json::Value {
        match &self.definition {
            Definition::Array(item) => serde_json::Value::Array(vec![item.to_json()]),
            Definition::Object(schema) => schema.to_json(),
        }
    }
}

fn validate_item(
    spec: &TypeSpecifier,
    value: &mut Value,
    catalog: &TypeCatalog,
) -> CheckResult<Option<Value>> {
    match spec {
        TypeSpecifier::Structure(nested) => {
            nested.validate(catalog, value)?;
            Ok(None)
        }
        TypeSpecifier::Inline(schema) => {
            validate_inline(schema, value, catalog)?;
            Ok(None)
        }
        TypeSpecifier::Name(name) => {
            let validator = catalog.lookup(name)?;
            if let Value::Instance(inst) = value {
                if catalog.recognizes(name, inst) {
                    return Ok(Some(inst.value().clone()));
                }
            }
            let raw = value.as_raw();
            let constructed = validator.construct(raw, catalog)?;
            validator.validate(raw, catalog)?;
            if catalog.config().coerce_constructed_fields {
                Ok(Some(constructed))
            } else {
                Ok(None)
            }
        }
    }
}

fn validate_inline(schema: &ObjectSchema, value: &mut Value, catalog: &TypeCatalog) -> CheckResult<()> {
    let found = value.kind();
    let fields = value.as_object_mut().ok_or(CheckError::TypeMismatch {
        expected: "object",
        found,
    })?;
    for (key, spec) in schema.iter() {
        let slot = fields
            .get_mut(key)
            .ok_or_else(|| CheckError::missing_field(key))?;
        validate_item(spec, slot, catalog)?;
    }
    Ok(())
}

impl Serialize for Structure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Structure {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Structure::from_json(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argcheck_core::{from_fn, CheckConfig};
    use serde_json::json;

    fn int(raw: &Value) -> CheckResult<Value> {
        match raw.as_number() {
            Some(n) if n.is_i64() || n.is_u64() => Ok(raw.clone()),
            _ => raw
                .as_i64()
                .map(Value::from)
                .ok_or_else(|| CheckError::constraint("Int", "Int must be an integer")),
        }
    }

    fn string(raw: &Value) -> CheckResult<Value> {
        raw.as_str()
            .map(Value::from)
            .ok_or_else(|| CheckError::constraint("String", "Expected a string"))
    }

    fn catalog_with(config: CheckConfig) -> TypeCatalog {
        let mut c = TypeCatalog::with_config(config);
        c.register("Int", from_fn(int)).unwrap();
        c.register("String", from_fn(string)).unwrap();
        c
    }

    fn catalog() -> TypeCatalog {
        catalog_with(CheckConfig::default())
    }

    #[test]
    fn object_schema_accepts_plain_values() {
        let c = catalog();
        let s = Structure::fields([("age", "Int")]);
        let mut v = Value::from(json!({"age": 5}));
        s.validate(&c, &mut v).unwrap();
        assert_eq!(v.get("age"), Some(&Value::from(5)));
    }

    #[test]
    fn object_schema_missing_field() {
        let c = catalog();
        let s = Structure::fields([("age", "Int")]);
        let mut v = Value::from(json!({}));
        assert_eq!(
            s.validate(&c, &mut v).unwrap_err(),
            CheckError::missing_field("age")
        );
    }

    #[test]
    fn object_schema_rejects_non_objects() {
        let c = catalog();
        let s = Structure::fields([("age", "Int")]);
        for bad in [json!(null), json!([1]), json!("x"), json!(3)] {
            let mut v = Value::from(bad);
            assert!(matches!(
                s.validate(&c, &mut v),
                Err(CheckError::TypeMismatch { expected: "object", .. })
            ));
        }
    }

    #[test]
    fn object_schema_unwraps_instances_in_place() {
        let c = catalog();
        let s = Structure::fields([("name", "String"), ("age", "Int")]);
        let mut v = Value::object([
            ("name", Value::from(c.instantiate("String", "Anna").unwrap())),
            ("age", Value::from(c.instantiate("Int", 30).unwrap())),
        ]);
        s.validate(&c, &mut v).unwrap();
        assert_eq!(v.to_json(), json!({"name": "Anna", "age": 30}));
        assert!(v.get("name").and_then(Value::as_instance).is_none());
    }

    #[test]
    fn instance_field_skips_the_validator() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let mut c = TypeCatalog::new();
        c.register(
            "Tag",
            from_fn(move |raw: &Value| {
                seen.fetch_add(1, Ordering::SeqCst);
                Ok(raw.clone())
            }),
        )
        .unwrap();

        let tag = c.instantiate("Tag", "red").unwrap();
        let s = Structure::fields([("tag", "Tag")]);
        let mut v = Value::object([("tag", Value::from(tag))]);
        s.validate(&c, &mut v).unwrap();
        assert_eq!(v.to_json(), json!({"tag": "red"}));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn same_named_instance_from_another_catalog_is_checked() {
        let mut lenient = TypeCatalog::new();
        lenient
            .register("Small", from_fn(|raw: &Value| Ok(raw.clone())))
            .unwrap();
        let mut c = TypeCatalog::new();
        c.register(
            "Small",
            from_fn(|raw: &Value| match raw.as_i64() {
                Some(n) if n < 10 => Ok(Value::from(n)),
                _ => Err(CheckError::constraint("Small", "Small must be below 10")),
            }),
        )
        .unwrap();

        let s = Structure::fields([("n", "Small")]);
        let foreign = Value::from(lenient.instantiate("Small", 50).unwrap());
        let mut v = Value::object([("n", foreign)]);
        assert_eq!(
            s.validate(&c, &mut v).unwrap_err().to_string(),
            "Small must be below 10"
        );

        let fits = Value::from(lenient.instantiate("Small", 3).unwrap());
        let mut ok = Value::object([("n", fits)]);
        s.validate(&c, &mut ok).unwrap();
    }

    #[test]
    fn extra_fields_are_ignored() {
        let c = catalog();
        let s = Structure::fields([("age", "Int")]);
        let mut v = Value::from(json!({"age": 1, "other": "kept"}));
        s.validate(&c, &mut v).unwrap();
        assert_eq!(v.get("other").and_then(Value::as_str), Some("kept"));
    }

    #[test]
    fn constructed_field_not_replaced_by_default() {
        let c = catalog();
        let s = Structure::fields([("age", "Int")]);
        let mut v = Value::from(json!({"age": 4.0}));
        s.validate(&c, &mut v).unwrap();
        assert_eq!(v.get("age").and_then(Value::as_f64), Some(4.0));
        assert!(!v.get("age").and_then(Value::as_number).unwrap().is_i64());
    }

    #[test]
    fn constructed_field_replaced_when_configured() {
        let c = catalog_with(CheckConfig {
            coerce_constructed_fields: true,
            ..CheckConfig::default()
        });
        let s = Structure::fields([("age", "Int")]);
        let mut v = Value::from(json!({"age": 4.0}));
        s.validate(&c, &mut v).unwrap();
        assert!(v.get("age").and_then(Value::as_number).unwrap().is_i64());
    }

    #[test]
    fn array_schema_fails_on_first_bad_element() {
        let c = catalog();
        let s = Structure::array("Int");
        let mut v = Value::from(json!([1, 2, "x"]));
        assert_eq!(
            s.validate(&c, &mut v).unwrap_err().to_string(),
            "Int must be an integer"
        );
    }

    #[test]
    fn array_schema_rejects_non_arrays() {
        let c = catalog();
        let s = Structure::array("Int");
        let mut v = Value::from(json!({"0": 1}));
        assert_eq!(
            s.validate(&c, &mut v).unwrap_err(),
            CheckError::TypeMismatch {
                expected: "array",
                found: "object"
            }
        );
    }

    #[test]
    fn array_elements_not_replaced_by_default() {
        let c = catalog();
        let s = Structure::array("Int");
        let inst = Value::from(c.instantiate("Int", 1).unwrap());
        let mut v = Value::Array(vec![inst.clone(), Value::from(2)]);
        s.validate(&c, &mut v).unwrap();
        assert_eq!(v.as_array().unwrap()[0], inst);
    }

    #[test]
    fn array_elements_replaced_when_configured() {
        let c = catalog_with(CheckConfig {
            coerce_array_elements: true,
            ..CheckConfig::default()
        });
        let s = Structure::array("Int");
        let inst = Value::from(c.instantiate("Int", 1).unwrap());
        let mut v = Value::Array(vec![inst, Value::from(2)]);
        s.validate(&c, &mut v).unwrap();
        assert_eq!(v.to_json(), json!([1, 2]));
        assert!(v.as_array().unwrap()[0].as_instance().is_none());
    }

    #[test]
    fn unknown_nested_type_fails_at_validation() {
        let c = catalog();
        let s = Structure::fields([("when", "Timestamp")]);
        let mut v = Value::from(json!({"when": 1}));
        assert_eq!(
            s.validate(&c, &mut v).unwrap_err(),
            CheckError::unknown_type("Timestamp")
        );
    }

    #[test]
    fn nested_structure_validates_recursively() {
        let c = catalog();
        let address = Structure::fields([("city", "String")]);
        let s = Structure::fields([
            ("name", TypeSpecifier::from("String")),
            ("address", TypeSpecifier::from(address)),
        ]);
        let mut ok = Value::from(json!({"name": "A", "address": {"city": "B"}}));
        s.validate(&c, &mut ok).unwrap();

        let mut bad = Value::from(json!({"name": "A", "address": {}}));
        assert_eq!(
            s.validate(&c, &mut bad).unwrap_err(),
            CheckError::missing_field("city")
        );
    }

    #[test]
    fn nested_structure_coerces_its_own_fields() {
        let c = catalog();
        let inner = Structure::fields([("n", "Int")]);
        let s = Structure::fields([("inner", inner)]);
        let mut v = Value::object([(
            "inner",
            Value::object([("n", Value::from(c.instantiate("Int", 9).unwrap()))]),
        )]);
        s.validate(&c, &mut v).unwrap();
        assert_eq!(v.to_json(), json!({"inner": {"n": 9}}));
        assert!(v
            .get("inner")
            .and_then(|i| i.get("n"))
            .and_then(Value::as_instance)
            .is_none());
    }

    #[test]
    fn inline_schema_requires_fields_but_does_not_rewrite() {
        let c = catalog();
        let inline = ObjectSchema::new().field("n", "Int");
        let s = Structure::fields([("inline", inline)]);
        let inst = Value::from(c.instantiate("Int", 3).unwrap());
        let mut v = Value::object([("inline", Value::object([("n", inst.clone())]))]);
        s.validate(&c, &mut v).unwrap();
        assert_eq!(v.get("inline").and_then(|i| i.get("n")), Some(&inst));

        let mut missing = Value::from(json!({"inline": {}}));
        assert_eq!(
            s.validate(&c, &mut missing).unwrap_err(),
            CheckError::missing_field("n")
        );
    }

    #[test]
    fn array_of_structures() {
        let c = catalog();
        let s = Structure::array(Structure::fields([("id", "Int")]));
        let mut v = Value::from(json!([{"id": 1}, {"id": 2}]));
        s.validate(&c, &mut v).unwrap();
        let mut bad = Value::from(json!([{"id": 1}, {"id": "two"}]));
        assert!(s.validate(&c, &mut bad).is_err());
    }

    #[test]
    fn normalize_leaves_input_untouched() {
        let c = catalog();
        let s = Structure::fields([("age", "Int")]);
        let input = Value::object([("age", Value::from(c.instantiate("Int", 5).unwrap()))]);
        let out = s.normalize(&c, &input).unwrap();
        assert_eq!(out.to_json(), json!({"age": 5}));
        assert!(input.get("age").and_then(Value::as_instance).is_some());
    }

    #[test]
    fn referenced_types_and_check() {
        let c = catalog();
        let s = Structure::fields([
            ("a", TypeSpecifier::from("Int")),
            ("b", TypeSpecifier::from(Structure::array("Float"))),
            ("c", TypeSpecifier::from(ObjectSchema::new().field("d", "String"))),
        ]);
        let names: Vec<&str> = s.referenced_types().into_iter().collect();
        assert_eq!(names, vec!["Float", "Int", "String"]);
        assert_eq!(s.check_types(&c).unwrap_err(), CheckError::unknown_type("Float"));
    }
}
