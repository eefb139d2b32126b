//! # Checking Laws
//!
//! The observable guarantees of the validation engine, exercised through the
//! public API of every crate together.

use argcheck_core::{CheckError, Value};
use argcheck_dispatch::{DispatchError, NativeFunction, Runtime};
use argcheck_schema::Structure;
use proptest::prelude::*;
use serde_json::json;

fn runtime() -> Runtime {
    Runtime::with_builtins().expect("builtins")
}

fn echo(name: &str) -> NativeFunction {
    NativeFunction::new(name, |args| Ok(Value::Array(args)))
}

// =========================================================================
// Primitive construction
// =========================================================================

#[test]
fn valid_primitives_expose_normalized_value() {
    let rt = runtime();
    let c = rt.catalog();
    assert_eq!(c.instantiate("Int", 5).unwrap().value(), &Value::from(5));
    assert_eq!(c.instantiate("Boolean", "false").unwrap().value(), &Value::Bool(false));
    assert_eq!(c.instantiate("String", "x").unwrap().value(), &Value::from("x"));
}

#[test]
fn invalid_primitives_fail_with_constraint_errors() {
    let rt = runtime();
    for (name, raw) in [
        ("Int", Value::from(1.25)),
        ("Float", Value::from(-1)),
        ("Boolean", Value::from("maybe")),
    ] {
        let err = rt.catalog().instantiate(name, raw).unwrap_err();
        assert!(matches!(err, CheckError::Constraint { ref type_name, .. } if type_name == name));
    }
}

// =========================================================================
// Instance pass-through
// =========================================================================

#[test]
fn structure_field_instance_yields_inner_value() {
    let rt = runtime();
    let schema = Structure::fields([("age", "Int")]);
    let five = rt.catalog().instantiate("Int", 5).unwrap();
    let mut value = Value::object([("age", five)]);
    schema.validate(rt.catalog(), &mut value).unwrap();
    assert_eq!(value.to_json(), json!({"age": 5}));
    assert!(value.get("age").unwrap().as_instance().is_none());
}

// =========================================================================
// Object schemas
// =========================================================================

#[test]
fn object_coercion_keeps_numeric_field() {
    let rt = runtime();
    let schema = Structure::fields([("age", "Int")]);
    let mut value = Value::from(json!({"age": 5}));
    assert!(schema.validate(rt.catalog(), &mut value).is_ok());
    assert_eq!(value.get("age"), Some(&Value::from(5)));
}

#[test]
fn missing_field_is_named() {
    let rt = runtime();
    let schema = Structure::fields([("age", "Int")]);
    let err = schema
        .normalize(rt.catalog(), &Value::from(json!({})))
        .unwrap_err();
    assert_eq!(err, CheckError::MissingField { field: "age".into() });
    assert_eq!(err.to_string(), "missing key \"age\" in object");
}

#[test]
fn object_schema_rejects_arrays_and_null() {
    let rt = runtime();
    let schema = Structure::fields([("age", "Int")]);
    for raw in [json!([]), json!(null), json!("age")] {
        let err = schema.normalize(rt.catalog(), &Value::from(raw)).unwrap_err();
        assert!(matches!(err, CheckError::TypeMismatch { expected: "object", .. }));
    }
}

#[test]
fn extra_fields_are_kept() {
    let rt = runtime();
    let schema = Structure::fields([("age", "Int")]);
    let raw = Value::from(json!({"age": 5, "nickname": "A"}));
    assert_eq!(schema.normalize(rt.catalog(), &raw).unwrap(), raw);
}

// =========================================================================
// Array schemas
// =========================================================================

#[test]
fn array_fails_on_first_bad_element() {
    let rt = runtime();
    let schema = Structure::array("Int");
    let err = schema
        .normalize(rt.catalog(), &Value::from(json!([1, 2, "x"])))
        .unwrap_err();
    assert_eq!(err, CheckError::constraint("Int", "Int must be an integer"));
}

#[test]
fn array_call_is_all_or_nothing() {
    let mut rt = runtime();
    rt.register_function(echo("sum"), [Structure::array("Int")])
        .unwrap();
    assert!(rt
        .call("sum", vec![Value::from(json!([1, 2, "x"]))])
        .is_err());
    assert!(rt.call("sum", vec![Value::from(json!([1, 2, 3]))]).is_ok());
}

// =========================================================================
// Registration
// =========================================================================

#[test]
fn duplicate_function_leaves_first_callable() {
    let mut rt = runtime();
    rt.register_function(echo("foo"), ["Int"]).unwrap();
    let err = rt
        .register_function(NativeFunction::new("foo", |_| Ok(Value::Null)), ["Int"])
        .unwrap_err();
    assert!(matches!(err, DispatchError::DuplicateFunction { .. }));
    assert_eq!(
        rt.call("foo", vec![1.into()]).unwrap(),
        Value::from(json!([1]))
    );
}

#[test]
fn duplicate_type_leaves_first_validator() {
    let mut rt = runtime();
    let err = rt
        .register_type("Int", argcheck_core::from_fn(|_| Ok(Value::Null)))
        .unwrap_err();
    assert_eq!(err, CheckError::DuplicateType { name: "Int".into() });
    assert!(rt.catalog().instantiate("Int", 0.5).is_err());
}

// =========================================================================
// End-to-end
// =========================================================================

#[test]
fn add_three_and_four() {
    let mut rt = runtime();
    rt.register_function(
        NativeFunction::new("add", |args| {
            Ok(Value::from(
                args[0].as_i64().unwrap_or_default() + args[1].as_i64().unwrap_or_default(),
            ))
        }),
        ["Int", "Int"],
    )
    .unwrap();

    assert_eq!(rt.call("add", vec![3.into(), 4.into()]).unwrap(), Value::from(7));

    let err = rt.call("add", vec![3.5.into(), 4.into()]).unwrap_err();
    assert!(matches!(err, DispatchError::Conversion { index: 0, .. }));
}

#[test]
fn user_structure_passes_through_unchanged_in_shape() {
    let mut rt = runtime();
    rt.register_function(
        echo("save"),
        [Structure::fields([("name", "String"), ("age", "Int")])],
    )
    .unwrap();
    let input = json!({"name": "Anna", "age": 30});
    let out = rt.call("save", vec![Value::from(input.clone())]).unwrap();
    assert_eq!(out.to_json(), json!([input]));
}

// =========================================================================
// Arity law
// =========================================================================

fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-z]{0,6}".prop_map(Value::from),
    ]
}

proptest! {
    #[test]
    fn arity_mismatch_always_fails(
        n in 0usize..5,
        args in proptest::collection::vec(arb_value(), 0..8),
    ) {
        prop_assume!(args.len() != n);
        let mut rt = runtime();
        rt.register_function(echo("f"), vec!["Int"; n]).unwrap();
        let found = args.len();
        let err = rt.call("f", args).unwrap_err();
        let is_arity = matches!(err, DispatchError::Arity { expected, found: f, .. } if expected == n && f == found);
        prop_assert!(is_arity);
    }
}
