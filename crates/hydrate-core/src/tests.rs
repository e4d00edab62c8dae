use crate::*;
use serde_json::json;
use std::sync::Arc;

// ========== Value ==========

#[test]
fn test_from_json_preserves_key_order() {
    let v = Value::from(json!({"z": 1, "a": 2, "m": 3}));
    let Value::Object(obj) = &v else { panic!("expected object") };
    let keys: Vec<_> = obj
        .properties
        .iter()
        .map(|(k, _)| match k {
            PropertyKey::String(s) => s.as_str(),
            PropertyKey::Symbol(_) => "",
        })
        .collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
}

#[test]
fn test_to_json_roundtrip() {
    let original = json!({"a": [1, 2.5, null, true], "b": {"c": "d"}});
    let v = Value::from(original.clone());
    assert_eq!(v.to_json().unwrap(), original);
}

#[test]
fn test_parsed_composites_are_distinct() {
    let a = Value::from(json!({"a": 1}));
    let b = Value::from(json!({"a": 1}));
    assert_eq!(a, b);
    assert!(!a.same(&b));
}

#[test]
fn test_clone_shares_identity() {
    let a = Value::array(["x", "y"]);
    let b = a.clone();
    assert!(a.same(&b));
}

#[test]
fn test_primitives_same_by_content() {
    assert!(Value::string("red").same(&Value::string("red")));
    assert!(!Value::string("1").same(&Value::from(1i64)));
    assert!(Value::Null.same(&Value::Null));
}

#[test]
fn test_object_insert_replaces() {
    let mut obj = Object::new();
    obj.insert("a", Value::from(1i64));
    obj.insert("b", Value::from(2i64));
    obj.insert("a", Value::from(3i64));
    assert_eq!(obj.len(), 2);
    assert_eq!(obj.get("a"), Some(&Value::from(3i64)));
}

#[test]
fn test_non_finite_float_is_null() {
    assert_eq!(Value::from(f64::NAN), Value::Null);
}

#[test]
fn test_to_json_rejects_function() {
    let v = Value::array([Value::function("onClick")]);
    assert!(matches!(v.to_json(), Err(HydrateError::UnsupportedCallable { .. })));
}

#[test]
fn test_to_json_rejects_instance() {
    let v = Value::from(Object::instance("Date").with("t", 0i64));
    assert!(matches!(v.to_json(), Err(HydrateError::UnsupportedInstance { class }) if class == "Date"));
}

#[test]
fn test_to_json_rejects_symbol_key() {
    let v = Value::from(Object::new().with("a", 1i64).with_symbol("iterator", true));
    assert!(matches!(v.to_json(), Err(HydrateError::UnsupportedKeyType { .. })));
}

#[test]
fn test_null_prototype_is_plain() {
    let obj = Object::with_prototype(Prototype::Null).with("a", 1i64);
    assert!(obj.is_plain());
    assert_eq!(Value::Object(Arc::new(obj)).to_json().unwrap(), json!({"a": 1}));
}

// ========== Config ==========

#[test]
fn test_config_defaults() {
    let cfg = CompressConfig::default();
    assert_eq!(cfg.priority, 100);
    assert_eq!(cfg.decode_mode, DecodeMode::Inline);
    assert_eq!(cfg.alphabet_chars().len(), 162);
    assert_eq!(cfg.alphabet_chars()[0], '¢');
}

#[test]
fn test_config_from_json_partial() {
    let cfg = CompressConfig::from_json(r#"{"decode_mode":"deferred","priority":5}"#).unwrap();
    assert_eq!(cfg.decode_mode, DecodeMode::Deferred);
    assert_eq!(cfg.priority, 5);
    assert_eq!(cfg.table_var, "dic");
}

#[test]
fn test_config_from_json_invalid() {
    assert!(matches!(CompressConfig::from_json("{"), Err(HydrateError::Serialization(_))));
}

// ========== Script stacks ==========

#[test]
fn test_stack_render_orders_by_priority() {
    let mut stack = ScriptStack::new();
    stack.push(ScriptFragment::new("low", "L", 10));
    stack.push(ScriptFragment::new("high", "H", 100));
    stack.push(ScriptFragment::new("high2", "H2", 100));
    assert_eq!(stack.render(), "H\nH2\nL");
    assert_eq!(stack.fragments()[0].source, "low");
}

#[test]
fn test_vec_is_a_sink() {
    let mut sink: Vec<ScriptFragment> = Vec::new();
    ScriptSink::push(&mut sink, ScriptFragment::new("a", "x", 1));
    assert_eq!(sink.len(), 1);
}
