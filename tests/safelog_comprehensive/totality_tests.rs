//! Tier 2: the serializer always returns a string

use crate::test_utils::RevokedProxy;
use proptest::prelude::*;
use safelog::{
    safe_stringify, safe_stringify_with_indent, ErrorObject, Fault, HostRef, Object, Outcome,
    Stringifier, StringifyOptions, Value,
};

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Undefined),
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        any::<f64>().prop_map(Value::Float),
        ".{0,12}".prop_map(Value::String),
        prop::collection::vec(any::<u8>(), 0..12).prop_map(Value::Bytes),
        Just(Value::Host(HostRef::new(RevokedProxy))),
    ]
}

proptest! {
    #[test]
    fn fuzz_any_mixture_yields_text(items in prop::collection::vec(arb_scalar(), 0..16)) {
        let obj = Object::new();
        for (i, item) in items.iter().enumerate() {
            obj.set(format!("k{}", i), item.clone());
        }
        let arr = Value::from(items);
        prop_assert!(!Stringifier::default().stringify(&Value::Object(obj)).is_empty());
        prop_assert!(!Stringifier::default().stringify(&arr).is_empty());
    }
}

#[test]
fn totality_undefined() {
    assert_eq!(safe_stringify(&Value::Undefined), "undefined");
}

#[test]
fn totality_revoked_proxy_hits_sentinel() {
    let r = Stringifier::default().render(&Value::Host(HostRef::new(RevokedProxy)));
    assert_eq!(r.text, "[Unserializable Object]");
    assert_eq!(
        r.outcome,
        Outcome::Sentinel {
            structural: Fault::accessor("target", "proxy revoked"),
            coercion: Fault::accessor("toString", "proxy revoked"),
        }
    );
}

#[test]
fn totality_error_with_nan_field_coerces_to_name_and_message() {
    let err = ErrorObject::new("ValidationError", "amount out of range");
    err.fields().set("amount", f64::NAN);
    assert_eq!(
        safe_stringify(&Value::Error(err)),
        "ValidationError: amount out of range"
    );
}

#[test]
fn totality_deeply_nested_acyclic() {
    let mut v = Value::from("leaf");
    for _ in 0..1_000 {
        v = Value::from(vec![v]);
    }
    assert_eq!(
        safe_stringify_with_indent(&v, 0),
        format!("{}\"leaf\"{}", "[".repeat(1_000), "]".repeat(1_000))
    );
}

#[test]
fn totality_nesting_past_configured_limit() {
    let mut v = Value::from("leaf");
    for _ in 0..300 {
        v = Value::from(vec![v]);
    }
    let shallow = Stringifier::new(StringifyOptions::default().max_depth(100));
    assert_eq!(shallow.stringify(&v), "[Unserializable Object]");
}
