//! Tier 1: cyclic graphs terminate

use crate::test_utils::{release, user_with_fines};
use safelog::{
    safe_stringify, safe_stringify_with_indent, CyclePolicy, Object, Stringifier,
    StringifyOptions, Value,
};

#[test]
fn invariant_owner_back_edges_become_sentinels() {
    let user = user_with_fines(3);
    let text = safe_stringify(&Value::Object(user.clone()));

    assert_eq!(text.matches("[Circular Reference]").count(), 3);
    let decoded: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(decoded["fines"][2]["owner"], "[Circular Reference]");
    assert_eq!(decoded["fines"][1]["amount"], 101);
    release(&user);
}

#[test]
fn invariant_back_edge_count_unchanged_under_ancestors() {
    let user = user_with_fines(4);
    let options = StringifyOptions::default().cycle_policy(CyclePolicy::Ancestors);
    let text = Stringifier::new(options).stringify(&Value::Object(user.clone()));
    assert_eq!(text.matches("[Circular Reference]").count(), 4);
    release(&user);
}

#[test]
fn invariant_self_reference_exactly_once() {
    let a = Object::new();
    a.set("self", a.clone());
    let text = safe_stringify_with_indent(&Value::Object(a.clone()), 0);
    assert_eq!(text, r#"{"self":"[Circular Reference]"}"#);
    a.clear();
}

#[test]
fn invariant_shared_subobject_is_conservative_by_default() {
    let d = Object::from_entries([("zone", "B")]);
    let root = Object::new();
    root.set("b", Object::from_entries([("d", d.clone())]));
    root.set("c", Object::from_entries([("d", d)]));

    let text = safe_stringify_with_indent(&Value::Object(root), 0);
    assert_eq!(text.matches("\"zone\"").count(), 1);
    assert_eq!(text.matches("[Circular Reference]").count(), 1);
}

#[test]
fn invariant_wide_fan_in_is_bounded() {
    let shared = Object::from_entries([("payload", "x".repeat(64))]);
    let items: Vec<Value> = (0..500).map(|_| Value::Object(shared.clone())).collect();
    let text = safe_stringify_with_indent(&Value::from(items), 0);

    assert_eq!(text.matches("payload").count(), 1);
    assert_eq!(text.matches("[Circular Reference]").count(), 499);
}
