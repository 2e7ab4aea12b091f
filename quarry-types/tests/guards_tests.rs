use proptest::prelude::*;
use quarry_types::{are_objects_of, is_of, sort_objects_of, sort_objects_where};
use serde_json::{json, Value};

// ── is_of ─────────────────────────────────────────────────────────

#[test]
fn is_of_requires_object_with_property() {
    assert!(is_of(&json!({"kind": "Content"}), "kind"));
    assert!(!is_of(&json!({"other": 1}), "kind"));
    assert!(!is_of(&json!({"kind": null}), "kind"));
    assert!(!is_of(&json!(null), "kind"));
    assert!(!is_of(&json!("kind"), "kind"));
    assert!(!is_of(&json!([{"kind": "x"}]), "kind"));
}

#[test]
fn is_of_accepts_falsy_but_defined_values() {
    assert!(is_of(&json!({"kind": ""}), "kind"));
    assert!(is_of(&json!({"kind": 0}), "kind"));
    assert!(is_of(&json!({"kind": false}), "kind"));
}

// ── are_objects_of ────────────────────────────────────────────────

#[test]
fn are_objects_of_all_pass() {
    assert!(are_objects_of(&json!([{"kind": "a"}, {"kind": "b"}]), "kind"));
}

#[test]
fn are_objects_of_one_fails() {
    assert!(!are_objects_of(&json!([{"kind": "a"}, {"no": true}]), "kind"));
}

#[test]
fn are_objects_of_empty_array_passes() {
    assert!(are_objects_of(&json!([]), "kind"));
}

#[test]
fn are_objects_of_non_array_fails() {
    assert!(!are_objects_of(&json!({"kind": "a"}), "kind"));
    assert!(!are_objects_of(&json!(null), "kind"));
}

// ── sort_objects_of ───────────────────────────────────────────────

#[test]
fn sort_reports_rejected_indices() {
    let input = json!([{"kind": "a"}, 4, {"kind": "b"}, {"x": 1}]);
    let sorted = sort_objects_of(&input, "kind");
    assert_eq!(sorted.accepted.len(), 2);
    assert_eq!(sorted.rejected, vec![1, 3]);
    assert!(!sorted.is_clean());
}

#[test]
fn sort_non_array_is_empty_and_clean() {
    let input = json!("nope");
    let sorted = sort_objects_of(&input, "kind");
    assert!(sorted.accepted.is_empty());
    assert!(sorted.is_clean());
}

#[test]
fn sort_where_applies_custom_check() {
    let input = json!([{"kind": "a"}, {"kind": 4}, "x", {"kind": ""}]);
    let sorted = sort_objects_where(&input, |map| map.get("kind").is_some_and(Value::is_string));
    assert_eq!(sorted.accepted.len(), 2);
    assert_eq!(sorted.rejected, vec![1, 2]);
}

// ── Properties ────────────────────────────────────────────────────

fn element_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[a-z]{1,8}".prop_map(|k| json!({ "kind": k })),
        Just(json!({ "other": true })),
        Just(json!(null)),
        any::<i32>().prop_map(|n| json!(n)),
    ]
}

proptest! {
    /// are_objects_of agrees with checking every element independently.
    #[test]
    fn are_objects_of_matches_elementwise(items in prop::collection::vec(element_strategy(), 0..12)) {
        let array = Value::Array(items.clone());
        let expected = items.iter().all(|v| is_of(v, "kind"));
        prop_assert_eq!(are_objects_of(&array, "kind"), expected);
    }

    /// The sorted report partitions the input.
    #[test]
    fn sort_partitions_input(items in prop::collection::vec(element_strategy(), 0..12)) {
        let array = Value::Array(items.clone());
        let sorted = sort_objects_of(&array, "kind");
        prop_assert_eq!(sorted.accepted.len() + sorted.rejected.len(), items.len());
        prop_assert_eq!(sorted.is_clean(), are_objects_of(&array, "kind"));
    }
}
