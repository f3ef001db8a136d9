//! End-to-end scenarios through the fluent layer.

use std::collections::HashMap;

use veracity::representation::to_text;
use veracity::{
    expect_map, expect_slice, CheckError, MapRepresentation, StandardRepresentation,
};

fn failure_message(result: veracity::CheckResult) -> String {
    match result {
        Err(CheckError::AssertionFailed(message)) => message,
        other => panic!("expected an assertion failure, got {:?}", other),
    }
}

#[test]
fn contains_only_once_on_a_short_array_reports_only_the_not_found_value() {
    let message = failure_message(expect_slice(&[6, 8, 10]).try_contains_only_once(&[6, 8, 20]));
    assert!(message.contains("were not found\n  <[20]>"));
    assert!(message.contains("more than once\n  <[]>"));
}

#[test]
fn contains_only_once_under_absolute_value_reports_not_found_and_duplicated() {
    let actual = [6, -8, 10, -6, -8, 10, -8, 6];
    let message = failure_message(
        expect_slice(&actual)
            .using_comparator_named(|a: &i32, b: &i32| a.abs().cmp(&b.abs()), "absolute value")
            .try_contains_only_once(&[6, -8, 20]),
    );
    assert!(message.contains("were not found\n  <[20]>"));
    assert!(message.contains("more than once\n  <[6, -8]>"));
    assert!(message.ends_with("when comparing values using absolute value"));
}

#[test]
fn float_array_fails_is_sorted_at_index_one() {
    let message = failure_message(expect_slice(&[1.0f32, 3.0, 2.0]).try_is_sorted());
    assert!(message.contains("<[1.0, 3.0, 2.0]>"));
    assert!(message.contains("index 1"));
}

#[test]
fn map_without_the_values_reports_both_as_a_set() {
    let mut map = HashMap::new();
    map.insert("old".to_string(), "notSoOld".to_string());

    let message = failure_message(
        expect_map(&map).try_contains_values(&["veryOld".to_string(), "veryOld2".to_string()]),
    );
    assert!(message.contains("to contain values\n  <[\"veryOld\", \"veryOld2\"]>"));
}

#[test]
fn single_entry_map_formats_exactly() {
    let mut map = HashMap::new();
    map.insert("a", 1);
    assert_eq!(to_text(&StandardRepresentation, &map), "{\"a\"=1}");
}

#[test]
fn diff_aware_map_rendering_brackets_the_unequal_entry() {
    let mut map = HashMap::new();
    map.insert("a", 1);
    map.insert("b", 2);

    let mut repr = MapRepresentation::new();
    repr.mark_unequal_entry_by_value(&"b");
    assert_eq!(to_text(&repr, &map), "{\"a\"=1, \"b\"=[2]}");
}

#[test]
fn chained_assertions_stop_at_the_first_failure() {
    let outcome = std::panic::catch_unwind(|| {
        expect_slice(&[1, 2, 3]).contains(&[4]).has_size(17);
    });
    let payload = outcome.unwrap_err();
    let text = payload
        .downcast_ref::<String>()
        .cloned()
        .unwrap_or_default();
    assert!(text.contains("could not find"));
    assert!(!text.contains("size"));
}

#[test]
fn usage_error_and_assertion_failure_are_distinct() {
    let usage = expect_slice(&[1]).try_contains(&[]);
    assert!(matches!(usage, Err(CheckError::Usage(_))));

    let failed = expect_slice(&[1]).try_contains(&[2]);
    assert!(matches!(failed, Err(CheckError::AssertionFailed(_))));
}
