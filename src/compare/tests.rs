//! Comparator behaviour tests

use chrono::{TimeZone, Utc};
use serde_json::json;

use super::*;

fn cmp(expected: serde_json::Value, actual: serde_json::Value, options: &ComparisonOptions) -> ComparisonResult {
    compare_json(&expected, &actual, options)
}

#[test]
fn test_reflexive_primitives() {
    let options = ComparisonOptions::new();
    for value in [json!("text"), json!(42), json!(-3.5), json!(true), json!(false), json!(null)] {
        let result = cmp(value.clone(), value, &options);
        assert!(result.is_equal);
        assert!(result.details.is_none());
    }
}

#[test]
fn test_reflexive_with_irrelevant_options() {
    let options = ComparisonOptions::new()
        .with_tolerance(0.5)
        .with_date_format("YYYY")
        .with_keys(["unused"]);

    assert!(cmp(json!("abc"), json!("abc"), &options).is_equal);
    assert!(cmp(json!(true), json!(true), &options).is_equal);
}

#[test]
fn test_null_expected() {
    let options = ComparisonOptions::new();
    assert!(cmp(json!(null), json!(null), &options).is_equal);

    let result = cmp(json!(null), json!("x"), &options);
    assert!(!result.is_equal);
    assert_eq!(result.details.as_deref(), Some("Expected null but got: x"));
}

#[test]
fn test_null_actual_is_type_mismatch() {
    let result = cmp(json!("x"), json!(null), &ComparisonOptions::new());
    assert!(!result.is_equal);
    assert!(result.details.unwrap().starts_with("Type mismatch: expected string, got null"));
}

#[test]
fn test_string_case_sensitivity() {
    assert!(cmp(json!("Hello"), json!("hello"), &ComparisonOptions::new().with_ignore_case()).is_equal);

    let result = cmp(json!("Hello"), json!("hello"), &ComparisonOptions::new());
    assert!(!result.is_equal);
    assert_eq!(
        result.details.as_deref(),
        Some("Strings do not match: \"Hello\" vs \"hello\"")
    );
}

#[test]
fn test_string_trim_and_partial() {
    let trim = ComparisonOptions::new().with_trim_whitespace();
    assert!(cmp(json!("  Backpack "), json!("Backpack"), &trim).is_equal);
    assert!(!cmp(json!("  Backpack "), json!("Backpack"), &ComparisonOptions::new()).is_equal);

    let partial = ComparisonOptions::ui_defaults().with_partial_match();
    assert!(cmp(json!("backpack"), json!("Sauce Labs Backpack "), &partial).is_equal);
    assert!(!cmp(json!("bike light"), json!("Sauce Labs Backpack"), &partial).is_equal);
}

#[test]
fn test_numeric_tolerance() {
    let options = ComparisonOptions::new().with_tolerance(0.05);
    assert!(cmp(json!(10.0), json!(10.04), &options).is_equal);

    let result = cmp(json!(10.0), json!(10.10), &options);
    assert!(!result.is_equal);
    assert!(result.details.unwrap().contains("exceeds tolerance"));
}

#[test]
fn test_numbers_exact_without_tolerance() {
    assert!(cmp(json!(7), json!(7.0), &ComparisonOptions::new()).is_equal);
    assert!(!cmp(json!(7), json!(7.01), &ComparisonOptions::new()).is_equal);
}

#[test]
fn test_number_string_coercion() {
    let options = ComparisonOptions::new();
    assert!(cmp(json!(42), json!("42"), &options).is_equal);
    assert!(cmp(json!("29.99"), json!(29.99), &options).is_equal);
    assert!(cmp(json!(42), json!(" 42 "), &options).is_equal);

    let result = cmp(json!(42), json!("forty-two"), &options);
    assert!(!result.is_equal);
    assert!(result.details.unwrap().starts_with("Failed to convert to number"));
}

#[test]
fn test_number_string_respects_tolerance() {
    let options = ComparisonOptions::new().with_tolerance(0.01);
    assert!(cmp(json!(15.99), json!("15.995"), &options).is_equal);
}

#[test]
fn test_boolean_string_coercion() {
    let options = ComparisonOptions::new();
    assert!(cmp(json!(true), json!("yes"), &options).is_equal);
    assert!(cmp(json!(true), json!(" ON "), &options).is_equal);
    assert!(cmp(json!(false), json!("no"), &options).is_equal);
    assert!(cmp(json!("Y"), json!(true), &options).is_equal);
    assert!(!cmp(json!(true), json!("maybe"), &options).is_equal);
}

#[test]
fn test_zero_against_false_string_fails() {
    // number-vs-string is tried before any boolean interpretation
    let result = cmp(json!(0), json!("false"), &ComparisonOptions::new());
    assert!(!result.is_equal);
    assert!(result.details.unwrap().starts_with("Failed to convert to number"));
}

#[test]
fn test_irreconcilable_types() {
    let result = cmp(json!({"a": 1}), json!(1), &ComparisonOptions::new());
    assert!(!result.is_equal);
    assert!(result.details.unwrap().starts_with("Type mismatch: expected object, got number"));

    assert!(!cmp(json!([1]), json!({"0": 1}), &ComparisonOptions::new()).is_equal);
}

#[test]
fn test_array_order_sensitivity() {
    let result = cmp(json!([1, 2, 3]), json!([3, 2, 1]), &ComparisonOptions::new());
    assert!(!result.is_equal);
    assert!(result.details.unwrap().starts_with("Array element at index 0 does not match"));

    let unordered = ComparisonOptions::new().with_array_contains_only();
    assert!(cmp(json!([1, 2, 3]), json!([3, 2, 1]), &unordered).is_equal);
}

#[test]
fn test_array_contains_only_reports_missing() {
    let options = ComparisonOptions::new()
        .with_array_contains_only()
        .with_ignore_array_length();
    let result = cmp(json!(["a", "z"]), json!(["a", "b", "c"]), &options);

    assert!(!result.is_equal);
    assert_eq!(
        result.details.as_deref(),
        Some("Some expected items not found in actual array: [z]")
    );
}

#[test]
fn test_array_length() {
    let result = cmp(json!([1, 2]), json!([1, 2, 3]), &ComparisonOptions::new());
    assert!(!result.is_equal);
    assert_eq!(
        result.details.as_deref(),
        Some("Array length mismatch: expected 2, got 3")
    );

    let lenient = ComparisonOptions::new().with_ignore_array_length();
    assert!(cmp(json!([1, 2]), json!([1, 2, 3]), &lenient).is_equal);
    assert!(!cmp(json!([1, 5]), json!([1, 2, 3]), &lenient).is_equal);
}

#[test]
fn test_object_key_subset() {
    let options = ComparisonOptions::new().with_keys(["a"]);
    assert!(cmp(json!({"a": 1, "b": 2}), json!({"a": 1, "b": 9, "c": 3}), &options).is_equal);

    let result = cmp(json!({"a": 1, "b": 2}), json!({"a": 1, "b": 9}), &ComparisonOptions::new());
    assert!(!result.is_equal);
    assert_eq!(
        result.details.as_deref(),
        Some("Mismatch for key \"b\": Numbers do not match: 2 vs 9")
    );
}

#[test]
fn test_object_missing_key() {
    let result = cmp(json!({"name": "x"}), json!({"title": "x"}), &ComparisonOptions::new());
    assert!(!result.is_equal);
    assert_eq!(
        result.details.as_deref(),
        Some("Key \"name\" missing from actual object")
    );
}

#[test]
fn test_nested_path_in_details() {
    let expected = json!({"user": {"roles": ["admin", "editor"]}});
    let actual = json!({"user": {"roles": ["admin", "viewer"]}});
    let details = cmp(expected, actual, &ComparisonOptions::new()).details.unwrap();

    assert!(details.starts_with("Mismatch for key \"user\": Mismatch for key \"roles\": Array element at index 1"));
    assert!(details.contains("\"editor\" vs \"viewer\""));
}

#[test]
fn test_dates() {
    let a = Utc.with_ymd_and_hms(2024, 3, 5, 10, 15, 0).unwrap();
    let b = Utc.with_ymd_and_hms(2024, 3, 5, 10, 15, 2).unwrap();

    assert!(compare(&a.into(), &a.into(), &ComparisonOptions::new()).is_equal);
    assert!(!compare(&a.into(), &b.into(), &ComparisonOptions::new()).is_equal);

    let tolerant = ComparisonOptions::new().with_date_tolerance_ms(2000);
    assert!(compare(&a.into(), &b.into(), &tolerant).is_equal);

    let tight = ComparisonOptions::new().with_date_tolerance_ms(1999);
    assert!(!compare(&a.into(), &b.into(), &tight).is_equal);

    let by_day = ComparisonOptions::new().with_date_format("YYYY-MM-DD");
    assert!(compare(&a.into(), &b.into(), &by_day).is_equal);
}

#[test]
fn test_format_date_tokens() {
    let date = Utc.with_ymd_and_hms(2023, 1, 9, 4, 7, 8).unwrap();
    assert_eq!(format_date(&date, "DD/MM/YYYY HH:mm:ss"), "09/01/2023 04:07:08");
}

#[test]
fn test_compare_does_not_mutate_inputs() {
    let expected = CompareValue::from(json!({"items": [1, 2, 3]}));
    let actual = CompareValue::from(json!({"items": [3, 2, 1]}));
    let options = ComparisonOptions::new().with_array_contains_only();

    let first = compare(&expected, &actual, &options);
    let second = compare(&expected, &actual, &options);

    assert_eq!(first, second);
    assert_eq!(expected, CompareValue::from(json!({"items": [1, 2, 3]})));
}

#[test]
fn test_apply_named_options() {
    let mut options = ComparisonOptions::ui_defaults();
    options.apply_named("Tolerance", "0.01").unwrap();
    options.apply_named("dateFormat", "YYYY-MM-DD").unwrap();
    options.apply_named("dateToleranceMs", "500").unwrap();
    options.apply_named("partialMatch", "TRUE").unwrap();

    assert_eq!(options.tolerance, Some(0.01));
    assert_eq!(options.date_format.as_deref(), Some("YYYY-MM-DD"));
    assert_eq!(options.date_tolerance_ms, Some(500));
    assert!(options.partial_match);
    assert!(options.ignore_case && options.trim_whitespace);

    assert!(matches!(
        options.apply_named("fuzzy", "1"),
        Err(crate::Error::UnsupportedOption(_))
    ));
    assert!(options.apply_named("tolerance", "lots").is_err());
}

#[test]
fn test_options_deserialize_camel_case() {
    let options: ComparisonOptions =
        serde_json::from_value(json!({"ignoreCase": true, "keys": ["id"], "dateToleranceMs": 10}))
            .unwrap();

    assert!(options.ignore_case);
    assert_eq!(options.keys, Some(vec!["id".to_string()]));
    assert_eq!(options.date_tolerance_ms, Some(10));
}
