//! Tolerant value comparison
//!
//! Compares a structured (API) value against another, typically UI text, under
//! a [`ComparisonOptions`] policy. Pure: no I/O and no mutation of inputs.

use chrono::{DateTime, Datelike, Timelike, Utc};
use phf::phf_set;

use super::options::{ComparisonOptions, ComparisonResult};
use super::value::CompareValue;

/// Strings that coerce to `true` (after trim and lower-casing)
static TRUTHY_TOKENS: phf::Set<&'static str> = phf_set! {
    "true",
    "yes",
    "y",
    "1",
    "on",
};

/// Compare two values under the given options
pub fn compare(
    expected: &CompareValue,
    actual: &CompareValue,
    options: &ComparisonOptions,
) -> ComparisonResult {
    use CompareValue as V;

    if expected.is_null() {
        return ComparisonResult::check(actual.is_null(), || {
            format!("Expected null but got: {}", actual)
        });
    }

    match (expected, actual) {
        (V::String(e), V::String(a)) => compare_strings(e, a, options),
        (V::Number(e), V::Number(a)) => compare_numbers(*e, *a, options),
        (V::Bool(e), V::Bool(a)) => {
            ComparisonResult::check(e == a, || format!("Expected {} but got {}", e, a))
        }
        (V::Date(e), V::Date(a)) => compare_dates(e, a, options),
        (V::Array(e), V::Array(a)) => compare_arrays(e, a, options),
        (V::Object(_), V::Object(_)) => compare_objects(expected, actual, options),
        (V::Number(_), V::String(_)) | (V::String(_), V::Number(_)) => {
            compare_number_string(expected, actual, options)
        }
        (V::Bool(_), V::String(_)) | (V::String(_), V::Bool(_)) => {
            compare_boolean_string(expected, actual)
        }
        _ => ComparisonResult::mismatch(format!(
            "Type mismatch: expected {}, got {} ({} vs {})",
            expected.type_name(),
            actual.type_name(),
            expected,
            actual
        )),
    }
}

/// Compare two JSON values, converting them at the boundary
pub fn compare_json(
    expected: &serde_json::Value,
    actual: &serde_json::Value,
    options: &ComparisonOptions,
) -> ComparisonResult {
    compare(&expected.into(), &actual.into(), options)
}

/// Map a string onto a boolean using the truthy token set
pub fn string_to_boolean(s: &str) -> bool {
    TRUTHY_TOKENS.contains(s.trim().to_lowercase().as_str())
}

/// Parse a string as a number; `None` when it is not numeric
pub fn string_to_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|n| !n.is_nan())
}

/// Format a date with the `YYYY MM DD HH mm ss` tokens (UTC, first occurrence each)
pub fn format_date(date: &DateTime<Utc>, format: &str) -> String {
    format
        .replacen("YYYY", &date.year().to_string(), 1)
        .replacen("MM", &format!("{:02}", date.month()), 1)
        .replacen("DD", &format!("{:02}", date.day()), 1)
        .replacen("HH", &format!("{:02}", date.hour()), 1)
        .replacen("mm", &format!("{:02}", date.minute()), 1)
        .replacen("ss", &format!("{:02}", date.second()), 1)
}

fn compare_strings(expected: &str, actual: &str, options: &ComparisonOptions) -> ComparisonResult {
    let mut expected_str = expected.to_string();
    let mut actual_str = actual.to_string();

    if options.trim_whitespace {
        expected_str = expected_str.trim().to_string();
        actual_str = actual_str.trim().to_string();
    }

    if options.ignore_case {
        expected_str = expected_str.to_lowercase();
        actual_str = actual_str.to_lowercase();
    }

    if options.partial_match && actual_str.contains(&expected_str) {
        return ComparisonResult::equal();
    }

    ComparisonResult::check(expected_str == actual_str, || {
        format!("Strings do not match: \"{}\" vs \"{}\"", expected, actual)
    })
}

fn compare_numbers(expected: f64, actual: f64, options: &ComparisonOptions) -> ComparisonResult {
    match options.tolerance {
        Some(tolerance) => {
            let diff = (expected - actual).abs();
            ComparisonResult::check(diff <= tolerance, || {
                format!(
                    "Number difference exceeds tolerance: {} vs {}, diff: {}, tolerance: {}",
                    expected, actual, diff, tolerance
                )
            })
        }
        None => ComparisonResult::check(expected == actual, || {
            format!("Numbers do not match: {} vs {}", expected, actual)
        }),
    }
}

fn compare_dates(
    expected: &DateTime<Utc>,
    actual: &DateTime<Utc>,
    options: &ComparisonOptions,
) -> ComparisonResult {
    if let Some(format) = &options.date_format {
        let expected_formatted = format_date(expected, format);
        let actual_formatted = format_date(actual, format);
        return ComparisonResult::check(expected_formatted == actual_formatted, || {
            format!(
                "Dates don't match with format {}: {} vs {}",
                format, expected_formatted, actual_formatted
            )
        });
    }

    let diff = (expected.timestamp_millis() - actual.timestamp_millis()).unsigned_abs();

    match options.date_tolerance_ms {
        Some(tolerance) => ComparisonResult::check(diff <= tolerance, || {
            format!(
                "Date difference exceeds tolerance: {} vs {}, diff: {}ms, tolerance: {}ms",
                expected.to_rfc3339(),
                actual.to_rfc3339(),
                diff,
                tolerance
            )
        }),
        None => ComparisonResult::check(diff == 0, || {
            format!(
                "Dates do not match: {} vs {}",
                expected.to_rfc3339(),
                actual.to_rfc3339()
            )
        }),
    }
}

fn compare_arrays(
    expected: &[CompareValue],
    actual: &[CompareValue],
    options: &ComparisonOptions,
) -> ComparisonResult {
    if !options.ignore_array_length && expected.len() != actual.len() {
        return ComparisonResult::mismatch(format!(
            "Array length mismatch: expected {}, got {}",
            expected.len(),
            actual.len()
        ));
    }

    if options.array_contains_only {
        let missing: Vec<&CompareValue> = expected
            .iter()
            .filter(|e| !actual.iter().any(|a| compare(e, a, options).is_equal))
            .collect();

        return ComparisonResult::check(missing.is_empty(), || {
            let listed: Vec<String> = missing.iter().map(|v| v.to_string()).collect();
            format!(
                "Some expected items not found in actual array: [{}]",
                listed.join(", ")
            )
        });
    }

    for (index, (e, a)) in expected.iter().zip(actual.iter()).enumerate() {
        let result = compare(e, a, options);
        if !result.is_equal {
            return ComparisonResult::mismatch(format!(
                "Array element at index {} does not match: {}",
                index,
                result.details.unwrap_or_default()
            ));
        }
    }

    ComparisonResult::equal()
}

fn compare_objects(
    expected: &CompareValue,
    actual: &CompareValue,
    options: &ComparisonOptions,
) -> ComparisonResult {
    let expected_keys: Vec<&str> = match (&options.keys, expected) {
        (Some(keys), _) => keys.iter().map(String::as_str).collect(),
        (None, CompareValue::Object(entries)) => entries.iter().map(|(k, _)| k.as_str()).collect(),
        (None, _) => Vec::new(),
    };

    for key in expected_keys {
        let Some(actual_value) = actual.get(key) else {
            return ComparisonResult::mismatch(format!("Key \"{}\" missing from actual object", key));
        };

        let expected_value = expected.get(key).unwrap_or(&CompareValue::Null);
        let result = compare(expected_value, actual_value, options);
        if !result.is_equal {
            return ComparisonResult::mismatch(format!(
                "Mismatch for key \"{}\": {}",
                key,
                result.details.unwrap_or_default()
            ));
        }
    }

    ComparisonResult::equal()
}

fn compare_number_string(
    expected: &CompareValue,
    actual: &CompareValue,
    options: &ComparisonOptions,
) -> ComparisonResult {
    let as_number = |value: &CompareValue| match value {
        CompareValue::Number(n) => Some(*n),
        CompareValue::String(s) => string_to_number(s),
        _ => None,
    };

    match (as_number(expected), as_number(actual)) {
        (Some(e), Some(a)) => compare_numbers(e, a, options),
        _ => ComparisonResult::mismatch(format!(
            "Failed to convert to number for comparison: expected {}, actual {}",
            expected, actual
        )),
    }
}

fn compare_boolean_string(expected: &CompareValue, actual: &CompareValue) -> ComparisonResult {
    let as_bool = |value: &CompareValue| match value {
        CompareValue::Bool(b) => *b,
        CompareValue::String(s) => string_to_boolean(s),
        _ => false,
    };

    let expected_bool = as_bool(expected);
    let actual_bool = as_bool(actual);

    ComparisonResult::check(expected_bool == actual_bool, || {
        format!("Boolean values don't match: {} vs {}", expected, actual)
    })
}
