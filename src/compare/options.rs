//! Comparison options and results

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Tolerance policy for [`compare`](super::compare)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComparisonOptions {
    /// Fold case before comparing strings
    pub ignore_case: bool,
    /// Strip leading/trailing whitespace before comparing strings
    pub trim_whitespace: bool,
    /// Actual containing expected counts as equal for strings
    pub partial_match: bool,
    /// Maximum absolute difference between numbers
    pub tolerance: Option<f64>,
    /// Pattern (`YYYY MM DD HH mm ss`) both dates are formatted with
    pub date_format: Option<String>,
    /// Maximum millisecond difference between dates
    pub date_tolerance_ms: Option<u64>,
    /// Skip the array length check
    pub ignore_array_length: bool,
    /// Treat arrays as unordered sets for containment
    pub array_contains_only: bool,
    /// Restrict object comparison to these keys
    pub keys: Option<Vec<String>>,
}

impl ComparisonOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults used when comparing API values against rendered UI text
    pub fn ui_defaults() -> Self {
        Self {
            ignore_case: true,
            trim_whitespace: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_ignore_case(mut self) -> Self {
        self.ignore_case = true;
        self
    }

    #[must_use]
    pub fn with_trim_whitespace(mut self) -> Self {
        self.trim_whitespace = true;
        self
    }

    #[must_use]
    pub fn with_partial_match(mut self) -> Self {
        self.partial_match = true;
        self
    }

    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    #[must_use]
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = Some(format.into());
        self
    }

    #[must_use]
    pub fn with_date_tolerance_ms(mut self, tolerance_ms: u64) -> Self {
        self.date_tolerance_ms = Some(tolerance_ms);
        self
    }

    #[must_use]
    pub fn with_ignore_array_length(mut self) -> Self {
        self.ignore_array_length = true;
        self
    }

    #[must_use]
    pub fn with_array_contains_only(mut self) -> Self {
        self.array_contains_only = true;
        self
    }

    #[must_use]
    pub fn with_keys<S: Into<String>>(mut self, keys: impl IntoIterator<Item = S>) -> Self {
        self.keys = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    /// Set an option from its step-level name, e.g. `tolerance` / `0.01`.
    ///
    /// Names are matched case-insensitively.
    pub fn apply_named(&mut self, name: &str, value: &str) -> Result<()> {
        let invalid = || Error::unsupported_option(format!("{} (invalid value \"{}\")", name, value));

        match name.to_ascii_lowercase().as_str() {
            "tolerance" => {
                self.tolerance = Some(value.trim().parse().map_err(|_| invalid())?);
            }
            "dateformat" => {
                self.date_format = Some(value.to_string());
            }
            "datetolerancems" => {
                self.date_tolerance_ms = Some(value.trim().parse().map_err(|_| invalid())?);
            }
            "partialmatch" => {
                self.partial_match = value.trim().eq_ignore_ascii_case("true");
            }
            _ => return Err(Error::unsupported_option(name)),
        }
        Ok(())
    }
}

/// Outcome of a comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub is_equal: bool,
    /// Explanation of the first mismatch; `None` on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ComparisonResult {
    pub fn equal() -> Self {
        Self {
            is_equal: true,
            details: None,
        }
    }

    pub fn mismatch<S: Into<String>>(details: S) -> Self {
        Self {
            is_equal: false,
            details: Some(details.into()),
        }
    }

    /// Equal when `condition` holds, otherwise a mismatch built lazily
    pub fn check<F>(condition: bool, details: F) -> Self
    where
        F: FnOnce() -> String,
    {
        if condition {
            Self::equal()
        } else {
            Self::mismatch(details())
        }
    }

    /// Convert a mismatch into an assertion error
    pub fn into_result(self, fallback: impl FnOnce() -> String) -> Result<()> {
        if self.is_equal {
            Ok(())
        } else {
            Err(Error::assertion_failed(self.details.unwrap_or_else(fallback)))
        }
    }
}
