//! # Value comparison
//!
//! Tolerant equality between values coming from different sources, typically
//! an API payload field and the text a UI renders for it.
//!
//! ## Rules
//! - `null` expected is equal only to `null`
//! - number vs string parses the string; boolean vs string maps the string
//!   through the truthy set `true, yes, y, 1, on`
//! - nested arrays and objects report the index or key of the first divergence
//!
//! ## Example
//! ```rust
//! use mobile_e2e::compare::{compare_json, ComparisonOptions};
//! use serde_json::json;
//!
//! let options = ComparisonOptions::new().with_tolerance(0.05);
//! let result = compare_json(&json!(10.0), &json!("10.04"), &options);
//! assert!(result.is_equal);
//! ```

pub mod comparator;
pub mod options;
pub mod value;

#[cfg(test)]
mod tests;

pub use comparator::{compare, compare_json, format_date, string_to_boolean, string_to_number};
pub use options::{ComparisonOptions, ComparisonResult};
pub use value::CompareValue;
