//! Tagged comparison values
//!
//! Everything the comparator sees is converted into [`CompareValue`] at the
//! boundary, so comparison logic matches on a closed set of variants.

use chrono::{DateTime, Utc};
use std::fmt;

/// A value taking part in a tolerant comparison
#[derive(Debug, Clone, PartialEq)]
pub enum CompareValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Date(DateTime<Utc>),
    Array(Vec<CompareValue>),
    /// Object entries in source order
    Object(Vec<(String, CompareValue)>),
}

impl CompareValue {
    /// Name of the variant as shown in mismatch details
    pub fn type_name(&self) -> &'static str {
        match self {
            CompareValue::Null => "null",
            CompareValue::Bool(_) => "boolean",
            CompareValue::Number(_) => "number",
            CompareValue::String(_) => "string",
            CompareValue::Date(_) => "date",
            CompareValue::Array(_) => "array",
            CompareValue::Object(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CompareValue::Null)
    }

    /// Look up an object entry by key
    pub fn get(&self, key: &str) -> Option<&CompareValue> {
        match self {
            CompareValue::Object(entries) => entries
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v),
            _ => None,
        }
    }

    /// Build an object value from key/value pairs
    pub fn object<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<CompareValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        CompareValue::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl fmt::Display for CompareValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareValue::Null => write!(f, "null"),
            CompareValue::Bool(b) => write!(f, "{}", b),
            CompareValue::Number(n) => write!(f, "{}", n),
            CompareValue::String(s) => write!(f, "{}", s),
            CompareValue::Date(d) => write!(f, "{}", d.to_rfc3339()),
            CompareValue::Array(_) | CompareValue::Object(_) => {
                write!(f, "{}", serde_json::Value::from(self))
            }
        }
    }
}

impl From<&serde_json::Value> for CompareValue {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => CompareValue::Null,
            serde_json::Value::Bool(b) => CompareValue::Bool(*b),
            serde_json::Value::Number(n) => CompareValue::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => CompareValue::String(s.clone()),
            serde_json::Value::Array(items) => {
                CompareValue::Array(items.iter().map(CompareValue::from).collect())
            }
            serde_json::Value::Object(map) => CompareValue::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), CompareValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for CompareValue {
    fn from(value: serde_json::Value) -> Self {
        CompareValue::from(&value)
    }
}

impl From<&CompareValue> for serde_json::Value {
    fn from(value: &CompareValue) -> Self {
        match value {
            CompareValue::Null => serde_json::Value::Null,
            CompareValue::Bool(b) => serde_json::Value::Bool(*b),
            CompareValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            CompareValue::String(s) => serde_json::Value::String(s.clone()),
            CompareValue::Date(d) => serde_json::Value::String(d.to_rfc3339()),
            CompareValue::Array(items) => {
                serde_json::Value::Array(items.iter().map(serde_json::Value::from).collect())
            }
            CompareValue::Object(entries) => serde_json::Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for CompareValue {
    fn from(value: &str) -> Self {
        CompareValue::String(value.to_string())
    }
}

impl From<String> for CompareValue {
    fn from(value: String) -> Self {
        CompareValue::String(value)
    }
}

impl From<f64> for CompareValue {
    fn from(value: f64) -> Self {
        CompareValue::Number(value)
    }
}

impl From<i64> for CompareValue {
    fn from(value: i64) -> Self {
        CompareValue::Number(value as f64)
    }
}

impl From<i32> for CompareValue {
    fn from(value: i32) -> Self {
        CompareValue::Number(f64::from(value))
    }
}

impl From<bool> for CompareValue {
    fn from(value: bool) -> Self {
        CompareValue::Bool(value)
    }
}

impl From<DateTime<Utc>> for CompareValue {
    fn from(value: DateTime<Utc>) -> Self {
        CompareValue::Date(value)
    }
}

impl<T: Into<CompareValue>> From<Vec<T>> for CompareValue {
    fn from(items: Vec<T>) -> Self {
        CompareValue::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<CompareValue>> From<Option<T>> for CompareValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CompareValue::Null)
    }
}
