//! Assertions on the last API response

use serde_json::Value;
use tracing::{debug, info, instrument};

use super::context::ScenarioContext;
use crate::compare::{compare, CompareValue, ComparisonOptions};
use crate::store::lookup;
use crate::{Error, Result};

impl ScenarioContext {
    pub fn assert_status(&self, expected: u16) -> Result<()> {
        let response = self.require_last_response()?;
        if response.status != expected {
            return Err(Error::assertion_failed(format!(
                "Expected status code {} but got {}",
                expected, response.status
            )));
        }
        Ok(())
    }

    /// Value at `path` in the response body; a missing field fails
    pub fn assert_field(&self, path: &str) -> Result<&Value> {
        let response = self.require_last_response()?;
        lookup(&response.data, path).ok_or_else(|| {
            Error::assertion_failed(format!("Field {} could not be found in the response", path))
        })
    }

    /// The field at `path` must equal `expected`; numbers and booleans in
    /// the body are compared against the parsed text
    #[instrument(skip(self))]
    pub fn assert_field_value(&self, path: &str, expected: &str) -> Result<()> {
        let actual = CompareValue::from(self.assert_field(path)?);
        let expected = CompareValue::String(expected.to_string());
        debug!("Comparing field {} = {} with {}", path, actual, expected);

        compare(&actual, &expected, &ComparisonOptions::new()).into_result(|| {
            format!("Expected field {} to be \"{}\" but got \"{}\"", path, expected, actual)
        })?;
        info!("Response field {} matches \"{}\"", path, expected);
        Ok(())
    }

    /// The body must be an array of at least `min` items
    pub fn assert_min_items(&self, min: usize) -> Result<()> {
        let response = self.require_last_response()?;
        match &response.data {
            Value::Array(items) if items.len() >= min => Ok(()),
            Value::Array(items) => Err(Error::assertion_failed(format!(
                "Expected at least {} items but got {}",
                min,
                items.len()
            ))),
            other => Err(Error::assertion_failed(format!(
                "Expected an array response but got {}",
                other
            ))),
        }
    }

    /// The serialized body must contain `text`
    pub fn assert_body_contains(&self, text: &str) -> Result<()> {
        let response = self.require_last_response()?;
        let body = response.data.to_string();
        if !body.contains(text) {
            return Err(Error::assertion_failed(format!(
                "Response does not contain \"{}\"",
                text
            )));
        }
        Ok(())
    }

    /// The `Content-Type` header must include `expected`
    pub fn assert_content_type(&self, expected: &str) -> Result<()> {
        let response = self.require_last_response()?;
        let actual = response.header("content-type").unwrap_or_default();
        if !actual.contains(expected) {
            return Err(Error::assertion_failed(format!(
                "Expected content type to include '{}' but got '{}'",
                expected, actual
            )));
        }
        Ok(())
    }

    /// The request must have taken no more than `max_ms`
    pub fn assert_response_time_below(&self, max_ms: u64) -> Result<()> {
        let response = self.require_last_response()?;
        if response.request_time_ms > max_ms {
            return Err(Error::assertion_failed(format!(
                "Expected response time of at most {}ms but got {}ms",
                max_ms, response.request_time_ms
            )));
        }
        Ok(())
    }
}
