//! API-versus-UI comparison steps

use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::context::ScenarioContext;
use crate::compare::{compare, CompareValue, ComparisonOptions};
use crate::driver::ElementHandle;
use crate::store::lookup;
use crate::{Error, Result};

/// UI comparison options with one named option applied
/// (`tolerance`, `dateFormat`, `dateToleranceMs`, `partialMatch`)
pub fn options_with(name: &str, value: &str) -> Result<ComparisonOptions> {
    let mut options = ComparisonOptions::ui_defaults();
    options.apply_named(name, value)?;
    Ok(options)
}

impl ScenarioContext {
    /// The element's text must match the value at `response_path`
    #[instrument(skip(self, options))]
    pub async fn verify_element_matches_response(
        &self,
        selector: &str,
        response_path: &str,
        options: &ComparisonOptions,
    ) -> Result<()> {
        let expected = self.resolve_expected(response_path).await?;
        let element = self.existing_element(selector).await?;
        let actual = element.text().await?;

        check(&expected, CompareValue::String(actual), options)?;
        info!("UI element \"{}\" matches API response \"{}\"", selector, response_path);
        Ok(())
    }

    /// The element's attribute must match the value at `response_path`;
    /// an absent attribute compares as null
    #[instrument(skip(self, options))]
    pub async fn verify_element_attribute_matches_response(
        &self,
        selector: &str,
        attribute: &str,
        response_path: &str,
        options: &ComparisonOptions,
    ) -> Result<()> {
        let expected = self.resolve_expected(response_path).await?;
        let element = self.existing_element(selector).await?;
        let actual = element.attribute(attribute).await?;

        check(&expected, CompareValue::from(actual), options)?;
        info!(
            "UI element \"{}\" attribute \"{}\" matches API response \"{}\"",
            selector, attribute, response_path
        );
        Ok(())
    }

    /// Like [`Self::verify_element_matches_response`], with the element
    /// addressed through its page object
    #[instrument(skip(self, options))]
    pub async fn verify_page_element_matches_response(
        &self,
        page_name: &str,
        element_name: &str,
        response_path: &str,
        options: &ComparisonOptions,
    ) -> Result<()> {
        let expected = self.resolve_expected(response_path).await?;
        let element = self.existing_page_element(page_name, element_name).await?;
        let actual = element.text().await?;

        check(&expected, CompareValue::String(actual), options)?;
        info!(
            "UI element \"{}\" on page \"{}\" matches API response \"{}\"",
            element_name, page_name, response_path
        );
        Ok(())
    }

    /// Like [`Self::verify_element_attribute_matches_response`], with the
    /// element addressed through its page object
    #[instrument(skip(self, options))]
    pub async fn verify_page_element_attribute_matches_response(
        &self,
        page_name: &str,
        element_name: &str,
        attribute: &str,
        response_path: &str,
        options: &ComparisonOptions,
    ) -> Result<()> {
        let expected = self.resolve_expected(response_path).await?;
        let element = self.existing_page_element(page_name, element_name).await?;
        let actual = element.attribute(attribute).await?;

        check(&expected, CompareValue::from(actual), options)?;
        info!(
            "UI element \"{}\" attribute \"{}\" on page \"{}\" matches API response \"{}\"",
            element_name, attribute, page_name, response_path
        );
        Ok(())
    }

    /// Check a table of `(api_path, ui_element)` rows against the response
    /// saved under `response_key`, with partial matching on top of the UI
    /// defaults. Stops at the first row that fails.
    #[instrument(skip(self, rows))]
    pub async fn verify_page_elements_match_response(
        &self,
        page_name: &str,
        response_key: &str,
        rows: &[(&str, &str)],
    ) -> Result<()> {
        let saved = self
            .store()
            .get(response_key)
            .await
            .ok_or_else(|| Error::response_not_found(response_key))?;
        let options = ComparisonOptions::ui_defaults().with_partial_match();

        for (api_path, ui_element) in rows {
            let path = api_path.trim_start_matches("$.");
            let expected = lookup(&saved, path)
                .ok_or_else(|| Error::property_not_found(*api_path, response_key))?;

            let element = self.existing_page_element(page_name, ui_element).await?;
            let actual = element.text().await?;

            check(expected, CompareValue::String(actual), &options).map_err(|e| match e {
                Error::AssertionFailed(details) => {
                    Error::assertion_failed(format!("For \"{}\": {}", ui_element, details))
                }
                other => other,
            })?;
            info!(
                "UI element \"{}\" on page \"{}\" matches API response path \"{}\"",
                ui_element, page_name, api_path
            );
        }
        Ok(())
    }

    async fn existing_element(&self, selector: &str) -> Result<Arc<dyn ElementHandle>> {
        let locator = self.locator()?;
        let element = match locator.find(selector).await {
            Ok(element) => element,
            Err(Error::Timeout(_)) => return Err(not_found(selector)),
            Err(e) => return Err(e),
        };

        if !element.is_existing().await? {
            return Err(not_found(selector));
        }
        Ok(element)
    }

    async fn existing_page_element(
        &self,
        page_name: &str,
        element_name: &str,
    ) -> Result<Arc<dyn ElementHandle>> {
        let not_on_page = || {
            Error::assertion_failed(format!(
                "UI element \"{}\" not found on page \"{}\"",
                element_name, page_name
            ))
        };

        let element = match self.locator()?.locate(page_name, element_name).await {
            Ok(element) => element,
            Err(Error::Timeout(_)) => return Err(not_on_page()),
            Err(e) => return Err(e),
        };
        if !element.is_existing().await? {
            return Err(not_on_page());
        }
        Ok(element)
    }
}

fn not_found(selector: &str) -> Error {
    Error::assertion_failed(format!("UI element \"{}\" not found", selector))
}

fn check(expected: &Value, actual: CompareValue, options: &ComparisonOptions) -> Result<()> {
    let expected = CompareValue::from(expected);
    debug!("Comparing expected {} with actual {}", expected, actual);

    compare(&expected, &actual, options)
        .into_result(|| format!("Expected \"{}\" but got \"{}\"", expected, actual))
}
