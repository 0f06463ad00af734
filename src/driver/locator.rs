//! Element locator
//!
//! Bridges page-object resolution and the automation driver: a page and
//! element name become a live element.

use std::sync::Arc;
use tracing::{debug, instrument, warn};

use super::traits::{DriverHandle, ElementHandle};
use crate::pages::{PageObjectResolver, ResolvedElement};
use crate::{Error, Result};

/// Finds live elements by page and element name
#[derive(Debug, Clone)]
pub struct ElementLocator {
    resolver: Arc<PageObjectResolver>,
    driver: DriverHandle,
    timeout_ms: u64,
}

impl ElementLocator {
    pub fn new(resolver: Arc<PageObjectResolver>, driver: DriverHandle, timeout_ms: u64) -> Self {
        Self {
            resolver,
            driver,
            timeout_ms,
        }
    }

    pub fn driver(&self) -> &DriverHandle {
        &self.driver
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Resolve `element_name` on `page_name` and find it on screen
    #[instrument(skip(self))]
    pub async fn locate(&self, page_name: &str, element_name: &str) -> Result<Arc<dyn ElementHandle>> {
        let resolved = self
            .resolver
            .resolve(page_name, element_name, self.driver.clone())
            .await?;
        self.realize(resolved).await
    }

    /// Turn a resolved element into a live one
    pub async fn realize(&self, resolved: ResolvedElement) -> Result<Arc<dyn ElementHandle>> {
        match resolved {
            ResolvedElement::Selector(selector) => self.find(&selector).await,
            ResolvedElement::Live(element) => Ok(element),
            ResolvedElement::Value(value) => Err(Error::invalid_selector(format!(
                "{} is not a selector",
                value
            ))),
        }
    }

    /// Find an element by raw selector within the locator's timeout
    pub async fn find(&self, selector: &str) -> Result<Arc<dyn ElementHandle>> {
        debug!("Finding element: {} (timeout {}ms)", selector, self.timeout_ms);
        self.driver.find_element(selector, self.timeout_ms).await
    }

    /// Visible text of a page element
    pub async fn text_of(&self, page_name: &str, element_name: &str) -> Result<String> {
        self.locate(page_name, element_name).await?.text().await
    }

    /// Whether a page element is currently present.
    ///
    /// Resolution failures (unknown page or element) are still errors; only
    /// the element being absent from the screen yields `false`.
    pub async fn exists(&self, page_name: &str, element_name: &str) -> Result<bool> {
        let resolved = self
            .resolver
            .resolve(page_name, element_name, self.driver.clone())
            .await?;

        match self.realize(resolved).await {
            Ok(element) => element.is_existing().await,
            Err(Error::Timeout(msg)) => {
                warn!("{}", msg);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}
