//! Page object resolver
//!
//! Loads page definitions through a [`PageRegistry`], caches them by class
//! name and resolves element names against fresh instances.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, instrument};

use super::definition::{ElementSource, PageDefinition, PageInstance, ResolvedElement};
use super::registry::PageRegistry;
use crate::driver::DriverHandle;
use crate::{Error, Result};

/// Resolves page objects and their elements
#[derive(Debug)]
pub struct PageObjectResolver {
    registry: Arc<dyn PageRegistry>,
    cache: RwLock<HashMap<String, Arc<PageDefinition>>>,
}

impl PageObjectResolver {
    pub fn new(registry: Arc<dyn PageRegistry>) -> Self {
        Self {
            registry,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Instance of `class_name` bound to `driver`.
    ///
    /// The definition is loaded once and cached; the instance is new on
    /// every call.
    #[instrument(skip(self, driver))]
    pub async fn get_page_object(&self, class_name: &str, driver: DriverHandle) -> Result<PageInstance> {
        debug!("Loading page object: {}", class_name);

        if class_name.is_empty() {
            return Err(Error::page_not_found(class_name));
        }

        let definition = self.definition(class_name).await?;
        Ok(definition.instantiate(driver))
    }

    /// Resolve `element_name` on `page`.
    ///
    /// Tries the `get<ElementName>` accessor, then a direct property, then
    /// the page's element map.
    pub fn get_element_from_page(&self, element_name: &str, page: &PageInstance) -> Result<ResolvedElement> {
        debug!(
            "Getting element: {} from page: {}",
            element_name,
            page.class_name()
        );

        if !element_name.is_empty() {
            for source in page.sources(element_name) {
                match source {
                    ElementSource::Accessor(accessor) => return Ok(accessor(page)),
                    ElementSource::DirectProperty(value) => return Ok(value.clone().into()),
                    ElementSource::ElementsMap(elements) => {
                        if let Some(value) = elements.get(element_name) {
                            return Ok(value.clone().into());
                        }
                    }
                }
            }
        }

        error!(
            "Element \"{}\" not found in page object \"{}\"",
            element_name,
            page.class_name()
        );
        Err(Error::element_not_found(
            element_name,
            page.class_name(),
            page.identifier(),
        ))
    }

    /// Load the page and resolve one element in a single call
    pub async fn resolve(
        &self,
        class_name: &str,
        element_name: &str,
        driver: DriverHandle,
    ) -> Result<ResolvedElement> {
        let page = self.get_page_object(class_name, driver).await?;
        self.get_element_from_page(element_name, &page)
    }

    /// Whether the definition for `class_name` is cached
    pub async fn is_cached(&self, class_name: &str) -> bool {
        self.cache.read().await.contains_key(class_name)
    }

    /// Number of cached definitions
    pub async fn cached_count(&self) -> usize {
        self.cache.read().await.len()
    }

    async fn definition(&self, class_name: &str) -> Result<Arc<PageDefinition>> {
        if let Some(definition) = self.cache.read().await.get(class_name) {
            return Ok(definition.clone());
        }

        match self.registry.load(class_name).await {
            Ok(Some(definition)) => {
                info!("Loaded page definition {} ({})", class_name, definition.identifier());
                self.cache
                    .write()
                    .await
                    .insert(class_name.to_string(), definition.clone());
                Ok(definition)
            }
            Ok(None) => {
                error!(
                    "Failed to import page object class: {} (tried {:?})",
                    class_name,
                    self.registry.candidates(class_name)
                );
                Err(Error::page_not_found(class_name))
            }
            Err(e) => {
                error!("Error loading page object: {}: {}", class_name, e);
                Err(e)
            }
        }
    }
}
