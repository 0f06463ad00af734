//! Per-scenario state
//!
//! A [`ScenarioContext`] is created for every scenario and owns everything
//! steps share: configuration, the driver, the page resolver, the response
//! store and the last API response.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::api::{ApiClient, ApiResponse, HttpMethod};
use crate::config::Config;
use crate::driver::{DriverHandle, ElementLocator};
use crate::pages::{FilePageRegistry, PageObjectResolver, PageRegistry};
use crate::store::{lookup, split_response_path, ResponseStore, StoredResponse};
use crate::{Error, Result};

/// Scenario world
#[derive(Debug)]
pub struct ScenarioContext {
    id: String,
    config: Arc<Config>,
    driver: Option<DriverHandle>,
    resolver: Arc<PageObjectResolver>,
    store: ResponseStore,
    api: ApiClient,
    last_response: Option<ApiResponse>,
    test_data: HashMap<String, Value>,
}

impl ScenarioContext {
    /// Context with a file-backed page registry, a store under the configured
    /// directory and no driver
    pub fn new(config: Config) -> Result<Self> {
        let registry: Arc<dyn PageRegistry> = Arc::new(FilePageRegistry::from_config(&config));
        let api = ApiClient::from_config(&config)?;
        let store = ResponseStore::from_config(&config);

        let context = Self {
            id: Uuid::new_v4().to_string(),
            config: Arc::new(config),
            driver: None,
            resolver: Arc::new(PageObjectResolver::new(registry)),
            store,
            api,
            last_response: None,
            test_data: HashMap::new(),
        };
        debug!("Created scenario context {}", context.id);
        Ok(context)
    }

    #[must_use]
    pub fn with_driver(mut self, driver: DriverHandle) -> Self {
        self.driver = Some(driver);
        self
    }

    /// Replace the page registry; the definition cache starts empty
    #[must_use]
    pub fn with_registry(mut self, registry: Arc<dyn PageRegistry>) -> Self {
        self.resolver = Arc::new(PageObjectResolver::new(registry));
        self
    }

    #[must_use]
    pub fn with_store(mut self, store: ResponseStore) -> Self {
        self.store = store;
        self
    }

    #[must_use]
    pub fn with_api_client(mut self, api: ApiClient) -> Self {
        self.api = api;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn driver(&self) -> Result<&DriverHandle> {
        self.driver
            .as_ref()
            .ok_or_else(|| Error::configuration("No driver attached to the scenario"))
    }

    pub fn resolver(&self) -> &Arc<PageObjectResolver> {
        &self.resolver
    }

    pub fn store(&self) -> &ResponseStore {
        &self.store
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn api_mut(&mut self) -> &mut ApiClient {
        &mut self.api
    }

    /// Locator over the scenario's driver using the explicit wait timeout
    pub fn locator(&self) -> Result<ElementLocator> {
        Ok(ElementLocator::new(
            self.resolver.clone(),
            self.driver()?.clone(),
            self.config.explicit_timeout_ms,
        ))
    }

    /// Send a request and remember the response as the last one
    pub async fn send_request(
        &mut self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
    ) -> Result<&ApiResponse> {
        let response = self.api.request(method, path, body, None).await?;
        Ok(self.last_response.insert(response))
    }

    pub fn set_last_response(&mut self, response: ApiResponse) {
        self.last_response = Some(response);
    }

    pub fn last_response(&self) -> Option<&ApiResponse> {
        self.last_response.as_ref()
    }

    pub(super) fn require_last_response(&self) -> Result<&ApiResponse> {
        self.last_response.as_ref().ok_or_else(|| {
            Error::response_not_found(
                "last response (no API request has been made in this scenario)",
            )
        })
    }

    /// Save the whole last response under `key`
    pub async fn save_last_response(&self, key: &str) -> Result<StoredResponse> {
        let response = self.require_last_response()?.to_value();
        let stored = self.store.save(key, response, true).await;
        info!("Saved API response as \"{}\"", key);
        Ok(stored)
    }

    /// Save one property of the last response under `key`
    pub async fn save_response_property(&self, path: &str, key: &str) -> Result<StoredResponse> {
        let response = self.require_last_response()?.to_value();
        let value = lookup(&response, path)
            .cloned()
            .ok_or_else(|| Error::property_not_found(path, "last response"))?;

        let stored = self.store.save(key, value, true).await;
        info!("Saved API response property \"{}\" as \"{}\"", path, key);
        Ok(stored)
    }

    /// Value at `key.rest.of.path` in the response store
    pub async fn resolve_expected(&self, response_path: &str) -> Result<Value> {
        let (key, path) = split_response_path(response_path);

        let saved = self
            .store
            .get(key)
            .await
            .ok_or_else(|| Error::response_not_found(key))?;

        lookup(&saved, path)
            .cloned()
            .ok_or_else(|| Error::property_not_found(path, key))
    }

    pub fn set_test_data(&mut self, key: impl Into<String>, value: Value) {
        self.test_data.insert(key.into(), value);
    }

    pub fn test_data(&self, key: &str) -> Option<&Value> {
        self.test_data.get(key)
    }

    /// End the driver session, if any
    pub async fn teardown(&mut self) -> Result<()> {
        if let Some(driver) = self.driver.take() {
            info!("Closing driver session {} for scenario {}", driver.session_id(), self.id);
            if let Err(e) = driver.quit().await {
                warn!("Failed to close driver session: {}", e);
                return Err(e);
            }
        }
        Ok(())
    }
}
