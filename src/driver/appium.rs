//! Appium driver implementation
//!
//! Speaks the W3C WebDriver HTTP protocol (as served by Appium 2/3) with
//! reqwest. Element lookups poll until the caller's timeout elapses.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use reqwest::Method;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

use super::selector::Selector;
use super::traits::{AutomationDriver, ElementHandle};
use crate::config::Config;
use crate::{Error, Result};

/// W3C element reference key
const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// Legacy JSONWP element reference key
const LEGACY_ELEMENT_KEY: &str = "ELEMENT";

/// Interval between element lookup attempts
const POLL_INTERVAL_MS: u64 = 250;

/// W3C error code for a lookup that found nothing
pub const NO_SUCH_ELEMENT: &str = "no such element";

/// W3C error code for an element detached from the UI
pub const STALE_ELEMENT: &str = "stale element reference";

/// HTTP plumbing shared by a session and its elements
#[derive(Debug)]
struct WebDriverSession {
    http: reqwest::Client,
    base_url: String,
    session_id: String,
}

impl WebDriverSession {
    fn url(&self, path: &str) -> String {
        format!("{}/session/{}{}", self.base_url, self.session_id, path)
    }

    async fn command(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value> {
        send(&self.http, method, &self.url(path), body).await
    }
}

/// Send a WebDriver command and unwrap the `value` member
async fn send(http: &reqwest::Client, method: Method, url: &str, body: Option<Value>) -> Result<Value> {
    debug!("WebDriver {} {}", method, url);

    let mut request = http.request(method, url);
    if let Some(body) = body {
        request = request.json(&body);
    }

    let response = request.send().await?;
    let status = response.status();
    let payload: Value = response.json().await?;
    let value = payload.get("value").cloned().unwrap_or(Value::Null);

    if let Some(error) = value.get("error").and_then(|e| e.as_str()) {
        let message = value
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or_default();
        return Err(Error::driver(error, message));
    }

    if !status.is_success() {
        return Err(Error::driver(status.as_str(), payload.to_string()));
    }

    Ok(value)
}

/// Whether an error is the driver reporting a missing element
pub fn is_no_such_element(err: &Error) -> bool {
    matches!(err, Error::Driver { status, .. } if status == NO_SUCH_ELEMENT)
}

fn element_id(value: &Value) -> Option<String> {
    value
        .get(ELEMENT_KEY)
        .or_else(|| value.get(LEGACY_ELEMENT_KEY))
        .and_then(|id| id.as_str())
        .map(|id| id.to_string())
}

/// Appium session
#[derive(Debug, Clone)]
pub struct AppiumDriver {
    session: Arc<WebDriverSession>,
}

impl AppiumDriver {
    /// Open a new session on the Appium server at `base_url`
    #[instrument(skip(capabilities))]
    pub async fn connect(base_url: &str, capabilities: Value) -> Result<Self> {
        let http = reqwest::Client::new();
        let base_url = base_url.trim_end_matches('/').to_string();

        let body = json!({
            "capabilities": {
                "alwaysMatch": capabilities,
                "firstMatch": [{}],
            }
        });

        let value = send(&http, Method::POST, &format!("{}/session", base_url), Some(body)).await?;
        let session_id = value
            .get("sessionId")
            .and_then(|id| id.as_str())
            .ok_or_else(|| Error::driver("session not created", "response carried no sessionId"))?
            .to_string();

        info!("Appium session {} created on {}", session_id, base_url);

        Ok(Self {
            session: Arc::new(WebDriverSession {
                http,
                base_url,
                session_id,
            }),
        })
    }

    /// Open a session using the configured URL and capabilities
    pub async fn from_config(config: &Config) -> Result<Self> {
        Self::connect(&config.appium_url, capabilities_from_config(config)).await
    }

    /// Query the server's `/status` endpoint
    pub async fn status(base_url: &str) -> Result<Value> {
        let http = reqwest::Client::new();
        let url = format!("{}/status", base_url.trim_end_matches('/'));
        send(&http, Method::GET, &url, None).await
    }

    async fn find_once(&self, raw: &str, selector: &Selector) -> Result<Arc<dyn ElementHandle>> {
        let value = self
            .session
            .command(Method::POST, "/element", Some(selector.to_w3c()))
            .await?;

        let id = element_id(&value)
            .ok_or_else(|| Error::driver("invalid response", format!("no element reference in {}", value)))?;

        Ok(Arc::new(AppiumElement {
            session: self.session.clone(),
            id,
            selector: raw.to_string(),
        }))
    }
}

/// Capabilities for the configured platform, merged with configured extras
pub fn capabilities_from_config(config: &Config) -> Value {
    let mut capabilities = serde_json::Map::new();

    let (platform, automation) = if config.is_ios() {
        ("iOS", "XCUITest")
    } else {
        ("Android", "UiAutomator2")
    };
    capabilities.insert("platformName".to_string(), json!(platform));
    capabilities.insert("appium:automationName".to_string(), json!(automation));

    for (key, value) in &config.capabilities {
        let key = if key.contains(':') || key == "platformName" {
            key.clone()
        } else {
            format!("appium:{}", key)
        };
        capabilities.insert(key, value.clone());
    }

    Value::Object(capabilities)
}

#[async_trait]
impl AutomationDriver for AppiumDriver {
    fn session_id(&self) -> &str {
        &self.session.session_id
    }

    #[instrument(skip(self))]
    async fn find_element(&self, selector: &str, timeout_ms: u64) -> Result<Arc<dyn ElementHandle>> {
        let parsed = Selector::parse(selector)?;
        let deadline = Instant::now() + Duration::from_millis(timeout_ms);

        loop {
            match self.find_once(selector, &parsed).await {
                Ok(element) => return Ok(element),
                Err(e) if is_no_such_element(&e) => {
                    if Instant::now() >= deadline {
                        return Err(Error::timeout(format!(
                            "Element \"{}\" not found within {}ms",
                            selector, timeout_ms
                        )));
                    }
                    tokio::time::sleep(Duration::from_millis(POLL_INTERVAL_MS)).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn find_elements(&self, selector: &str) -> Result<Vec<Arc<dyn ElementHandle>>> {
        let parsed = Selector::parse(selector)?;
        let value = self
            .session
            .command(Method::POST, "/elements", Some(parsed.to_w3c()))
            .await?;

        let items = value.as_array().cloned().unwrap_or_default();
        Ok(items
            .iter()
            .filter_map(element_id)
            .map(|id| {
                Arc::new(AppiumElement {
                    session: self.session.clone(),
                    id,
                    selector: selector.to_string(),
                }) as Arc<dyn ElementHandle>
            })
            .collect())
    }

    async fn screenshot(&self) -> Result<Vec<u8>> {
        let value = self.session.command(Method::GET, "/screenshot", None).await?;
        let data = value
            .as_str()
            .ok_or_else(|| Error::driver("invalid response", "screenshot is not a string"))?;

        BASE64
            .decode(data)
            .map_err(|e| Error::internal(format!("Failed to decode screenshot: {}", e)))
    }

    async fn quit(&self) -> Result<()> {
        info!("Closing Appium session {}", self.session.session_id);
        self.session.command(Method::DELETE, "", None).await?;
        Ok(())
    }
}

/// Element realized through an Appium session
#[derive(Debug)]
pub struct AppiumElement {
    session: Arc<WebDriverSession>,
    id: String,
    selector: String,
}

impl AppiumElement {
    async fn element_command(&self, method: Method, action: &str, body: Option<Value>) -> Result<Value> {
        let path = format!("/element/{}{}", self.id, action);
        self.session.command(method, &path, body).await
    }
}

#[async_trait]
impl ElementHandle for AppiumElement {
    fn id(&self) -> &str {
        &self.id
    }

    fn selector(&self) -> &str {
        &self.selector
    }

    async fn text(&self) -> Result<String> {
        let value = self.element_command(Method::GET, "/text", None).await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>> {
        let action = format!("/attribute/{}", urlencoding::encode(name));
        let value = self.element_command(Method::GET, &action, None).await?;

        Ok(match value {
            Value::Null => None,
            Value::String(s) => Some(s),
            other => Some(other.to_string()),
        })
    }

    async fn is_displayed(&self) -> Result<bool> {
        let value = self.element_command(Method::GET, "/displayed", None).await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    async fn is_existing(&self) -> Result<bool> {
        match self.is_displayed().await {
            Ok(_) => Ok(true),
            Err(Error::Driver { status, .. }) if status == STALE_ELEMENT || status == NO_SUCH_ELEMENT => {
                warn!("Element {} ({}) is no longer attached", self.id, self.selector);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    async fn click(&self) -> Result<()> {
        self.element_command(Method::POST, "/click", Some(json!({}))).await?;
        Ok(())
    }

    async fn send_keys(&self, text: &str) -> Result<()> {
        self.element_command(Method::POST, "/value", Some(json!({ "text": text })))
            .await?;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.element_command(Method::POST, "/clear", Some(json!({}))).await?;
        Ok(())
    }
}
