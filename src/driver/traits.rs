//! Automation driver traits
//!
//! The narrow surface the framework needs from an automation backend: turn a
//! selector into a live element and read or act on that element.

use async_trait::async_trait;
use std::sync::Arc;

use crate::Result;

/// Live element reference realized by a driver
#[async_trait]
pub trait ElementHandle: Send + Sync + std::fmt::Debug {
    /// Driver-assigned element ID
    fn id(&self) -> &str;

    /// Selector the element was found with
    fn selector(&self) -> &str;

    /// Visible text
    async fn text(&self) -> Result<String>;

    /// Attribute value, `None` when absent
    async fn attribute(&self, name: &str) -> Result<Option<String>>;

    /// Whether the element is displayed
    async fn is_displayed(&self) -> Result<bool>;

    /// Whether the element is still attached to the UI
    async fn is_existing(&self) -> Result<bool>;

    /// Tap/click the element
    async fn click(&self) -> Result<()>;

    /// Type text into the element
    async fn send_keys(&self, text: &str) -> Result<()>;

    /// Clear an input element
    async fn clear(&self) -> Result<()>;
}

/// Automation driver session
#[async_trait]
pub trait AutomationDriver: Send + Sync + std::fmt::Debug {
    /// Session ID
    fn session_id(&self) -> &str;

    /// Find a single element, waiting up to `timeout_ms` for it to appear
    async fn find_element(&self, selector: &str, timeout_ms: u64) -> Result<Arc<dyn ElementHandle>>;

    /// Find all elements currently matching the selector
    async fn find_elements(&self, selector: &str) -> Result<Vec<Arc<dyn ElementHandle>>>;

    /// Capture a PNG screenshot
    async fn screenshot(&self) -> Result<Vec<u8>>;

    /// End the session
    async fn quit(&self) -> Result<()>;
}

/// Shared driver handle passed to page instances and locators
pub type DriverHandle = Arc<dyn AutomationDriver>;
