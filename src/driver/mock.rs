//! Mock driver implementation for testing
//!
//! Elements are registered up front by selector; lookups never wait.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::traits::{AutomationDriver, ElementHandle};
use crate::{Error, Result};

/// Mock automation driver
#[derive(Debug)]
pub struct MockDriver {
    session_id: String,
    elements: RwLock<HashMap<String, Arc<MockElement>>>,
    find_calls: AtomicUsize,
    is_active: AtomicBool,
}

impl MockDriver {
    /// Create a new mock driver
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            elements: RwLock::new(HashMap::new()),
            find_calls: AtomicUsize::new(0),
            is_active: AtomicBool::new(true),
        }
    }

    /// Register an element under its selector
    pub async fn add_element(&self, element: MockElement) -> Arc<MockElement> {
        let element = Arc::new(element);
        self.elements
            .write()
            .await
            .insert(element.selector.clone(), element.clone());
        element
    }

    /// Remove the element registered under `selector`
    pub async fn remove_element(&self, selector: &str) {
        self.elements.write().await.remove(selector);
    }

    /// Number of find calls made so far
    pub fn find_calls(&self) -> usize {
        self.find_calls.load(Ordering::Relaxed)
    }

    pub fn is_active(&self) -> bool {
        self.is_active.load(Ordering::Relaxed)
    }

    fn ensure_active(&self) -> Result<()> {
        if self.is_active() {
            Ok(())
        } else {
            Err(Error::driver("invalid session id", "session has been closed"))
        }
    }
}

impl Default for MockDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AutomationDriver for MockDriver {
    fn session_id(&self) -> &str {
        &self.session_id
    }

    async fn find_element(&self, selector: &str, timeout_ms: u64) -> Result<Arc<dyn ElementHandle>> {
        self.ensure_active()?;
        self.find_calls.fetch_add(1, Ordering::Relaxed);

        self.elements
            .read()
            .await
            .get(selector)
            .map(|e| e.clone() as Arc<dyn ElementHandle>)
            .ok_or_else(|| {
                Error::timeout(format!(
                    "Element \"{}\" not found within {}ms",
                    selector, timeout_ms
                ))
            })
    }

    async fn find_elements(&self, selector: &str) -> Result<Vec<Arc<dyn ElementHandle>>> {
        self.ensure_active()?;
        self.find_calls.fetch_add(1, Ordering::Relaxed);

        Ok(self
            .elements
            .read()
            .await
            .get(selector)
            .map(|e| vec![e.clone() as Arc<dyn ElementHandle>])
            .unwrap_or_default())
    }

    async fn screenshot(&self) -> Result<Vec<u8>> {
        self.ensure_active()?;
        // PNG signature
        Ok(vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A])
    }

    async fn quit(&self) -> Result<()> {
        self.is_active.store(false, Ordering::Relaxed);
        Ok(())
    }
}

/// Mock element
#[derive(Debug)]
pub struct MockElement {
    id: String,
    selector: String,
    text: RwLock<String>,
    attributes: HashMap<String, String>,
    displayed: bool,
    attached: AtomicBool,
    clicks: AtomicUsize,
}

impl MockElement {
    /// Create a displayed element with the given text
    pub fn new(selector: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            selector: selector.into(),
            text: RwLock::new(text.into()),
            attributes: HashMap::new(),
            displayed: true,
            attached: AtomicBool::new(true),
            clicks: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.displayed = false;
        self
    }

    /// Simulate the element being removed from the UI
    pub fn detach(&self) {
        self.attached.store(false, Ordering::Relaxed);
    }

    /// Number of clicks received
    pub fn clicks(&self) -> usize {
        self.clicks.load(Ordering::Relaxed)
    }

    /// Current text content
    pub async fn current_text(&self) -> String {
        self.text.read().await.clone()
    }

    fn ensure_attached(&self) -> Result<()> {
        if self.attached.load(Ordering::Relaxed) {
            Ok(())
        } else {
            Err(Error::driver(
                super::appium::STALE_ELEMENT,
                format!("{} is no longer attached", self.selector),
            ))
        }
    }
}

#[async_trait]
impl ElementHandle for MockElement {
    fn id(&self) -> &str {
        &self.id
    }

    fn selector(&self) -> &str {
        &self.selector
    }

    async fn text(&self) -> Result<String> {
        self.ensure_attached()?;
        Ok(self.text.read().await.clone())
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>> {
        self.ensure_attached()?;
        Ok(self.attributes.get(name).cloned())
    }

    async fn is_displayed(&self) -> Result<bool> {
        self.ensure_attached()?;
        Ok(self.displayed)
    }

    async fn is_existing(&self) -> Result<bool> {
        Ok(self.attached.load(Ordering::Relaxed))
    }

    async fn click(&self) -> Result<()> {
        self.ensure_attached()?;
        self.clicks.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    async fn send_keys(&self, text: &str) -> Result<()> {
        self.ensure_attached()?;
        self.text.write().await.push_str(text);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.ensure_attached()?;
        self.text.write().await.clear();
        Ok(())
    }
}
