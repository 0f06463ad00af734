//! Response store implementation
//!
//! In-memory map of captured responses with a best-effort JSON mirror on disk.

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use crate::config::Config;
use crate::Result;

/// A response captured under a key
#[derive(Debug, Clone, Serialize)]
pub struct StoredResponse {
    pub key: String,
    pub payload: Value,
    /// Where the disk mirror was written, if it was
    pub saved_at_disk_path: Option<PathBuf>,
}

/// Key/value store for captured API responses
#[derive(Debug, Clone)]
pub struct ResponseStore {
    entries: Arc<RwLock<HashMap<String, Value>>>,
    store_dir: PathBuf,
}

impl ResponseStore {
    /// Create a store mirroring to `store_dir`
    pub fn new(store_dir: impl Into<PathBuf>) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            store_dir: store_dir.into(),
        }
    }

    /// Create a store using the configured directory
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.response_store_dir)
    }

    /// Directory holding the disk mirror
    pub fn store_dir(&self) -> &Path {
        &self.store_dir
    }

    /// File backing `key` on disk
    pub fn file_path(&self, key: &str) -> PathBuf {
        self.store_dir.join(format!("{}.json", sanitize_key(key)))
    }

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// When `persist_to_disk` is set the value is also written as pretty JSON.
    /// A failed write is logged and the in-memory save still stands.
    #[instrument(skip(self, value))]
    pub async fn save(&self, key: &str, value: Value, persist_to_disk: bool) -> StoredResponse {
        let saved_at_disk_path = if persist_to_disk {
            match self.save_to_disk(key, &value).await {
                Ok(path) => Some(path),
                Err(e) => {
                    warn!("Error saving API response \"{}\" to disk: {}", key, e);
                    None
                }
            }
        } else {
            None
        };

        self.entries.write().await.insert(key.to_string(), value.clone());
        debug!("Saved response \"{}\" (persisted: {})", key, saved_at_disk_path.is_some());

        StoredResponse {
            key: key.to_string(),
            payload: value,
            saved_at_disk_path,
        }
    }

    /// Fetch the value for `key`, falling back to the disk mirror.
    ///
    /// A disk hit is cached in memory. Missing or unparseable files yield `None`.
    #[instrument(skip(self))]
    pub async fn get(&self, key: &str) -> Option<Value> {
        if let Some(value) = self.entries.read().await.get(key) {
            return Some(value.clone());
        }

        match self.load_from_disk(key).await {
            Ok(Some(value)) => {
                debug!("Loaded response \"{}\" from disk", key);
                self.entries.write().await.insert(key.to_string(), value.clone());
                Some(value)
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Error loading API response \"{}\" from disk: {}", key, e);
                None
            }
        }
    }

    /// Whether `key` is held in memory
    pub async fn contains(&self, key: &str) -> bool {
        self.entries.read().await.contains_key(key)
    }

    /// Number of in-memory entries
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    async fn save_to_disk(&self, key: &str, value: &Value) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.store_dir).await?;

        let path = self.file_path(key);
        let content = serde_json::to_string_pretty(value)?;
        tokio::fs::write(&path, content).await?;
        Ok(path)
    }

    async fn load_from_disk(&self, key: &str) -> Result<Option<Value>> {
        let path = self.file_path(key);

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        Ok(Some(serde_json::from_str(&content)?))
    }
}

/// Filesystem-safe form of a key: non-alphanumerics become `_`, lower-cased
pub fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect()
}
