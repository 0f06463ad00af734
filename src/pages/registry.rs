//! Page registries
//!
//! A registry turns a page class name into a [`PageDefinition`]. The static
//! registry is filled explicitly at startup; the file registry searches an
//! ordered list of directories for page files.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

use super::definition::{PageDefinition, PageFileFormat};
use crate::config::Config;
use crate::Result;

/// Source of page definitions
#[async_trait]
pub trait PageRegistry: Send + Sync + std::fmt::Debug {
    /// Locations that will be tried for `class_name`, in order
    fn candidates(&self, class_name: &str) -> Vec<String>;

    /// Load the definition for `class_name`; `Ok(None)` when no candidate has it
    async fn load(&self, class_name: &str) -> Result<Option<Arc<PageDefinition>>>;
}

/// Registry populated by explicit registration
#[derive(Debug, Default)]
pub struct StaticPageRegistry {
    definitions: HashMap<String, Arc<PageDefinition>>,
    loads: AtomicUsize,
}

impl StaticPageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition under its class name, replacing any previous one
    pub fn register(&mut self, definition: PageDefinition) {
        self.definitions
            .insert(definition.class_name().to_string(), Arc::new(definition));
    }

    #[must_use]
    pub fn with_page(mut self, definition: PageDefinition) -> Self {
        self.register(definition);
        self
    }

    /// Number of `load` calls served
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[async_trait]
impl PageRegistry for StaticPageRegistry {
    fn candidates(&self, class_name: &str) -> Vec<String> {
        vec![format!("registry:{}", class_name)]
    }

    async fn load(&self, class_name: &str) -> Result<Option<Arc<PageDefinition>>> {
        self.loads.fetch_add(1, Ordering::Relaxed);
        Ok(self.definitions.get(class_name).cloned())
    }
}

/// Registry reading `<dir>/<ClassName>.toml` or `.json` from search directories
#[derive(Debug)]
pub struct FilePageRegistry {
    search_paths: Vec<PathBuf>,
    loads: AtomicUsize,
}

impl FilePageRegistry {
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        Self {
            search_paths,
            loads: AtomicUsize::new(0),
        }
    }

    /// Search the configured directories (or the default three variants)
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.page_search_paths())
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Number of `load` calls served
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }

    fn candidate_files(&self, class_name: &str) -> Vec<(PathBuf, PageFileFormat)> {
        self.search_paths
            .iter()
            .flat_map(|dir| {
                [PageFileFormat::Toml, PageFileFormat::Json].into_iter().map(move |format| {
                    (
                        dir.join(format!("{}.{}", class_name, format.extension())),
                        format,
                    )
                })
            })
            .collect()
    }
}

#[async_trait]
impl PageRegistry for FilePageRegistry {
    fn candidates(&self, class_name: &str) -> Vec<String> {
        self.candidate_files(class_name)
            .into_iter()
            .map(|(path, _)| path.display().to_string())
            .collect()
    }

    async fn load(&self, class_name: &str) -> Result<Option<Arc<PageDefinition>>> {
        self.loads.fetch_add(1, Ordering::Relaxed);

        for (path, format) in self.candidate_files(class_name) {
            let contents = match tokio::fs::read_to_string(&path).await {
                Ok(contents) => contents,
                Err(e) => {
                    debug!("Failed to load from path: {} ({})", path.display(), e);
                    continue;
                }
            };

            let definition = match PageDefinition::from_file_contents(&contents, format) {
                Ok(definition) => definition,
                Err(e) => {
                    debug!("Skipping unparseable page file {}: {}", path.display(), e);
                    continue;
                }
            };

            if definition.class_name() != class_name {
                debug!(
                    "Page file {} declares {} instead of {}",
                    path.display(),
                    definition.class_name(),
                    class_name
                );
                continue;
            }

            info!("Successfully loaded {} from path: {}", class_name, path.display());
            return Ok(Some(Arc::new(definition)));
        }

        Ok(None)
    }
}
