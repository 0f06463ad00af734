//! Page definitions and instances
//!
//! A [`PageDefinition`] describes one screen: its identifier, element
//! selectors, plain properties and computed accessors. Definitions are
//! immutable once built; [`PageInstance`]s bind a definition to a driver.

use serde::Deserialize;
use serde_json::Value;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use crate::driver::{DriverHandle, ElementHandle};

/// Computed accessor, invoked with the instance it is called on
pub type Accessor = Arc<dyn Fn(&PageInstance) -> ResolvedElement + Send + Sync>;

/// Computed element map
pub type ElementsFn = Arc<dyn Fn(&PageInstance) -> HashMap<String, Value> + Send + Sync>;

/// Result of resolving an element name within a page
#[derive(Clone)]
pub enum ResolvedElement {
    /// Selector to hand to the driver
    Selector(String),
    /// Non-selector value (numbers, flags, nested data)
    Value(Value),
    /// Element already realized by an accessor
    Live(Arc<dyn ElementHandle>),
}

impl ResolvedElement {
    pub fn as_selector(&self) -> Option<&str> {
        match self {
            ResolvedElement::Selector(s) => Some(s),
            _ => None,
        }
    }

    /// The resolved value as JSON; `None` for live elements
    pub fn to_value(&self) -> Option<Value> {
        match self {
            ResolvedElement::Selector(s) => Some(Value::String(s.clone())),
            ResolvedElement::Value(v) => Some(v.clone()),
            ResolvedElement::Live(_) => None,
        }
    }
}

impl From<Value> for ResolvedElement {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => ResolvedElement::Selector(s),
            other => ResolvedElement::Value(other),
        }
    }
}

impl From<&str> for ResolvedElement {
    fn from(selector: &str) -> Self {
        ResolvedElement::Selector(selector.to_string())
    }
}

impl fmt::Debug for ResolvedElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedElement::Selector(s) => f.debug_tuple("Selector").field(s).finish(),
            ResolvedElement::Value(v) => f.debug_tuple("Value").field(v).finish(),
            ResolvedElement::Live(e) => f.debug_tuple("Live").field(&e.id()).finish(),
        }
    }
}

/// Where a page keeps its element map
#[derive(Clone)]
pub enum ElementsSource {
    Static(HashMap<String, Value>),
    Computed(ElementsFn),
}

/// One place an element name may be found, in resolution order
pub enum ElementSource<'a> {
    Accessor(&'a Accessor),
    DirectProperty(&'a Value),
    ElementsMap(Cow<'a, HashMap<String, Value>>),
}

/// Immutable description of a screen
pub struct PageDefinition {
    class_name: String,
    identifier: String,
    accessors: HashMap<String, Accessor>,
    properties: HashMap<String, Value>,
    elements: Option<ElementsSource>,
}

impl PageDefinition {
    pub fn builder(class_name: impl Into<String>) -> PageDefinitionBuilder {
        PageDefinitionBuilder::new(class_name)
    }

    /// Name the definition is registered under
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Screen identifier used in logs and errors
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Bind the definition to a driver; every call yields a fresh instance
    pub fn instantiate(self: &Arc<Self>, driver: DriverHandle) -> PageInstance {
        PageInstance {
            definition: Arc::clone(self),
            driver,
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Parse a page file (`toml` or `json`)
    pub fn from_file_contents(contents: &str, format: PageFileFormat) -> crate::Result<Self> {
        let file: PageFile = match format {
            PageFileFormat::Toml => toml::from_str(contents)
                .map_err(|e| crate::Error::configuration(format!("Invalid page file: {}", e)))?,
            PageFileFormat::Json => serde_json::from_str(contents)?,
        };

        let mut builder = PageDefinition::builder(file.name);
        if let Some(identifier) = file.identifier {
            builder = builder.identifier(identifier);
        }
        for (name, value) in file.properties {
            builder = builder.property(name, value);
        }
        Ok(builder.elements(file.elements).build())
    }
}

impl fmt::Debug for PageDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageDefinition")
            .field("class_name", &self.class_name)
            .field("identifier", &self.identifier)
            .field("accessors", &self.accessors.keys().collect::<Vec<_>>())
            .field("properties", &self.properties)
            .finish_non_exhaustive()
    }
}

/// Supported page file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFileFormat {
    Toml,
    Json,
}

impl PageFileFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            PageFileFormat::Toml => "toml",
            PageFileFormat::Json => "json",
        }
    }
}

#[derive(Debug, Deserialize)]
struct PageFile {
    name: String,
    identifier: Option<String>,
    #[serde(default)]
    elements: HashMap<String, Value>,
    #[serde(default)]
    properties: HashMap<String, Value>,
}

/// Builder for [`PageDefinition`]
pub struct PageDefinitionBuilder {
    class_name: String,
    identifier: Option<String>,
    accessors: HashMap<String, Accessor>,
    properties: HashMap<String, Value>,
    elements: Option<ElementsSource>,
}

impl PageDefinitionBuilder {
    fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            identifier: None,
            accessors: HashMap::new(),
            properties: HashMap::new(),
            elements: None,
        }
    }

    #[must_use]
    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Add a computed accessor for `element_name`, exposed as `get<ElementName>`
    #[must_use]
    pub fn accessor<F>(mut self, element_name: &str, accessor: F) -> Self
    where
        F: Fn(&PageInstance) -> ResolvedElement + Send + Sync + 'static,
    {
        self.accessors
            .insert(getter_name(element_name), Arc::new(accessor));
        self
    }

    #[must_use]
    pub fn property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Add one entry to a static element map
    #[must_use]
    pub fn element(mut self, name: impl Into<String>, selector: impl Into<Value>) -> Self {
        let mut map = match self.elements.take() {
            Some(ElementsSource::Static(map)) => map,
            _ => HashMap::new(),
        };
        map.insert(name.into(), selector.into());
        self.elements = Some(ElementsSource::Static(map));
        self
    }

    /// Replace the element map with a static one
    #[must_use]
    pub fn elements(mut self, elements: HashMap<String, Value>) -> Self {
        self.elements = Some(ElementsSource::Static(elements));
        self
    }

    /// Replace the element map with one computed per lookup
    #[must_use]
    pub fn computed_elements<F>(mut self, elements: F) -> Self
    where
        F: Fn(&PageInstance) -> HashMap<String, Value> + Send + Sync + 'static,
    {
        self.elements = Some(ElementsSource::Computed(Arc::new(elements)));
        self
    }

    pub fn build(self) -> PageDefinition {
        let identifier = self
            .identifier
            .unwrap_or_else(|| self.class_name.clone());

        PageDefinition {
            class_name: self.class_name,
            identifier,
            accessors: self.accessors,
            properties: self.properties,
            elements: self.elements,
        }
    }
}

/// A page definition bound to a driver
#[derive(Clone)]
pub struct PageInstance {
    definition: Arc<PageDefinition>,
    driver: DriverHandle,
    instance_id: String,
}

impl PageInstance {
    pub fn class_name(&self) -> &str {
        self.definition.class_name()
    }

    pub fn identifier(&self) -> &str {
        self.definition.identifier()
    }

    pub fn driver(&self) -> &DriverHandle {
        &self.driver
    }

    /// Unique per instantiation
    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    pub fn definition(&self) -> &Arc<PageDefinition> {
        &self.definition
    }

    /// Places `element_name` may live, in resolution order:
    /// accessor, direct property, element map
    pub fn sources(&self, element_name: &str) -> Vec<ElementSource<'_>> {
        let mut sources = Vec::with_capacity(3);

        if let Some(accessor) = self.definition.accessors.get(&getter_name(element_name)) {
            sources.push(ElementSource::Accessor(accessor));
        }

        if let Some(value) = self.definition.properties.get(element_name) {
            sources.push(ElementSource::DirectProperty(value));
        }

        match &self.definition.elements {
            Some(ElementsSource::Static(map)) => {
                sources.push(ElementSource::ElementsMap(Cow::Borrowed(map)))
            }
            Some(ElementsSource::Computed(compute)) => {
                sources.push(ElementSource::ElementsMap(Cow::Owned(compute(self))))
            }
            None => {}
        }

        sources
    }
}

impl fmt::Debug for PageInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageInstance")
            .field("class_name", &self.class_name())
            .field("identifier", &self.identifier())
            .field("instance_id", &self.instance_id)
            .field("session_id", &self.driver.session_id())
            .finish()
    }
}

/// Accessor name for an element: `username` becomes `getUsername`
pub fn getter_name(element_name: &str) -> String {
    let mut chars = element_name.chars();
    match chars.next() {
        Some(first) => format!("get{}{}", first.to_uppercase(), chars.as_str()),
        None => "get".to_string(),
    }
}
