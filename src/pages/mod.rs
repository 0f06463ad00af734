//! # Page objects
//!
//! Page definitions describe one screen each: its identifier and the
//! selectors or values of its elements. Steps refer to pages and elements by
//! name; this module turns those names into selectors.
//!
//! ## Module structure
//! - `definition`: page definitions, instances and resolved elements
//! - `registry`: where definitions come from (explicit registration or files)
//! - `resolver`: definition cache and element resolution
//!
//! ## Usage
//! ```rust,no_run
//! use mobile_e2e::pages::{PageDefinition, PageObjectResolver, StaticPageRegistry};
//! use mobile_e2e::driver::DriverHandle;
//! use std::sync::Arc;
//!
//! # async fn example(driver: DriverHandle) -> mobile_e2e::Result<()> {
//! let registry = StaticPageRegistry::new().with_page(
//!     PageDefinition::builder("SauceLoginPage")
//!         .identifier("SauceLogin")
//!         .element("usernameField", "~test-Username")
//!         .build(),
//! );
//! let resolver = PageObjectResolver::new(Arc::new(registry));
//!
//! let page = resolver.get_page_object("SauceLoginPage", driver).await?;
//! let username = resolver.get_element_from_page("usernameField", &page)?;
//! assert_eq!(username.as_selector(), Some("~test-Username"));
//! # Ok(())
//! # }
//! ```

pub mod definition;
pub mod registry;
pub mod resolver;


pub use definition::{
    getter_name, Accessor, ElementSource, ElementsSource, PageDefinition, PageDefinitionBuilder,
    PageFileFormat, PageInstance, ResolvedElement,
};
pub use registry::{FilePageRegistry, PageRegistry, StaticPageRegistry};
pub use resolver::PageObjectResolver;
