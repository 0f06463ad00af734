//! # Automation drivers
//!
//! Abstraction over the mobile automation backend. The framework only needs
//! to find elements and read or act on them; everything else stays with the
//! backend.
//!
//! ## Module structure
//! - `traits`: `AutomationDriver` and `ElementHandle`
//! - `selector`: Appium selector syntax to W3C locator strategies
//! - `appium`: W3C WebDriver client for an Appium server
//! - `locator`: page/element names to live elements
//! - `mock`: in-memory driver for tests
//!
//! ## Usage
//! ```rust,no_run
//! use mobile_e2e::driver::{AppiumDriver, AutomationDriver, ElementLocator};
//! use mobile_e2e::pages::{FilePageRegistry, PageObjectResolver};
//! use mobile_e2e::config::Config;
//! use std::sync::Arc;
//!
//! # async fn example() -> mobile_e2e::Result<()> {
//! let config = Config::load()?;
//! let driver = Arc::new(AppiumDriver::from_config(&config).await?);
//! let resolver = Arc::new(PageObjectResolver::new(Arc::new(FilePageRegistry::from_config(&config))));
//!
//! let locator = ElementLocator::new(resolver, driver.clone(), config.explicit_timeout_ms);
//! locator.locate("SauceLoginPage", "loginButton").await?.click().await?;
//! driver.quit().await?;
//! # Ok(())
//! # }
//! ```

pub mod appium;
pub mod locator;
pub mod mock;
pub mod selector;
pub mod traits;


pub use appium::{capabilities_from_config, is_no_such_element, AppiumDriver, AppiumElement};
pub use locator::ElementLocator;
pub use mock::{MockDriver, MockElement};
pub use selector::{LocatorStrategy, Selector};
pub use traits::{AutomationDriver, DriverHandle, ElementHandle};
