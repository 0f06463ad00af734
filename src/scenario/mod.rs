//! # Scenarios
//!
//! The per-scenario world and the steps that check UI content against saved
//! API responses.
//!
//! ```rust,no_run
//! use mobile_e2e::api::HttpMethod;
//! use mobile_e2e::compare::ComparisonOptions;
//! use mobile_e2e::config::Config;
//! use mobile_e2e::driver::AppiumDriver;
//! use mobile_e2e::scenario::ScenarioContext;
//! use std::sync::Arc;
//!
//! # async fn example() -> mobile_e2e::Result<()> {
//! let config = Config::load()?;
//! let driver = Arc::new(AppiumDriver::from_config(&config).await?);
//! let mut world = ScenarioContext::new(config)?.with_driver(driver);
//!
//! world.send_request(HttpMethod::Get, "users/2", None).await?;
//! world.save_last_response("userProfile").await?;
//! world
//!     .verify_page_element_matches_response(
//!         "ProfilePage",
//!         "firstName",
//!         "userProfile.data.data.first_name",
//!         &ComparisonOptions::ui_defaults(),
//!     )
//!     .await?;
//! world.teardown().await?;
//! # Ok(())
//! # }
//! ```

mod assertions;
pub mod context;
pub mod steps;


pub use context::ScenarioContext;
pub use steps::options_with;
