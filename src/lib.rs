//! Mobile-E2E: support library for mobile end-to-end test suites
//!
//! Resolves page objects to element selectors, drives an Appium server,
//! caches API responses and compares API data with what the UI shows.

pub mod config;
pub mod error;
pub mod logging;

pub mod api;
pub mod compare;
pub mod driver;
pub mod pages;
pub mod scenario;
pub mod store;

// Re-exports
pub use error::{Error, Result};

/// Mobile-E2E library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
