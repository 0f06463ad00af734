//! Common test utilities
//!
//! Shared fixtures for the integration tests: temporary directories, Sauce
//! Labs demo page files and configuration pointing at a mock server.

#![allow(dead_code)]

use mobile_e2e::config::Config;
use std::path::{Path, PathBuf};

/// Fresh, empty temporary directory
pub fn temp_dir(prefix: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("{}-{}", prefix, uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

/// Write the demo app's page files into `dir`
pub fn write_sauce_pages(dir: &Path) {
    std::fs::write(
        dir.join("SauceLoginPage.toml"),
        r#"name = "SauceLoginPage"
identifier = "SauceLogin"

[elements]
usernameField = "~test-Username"
passwordField = "~test-Password"
loginButton = "~test-LOGIN"
errorMessage = "//android.view.ViewGroup[@content-desc='test-Error message']/android.widget.TextView"
"#,
    )
    .expect("write login page");

    std::fs::write(
        dir.join("SauceProductsPage.json"),
        r#"{
  "name": "SauceProductsPage",
  "identifier": "SauceProducts",
  "elements": {
    "title": "//android.widget.TextView[@text='PRODUCTS']",
    "cartBadge": "~test-Cart"
  },
  "properties": {
    "itemCount": 6
  }
}"#,
    )
    .expect("write products page");
}

/// Configuration aimed at a mock server, with page files under `pages_dir`
/// and responses persisted under `store_dir`
pub fn test_config(server_url: &str, pages_dir: &Path, store_dir: &Path) -> Config {
    Config {
        appium_url: server_url.to_string(),
        base_api_url: format!("{}/api", server_url),
        implicit_timeout_ms: 500,
        explicit_timeout_ms: 1000,
        api_timeout_ms: 5000,
        response_store_dir: store_dir.display().to_string(),
        page_search_paths: Some(vec![pages_dir.display().to_string()]),
        ..Config::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sauce_pages_written() {
        let dir = temp_dir("mobile-e2e-common");
        write_sauce_pages(&dir);

        assert!(dir.join("SauceLoginPage.toml").exists());
        assert!(dir.join("SauceProductsPage.json").exists());
    }
}
