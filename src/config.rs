//! Configuration management for mobile-e2e
//!
//! Settings are merged from, in increasing precedence: built-in defaults,
//! `config/default.toml`, `config/<TEST_ENV>.toml`, `MOBILE_E2E_*` environment
//! variables and finally the legacy unprefixed variables (`APPIUM_URL`, ...).

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

/// Framework configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Target platform (`android` or `ios`)
    pub platform: String,

    /// Environment name, selects `config/<environment>.toml`
    pub environment: String,

    /// Appium server URL
    pub appium_url: String,

    /// Base URL of the API under test
    pub base_api_url: String,

    /// API request timeout in milliseconds
    pub api_timeout_ms: u64,

    /// Element lookup timeout in milliseconds
    pub implicit_timeout_ms: u64,

    /// Explicit wait timeout in milliseconds
    pub explicit_timeout_ms: u64,

    /// Retry attempts for flaky steps
    pub retry_attempts: u32,

    /// Directory holding persisted API responses
    pub response_store_dir: String,

    /// Directory name holding page definition files
    pub pages_root: String,

    /// Explicit page search directories, tried in order
    pub page_search_paths: Option<Vec<String>>,

    /// Log level
    pub log_level: String,

    /// Extra Appium capabilities
    pub capabilities: HashMap<String, serde_json::Value>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            platform: "android".to_string(),
            environment: "dev".to_string(),
            appium_url: "http://localhost:4723".to_string(),
            base_api_url: "https://api.example.com".to_string(),
            api_timeout_ms: 30000,
            implicit_timeout_ms: 5000,
            explicit_timeout_ms: 15000,
            retry_attempts: 3,
            response_store_dir: "api-responses".to_string(),
            pages_root: "pages".to_string(),
            page_search_paths: None,
            log_level: "info".to_string(),
            capabilities: HashMap::new(),
        }
    }
}

impl Config {
    /// Load the layered configuration from `./config` using `TEST_ENV`
    pub fn load() -> Result<Self> {
        let environment = env::var("TEST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_layered(Path::new("config"), &environment)
    }

    /// Load the layered configuration from a given directory and environment
    pub fn load_layered(config_dir: &Path, environment: &str) -> Result<Self> {
        let defaults = ::config::Config::try_from(&Config {
            environment: environment.to_string(),
            ..Config::default()
        })?;

        let settings = ::config::Config::builder()
            .add_source(defaults)
            .add_source(::config::File::from(config_dir.join("default.toml")).required(false))
            .add_source(
                ::config::File::from(config_dir.join(format!("{}.toml", environment)))
                    .required(false),
            )
            .add_source(::config::Environment::with_prefix("MOBILE_E2E").try_parsing(true))
            .set_override_option("platform", env::var("PLATFORM").ok())?
            .set_override_option("appium_url", env::var("APPIUM_URL").ok())?
            .set_override_option("base_api_url", env::var("BASE_API_URL").ok())?
            .set_override_option("log_level", env::var("LOG_LEVEL").ok())?
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();

        if let Ok(environment) = env::var("TEST_ENV") {
            config.environment = environment;
        }

        if let Ok(platform) = env::var("PLATFORM") {
            config.platform = platform;
        }

        if let Ok(appium_url) = env::var("APPIUM_URL") {
            config.appium_url = appium_url;
        }

        if let Ok(base_api_url) = env::var("BASE_API_URL") {
            config.base_api_url = base_api_url;
        }

        if let Ok(timeout) = env::var("IMPLICIT_TIMEOUT") {
            config.implicit_timeout_ms = timeout
                .parse()
                .map_err(|_| Error::configuration("Invalid IMPLICIT_TIMEOUT"))?;
        }

        if let Ok(timeout) = env::var("EXPLICIT_TIMEOUT") {
            config.explicit_timeout_ms = timeout
                .parse()
                .map_err(|_| Error::configuration("Invalid EXPLICIT_TIMEOUT"))?;
        }

        if let Ok(attempts) = env::var("RETRY_ATTEMPTS") {
            config.retry_attempts = attempts
                .parse()
                .map_err(|_| Error::configuration("Invalid RETRY_ATTEMPTS"))?;
        }

        if let Ok(log_level) = env::var("LOG_LEVEL") {
            config.log_level = log_level;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::configuration(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::configuration(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Ordered directories searched for page definition files
    pub fn page_search_paths(&self) -> Vec<PathBuf> {
        match &self.page_search_paths {
            Some(paths) if !paths.is_empty() => paths.iter().map(PathBuf::from).collect(),
            _ => ["../../..", "../..", ".."]
                .iter()
                .map(|prefix| Path::new(prefix).join(&self.pages_root))
                .collect(),
        }
    }

    /// Whether the target platform is iOS
    pub fn is_ios(&self) -> bool {
        self.platform.eq_ignore_ascii_case("ios")
    }

    fn validate(&self) -> Result<()> {
        if !self.platform.eq_ignore_ascii_case("android") && !self.is_ios() {
            return Err(Error::configuration(format!(
                "Unsupported platform: {}",
                self.platform
            )));
        }
        if self.appium_url.is_empty() {
            return Err(Error::configuration("appium_url must not be empty"));
        }
        Ok(())
    }
}
