//! # appium-check
//!
//! Connectivity check for the configured Appium server.
//!
//! Queries `/status` and, when `APPIUM_CHECK_SESSION` is set, opens a session
//! with the configured capabilities and closes it again.
//!
//! ## Environment variables
//! - `TEST_ENV`: selects `config/<env>.toml` (default: dev)
//! - `APPIUM_URL`: Appium server URL (default: http://localhost:4723)
//! - `PLATFORM`: android or ios
//! - `APPIUM_CHECK_SESSION`: also create and delete a session

use anyhow::Context;
use mobile_e2e::{
    config::Config,
    driver::{capabilities_from_config, AppiumDriver, AutomationDriver},
    logging,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            let config = Config::from_env().context("loading configuration")?;
            logging::init(&config.log_level);
            warn!("Layered configuration unavailable ({}), using environment only", e);
            config
        }
    };
    logging::init(&config.log_level);

    info!("appium-check v{}", mobile_e2e::VERSION);
    info!("Using Appium URL: {} (platform {})", config.appium_url, config.platform);

    let status = AppiumDriver::status(&config.appium_url)
        .await
        .with_context(|| format!("Appium server at {} is not reachable", config.appium_url))?;
    info!(
        "Appium server ready: {}",
        status.get("ready").and_then(|r| r.as_bool()).unwrap_or(false)
    );

    if std::env::var("APPIUM_CHECK_SESSION").is_ok() {
        let capabilities = capabilities_from_config(&config);
        info!("Initializing driver with capabilities: {}", capabilities);

        let driver = AppiumDriver::connect(&config.appium_url, capabilities)
            .await
            .context("creating Appium session")?;
        info!("Driver initialized successfully (session {})", driver.session_id());

        driver.quit().await.context("deleting Appium session")?;
        info!("Session closed");
    }

    info!("Appium check completed successfully");
    Ok(())
}
