//! End-to-end scenario tests
//!
//! Drive a full API-versus-UI check: call the API, save the response, resolve
//! page objects from files and compare against the mock Appium screen.

mod common;

use common::{temp_dir, test_config, write_sauce_pages};
use mobile_e2e::api::HttpMethod;
use mobile_e2e::compare::ComparisonOptions;
use mobile_e2e::driver::{AppiumDriver, ElementLocator};
use mobile_e2e::pages::{FilePageRegistry, PageObjectResolver};
use mobile_e2e::scenario::{options_with, ScenarioContext};
use mobile_e2e::store::ResponseStore;
use mobile_e2e::Error;
use mock_appium::{MockAppiumServer, MockUiElement};
use serde_json::json;
use std::sync::Arc;

fn profile_screen() -> Vec<MockUiElement> {
    vec![
        MockUiElement::new("accessibility id", "test-Username", "  janet "),
        MockUiElement::new("accessibility id", "test-Password", "Weaver")
            .with_attribute("content-desc", "2"),
        MockUiElement::new("accessibility id", "test-LOGIN", "LOGIN"),
        MockUiElement::new(
            "xpath",
            "//android.widget.TextView[@text='PRODUCTS']",
            "PRODUCTS",
        ),
    ]
}

async fn scenario(server: &MockAppiumServer) -> (ScenarioContext, std::path::PathBuf) {
    let pages = temp_dir("mobile-e2e-pages");
    let store = temp_dir("mobile-e2e-responses");
    write_sauce_pages(&pages);

    let config = test_config(server.url(), &pages, &store);
    let driver = Arc::new(AppiumDriver::from_config(&config).await.unwrap());
    (ScenarioContext::new(config).unwrap().with_driver(driver), store)
}

#[tokio::test]
async fn test_api_response_matches_ui() {
    let server = MockAppiumServer::start(profile_screen()).await.unwrap();
    let (mut world, store_dir) = scenario(&server).await;

    let response = world.send_request(HttpMethod::Get, "users/2", None).await.unwrap();
    assert_eq!(response.status, 200);
    world.save_last_response("userProfile").await.unwrap();

    // persisted under the sanitized key
    assert!(store_dir.join("userprofile.json").exists());

    world
        .verify_element_matches_response(
            "~test-Username",
            "userProfile.data.data.first_name",
            &ComparisonOptions::ui_defaults(),
        )
        .await
        .unwrap();

    world
        .verify_page_element_matches_response(
            "SauceLoginPage",
            "passwordField",
            "userProfile.data.data.last_name",
            &ComparisonOptions::ui_defaults(),
        )
        .await
        .unwrap();

    world
        .verify_element_attribute_matches_response(
            "~test-Password",
            "content-desc",
            "userProfile.data.data.id",
            &ComparisonOptions::ui_defaults(),
        )
        .await
        .unwrap();

    world
        .verify_page_element_attribute_matches_response(
            "SauceLoginPage",
            "passwordField",
            "content-desc",
            "userProfile.data.data.id",
            &ComparisonOptions::ui_defaults(),
        )
        .await
        .unwrap();

    world
        .verify_page_elements_match_response(
            "SauceLoginPage",
            "userProfile",
            &[
                ("data.data.first_name", "usernameField"),
                ("data.data.last_name", "passwordField"),
            ],
        )
        .await
        .unwrap();

    world.teardown().await.unwrap();
    assert!(!server.session_open());
}

#[tokio::test]
async fn test_saved_property_and_partial_match() {
    let server = MockAppiumServer::start(profile_screen()).await.unwrap();
    let (mut world, _) = scenario(&server).await;

    world.send_request(HttpMethod::Get, "users/2", None).await.unwrap();
    world
        .save_response_property("data.data.last_name", "lastName")
        .await
        .unwrap();
    assert_eq!(world.resolve_expected("lastName").await.unwrap(), json!("Weaver"));

    world.set_test_data("user", json!({ "first_name": "jan" }));
    world
        .store()
        .save("partial", world.test_data("user").cloned().unwrap(), false)
        .await;

    let options = options_with("partialMatch", "true").unwrap();
    world
        .verify_element_matches_response("~test-Username", "partial.first_name", &options)
        .await
        .unwrap();

    let err = world
        .verify_element_matches_response(
            "~test-Username",
            "partial.first_name",
            &ComparisonOptions::ui_defaults(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::AssertionFailed(_)));
}

#[tokio::test]
async fn test_response_survives_new_store() {
    let server = MockAppiumServer::start(profile_screen()).await.unwrap();
    let (mut world, store_dir) = scenario(&server).await;

    world.send_request(HttpMethod::Get, "users/2", None).await.unwrap();
    world.save_last_response("user-profile").await.unwrap();

    let fresh = ResponseStore::new(&store_dir);
    let saved = fresh.get("user-profile").await.unwrap();
    assert_eq!(saved["data"]["data"]["email"], "janet.weaver@reqres.in");
}

#[tokio::test]
async fn test_page_objects_from_files() {
    let server = MockAppiumServer::start(profile_screen()).await.unwrap();
    let pages = temp_dir("mobile-e2e-pages");
    write_sauce_pages(&pages);

    let driver = Arc::new(
        AppiumDriver::connect(server.url(), json!({ "platformName": "Android" }))
            .await
            .unwrap(),
    );
    let resolver = Arc::new(PageObjectResolver::new(Arc::new(FilePageRegistry::new(vec![
        temp_dir("mobile-e2e-empty"),
        pages,
    ]))));
    let locator = ElementLocator::new(resolver.clone(), driver, 500);

    assert_eq!(
        locator.text_of("SauceProductsPage", "title").await.unwrap(),
        "PRODUCTS"
    );
    assert!(locator.exists("SauceLoginPage", "loginButton").await.unwrap());
    assert!(!locator.exists("SauceLoginPage", "errorMessage").await.unwrap());
    assert!(!locator.exists("SauceProductsPage", "cartBadge").await.unwrap());

    let err = locator.locate("SauceProductsPage", "itemCount").await.unwrap_err();
    assert!(matches!(err, Error::InvalidSelector(_)));

    let err = locator.locate("SauceMenuPage", "logout").await.unwrap_err();
    assert!(matches!(err, Error::PageNotFound { .. }));

    assert_eq!(resolver.cached_count().await, 2);
}
