use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, SET_COOKIE};
use serde_json::json;
use std::collections::HashMap;
use std::time::Duration;

use super::client::{collect_headers, parse_body, sanitize_headers};
use super::*;
use crate::config::Config;

#[test]
fn test_url_joining() {
    let client = ApiClient::new("https://reqres.in/api/", Duration::from_secs(5)).unwrap();

    assert_eq!(client.base_url(), "https://reqres.in/api");
    assert_eq!(client.url("users/2"), "https://reqres.in/api/users/2");
    assert_eq!(client.url("/users/2"), "https://reqres.in/api/users/2");
    assert_eq!(client.url(""), "https://reqres.in/api");
    assert_eq!(client.url("http://other.test/x"), "http://other.test/x");
}

#[test]
fn test_from_config_uses_base_url() {
    let config = Config {
        base_api_url: "http://localhost:3000".to_string(),
        ..Config::default()
    };
    let mut client = ApiClient::from_config(&config).unwrap();
    assert_eq!(client.url("health"), "http://localhost:3000/health");

    client.set_base_url("http://localhost:4000/");
    assert_eq!(client.url("health"), "http://localhost:4000/health");
}

#[test]
fn test_parse_body() {
    assert_eq!(parse_body(r#"{"id": 2}"#), json!({"id": 2}));
    assert_eq!(parse_body("[1,2]"), json!([1, 2]));
    assert_eq!(parse_body("Not Found"), json!("Not Found"));
    assert_eq!(parse_body(""), serde_json::Value::Null);
}

#[test]
fn test_sensitive_headers_are_masked() {
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer secret"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let sanitized = sanitize_headers(&headers);
    assert!(sanitized.contains(&("authorization".to_string(), "******".to_string())));
    assert!(sanitized.contains(&("content-type".to_string(), "application/json".to_string())));
}

#[test]
fn test_repeated_headers_are_joined() {
    let mut headers = HeaderMap::new();
    headers.append(SET_COOKIE, HeaderValue::from_static("session=abc; Path=/"));
    headers.append(SET_COOKIE, HeaderValue::from_static("theme=dark"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let collected = collect_headers(&headers);
    assert_eq!(collected.len(), 2);
    assert_eq!(collected["set-cookie"], "session=abc; Path=/, theme=dark");
    assert_eq!(collected["content-type"], "application/json");
}

#[test]
fn test_http_method_parsing() {
    assert_eq!("get".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
    assert_eq!("PATCH".parse::<HttpMethod>().unwrap(), HttpMethod::Patch);
    assert!("TRACE".parse::<HttpMethod>().is_err());
    assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
}

#[test]
fn test_api_response_serialization() {
    let mut headers = HashMap::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    let response = ApiResponse {
        status: 404,
        data: json!({"error": "missing"}),
        headers,
        request_time_ms: 12,
        request_url: "users/23".to_string(),
        request_method: HttpMethod::Get,
    };

    assert!(!response.is_success());
    assert_eq!(response.header("content-type"), Some("application/json"));

    let value = response.to_value();
    assert_eq!(value["status"], 404);
    assert_eq!(value["data"]["error"], "missing");
    assert_eq!(value["requestTime"], 12);
    assert_eq!(value["requestUrl"], "users/23");
    assert_eq!(value["requestMethod"], "GET");
}
