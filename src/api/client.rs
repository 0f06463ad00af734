//! HTTP client for the API under test

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use super::types::{ApiResponse, HttpMethod};
use crate::config::Config;
use crate::{Error, Result};

/// Headers whose values are masked in logs
const SENSITIVE_HEADERS: [&str; 4] = ["authorization", "x-api-key", "cookie", "set-cookie"];

/// API client
///
/// Every request carries JSON content-type and accept headers plus a fresh
/// `X-Request-ID`. Status codes are never turned into errors.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    default_headers: HashMap<String, String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            default_headers: HashMap::new(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.base_api_url.clone(),
            Duration::from_millis(config.api_timeout_ms),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_base_url(&mut self, url: impl Into<String>) {
        self.base_url = url.into().trim_end_matches('/').to_string();
        info!("Set base URL to: {}", self.base_url);
    }

    /// Header sent with every subsequent request
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.default_headers.insert(name.into(), value.into());
    }

    pub fn set_auth_token(&mut self, token: &str, scheme: &str) {
        self.set_header(AUTHORIZATION.as_str(), format!("{} {}", scheme, token));
    }

    /// `Authorization: Basic` header from the credentials
    pub fn set_basic_auth(&mut self, username: &str, password: &str) {
        info!("Setting basic authentication with username: {}", username);
        let credentials = BASE64.encode(format!("{}:{}", username, password));
        self.set_header(AUTHORIZATION.as_str(), format!("Basic {}", credentials));
    }

    /// Absolute URL for `path`; absolute paths pass through unchanged
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}/{}", self.base_url, path.trim_start_matches('/'))
        }
    }

    #[instrument(skip(self, body, headers))]
    pub async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<ApiResponse> {
        let url = self.url(path);
        let request_id = Uuid::new_v4().to_string();

        let mut header_map = HeaderMap::new();
        header_map.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        header_map.insert(ACCEPT, HeaderValue::from_static("application/json"));
        for (name, value) in self.default_headers.iter().chain(headers.into_iter().flatten()) {
            header_map.insert(header_name(name)?, header_value(value)?);
        }
        header_map.insert(HeaderName::from_static("x-request-id"), header_value(&request_id)?);

        info!(
            "API Request: {} {} headers={:?}",
            method,
            url,
            sanitize_headers(&header_map)
        );

        let mut builder = self.http.request(method.into(), &url).headers(header_map);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let started = Instant::now();
        let response = builder.send().await.map_err(|e| {
            error!("API Error without response: {} {}: {}", method, url, e);
            Error::from(e)
        })?;

        let status = response.status().as_u16();
        let response_headers = collect_headers(response.headers());
        let text = response.text().await?;
        let request_time_ms = started.elapsed().as_millis() as u64;

        let data = parse_body(&text);
        if (200..300).contains(&status) {
            debug!("API Response: {} {} ({}ms)", status, url, request_time_ms);
        } else {
            error!("API Error: {} {} ({}ms): {}", status, url, request_time_ms, data);
        }

        Ok(ApiResponse {
            status,
            data,
            headers: response_headers,
            request_time_ms,
            request_url: path.to_string(),
            request_method: method,
        })
    }

    /// GET with query parameters appended to the path
    pub async fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<ApiResponse> {
        let path = if params.is_empty() {
            path.to_string()
        } else {
            let query = params
                .iter()
                .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
                .collect::<Vec<_>>()
                .join("&");
            let separator = if path.contains('?') { '&' } else { '?' };
            format!("{}{}{}", path, separator, query)
        };
        self.request(HttpMethod::Get, &path, None, None).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> Result<ApiResponse> {
        self.request(HttpMethod::Post, path, Some(body), None).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> Result<ApiResponse> {
        self.request(HttpMethod::Put, path, Some(body), None).await
    }

    pub async fn patch(&self, path: &str, body: &Value) -> Result<ApiResponse> {
        self.request(HttpMethod::Patch, path, Some(body), None).await
    }

    pub async fn delete(&self, path: &str) -> Result<ApiResponse> {
        self.request(HttpMethod::Delete, path, None, None).await
    }
}

fn header_name(name: &str) -> Result<HeaderName> {
    HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| Error::internal(format!("Invalid header name {}: {}", name, e)))
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| Error::internal(format!("Invalid header value: {}", e)))
}

/// JSON body, or the text itself when it is not JSON
pub(crate) fn parse_body(text: &str) -> Value {
    if text.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Response headers by name; repeated headers are joined with `", "`
pub(crate) fn collect_headers(headers: &HeaderMap) -> HashMap<String, String> {
    headers.keys().fold(HashMap::new(), |mut collected, name| {
        let joined = headers
            .get_all(name)
            .iter()
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
            .collect::<Vec<_>>()
            .join(", ");
        collected.insert(name.as_str().to_string(), joined);
        collected
    })
}

/// Header map for logging with sensitive values masked
pub(crate) fn sanitize_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    let mut sanitized: Vec<(String, String)> = headers
        .iter()
        .map(|(name, value)| {
            let value = if SENSITIVE_HEADERS.contains(&name.as_str()) {
                "******".to_string()
            } else {
                String::from_utf8_lossy(value.as_bytes()).into_owned()
            };
            (name.as_str().to_string(), value)
        })
        .collect();
    sanitized.sort();
    sanitized
}
