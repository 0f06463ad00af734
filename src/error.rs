//! Unified error types for mobile-e2e

use thiserror::Error;

/// Unified Result type
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for mobile-e2e
#[derive(Error, Debug)]
pub enum Error {
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP transport errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// No registry candidate yielded the requested page class
    #[error("Page class not found: {page}")]
    PageNotFound { page: String },

    /// None of the resolution strategies located the element
    #[error("Element \"{element}\" not found in page object \"{page}\" ({identifier})")]
    ElementNotFound {
        element: String,
        page: String,
        identifier: String,
    },

    /// A resolved value cannot be used as a selector
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    /// Automation driver (Appium) reported an error
    #[error("Driver error ({status}): {message}")]
    Driver { status: String, message: String },

    /// Timeout
    #[error("Operation timeout: {0}")]
    Timeout(String),

    /// No stored response for the key
    #[error("No API response found with key \"{0}\"")]
    ResponseNotFound(String),

    /// Property path missing from a response
    #[error("Property \"{path}\" not found in API response \"{key}\"")]
    PropertyNotFound { path: String, key: String },

    /// Unknown comparison option name
    #[error("Unsupported comparison option: {0}")]
    UnsupportedOption(String),

    /// A scenario assertion did not hold
    #[error("Assertion failed: {0}")]
    AssertionFailed(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new page not found error
    pub fn page_not_found<S: Into<String>>(page: S) -> Self {
        Error::PageNotFound { page: page.into() }
    }

    /// Create a new element not found error
    pub fn element_not_found<E, P, I>(element: E, page: P, identifier: I) -> Self
    where
        E: Into<String>,
        P: Into<String>,
        I: Into<String>,
    {
        Error::ElementNotFound {
            element: element.into(),
            page: page.into(),
            identifier: identifier.into(),
        }
    }

    /// Create a new invalid selector error
    pub fn invalid_selector<S: Into<String>>(msg: S) -> Self {
        Error::InvalidSelector(msg.into())
    }

    /// Create a new driver error
    pub fn driver<S: Into<String>, M: Into<String>>(status: S, message: M) -> Self {
        Error::Driver {
            status: status.into(),
            message: message.into(),
        }
    }

    /// Create a new timeout error
    pub fn timeout<S: Into<String>>(msg: S) -> Self {
        Error::Timeout(msg.into())
    }

    /// Create a new response not found error
    pub fn response_not_found<S: Into<String>>(key: S) -> Self {
        Error::ResponseNotFound(key.into())
    }

    /// Create a new property not found error
    pub fn property_not_found<P: Into<String>, K: Into<String>>(path: P, key: K) -> Self {
        Error::PropertyNotFound {
            path: path.into(),
            key: key.into(),
        }
    }

    /// Create a new unsupported option error
    pub fn unsupported_option<S: Into<String>>(name: S) -> Self {
        Error::UnsupportedOption(name.into())
    }

    /// Create a new assertion failed error
    pub fn assertion_failed<S: Into<String>>(msg: S) -> Self {
        Error::AssertionFailed(msg.into())
    }

    /// Create a new configuration error
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Error::Configuration(msg.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Error::Internal(msg.into())
    }

    /// Whether this is a lookup failure (page or element missing)
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::PageNotFound { .. } | Error::ElementNotFound { .. } | Error::ResponseNotFound(_)
        )
    }
}

impl From<::config::ConfigError> for Error {
    fn from(err: ::config::ConfigError) -> Self {
        Error::Configuration(err.to_string())
    }
}
