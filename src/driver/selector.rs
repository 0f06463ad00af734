//! Selector parsing
//!
//! Maps the selector string conventions used in page definitions onto W3C
//! WebDriver / Appium locator strategies.

use std::fmt;

use crate::{Error, Result};

/// WebDriver locator strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocatorStrategy {
    AccessibilityId,
    XPath,
    Id,
    ClassName,
    AndroidUiAutomator,
    IosPredicateString,
    IosClassChain,
    Css,
}

impl LocatorStrategy {
    /// Strategy name sent in the `using` field
    pub fn as_w3c(&self) -> &'static str {
        match self {
            LocatorStrategy::AccessibilityId => "accessibility id",
            LocatorStrategy::XPath => "xpath",
            LocatorStrategy::Id => "id",
            LocatorStrategy::ClassName => "class name",
            LocatorStrategy::AndroidUiAutomator => "-android uiautomator",
            LocatorStrategy::IosPredicateString => "-ios predicate string",
            LocatorStrategy::IosClassChain => "-ios class chain",
            LocatorStrategy::Css => "css selector",
        }
    }
}

/// Prefixes that name a strategy explicitly
const PREFIXES: &[(&str, LocatorStrategy)] = &[
    ("~", LocatorStrategy::AccessibilityId),
    ("id=", LocatorStrategy::Id),
    ("android=", LocatorStrategy::AndroidUiAutomator),
    ("-android uiautomator:", LocatorStrategy::AndroidUiAutomator),
    ("-ios predicate string:", LocatorStrategy::IosPredicateString),
    ("-ios class chain:", LocatorStrategy::IosClassChain),
];

/// A parsed selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub strategy: LocatorStrategy,
    pub value: String,
}

impl Selector {
    /// Parse a selector string.
    ///
    /// `~name` is an accessibility id, `//node` or `(//node)[1]` is XPath,
    /// `pkg:id/name` is a resource id, `android.widget.*` and
    /// `XCUIElementType*` are class names; anything else is CSS.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Error::invalid_selector("empty selector"));
        }

        for (prefix, strategy) in PREFIXES {
            if let Some(value) = trimmed.strip_prefix(prefix) {
                let value = value.trim();
                if value.is_empty() {
                    return Err(Error::invalid_selector(format!("missing value in \"{}\"", raw)));
                }
                return Ok(Self::new(*strategy, value));
            }
        }

        let strategy = if trimmed.starts_with('/') || trimmed.starts_with("(/") {
            LocatorStrategy::XPath
        } else if trimmed.contains(":id/") {
            LocatorStrategy::Id
        } else if trimmed.starts_with("android.") || trimmed.starts_with("XCUIElementType") {
            LocatorStrategy::ClassName
        } else {
            LocatorStrategy::Css
        };

        Ok(Self::new(strategy, trimmed))
    }

    pub fn new(strategy: LocatorStrategy, value: impl Into<String>) -> Self {
        Self {
            strategy,
            value: value.into(),
        }
    }

    /// Request body for the find element commands
    pub fn to_w3c(&self) -> serde_json::Value {
        serde_json::json!({
            "using": self.strategy.as_w3c(),
            "value": self.value,
        })
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.strategy.as_w3c(), self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strategies() {
        let cases = [
            ("~test-LOGIN", LocatorStrategy::AccessibilityId, "test-LOGIN"),
            ("//android.widget.TextView[@text='Products']", LocatorStrategy::XPath, "//android.widget.TextView[@text='Products']"),
            ("(//XCUIElementTypeButton)[2]", LocatorStrategy::XPath, "(//XCUIElementTypeButton)[2]"),
            ("id=username", LocatorStrategy::Id, "username"),
            ("com.swaglabsmobileapp:id/title", LocatorStrategy::Id, "com.swaglabsmobileapp:id/title"),
            ("android=new UiSelector().text(\"Login\")", LocatorStrategy::AndroidUiAutomator, "new UiSelector().text(\"Login\")"),
            ("-ios predicate string:name == 'Login'", LocatorStrategy::IosPredicateString, "name == 'Login'"),
            ("-ios class chain:**/XCUIElementTypeCell[1]", LocatorStrategy::IosClassChain, "**/XCUIElementTypeCell[1]"),
            ("android.widget.EditText", LocatorStrategy::ClassName, "android.widget.EditText"),
            ("XCUIElementTypeTextField", LocatorStrategy::ClassName, "XCUIElementTypeTextField"),
            ("button.primary", LocatorStrategy::Css, "button.primary"),
        ];

        for (raw, strategy, value) in cases {
            let selector = Selector::parse(raw).unwrap();
            assert_eq!(selector.strategy, strategy, "strategy for {}", raw);
            assert_eq!(selector.value, value, "value for {}", raw);
        }
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(matches!(Selector::parse("  "), Err(Error::InvalidSelector(_))));
        assert!(matches!(Selector::parse("~"), Err(Error::InvalidSelector(_))));
    }

    #[test]
    fn test_w3c_body() {
        let body = Selector::parse("~test-Username").unwrap().to_w3c();
        assert_eq!(body["using"], "accessibility id");
        assert_eq!(body["value"], "test-Username");
    }
}
