//! Error types for reddit-stream
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for reddit-stream
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    #[error("OAuth2 error: {message}")]
    OAuth2 { message: String },

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("HTTP {status} for {url}: {body}")]
    HttpStatus {
        status: u16,
        url: String,
        body: String,
    },

    // ============================================================================
    // URL Errors
    // ============================================================================
    #[error("Failed to build URL: {message}")]
    UrlBuild { message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Decode Errors
    // ============================================================================
    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("Unsupported kind: {kind}{}", from_url(.url.as_deref()))]
    UnknownKind { kind: String, url: Option<String> },

    #[error("Expected a {expected} thing, got {found}{}", from_url(.url.as_deref()))]
    UnexpectedKind {
        expected: String,
        found: String,
        url: Option<String>,
    },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

/// Broad classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Malformed or unrecognized JSON
    Decode,
    /// Network failure or non-success HTTP status
    Transport,
    /// A query could not produce a valid URL
    UrlBuild,
    /// Token acquisition failed
    Auth,
    /// Credential file contents are unusable
    Config,
    /// Filesystem failure
    Io,
    /// Anything else
    Other,
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Create an OAuth2 error
    pub fn oauth2(message: impl Into<String>) -> Self {
        Self::OAuth2 {
            message: message.into(),
        }
    }

    /// Create a transport error for a request URL
    pub fn transport(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, url: impl Into<String>, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            url: url.into(),
            body: body.into(),
        }
    }

    /// Create a URL build error
    pub fn url_build(message: impl Into<String>) -> Self {
        Self::UrlBuild {
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create an unknown kind error
    pub fn unknown_kind(kind: impl Into<String>) -> Self {
        Self::UnknownKind {
            kind: kind.into(),
            url: None,
        }
    }

    /// Create an error for a thing of the wrong kind
    pub fn unexpected_kind(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::UnexpectedKind {
            expected: expected.into(),
            found: found.into(),
            url: None,
        }
    }

    /// Attach the URL whose response could not be decoded.
    /// Errors that are not about the response body are returned unchanged.
    #[must_use]
    pub fn in_response_from(self, url: &str) -> Self {
        match self {
            Self::Decode { message } => Self::Decode {
                message: format!("failed to parse response from {url}: {message}"),
            },
            Self::UnknownKind { kind, .. } => Self::UnknownKind {
                kind,
                url: Some(url.to_string()),
            },
            Self::UnexpectedKind {
                expected, found, ..
            } => Self::UnexpectedKind {
                expected,
                found,
                url: Some(url.to_string()),
            },
            other => other,
        }
    }

    /// Classify this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Decode { .. }
            | Error::UnknownKind { .. }
            | Error::UnexpectedKind { .. }
            | Error::JsonParse(_) => ErrorCategory::Decode,
            Error::Transport { .. } | Error::HttpStatus { .. } => ErrorCategory::Transport,
            Error::UrlBuild { .. } | Error::InvalidUrl(_) => ErrorCategory::UrlBuild,
            Error::Auth { .. } | Error::OAuth2 { .. } => ErrorCategory::Auth,
            Error::Config { .. }
            | Error::MissingConfigField { .. }
            | Error::InvalidConfigValue { .. } => ErrorCategory::Config,
            Error::Io(_) | Error::FileNotFound { .. } => ErrorCategory::Io,
            Error::Other(_) => ErrorCategory::Other,
        }
    }
}

fn from_url(url: Option<&str>) -> String {
    url.map(|url| format!(" in response from {url}"))
        .unwrap_or_default()
}

/// Result type alias for reddit-stream
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::missing_field("username");
        assert_eq!(err.to_string(), "Missing required config field: username");

        let err = Error::http_status(404, "https://oauth.reddit.com/r/x", "Not found");
        assert_eq!(
            err.to_string(),
            "HTTP 404 for https://oauth.reddit.com/r/x: Not found"
        );

        let err = Error::unknown_kind("t9");
        assert_eq!(err.to_string(), "Unsupported kind: t9");
    }

    #[test]
    fn test_category() {
        assert_eq!(Error::decode("x").category(), ErrorCategory::Decode);
        assert_eq!(Error::unknown_kind("t9").category(), ErrorCategory::Decode);
        assert_eq!(
            Error::transport("http://x", "refused").category(),
            ErrorCategory::Transport
        );
        assert_eq!(
            Error::http_status(500, "http://x", "").category(),
            ErrorCategory::Transport
        );
        assert_eq!(Error::url_build("x").category(), ErrorCategory::UrlBuild);
        assert_eq!(Error::oauth2("x").category(), ErrorCategory::Auth);
        assert_eq!(Error::missing_field("x").category(), ErrorCategory::Config);
    }

    #[test]
    fn test_in_response_from() {
        let err = Error::decode("bad json").in_response_from("https://example.com/a");
        assert_eq!(
            err.to_string(),
            "Failed to decode response: failed to parse response from https://example.com/a: bad json"
        );

        let err = Error::unknown_kind("t9").in_response_from("https://example.com/a");
        assert!(matches!(err, Error::UnknownKind { url: Some(ref u), .. } if u == "https://example.com/a"));
        assert_eq!(
            err.to_string(),
            "Unsupported kind: t9 in response from https://example.com/a"
        );

        let err = Error::unexpected_kind("Listing", "t3").in_response_from("https://example.com/b");
        assert_eq!(
            err.to_string(),
            "Expected a Listing thing, got t3 in response from https://example.com/b"
        );
        assert_eq!(err.category(), ErrorCategory::Decode);

        let err = Error::transport("https://example.com/c", "refused")
            .in_response_from("https://example.com/other");
        assert!(matches!(err, Error::Transport { ref url, .. } if url == "https://example.com/c"));
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}
