//! Common types used throughout reddit-stream
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

// ============================================================================
// Endpoints
// ============================================================================

/// URL used to obtain an authentication token
pub const REDDIT_AUTH_URL: &str = "https://www.reddit.com/api/v1/access_token";

/// Base URL used to make API calls
pub const REDDIT_API_URL: &str = "https://oauth.reddit.com";

/// Default file used to store API credentials
pub const DEFAULT_CONFIG_FILE: &str = "~/.reddit_creds";

// ============================================================================
// Top Duration
// ============================================================================

/// Sort window for a top-posts listing
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum TopDuration {
    Hour,
    #[default]
    Day,
    Week,
    Month,
    Year,
    All,
}

impl TopDuration {
    /// Query-string value for this duration
    pub fn as_str(self) -> &'static str {
        match self {
            TopDuration::Hour => "hour",
            TopDuration::Day => "day",
            TopDuration::Week => "week",
            TopDuration::Month => "month",
            TopDuration::Year => "year",
            TopDuration::All => "all",
        }
    }
}

impl fmt::Display for TopDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TopDuration {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "hour" => Ok(TopDuration::Hour),
            "day" => Ok(TopDuration::Day),
            "week" => Ok(TopDuration::Week),
            "month" => Ok(TopDuration::Month),
            "year" => Ok(TopDuration::Year),
            "all" => Ok(TopDuration::All),
            other => Err(crate::Error::InvalidConfigValue {
                field: "duration".to_string(),
                message: format!("unknown top duration '{other}'"),
            }),
        }
    }
}

// ============================================================================
// Log Level
// ============================================================================

/// Log level for the command-line binary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_duration_round_trip() {
        for duration in [
            TopDuration::Hour,
            TopDuration::Day,
            TopDuration::Week,
            TopDuration::Month,
            TopDuration::Year,
            TopDuration::All,
        ] {
            assert_eq!(duration.as_str().parse::<TopDuration>().unwrap(), duration);
        }
    }

    #[test]
    fn test_top_duration_unknown() {
        let err = "decade".parse::<TopDuration>().unwrap_err();
        assert!(err.to_string().contains("decade"));
    }

    #[test]
    fn test_top_duration_serde() {
        let json = serde_json::to_string(&TopDuration::Week).unwrap();
        assert_eq!(json, "\"week\"");
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(tracing::Level::from(LogLevel::Debug), tracing::Level::DEBUG);
        assert_eq!(tracing::Level::from(LogLevel::Error), tracing::Level::ERROR);
    }
}
