//! Token endpoint types

use crate::config::AuthToken;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Response of the access token endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    /// Lifetime in seconds
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub scope: Option<String>,
}

impl TokenResponse {
    /// Parts of the response that are absent or empty
    pub fn missing_parts(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.access_token.as_deref().map_or(true, str::is_empty) {
            missing.push("token");
        }
        if self.expires_in.map_or(true, |secs| secs == 0) {
            missing.push("expiration");
        }
        if self.token_type.as_deref().map_or(true, str::is_empty) {
            missing.push("token type");
        }
        missing
    }

    /// Convert into a stored token, counting the lifetime from `issued_at`
    pub fn into_auth_token(self, issued_at: DateTime<Utc>) -> Result<AuthToken> {
        let missing = self.missing_parts();
        if !missing.is_empty() {
            let details: String = missing
                .iter()
                .map(|part| format!("No {part} present. "))
                .collect();
            return Err(Error::oauth2(format!(
                "incomplete token response: {}",
                details.trim_end()
            )));
        }

        Ok(AuthToken::new(
            self.access_token.unwrap_or_default(),
            self.token_type.unwrap_or_default(),
            issued_at.timestamp() + self.expires_in.unwrap_or_default(),
        ))
    }
}
