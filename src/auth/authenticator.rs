//! Script app authenticator
//!
//! Exchanges the account credentials for a bearer token using the OAuth2
//! password grant, as described in
//! <https://github.com/reddit/reddit/wiki/OAuth2-Quick-Start-Example>.

use super::types::TokenResponse;
use crate::config::{AuthToken, Config, Credentials};
use crate::error::{Error, Result};
use crate::http::{ApiRequest, Transport};
use crate::types::REDDIT_AUTH_URL;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info};

/// Obtains tokens for a script app
pub struct ScriptAuthenticator {
    transport: Arc<dyn Transport>,
    token_url: String,
}

impl ScriptAuthenticator {
    /// Create an authenticator using the default token endpoint
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            token_url: REDDIT_AUTH_URL.to_string(),
        }
    }

    /// Use a different token endpoint
    #[must_use]
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    /// Make sure `config` holds a usable token, requesting a new one if the
    /// stored token is empty or expired.
    pub async fn authenticate(&self, config: &mut Config) -> Result<()> {
        self.authenticate_at(config, Utc::now()).await
    }

    /// [`authenticate`](Self::authenticate) with an explicit clock reading
    pub async fn authenticate_at(&self, config: &mut Config, now: DateTime<Utc>) -> Result<()> {
        if config.auth_token.is_valid_at(now) {
            debug!("Reusing token expiring at {}", config.auth_token.expires);
            return Ok(());
        }

        info!("Requesting a new token for {}", config.credentials.username);
        config.auth_token = self.request_token_at(&config.credentials, now).await?;
        Ok(())
    }

    /// Request a fresh token regardless of what is stored
    pub async fn request_token(&self, credentials: &Credentials) -> Result<AuthToken> {
        self.request_token_at(credentials, Utc::now()).await
    }

    async fn request_token_at(
        &self,
        credentials: &Credentials,
        issued_at: DateTime<Utc>,
    ) -> Result<AuthToken> {
        let request = ApiRequest::post(&self.token_url, password_grant(credentials))
            .header("Authorization", basic_auth(credentials))
            .header("User-Agent", credentials.user_agent.as_str())
            .header("Content-Type", "application/x-www-form-urlencoded");

        let data = self.transport.perform(request).await?;
        let response: TokenResponse = serde_json::from_slice(&data).map_err(|e| {
            Error::oauth2(format!(
                "invalid token response: {e}: {}",
                String::from_utf8_lossy(&data)
            ))
        })?;

        let token = response.into_auth_token(issued_at)?;
        debug!("Obtained {} token expiring at {}", token.token_type, token.expires);
        Ok(token)
    }
}

impl std::fmt::Debug for ScriptAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptAuthenticator")
            .field("token_url", &self.token_url)
            .finish_non_exhaustive()
    }
}

/// Form body of the password grant
fn password_grant(credentials: &Credentials) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .append_pair("grant_type", "password")
        .append_pair("username", &credentials.username)
        .append_pair("password", &credentials.password)
        .finish()
}

/// `Authorization` value identifying the app
fn basic_auth(credentials: &Credentials) -> String {
    let pair = format!("{}:{}", credentials.client_id, credentials.client_secret);
    format!("Basic {}", STANDARD.encode(pair))
}
