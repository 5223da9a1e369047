//! Authenticated API client
//!
//! Adds the user agent and bearer authorization to every request and hands
//! the raw response to the decoder.

use super::transport::{ApiRequest, Transport};
use crate::config::{AuthToken, Config};
use crate::decode::{self, Thing};
use crate::error::{Error, Result};
use crate::pagination::{Lister, ListingCursor};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

/// Performs authenticated GET requests against the API
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    user_agent: String,
    token: AuthToken,
}

impl ApiClient {
    /// Create a client from an explicit user agent and token
    pub fn new(
        transport: Arc<dyn Transport>,
        user_agent: impl Into<String>,
        token: AuthToken,
    ) -> Self {
        Self {
            transport,
            user_agent: user_agent.into(),
            token,
        }
    }

    /// Create a client using the user agent and token stored in a config
    pub fn from_config(transport: Arc<dyn Transport>, config: &Config) -> Self {
        Self::new(
            transport,
            config.credentials.user_agent.clone(),
            config.auth_token.clone(),
        )
    }

    /// The token used for requests
    pub fn token(&self) -> &AuthToken {
        &self.token
    }

    /// Perform an authenticated GET and return the raw body
    pub async fn get(&self, url: &str) -> Result<Bytes> {
        let request = ApiRequest::get(url)
            .header("User-Agent", self.user_agent.as_str())
            .header("Authorization", self.token.authorization());

        debug!("GET {url}");
        self.transport.perform(request).await
    }

    /// Perform an authenticated GET and parse the JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let data = self.get(url).await?;
        serde_json::from_slice(&data)
            .map_err(|e| Error::decode(e.to_string()).in_response_from(url))
    }

    /// Perform an authenticated GET and decode the body as a [`Thing`]
    pub async fn get_thing(&self, url: &str) -> Result<Thing> {
        let data = self.get(url).await?;
        decode::decode(&data).map_err(|e| e.in_response_from(url))
    }

    /// Stream the things of a paginated listing.
    ///
    /// The lister's `after` and `count` are updated as pages are fetched.
    pub fn stream<'a, L: Lister + ?Sized>(&'a self, lister: &'a mut L) -> ListingCursor<'a, L> {
        ListingCursor::new(self, lister)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("user_agent", &self.user_agent)
            .field("token_type", &self.token.token_type)
            .finish_non_exhaustive()
    }
}
