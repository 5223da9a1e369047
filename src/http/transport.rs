//! Transport seam
//!
//! Every request the crate makes goes through a [`Transport`]. The production
//! implementation wraps reqwest; tests substitute [`super::ScriptedTransport`].

use crate::error::{Error, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, Method};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// A single HTTP request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute URL
    pub url: String,
    /// Request headers, in insertion order
    pub headers: Vec<(String, String)>,
    /// Request body
    pub body: Option<String>,
}

impl ApiRequest {
    /// Create a request
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Create a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    /// Create a POST request with a body
    pub fn post(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
            ..Self::new(Method::POST, url)
        }
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Look up a header value (case-insensitive)
    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, value)| value.as_str())
    }
}

/// Performs requests and returns the raw response body
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform the request.
    ///
    /// Non-success statuses are reported as [`Error::HttpStatus`] and network
    /// failures as [`Error::Transport`], both carrying the request URL.
    async fn perform(&self, request: ApiRequest) -> Result<Bytes>;
}

// ============================================================================
// reqwest transport
// ============================================================================

/// Configuration for the reqwest transport
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent used when a request does not set one
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            default_headers: HashMap::new(),
            user_agent: format!("reddit-stream/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// [`Transport`] backed by a reqwest client
pub struct ReqwestTransport {
    client: Client,
    config: HttpClientConfig,
}

impl ReqwestTransport {
    /// Create a transport with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a transport with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn perform(&self, request: ApiRequest) -> Result<Bytes> {
        let ApiRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let mut req = self.client.request(method.clone(), &url);

        // Add default headers
        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        // Add request-specific headers
        for (key, value) in &headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if let Some(body) = body {
            req = req.body(body);
        }

        let response = req
            .send()
            .await
            .map_err(|e| Error::transport(&url, e.to_string()))?;
        let status = response.status();
        let data = response
            .bytes()
            .await
            .map_err(|e| Error::transport(&url, format!("failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(Error::http_status(
                status.as_u16(),
                url,
                String::from_utf8_lossy(&data),
            ));
        }

        debug!("Request succeeded: {} {} ({} bytes)", method, url, data.len());
        Ok(data)
    }
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
