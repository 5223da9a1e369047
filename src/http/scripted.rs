//! Deterministic in-memory transport
//!
//! [`ScriptedTransport`] answers requests from a queue of [`Exchange`]s and
//! checks each request against what the exchange expects. It never touches
//! the network, which makes it suitable for exercising the cursor and the
//! authenticator without a server.

use super::transport::{ApiRequest, Transport};
use crate::error::{Error, Result};
use crate::types::StringMap;
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

/// One expected request and its canned response
#[derive(Debug, Clone, Default)]
pub struct Exchange {
    /// URL the request must target
    pub url: String,
    /// Headers the request must carry
    pub headers: StringMap,
    /// Body the request must carry; unchecked when unset
    pub body: Option<String>,
    /// Status code to answer with
    pub status: u16,
    /// Response body
    pub response: String,
    /// When set, fail with a transport error instead of responding
    pub error: Option<String>,
}

impl Exchange {
    /// Expect a request to `url` and answer 200 with `response`
    pub fn ok(url: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status: 200,
            response: response.into(),
            ..Self::default()
        }
    }

    /// Expect a request to `url` and fail it at the network level
    pub fn fail(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// Require a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Require a body
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Answer with a different status
    #[must_use]
    pub fn status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }
}

/// [`Transport`] that replays a fixed script of exchanges
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    expected: Mutex<VecDeque<Exchange>>,
    received: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    /// Create a transport that expects the given exchanges in order
    pub fn new(exchanges: impl IntoIterator<Item = Exchange>) -> Self {
        Self {
            expected: Mutex::new(exchanges.into_iter().collect()),
            received: Mutex::new(Vec::new()),
        }
    }

    /// Number of requests performed so far
    pub fn calls(&self) -> usize {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Requests performed so far
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of exchanges not yet consumed
    pub fn remaining(&self) -> usize {
        self.expected
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn perform(&self, request: ApiRequest) -> Result<Bytes> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        let next = self
            .expected
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        let Some(exchange) = next else {
            return Err(Error::transport(
                &request.url,
                "unexpected request: all responses finished",
            ));
        };

        if request.url != exchange.url {
            return Err(Error::transport(
                &request.url,
                format!("expected URL {}", exchange.url),
            ));
        }
        if let Some(error) = exchange.error {
            return Err(Error::transport(&request.url, error));
        }
        for (key, value) in &exchange.headers {
            let actual = request.header_value(key).unwrap_or_default();
            if actual != value {
                return Err(Error::transport(
                    &request.url,
                    format!("expected value {value} for header {key}, got {actual}"),
                ));
            }
        }
        if let Some(expected) = &exchange.body {
            let body = request.body.as_deref().unwrap_or_default();
            if body != expected {
                return Err(Error::transport(
                    &request.url,
                    format!("expected body {expected}, got {body}"),
                ));
            }
        }

        if !(200..300).contains(&exchange.status) {
            return Err(Error::http_status(
                exchange.status,
                request.url,
                exchange.response,
            ));
        }
        Ok(Bytes::from(exchange.response))
    }
}
