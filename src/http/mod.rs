//! HTTP module
//!
//! Provides the transport seam and the authenticated API client.
//!
//! # Features
//!
//! - **Injectable Transport**: every request goes through [`Transport`]
//! - **reqwest Backend**: [`ReqwestTransport`] for real network I/O
//! - **Scripted Backend**: [`ScriptedTransport`] for deterministic tests
//! - **Authentication**: [`ApiClient`] adds user agent and bearer token

mod client;
mod scripted;
mod transport;

pub use client::ApiClient;
pub use scripted::{Exchange, ScriptedTransport};
pub use transport::{
    ApiRequest, HttpClientConfig, HttpClientConfigBuilder, ReqwestTransport, Transport,
};

#[cfg(test)]
mod tests;
