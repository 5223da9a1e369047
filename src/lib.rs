// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # reddit-stream
//!
//! A small async client for the reddit API, built around three pieces:
//!
//! - **Script authentication**: exchange account credentials for a bearer
//!   token and keep it in a JSON credential file
//! - **Thing decoding**: every response is a `{"kind", "data"}` envelope;
//!   the kind selects a typed payload (comment, link, listing, ...)
//! - **Listing cursors**: walk a paginated listing one thing at a time,
//!   following `after` tokens and fetching pages only when needed
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use reddit_stream::{ApiClient, Config, ReqwestTransport, ScriptAuthenticator, TopPosts};
//! use reddit_stream::types::TopDuration;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> reddit_stream::Result<()> {
//!     let transport = Arc::new(ReqwestTransport::new()?);
//!     let mut config = Config::load("~/.reddit_creds")?;
//!     ScriptAuthenticator::new(transport.clone())
//!         .authenticate(&mut config)
//!         .await?;
//!
//!     let client = ApiClient::from_config(transport, &config);
//!     let mut top = TopPosts::new("rust", Some(TopDuration::Week)).with_limit(25);
//!     let mut cursor = client.stream(&mut top);
//!     while cursor.advance().await {
//!         if let Some(link) = cursor.current().and_then(|t| t.as_link()) {
//!             println!("{}", link.title);
//!         }
//!     }
//!     if let Some(err) = cursor.last_error() {
//!         eprintln!("{err}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   url()    ┌───────────────┐   GET    ┌───────────┐
//! │    Lister    │◄───────────│ ListingCursor │─────────►│ ApiClient │
//! │ (TopPosts,…) │  after,    └───────────────┘          └─────┬─────┘
//! └──────────────┘  count            ▲ Listing                 │ bytes
//!                                    │                   ┌─────▼─────┐
//!                              ┌─────┴─────┐             │ Transport │
//!                              │  decode   │◄────────────│ (reqwest) │
//!                              └───────────┘             └───────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and constants
pub mod types;

/// Credential file and tokens
pub mod config;

/// Script app authentication
pub mod auth;

/// Transport seam and authenticated client
pub mod http;

/// Thing envelope decoding
pub mod decode;

/// Listing descriptors and cursors
pub mod pagination;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, ErrorCategory, Result};
pub use types::*;

// Re-export commonly used types
pub use auth::ScriptAuthenticator;
pub use config::{AuthToken, Config, Credentials};
pub use decode::{decode, Kind, Listing, Thing, ThingData};
pub use http::{ApiClient, ReqwestTransport, ScriptedTransport, Transport};
pub use pagination::{Lister, ListingCursor, ListingOptions, PathListing, TopPosts};
