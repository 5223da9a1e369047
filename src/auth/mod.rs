//! Authentication module
//!
//! Script apps authenticate with the account's username and password plus
//! the app's client id and secret. The resulting bearer token is stored in
//! the [`Config`](crate::config::Config) and reused until it expires.

mod authenticator;
mod types;

pub use authenticator::ScriptAuthenticator;
pub use types::TokenResponse;
