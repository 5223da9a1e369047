//! CLI module
//!
//! Command-line interface for streaming listings.
//!
//! # Commands
//!
//! - `auth` - Obtain a token and store it in the credential file
//! - `top` - Stream the top posts of a subreddit
//! - `listing` - Stream any listing endpoint

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat, PageArgs};
pub use runner::Runner;
