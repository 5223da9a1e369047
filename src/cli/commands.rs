//! CLI commands and argument parsing

use crate::types::{LogLevel, TopDuration, DEFAULT_CONFIG_FILE, REDDIT_API_URL, REDDIT_AUTH_URL};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Stream reddit listings from the command line
#[derive(Parser, Debug)]
#[command(name = "reddit-stream")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Credential file (JSON); a leading `~` is expanded
    #[arg(short = 'C', long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// API base URL
    #[arg(long, global = true, default_value = REDDIT_API_URL)]
    pub api_url: String,

    /// Token endpoint URL
    #[arg(long, global = true, default_value = REDDIT_AUTH_URL)]
    pub auth_url: String,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value = "30")]
    pub timeout: u64,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Log level
    #[arg(long, global = true, default_value = "info")]
    pub log_level: LogLevel,

    /// Verbose output (same as --log-level debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Effective log level
    pub fn log_level(&self) -> LogLevel {
        if self.verbose {
            LogLevel::Debug
        } else {
            self.log_level
        }
    }
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Obtain a token and store it in the credential file
    Auth {
        /// Request a new token even if the stored one is still valid
        #[arg(long)]
        force: bool,
    },

    /// Stream the top posts of a subreddit
    Top {
        /// Subreddit name, without the `r/` prefix
        #[arg(short, long)]
        subreddit: String,

        /// Time window
        #[arg(short, long)]
        duration: Option<TopDuration>,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Stream any listing endpoint, e.g. `/r/rust/new.json`
    Listing {
        /// Listing path
        #[arg(short, long)]
        path: String,

        #[command(flatten)]
        page: PageArgs,
    },
}

/// Paging options shared by the listing commands
#[derive(clap::Args, Debug, Clone)]
pub struct PageArgs {
    /// Items per page
    #[arg(short, long, default_value = "25")]
    pub limit: usize,

    /// Stop after this many items
    #[arg(long)]
    pub max_items: Option<usize>,

    /// Start after this fullname, e.g. `t3_abc123`
    #[arg(long)]
    pub after: Option<String>,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one thing per line)
    Json,
    /// Human-readable output
    Pretty,
}
