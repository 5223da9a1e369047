//! CLI runner - executes commands

use crate::auth::ScriptAuthenticator;
use crate::cli::commands::{Cli, Commands, OutputFormat, PageArgs};
use crate::config::Config;
use crate::decode::Thing;
use crate::error::{Result, ResultExt};
use crate::http::{ApiClient, HttpClientConfig, ReqwestTransport, Transport};
use crate::pagination::{Lister, PathListing, TopPosts};
use crate::types::TopDuration;
use chrono::Utc;
use futures::StreamExt;
use serde::Serialize;
use serde_json::json;
use std::pin::pin;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Auth { force } => self.auth(*force).await,
            Commands::Top {
                subreddit,
                duration,
                page,
            } => self.top(subreddit, *duration, page).await,
            Commands::Listing { path, page } => self.listing(path, page).await,
        }
    }

    fn transport(&self) -> Result<Arc<dyn Transport>> {
        let config = HttpClientConfig::builder()
            .timeout(Duration::from_secs(self.cli.timeout))
            .build();
        Ok(Arc::new(ReqwestTransport::with_config(config)?))
    }

    /// Load the credential file and make sure it holds a usable token,
    /// saving it back when a new token had to be requested
    async fn authenticated_config(
        &self,
        transport: &Arc<dyn Transport>,
        force: bool,
    ) -> Result<Config> {
        let mut config = Config::load(&self.cli.config)?;
        if force {
            config.auth_token = Default::default();
        }

        let before = config.auth_token.clone();
        ScriptAuthenticator::new(Arc::clone(transport))
            .with_token_url(&self.cli.auth_url)
            .authenticate(&mut config)
            .await?;

        if config.auth_token != before {
            config.save(&self.cli.config).with_context(|| {
                format!(
                    "Authenticated but could not store the token in {}",
                    self.cli.config.display()
                )
            })?;
        }
        Ok(config)
    }

    /// Obtain and store a token
    async fn auth(&self, force: bool) -> Result<()> {
        let transport = self.transport()?;
        let config = self.authenticated_config(&transport, force).await?;

        let token = &config.auth_token;
        let remaining = token.expires - Utc::now().timestamp();
        self.output(&json!({
            "type": "AUTH",
            "token_type": token.token_type,
            "expires": token.expires,
            "expires_in": remaining.max(0),
        }));
        Ok(())
    }

    async fn top(
        &self,
        subreddit: &str,
        duration: Option<TopDuration>,
        page: &PageArgs,
    ) -> Result<()> {
        let mut lister = TopPosts::new(subreddit, duration)
            .with_base_url(&self.cli.api_url)
            .with_limit(page.limit);
        lister.options.after.clone_from(&page.after);
        self.stream(&mut lister, page.max_items).await
    }

    async fn listing(&self, path: &str, page: &PageArgs) -> Result<()> {
        let mut lister = PathListing::new(path)
            .with_base_url(&self.cli.api_url)
            .with_limit(page.limit);
        lister.options.after.clone_from(&page.after);
        self.stream(&mut lister, page.max_items).await
    }

    /// Print every thing of a listing, up to `max_items`
    async fn stream<L: Lister + ?Sized>(
        &self,
        lister: &mut L,
        max_items: Option<usize>,
    ) -> Result<()> {
        let transport = self.transport()?;
        let config = self.authenticated_config(&transport, false).await?;
        let client = ApiClient::from_config(transport, &config);

        let start = Instant::now();
        let mut items = 0usize;
        {
            let things = client
                .stream(&mut *lister)
                .into_stream()
                .take(max_items.unwrap_or(usize::MAX));
            let mut things = pin!(things);
            while let Some(thing) = things.next().await {
                self.output_thing(&thing?);
                items += 1;
            }
        }

        info!(
            "Streamed {items} of {} fetched items in {}ms",
            lister.options().count,
            start.elapsed().as_millis()
        );
        Ok(())
    }

    fn output_thing(&self, thing: &Thing) {
        if self.cli.format == OutputFormat::Pretty {
            if let Some(line) = summary(thing) {
                println!("{line}");
                return;
            }
        }
        self.output(thing);
    }

    /// Output a message
    fn output<T: Serialize + ?Sized>(&self, msg: &T) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

/// One-line description of links and comments
fn summary(thing: &Thing) -> Option<String> {
    if let Some(link) = thing.as_link() {
        return Some(format!(
            "{:>6}  {}  (u/{}, {} comments)",
            link.score, link.title, link.author, link.num_comments
        ));
    }
    thing.as_comment().map(|comment| {
        format!(
            "{:>6}  u/{}: {}",
            comment.score,
            comment.author,
            comment.body.lines().next().unwrap_or_default()
        )
    })
}
