//! Listing descriptors and URL builders
//!
//! A [`Lister`] describes one paginated listing: it owns the
//! [`ListingOptions`] the cursor updates between pages and knows how to turn
//! them into a request URL.

use crate::error::{Error, Result};
use crate::types::{TopDuration, REDDIT_API_URL};
use std::collections::BTreeMap;
use url::Url;

/// Query parameters shared by every listing endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingOptions {
    /// Fetch the page after this fullname
    pub after: Option<String>,
    /// Fetch the page before this fullname
    pub before: Option<String>,
    /// Number of items already seen
    pub count: usize,
    /// Maximum number of items per page
    pub limit: usize,
    /// Optional `show` filter, e.g. `all`
    pub show: Option<String>,
}

impl ListingOptions {
    /// Options with a page size
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Query parameters, sorted by key, with empty and zero values left out
    pub fn query_pairs(&self) -> BTreeMap<&'static str, String> {
        let mut params = BTreeMap::new();
        if let Some(after) = self.after.as_deref().filter(|v| !v.is_empty()) {
            params.insert("after", after.to_string());
        }
        if let Some(before) = self.before.as_deref().filter(|v| !v.is_empty()) {
            params.insert("before", before.to_string());
        }
        if self.count > 0 {
            params.insert("count", self.count.to_string());
        }
        if self.limit > 0 {
            params.insert("limit", self.limit.to_string());
        }
        if let Some(show) = self.show.as_deref().filter(|v| !v.is_empty()) {
            params.insert("show", show.to_string());
        }
        params
    }
}

/// A paginated listing endpoint
pub trait Lister {
    /// URL of the page described by the current options
    fn url(&self) -> Result<String>;

    fn options(&self) -> &ListingOptions;

    fn options_mut(&mut self) -> &mut ListingOptions;
}

/// Append query parameters, leaving the URL without a `?` when there are none
fn with_query(mut url: Url, params: &BTreeMap<&'static str, String>) -> String {
    if !params.is_empty() {
        url.query_pairs_mut().extend_pairs(params);
    }
    url.into()
}

// ============================================================================
// Top posts
// ============================================================================

/// Top posts of a subreddit: `{base}/r/{subreddit}/top.json`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopPosts {
    pub options: ListingOptions,
    pub subreddit: String,
    /// Time window; the server default applies when unset
    pub duration: Option<TopDuration>,
    pub base_url: String,
}

impl TopPosts {
    pub fn new(subreddit: impl Into<String>, duration: Option<TopDuration>) -> Self {
        Self {
            options: ListingOptions::default(),
            subreddit: subreddit.into(),
            duration,
            base_url: REDDIT_API_URL.to_string(),
        }
    }

    /// Use a different API base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the page size
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.options.limit = limit;
        self
    }
}

impl Lister for TopPosts {
    fn url(&self) -> Result<String> {
        if self.subreddit.is_empty() {
            return Err(Error::url_build("subreddit must not be empty"));
        }

        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|()| Error::url_build(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(["r", self.subreddit.as_str(), "top.json"]);

        let mut params = self.options.query_pairs();
        if let Some(duration) = self.duration {
            params.insert("t", duration.as_str().to_string());
        }
        Ok(with_query(url, &params))
    }

    fn options(&self) -> &ListingOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut ListingOptions {
        &mut self.options
    }
}

// ============================================================================
// Arbitrary listing path
// ============================================================================

/// Any listing endpoint addressed by path, e.g. `/r/rust/new.json`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathListing {
    pub options: ListingOptions,
    pub path: String,
    pub base_url: String,
}

impl PathListing {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            options: ListingOptions::default(),
            path: path.into(),
            base_url: REDDIT_API_URL.to_string(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.options.limit = limit;
        self
    }
}

impl Lister for PathListing {
    fn url(&self) -> Result<String> {
        let path = self.path.trim();
        if path.is_empty() || path == "/" {
            return Err(Error::url_build("listing path must not be empty"));
        }
        if path.contains('?') {
            return Err(Error::url_build(format!(
                "listing path {path} must not carry a query"
            )));
        }

        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|()| Error::url_build(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(path.split('/').filter(|segment| !segment.is_empty()));
        Ok(with_query(url, &self.options.query_pairs()))
    }

    fn options(&self) -> &ListingOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut ListingOptions {
        &mut self.options
    }
}
