//! Forward-only cursor over a paginated listing

use super::types::Lister;
use crate::decode::{Listing, Thing};
use crate::error::{Error, Result};
use crate::http::ApiClient;
use futures::stream::{self, Stream};
use tracing::{debug, warn};

/// Walks the things of a listing one at a time, fetching pages on demand.
///
/// The cursor follows the `after` token of each page and stops when a page
/// comes back without one. Whether a page is empty is only known once it has
/// been fetched. The first error is kept and ends iteration for good.
pub struct ListingCursor<'a, L: Lister + ?Sized> {
    client: &'a ApiClient,
    lister: &'a mut L,
    listing: Listing,
    /// `None` until the first page has been fetched
    index: Option<usize>,
    error: Option<Error>,
    pages: usize,
}

impl<'a, L: Lister + ?Sized> ListingCursor<'a, L> {
    pub fn new(client: &'a ApiClient, lister: &'a mut L) -> Self {
        Self {
            client,
            lister,
            listing: Listing::default(),
            index: None,
            error: None,
            pages: 0,
        }
    }

    /// Move to the next thing, fetching the next page when the cached one is
    /// used up.
    ///
    /// Returns `false` when the listing is exhausted or an error occurred;
    /// check [`last_error`](Self::last_error) to tell them apart.
    pub async fn advance(&mut self) -> bool {
        if self.error.is_some() {
            return false;
        }

        if let Some(index) = self.index {
            if index + 1 < self.listing.len() {
                self.index = Some(index + 1);
                return true;
            }
            if self.listing.after_token().is_none() {
                self.index = Some(self.listing.len());
                return false;
            }
        }

        match self.fetch().await {
            Ok(has_items) => has_items,
            Err(e) => {
                warn!("Listing stopped after {} pages: {e}", self.pages);
                self.error = Some(e);
                false
            }
        }
    }

    async fn fetch(&mut self) -> Result<bool> {
        if self.index.is_some() {
            self.lister.options_mut().after = self.listing.after_token().map(str::to_string);
        }

        let url = self.lister.url()?;
        let listing = self
            .client
            .get_thing(&url)
            .await?
            .into_listing()
            .map_err(|e| e.in_response_from(&url))?;

        self.pages += 1;
        self.lister.options_mut().count += listing.len();
        debug!(
            "Fetched page {} with {} items from {url} (after: {:?})",
            self.pages,
            listing.len(),
            listing.after_token()
        );

        self.listing = listing;
        self.index = Some(0);
        Ok(!self.listing.is_empty())
    }

    /// The thing the cursor is positioned on
    pub fn current(&self) -> Option<&Thing> {
        if self.error.is_some() {
            return None;
        }
        self.index.and_then(|i| self.listing.children.get(i))
    }

    /// The error that ended iteration, if any
    pub fn last_error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Number of pages fetched so far
    pub fn pages_fetched(&self) -> usize {
        self.pages
    }

    /// The listing descriptor, as updated by the pages fetched so far
    pub fn descriptor(&self) -> &L {
        self.lister
    }

    /// Turn the cursor into a stream of things.
    ///
    /// An error is yielded once as the final item.
    pub fn into_stream(self) -> impl Stream<Item = Result<Thing>> + 'a {
        stream::unfold(Some(self), |state| async move {
            let mut cursor = state?;
            if cursor.advance().await {
                let thing = cursor.current().cloned()?;
                Some((Ok(thing), Some(cursor)))
            } else {
                cursor.error.take().map(|e| (Err(e), None))
            }
        })
    }
}

impl<L: Lister + ?Sized> std::fmt::Debug for ListingCursor<'_, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListingCursor")
            .field("index", &self.index)
            .field("page_len", &self.listing.len())
            .field("pages", &self.pages)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}
