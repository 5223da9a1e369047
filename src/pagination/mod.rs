//! Pagination module
//!
//! Listings are paged with an opaque `after` token. A [`Lister`] builds the
//! URL for a page from its [`ListingOptions`]; a [`ListingCursor`] walks the
//! things across pages, writing the token and the running `count` back into
//! the options before each request.

mod cursor;
mod types;

pub use cursor::ListingCursor;
pub use types::{Lister, ListingOptions, PathListing, TopPosts};
