//! Thing decoder module
//!
//! Decodes the polymorphic `{"kind", "data"}` envelope used by every API
//! response into typed payloads.
//!
//! # Overview
//!
//! - [`decode`] parses raw bytes into a [`Thing`], dispatching on [`Kind`]
//! - payload structs ([`Comment`], [`Link`], …) use plain serde for most
//!   fields and the codecs in this module for the odd ones ([`Edited`],
//!   [`HeaderSize`], [`Replies`])

mod codecs;
mod envelope;
mod types;

pub use codecs::{Edited, HeaderSize, Replies};
pub use envelope::{decode, decode_str};
pub use types::{
    Account, Comment, Created, Kind, Link, Listing, Message, More, Subreddit, Thing, ThingData,
    Votable,
};
