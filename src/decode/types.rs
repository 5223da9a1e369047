//! Thing types
//!
//! See <https://github.com/reddit/reddit/wiki/JSON> for the upstream shapes.
//! Field names are the upstream snake_case keys.

use super::codecs::{timestamp_to_datetime, Edited, HeaderSize, Replies};
use crate::error::{Error, Result};
use crate::types::JsonValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Kind
// ============================================================================

/// Discriminator selecting the payload type of a [`Thing`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// `Listing`
    Listing,
    /// `t1`
    Comment,
    /// `t2`
    Account,
    /// `t3`
    Link,
    /// `t4`
    Message,
    /// `t5`
    Subreddit,
    /// `more`
    More,
}

impl Kind {
    /// Every supported kind
    pub const ALL: [Kind; 7] = [
        Kind::Listing,
        Kind::Comment,
        Kind::Account,
        Kind::Link,
        Kind::Message,
        Kind::Subreddit,
        Kind::More,
    ];

    /// Wire value of this kind
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Listing => "Listing",
            Kind::Comment => "t1",
            Kind::Account => "t2",
            Kind::Link => "t3",
            Kind::Message => "t4",
            Kind::Subreddit => "t5",
            Kind::More => "more",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Kind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::unknown_kind(s))
    }
}

// ============================================================================
// Thing
// ============================================================================

/// Envelope common to all API entities.
///
/// The kind is not stored separately: it is always the kind of `data`.
#[derive(Debug, Clone, PartialEq)]
pub struct Thing {
    pub id: String,
    pub name: String,
    pub data: ThingData,
}

/// Payload of a [`Thing`], one variant per [`Kind`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
#[allow(clippy::large_enum_variant)]
pub enum ThingData {
    Listing(Listing),
    Comment(Comment),
    Account(Account),
    Link(Link),
    Message(Message),
    Subreddit(Subreddit),
    More(More),
}

impl ThingData {
    /// Kind selecting this payload
    pub fn kind(&self) -> Kind {
        match self {
            ThingData::Listing(_) => Kind::Listing,
            ThingData::Comment(_) => Kind::Comment,
            ThingData::Account(_) => Kind::Account,
            ThingData::Link(_) => Kind::Link,
            ThingData::Message(_) => Kind::Message,
            ThingData::Subreddit(_) => Kind::Subreddit,
            ThingData::More(_) => Kind::More,
        }
    }
}

impl Thing {
    /// Create a thing with empty envelope id and name
    pub fn new(data: ThingData) -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            data,
        }
    }

    pub fn kind(&self) -> Kind {
        self.data.kind()
    }

    pub fn as_listing(&self) -> Option<&Listing> {
        match &self.data {
            ThingData::Listing(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_comment(&self) -> Option<&Comment> {
        match &self.data {
            ThingData::Comment(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_account(&self) -> Option<&Account> {
        match &self.data {
            ThingData::Account(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_link(&self) -> Option<&Link> {
        match &self.data {
            ThingData::Link(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_message(&self) -> Option<&Message> {
        match &self.data {
            ThingData::Message(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_subreddit(&self) -> Option<&Subreddit> {
        match &self.data {
            ThingData::Subreddit(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_more(&self) -> Option<&More> {
        match &self.data {
            ThingData::More(v) => Some(v),
            _ => None,
        }
    }

    /// Take the payload as a listing, failing for any other kind
    pub fn into_listing(self) -> Result<Listing> {
        match self.data {
            ThingData::Listing(listing) => Ok(listing),
            other => Err(Error::unexpected_kind(
                Kind::Listing.as_str(),
                other.kind().as_str(),
            )),
        }
    }
}

// ============================================================================
// Listing
// ============================================================================

/// A page of things.
///
/// `after` is the continuation token for the next page; an empty or null
/// token means there is no further page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Listing {
    pub before: Option<String>,
    pub after: Option<String>,
    pub modhash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dist: Option<u64>,
    pub children: Vec<Thing>,
}

impl Listing {
    /// Continuation token for the next page
    pub fn after_token(&self) -> Option<&str> {
        self.after.as_deref().filter(|t| !t.is_empty())
    }

    /// Continuation token for the previous page
    pub fn before_token(&self) -> Option<&str> {
        self.before.as_deref().filter(|t| !t.is_empty())
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Thing> {
        self.children.iter()
    }
}

impl<'a> IntoIterator for &'a Listing {
    type Item = &'a Thing;
    type IntoIter = std::slice::Iter<'a, Thing>;

    fn into_iter(self) -> Self::IntoIter {
        self.children.iter()
    }
}

// ============================================================================
// Mix-ins
// ============================================================================

/// Voting attributes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Votable {
    pub ups: i64,
    pub downs: i64,
    /// `Some(true)` upvoted, `Some(false)` downvoted, `None` no vote
    pub likes: Option<bool>,
}

/// Creation time, in local epoch seconds and UTC epoch seconds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Created {
    pub created: f64,
    pub created_utc: f64,
}

impl Created {
    /// Creation time in UTC
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        timestamp_to_datetime(self.created_utc)
    }
}

// ============================================================================
// Payloads
// ============================================================================

/// A single comment (`t1`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Comment {
    #[serde(flatten)]
    pub votable: Votable,
    #[serde(flatten)]
    pub created: Created,
    pub id: String,
    pub name: String,
    pub approved_by: Option<String>,
    pub author: String,
    pub author_flair_css_class: Option<String>,
    pub author_flair_text: Option<String>,
    pub banned_by: Option<String>,
    pub body: String,
    pub body_html: Option<String>,
    pub edited: Edited,
    pub gilded: i64,
    pub link_author: Option<String>,
    pub link_id: String,
    pub link_title: Option<String>,
    pub link_url: Option<String>,
    pub num_reports: Option<i64>,
    pub parent_id: String,
    pub replies: Replies,
    pub saved: bool,
    pub score: i64,
    pub score_hidden: bool,
    pub subreddit: String,
    pub subreddit_id: String,
    pub distinguished: Option<String>,
}

/// A single link or self post (`t3`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Link {
    #[serde(flatten)]
    pub votable: Votable,
    #[serde(flatten)]
    pub created: Created,
    pub id: String,
    pub name: String,
    pub author: String,
    pub author_flair_css_class: Option<String>,
    pub author_flair_text: Option<String>,
    pub clicked: bool,
    pub domain: String,
    pub hidden: bool,
    pub is_self: bool,
    pub link_flair_css_class: Option<String>,
    pub link_flair_text: Option<String>,
    pub locked: bool,
    /// Raw media object
    pub media: JsonValue,
    /// Raw media embed object
    pub media_embed: JsonValue,
    pub num_comments: i64,
    pub over_18: bool,
    pub permalink: String,
    pub saved: bool,
    pub score: i64,
    pub selftext: String,
    pub selftext_html: Option<String>,
    pub subreddit: String,
    pub subreddit_id: String,
    pub thumbnail: String,
    pub title: String,
    pub url: String,
    pub edited: Edited,
    pub distinguished: Option<String>,
    pub stickied: bool,
}

/// A single account (`t2`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Account {
    #[serde(flatten)]
    pub created: Created,
    pub id: String,
    pub name: String,
    pub comment_karma: i64,
    pub has_mail: Option<bool>,
    pub has_mod_mail: Option<bool>,
    pub has_verified_email: bool,
    pub inbox_count: Option<i64>,
    pub is_friend: bool,
    pub is_gold: bool,
    pub is_mod: bool,
    pub link_karma: i64,
    pub modhash: Option<String>,
    pub over_18: Option<bool>,
}

/// A single private message (`t4`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Message {
    #[serde(flatten)]
    pub created: Created,
    pub id: String,
    pub name: String,
    pub author: Option<String>,
    pub body: String,
    pub body_html: Option<String>,
    pub context: String,
    pub first_message: Option<i64>,
    pub first_message_name: Option<String>,
    pub likes: Option<bool>,
    pub link_title: Option<String>,
    pub new: bool,
    pub parent_id: Option<String>,
    pub replies: Replies,
    pub subject: String,
    pub subreddit: Option<String>,
    pub was_comment: bool,
}

/// A single subreddit (`t5`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Subreddit {
    pub id: String,
    pub name: String,
    pub accounts_active: Option<i64>,
    pub comment_score_hide_mins: i64,
    pub description: String,
    pub description_html: Option<String>,
    pub display_name: String,
    pub header_img: Option<String>,
    pub header_size: Option<HeaderSize>,
    pub header_title: Option<String>,
    pub over18: bool,
    pub public_description: String,
    pub public_traffic: bool,
    pub subscribers: Option<i64>,
    pub submission_type: Option<String>,
    pub submit_link_label: Option<String>,
    pub submit_text_label: Option<String>,
    pub subreddit_type: String,
    pub title: String,
    pub url: String,
    pub user_is_banned: Option<bool>,
    pub user_is_contributor: Option<bool>,
    pub user_is_moderator: Option<bool>,
    pub user_is_subscriber: Option<bool>,
}

/// IDs of things present in a thread but not included in full (`more`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct More {
    pub id: String,
    pub name: String,
    pub parent_id: String,
    pub count: i64,
    pub depth: i64,
    pub children: Vec<String>,
}
