//! Field-level codecs
//!
//! Upstream encodes a few fields in shapes that plain derived serde cannot
//! express. Each codec here is a small type with its own `Serialize` and
//! `Deserialize` impls, used as the field type inside the payload structs.

use super::types::{Listing, Thing};
use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

// ============================================================================
// Edited
// ============================================================================

/// Edit marker: literal `false`, or the unix time of the last edit
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Edited {
    /// Never edited
    #[default]
    NotEdited,
    /// Edited at this unix timestamp
    At(f64),
}

impl Edited {
    /// Whether the item was edited
    pub fn is_edited(&self) -> bool {
        matches!(self, Edited::At(_))
    }

    /// Unix timestamp of the edit
    pub fn timestamp(&self) -> Option<f64> {
        match self {
            Edited::NotEdited => None,
            Edited::At(ts) => Some(*ts),
        }
    }

    /// Time of the edit
    pub fn edited_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp().and_then(timestamp_to_datetime)
    }
}

impl Serialize for Edited {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Edited::NotEdited => serializer.serialize_bool(false),
            Edited::At(ts) => serializer.serialize_i64(*ts as i64),
        }
    }
}

impl<'de> Deserialize<'de> for Edited {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(EditedVisitor)
    }
}

struct EditedVisitor;

impl Visitor<'_> for EditedVisitor {
    type Value = Edited;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("false or a numeric timestamp")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Edited, E> {
        if v {
            Err(E::invalid_value(Unexpected::Bool(v), &self))
        } else {
            Ok(Edited::NotEdited)
        }
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Edited, E> {
        Ok(Edited::At(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Edited, E> {
        Ok(Edited::At(v as f64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Edited, E> {
        Ok(Edited::At(v))
    }
}

// ============================================================================
// HeaderSize
// ============================================================================

/// Width and height pair, encoded as a two element array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeaderSize {
    pub width: i64,
    pub height: i64,
}

impl HeaderSize {
    pub fn new(width: i64, height: i64) -> Self {
        Self { width, height }
    }
}

impl Serialize for HeaderSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.width, self.height].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for HeaderSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = Vec::<i64>::deserialize(deserializer)?;
        match values.as_slice() {
            [] => Ok(HeaderSize::default()),
            [width, height] => Ok(HeaderSize::new(*width, *height)),
            other => Err(de::Error::invalid_length(
                other.len(),
                &"an empty or 2 element array",
            )),
        }
    }
}

// ============================================================================
// Replies
// ============================================================================

/// Nested replies of a comment or message.
///
/// Upstream sends `""` when there are none and a full `Listing` thing
/// otherwise.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Replies(Option<Box<Thing>>);

impl Replies {
    /// Wrap a replies thing
    pub fn new(thing: Thing) -> Self {
        Self(Some(Box::new(thing)))
    }

    /// No replies
    pub fn none() -> Self {
        Self(None)
    }

    /// The replies thing, if any
    pub fn thing(&self) -> Option<&Thing> {
        self.0.as_deref()
    }

    /// The replies listing, if any
    pub fn listing(&self) -> Option<&Listing> {
        self.thing().and_then(Thing::as_listing)
    }

    /// Direct children of the replies listing
    pub fn children(&self) -> &[Thing] {
        self.listing().map_or(&[], |l| l.children.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.children().is_empty()
    }
}

impl Serialize for Replies {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.0 {
            Some(thing) => thing.serialize(serializer),
            None => serializer.serialize_str(""),
        }
    }
}

impl<'de> Deserialize<'de> for Replies {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(Replies::none()),
            Value::String(s) if s.is_empty() => Ok(Replies::none()),
            value @ Value::Object(_) => Thing::deserialize(value)
                .map(Replies::new)
                .map_err(de::Error::custom),
            Value::String(s) => Err(de::Error::invalid_value(
                Unexpected::Str(&s),
                &"an empty string or a thing",
            )),
            other => Err(de::Error::custom(format!(
                "invalid replies: expected an empty string or a thing, got {other}"
            ))),
        }
    }
}

/// Convert a fractional unix timestamp to a UTC datetime
pub(crate) fn timestamp_to_datetime(ts: f64) -> Option<DateTime<Utc>> {
    if !ts.is_finite() {
        return None;
    }
    let secs = ts.floor();
    let nanos = ((ts - secs) * 1e9).round() as u32;
    DateTime::from_timestamp(secs as i64, nanos.min(999_999_999))
}
