//! Envelope decoder
//!
//! A thing arrives as `{"id", "name", "kind", "data"}` where the shape of
//! `data` depends on `kind`. The envelope is parsed first with `data` left as
//! a raw JSON value, then `kind` selects the payload decoder. `Listing`
//! payloads contain further things, so decoding recurses through the
//! `Deserialize` impl below.

use super::types::{Kind, Thing, ThingData};
use crate::error::{Error, Result};
use serde::de::{self, Deserializer};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outer shape of a thing, payload not yet decoded
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    kind: String,
    #[serde(default)]
    data: Value,
}

impl Envelope {
    fn into_thing(self) -> Result<Thing> {
        let kind: Kind = self.kind.parse()?;
        let data = decode_payload(kind, self.data)
            .map_err(|e| Error::decode(format!("invalid {kind} payload: {e}")))?;
        Ok(Thing {
            id: self.id,
            name: self.name,
            data,
        })
    }
}

/// Decode `data` into the payload type selected by `kind`
fn decode_payload(kind: Kind, data: Value) -> serde_json::Result<ThingData> {
    Ok(match kind {
        Kind::Listing => ThingData::Listing(serde_json::from_value(data)?),
        Kind::Comment => ThingData::Comment(serde_json::from_value(data)?),
        Kind::Account => ThingData::Account(serde_json::from_value(data)?),
        Kind::Link => ThingData::Link(serde_json::from_value(data)?),
        Kind::Message => ThingData::Message(serde_json::from_value(data)?),
        Kind::Subreddit => ThingData::Subreddit(serde_json::from_value(data)?),
        Kind::More => ThingData::More(serde_json::from_value(data)?),
    })
}

/// Decode a thing from raw response bytes.
///
/// Fails with [`Error::UnknownKind`] when the top-level kind is not supported
/// and with [`Error::Decode`] for any other malformed input, including an
/// unsupported kind nested inside a listing.
pub fn decode(bytes: &[u8]) -> Result<Thing> {
    let envelope: Envelope = serde_json::from_slice(bytes)
        .map_err(|e| Error::decode(format!("invalid thing envelope: {e}")))?;
    envelope.into_thing()
}

/// Decode a thing from a JSON string
pub fn decode_str(json: &str) -> Result<Thing> {
    decode(json.as_bytes())
}

impl<'de> Deserialize<'de> for Thing {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Envelope::deserialize(deserializer)?
            .into_thing()
            .map_err(de::Error::custom)
    }
}

impl Serialize for Thing {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Thing", 4)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("kind", self.kind().as_str())?;
        state.serialize_field("data", &self.data)?;
        state.end()
    }
}
