//! Wire representation of a single call.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Opaque record identifier.
///
/// The remote store has shipped ids both as JSON strings and as integers;
/// either form is accepted and kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CallId(String);

impl CallId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CallId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for CallId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl<'de> Deserialize<'de> for CallId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => CallId(s),
            RawId::Signed(n) => CallId(n.to_string()),
            RawId::Unsigned(n) => CallId(n.to_string()),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Inbound,
    Outbound,
}

/// Outcome of a call as reported by the provider.
///
/// Values the client does not know about are preserved verbatim in
/// [`CallType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CallType {
    Answered,
    Missed,
    Voicemail,
    Other(String),
}

impl CallType {
    pub fn as_str(&self) -> &str {
        match self {
            CallType::Answered => "answered",
            CallType::Missed => "missed",
            CallType::Voicemail => "voicemail",
            CallType::Other(s) => s,
        }
    }
}

impl From<String> for CallType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "answered" => CallType::Answered,
            "missed" => CallType::Missed,
            "voicemail" => CallType::Voicemail,
            _ => CallType::Other(raw),
        }
    }
}

impl From<CallType> for String {
    fn from(call_type: CallType) -> Self {
        match call_type {
            CallType::Other(s) => s,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for CallType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the remote `/activities` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRecord {
    pub id: CallId,
    pub direction: Direction,
    /// Raw phone number, untrusted and unformatted.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub from: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub to: String,
    /// Aircall number the call was routed through, when the provider sends one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub via: Option<String>,
    pub call_type: CallType,
    /// Length of the call in whole seconds.
    #[serde(deserialize_with = "lenient_seconds")]
    pub duration: u64,
    /// Provider timestamps may omit the offset; those are read as UTC.
    #[serde(deserialize_with = "lenient_timestamp")]
    pub created_at: DateTime<Utc>,
    pub is_archived: bool,
}

impl CallRecord {
    pub fn is_answered(&self) -> bool {
        self.call_type == CallType::Answered
    }

    /// The number on the other end of the line from the user's point of view.
    pub fn counterpart(&self) -> &str {
        match self.direction {
            Direction::Outbound => &self.to,
            Direction::Inbound => &self.from,
        }
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// Some provider payloads encode the duration as a numeric string.
fn lenient_seconds<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawSeconds {
        Number(u64),
        Text(String),
    }

    match RawSeconds::deserialize(deserializer)? {
        RawSeconds::Number(n) => Ok(n),
        RawSeconds::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid duration {s:?}"))),
    }
}

// RFC 3339 first, then offset-less ISO 8601 read as UTC.
fn lenient_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim();

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Ok(with_offset.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp {raw:?}")))
}
