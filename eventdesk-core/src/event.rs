//! Canonical event types.
//!
//! Every [`Event`] held by the store has been produced by
//! [`normalize`](crate::normalize::normalize); drafts ([`NewEvent`],
//! [`EventPatch`]) describe what a caller wants to send to a gateway.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A managed event (client-side canonical shape)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Opaque identifier, empty when unassigned
    pub id: String,
    pub title: String,
    /// Millisecond precision, always UTC
    #[serde(with = "iso_millis")]
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub importance: Importance,
}

impl Event {
    /// The event date in its canonical text form, e.g. `2024-01-01T10:00:00.000Z`.
    pub fn date_iso(&self) -> String {
        to_iso_millis(&self.date)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Format an instant as ISO-8601 UTC with milliseconds and a `Z` suffix.
pub fn to_iso_millis(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

mod iso_millis {
    use super::*;

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&to_iso_millis(date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

/// Priority of an event.
///
/// The four named levels form the known set. Payloads carrying anything else
/// keep the raw value in `Other` rather than being rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Importance {
    Basse,
    #[default]
    Normale,
    Haute,
    Critique,
    Other(String),
}

impl Importance {
    /// The known levels, lowest first.
    pub const KNOWN: [Importance; 4] = [
        Importance::Basse,
        Importance::Normale,
        Importance::Haute,
        Importance::Critique,
    ];

    /// Lenient conversion used at the normalization boundary.
    /// Empty text maps to the default, unknown text is kept verbatim.
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "" => Importance::default(),
            "basse" => Importance::Basse,
            "normale" => Importance::Normale,
            "haute" => Importance::Haute,
            "critique" => Importance::Critique,
            other => Importance::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Importance::Basse => "basse",
            Importance::Normale => "normale",
            Importance::Haute => "haute",
            Importance::Critique => "critique",
            Importance::Other(raw) => raw,
        }
    }
}

impl fmt::Display for Importance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Strict parsing for user input: only the known levels are accepted.
impl FromStr for Importance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Importance::from_raw(s.trim()) {
            Importance::Other(_) => Err(format!(
                "Unknown importance '{}'. Expected one of: basse, normale, haute, critique",
                s
            )),
            _ if s.trim().is_empty() => Err("Importance cannot be empty".to_string()),
            known => Ok(known),
        }
    }
}

impl Serialize for Importance {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Importance {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(d)?;
        Ok(Importance::from_raw(&raw))
    }
}

/// Draft of an event to create.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub title: String,
    pub date: DateTime<Utc>,
    pub description: Option<String>,
    pub importance: Importance,
}

impl NewEvent {
    pub fn new(title: impl Into<String>, date: DateTime<Utc>) -> Self {
        NewEvent {
            title: title.into(),
            date,
            description: None,
            importance: Importance::default(),
        }
    }

    pub fn with_importance(mut self, importance: Importance) -> Self {
        self.importance = importance;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Partial update of an existing event. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventPatch {
    pub title: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub importance: Option<Importance>,
}

impl EventPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.date.is_none()
            && self.description.is_none()
            && self.importance.is_none()
    }

    /// Merge this patch over `event`, returning the updated copy.
    pub fn apply_to(&self, event: &Event) -> Event {
        Event {
            id: event.id.clone(),
            title: self.title.clone().unwrap_or_else(|| event.title.clone()),
            date: self.date.unwrap_or(event.date),
            description: self.description.clone().or_else(|| event.description.clone()),
            importance: self
                .importance
                .clone()
                .unwrap_or_else(|| event.importance.clone()),
        }
    }
}

/// What a successful delete returns: only the identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedEvent {
    pub id: String,
}
