//! Wire shapes of the remote events API.
//!
//! Outbound records rename `title` to `name` and `date` to `at`. Inbound
//! records are never decoded into a struct here: they stay raw JSON until
//! [`normalize`](crate::normalize::normalize) maps them.

use serde::Serialize;
use serde_json::Value;

use crate::error::{GatewayError, GatewayResult};
use crate::event::{Event, EventPatch, NewEvent, to_iso_millis};

/// Body of `POST /events/`.
#[derive(Debug, Serialize)]
pub struct CreateEventRequest<'a> {
    pub name: &'a str,
    pub importance: &'a str,
    pub at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
}

impl<'a> From<&'a NewEvent> for CreateEventRequest<'a> {
    fn from(event: &'a NewEvent) -> Self {
        CreateEventRequest {
            name: &event.title,
            importance: event.importance.as_str(),
            at: to_iso_millis(&event.date),
            description: event.description.as_deref(),
        }
    }
}

/// Body of `PUT /events/{id}`. Absent fields are left out of the JSON.
#[derive(Debug, Serialize)]
pub struct UpdateEventRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub importance: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
}

impl<'a> From<&'a EventPatch> for UpdateEventRequest<'a> {
    fn from(patch: &'a EventPatch) -> Self {
        UpdateEventRequest {
            name: patch.title.as_deref(),
            importance: patch.importance.as_ref().map(|i| i.as_str()),
            at: patch.date.as_ref().map(to_iso_millis),
            description: patch.description.as_deref(),
        }
    }
}

/// A stored record as the server returns it.
#[derive(Debug, Serialize)]
pub struct EventRecord<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub at: String,
    pub importance: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
}

impl<'a> From<&'a Event> for EventRecord<'a> {
    fn from(event: &'a Event) -> Self {
        EventRecord {
            id: &event.id,
            name: &event.title,
            at: event.date_iso(),
            importance: event.importance.as_str(),
            description: event.description.as_deref(),
        }
    }
}

impl EventRecord<'_> {
    pub fn to_value(&self) -> GatewayResult<Value> {
        serde_json::to_value(self).map_err(|e| GatewayError::Decode(e.to_string()))
    }
}

/// Extract the raw records of a list response.
/// Accepts `{ "items": [...] }` or a bare array.
pub fn list_items(payload: Value) -> GatewayResult<Vec<Value>> {
    match payload {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => match map.remove("items") {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(GatewayError::MalformedList),
        },
        _ => Err(GatewayError::MalformedList),
    }
}
