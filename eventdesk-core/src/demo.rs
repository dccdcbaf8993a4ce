//! Fixed event sets: the in-memory gateway's starting collection and the
//! demo set used to seed a session.
//!
//! Both are written in the remote API's wire shape and go through the
//! normalizer like any server payload.

use serde_json::{Value, json};

use crate::event::Event;
use crate::normalize::normalize;

/// The two events an in-memory gateway starts with.
pub fn sample_events() -> Vec<Event> {
    normalize_all(&[
        json!({
            "id": "1",
            "name": "Team kickoff",
            "at": "2025-01-06T09:00:00Z",
            "importance": "normale"
        }),
        json!({
            "id": "2",
            "name": "Production release",
            "at": "2025-01-15T14:30:00Z",
            "importance": "haute"
        }),
    ])
}

/// Demo set covering every importance level.
pub fn demo_events() -> Vec<Event> {
    normalize_all(&[
        json!({
            "id": "demo-1",
            "name": "Coffee with the design team",
            "at": "2025-03-03T08:30:00Z",
            "importance": "basse",
            "description": "Informal catch-up"
        }),
        json!({
            "id": "demo-2",
            "name": "Sprint planning",
            "at": "2025-03-03T10:00:00Z",
            "importance": "normale"
        }),
        json!({
            "id": "demo-3",
            "name": "Quarterly review",
            "at": "2025-03-12T15:00:00Z",
            "importance": "haute",
            "description": "Slides due the day before"
        }),
        json!({
            "id": "demo-4",
            "name": "Database migration window",
            "at": "2025-03-20T22:00:00Z",
            "importance": "critique"
        }),
    ])
}

fn normalize_all(raw: &[Value]) -> Vec<Event> {
    raw.iter().map(normalize).collect()
}
