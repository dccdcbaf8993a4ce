//! Mapping of foreign event payloads onto the canonical [`Event`].
//!
//! This is the only place that looks at raw server shapes. Past this
//! boundary, code works with [`Event`] and never re-checks fields.
//!
//! Accepted field aliases:
//! - title: `title`, then `name`
//! - timestamp: `date`, then `at`
//!
//! Timestamps may be RFC 3339 strings, naive date-times (read as UTC),
//! bare `YYYY-MM-DD` dates (UTC midnight) or epoch milliseconds.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SubsecRound, TimeZone, Utc};
use serde_json::Value;
use tracing::warn;

use crate::event::{Event, Importance};

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Normalize an arbitrary JSON record into an [`Event`]. Never fails.
pub fn normalize(raw: &Value) -> Event {
    Event {
        id: normalize_id(raw.get("id")),
        title: first_text(raw, &["title", "name"]).unwrap_or_default(),
        date: normalize_date(raw),
        description: first_text(raw, &["description"]),
        importance: first_text(raw, &["importance"])
            .map(|raw| Importance::from_raw(&raw))
            .unwrap_or_default(),
    }
}

fn normalize_id(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// First non-empty string among `keys`.
fn first_text(raw: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| raw.get(*key))
        .filter_map(Value::as_str)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

fn normalize_date(raw: &Value) -> DateTime<Utc> {
    let Some(value) = ["date", "at"]
        .into_iter()
        .filter_map(|key| raw.get(key))
        .find(|v| is_present(v))
    else {
        return now();
    };

    match parse_instant(value) {
        Some(date) => date.trunc_subsecs(3),
        None => {
            warn!(date = %value, "Invalid event date, falling back to current time");
            now()
        }
    }
}

/// Null, empty strings, `false` and zero count as absent.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn parse_instant(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_date_str(s.trim()),
        Value::Number(n) => {
            let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64))?;
            Utc.timestamp_millis_opt(millis).single()
        }
        _ => None,
    }
}

fn parse_date_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Some(dt) = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(dt.and_utc());
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
}

fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_wire_record() {
        let event = normalize(&json!({
            "id": "1",
            "name": "Launch",
            "at": "2024-01-01T10:00:00Z",
            "importance": "haute"
        }));

        assert_eq!(event.id, "1");
        assert_eq!(event.title, "Launch");
        assert_eq!(event.date_iso(), "2024-01-01T10:00:00.000Z");
        assert_eq!(event.importance, Importance::Haute);
        assert_eq!(event.description, None);
    }

    #[test]
    fn test_title_wins_over_name_unless_empty() {
        let event = normalize(&json!({"title": "A", "name": "B"}));
        assert_eq!(event.title, "A");

        let event = normalize(&json!({"title": "", "name": "B"}));
        assert_eq!(event.title, "B");
    }

    #[test]
    fn test_date_wins_over_at() {
        let event = normalize(&json!({
            "date": "2023-05-01T08:00:00+02:00",
            "at": "2024-01-01T10:00:00Z"
        }));
        assert_eq!(event.date_iso(), "2023-05-01T06:00:00.000Z");
    }

    #[test]
    fn test_empty_object_gets_defaults() {
        let before = Utc::now() - chrono::Duration::seconds(1);
        let event = normalize(&json!({}));

        assert_eq!(event.id, "");
        assert_eq!(event.title, "");
        assert_eq!(event.importance, Importance::Normale);
        assert!(event.date >= before);
    }

    #[test]
    fn test_invalid_date_falls_back_to_now() {
        let before = Utc::now() - chrono::Duration::seconds(1);
        let event = normalize(&json!({"name": "Broken", "at": "not a date"}));

        assert_eq!(event.title, "Broken");
        assert!(event.date >= before);
        assert!(DateTime::parse_from_rfc3339(&event.date_iso()).is_ok());
    }

    #[test]
    fn test_non_object_payloads_never_fail() {
        for raw in [json!(null), json!(42), json!("text"), json!([1, 2])] {
            let event = normalize(&raw);
            assert_eq!(event.id, "");
            assert!(DateTime::parse_from_rfc3339(&event.date_iso()).is_ok());
        }
    }

    #[test]
    fn test_wrong_field_types_degrade_to_defaults() {
        let event = normalize(&json!({
            "id": 7,
            "title": ["x"],
            "at": {"nested": true},
            "importance": 3
        }));

        assert_eq!(event.id, "7");
        assert_eq!(event.title, "");
        assert_eq!(event.importance, Importance::Normale);
    }

    #[test]
    fn test_unknown_importance_passes_through() {
        let event = normalize(&json!({"importance": "urgent"}));
        assert_eq!(event.importance, Importance::Other("urgent".to_string()));
    }

    #[test]
    fn test_alternate_date_forms() {
        let event = normalize(&json!({"at": "2024-03-10"}));
        assert_eq!(event.date_iso(), "2024-03-10T00:00:00.000Z");

        let event = normalize(&json!({"at": "2024-03-10T09:30"}));
        assert_eq!(event.date_iso(), "2024-03-10T09:30:00.000Z");

        let event = normalize(&json!({"at": 1704103200000_i64}));
        assert_eq!(event.date_iso(), "2024-01-01T10:00:00.000Z");
    }

    #[test]
    fn test_sub_millisecond_precision_is_truncated() {
        let event = normalize(&json!({"at": "2024-01-01T10:00:00.123456Z"}));
        assert_eq!(event.date_iso(), "2024-01-01T10:00:00.123Z");
    }

    #[test]
    fn test_description_is_kept() {
        let event = normalize(&json!({"name": "Retro", "description": "Sprint 12"}));
        assert_eq!(event.description.as_deref(), Some("Sprint 12"));

        let event = normalize(&json!({"name": "Retro", "description": ""}));
        assert_eq!(event.description, None);
    }
}
