//! Filter definition and evaluation for event lists.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::event::{Event, Importance};

/// Date range + importance predicate applied to the event collection.
/// `None` bounds mean unbounded in that direction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventFilter {
    /// Inclusive lower bound
    pub start_date: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the exact instant given. An end bound at
    /// midnight excludes the rest of that day; use [`EventFilter::from_args`]
    /// or an end-of-day instant for whole days.
    pub end_date: Option<DateTime<Utc>>,
    pub importance: ImportanceFilter,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ImportanceFilter {
    #[default]
    All,
    Only(Importance),
}

impl FromStr for ImportanceFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "all" => Ok(ImportanceFilter::All),
            other => other.parse().map(ImportanceFilter::Only),
        }
    }
}

impl fmt::Display for ImportanceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportanceFilter::All => write!(f, "all"),
            ImportanceFilter::Only(importance) => write!(f, "{}", importance),
        }
    }
}

impl EventFilter {
    /// Parse command-line style bounds, reading bare days as UTC days.
    /// - `from`: YYYY-MM-DD (start of day) or RFC 3339
    /// - `to`: YYYY-MM-DD (end of day) or RFC 3339
    /// - `importance`: a known level or "all"
    pub fn from_args(
        from: Option<&str>,
        to: Option<&str>,
        importance: Option<&str>,
    ) -> Result<Self, String> {
        Self::from_args_in(from, to, importance, &Utc)
    }

    /// Like [`EventFilter::from_args`], with bare days taken as days in `tz`.
    pub fn from_args_in<Tz: TimeZone>(
        from: Option<&str>,
        to: Option<&str>,
        importance: Option<&str>,
        tz: &Tz,
    ) -> Result<Self, String> {
        Ok(EventFilter {
            start_date: from.map(|s| parse_bound_start(s, tz)).transpose()?,
            end_date: to.map(|s| parse_bound_end(s, tz)).transpose()?,
            importance: importance
                .map(str::parse::<ImportanceFilter>)
                .transpose()?
                .unwrap_or_default(),
        })
    }

    pub fn is_unbounded(&self) -> bool {
        self.start_date.is_none()
            && self.end_date.is_none()
            && self.importance == ImportanceFilter::All
    }

    /// Whether `event` passes every clause of the filter.
    pub fn matches(&self, event: &Event) -> bool {
        if self.start_date.is_some_and(|start| event.date < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| event.date > end) {
            return false;
        }
        match &self.importance {
            ImportanceFilter::All => true,
            ImportanceFilter::Only(importance) => &event.importance == importance,
        }
    }
}

/// Keep the events matching `filter`, preserving their order.
pub fn apply(events: &[Event], filter: &EventFilter) -> Vec<Event> {
    events
        .iter()
        .filter(|event| filter.matches(event))
        .cloned()
        .collect()
}

/// Parse YYYY-MM-DD as start of that day in `tz`, or a full RFC 3339 instant
fn parse_bound_start<Tz: TimeZone>(s: &str, tz: &Tz) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    start_of_day(parse_day(s)?, tz)
}

/// Parse YYYY-MM-DD as the last millisecond of that day in `tz`, or a full RFC 3339 instant
fn parse_bound_end<Tz: TimeZone>(s: &str, tz: &Tz) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    let day = parse_day(s)?;
    let next = day
        .succ_opt()
        .ok_or_else(|| format!("Date out of range: '{}'", s))?;
    Ok(start_of_day(next, tz)? - Duration::milliseconds(1))
}

/// First instant of `day` in `tz`. Days starting inside a DST gap begin at the
/// end of the gap.
fn start_of_day<Tz: TimeZone>(day: NaiveDate, tz: &Tz) -> Result<DateTime<Utc>, String> {
    (0..=2)
        .filter_map(|hour| NaiveTime::from_hms_opt(hour, 0, 0))
        .find_map(|time| tz.from_local_datetime(&day.and_time(time)).earliest())
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| format!("{} has no start of day in this time zone", day))
}

fn parse_day(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date format '{}'. Expected YYYY-MM-DD", s))
}
