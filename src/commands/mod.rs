pub mod config;
pub mod delete;
pub mod list;
pub mod new;
pub mod seed;
pub mod show;
pub mod update;

use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use eventdesk_core::Importance;
use eventdesk_core::filter::EventFilter;
use eventdesk_core::operations::EventOperations;
use owo_colors::OwoColorize;

/// Initial load shared by the commands that work on the collection.
/// A failed load leaves the store empty and is reported, not raised.
pub async fn mount(ops: &EventOperations) {
    ops.fetch_events().await;
    report_error(ops);
}

/// Print the facade's current error, if any.
pub fn report_error(ops: &EventOperations) {
    if let Some(message) = ops.error() {
        eprintln!("{}", message.red());
    }
}

/// Parse a user-supplied date/time.
///
/// Accepts RFC 3339, or "YYYY-MM-DDTHH:MM", "YYYY-MM-DD HH:MM" and
/// "YYYY-MM-DD" in local time.
pub fn parse_datetime(input: &str) -> Result<DateTime<Utc>> {
    parse_datetime_in(input, &Local)
}

/// [`parse_datetime`] with naive input read in `tz`.
pub fn parse_datetime_in<Tz: TimeZone>(input: &str, tz: &Tz) -> Result<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN))
        })
        .ok_or_else(|| anyhow::anyhow!("Could not parse date/time: \"{}\"", input))?;

    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| anyhow::anyhow!("\"{}\" does not exist in the local time zone", input))
}

/// List filter from command-line bounds, with bare days read as local days.
pub fn parse_filter(
    from: Option<&str>,
    to: Option<&str>,
    importance: Option<&str>,
) -> Result<EventFilter> {
    EventFilter::from_args_in(from, to, importance, &Local).map_err(|e| anyhow::anyhow!(e))
}

pub fn parse_importance(input: &str) -> Result<Importance> {
    input.parse::<Importance>().map_err(|e| anyhow::anyhow!(e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, FixedOffset, Timelike};
    use eventdesk_core::Event;
    use eventdesk_core::filter;

    #[test]
    fn parse_datetime_rfc3339() {
        let dt = parse_datetime("2025-03-20T15:00:00Z").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2025, 3, 20, 15, 0, 0).unwrap());
    }

    #[test]
    fn parse_datetime_local_minutes() {
        let dt = parse_datetime("2025-03-20T15:00").unwrap();
        let local = dt.with_timezone(&Local);
        assert_eq!((local.hour(), local.minute()), (15, 0));
        assert_eq!(local.day(), 20);

        assert_eq!(parse_datetime("2025-03-20 15:00").unwrap(), dt);
    }

    #[test]
    fn parse_datetime_date_only_is_local_midnight() {
        let local = parse_datetime("2025-03-20").unwrap().with_timezone(&Local);
        assert_eq!((local.month(), local.day()), (3, 20));
        assert_eq!((local.hour(), local.minute()), (0, 0));
    }

    #[test]
    fn parse_datetime_invalid_input() {
        assert!(parse_datetime("next friday").is_err());
        assert!(parse_datetime("").is_err());
    }

    #[test]
    fn created_event_matches_its_own_day() {
        let paris = FixedOffset::east_opt(3600).unwrap();
        let event = Event {
            id: "1".to_string(),
            title: "Late show".to_string(),
            date: parse_datetime_in("2025-03-20T00:30", &paris).unwrap(),
            description: None,
            importance: Importance::Normale,
        };
        assert_eq!(event.date, Utc.with_ymd_and_hms(2025, 3, 19, 23, 30, 0).unwrap());
        assert_eq!(
            event.date.with_timezone(&paris).date_naive(),
            NaiveDate::from_ymd_opt(2025, 3, 20).unwrap()
        );

        let same_day =
            EventFilter::from_args_in(Some("2025-03-20"), Some("2025-03-20"), None, &paris)
                .unwrap();
        assert_eq!(filter::apply(&[event.clone()], &same_day), vec![event.clone()]);

        let previous_day =
            EventFilter::from_args_in(Some("2025-03-19"), Some("2025-03-19"), None, &paris)
                .unwrap();
        assert!(filter::apply(&[event], &previous_day).is_empty());
    }

    #[test]
    fn parse_filter_reads_local_days() {
        let filter = parse_filter(Some("2025-03-20"), Some("2025-03-20"), Some("haute")).unwrap();
        let start = filter.start_date.unwrap().with_timezone(&Local);
        let end = filter.end_date.unwrap().with_timezone(&Local);

        assert_eq!(start.date_naive(), NaiveDate::from_ymd_opt(2025, 3, 20).unwrap());
        assert_eq!(end.date_naive(), start.date_naive());
        assert_eq!((end.hour(), end.minute()), (23, 59));
        assert!(parse_filter(Some("20/03/2025"), None, None).is_err());
    }

    #[test]
    fn parse_importance_is_strict() {
        assert_eq!(parse_importance("haute").unwrap(), Importance::Haute);
        assert!(parse_importance("urgent").is_err());
    }
}
