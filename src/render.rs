//! Terminal rendering for eventdesk types.
//!
//! Extension traits adding colored output to eventdesk-core types using owo_colors.

use chrono::{DateTime, Local, NaiveDate, Utc};
use eventdesk_core::filter::{EventFilter, ImportanceFilter};
use eventdesk_core::{Event, Importance};
use owo_colors::OwoColorize;

/// Extension trait for terminal rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Importance {
    fn render(&self) -> String {
        let label = format!("[{}]", self);
        match self {
            Importance::Basse => label.dimmed().to_string(),
            Importance::Normale => label.blue().to_string(),
            Importance::Haute => label.yellow().to_string(),
            Importance::Critique => label.red().bold().to_string(),
            Importance::Other(_) => label.magenta().to_string(),
        }
    }
}

/// One line, as shown in a day group: time, title, importance, id
impl Render for Event {
    fn render(&self) -> String {
        format!(
            "{} {} {} {}",
            format_time(&self.date),
            self.title,
            self.importance.render(),
            format!("({})", self.id).dimmed()
        )
    }
}

impl Render for EventFilter {
    fn render(&self) -> String {
        if self.is_unbounded() {
            return String::new();
        }

        let mut parts = Vec::new();
        if let Some(start) = self.start_date {
            parts.push(format!("from {}", format_day(&start)));
        }
        if let Some(end) = self.end_date {
            parts.push(format!("to {}", format_day(&end)));
        }
        if self.importance != ImportanceFilter::All {
            parts.push(format!("importance {}", self.importance));
        }
        format!("Filter: {}", parts.join(", ")).dimmed().to_string()
    }
}

/// Full detail view of a single event.
pub fn render_detail(event: &Event) -> String {
    let mut lines = vec![
        event.title.bold().to_string(),
        format!("  {}  {}", "When:".dimmed(), format_when(&event.date)),
        format!("  {}  {}", "Importance:".dimmed(), event.importance.render()),
        format!("  {}  {}", "Id:".dimmed(), event.id),
    ];
    if let Some(description) = &event.description {
        lines.push(String::new());
        lines.extend(description.lines().map(|l| format!("  {}", l)));
    }
    lines.join("\n")
}

/// Events sorted by date and grouped under a day label.
pub fn render_day_list(events: &[Event]) -> String {
    if events.is_empty() {
        return "No events found".dimmed().to_string();
    }

    let mut sorted: Vec<&Event> = events.iter().collect();
    sorted.sort_by_key(|e| e.date);

    let today = Local::now().date_naive();
    let mut lines = Vec::new();
    let mut current_day: Option<NaiveDate> = None;

    for event in sorted {
        let day = event.date.with_timezone(&Local).date_naive();

        if current_day != Some(day) {
            if current_day.is_some() {
                lines.push(String::new());
            }
            lines.push(day_label(day, today).bold().to_string());
            current_day = Some(day);
        }

        lines.push(format!("  {}", event.render()));
    }

    lines.join("\n")
}

/// "Today", "Tomorrow", "Yesterday", or e.g. "Wed Feb 25 2026"
fn day_label(day: NaiveDate, today: NaiveDate) -> String {
    match (day - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        _ => day.format("%a %b %-d %Y").to_string(),
    }
}

fn format_time(date: &DateTime<Utc>) -> String {
    format!("{:>5}", date.with_timezone(&Local).format("%H:%M"))
}

fn format_day(date: &DateTime<Utc>) -> String {
    date.with_timezone(&Local).format("%Y-%m-%d").to_string()
}

fn format_when(date: &DateTime<Utc>) -> String {
    date.with_timezone(&Local)
        .format("%a %b %-d %Y, %H:%M")
        .to_string()
}
