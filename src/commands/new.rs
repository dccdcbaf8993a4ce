use anyhow::Result;
use eventdesk_core::NewEvent;
use eventdesk_core::operations::EventOperations;
use owo_colors::OwoColorize;

use super::{parse_datetime, parse_importance};
use crate::render::Render;

pub async fn run(
    ops: &EventOperations,
    title: String,
    at: String,
    importance: Option<String>,
    description: Option<String>,
) -> Result<()> {
    if title.trim().is_empty() {
        anyhow::bail!("Title cannot be empty");
    }

    let mut draft = NewEvent::new(title, parse_datetime(&at)?);
    if let Some(importance) = importance {
        draft = draft.with_importance(parse_importance(&importance)?);
    }
    if let Some(description) = description.filter(|d| !d.is_empty()) {
        draft = draft.with_description(description);
    }

    let created = ops.create_event(draft).await?;

    println!("{}", format!("Created: {}", created.title).green());
    println!("  {}", created.render());

    Ok(())
}
