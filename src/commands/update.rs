use anyhow::Result;
use eventdesk_core::EventPatch;
use eventdesk_core::operations::EventOperations;
use owo_colors::OwoColorize;

use super::{parse_datetime, parse_importance};
use crate::render::Render;

pub async fn run(
    ops: &EventOperations,
    id: &str,
    title: Option<String>,
    at: Option<String>,
    importance: Option<String>,
    description: Option<String>,
) -> Result<()> {
    if title.as_deref().is_some_and(|t| t.trim().is_empty()) {
        anyhow::bail!("Title cannot be empty");
    }

    let patch = EventPatch {
        title,
        date: at.as_deref().map(parse_datetime).transpose()?,
        description,
        importance: importance.as_deref().map(parse_importance).transpose()?,
    };

    if patch.is_empty() {
        anyhow::bail!("Nothing to update. Pass at least one of --title, --at, --importance, --description");
    }

    let updated = ops.update_event(id, patch).await?;

    println!("{}", format!("Updated: {}", updated.title).yellow());
    println!("  {}", updated.render());

    Ok(())
}
