use anyhow::Result;
use eventdesk_core::operations::EventOperations;

use super::parse_filter;
use crate::render::{Render, render_day_list};

pub fn run(
    ops: &EventOperations,
    from: Option<String>,
    to: Option<String>,
    importance: Option<String>,
    json: bool,
) -> Result<()> {
    let filter = parse_filter(from.as_deref(), to.as_deref(), importance.as_deref())?;
    ops.update_filters(filter);

    let state = ops.state();

    if json {
        println!("{}", serde_json::to_string_pretty(&state.filtered_events)?);
        return Ok(());
    }

    let filter_line = state.filter.render();
    if !filter_line.is_empty() {
        println!("{}\n", filter_line);
    }
    println!("{}", render_day_list(&state.filtered_events));

    Ok(())
}
