use anyhow::Result;
use eventdesk_core::operations::EventOperations;
use owo_colors::OwoColorize;

use crate::render::render_day_list;

pub async fn run(ops: &EventOperations) -> Result<()> {
    let events = ops.seed_demo_data().await?;

    println!("{}", format!("Seeded {} demo events", events.len()).green());
    println!();
    println!("{}", render_day_list(&events));

    Ok(())
}
