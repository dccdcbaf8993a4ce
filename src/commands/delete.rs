use anyhow::Result;
use eventdesk_core::operations::EventOperations;
use owo_colors::OwoColorize;

pub async fn run(ops: &EventOperations, id: &str) -> Result<()> {
    let title = ops
        .state()
        .events
        .iter()
        .find(|e| e.id == id)
        .map(|e| e.title.clone());

    ops.delete_event(id).await?;

    let label = title.unwrap_or_else(|| id.to_string());
    println!("{}", format!("Deleted: {}", label).red());

    Ok(())
}
