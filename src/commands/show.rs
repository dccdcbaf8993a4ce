use anyhow::Result;
use eventdesk_core::operations::EventOperations;

use crate::render::render_detail;

pub async fn run(ops: &EventOperations, id: &str, json: bool) -> Result<()> {
    let event = ops.load_event(id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&event)?);
    } else {
        println!("{}", render_detail(&event));
    }

    Ok(())
}
