//! Status command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;

/// Print the grouped status report, or the full snapshot as JSON.
pub fn execute(ctx: &mut CliContext, json: bool) -> Result<()> {
    if json {
        let snapshot = ctx.status.snapshot();
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("{}", ctx.status.status_report());
    }
    Ok(())
}
