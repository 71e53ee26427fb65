//! Aliases command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::presentation::print_rows;

/// Print the `%NAME%` aliases of all existing status directories.
pub fn execute(ctx: &mut CliContext) -> Result<()> {
    let rows: Vec<(String, String)> = ctx
        .status
        .path_aliases()
        .into_iter()
        .map(|(name, dir)| (format!("%{name}%"), dir.display().to_string()))
        .collect();
    if rows.is_empty() {
        println!("No resolved directories to alias.");
    } else {
        print_rows(&rows);
    }
    Ok(())
}
