//! Paths command handler.
//!
//! Displays every resolved directory for diagnosing path resolution.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::presentation::print_rows;

/// Print the settings file, all directory fields and the search path,
/// followed by any warnings on stderr.
pub fn execute(ctx: &mut CliContext) -> Result<()> {
    let snapshot = ctx.status.snapshot();
    let mut rows = vec![(
        "SettingsFile".to_string(),
        ctx.settings_file.display().to_string(),
    )];
    rows.extend(
        snapshot
            .iter()
            .filter(|(field, _)| field.is_directory())
            .map(|(field, value)| {
                let shown = if value.is_empty() {
                    "-".to_string()
                } else {
                    value.to_string()
                };
                (field.key().to_string(), shown)
            }),
    );
    for (i, dir) in ctx.status.search_path().iter().enumerate() {
        rows.push((format!("SearchPath[{i}]"), dir.display().to_string()));
    }
    print_rows(&rows);

    let warnings = ctx.status.warning_text();
    if !warnings.is_empty() {
        eprintln!("\n{warnings}");
    }
    Ok(())
}
