//! Profile command handler.

use std::path::Path;

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::presentation::print_rows;

/// Load a speech profile and print what is known about it.
pub fn execute(ctx: &mut CliContext, user: &str, profile_dir: &Path) -> Result<()> {
    let status = &mut ctx.status;
    status.set_user_info(user, profile_dir);
    let base_model = status.base_model();
    let base_topic = status.base_topic();
    let rows = [
        ("userName", status.user_name().to_string()),
        ("DNSuserDirectory", profile_dir.display().to_string()),
        ("language", status.language().to_string()),
        ("userLanguage", status.user_language().to_string()),
        ("userTopic", status.user_topic().to_string()),
        ("shiftKey", status.shift_key()),
        ("baseModel", base_model),
        ("baseTopic", base_topic),
    ];
    print_rows(&rows);
    Ok(())
}
