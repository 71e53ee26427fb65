//! Config command handler.
//!
//! Reads and writes the Natlink settings store through the status object,
//! so that changed directories are re-resolved immediately.

use std::path::PathBuf;

use anyhow::Result;
use natlink_status_core::{NatlinkStatus, keys};

use crate::bootstrap::CliContext;
use crate::config_commands::ConfigCommand;
use crate::error::CliError;
use crate::presentation::{format_optional, print_rows};

/// Execute the config command.
pub fn execute(ctx: &mut CliContext, command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Show => {
            show(ctx);
            Ok(())
        }
        ConfigCommand::Get { key } => {
            match ctx.status.settings().get(&key) {
                Some(value) => println!("{value}"),
                None => println!("{key} is not set"),
            }
            Ok(())
        }
        ConfigCommand::Set { key, value } => {
            let key = known_key(&key)?;
            ctx.status.set_setting(key, &value).map_err(CliError::from)?;
            println!("✓ {key} = {value}");
            report_resolution(&mut ctx.status, key);
            Ok(())
        }
        ConfigCommand::Unset { key } => {
            ctx.status.delete_setting(&key).map_err(CliError::from)?;
            println!("✓ {key} removed");
            Ok(())
        }
    }
}

fn show(ctx: &CliContext) {
    let settings = ctx.status.settings();
    let stored = settings.keys();
    if stored.is_empty() {
        println!("No settings stored in {}", ctx.settings_file.display());
        return;
    }
    println!("Settings in {}:", ctx.settings_file.display());
    let rows: Vec<(String, String)> = stored
        .iter()
        .map(|key| {
            let value = settings.get(key).unwrap_or_default();
            let label = if keys::SETTING_KEYS.contains(&key.as_str()) {
                key.clone()
            } else {
                format!("{key} (unused)")
            };
            (label, value)
        })
        .collect();
    print_rows(&rows);
}

/// Match a user-typed key against the known settings, ignoring case.
fn known_key(key: &str) -> Result<&'static str, CliError> {
    keys::SETTING_KEYS
        .iter()
        .find(|known| known.eq_ignore_ascii_case(key))
        .copied()
        .ok_or_else(|| {
            CliError::Arguments(format!(
                "unknown setting {key}; known settings: {}",
                keys::SETTING_KEYS.join(", ")
            ))
        })
}

/// Show what a directory setting now resolves to.
fn report_resolution(status: &mut NatlinkStatus, key: &str) {
    let resolved: Option<PathBuf> = match key {
        keys::DNS_INSTALL_DIR => status.dns_install_dir(false).ok(),
        keys::DNS_INI_DIR => status.dns_ini_dir(false).ok(),
        keys::USER_DIRECTORY => status.user_directory(false),
        keys::UNIMACRO_USER_DIRECTORY => status.unimacro_user_directory(false),
        keys::VOCOLA_USER_DIRECTORY => status.vocola_user_directory(false),
        keys::AHK_USER_DIR => status.ahk_user_dir(false),
        keys::AHK_EXE_DIR => status.ahk_exe_dir(false),
        _ => return,
    };
    print_rows(&[(
        "resolved",
        format_optional(
            resolved.as_ref().map(|dir| dir.display()),
            "(not usable, see warnings)",
        ),
    )]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_match_case_insensitively() {
        assert_eq!(
            known_key("vocolauserdirectory").unwrap(),
            keys::VOCOLA_USER_DIRECTORY
        );
    }

    #[test]
    fn unknown_keys_are_usage_errors() {
        let err = known_key("IncludeUnimacroInPythonPath").unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("known settings"));
    }
}
