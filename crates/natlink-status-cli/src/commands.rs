//! Main commands enum and primary subcommands.

use std::path::PathBuf;

use clap::Subcommand;

use crate::config_commands::ConfigCommand;

/// Available commands of the Natlink status tool.
#[derive(Subcommand)]
pub enum Commands {
    /// Show the full status report (the default command)
    Status {
        /// Print the status as JSON instead of grouped text
        #[arg(long)]
        json: bool,
    },

    /// Show resolved directories and where the settings are read from
    Paths,

    /// Show the %NAME% path aliases derived from the resolved directories
    Aliases,

    /// View or change Natlink settings
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Show language and topic information of a Dragon speech profile
    Profile {
        /// Name of the speech profile
        user: String,
        /// Directory Dragon keeps the profile in
        profile_dir: PathBuf,
    },
}
