//! Configuration management subcommands.

use clap::Subcommand;

/// Settings store commands.
///
/// Changing a directory setting re-resolves that directory right away, so
/// the output shows whether the new value is usable.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show every setting currently stored
    Show,
    /// Show one setting
    Get {
        /// Setting name, e.g. VocolaUserDirectory
        key: String,
    },
    /// Store a setting
    Set {
        /// Setting name, e.g. VocolaUserDirectory
        key: String,
        /// New value; paths may use ~ and %NAME% aliases
        value: String,
    },
    /// Remove a setting
    Unset {
        /// Setting name, e.g. VocolaUserDirectory
        key: String,
    },
}
