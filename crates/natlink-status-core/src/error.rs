//! Status error types.
//!
//! Only failures of the *required* resolvers (Dragon install directory,
//! version and INI directory) are errors. Optional subsystems degrade to a
//! disabled verdict plus a warning instead.

use std::path::PathBuf;

use thiserror::Error;

use crate::ports::SettingsStoreError;

/// Hard configuration errors raised while resolving required paths.
#[derive(Debug, Error)]
pub enum StatusError {
    /// A value in the settings store does not point at a valid location.
    #[error("Invalid value of {key}: \"{value}\" ({reason})")]
    InvalidOverride {
        key: String,
        value: String,
        reason: String,
    },

    /// The program files root used for auto-discovery is not a directory.
    #[error("No valid folder for program files: {0}")]
    NoProgramFilesRoot(PathBuf),

    /// None of the default install locations holds a Dragon installation.
    #[error("No valid DNSInstallDir found, tried: {}", format_tried(.tried))]
    HostNotInstalled { tried: Vec<PathBuf> },

    /// The install directory name does not end in a version number.
    #[error("Cannot derive the Dragon version from {dir}: {reason}")]
    VersionUnparseable { dir: PathBuf, reason: String },

    /// The Dragon INI files directory could not be found.
    #[error("DNSIniDir not found for version {version}, tried: {}", format_tried(.tried))]
    IniDirNotFound { version: u32, tried: Vec<PathBuf> },

    /// An earlier attempt already failed; the cached verdict is replayed.
    #[error("{0} could not be resolved earlier in this session")]
    Unresolvable(&'static str),

    /// The settings store could not be read or written.
    #[error(transparent)]
    Settings(#[from] SettingsStoreError),
}

fn format_tried(tried: &[PathBuf]) -> String {
    if tried.is_empty() {
        return "(nothing)".to_string();
    }
    tried
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
