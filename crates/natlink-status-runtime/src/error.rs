//! Errors raised while wiring the runtime adapters together.

use natlink_status_core::SettingsStoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    /// No settings file was given and the home directory is unknown.
    #[error("Cannot locate the settings file: no home directory")]
    NoHomeDirectory,

    #[error(transparent)]
    Settings(#[from] SettingsStoreError),

    #[error("Invalid alias pattern: {0}")]
    AliasPattern(#[from] regex::Error),
}
