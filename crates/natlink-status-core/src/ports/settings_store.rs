//! Settings store port.
//!
//! The store is a single key-value section of a small INI file that belongs
//! to Natlink itself, distinct from Dragon's own INI files. This layer never
//! decides how the file is parsed, only which keys it reads and writes.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by a settings store implementation.
#[derive(Debug, Error)]
pub enum SettingsStoreError {
    /// The backing file exists but could not be parsed.
    #[error("Failed to parse settings file {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    /// The backing file could not be written.
    #[error("Failed to write settings file {path}: {reason}")]
    Write { path: PathBuf, reason: String },
}

/// Key-value access to the Natlink settings section.
///
/// `get` distinguishes an absent key (`None`) from a key holding the empty
/// string (`Some("")`).
pub trait SettingsStore {
    /// Read a setting.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a setting, persisting it immediately.
    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsStoreError>;

    /// Remove a setting. Removing an absent key is not an error.
    fn delete(&mut self, key: &str) -> Result<(), SettingsStoreError>;

    /// All keys currently present, in file order.
    fn keys(&self) -> Vec<String>;
}
