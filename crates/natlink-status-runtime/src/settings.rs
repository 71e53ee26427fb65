//! INI-backed settings store.
//!
//! Natlink keeps its own settings in `~/.natlink/natlinkstatus.ini`, one
//! `[usersettings]` section of `key=value` lines. Every change is written
//! back to disk before the call returns.

use std::fs;
use std::path::{Path, PathBuf};

use ini::{EscapePolicy, Ini};
use natlink_status_core::{SettingsStore, SettingsStoreError};
use tracing::{debug, info};

/// Section holding all Natlink settings.
pub const SETTINGS_SECTION: &str = "usersettings";

const SETTINGS_DIR: &str = ".natlink";
const SETTINGS_FILE: &str = "natlinkstatus.ini";

/// Settings stored in an INI file.
#[derive(Debug)]
pub struct IniSettingsStore {
    path: PathBuf,
    ini: Ini,
}

impl IniSettingsStore {
    /// Default location below the user's home directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(SETTINGS_DIR).join(SETTINGS_FILE))
    }

    /// Load the settings file; a missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SettingsStoreError> {
        let path = path.into();
        let ini = if path.is_file() {
            Ini::load_from_file_noescape(&path).map_err(|e| SettingsStoreError::Parse {
                path: path.clone(),
                reason: e.to_string(),
            })?
        } else {
            debug!("No settings file at {}, starting empty", path.display());
            Ini::new()
        };
        Ok(Self { path, ini })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), SettingsStoreError> {
        let write_error = |reason: String| SettingsStoreError::Write {
            path: self.path.clone(),
            reason,
        };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                fs::create_dir_all(parent).map_err(|e| write_error(e.to_string()))?;
                info!("Created settings directory {}", parent.display());
            }
        }
        self.ini
            .write_to_file_policy(&self.path, EscapePolicy::Nothing)
            .map_err(|e| write_error(e.to_string()))
    }
}

impl SettingsStore for IniSettingsStore {
    fn get(&self, key: &str) -> Option<String> {
        self.ini
            .get_from(Some(SETTINGS_SECTION), key)
            .map(str::to_string)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsStoreError> {
        self.ini
            .set_to(Some(SETTINGS_SECTION), key.to_string(), value.to_string());
        debug!("Setting {key} = {value}");
        self.save()
    }

    fn delete(&mut self, key: &str) -> Result<(), SettingsStoreError> {
        if self.ini.delete_from(Some(SETTINGS_SECTION), key).is_none() {
            return Ok(());
        }
        debug!("Deleted setting {key}");
        self.save()
    }

    fn keys(&self) -> Vec<String> {
        self.ini
            .section(Some(SETTINGS_SECTION))
            .map(|props| props.iter().map(|(k, _)| k.to_string()).collect())
            .unwrap_or_default()
    }
}
