//! `%NAME%` and `~` expansion against well-known folders.

use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};

use natlink_status_core::PathAliasExpander;
use regex::{Captures, Regex};
use tracing::debug;

const TOKEN_PATTERN: &str = r"%([A-Za-z_][A-Za-z0-9_()]*)%";

/// Expands path aliases found in settings values.
///
/// Tokens are matched case-insensitively. A token with no known folder is
/// left in the value unchanged.
#[derive(Debug, Clone)]
pub struct KnownFolderExpander {
    token: Regex,
    home: Option<PathBuf>,
    folders: BTreeMap<String, PathBuf>,
}

impl KnownFolderExpander {
    /// An expander that knows no folders at all.
    pub fn empty() -> Result<Self, regex::Error> {
        Ok(Self {
            token: Regex::new(TOKEN_PATTERN)?,
            home: None,
            folders: BTreeMap::new(),
        })
    }

    /// Folders of the current user and machine.
    pub fn from_environment() -> Result<Self, regex::Error> {
        let mut expander = Self::empty()?;
        expander.home = dirs::home_dir();

        let program_files = env::var_os("ProgramFiles(x86)").or_else(|| env::var_os("ProgramFiles"));
        if let Some(dir) = program_files {
            expander.insert("PROGRAM_FILESX86", PathBuf::from(dir));
        }
        if let Some(dir) = env::var_os("ALLUSERSPROFILE") {
            expander.insert("ALLUSERSPROFILE", PathBuf::from(dir));
        }
        if let Some(home) = expander.home.clone() {
            expander.insert("HOME", home);
        }
        if let Some(dir) = dirs::config_dir() {
            expander.insert("APPDATA", dir);
        }
        if let Some(dir) = dirs::data_local_dir() {
            expander.insert("LOCALAPPDATA", dir);
        }
        if let Some(dir) = dirs::document_dir() {
            expander.insert("PERSONAL", dir);
        }
        debug!("Known folders: {:?}", expander.folders.keys().collect::<Vec<_>>());
        Ok(expander)
    }

    /// Add or replace a folder, e.g. one of the status directory aliases.
    #[must_use]
    pub fn with_alias(mut self, name: &str, dir: impl AsRef<Path>) -> Self {
        self.insert(name, dir.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn with_home(mut self, dir: impl AsRef<Path>) -> Self {
        self.home = Some(dir.as_ref().to_path_buf());
        self
    }

    fn insert(&mut self, name: &str, dir: PathBuf) {
        self.folders.insert(name.to_ascii_uppercase(), dir);
    }

    fn expand_home(&self, spec: &str) -> Option<String> {
        let home = self.home.as_ref()?;
        let rest = spec.strip_prefix('~')?;
        if !(rest.is_empty() || rest.starts_with(['/', '\\'])) {
            return None;
        }
        Some(format!("{}{rest}", home.display()))
    }
}

impl PathAliasExpander for KnownFolderExpander {
    fn expand(&self, spec: &str) -> String {
        let spec = self.expand_home(spec).unwrap_or_else(|| spec.to_string());
        self.token
            .replace_all(&spec, |caps: &Captures<'_>| {
                self.folders.get(&caps[1].to_ascii_uppercase()).map_or_else(
                    || caps[0].to_string(),
                    |dir| dir.to_string_lossy().into_owned(),
                )
            })
            .into_owned()
    }
}
