//! Optional resolvers: user, Vocola, Unimacro and AutoHotkey directories.
//!
//! None of these fail hard. A directory that cannot be resolved is cached as
//! [`CacheSlot::Invalid`](crate::CacheSlot::Invalid) and, where the user
//! configured something wrong, a warning is recorded.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::{NatlinkStatus, keys};
use crate::paths::{PathKind, normalize_path, validate_setting_path};

/// File that marks the Vocola library directory.
pub const VOCOLA_MARKER: &str = "_vocola_main.py";

/// File that marks the Unimacro library directory.
pub const UNIMACRO_MARKER: &str = "_control.py";

/// Vocola's compiled grammars, below the Vocola user directory.
pub const VOCOLA_GRAMMARS_SUBDIR: &str = "CompiledGrammars";

/// Unimacro's active grammars, below the Unimacro user directory.
pub const UNIMACRO_GRAMMARS_SUBDIR: &str = "ActiveGrammars";

/// The optional directories a status object caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionalDir {
    User,
    UnimacroUser,
    Unimacro,
    UnimacroGrammars,
    VocolaUser,
    Vocola,
    VocolaGrammars,
    AhkUser,
    AhkExe,
}

/// A grammar library shipped next to Natlink or installed on the search path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Library {
    Vocola,
    Unimacro,
}

impl Library {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Vocola => "Vocola",
            Self::Unimacro => "Unimacro",
        }
    }

    pub const fn marker(self) -> &'static str {
        match self {
            Self::Vocola => VOCOLA_MARKER,
            Self::Unimacro => UNIMACRO_MARKER,
        }
    }

    /// Checkout locations relative to the parent of the Natlink directory.
    const fn checkouts(self) -> &'static [&'static [&'static str]] {
        match self {
            Self::Vocola => &[
                &["Vocola", "src", "vocola2"],
                &["Vocola2", "src", "vocola2"],
            ],
            Self::Unimacro => &[&["Unimacro", "src", "unimacro"]],
        }
    }

    const fn slot(self) -> OptionalDir {
        match self {
            Self::Vocola => OptionalDir::Vocola,
            Self::Unimacro => OptionalDir::Unimacro,
        }
    }
}

impl NatlinkStatus {
    /// Directory with the user's own Natlink grammars (`UserDirectory`).
    pub fn user_directory(&mut self, force: bool) -> Option<PathBuf> {
        self.setting_directory(OptionalDir::User, keys::USER_DIRECTORY, force)
    }

    /// Directory with the user's Unimacro ini files (`UnimacroUserDirectory`).
    pub fn unimacro_user_directory(&mut self, force: bool) -> Option<PathBuf> {
        self.setting_directory(OptionalDir::UnimacroUser, keys::UNIMACRO_USER_DIRECTORY, force)
    }

    /// Directory with the user's Vocola command files (`VocolaUserDirectory`).
    pub fn vocola_user_directory(&mut self, force: bool) -> Option<PathBuf> {
        self.setting_directory(OptionalDir::VocolaUser, keys::VOCOLA_USER_DIRECTORY, force)
    }

    pub fn ahk_user_dir(&mut self, force: bool) -> Option<PathBuf> {
        self.setting_directory(OptionalDir::AhkUser, keys::AHK_USER_DIR, force)
    }

    pub fn ahk_exe_dir(&mut self, force: bool) -> Option<PathBuf> {
        self.setting_directory(OptionalDir::AhkExe, keys::AHK_EXE_DIR, force)
    }

    /// The Unimacro library, holding `_control.py`.
    pub fn unimacro_directory(&mut self, force: bool) -> Option<PathBuf> {
        self.library_directory(Library::Unimacro, force)
    }

    /// The Vocola library, holding `_vocola_main.py`.
    pub fn vocola_directory(&mut self, force: bool) -> Option<PathBuf> {
        self.library_directory(Library::Vocola, force)
    }

    /// `ActiveGrammars` below the Unimacro user directory, created when missing.
    pub fn unimacro_grammars_directory(&mut self, force: bool) -> Option<PathBuf> {
        if let Some(cached) = self.cached_dir(OptionalDir::UnimacroGrammars, force) {
            return cached;
        }
        let resolved = self
            .unimacro_user_directory(false)
            .and_then(|user| self.working_directory(&user, UNIMACRO_GRAMMARS_SUBDIR));
        if let Some(dir) = &resolved {
            let has_grammars = self
                .fs
                .list_dir(dir)
                .map(|names| names.iter().any(|n| n.ends_with(".py")))
                .unwrap_or(false);
            if !has_grammars {
                info!(
                    "{} has no Python grammar files yet; copy the Unimacro grammars you want to use into it",
                    dir.display()
                );
            }
        }
        self.store_dir(OptionalDir::UnimacroGrammars, resolved)
    }

    /// `CompiledGrammars` below the Vocola user directory, created when missing.
    pub fn vocola_grammars_directory(&mut self, force: bool) -> Option<PathBuf> {
        if let Some(cached) = self.cached_dir(OptionalDir::VocolaGrammars, force) {
            return cached;
        }
        let resolved = self
            .vocola_user_directory(false)
            .and_then(|user| self.working_directory(&user, VOCOLA_GRAMMARS_SUBDIR));
        self.store_dir(OptionalDir::VocolaGrammars, resolved)
    }

    /// Candidate checkout directories of a library, in probe order.
    pub fn library_candidates(&self, library: Library) -> Vec<PathBuf> {
        let parent = self.natlink_directory.join("..");
        library
            .checkouts()
            .iter()
            .map(|parts| normalize_path(&parts.iter().fold(parent.clone(), |acc, p| acc.join(p))))
            .collect()
    }

    /// Editor for Unimacro ini files; empty unless Unimacro is enabled.
    pub fn unimacro_ini_files_editor(&mut self) -> String {
        if !self.unimacro_is_enabled().is_enabled() {
            return String::new();
        }
        self.settings
            .get(keys::UNIMACRO_INI_FILES_EDITOR)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "notepad".to_string())
    }

    /// Only reported while Vocola is enabled.
    pub fn vocola_takes_languages(&mut self) -> Option<String> {
        self.vocola_option(keys::VOCOLA_TAKES_LANGUAGES)
    }

    /// Only reported while Vocola is enabled.
    pub fn vocola_takes_unimacro_actions(&mut self) -> Option<String> {
        self.vocola_option(keys::VOCOLA_TAKES_UNIMACRO_ACTIONS)
    }

    fn vocola_option(&mut self, key: &str) -> Option<String> {
        if self.vocola_is_enabled().is_enabled() {
            self.settings.get(key)
        } else {
            None
        }
    }

    pub fn debug_load(&self) -> Option<String> {
        self.settings.get(keys::DEBUG_LOAD)
    }

    pub fn debug_callback(&self) -> Option<String> {
        self.settings.get(keys::DEBUG_CALLBACK)
    }

    pub fn natlink_pyd_registered(&self) -> Option<String> {
        self.settings.get(keys::PYD_REGISTERED)
    }

    /// Cached value of `dir`, or `None` when it still has to be resolved.
    fn cached_dir(&mut self, dir: OptionalDir, force: bool) -> Option<Option<PathBuf>> {
        if force {
            self.dirs.slot(dir).invalidate();
        }
        let slot = self.dirs.get(dir);
        slot.is_settled().then(|| slot.cloned())
    }

    fn store_dir(&mut self, dir: OptionalDir, resolved: Option<PathBuf>) -> Option<PathBuf> {
        *self.dirs.slot(dir) = resolved.clone().into();
        resolved
    }

    /// Resolve a directory that is only ever configured in the settings store.
    fn setting_directory(
        &mut self,
        dir: OptionalDir,
        key: &'static str,
        force: bool,
    ) -> Option<PathBuf> {
        if let Some(cached) = self.cached_dir(dir, force) {
            return cached;
        }
        let resolved = match self.settings.get(key) {
            Some(raw) if !raw.trim().is_empty() => {
                match validate_setting_path(
                    self.fs.as_ref(),
                    self.aliases.as_ref(),
                    &raw,
                    PathKind::Directory,
                ) {
                    Ok(path) => Some(path),
                    Err(rejection) => {
                        self.warnings
                            .push(format!("invalid path for {key}: \"{raw}\" ({rejection})"));
                        None
                    }
                }
            }
            _ => None,
        };
        self.store_dir(dir, resolved)
    }

    fn library_directory(&mut self, library: Library, force: bool) -> Option<PathBuf> {
        let dir = library.slot();
        if let Some(cached) = self.cached_dir(dir, force) {
            return cached;
        }
        let found = self.find_library(library);
        if let Some(found) = &found {
            self.add_to_search_path(found);
        }
        self.store_dir(dir, found)
    }

    fn find_library(&self, library: Library) -> Option<PathBuf> {
        let marker = library.marker();
        for candidate in self.library_candidates(library) {
            if self.fs.is_dir(&candidate) && self.fs.is_file(&candidate.join(marker)) {
                debug!("{} library at {}", library.name(), candidate.display());
                return Some(candidate);
            }
        }
        debug!(
            "{} not found next to {}, scanning the search path",
            library.name(),
            self.natlink_directory.display()
        );
        self.search_path
            .iter()
            .find(|dir| self.fs.is_file(&dir.join(marker)))
            .map(|dir| normalize_path(dir))
    }

    /// Make sure `parent/name` exists as a directory.
    fn working_directory(&mut self, parent: &Path, name: &str) -> Option<PathBuf> {
        let dir = parent.join(name);
        if !self.fs.exists(&dir) {
            match self.fs.create_dir(&dir) {
                Ok(()) => info!("Created {}", dir.display()),
                Err(err) => {
                    self.warnings
                        .push(format!("Could not create {}: {err}", dir.display()));
                    return None;
                }
            }
        }
        self.fs.is_dir(&dir).then_some(dir)
    }
}
