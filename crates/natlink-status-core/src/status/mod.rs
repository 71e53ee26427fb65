//! The Natlink status object.
//!
//! [`NatlinkStatus`] owns the collaborator ports and one cache slot per
//! resolvable path. The resolvers live in sibling modules:
//!
//! - `host` - Dragon install directory, version and INI directory (required)
//! - `subsystems` - user, Vocola, Unimacro and AutoHotkey directories (optional)
//! - `enablement` - the Natlink/Vocola/Unimacro/user-grammar verdicts
//! - `user` - information about the currently open speech profile
//!
//! The three required values are resolved eagerly in [`NatlinkStatus::new`];
//! everything else is resolved lazily on first use and memoized until a
//! `force` refresh.

mod enablement;
mod host;
pub mod keys;
mod subsystems;
mod user;

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::cache::{CacheSlot, Enablement, ResolvedPath};
use crate::diagnostics::Warnings;
use crate::error::StatusError;
use crate::paths::{normalize_path, paths_equal_ignore_case};
use crate::ports::{
    FileSystemProbe, IniReader, PathAliasExpander, RegistryProbe, SettingsStore, SystemInfoProbe,
};

pub use enablement::{
    APP_KEY, APP_SECTION, NATLINK_CLSID, NATLINK_MAIN, NATLINK_PACKAGE, NSAPPS_INI, NSSYSTEM_INI,
    SYSTEM_KEY, SYSTEM_SECTION, SYSTEM_VALUE, integration_verdict,
};
pub use host::{PROGRAM_FILES_ALIAS, SHARED_DATA_ALIAS};
pub use subsystems::{
    Library, OptionalDir, UNIMACRO_GRAMMARS_SUBDIR, UNIMACRO_MARKER, VOCOLA_GRAMMARS_SUBDIR,
    VOCOLA_MARKER,
};
pub use user::{NO_PROFILE_LANGUAGE, UserInfo, language_code, shift_key_for};

/// Collaborators and anchor directories a status object is built from.
pub struct StatusContext {
    pub settings: Box<dyn SettingsStore>,
    pub fs: Box<dyn FileSystemProbe>,
    pub registry: Box<dyn RegistryProbe>,
    pub aliases: Box<dyn PathAliasExpander>,
    pub ini: Box<dyn IniReader>,
    pub system: Box<dyn SystemInfoProbe>,
    /// Directory holding the Natlink core library (`MacroSystem/core`).
    pub core_directory: PathBuf,
    /// Module search path scanned for subsystem libraries.
    pub search_path: Vec<PathBuf>,
}

/// Cache slots of the optional directories.
#[derive(Debug, Default)]
struct DirectoryCache {
    user: ResolvedPath,
    unimacro_user: ResolvedPath,
    unimacro: ResolvedPath,
    unimacro_grammars: ResolvedPath,
    vocola_user: ResolvedPath,
    vocola: ResolvedPath,
    vocola_grammars: ResolvedPath,
    ahk_user: ResolvedPath,
    ahk_exe: ResolvedPath,
}

impl DirectoryCache {
    const fn get(&self, dir: OptionalDir) -> &ResolvedPath {
        match dir {
            OptionalDir::User => &self.user,
            OptionalDir::UnimacroUser => &self.unimacro_user,
            OptionalDir::Unimacro => &self.unimacro,
            OptionalDir::UnimacroGrammars => &self.unimacro_grammars,
            OptionalDir::VocolaUser => &self.vocola_user,
            OptionalDir::Vocola => &self.vocola,
            OptionalDir::VocolaGrammars => &self.vocola_grammars,
            OptionalDir::AhkUser => &self.ahk_user,
            OptionalDir::AhkExe => &self.ahk_exe,
        }
    }

    const fn slot(&mut self, dir: OptionalDir) -> &mut ResolvedPath {
        match dir {
            OptionalDir::User => &mut self.user,
            OptionalDir::UnimacroUser => &mut self.unimacro_user,
            OptionalDir::Unimacro => &mut self.unimacro,
            OptionalDir::UnimacroGrammars => &mut self.unimacro_grammars,
            OptionalDir::VocolaUser => &mut self.vocola_user,
            OptionalDir::Vocola => &mut self.vocola,
            OptionalDir::VocolaGrammars => &mut self.vocola_grammars,
            OptionalDir::AhkUser => &mut self.ahk_user,
            OptionalDir::AhkExe => &mut self.ahk_exe,
        }
    }
}

/// Installation and configuration status of Natlink and its subsystems.
pub struct NatlinkStatus {
    settings: Box<dyn SettingsStore>,
    fs: Box<dyn FileSystemProbe>,
    registry: Box<dyn RegistryProbe>,
    aliases: Box<dyn PathAliasExpander>,
    ini: Box<dyn IniReader>,
    system: Box<dyn SystemInfoProbe>,

    core_directory: PathBuf,
    base_directory: PathBuf,
    natlink_directory: PathBuf,
    search_path: Vec<PathBuf>,

    dns_install_dir: ResolvedPath,
    dns_version: CacheSlot<u32>,
    dns_ini_dir: ResolvedPath,
    construction_error: Option<StatusError>,

    dirs: DirectoryCache,
    natlink_enabled: Option<Enablement>,
    user_info: Option<UserInfo>,
    warnings: Warnings,
}

impl NatlinkStatus {
    /// Build a status object and eagerly resolve the Dragon install
    /// directory, version and INI directory.
    ///
    /// A failure of one of those is recorded (see
    /// [`construction_error`](Self::construction_error)) and the remaining
    /// required values are marked invalid without further probing. Legacy
    /// settings are migrated afterwards.
    pub fn new(context: StatusContext) -> Self {
        let mut status = Self::unresolved(context);
        if let Err(err) = status.resolve_required() {
            status.warnings.push(err.to_string());
            status.mark_required_invalid();
            status.construction_error = Some(err);
        }
        status.migrate_legacy_settings();
        status
    }

    /// Like [`new`](Self::new), but fail when a required value cannot be resolved.
    pub fn try_new(context: StatusContext) -> Result<Self, StatusError> {
        let mut status = Self::new(context);
        match status.construction_error.take() {
            Some(err) => Err(err),
            None => Ok(status),
        }
    }

    fn unresolved(context: StatusContext) -> Self {
        let core_directory = normalize_path(&context.core_directory);
        let base_directory = normalize_path(&core_directory.join(".."));
        let natlink_directory = normalize_path(&core_directory.join("..").join(".."));
        Self {
            settings: context.settings,
            fs: context.fs,
            registry: context.registry,
            aliases: context.aliases,
            ini: context.ini,
            system: context.system,
            core_directory,
            base_directory,
            natlink_directory,
            search_path: context.search_path,
            dns_install_dir: CacheSlot::Unresolved,
            dns_version: CacheSlot::Unresolved,
            dns_ini_dir: CacheSlot::Unresolved,
            construction_error: None,
            dirs: DirectoryCache::default(),
            natlink_enabled: None,
            user_info: None,
            warnings: Warnings::new(),
        }
    }

    fn resolve_required(&mut self) -> Result<(), StatusError> {
        self.dns_install_dir(false)?;
        self.dns_version()?;
        self.dns_ini_dir(false)?;
        Ok(())
    }

    fn mark_required_invalid(&mut self) {
        for slot in [&mut self.dns_install_dir, &mut self.dns_ini_dir] {
            if !slot.is_settled() {
                *slot = CacheSlot::Invalid;
            }
        }
        if !self.dns_version.is_settled() {
            self.dns_version = CacheSlot::Invalid;
        }
    }

    /// The hard error hit while constructing this object, if any.
    pub const fn construction_error(&self) -> Option<&StatusError> {
        self.construction_error.as_ref()
    }

    /// Bring settings written by older Natlink versions up to date.
    fn migrate_legacy_settings(&mut self) {
        if let Err(err) = self.try_migrate_legacy_settings() {
            self.warnings
                .push(format!("Could not migrate legacy settings: {err}"));
        }
    }

    fn try_migrate_legacy_settings(&mut self) -> Result<(), StatusError> {
        let old = self.settings.get(keys::LEGACY_DLL_REGISTERED);
        let new = self.settings.get(keys::PYD_REGISTERED);
        if let Some(old) = old.filter(|v| !v.is_empty()) {
            if new.is_none_or(|v| v.is_empty()) {
                let mut value = old;
                if value.chars().count() <= 2 {
                    if let Some(version) = self.dns_version.cloned().filter(|v| *v <= 11) {
                        value = format!("{value};{version}");
                    }
                }
                info!(
                    "Renaming setting {} to {}",
                    keys::LEGACY_DLL_REGISTERED,
                    keys::PYD_REGISTERED
                );
                self.settings.set(keys::PYD_REGISTERED, &value)?;
                self.settings.delete(keys::LEGACY_DLL_REGISTERED)?;
            }
        }

        if let Some(user_dir) = self.settings.get(keys::USER_DIRECTORY) {
            if user_dir.find("Unimacro").is_some_and(|pos| pos > 0) {
                info!("Removing {} that points into Unimacro", keys::USER_DIRECTORY);
                self.settings.delete(keys::USER_DIRECTORY)?;
            }
        }

        if self.settings.get(keys::LEGACY_INCLUDE_UNIMACRO).is_some() {
            self.settings.delete(keys::LEGACY_INCLUDE_UNIMACRO)?;
        }
        Ok(())
    }

    /// Directory of the Natlink core library.
    pub fn core_directory(&self) -> &Path {
        &self.core_directory
    }

    /// One level above the core directory (`MacroSystem`).
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Two levels above the core directory; subsystem checkouts sit next to it.
    pub fn natlink_directory(&self) -> &Path {
        &self.natlink_directory
    }

    /// Module search path, including library directories found so far.
    pub fn search_path(&self) -> &[PathBuf] {
        &self.search_path
    }

    /// Append a directory to the module search path unless already present.
    pub fn add_to_search_path(&mut self, dir: &Path) {
        if !self.fs.is_dir(dir) {
            self.warnings.push(format!(
                "Not adding {} to the search path: not an existing directory",
                dir.display()
            ));
            return;
        }
        let dir = normalize_path(dir);
        if self.search_path.iter().any(|p| paths_equal_ignore_case(p, &dir)) {
            return;
        }
        debug!("Adding {} to the search path", dir.display());
        self.search_path.push(dir);
    }

    pub fn warnings(&self) -> &Warnings {
        &self.warnings
    }

    /// Printable block with all warnings, empty when there are none.
    pub fn warning_text(&self) -> String {
        self.warnings.text()
    }

    /// File system port, for views built on top of the resolved status.
    pub(crate) fn fs(&self) -> &dyn FileSystemProbe {
        self.fs.as_ref()
    }

    /// Read-only view of the settings store.
    pub fn settings(&self) -> &dyn SettingsStore {
        self.settings.as_ref()
    }

    /// Write a setting and re-resolve whatever depends on it.
    ///
    /// When the new value makes a required resolver fail, the previous value
    /// is put back and the error is returned.
    pub fn set_setting(&mut self, key: &str, value: &str) -> Result<(), StatusError> {
        let previous = self.settings.get(key);
        self.settings.set(key, value)?;
        self.refresh_or_restore(key, previous.as_deref())
    }

    /// Delete a setting and re-resolve whatever depends on it.
    pub fn delete_setting(&mut self, key: &str) -> Result<(), StatusError> {
        let previous = self.settings.get(key);
        self.settings.delete(key)?;
        self.refresh_or_restore(key, previous.as_deref())
    }

    fn refresh_or_restore(
        &mut self,
        key: &str,
        previous: Option<&str>,
    ) -> Result<(), StatusError> {
        let Err(err) = self.refresh_for_key(key) else {
            return Ok(());
        };
        info!("Restoring previous value of {key} after: {err}");
        let restored = match previous {
            Some(value) => self.settings.set(key, value),
            None => self.settings.delete(key),
        };
        match restored {
            Ok(()) => {
                if let Err(still) = self.refresh_for_key(key) {
                    debug!("{key} does not resolve with its previous value either: {still}");
                }
            }
            Err(write_err) => {
                self.warnings
                    .push(format!("Could not restore setting {key}: {write_err}"));
            }
        }
        Err(err)
    }

    /// Force the resolver fed by `key` to recompute.
    ///
    /// Used after a configuration front end changed a setting. Keys that do
    /// not feed a path resolver only reset the memoized Natlink verdict. A
    /// successful refresh of the Dragon paths clears the construction error.
    pub fn refresh_for_key(&mut self, key: &str) -> Result<(), StatusError> {
        self.natlink_enabled = None;
        match key {
            keys::DNS_INSTALL_DIR => {
                self.dns_install_dir(true)?;
                self.dns_version()?;
                self.dns_ini_dir(true)?;
                self.construction_error = None;
            }
            keys::DNS_INI_DIR => {
                self.dns_ini_dir(true)?;
                self.construction_error = None;
            }
            keys::USER_DIRECTORY => {
                self.user_directory(true);
            }
            keys::UNIMACRO_USER_DIRECTORY => {
                self.unimacro_user_directory(true);
                self.unimacro_grammars_directory(true);
            }
            keys::VOCOLA_USER_DIRECTORY => {
                self.vocola_user_directory(true);
                self.vocola_grammars_directory(true);
            }
            keys::AHK_USER_DIR => {
                self.ahk_user_dir(true);
            }
            keys::AHK_EXE_DIR => {
                self.ahk_exe_dir(true);
            }
            _ => {}
        }
        Ok(())
    }

    /// Windows version reported by the system probe.
    pub fn windows_version(&self) -> String {
        self.system.windows_version()
    }

    /// Version of this status implementation.
    pub const fn install_version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    /// Expand aliases in a settings value and normalize the result.
    ///
    /// The raw value wins when it already exists on disk.
    fn expand_setting(&self, raw: &str) -> PathBuf {
        let raw = raw.trim();
        if self.fs.exists(Path::new(raw)) {
            normalize_path(Path::new(raw))
        } else {
            normalize_path(Path::new(&self.aliases.expand(raw)))
        }
    }
}
