//! In-memory fakes of the collaborator ports.
//!
//! Each fake is a cheap handle around shared state, so a test can hand one
//! clone to [`StatusContext`] and keep another to inspect or mutate the
//! state afterwards.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::ports::{
    FileSystemProbe, IniReader, PathAliasExpander, RegistryProbe, SettingsStore,
    SettingsStoreError, SystemInfoProbe,
};
use crate::status::StatusContext;

#[derive(Debug, Default)]
struct FsState {
    dirs: RefCell<BTreeSet<PathBuf>>,
    files: RefCell<BTreeSet<PathBuf>>,
    frozen: Cell<bool>,
}

/// Fake filesystem holding a set of directories and files.
///
/// Adding an entry also adds all of its ancestors as directories. After
/// [`freeze`](Self::freeze) any lookup panics, which is how tests prove a
/// cached value is returned without touching the disk again.
#[derive(Debug, Clone, Default)]
pub struct FakeFileSystem {
    state: Rc<FsState>,
}

impl FakeFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        self.add_dir(path);
        self
    }

    #[must_use]
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.add_file(path);
        self
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut dirs = self.state.dirs.borrow_mut();
        for ancestor in path.as_ref().ancestors() {
            if !ancestor.as_os_str().is_empty() {
                dirs.insert(ancestor.to_path_buf());
            }
        }
    }

    pub fn add_file(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.state.files.borrow_mut().insert(path.to_path_buf());
    }

    /// Make every further probe panic.
    pub fn freeze(&self) {
        self.state.frozen.set(true);
    }

    fn touch(&self, path: &Path) {
        assert!(
            !self.state.frozen.get(),
            "filesystem accessed while frozen: {}",
            path.display()
        );
    }
}

impl FileSystemProbe for FakeFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.touch(path);
        self.state.dirs.borrow().contains(path) || self.state.files.borrow().contains(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.touch(path);
        self.state.dirs.borrow().contains(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.touch(path);
        self.state.files.borrow().contains(path)
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        self.touch(path);
        if !self.state.dirs.borrow().contains(path) {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no such directory"));
        }
        let dirs = self.state.dirs.borrow();
        let files = self.state.files.borrow();
        Ok(dirs
            .iter()
            .chain(files.iter())
            .filter(|p| p.parent() == Some(path))
            .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect())
    }

    fn create_dir(&self, path: &Path) -> io::Result<()> {
        self.touch(path);
        if self.state.files.borrow().contains(path) {
            return Err(io::Error::new(io::ErrorKind::AlreadyExists, "a file is in the way"));
        }
        self.add_dir(path);
        Ok(())
    }
}

/// Settings store held in memory, preserving insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemorySettings {
    entries: Rc<RefCell<Vec<(String, String)>>>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(self, key: &str, value: &str) -> Self {
        self.put(key, value);
        self
    }

    /// Insert or replace a value through a shared handle.
    pub fn put(&self, key: &str, value: &str) {
        let mut entries = self.entries.borrow_mut();
        if let Some(entry) = entries.iter_mut().find(|(k, _)| k == key) {
            entry.1 = value.to_string();
        } else {
            entries.push((key.to_string(), value.to_string()));
        }
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.get(key)
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .borrow()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsStoreError> {
        self.put(key, value);
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), SettingsStoreError> {
        self.entries.borrow_mut().retain(|(k, _)| k != key);
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.entries.borrow().iter().map(|(k, _)| k.clone()).collect()
    }
}

/// Alias expander that substitutes fixed prefixes.
///
/// `~` only matches at the start of a value; `%NAME%` tokens match anywhere
/// and case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct RootAliases {
    roots: Vec<(String, String)>,
}

impl RootAliases {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, token: &str, replacement: impl AsRef<Path>) -> Self {
        self.roots.push((
            token.to_string(),
            replacement.as_ref().to_string_lossy().into_owned(),
        ));
        self
    }
}

impl PathAliasExpander for RootAliases {
    fn expand(&self, spec: &str) -> String {
        let mut expanded = spec.to_string();
        for (token, replacement) in &self.roots {
            if token == "~" {
                if expanded == "~" || expanded.starts_with("~/") || expanded.starts_with("~\\") {
                    expanded = format!("{replacement}{}", &expanded[1..]);
                }
                continue;
            }
            let lower = expanded.to_ascii_lowercase();
            if let Some(pos) = lower.find(&token.to_ascii_lowercase()) {
                expanded.replace_range(pos..pos + token.len(), replacement);
            }
        }
        expanded
    }
}

/// Registry with a fixed set of package registrations.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    packages: BTreeMap<String, PathBuf>,
}

impl StaticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_package(mut self, name: &str, path: impl Into<PathBuf>) -> Self {
        self.packages.insert(name.to_string(), path.into());
        self
    }
}

impl RegistryProbe for StaticRegistry {
    fn installed_package_path(&self, package: &str) -> Option<PathBuf> {
        self.packages.get(package).cloned()
    }
}

/// INI files held in memory as `(file, section, key) -> value`.
#[derive(Debug, Clone, Default)]
pub struct MemoryIniFiles {
    values: Rc<RefCell<BTreeMap<(PathBuf, String, String), String>>>,
}

impl MemoryIniFiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, file: impl Into<PathBuf>, section: &str, key: &str, value: &str) {
        self.values.borrow_mut().insert(
            (file.into(), section.to_string(), key.to_string()),
            value.to_string(),
        );
    }
}

impl IniReader for MemoryIniFiles {
    fn read_value(&self, file: &Path, section: &str, key: &str) -> Option<String> {
        self.values
            .borrow()
            .get(&(file.to_path_buf(), section.to_string(), key.to_string()))
            .cloned()
    }
}

/// System info probe returning a fixed version string.
#[derive(Debug, Clone)]
pub struct FixedSystemInfo(pub String);

impl SystemInfoProbe for FixedSystemInfo {
    fn windows_version(&self) -> String {
        self.0.clone()
    }
}

/// A complete set of fakes plus the anchor directories.
///
/// The rig keeps handles to the shared fakes so tests can inspect them
/// after building a status object from [`context`](Self::context).
#[derive(Debug, Clone)]
pub struct TestRig {
    pub fs: FakeFileSystem,
    pub settings: MemorySettings,
    pub ini: MemoryIniFiles,
    pub registry: StaticRegistry,
    pub aliases: RootAliases,
    pub core_directory: PathBuf,
    pub search_path: Vec<PathBuf>,
}

impl TestRig {
    /// Rig with Natlink's core directory at `/natlink/MacroSystem/core`.
    pub fn new() -> Self {
        let core_directory = PathBuf::from("/natlink/MacroSystem/core");
        let fs = FakeFileSystem::new().with_dir(&core_directory);
        Self {
            fs,
            settings: MemorySettings::new(),
            ini: MemoryIniFiles::new(),
            registry: StaticRegistry::new(),
            aliases: RootAliases::new()
                .with("%PROGRAM_FILESX86%", "/pf")
                .with("%ALLUSERSPROFILE%", "/programdata"),
            core_directory,
            search_path: Vec::new(),
        }
    }

    pub fn context(&self) -> StatusContext {
        StatusContext {
            settings: Box::new(self.settings.clone()),
            fs: Box::new(self.fs.clone()),
            registry: Box::new(self.registry.clone()),
            aliases: Box::new(self.aliases.clone()),
            ini: Box::new(self.ini.clone()),
            system: Box::new(FixedSystemInfo("10".to_string())),
            core_directory: self.core_directory.clone(),
            search_path: self.search_path.clone(),
        }
    }

    /// Install Dragon 15 at the default location with its INI directory.
    #[must_use]
    pub fn with_dragon(self) -> Self {
        self.fs
            .add_file("/pf/Nuance/NaturallySpeaking15/Program/natspeak.exe");
        self.fs.add_dir("/programdata/Nuance/NaturallySpeaking15");
        self
    }

    /// Register Natlink at the core directory and switch it on in both
    /// Dragon INI files.
    #[must_use]
    pub fn with_natlink_enabled(mut self) -> Self {
        self.registry = self
            .registry
            .with_package("Natlink", self.core_directory.clone());
        self.fs
            .add_file(self.core_directory.join(crate::status::NATLINK_MAIN));
        self.set_integration_flags(Some("Python Macro System"), Some(crate::status::NATLINK_CLSID));
        self
    }

    /// Write (or omit) the two Dragon INI flags that switch Natlink on.
    pub fn set_integration_flags(&self, system: Option<&str>, app: Option<&str>) {
        let ini_dir = PathBuf::from("/programdata/Nuance/NaturallySpeaking15");
        let nssystem = ini_dir.join("nssystem.ini");
        let nsapps = ini_dir.join("nsapps.ini");
        self.fs.add_file(&nssystem);
        self.fs.add_file(&nsapps);
        if let Some(value) = system {
            self.ini.put(&nssystem, "Global Clients", ".Natlink", value);
        }
        if let Some(value) = app {
            self.ini.put(&nsapps, ".Natlink", "App Support GUID", value);
        }
    }
}

impl Default for TestRig {
    fn default() -> Self {
        Self::new()
    }
}
