//! Composition of the runtime adapters into a [`StatusContext`].

use std::path::PathBuf;

use natlink_status_core::StatusContext;
use tracing::debug;

use crate::aliases::KnownFolderExpander;
use crate::error::RuntimeError;
use crate::fs::StdFileSystem;
use crate::ini_files::IniProfileReader;
use crate::registry::WindowsRegistry;
use crate::settings::IniSettingsStore;
use crate::system::DefaultSystemInfo;

/// Where the status engine finds its inputs on this machine.
#[derive(Debug, Clone, Default)]
pub struct RuntimeOptions {
    /// Settings file; `~/.natlink/natlinkstatus.ini` when `None`.
    pub settings_file: Option<PathBuf>,
    /// Directory holding the Natlink core library.
    pub core_directory: PathBuf,
    pub search_path: Vec<PathBuf>,
    /// Python version whose registry hive records Natlink; the default
    /// 32-bit version when `None`.
    pub python_version: Option<String>,
}

/// Build a context backed by the real filesystem, registry and settings file.
pub fn default_context(options: RuntimeOptions) -> Result<StatusContext, RuntimeError> {
    let settings_file = match options.settings_file {
        Some(path) => path,
        None => IniSettingsStore::default_path().ok_or(RuntimeError::NoHomeDirectory)?,
    };
    debug!("Settings file: {}", settings_file.display());
    let settings = IniSettingsStore::open(settings_file)?;

    let registry = options
        .python_version
        .map_or_else(WindowsRegistry::default, WindowsRegistry::new);

    Ok(StatusContext {
        settings: Box::new(settings),
        fs: Box::new(StdFileSystem::new()),
        registry: Box::new(registry),
        aliases: Box::new(KnownFolderExpander::from_environment()?),
        ini: Box::new(IniProfileReader::new()),
        system: Box::new(DefaultSystemInfo::new()),
        core_directory: options.core_directory,
        search_path: options.search_path,
    })
}
