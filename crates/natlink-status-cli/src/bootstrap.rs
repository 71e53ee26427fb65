//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where the runtime adapters are wired into
//! a status object. Command handlers receive the composed [`CliContext`].

use std::env;
use std::path::{Path, PathBuf};

use natlink_status_core::NatlinkStatus;
use natlink_status_runtime::{IniSettingsStore, RuntimeError, RuntimeOptions, default_context};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::error::CliError;
use crate::parser::Cli;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Natlink settings file.
    pub settings_file: PathBuf,
    /// Natlink core directory.
    pub core_directory: PathBuf,
    /// Module search path scanned for the Vocola and Unimacro libraries.
    pub search_path: Vec<PathBuf>,
    /// Python version whose registry hive records Natlink.
    pub python_version: Option<String>,
}

impl CliConfig {
    /// Resolve the global options, falling back to the default locations.
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let settings_file = match &cli.settings_file {
            Some(path) => path.clone(),
            None => IniSettingsStore::default_path().ok_or(RuntimeError::NoHomeDirectory)?,
        };
        let core_directory = match &cli.core_dir {
            Some(dir) => dir.clone(),
            None => executable_dir()?,
        };
        Ok(Self {
            settings_file,
            core_directory,
            search_path: cli.search_path.as_deref().map(parse_search_path).unwrap_or_default(),
            python_version: cli.python_version.clone(),
        })
    }
}

/// Split a path list in the platform's syntax, dropping empty entries.
pub fn parse_search_path(list: &str) -> Vec<PathBuf> {
    env::split_paths(list)
        .filter(|path| !path.as_os_str().is_empty())
        .collect()
}

fn executable_dir() -> Result<PathBuf, CliError> {
    let exe = env::current_exe()?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        CliError::Config(format!("cannot determine the directory of {}", exe.display()))
    })
}

/// Fully composed context for CLI commands.
pub struct CliContext {
    /// The status object all handlers query.
    pub status: NatlinkStatus,
    /// Where settings are read from and written to.
    pub settings_file: PathBuf,
}

/// Build the status object from the runtime adapters.
///
/// A missing Dragon installation is not fatal here: the status object keeps
/// the error and reports it as a warning, so `status` and `paths` still work.
pub fn bootstrap(config: CliConfig) -> Result<CliContext, CliError> {
    debug!("Bootstrapping with {config:?}");
    let context = default_context(RuntimeOptions {
        settings_file: Some(config.settings_file.clone()),
        core_directory: config.core_directory,
        search_path: config.search_path,
        python_version: config.python_version,
    })?;
    let status = NatlinkStatus::new(context);
    if let Some(err) = status.construction_error() {
        debug!("Continuing without Dragon paths: {err}");
    }
    Ok(CliContext {
        status,
        settings_file: config.settings_file,
    })
}

/// Install the `tracing` subscriber.
///
/// `RUST_LOG` is honoured unless `--verbose` asks for debug output.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
