//! Adapters implementing the `natlink-status-core` ports on the real machine.
#![deny(unused_crate_dependencies)]

pub mod aliases;
pub mod context;
pub mod error;
pub mod fs;
pub mod ini_files;
pub mod registry;
pub mod settings;
pub mod system;

#[cfg(test)]
use tempfile as _;

// Re-export the composition helper
pub use context::{RuntimeOptions, default_context};
pub use error::RuntimeError;

// Re-export port implementations
pub use aliases::KnownFolderExpander;
pub use fs::StdFileSystem;
pub use ini_files::IniProfileReader;
pub use registry::{DEFAULT_PYTHON_VERSION, WindowsRegistry};
pub use settings::{IniSettingsStore, SETTINGS_SECTION};
pub use system::DefaultSystemInfo;
