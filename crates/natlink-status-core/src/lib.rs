//! Installation and configuration status of Natlink.
//!
//! Resolves where Dragon is installed, its version and INI directory, the
//! directories of the optional Vocola, Unimacro and user grammar subsystems,
//! and decides which of them are enabled. All outside access goes through
//! the traits in [`ports`]; `natlink-status-runtime` implements them for the
//! real machine.
#![deny(unused_crate_dependencies)]

pub mod cache;
pub mod diagnostics;
pub mod error;
pub mod paths;
pub mod ports;
pub mod report;
pub mod snapshot;
pub mod status;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use cache::{CacheSlot, Enablement, ResolvedPath};
pub use diagnostics::Warnings;
pub use error::StatusError;
pub use ports::{
    FileSystemProbe, IniReader, PathAliasExpander, RegistryProbe, SettingsStore,
    SettingsStoreError, SystemInfoProbe,
};
pub use report::render_report;
pub use snapshot::{FIELDS, StatusField, StatusSnapshot, StatusValue};
pub use status::{NatlinkStatus, StatusContext, UserInfo, keys};
