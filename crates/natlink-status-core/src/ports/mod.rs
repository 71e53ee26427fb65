//! Port definitions (trait abstractions) for the collaborators of the status engine.
//!
//! The resolver and evaluator only talk to the outside world through these
//! traits. Implementations backed by the real machine live in
//! `natlink-status-runtime`; in-memory fakes live in [`crate::testing`].
//!
//! # Design Rules
//!
//! - No OS-specific types in any signature
//! - Read-mostly: only the settings store and directory creation mutate state
//! - Probes never fail loudly; a missing path is simply `false` / `None`

mod filesystem;
mod ini_reader;
mod path_alias;
mod registry;
mod settings_store;
mod system_info;

pub use filesystem::FileSystemProbe;
pub use ini_reader::IniReader;
pub use path_alias::PathAliasExpander;
pub use registry::RegistryProbe;
pub use settings_store::{SettingsStore, SettingsStoreError};
pub use system_info::SystemInfoProbe;

#[cfg(test)]
pub use ini_reader::MockIniReader;
#[cfg(test)]
pub use registry::MockRegistryProbe;
