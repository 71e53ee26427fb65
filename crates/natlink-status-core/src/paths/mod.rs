//! Path utilities shared by the status resolvers.
//!
//! This module provides the building blocks for every resolver:
//! - Lexical normalization of user-supplied and derived paths
//! - Validation of settings values (alias expansion, file vs directory)
//! - Dragon-specific layout checks and the default candidate lists
//!
//! # Design
//!
//! - All filesystem access goes through [`FileSystemProbe`](crate::ports::FileSystemProbe)
//! - Functions are pure apart from those probes, so they are reusable from
//!   tests and from the CLI

mod host;
mod normalize;
mod validate;

pub use host::{
    DNS_EXECUTABLE, DNS_VERSIONS, PROGRAM_SUBDIRS, dns_install_candidates, dns_version_from_dir,
    is_dns_program_dir,
};
pub use normalize::{normalize_path, paths_equal_ignore_case};
pub use validate::{PathKind, PathRejection, validate_setting_path};
