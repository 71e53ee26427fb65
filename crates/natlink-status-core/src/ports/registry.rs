//! Registry probe port.

use std::path::PathBuf;

/// Reads the "installed package path" an installer records for a package.
#[cfg_attr(test, mockall::automock)]
pub trait RegistryProbe {
    /// The recorded path for `package`, or `None` when nothing is registered.
    fn installed_package_path(&self, package: &str) -> Option<PathBuf>;
}
