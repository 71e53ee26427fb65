//! Filesystem probe port.

use std::io;
use std::path::Path;

/// Blocking filesystem predicates used by the resolvers.
///
/// Every predicate answers for the moment of the call; callers re-validate
/// if time has passed.
pub trait FileSystemProbe {
    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    /// File names (not full paths) of the entries of a directory.
    fn list_dir(&self, path: &Path) -> io::Result<Vec<String>>;

    /// Create a single directory whose parent already exists.
    ///
    /// Creating a directory that already exists must succeed.
    fn create_dir(&self, path: &Path) -> io::Result<()>;
}
