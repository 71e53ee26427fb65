//! Filesystem probe backed by `std::fs`.

use std::fs;
use std::io;
use std::path::Path;

use natlink_status_core::FileSystemProbe;

/// Probes the local filesystem.
#[derive(Debug, Clone, Copy)]
pub struct StdFileSystem;

impl StdFileSystem {
    pub const fn new() -> Self {
        Self
    }
}

impl Default for StdFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystemProbe for StdFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
            .collect()
    }

    fn create_dir(&self, path: &Path) -> io::Result<()> {
        match fs::create_dir(path) {
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_entry_names() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("_control.py"), "").unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();

        let mut names = StdFileSystem.list_dir(temp.path()).unwrap();
        names.sort();
        assert_eq!(names, vec!["_control.py".to_string(), "sub".to_string()]);
    }

    #[test]
    fn create_dir_accepts_existing_directory() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("CompiledGrammars");

        StdFileSystem.create_dir(&dir).unwrap();
        StdFileSystem.create_dir(&dir).unwrap();
        assert!(StdFileSystem.is_dir(&dir));
    }

    #[test]
    fn create_dir_rejects_existing_file() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("taken");
        fs::write(&file, "x").unwrap();

        assert!(StdFileSystem.create_dir(&file).is_err());
    }

    #[test]
    fn list_missing_dir_fails() {
        let temp = tempfile::tempdir().unwrap();
        assert!(StdFileSystem.list_dir(&temp.path().join("absent")).is_err());
    }
}
