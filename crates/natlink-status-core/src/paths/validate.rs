//! Validation of path values read from the settings store.

use std::fmt;
use std::path::{Path, PathBuf};

use super::normalize::normalize_path;
use crate::ports::{FileSystemProbe, PathAliasExpander};

/// The kind of filesystem entry a setting must point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    File,
    Directory,
}

/// Why a settings value was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathRejection {
    /// The value is empty or only whitespace.
    Empty,
    /// Nothing exists at the (expanded) path.
    Missing(PathBuf),
    /// Something exists but it is a file where a directory was wanted, or the reverse.
    WrongKind { path: PathBuf, wanted: PathKind },
}

impl fmt::Display for PathRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("empty value"),
            Self::Missing(path) => write!(f, "{} does not exist", path.display()),
            Self::WrongKind { path, wanted } => {
                let wanted = match wanted {
                    PathKind::File => "file",
                    PathKind::Directory => "directory",
                };
                write!(f, "{} exists but is not a {wanted}", path.display())
            }
        }
    }
}

/// Validate a settings value as a path of the given kind.
///
/// The raw value is used as-is when it exists; otherwise `~` and `%NAME%`
/// aliases are expanded first. The returned path is normalized.
pub fn validate_setting_path(
    fs: &dyn FileSystemProbe,
    aliases: &dyn PathAliasExpander,
    raw: &str,
    kind: PathKind,
) -> Result<PathBuf, PathRejection> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PathRejection::Empty);
    }

    let candidate = if fs.exists(Path::new(trimmed)) {
        PathBuf::from(trimmed)
    } else {
        PathBuf::from(aliases.expand(trimmed))
    };
    let candidate = normalize_path(&candidate);

    if !fs.exists(&candidate) {
        return Err(PathRejection::Missing(candidate));
    }

    let kind_ok = match kind {
        PathKind::File => fs.is_file(&candidate),
        PathKind::Directory => fs.is_dir(&candidate),
    };
    if kind_ok {
        Ok(candidate)
    } else {
        Err(PathRejection::WrongKind {
            path: candidate,
            wanted: kind,
        })
    }
}
