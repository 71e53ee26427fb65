//! Lexical path normalization.

use std::path::{Component, Path, PathBuf};

/// Collapse `.` and `..` components without touching the filesystem.
///
/// `..` at the root is dropped, mirroring how Windows treats `C:\..`.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let can_pop = matches!(
                    normalized.components().next_back(),
                    Some(Component::Normal(_))
                );
                if can_pop {
                    normalized.pop();
                } else if !normalized.has_root() {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    if normalized.as_os_str().is_empty() {
        normalized.push(".");
    }
    normalized
}

/// Compare two paths after normalization, ignoring ASCII case.
///
/// Registry entries and settings values are typed by hand on Windows, so
/// `C:\NatLink` and `c:\natlink\` must compare equal.
pub fn paths_equal_ignore_case(a: &Path, b: &Path) -> bool {
    let a = normalize_path(a);
    let b = normalize_path(b);
    let a = a.to_string_lossy();
    let b = b.to_string_lossy();
    a.trim_end_matches(['/', '\\'])
        .eq_ignore_ascii_case(b.trim_end_matches(['/', '\\']))
}
