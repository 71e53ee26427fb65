//! Read-only access to foreign INI files (Dragon's `nssystem.ini`,
//! `nsapps.ini` and the per-profile `options.ini`, `acoustic.ini`, `topics.ini`).

use std::path::Path;

#[cfg_attr(test, mockall::automock)]
pub trait IniReader {
    /// Value of `key` in `section` of `file`; `None` if the file, section or
    /// key is missing.
    fn read_value(&self, file: &Path, section: &str, key: &str) -> Option<String>;
}
