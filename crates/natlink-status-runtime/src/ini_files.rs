//! Reading Dragon's INI files.

use std::path::Path;

use ini::Ini;
use natlink_status_core::IniReader;
use tracing::debug;

/// Reads values from INI files on disk, loading the file on every call.
///
/// Values are taken verbatim: Dragon writes Windows paths with unescaped
/// backslashes.
#[derive(Debug, Clone, Copy, Default)]
pub struct IniProfileReader;

impl IniProfileReader {
    pub const fn new() -> Self {
        Self
    }
}

impl IniReader for IniProfileReader {
    fn read_value(&self, file: &Path, section: &str, key: &str) -> Option<String> {
        let ini = match Ini::load_from_file_noescape(file) {
            Ok(ini) => ini,
            Err(e) => {
                debug!("Cannot read {}: {e}", file.display());
                return None;
            }
        };
        ini.get_from(Some(section), key).map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn reads_section_value() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("nssystem.ini");
        fs::write(
            &file,
            "[Global Clients]\n.Natlink=Python Macro System\n\n[Other]\nx=1\n",
        )
        .unwrap();

        let reader = IniProfileReader::new();
        assert_eq!(
            reader.read_value(&file, "Global Clients", ".Natlink").as_deref(),
            Some("Python Macro System")
        );
        assert_eq!(reader.read_value(&file, "Global Clients", "missing"), None);
        assert_eq!(reader.read_value(&file, "Absent", ".Natlink"), None);
    }

    #[test]
    fn backslashes_are_kept() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("options.ini");
        fs::write(&file, "[Options]\nDir=C:\\Users\\q\\new\n").unwrap();

        assert_eq!(
            IniProfileReader.read_value(&file, "Options", "Dir").as_deref(),
            Some("C:\\Users\\q\\new")
        );
    }

    #[test]
    fn missing_file_is_none() {
        let temp = tempfile::tempdir().unwrap();
        assert_eq!(
            IniProfileReader.read_value(&temp.path().join("absent.ini"), "Options", "x"),
            None
        );
    }
}
