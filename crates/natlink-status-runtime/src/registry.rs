//! Natlink registration lookup in the Windows registry.
//!
//! The Natlink installer records its core directory as a `PythonPath` entry
//! of the 32-bit Python it was installed for:
//!
//! ```text
//! SOFTWARE\Python\PythonCore\<version>\PythonPath\Natlink = <core directory>
//! ```
//!
//! The key is looked up in `HKLM` (all users) and then `HKCU` (one user).
//! On other platforms nothing is ever registered.

use std::path::PathBuf;

use natlink_status_core::RegistryProbe;
use tracing::debug;

/// Python version Natlink is built against, as `sys.winver` spells it.
pub const DEFAULT_PYTHON_VERSION: &str = "3.8-32";

/// Reads package registrations from the Python registry hive.
#[derive(Debug, Clone)]
pub struct WindowsRegistry {
    python_version: String,
}

impl WindowsRegistry {
    pub fn new(python_version: impl Into<String>) -> Self {
        Self {
            python_version: python_version.into(),
        }
    }

    fn python_path_key(&self) -> String {
        format!(
            r"SOFTWARE\Python\PythonCore\{}\PythonPath",
            self.python_version
        )
    }
}

impl Default for WindowsRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_PYTHON_VERSION)
    }
}

#[cfg(target_os = "windows")]
impl RegistryProbe for WindowsRegistry {
    fn installed_package_path(&self, package: &str) -> Option<PathBuf> {
        use winreg::RegKey;
        use winreg::enums::{HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE, KEY_READ, KEY_WOW64_32KEY};

        let key_path = self.python_path_key();
        for (hive, hive_name) in [(HKEY_LOCAL_MACHINE, "HKLM"), (HKEY_CURRENT_USER, "HKCU")] {
            let Ok(python_path) = RegKey::predef(hive)
                .open_subkey_with_flags(&key_path, KEY_READ | KEY_WOW64_32KEY)
            else {
                continue;
            };
            // Subkey names are matched case-insensitively, installers differ.
            let Some(name) = python_path
                .enum_keys()
                .filter_map(Result::ok)
                .find(|name| name.eq_ignore_ascii_case(package))
            else {
                debug!("{hive_name}\\{key_path} has no {package} entry");
                return None;
            };
            let entry = python_path.open_subkey(&name).ok()?;
            let (value_name, _) = entry.enum_values().next()?.ok()?;
            let path: String = entry.get_value(&value_name).ok()?;
            debug!("{package} registered in {hive_name}: {path}");
            return Some(PathBuf::from(path));
        }
        debug!("No PythonPath key for Python {}", self.python_version);
        None
    }
}

#[cfg(not(target_os = "windows"))]
impl RegistryProbe for WindowsRegistry {
    fn installed_package_path(&self, package: &str) -> Option<PathBuf> {
        debug!(
            "No registry on this platform; {package} not registered at {}",
            self.python_path_key()
        );
        None
    }
}
