//! Consolidated status snapshot.
//!
//! Every reported field is listed once in [`FIELDS`] together with the
//! accessor that produces it, so the snapshot, the text report and the path
//! aliases all agree on names and order.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::cache::Enablement;
use crate::status::NatlinkStatus;

/// A reported field, named as the rest of Natlink knows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatusField {
    UserName,
    DnsUserDirectory,
    DnsInstallDir,
    DnsIniDir,
    DnsVersion,
    DnsName,
    WindowsVersion,
    InstallVersion,
    CoreDirectory,
    BaseDirectory,
    NatlinkDirectory,
    UserDirectory,
    UnimacroDirectory,
    UnimacroUserDirectory,
    UnimacroGrammarsDirectory,
    UnimacroIniFilesEditor,
    VocolaDirectory,
    VocolaUserDirectory,
    VocolaGrammarsDirectory,
    VocolaTakesLanguages,
    VocolaTakesUnimacroActions,
    DebugLoad,
    DebugCallback,
    NatlinkPydRegistered,
    AhkExeDir,
    AhkUserDir,
    NatlinkIsEnabled,
    UserIsEnabled,
    UnimacroIsEnabled,
    VocolaIsEnabled,
    Warnings,
}

impl StatusField {
    pub const fn key(self) -> &'static str {
        match self {
            Self::UserName => "userName",
            Self::DnsUserDirectory => "DNSuserDirectory",
            Self::DnsInstallDir => "DNSInstallDir",
            Self::DnsIniDir => "DNSIniDir",
            Self::DnsVersion => "DNSVersion",
            Self::DnsName => "DNSName",
            Self::WindowsVersion => "WindowsVersion",
            Self::InstallVersion => "InstallVersion",
            Self::CoreDirectory => "CoreDirectory",
            Self::BaseDirectory => "BaseDirectory",
            Self::NatlinkDirectory => "NatlinkDirectory",
            Self::UserDirectory => "UserDirectory",
            Self::UnimacroDirectory => "UnimacroDirectory",
            Self::UnimacroUserDirectory => "UnimacroUserDirectory",
            Self::UnimacroGrammarsDirectory => "UnimacroGrammarsDirectory",
            Self::UnimacroIniFilesEditor => "UnimacroIniFilesEditor",
            Self::VocolaDirectory => "VocolaDirectory",
            Self::VocolaUserDirectory => "VocolaUserDirectory",
            Self::VocolaGrammarsDirectory => "VocolaGrammarsDirectory",
            Self::VocolaTakesLanguages => "VocolaTakesLanguages",
            Self::VocolaTakesUnimacroActions => "VocolaTakesUnimacroActions",
            Self::DebugLoad => "DebugLoad",
            Self::DebugCallback => "DebugCallback",
            Self::NatlinkPydRegistered => "NatlinkPydRegistered",
            Self::AhkExeDir => "AhkExeDir",
            Self::AhkUserDir => "AhkUserDir",
            Self::NatlinkIsEnabled => "natlinkIsEnabled",
            Self::UserIsEnabled => "userIsEnabled",
            Self::UnimacroIsEnabled => "unimacroIsEnabled",
            Self::VocolaIsEnabled => "vocolaIsEnabled",
            Self::Warnings => "warnings",
        }
    }

    /// `true` for fields whose value is a directory.
    pub const fn is_directory(self) -> bool {
        matches!(
            self,
            Self::DnsUserDirectory
                | Self::DnsInstallDir
                | Self::DnsIniDir
                | Self::CoreDirectory
                | Self::BaseDirectory
                | Self::NatlinkDirectory
                | Self::UserDirectory
                | Self::UnimacroDirectory
                | Self::UnimacroUserDirectory
                | Self::UnimacroGrammarsDirectory
                | Self::VocolaDirectory
                | Self::VocolaUserDirectory
                | Self::VocolaGrammarsDirectory
                | Self::AhkExeDir
                | Self::AhkUserDir
        )
    }
}

impl fmt::Display for StatusField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Value of one snapshot field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusValue {
    Text(String),
    Number(u32),
    Flag(Enablement),
    List(Vec<String>),
    Empty,
}

impl StatusValue {
    fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            Self::Empty
        } else {
            Self::Text(value)
        }
    }

    fn path(value: Option<impl AsRef<Path>>) -> Self {
        value.map_or(Self::Empty, |p| Self::text(p.as_ref().display().to_string()))
    }

    fn optional(value: Option<String>) -> Self {
        value.map_or(Self::Empty, Self::text)
    }

    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub const fn as_flag(&self) -> Option<Enablement> {
        match self {
            Self::Flag(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Rendered as in the text report: empty values print nothing.
impl fmt::Display for StatusValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => write!(f, "{number}"),
            Self::Flag(flag) => write!(f, "{flag}"),
            Self::List(items) => f.write_str(&items.join("; ")),
            Self::Empty => Ok(()),
        }
    }
}

impl Serialize for StatusValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(text) => serializer.serialize_str(text),
            Self::Number(number) => serializer.serialize_u32(*number),
            Self::Flag(flag) => flag.serialize(serializer),
            Self::List(items) => items.serialize(serializer),
            Self::Empty => serializer.serialize_str(""),
        }
    }
}

type FieldReader = fn(&mut NatlinkStatus) -> StatusValue;

/// Every snapshot field with its accessor, in report order.
///
/// `warnings` comes last so it includes whatever the other accessors recorded.
pub static FIELDS: [(StatusField, FieldReader); 31] = [
    (StatusField::UserName, |s| StatusValue::text(s.user_name())),
    (StatusField::DnsUserDirectory, |s| {
        StatusValue::path(s.dns_user_directory())
    }),
    (StatusField::DnsInstallDir, |s| {
        StatusValue::path(s.dns_install_dir(false).ok())
    }),
    (StatusField::DnsIniDir, |s| StatusValue::path(s.dns_ini_dir(false).ok())),
    (StatusField::DnsVersion, |s| {
        s.dns_version().map_or(StatusValue::Empty, StatusValue::Number)
    }),
    (StatusField::DnsName, |s| StatusValue::text(s.dns_name())),
    (StatusField::WindowsVersion, |s| StatusValue::text(s.windows_version())),
    (StatusField::InstallVersion, |_| {
        StatusValue::text(NatlinkStatus::install_version())
    }),
    (StatusField::CoreDirectory, |s| {
        StatusValue::path(Some(s.core_directory()))
    }),
    (StatusField::BaseDirectory, |s| {
        StatusValue::path(Some(s.base_directory()))
    }),
    (StatusField::NatlinkDirectory, |s| {
        StatusValue::path(Some(s.natlink_directory()))
    }),
    (StatusField::UserDirectory, |s| StatusValue::path(s.user_directory(false))),
    (StatusField::UnimacroDirectory, |s| {
        StatusValue::path(s.unimacro_directory(false))
    }),
    (StatusField::UnimacroUserDirectory, |s| {
        StatusValue::path(s.unimacro_user_directory(false))
    }),
    (StatusField::UnimacroGrammarsDirectory, |s| {
        StatusValue::path(s.unimacro_grammars_directory(false))
    }),
    (StatusField::UnimacroIniFilesEditor, |s| {
        StatusValue::text(s.unimacro_ini_files_editor())
    }),
    (StatusField::VocolaDirectory, |s| {
        StatusValue::path(s.vocola_directory(false))
    }),
    (StatusField::VocolaUserDirectory, |s| {
        StatusValue::path(s.vocola_user_directory(false))
    }),
    (StatusField::VocolaGrammarsDirectory, |s| {
        StatusValue::path(s.vocola_grammars_directory(false))
    }),
    (StatusField::VocolaTakesLanguages, |s| {
        StatusValue::optional(s.vocola_takes_languages())
    }),
    (StatusField::VocolaTakesUnimacroActions, |s| {
        StatusValue::optional(s.vocola_takes_unimacro_actions())
    }),
    (StatusField::DebugLoad, |s| StatusValue::optional(s.debug_load())),
    (StatusField::DebugCallback, |s| StatusValue::optional(s.debug_callback())),
    (StatusField::NatlinkPydRegistered, |s| {
        StatusValue::optional(s.natlink_pyd_registered())
    }),
    (StatusField::AhkExeDir, |s| StatusValue::path(s.ahk_exe_dir(false))),
    (StatusField::AhkUserDir, |s| StatusValue::path(s.ahk_user_dir(false))),
    (StatusField::NatlinkIsEnabled, |s| StatusValue::Flag(s.natlink_is_enabled())),
    (StatusField::UserIsEnabled, |s| StatusValue::Flag(s.user_is_enabled())),
    (StatusField::UnimacroIsEnabled, |s| StatusValue::Flag(s.unimacro_is_enabled())),
    (StatusField::VocolaIsEnabled, |s| StatusValue::Flag(s.vocola_is_enabled())),
    (StatusField::Warnings, |s| {
        StatusValue::List(s.warnings().messages().to_vec())
    }),
];

/// Snapshot of all status fields, serialized as a JSON object in field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    entries: Vec<(StatusField, StatusValue)>,
}

impl StatusSnapshot {
    pub fn get(&self, field: StatusField) -> Option<&StatusValue> {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, value)| value)
    }

    /// Enablement of a flag field; fields that are not flags read as disabled.
    pub fn flag(&self, field: StatusField) -> Enablement {
        self.get(field)
            .and_then(StatusValue::as_flag)
            .unwrap_or(Enablement::Disabled)
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatusField, &StatusValue)> {
        self.entries.iter().map(|(field, value)| (*field, value))
    }

    pub fn warnings(&self) -> &[String] {
        match self.get(StatusField::Warnings) {
            Some(StatusValue::List(items)) => items,
            _ => &[],
        }
    }
}

impl Serialize for StatusSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, value) in &self.entries {
            map.serialize_entry(field.key(), value)?;
        }
        map.end()
    }
}

impl NatlinkStatus {
    /// Resolve every field and collect the results.
    pub fn snapshot(&mut self) -> StatusSnapshot {
        let entries = FIELDS
            .iter()
            .map(|(field, read)| (*field, read(self)))
            .collect();
        StatusSnapshot { entries }
    }

    /// Existing directories of the snapshot keyed by upper-cased field name,
    /// for use as `%NAME%` path aliases.
    pub fn path_aliases(&mut self) -> BTreeMap<String, PathBuf> {
        let snapshot = self.snapshot();
        snapshot
            .iter()
            .filter(|(field, _)| field.is_directory())
            .filter_map(|(field, value)| {
                let path = PathBuf::from(value.as_text()?);
                self.fs()
                    .is_dir(&path)
                    .then(|| (field.key().to_uppercase(), path))
            })
            .collect()
    }
}
