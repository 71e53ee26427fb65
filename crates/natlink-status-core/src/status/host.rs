//! Required resolvers: Dragon install directory, version and INI directory.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::{NatlinkStatus, enablement, keys};
use crate::cache::CacheSlot;
use crate::error::StatusError;
use crate::paths::{
    PathKind, dns_install_candidates, dns_version_from_dir, is_dns_program_dir, normalize_path,
    validate_setting_path,
};

/// Alias of the 32-bit program files root Dragon installs into.
pub const PROGRAM_FILES_ALIAS: &str = "%PROGRAM_FILESX86%";

/// Alias of the shared application data root holding Dragon's INI files.
pub const SHARED_DATA_ALIAS: &str = "%ALLUSERSPROFILE%";

impl NatlinkStatus {
    /// Directory Dragon is installed in.
    ///
    /// A `DNSInstallDir` setting must point at a valid install root; otherwise
    /// the default locations are probed newest version first. With `force`
    /// the cached value, the version and the Natlink verdict are recomputed.
    pub fn dns_install_dir(&mut self, force: bool) -> Result<PathBuf, StatusError> {
        if force {
            self.dns_install_dir.invalidate();
            self.dns_version.invalidate();
            self.natlink_enabled = None;
        }
        match &self.dns_install_dir {
            CacheSlot::Resolved(dir) => return Ok(dir.clone()),
            CacheSlot::Invalid => return Err(StatusError::Unresolvable(keys::DNS_INSTALL_DIR)),
            CacheSlot::Unresolved => {}
        }

        let outcome = self.probe_dns_install_dir();
        self.dns_install_dir = outcome.as_ref().ok().cloned().into();
        outcome
    }

    fn probe_dns_install_dir(&self) -> Result<PathBuf, StatusError> {
        if let Some(raw) = self.settings.get(keys::DNS_INSTALL_DIR).filter(|v| !v.trim().is_empty()) {
            let dir = self.expand_setting(&raw);
            if is_dns_program_dir(self.fs.as_ref(), &dir) {
                debug!("DNSInstallDir from settings: {}", dir.display());
                return Ok(dir);
            }
            return Err(StatusError::InvalidOverride {
                key: keys::DNS_INSTALL_DIR.to_string(),
                value: raw,
                reason: "expected a directory holding Program/natspeak.exe or App/Program/natspeak.exe"
                    .to_string(),
            });
        }

        let program_files = normalize_path(Path::new(&self.aliases.expand(PROGRAM_FILES_ALIAS)));
        if !self.fs.is_dir(&program_files) {
            return Err(StatusError::NoProgramFilesRoot(program_files));
        }

        let candidates = dns_install_candidates(&program_files);
        for candidate in &candidates {
            if is_dns_program_dir(self.fs.as_ref(), candidate) {
                debug!("Found Dragon at {}", candidate.display());
                return Ok(candidate.clone());
            }
        }
        Err(StatusError::HostNotInstalled { tried: candidates })
    }

    /// Dragon major version, taken from the install directory name.
    pub fn dns_version(&mut self) -> Result<u32, StatusError> {
        match self.dns_version {
            CacheSlot::Resolved(version) => return Ok(version),
            CacheSlot::Invalid => return Err(StatusError::Unresolvable("DNSVersion")),
            CacheSlot::Unresolved => {}
        }

        let dir = self.dns_install_dir(false)?;
        match dns_version_from_dir(&dir) {
            Ok(version) => {
                self.dns_version = CacheSlot::Resolved(version);
                Ok(version)
            }
            Err(reason) => {
                self.dns_version = CacheSlot::Invalid;
                Err(StatusError::VersionUnparseable { dir, reason })
            }
        }
    }

    /// Directory holding `nssystem.ini` and `nsapps.ini`.
    ///
    /// A `DNSIniDir` setting must be an existing directory; otherwise
    /// `%ALLUSERSPROFILE%/Nuance/NaturallySpeaking{version}` is used.
    pub fn dns_ini_dir(&mut self, force: bool) -> Result<PathBuf, StatusError> {
        if force {
            self.dns_ini_dir.invalidate();
            self.natlink_enabled = None;
        }
        match &self.dns_ini_dir {
            CacheSlot::Resolved(dir) => return Ok(dir.clone()),
            CacheSlot::Invalid => return Err(StatusError::Unresolvable(keys::DNS_INI_DIR)),
            CacheSlot::Unresolved => {}
        }

        let outcome = self.probe_dns_ini_dir();
        self.dns_ini_dir = outcome.as_ref().ok().cloned().into();
        outcome
    }

    fn probe_dns_ini_dir(&mut self) -> Result<PathBuf, StatusError> {
        let version = self.dns_version()?;

        if let Some(raw) = self.settings.get(keys::DNS_INI_DIR).filter(|v| !v.trim().is_empty()) {
            return validate_setting_path(
                self.fs.as_ref(),
                self.aliases.as_ref(),
                &raw,
                PathKind::Directory,
            )
            .map_err(|rejection| StatusError::InvalidOverride {
                key: keys::DNS_INI_DIR.to_string(),
                value: raw.clone(),
                reason: rejection.to_string(),
            });
        }

        let shared_data = normalize_path(Path::new(&self.aliases.expand(SHARED_DATA_ALIAS)));
        let candidate = shared_data
            .join("Nuance")
            .join(format!("NaturallySpeaking{version}"));
        if self.fs.is_dir(&candidate) {
            debug!("DNSIniDir: {}", candidate.display());
            return Ok(candidate);
        }
        Err(StatusError::IniDirNotFound {
            version,
            tried: vec![candidate],
        })
    }

    /// Full path of `nssystem.ini`, if the INI directory holds one.
    pub fn nssystem_ini(&mut self) -> Option<PathBuf> {
        self.dns_ini_file(enablement::NSSYSTEM_INI)
    }

    /// Full path of `nsapps.ini`, if the INI directory holds one.
    pub fn nsapps_ini(&mut self) -> Option<PathBuf> {
        self.dns_ini_file(enablement::NSAPPS_INI)
    }

    fn dns_ini_file(&mut self, name: &str) -> Option<PathBuf> {
        let dir = self.dns_ini_dir(false).ok()?;
        let file = dir.join(name);
        if self.fs.is_file(&file) {
            Some(file)
        } else {
            self.warnings.push(format!(
                "Cannot find {name} in {}; check the DNSIniDir setting",
                dir.display()
            ));
            None
        }
    }

    /// Product name matching the Dragon version.
    pub fn dns_name(&mut self) -> &'static str {
        match self.dns_version() {
            Ok(version) if version <= 11 => "NatSpeak",
            _ => "Dragon",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::NatlinkStatus;
    use crate::testing::TestRig;

    #[test]
    fn default_install_resolves_version_and_ini_dir() {
        let rig = TestRig::new().with_dragon();
        let mut status = NatlinkStatus::new(rig.context());

        assert!(status.construction_error().is_none());
        assert_eq!(
            status.dns_install_dir(false).unwrap(),
            PathBuf::from("/pf/Nuance/NaturallySpeaking15")
        );
        assert_eq!(status.dns_version().unwrap(), 15);
        let ini_dir = status.dns_ini_dir(false).unwrap();
        assert!(ini_dir.starts_with("/programdata"));
        assert!(ini_dir.to_string_lossy().contains("15"));
    }

    #[test]
    fn cached_install_dir_is_returned_without_probing() {
        let rig = TestRig::new().with_dragon();
        let mut status = NatlinkStatus::new(rig.context());

        rig.fs.freeze();
        let first = status.dns_install_dir(false).unwrap();
        let second = status.dns_install_dir(false).unwrap();
        assert_eq!(first, second);
        assert_eq!(status.dns_version().unwrap(), 15);
        assert!(status.dns_ini_dir(false).is_ok());
    }

    #[test]
    fn app_program_layout_is_found() {
        let rig = TestRig::new();
        rig.fs
            .add_file("/pf/Nuance/NaturallySpeaking16/App/Program/natspeak.exe");
        rig.fs.add_dir("/programdata/Nuance/NaturallySpeaking16");
        let mut status = NatlinkStatus::new(rig.context());

        assert_eq!(status.dns_version().unwrap(), 16);
    }

    #[test]
    fn newest_candidate_wins() {
        let rig = TestRig::new().with_dragon();
        rig.fs
            .add_file("/pf/Nuance/NaturallySpeaking16/Program/natspeak.exe");
        rig.fs.add_dir("/programdata/Nuance/NaturallySpeaking16");

        for _ in 0..3 {
            let mut status = NatlinkStatus::new(rig.context());
            assert_eq!(
                status.dns_install_dir(false).unwrap(),
                PathBuf::from("/pf/Nuance/NaturallySpeaking16")
            );
        }
    }

    #[test]
    fn candidate_without_executable_is_skipped() {
        let rig = TestRig::new().with_dragon();
        rig.fs.add_dir("/pf/Nuance/NaturallySpeaking19/Program");
        let mut status = NatlinkStatus::new(rig.context());

        assert_eq!(status.dns_version().unwrap(), 15);
    }

    #[test]
    fn missing_dragon_is_a_construction_error() {
        let rig = TestRig::new();
        rig.fs.add_dir("/pf");
        let mut status = NatlinkStatus::new(rig.context());

        assert!(matches!(
            status.construction_error(),
            Some(StatusError::HostNotInstalled { tried }) if tried.len() == 5
        ));
        assert_eq!(status.warnings().len(), 1);
        assert!(matches!(
            status.dns_ini_dir(false),
            Err(StatusError::Unresolvable(_))
        ));
        assert!(matches!(status.dns_version(), Err(StatusError::Unresolvable(_))));
    }

    #[test]
    fn missing_program_files_root_is_reported() {
        let rig = TestRig::new();
        let result = NatlinkStatus::try_new(rig.context());
        assert!(matches!(result, Err(StatusError::NoProgramFilesRoot(_))));
    }

    #[test]
    fn invalid_install_override_is_a_hard_error() {
        let rig = TestRig::new().with_dragon();
        rig.fs.add_file("/dragon/readme.txt");
        rig.settings.put(keys::DNS_INSTALL_DIR, "/dragon/readme.txt");

        let result = NatlinkStatus::try_new(rig.context());
        assert!(matches!(
            result,
            Err(StatusError::InvalidOverride { ref key, .. }) if key == keys::DNS_INSTALL_DIR
        ));
    }

    #[test]
    fn valid_install_override_wins_over_defaults() {
        let rig = TestRig::new().with_dragon();
        rig.fs.add_file("/opt/NaturallySpeaking16/Program/natspeak.exe");
        rig.fs.add_dir("/programdata/Nuance/NaturallySpeaking16");
        rig.settings.put(keys::DNS_INSTALL_DIR, "/opt/NaturallySpeaking16/");

        let mut status = NatlinkStatus::new(rig.context());
        assert_eq!(
            status.dns_install_dir(false).unwrap(),
            PathBuf::from("/opt/NaturallySpeaking16")
        );
        assert_eq!(status.dns_version().unwrap(), 16);
    }

    #[test]
    fn unparseable_version_is_a_hard_error() {
        let rig = TestRig::new();
        rig.fs.add_file("/opt/Dragon/Program/natspeak.exe");
        rig.fs.add_dir("/pf");
        rig.settings.put(keys::DNS_INSTALL_DIR, "/opt/Dragon");

        let result = NatlinkStatus::try_new(rig.context());
        assert!(matches!(result, Err(StatusError::VersionUnparseable { .. })));
    }

    #[test]
    fn invalid_ini_dir_override_is_a_hard_error() {
        let rig = TestRig::new().with_dragon();
        rig.settings.put(keys::DNS_INI_DIR, "/nowhere");

        let result = NatlinkStatus::try_new(rig.context());
        assert!(matches!(
            result,
            Err(StatusError::InvalidOverride { ref key, .. }) if key == keys::DNS_INI_DIR
        ));
    }

    #[test]
    fn missing_ini_dir_names_the_candidate() {
        let rig = TestRig::new();
        rig.fs
            .add_file("/pf/Nuance/NaturallySpeaking15/Program/natspeak.exe");

        let result = NatlinkStatus::try_new(rig.context());
        match result {
            Err(StatusError::IniDirNotFound { version, tried }) => {
                assert_eq!(version, 15);
                assert_eq!(
                    tried,
                    vec![PathBuf::from("/programdata/Nuance/NaturallySpeaking15")]
                );
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("expected an error"),
        }
    }

    #[test]
    fn forced_refresh_picks_up_a_new_install() {
        let rig = TestRig::new().with_dragon();
        let mut status = NatlinkStatus::new(rig.context());

        rig.fs
            .add_file("/pf/Nuance/NaturallySpeaking17/Program/natspeak.exe");
        rig.fs.add_dir("/programdata/Nuance/NaturallySpeaking17");
        assert_eq!(status.dns_version().unwrap(), 15);

        status.dns_install_dir(true).unwrap();
        assert_eq!(status.dns_version().unwrap(), 17);
        assert!(
            status
                .dns_ini_dir(true)
                .unwrap()
                .ends_with("NaturallySpeaking17")
        );
    }

    #[test]
    fn missing_nssystem_ini_warns() {
        let rig = TestRig::new().with_dragon();
        let mut status = NatlinkStatus::new(rig.context());

        assert!(status.nssystem_ini().is_none());
        assert_eq!(status.warnings().len(), 1);
    }

    #[test]
    fn dns_name_follows_version() {
        let rig = TestRig::new().with_dragon();
        let mut status = NatlinkStatus::new(rig.context());
        assert_eq!(status.dns_name(), "Dragon");
    }
}
