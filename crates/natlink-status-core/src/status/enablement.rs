//! Enablement verdicts for Natlink and the grammar subsystems.

use tracing::debug;

use super::NatlinkStatus;
use super::subsystems::Library;
use crate::cache::Enablement;
use crate::paths::{normalize_path, paths_equal_ignore_case};

/// Package name Natlink registers its core directory under.
pub const NATLINK_PACKAGE: &str = "Natlink";

/// Entry module a registered core directory must contain.
pub const NATLINK_MAIN: &str = "natlinkmain.py";

pub const NSSYSTEM_INI: &str = "nssystem.ini";
pub const NSAPPS_INI: &str = "nsapps.ini";

/// Class id Dragon uses to load Natlink.
pub const NATLINK_CLSID: &str = "{dd990001-bb89-11d2-b031-0060088dc929}";

pub const SYSTEM_SECTION: &str = "Global Clients";
pub const SYSTEM_KEY: &str = ".Natlink";
pub const SYSTEM_VALUE: &str = "Python Macro System";

pub const APP_SECTION: &str = ".Natlink";
pub const APP_KEY: &str = "App Support GUID";

/// Combine the `nssystem.ini` and `nsapps.ini` flags into a verdict.
///
/// Dragon only looks at `nsapps.ini` when `nssystem.ini` names Natlink, so
/// the system flag gates everything. The returned message is a warning to
/// record alongside the verdict.
pub fn integration_verdict(system: Option<&str>, app: Option<&str>) -> (Enablement, Option<String>) {
    let system = system.unwrap_or_default();
    let app = app.unwrap_or_default();

    if system == SYSTEM_VALUE {
        if app == NATLINK_CLSID {
            return (Enablement::Enabled, None);
        }
        let message = format!(
            "Contradictory Natlink settings: {NSSYSTEM_INI} [{SYSTEM_SECTION}] {SYSTEM_KEY} = \"{system}\" \
             enables Natlink, but {NSAPPS_INI} [{APP_SECTION}] {APP_KEY} = \"{app}\" \
             (expected \"{NATLINK_CLSID}\")"
        );
        return (Enablement::ErrorState, Some(message));
    }

    if system.is_empty() {
        (Enablement::Disabled, None)
    } else {
        (
            Enablement::Disabled,
            Some(format!(
                "Unexpected value of {NSSYSTEM_INI} [{SYSTEM_SECTION}] {SYSTEM_KEY}: \"{system}\""
            )),
        )
    }
}

impl NatlinkStatus {
    /// Whether Dragon will load Natlink from this core directory.
    ///
    /// The verdict is computed once per instance; changes on disk are only
    /// seen after a forced refresh of the Dragon paths.
    pub fn natlink_is_enabled(&mut self) -> Enablement {
        if let Some(verdict) = self.natlink_enabled {
            return verdict;
        }
        let verdict = self.evaluate_natlink();
        debug!("Natlink is {verdict}");
        self.natlink_enabled = Some(verdict);
        verdict
    }

    fn evaluate_natlink(&mut self) -> Enablement {
        let Some(registered) = self.registry.installed_package_path(NATLINK_PACKAGE) else {
            debug!("{NATLINK_PACKAGE} is not registered");
            return Enablement::Disabled;
        };
        let registered = normalize_path(&registered);
        if !paths_equal_ignore_case(&registered, &self.core_directory) {
            self.warnings.push(format!(
                "{NATLINK_PACKAGE} is registered at {}, not at the running core directory {}",
                registered.display(),
                self.core_directory.display()
            ));
            return Enablement::Disabled;
        }
        if !self.fs.is_file(&self.core_directory.join(NATLINK_MAIN)) {
            self.warnings.push(format!(
                "{NATLINK_PACKAGE} is registered at {}, but that directory does not contain {NATLINK_MAIN}",
                registered.display()
            ));
            return Enablement::Disabled;
        }

        if self.dns_install_dir(false).is_err() || self.dns_ini_dir(false).is_err() {
            return Enablement::Disabled;
        }

        let Some(nssystem) = self.nssystem_ini() else {
            return Enablement::Disabled;
        };
        let system = self.ini.read_value(&nssystem, SYSTEM_SECTION, SYSTEM_KEY);
        let app = self
            .nsapps_ini()
            .and_then(|nsapps| self.ini.read_value(&nsapps, APP_SECTION, APP_KEY));

        let (verdict, message) = integration_verdict(system.as_deref(), app.as_deref());
        if let Some(message) = message {
            self.warnings.push(message);
        }
        verdict
    }

    /// User grammars run when Natlink is enabled and `UserDirectory` is valid.
    pub fn user_is_enabled(&mut self) -> Enablement {
        if !self.natlink_is_enabled().is_enabled() {
            return Enablement::Disabled;
        }
        Enablement::from_bool(self.user_directory(false).is_some())
    }

    /// Vocola runs when Natlink is enabled and its user, library and
    /// compiled grammars directories all resolve.
    pub fn vocola_is_enabled(&mut self) -> Enablement {
        if !self.natlink_is_enabled().is_enabled() {
            return Enablement::Disabled;
        }
        if self.vocola_user_directory(false).is_none() {
            return Enablement::Disabled;
        }
        if self.vocola_directory(false).is_none() {
            self.warn_missing_library(Library::Vocola);
            return Enablement::Disabled;
        }
        Enablement::from_bool(self.vocola_grammars_directory(false).is_some())
    }

    /// Unimacro runs when Natlink is enabled, its user directory resolves,
    /// its library holds `_control.py` and the active grammars directory
    /// resolves.
    pub fn unimacro_is_enabled(&mut self) -> Enablement {
        if !self.natlink_is_enabled().is_enabled() {
            return Enablement::Disabled;
        }
        if self.unimacro_user_directory(false).is_none() {
            return Enablement::Disabled;
        }
        let Some(library) = self.unimacro_directory(false) else {
            self.warn_missing_library(Library::Unimacro);
            return Enablement::Disabled;
        };
        let has_control = self
            .fs
            .list_dir(&library)
            .is_ok_and(|names| names.iter().any(|n| n == Library::Unimacro.marker()));
        if !has_control {
            return Enablement::Disabled;
        }
        Enablement::from_bool(self.unimacro_grammars_directory(false).is_some())
    }

    fn warn_missing_library(&mut self, library: Library) {
        let tried: Vec<String> = self
            .library_candidates(library)
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        self.warnings.push(format!(
            "{name} user directory is set, but the {name} library directory (holding {marker}) was not found in {tried} or on the search path",
            name = library.name(),
            marker = library.marker(),
            tried = tried.join(", "),
        ));
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::*;
    use crate::ports::{FileSystemProbe, MockRegistryProbe};
    use crate::status::keys;
    use crate::testing::TestRig;

    #[test]
    fn truth_table_holds() {
        let other = "{00000000-0000-0000-0000-000000000000}";
        let cases = [
            (Some(SYSTEM_VALUE), Some(NATLINK_CLSID), Enablement::Enabled),
            (Some(SYSTEM_VALUE), Some(other), Enablement::ErrorState),
            (Some(SYSTEM_VALUE), None, Enablement::ErrorState),
            (None, Some(NATLINK_CLSID), Enablement::Disabled),
            (Some(""), Some(NATLINK_CLSID), Enablement::Disabled),
            (None, None, Enablement::Disabled),
        ];
        for (system, app, expected) in cases {
            let (verdict, _) = integration_verdict(system, app);
            assert_eq!(verdict, expected, "system={system:?} app={app:?}");
        }
    }

    #[test]
    fn only_contradictions_and_odd_values_warn() {
        assert!(integration_verdict(Some(SYSTEM_VALUE), Some(NATLINK_CLSID)).1.is_none());
        assert!(integration_verdict(None, Some(NATLINK_CLSID)).1.is_none());
        assert!(integration_verdict(Some(SYSTEM_VALUE), Some("x")).1.is_some());
        assert!(integration_verdict(Some("Something Else"), None).1.is_some());
    }

    #[test]
    fn enabled_rig_is_enabled() {
        let rig = TestRig::new().with_dragon().with_natlink_enabled();
        let mut status = NatlinkStatus::new(rig.context());

        assert_eq!(status.natlink_is_enabled(), Enablement::Enabled);
        assert!(status.warnings().is_empty());
    }

    #[test]
    fn flags_on_disk_follow_the_truth_table() {
        let cases = [
            (Some(SYSTEM_VALUE), Some(NATLINK_CLSID), Enablement::Enabled),
            (Some(SYSTEM_VALUE), Some("{bad}"), Enablement::ErrorState),
            (None, Some(NATLINK_CLSID), Enablement::Disabled),
            (None, None, Enablement::Disabled),
        ];
        for (system, app, expected) in cases {
            let rig = TestRig::new()
                .with_dragon()
                .with_natlink_enabled();
            let rig = TestRig {
                ini: crate::testing::MemoryIniFiles::new(),
                ..rig
            };
            rig.set_integration_flags(system, app);
            let mut status = NatlinkStatus::new(rig.context());
            assert_eq!(status.natlink_is_enabled(), expected);
        }
    }

    #[test]
    fn unregistered_natlink_is_disabled() {
        let rig = TestRig::new().with_dragon();
        rig.set_integration_flags(Some(SYSTEM_VALUE), Some(NATLINK_CLSID));
        let mut status = NatlinkStatus::new(rig.context());

        assert_eq!(status.natlink_is_enabled(), Enablement::Disabled);
    }

    #[test]
    fn registration_elsewhere_is_disabled_with_warning() {
        let rig = TestRig::new().with_dragon();
        rig.set_integration_flags(Some(SYSTEM_VALUE), Some(NATLINK_CLSID));
        let rig = TestRig {
            registry: rig.registry.clone().with_package(NATLINK_PACKAGE, "/old/natlink/core"),
            ..rig
        };
        let mut status = NatlinkStatus::new(rig.context());

        assert_eq!(status.natlink_is_enabled(), Enablement::Disabled);
        assert_eq!(status.warnings().len(), 1);
    }

    #[test]
    fn registration_compares_case_insensitively() {
        let rig = TestRig::new().with_dragon();
        rig.set_integration_flags(Some(SYSTEM_VALUE), Some(NATLINK_CLSID));
        rig.fs.add_file("/natlink/MacroSystem/core/natlinkmain.py");
        let rig = TestRig {
            registry: rig
                .registry
                .clone()
                .with_package(NATLINK_PACKAGE, "/Natlink/macrosystem/Core/"),
            ..rig
        };
        let mut status = NatlinkStatus::new(rig.context());

        assert_eq!(status.natlink_is_enabled(), Enablement::Enabled);
    }

    #[test]
    fn registered_core_without_natlinkmain_is_disabled() {
        let rig = TestRig::new().with_dragon();
        rig.set_integration_flags(Some(SYSTEM_VALUE), Some(NATLINK_CLSID));
        let rig = TestRig {
            registry: rig.registry.clone().with_package(NATLINK_PACKAGE, "/natlink/MacroSystem/core"),
            ..rig
        };
        let mut status = NatlinkStatus::new(rig.context());

        assert_eq!(status.natlink_is_enabled(), Enablement::Disabled);
        assert_eq!(status.warnings().len(), 1);
        assert!(status.warnings().messages()[0].contains(NATLINK_MAIN));
    }

    #[test]
    fn verdict_is_memoized() {
        let rig = TestRig::new().with_dragon();
        rig.set_integration_flags(Some(SYSTEM_VALUE), Some(NATLINK_CLSID));
        rig.fs.add_file("/natlink/MacroSystem/core/natlinkmain.py");
        let mut registry = MockRegistryProbe::new();
        registry
            .expect_installed_package_path()
            .times(1)
            .returning(|_| Some(PathBuf::from("/natlink/MacroSystem/core")));
        let mut context = rig.context();
        context.registry = Box::new(registry);
        let mut status = NatlinkStatus::new(context);

        assert_eq!(status.natlink_is_enabled(), Enablement::Enabled);
        rig.fs.freeze();
        assert_eq!(status.natlink_is_enabled(), Enablement::Enabled);
    }

    #[test]
    fn contradiction_is_reported_once() {
        let rig = TestRig::new().with_dragon().with_natlink_enabled();
        let rig = TestRig {
            ini: crate::testing::MemoryIniFiles::new(),
            ..rig
        };
        rig.set_integration_flags(Some(SYSTEM_VALUE), Some("{something-else}"));
        let mut status = NatlinkStatus::new(rig.context());

        assert_eq!(status.natlink_is_enabled(), Enablement::ErrorState);
        assert_eq!(status.natlink_is_enabled(), Enablement::ErrorState);
        assert_eq!(status.warnings().len(), 1);
        assert!(status.warnings().messages()[0].contains("Contradictory"));
    }

    #[test]
    fn subsystems_are_disabled_while_natlink_is_disabled() {
        let rig = TestRig::new().with_dragon();
        rig.fs.add_dir("/user");
        rig.fs.add_file("/Vocola/src/vocola2/_vocola_main.py");
        rig.fs.add_file("/Unimacro/src/unimacro/_control.py");
        rig.settings.put(keys::USER_DIRECTORY, "/user");
        rig.settings.put(keys::VOCOLA_USER_DIRECTORY, "/user");
        rig.settings.put(keys::UNIMACRO_USER_DIRECTORY, "/user");
        let mut status = NatlinkStatus::new(rig.context());

        assert_eq!(status.natlink_is_enabled(), Enablement::Disabled);
        assert_eq!(status.user_is_enabled(), Enablement::Disabled);
        assert_eq!(status.vocola_is_enabled(), Enablement::Disabled);
        assert_eq!(status.unimacro_is_enabled(), Enablement::Disabled);
        assert!(!rig.fs.exists(Path::new("/user/CompiledGrammars")));
    }

    #[test]
    fn all_subsystems_enabled() {
        let rig = TestRig::new().with_dragon().with_natlink_enabled();
        rig.fs.add_dir("/user");
        rig.fs.add_dir("/vocola-user");
        rig.fs.add_dir("/unimacro-user");
        rig.fs.add_file("/Vocola/src/vocola2/_vocola_main.py");
        rig.fs.add_file("/Unimacro/src/unimacro/_control.py");
        rig.settings.put(keys::USER_DIRECTORY, "/user");
        rig.settings.put(keys::VOCOLA_USER_DIRECTORY, "/vocola-user");
        rig.settings.put(keys::UNIMACRO_USER_DIRECTORY, "/unimacro-user");
        let mut status = NatlinkStatus::new(rig.context());

        assert_eq!(status.user_is_enabled(), Enablement::Enabled);
        assert_eq!(status.vocola_is_enabled(), Enablement::Enabled);
        assert_eq!(status.unimacro_is_enabled(), Enablement::Enabled);
        assert_eq!(status.unimacro_ini_files_editor(), "notepad");
        assert!(status.warnings().is_empty());
    }

    #[test]
    fn missing_vocola_library_is_named_in_a_warning() {
        let rig = TestRig::new().with_dragon().with_natlink_enabled();
        rig.fs.add_dir("/vocola-user");
        rig.settings.put(keys::VOCOLA_USER_DIRECTORY, "/vocola-user");
        let mut status = NatlinkStatus::new(rig.context());

        assert_eq!(status.vocola_is_enabled(), Enablement::Disabled);
        assert_eq!(status.warnings().len(), 1);
        let message = &status.warnings().messages()[0];
        assert!(message.contains("Vocola library directory"));
        assert!(message.contains("/Vocola/src/vocola2"));
    }

    #[test]
    fn unimacro_without_user_directory_is_disabled_quietly() {
        let rig = TestRig::new().with_dragon().with_natlink_enabled();
        rig.fs.add_file("/Unimacro/src/unimacro/_control.py");
        let mut status = NatlinkStatus::new(rig.context());

        assert_eq!(status.unimacro_is_enabled(), Enablement::Disabled);
        assert!(status.warnings().is_empty());
    }

    #[test]
    fn error_state_disables_subsystems() {
        let rig = TestRig::new().with_dragon().with_natlink_enabled();
        let rig = TestRig {
            ini: crate::testing::MemoryIniFiles::new(),
            ..rig
        };
        rig.set_integration_flags(Some(SYSTEM_VALUE), None);
        rig.fs.add_dir("/user");
        rig.settings.put(keys::USER_DIRECTORY, "/user");
        let mut status = NatlinkStatus::new(rig.context());

        assert_eq!(status.natlink_is_enabled(), Enablement::ErrorState);
        assert_eq!(status.user_is_enabled(), Enablement::Disabled);
    }
}
