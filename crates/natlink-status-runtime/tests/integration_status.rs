//! End-to-end status resolution against a machine laid out in a temp dir.

use std::fs;
use std::path::{Path, PathBuf};

use natlink_status_core::status::{
    APP_KEY, APP_SECTION, NATLINK_CLSID, NATLINK_MAIN, NATLINK_PACKAGE, NSAPPS_INI,
    NSSYSTEM_INI, SYSTEM_KEY, SYSTEM_SECTION, SYSTEM_VALUE,
};
use natlink_status_core::testing::StaticRegistry;
use natlink_status_core::{
    Enablement, NatlinkStatus, SettingsStore, StatusContext, StatusField, keys,
};
use natlink_status_runtime::{
    DefaultSystemInfo, IniProfileReader, IniSettingsStore, KnownFolderExpander, StdFileSystem,
};
use tempfile::TempDir;

/// A Dragon 15 install plus a Natlink checkout under one temp dir.
struct Machine {
    root: TempDir,
}

impl Machine {
    fn new() -> Self {
        let machine = Self {
            root: tempfile::tempdir().unwrap(),
        };
        let program = machine
            .program_files()
            .join("Nuance")
            .join("NaturallySpeaking15")
            .join("Program");
        fs::create_dir_all(&program).unwrap();
        fs::write(program.join("natspeak.exe"), "").unwrap();
        fs::create_dir_all(machine.ini_dir()).unwrap();
        fs::create_dir_all(machine.core_dir()).unwrap();
        fs::write(machine.core_dir().join(NATLINK_MAIN), "").unwrap();
        machine
    }

    fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    fn program_files(&self) -> PathBuf {
        self.path("pf")
    }

    fn shared_data(&self) -> PathBuf {
        self.path("programdata")
    }

    fn ini_dir(&self) -> PathBuf {
        self.shared_data().join("Nuance").join("NaturallySpeaking15")
    }

    fn core_dir(&self) -> PathBuf {
        self.path("natlink/MacroSystem/core")
    }

    fn settings_file(&self) -> PathBuf {
        self.path("home/.natlink/natlinkstatus.ini")
    }

    fn write_ini(&self, file: &str, section: &str, key: &str, value: &str) {
        fs::write(
            self.ini_dir().join(file),
            format!("[{section}]\n{key}={value}\n"),
        )
        .unwrap();
    }

    fn setting(&self, key: &str, value: &str) {
        let mut store = IniSettingsStore::open(self.settings_file()).unwrap();
        store.set(key, value).unwrap();
    }

    fn context(&self, registered: bool) -> StatusContext {
        let registry = if registered {
            StaticRegistry::new().with_package(NATLINK_PACKAGE, self.core_dir())
        } else {
            StaticRegistry::new()
        };
        let aliases = KnownFolderExpander::empty()
            .unwrap()
            .with_alias("PROGRAM_FILESX86", self.program_files())
            .with_alias("ALLUSERSPROFILE", self.shared_data());
        StatusContext {
            settings: Box::new(IniSettingsStore::open(self.settings_file()).unwrap()),
            fs: Box::new(StdFileSystem::new()),
            registry: Box::new(registry),
            aliases: Box::new(aliases),
            ini: Box::new(IniProfileReader::new()),
            system: Box::new(DefaultSystemInfo::new()),
            core_directory: self.core_dir(),
            search_path: Vec::new(),
        }
    }
}

fn normalized(path: &Path) -> PathBuf {
    natlink_status_core::paths::normalize_path(path)
}

#[test]
fn fresh_install_resolves_dragon_paths() {
    let machine = Machine::new();
    let mut status = NatlinkStatus::new(machine.context(false));

    assert_eq!(
        status.dns_install_dir(false).unwrap(),
        normalized(&machine.program_files().join("Nuance/NaturallySpeaking15"))
    );
    assert_eq!(status.dns_version().unwrap(), 15);
    let ini_dir = status.dns_ini_dir(false).unwrap();
    assert_eq!(ini_dir, normalized(&machine.ini_dir()));
    assert!(ini_dir.to_string_lossy().contains("15"));
    assert_eq!(status.natlink_is_enabled(), Enablement::Disabled);
    assert!(status.warnings().is_empty());
}

#[test]
fn vocola_without_library_is_disabled_with_warning() {
    let machine = Machine::new();
    let vocola_user = machine.path("Documents/Vocola");
    fs::create_dir_all(&vocola_user).unwrap();
    machine.setting(keys::VOCOLA_USER_DIRECTORY, &vocola_user.to_string_lossy());
    machine.write_ini(NSSYSTEM_INI, SYSTEM_SECTION, SYSTEM_KEY, SYSTEM_VALUE);
    machine.write_ini(NSAPPS_INI, APP_SECTION, APP_KEY, NATLINK_CLSID);

    let mut status = NatlinkStatus::new(machine.context(true));

    assert_eq!(status.natlink_is_enabled(), Enablement::Enabled);
    assert_eq!(status.vocola_is_enabled(), Enablement::Disabled);
    let warnings = status.warnings().messages();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("Vocola library directory"));
    assert!(warnings[0].contains("_vocola_main.py"));
}

#[test]
fn contradictory_flags_are_an_error_state_reported_once() {
    let machine = Machine::new();
    machine.write_ini(NSSYSTEM_INI, SYSTEM_SECTION, SYSTEM_KEY, SYSTEM_VALUE);
    machine.write_ini(NSAPPS_INI, APP_SECTION, APP_KEY, "{not-natlink}");

    let mut status = NatlinkStatus::new(machine.context(true));

    assert_eq!(status.natlink_is_enabled(), Enablement::ErrorState);
    assert_eq!(status.warnings().len(), 1);

    // Memoized: a changed file is not reread and nothing is reported again.
    machine.write_ini(NSAPPS_INI, APP_SECTION, APP_KEY, NATLINK_CLSID);
    assert_eq!(status.natlink_is_enabled(), Enablement::ErrorState);
    assert_eq!(status.warnings().len(), 1);
}

#[test]
fn enabled_vocola_creates_compiled_grammars_dir() {
    let machine = Machine::new();
    let vocola_user = machine.path("Documents/Vocola");
    fs::create_dir_all(&vocola_user).unwrap();
    let library = machine.path("Vocola/src/vocola2");
    fs::create_dir_all(&library).unwrap();
    fs::write(library.join("_vocola_main.py"), "").unwrap();
    machine.setting(keys::VOCOLA_USER_DIRECTORY, &vocola_user.to_string_lossy());
    machine.write_ini(NSSYSTEM_INI, SYSTEM_SECTION, SYSTEM_KEY, SYSTEM_VALUE);
    machine.write_ini(NSAPPS_INI, APP_SECTION, APP_KEY, NATLINK_CLSID);

    let mut status = NatlinkStatus::new(machine.context(true));
    let snapshot = status.snapshot();

    assert_eq!(snapshot.flag(StatusField::VocolaIsEnabled), Enablement::Enabled);
    assert!(vocola_user.join("CompiledGrammars").is_dir());
    assert!(status.search_path().contains(&normalized(&library)));
}

#[test]
fn setting_changes_are_written_and_reresolved() {
    let machine = Machine::new();
    let user_dir = machine.path("Documents/grammars");
    fs::create_dir_all(&user_dir).unwrap();

    let mut status = NatlinkStatus::new(machine.context(false));
    assert_eq!(status.user_directory(false), None);

    status
        .set_setting(keys::USER_DIRECTORY, &user_dir.to_string_lossy())
        .unwrap();
    assert_eq!(status.user_directory(false), Some(normalized(&user_dir)));

    let reopened = IniSettingsStore::open(machine.settings_file()).unwrap();
    assert_eq!(
        reopened.get(keys::USER_DIRECTORY),
        Some(user_dir.to_string_lossy().into_owned())
    );

    status.delete_setting(keys::USER_DIRECTORY).unwrap();
    assert_eq!(status.user_directory(false), None);
}
