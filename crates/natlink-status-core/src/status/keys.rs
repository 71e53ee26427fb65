//! Names of the keys read from and written to the settings store.

pub const DNS_INSTALL_DIR: &str = "DNSInstallDir";
pub const DNS_INI_DIR: &str = "DNSIniDir";
pub const USER_DIRECTORY: &str = "UserDirectory";
pub const UNIMACRO_USER_DIRECTORY: &str = "UnimacroUserDirectory";
pub const VOCOLA_USER_DIRECTORY: &str = "VocolaUserDirectory";
pub const AHK_USER_DIR: &str = "AhkUserDir";
pub const AHK_EXE_DIR: &str = "AhkExeDir";
pub const UNIMACRO_INI_FILES_EDITOR: &str = "UnimacroIniFilesEditor";
pub const VOCOLA_TAKES_LANGUAGES: &str = "VocolaTakesLanguages";
pub const VOCOLA_TAKES_UNIMACRO_ACTIONS: &str = "VocolaTakesUnimacroActions";
pub const DEBUG_LOAD: &str = "NatlinkmainDebugLoad";
pub const DEBUG_CALLBACK: &str = "NatlinkmainDebugCallback";
pub const PYD_REGISTERED: &str = "NatlinkPydRegistered";

// Legacy keys, migrated or removed when a status object is created.
pub const LEGACY_DLL_REGISTERED: &str = "NatlinkDllRegistered";
pub const LEGACY_INCLUDE_UNIMACRO: &str = "IncludeUnimacroInPythonPath";

/// Every current key, in the order a configuration listing shows them.
pub const SETTING_KEYS: [&str; 13] = [
    DNS_INSTALL_DIR,
    DNS_INI_DIR,
    USER_DIRECTORY,
    UNIMACRO_USER_DIRECTORY,
    VOCOLA_USER_DIRECTORY,
    AHK_USER_DIR,
    AHK_EXE_DIR,
    UNIMACRO_INI_FILES_EDITOR,
    VOCOLA_TAKES_LANGUAGES,
    VOCOLA_TAKES_UNIMACRO_ACTIONS,
    DEBUG_LOAD,
    DEBUG_CALLBACK,
    PYD_REGISTERED,
];
