//! Information about the speech profile Dragon currently has open.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use super::NatlinkStatus;

const OPTIONS_INI: &str = "options.ini";
const ACOUSTIC_INI: &str = "acoustic.ini";
const TOPICS_INI: &str = "topics.ini";

const OPTIONS_SECTION: &str = "Options";
const LAST_USED_ACOUSTICS: &str = "Last Used Acoustics";
const LAST_USED_TOPIC: &str = "Last Used Topic";
const BASE_ACOUSTIC_SECTION: &str = "Base Acoustic";
const BASE_TOPIC_SECTION: &str = "Base Topic";

/// Language code reported while no speech profile is open.
pub const NO_PROFILE_LANGUAGE: &str = "tst";

/// Profile languages as Dragon writes them, both native and English names.
/// English dialects ("UK English", "US English", ...) are matched separately.
const LANGUAGES: [(&str, &str); 10] = [
    ("Nederlands", "nld"),
    ("Fran\u{e7}ais", "fra"),
    ("Deutsch", "deu"),
    ("Italiano", "ita"),
    ("Espa\u{f1}ol", "esp"),
    ("Dutch", "nld"),
    ("French", "fra"),
    ("German", "deu"),
    ("Italian", "ita"),
    ("Spanish", "esp"),
];

const SHIFT_KEYS: [(&str, &str); 6] = [
    ("nld", "Shift"),
    ("enx", "shift"),
    ("fra", "maj"),
    ("deu", "umschalt"),
    ("ita", "maiusc"),
    ("esp", "may\u{fa}s"),
];

/// The profile passed in by Dragon's user-change callback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub user_name: String,
    #[serde(rename = "DNSuserDirectory")]
    pub dns_user_directory: PathBuf,
    /// Three-letter code, empty when the profile language is unknown.
    pub language: String,
    /// Language as written in the profile, e.g. `Nederlands` or `UK English`.
    pub user_language: String,
    pub user_topic: String,
}

/// Three-letter code for a profile language.
pub fn language_code(user_language: &str) -> Option<&'static str> {
    if let Some((_, code)) = LANGUAGES.iter().find(|(name, _)| *name == user_language) {
        return Some(*code);
    }
    (user_language.split_whitespace().last() == Some("English")).then_some("enx")
}

/// Localized name of the shift key for a language code.
pub fn shift_key_for(language: &str) -> Option<&'static str> {
    SHIFT_KEYS
        .iter()
        .find(|(code, _)| *code == language)
        .map(|(_, key)| *key)
}

/// Language part of an `acoustic.ini` model spec like `Nederlands | BestMatch V (...)`.
fn language_from_model_spec(spec: &str) -> &str {
    let before_bar = spec.split('|').next().unwrap_or_default().trim();
    before_bar.split('(').next().unwrap_or_default().trim()
}

impl NatlinkStatus {
    /// Record the open speech profile and read its language and topic.
    pub fn set_user_info(&mut self, user_name: &str, dns_user_directory: &Path) {
        let user_language = self.user_language_from_profile(dns_user_directory);
        let language = match language_code(&user_language) {
            Some(code) => code.to_string(),
            None => {
                if !user_language.is_empty() {
                    self.warnings.push(format!(
                        "No language code known for profile language \"{user_language}\""
                    ));
                }
                String::new()
            }
        };
        let user_topic = self
            .base_topic_of(dns_user_directory)
            .unwrap_or_default();

        debug!("User {user_name}: language {language}, topic {user_topic}");
        self.user_info = Some(UserInfo {
            user_name: user_name.to_string(),
            dns_user_directory: dns_user_directory.to_path_buf(),
            language,
            user_language,
            user_topic,
        });
    }

    pub fn clear_user_info(&mut self) {
        self.user_info = None;
    }

    pub const fn user_info(&self) -> Option<&UserInfo> {
        self.user_info.as_ref()
    }

    pub fn user_name(&self) -> &str {
        self.user_info.as_ref().map_or("", |info| info.user_name.as_str())
    }

    pub fn dns_user_directory(&self) -> Option<&Path> {
        self.user_info
            .as_ref()
            .map(|info| info.dns_user_directory.as_path())
    }

    /// Three-letter language code; `tst` while no profile is open.
    pub fn language(&self) -> &str {
        self.user_info
            .as_ref()
            .map_or(NO_PROFILE_LANGUAGE, |info| info.language.as_str())
    }

    pub fn user_language(&self) -> &str {
        self.user_info
            .as_ref()
            .map_or("", |info| info.user_language.as_str())
    }

    pub fn user_topic(&self) -> &str {
        self.user_info
            .as_ref()
            .map_or("", |info| info.user_topic.as_str())
    }

    /// Shift key name in braces (`{Shift}`), empty for unknown languages.
    pub fn shift_key(&self) -> String {
        shift_key_for(self.language())
            .map(|key| format!("{{{key}}}"))
            .unwrap_or_default()
    }

    /// Base acoustic model of the open profile.
    pub fn base_model(&mut self) -> String {
        let Some(dir) = self.dns_user_directory().map(Path::to_path_buf) else {
            return String::new();
        };
        self.last_used(&dir, LAST_USED_ACOUSTICS)
            .and_then(|key| {
                self.ini
                    .read_value(&dir.join(ACOUSTIC_INI), BASE_ACOUSTIC_SECTION, &key)
            })
            .unwrap_or_default()
    }

    /// Base topic of the open profile.
    pub fn base_topic(&mut self) -> String {
        let Some(dir) = self.dns_user_directory().map(Path::to_path_buf) else {
            return String::new();
        };
        self.base_topic_of(&dir).unwrap_or_default()
    }

    fn base_topic_of(&mut self, dir: &Path) -> Option<String> {
        let key = self.last_used(dir, LAST_USED_TOPIC)?;
        self.ini
            .read_value(&dir.join(TOPICS_INI), BASE_TOPIC_SECTION, &key)
    }

    fn user_language_from_profile(&mut self, dir: &Path) -> String {
        let Some(key) = self.last_used(dir, LAST_USED_ACOUSTICS) else {
            return String::new();
        };
        let acoustic_ini = dir.join(ACOUSTIC_INI);
        if !self.fs.is_file(&acoustic_ini) {
            self.warnings.push(format!(
                "Cannot determine the profile language: {} is missing",
                acoustic_ini.display()
            ));
            return String::new();
        }
        match self
            .ini
            .read_value(&acoustic_ini, BASE_ACOUSTIC_SECTION, &key)
            .filter(|spec| !spec.trim().is_empty())
        {
            Some(spec) => language_from_model_spec(&spec).to_string(),
            None => {
                self.warnings.push(format!(
                    "No model for \"{key}\" in [{BASE_ACOUSTIC_SECTION}] of {}",
                    acoustic_ini.display()
                ));
                String::new()
            }
        }
    }

    /// Value of a `Last Used ...` key in the profile's `options.ini`.
    fn last_used(&mut self, dir: &Path, key: &str) -> Option<String> {
        if !self.fs.is_dir(dir) {
            debug!("No speech profile directory at {}", dir.display());
            return None;
        }
        let options = dir.join(OPTIONS_INI);
        if !self.fs.is_file(&options) {
            self.warnings.push(format!(
                "Speech profile has no {OPTIONS_INI}: {}",
                options.display()
            ));
            return None;
        }
        let value = self
            .ini
            .read_value(&options, OPTIONS_SECTION, key)
            .filter(|v| !v.is_empty());
        if value.is_none() {
            self.warnings.push(format!(
                "No \"{key}\" in [{OPTIONS_SECTION}] of {}",
                options.display()
            ));
        }
        value
    }
}
