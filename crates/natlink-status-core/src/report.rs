//! Human-readable status report.

use crate::cache::Enablement;
use crate::snapshot::{StatusField, StatusSnapshot, StatusValue};
use crate::status::NatlinkStatus;

const VOCOLA_FIELDS: [StatusField; 5] = [
    StatusField::VocolaUserDirectory,
    StatusField::VocolaDirectory,
    StatusField::VocolaGrammarsDirectory,
    StatusField::VocolaTakesLanguages,
    StatusField::VocolaTakesUnimacroActions,
];

const UNIMACRO_FIELDS: [StatusField; 4] = [
    StatusField::UnimacroUserDirectory,
    StatusField::UnimacroDirectory,
    StatusField::UnimacroGrammarsDirectory,
    StatusField::UnimacroIniFilesEditor,
];

const SYSTEM_FIELDS: [StatusField; 5] = [
    StatusField::DnsInstallDir,
    StatusField::DnsIniDir,
    StatusField::DnsVersion,
    StatusField::DnsName,
    StatusField::WindowsVersion,
];

/// Collects report lines, tracking which fields are still to be shown.
struct ReportBuilder<'a> {
    snapshot: &'a StatusSnapshot,
    lines: Vec<String>,
    remaining: Vec<StatusField>,
}

impl<'a> ReportBuilder<'a> {
    fn new(snapshot: &'a StatusSnapshot) -> Self {
        let remaining = snapshot
            .iter()
            .map(|(field, _)| field)
            .filter(|field| *field != StatusField::Warnings)
            .collect();
        Self {
            snapshot,
            lines: Vec::new(),
            remaining,
        }
    }

    fn title(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }

    /// Replace a flag field by a header line.
    fn header(&mut self, field: StatusField, text: &str) {
        self.lines.push(text.to_string());
        self.skip(field);
    }

    fn field(&mut self, field: StatusField) {
        let value = match self.snapshot.get(field) {
            Some(StatusValue::Empty) | None => "-".to_string(),
            Some(value) => value.to_string(),
        };
        self.lines.push(format!("\t{}\t{value}", field.key()));
        self.skip(field);
    }

    fn fields(&mut self, fields: &[StatusField]) {
        for field in fields {
            self.field(*field);
        }
    }

    fn skip(&mut self, field: StatusField) {
        self.remaining.retain(|f| *f != field);
    }

    fn skip_all(&mut self, fields: &[StatusField]) {
        for field in fields {
            self.skip(*field);
        }
    }

    fn subsystem(&mut self, flag: StatusField, name: &str, fields: &[StatusField]) {
        if self.snapshot.flag(flag).is_enabled() {
            self.header(flag, &format!("---{name} enabled"));
            self.fields(fields);
        } else {
            self.header(flag, &format!("---{name} disabled"));
            self.skip_all(fields);
        }
    }

    fn finish(mut self) -> String {
        if !self.remaining.is_empty() {
            self.title("remaining information:");
            let remaining = self.remaining.clone();
            self.fields(&remaining);
        }
        let warnings = self.snapshot.warnings();
        if !warnings.is_empty() {
            self.lines.push(String::new());
            self.lines
                .push("natlink-status reported the following warnings:".to_string());
            for warning in warnings {
                self.lines.push(String::new());
                self.lines.push(warning.clone());
            }
        }
        self.lines.join("\n")
    }
}

/// Render a snapshot as grouped text, leaving out fields of disabled subsystems.
pub fn render_report(snapshot: &StatusSnapshot) -> String {
    let mut report = ReportBuilder::new(snapshot);

    let has_user = snapshot
        .get(StatusField::UserName)
        .is_some_and(|value| !value.is_empty());
    if has_user {
        report.title("user speech profile:");
        report.fields(&[StatusField::UserName, StatusField::DnsUserDirectory]);
    } else {
        report.skip_all(&[StatusField::UserName, StatusField::DnsUserDirectory]);
    }

    match snapshot.flag(StatusField::NatlinkIsEnabled) {
        Enablement::Enabled => {
            report.header(StatusField::NatlinkIsEnabled, "---Natlink is enabled");
            report.fields(&[StatusField::CoreDirectory, StatusField::InstallVersion]);

            if snapshot.flag(StatusField::VocolaIsEnabled).is_enabled() {
                report.field(StatusField::BaseDirectory);
            }
            report.subsystem(StatusField::VocolaIsEnabled, "Vocola is", &VOCOLA_FIELDS);
            report.subsystem(StatusField::UnimacroIsEnabled, "Unimacro is", &UNIMACRO_FIELDS);
            report.subsystem(
                StatusField::UserIsEnabled,
                "User defined grammars are",
                &[StatusField::UserDirectory],
            );

            report.title("other Natlink info:");
            report.fields(&[StatusField::DebugLoad, StatusField::DebugCallback]);
        }
        state => {
            let header = if state == Enablement::ErrorState {
                "---Natlink is disabled (contradictory configuration, see warnings)"
            } else {
                "---Natlink is disabled"
            };
            report.header(StatusField::NatlinkIsEnabled, header);
            report.field(StatusField::CoreDirectory);
            report.skip_all(&[
                StatusField::VocolaIsEnabled,
                StatusField::UnimacroIsEnabled,
                StatusField::UserIsEnabled,
                StatusField::UserDirectory,
                StatusField::DebugLoad,
                StatusField::DebugCallback,
            ]);
            report.skip_all(&VOCOLA_FIELDS);
            report.skip_all(&UNIMACRO_FIELDS);
        }
    }

    report.title("system information:");
    report.fields(&SYSTEM_FIELDS);

    report.finish()
}

impl NatlinkStatus {
    /// The full status as grouped text.
    pub fn status_report(&mut self) -> String {
        render_report(&self.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::status::keys;
    use crate::testing::TestRig;

    fn enabled_rig() -> TestRig {
        let rig = TestRig::new().with_dragon().with_natlink_enabled();
        rig.fs.add_dir("/vocola-user");
        rig.fs.add_file("/Vocola/src/vocola2/_vocola_main.py");
        rig.settings.put(keys::VOCOLA_USER_DIRECTORY, "/vocola-user");
        rig.settings.put(keys::VOCOLA_TAKES_LANGUAGES, "True");
        rig
    }

    #[test]
    fn enabled_report_groups_subsystems() {
        let rig = enabled_rig();
        let mut status = NatlinkStatus::new(rig.context());
        let report = status.status_report();
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "---Natlink is enabled");
        assert_eq!(lines[1], "\tCoreDirectory\t/natlink/MacroSystem/core");
        assert!(lines.contains(&"---Vocola is enabled"));
        assert!(lines.contains(&"\tVocolaTakesLanguages\tTrue"));
        assert!(lines.contains(&"\tVocolaTakesUnimacroActions\t-"));
        assert!(lines.contains(&"---Unimacro is disabled"));
        assert!(lines.contains(&"---User defined grammars are disabled"));
        assert!(!report.contains("UnimacroIniFilesEditor"));
        assert!(!report.contains("userName"));
    }

    #[test]
    fn sections_appear_in_order() {
        let rig = enabled_rig();
        let mut status = NatlinkStatus::new(rig.context());
        status.set_user_info("quintijn", Path::new("/nowhere"));
        let report = status.status_report();

        let profile = report.find("user speech profile:").unwrap();
        let natlink = report.find("---Natlink is enabled").unwrap();
        let other = report.find("other Natlink info:").unwrap();
        let system = report.find("system information:").unwrap();
        let remaining = report.find("remaining information:").unwrap();
        assert!(profile < natlink && natlink < other && other < system && system < remaining);
        assert!(report.contains("\tNatlinkDirectory\t/natlink"));
        assert!(report.contains("\tAhkUserDir\t-"));
    }

    #[test]
    fn disabled_report_omits_subsystem_fields() {
        let rig = TestRig::new().with_dragon();
        let mut status = NatlinkStatus::new(rig.context());
        let report = status.status_report();

        assert!(report.starts_with("---Natlink is disabled\n"));
        assert!(!report.contains("Vocola"));
        assert!(!report.contains("Unimacro"));
        assert!(!report.contains("DebugLoad"));
        assert!(report.contains("\tDNSVersion\t15"));
        assert!(!report.contains("warnings"));
    }

    #[test]
    fn warnings_close_the_report() {
        let rig = TestRig::new().with_dragon();
        rig.settings.put(keys::USER_DIRECTORY, "/missing");
        let mut status = NatlinkStatus::new(rig.context());
        let report = status.status_report();

        let tail = report
            .split("natlink-status reported the following warnings:")
            .nth(1)
            .unwrap();
        assert!(tail.contains("invalid path for UserDirectory"));
    }
}
