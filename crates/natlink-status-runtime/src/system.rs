//! Operating system information via `sysinfo`.

use natlink_status_core::SystemInfoProbe;
use sysinfo::System;

/// Reports the version of the running operating system.
#[derive(Debug, Clone, Copy)]
pub struct DefaultSystemInfo;

impl DefaultSystemInfo {
    pub const fn new() -> Self {
        Self
    }
}

impl Default for DefaultSystemInfo {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemInfoProbe for DefaultSystemInfo {
    fn windows_version(&self) -> String {
        System::long_os_version()
            .or_else(System::os_version)
            .unwrap_or_else(|| "unknown".to_string())
    }
}
