//! Operating system information port.

pub trait SystemInfoProbe {
    /// Human-readable Windows (or other OS) version.
    fn windows_version(&self) -> String;
}
