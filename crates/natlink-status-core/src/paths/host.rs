//! Dragon installation layout checks and default candidates.

use std::path::{Path, PathBuf};

use crate::ports::FileSystemProbe;

/// Dragon versions probed during auto-discovery, newest first.
pub const DNS_VERSIONS: [u32; 5] = [19, 18, 17, 16, 15];

/// Name of the Dragon executable inside the program subdirectory.
pub const DNS_EXECUTABLE: &str = "natspeak.exe";

/// Program subdirectories of an install root, in probe order.
pub const PROGRAM_SUBDIRS: [&[&str]; 2] = [&["Program"], &["App", "Program"]];

/// Default install roots below the program files directory, newest version first.
pub fn dns_install_candidates(program_files: &Path) -> Vec<PathBuf> {
    DNS_VERSIONS
        .iter()
        .map(|v| {
            program_files
                .join("Nuance")
                .join(format!("NaturallySpeaking{v}"))
        })
        .collect()
}

/// Check that `dir` looks like a Dragon install root.
///
/// It must be a directory holding `Program` or `App/Program`, and that
/// subdirectory must contain the Dragon executable.
pub fn is_dns_program_dir(fs: &dyn FileSystemProbe, dir: &Path) -> bool {
    if !fs.is_dir(dir) {
        return false;
    }
    PROGRAM_SUBDIRS.iter().any(|parts| {
        let program_dir = parts.iter().fold(dir.to_path_buf(), |acc, p| acc.join(p));
        fs.is_dir(&program_dir) && fs.is_file(&program_dir.join(DNS_EXECUTABLE))
    })
}

/// Derive the Dragon version from the last characters of the install directory name.
///
/// `NaturallySpeaking15` gives 15. When the second-to-last character is not
/// a digit only the last one is used, so `NaturallySpeaking9` gives 9.
pub fn dns_version_from_dir(dir: &Path) -> Result<u32, String> {
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let chars: Vec<char> = name.chars().collect();
    if chars.len() < 2 {
        return Err(format!(
            "directory name \"{name}\" is too short to hold a version"
        ));
    }

    let tail = &chars[chars.len() - 2..];
    let digits: String = if tail[0].is_ascii_digit() {
        tail.iter().collect()
    } else {
        tail[1..].iter().collect()
    };

    digits.parse::<u32>().map_err(|_| {
        format!("directory name \"{name}\" should end in one or two digits matching the Dragon version")
    })
}
