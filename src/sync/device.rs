use std::path::Path;
use std::process::Command;

use log::info;
use once_cell::sync::Lazy;
use regex::Regex;

use super::SyncError;

static UNMOUNTED_DEVICE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Volume.* on ([a-zA-Z0-9]+) unmounted").unwrap());

/// Pull the block device name out of `diskutil unmount` output, e.g.
/// "Volume MUSIC on disk2s1 unmounted" -> "disk2s1".
pub(super) fn parse_unmounted_device(stdout: &str) -> Option<&str> {
    UNMOUNTED_DEVICE
        .captures(stdout)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Unmount the destination volume and re-sort its FAT directory tables
/// so firmware that lists files in on-disk order shows them in name
/// order. Needs `diskutil` and `fatsort` on PATH; fatsort runs under
/// sudo and will prompt for a password.
pub fn fat_sort(dest: &Path) -> Result<(), SyncError> {
    let output = Command::new("diskutil")
        .arg("unmount")
        .arg(dest)
        .output()
        .map_err(|source| SyncError::Spawn {
            tool: "diskutil",
            source,
        })?;
    if !output.status.success() {
        return Err(SyncError::ToolFailed {
            tool: "diskutil",
            status: output.status,
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let device = parse_unmounted_device(&stdout).ok_or(SyncError::UnknownDevice)?;

    info!("sorting FAT tables on /dev/{device}");
    let status = Command::new("sudo")
        .arg("fatsort")
        .arg(format!("/dev/{device}"))
        .status()
        .map_err(|source| SyncError::Spawn {
            tool: "fatsort",
            source,
        })?;
    if !status.success() {
        return Err(SyncError::ToolFailed {
            tool: "fatsort",
            status,
        });
    }
    Ok(())
}
