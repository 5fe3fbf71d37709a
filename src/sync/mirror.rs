use std::path::Path;
use std::process::Command;

use log::info;

use super::SyncError;

/// One-way mirror from the staging tree to the destination. `-L`
/// dereferences the staged symlinks. Without `update`, files missing
/// from staging are deleted on the device.
pub fn mirror(staging: &Path, dest: &Path, update: bool) -> Result<(), SyncError> {
    let mut cmd = Command::new("rsync");
    cmd.arg("-arLv").arg(".").arg(dest).current_dir(staging);
    if !update {
        cmd.arg("--delete");
    }

    info!("mirroring {} -> {}", staging.display(), dest.display());
    let status = cmd.status().map_err(|source| SyncError::Spawn {
        tool: "rsync",
        source,
    })?;
    if !status.success() {
        return Err(SyncError::ToolFailed {
            tool: "rsync",
            status,
        });
    }
    Ok(())
}
