use std::fs;
use std::path::Path;

use log::debug;

use crate::layout::PlannedEntry;

use super::SyncError;

/// Materialize the planned layout under `staging` as symlinks to the
/// source files (copies where symlinks are unavailable). rsync later
/// dereferences the links, so the device gets real files.
pub fn stage_layout(staging: &Path, entries: &[PlannedEntry]) -> Result<(), SyncError> {
    for entry in entries {
        let dest = staging.join(&entry.dest_rel);
        let stage_err = |source| SyncError::Stage {
            path: dest.clone(),
            source,
        };

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(stage_err)?;
        }
        debug!(
            "staging {} -> {}",
            entry.source_path.display(),
            dest.display()
        );
        link_or_copy(&entry.source_path, &dest).map_err(stage_err)?;
    }
    Ok(())
}

#[cfg(unix)]
fn link_or_copy(source: &Path, dest: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(source, dest)
}

#[cfg(not(unix))]
fn link_or_copy(source: &Path, dest: &Path) -> std::io::Result<()> {
    fs::copy(source, dest).map(|_| ())
}
