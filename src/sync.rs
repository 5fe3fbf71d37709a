//! The staging and mirroring boundary: materialize the planned layout
//! as a symlink tree and hand it to rsync, with an optional FAT
//! re-sort pass for the device afterwards.

mod device;
mod mirror;
mod stage;

pub use device::fat_sort;
pub use mirror::mirror;
pub use stage::stage_layout;

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("failed to stage {}: {source}", path.display())]
    Stage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to run {tool}: {source}")]
    Spawn {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} exited with {status}")]
    ToolFailed {
        tool: &'static str,
        status: ExitStatus,
    },

    #[error("could not identify the block device behind the destination volume")]
    UnknownDevice,
}

#[cfg(test)]
mod tests;
