use std::path::PathBuf;

use thiserror::Error;

/// Per-file failures from the tag boundary. Each one means the file is
/// skipped; the pipeline logs it and moves on.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("failed to read tags from {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: lofty::error::LoftyError,
    },

    #[error("{} carries no usable tag", path.display())]
    NoTag { path: PathBuf },

    #[error("{} is missing required field `{field}`", path.display())]
    MissingField { path: PathBuf, field: &'static str },
}
