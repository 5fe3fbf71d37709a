use std::path::PathBuf;

use crate::library::{GroupEntry, LibraryIndex};

/// One destination file in the staged tree. Computed once per run and
/// handed straight to the sync boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedEntry {
    /// Path relative to the staging root: `<artist>/<filename>`.
    pub dest_rel: PathBuf,
    pub source_path: PathBuf,
}

/// Plan every group in the index.
pub fn plan_layout(index: &LibraryIndex, album_chars: Option<usize>) -> Vec<PlannedEntry> {
    let mut planned = Vec::with_capacity(index.track_count());
    for ((artist, album), entries) in index.groups() {
        planned.extend(plan_group(artist, album, entries, album_chars));
    }
    planned
}

/// Order one (artist, album) group and synthesize its filenames.
///
/// Entries are stably sorted by `sort_order` (ties keep their upstream
/// encounter order), then renumbered 1..N by position. The disc-offset
/// gaps in `sort_order` never reach the filename; the dense rank does,
/// zero-padded to two digits. Within a group the filenames are pairwise
/// distinct because the rank is unique per position.
pub fn plan_group(
    artist: &str,
    album: &str,
    entries: &[GroupEntry],
    album_chars: Option<usize>,
) -> Vec<PlannedEntry> {
    let mut sorted: Vec<&GroupEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.sort_order);

    let prefix: &str = match album_chars {
        Some(n) => {
            // Sanitized album text is ASCII, so a byte cut is a char cut.
            let n = n.min(album.len());
            &album[..n]
        }
        None => album,
    };

    let planned: Vec<PlannedEntry> = sorted
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let ext = entry
                .source_path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or_default();
            // {:02} widens to three digits past rank 99, and "-100-"
            // sorts before "-99-" by name. Groups that large outgrow
            // the two-digit sequence.
            let filename = format!("{prefix}-{:02}-{}.{ext}", i + 1, entry.title);
            PlannedEntry {
                dest_rel: PathBuf::from(artist).join(filename),
                source_path: entry.source_path.clone(),
            }
        })
        .collect();

    debug_assert!(
        {
            let mut names: Vec<&PathBuf> = planned.iter().map(|p| &p.dest_rel).collect();
            names.sort();
            names.windows(2).all(|w| w[0] != w[1])
        },
        "duplicate destination filename in group {artist}/{album}"
    );

    planned
}
