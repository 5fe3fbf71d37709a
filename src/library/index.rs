use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::metadata::TrackMetadata;

/// Post-sanitization (artist, album) pair. Exact string equality; no
/// further normalization happens across groups.
pub type GroupKey = (String, String);

/// One track inside a group. Order within the Vec is the encounter
/// order of insertion, which the planner uses to break sort ties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupEntry {
    pub sort_order: u32,
    pub title: String,
    pub source_path: PathBuf,
}

/// Accepted tracks grouped by (artist, album). Nothing is dropped or
/// merged beyond the grouping itself; duplicate (sort_order, title)
/// pairs are retained.
#[derive(Debug, Default)]
pub struct LibraryIndex {
    groups: BTreeMap<GroupKey, Vec<GroupEntry>>,
}

impl LibraryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, track: TrackMetadata) {
        self.groups
            .entry((track.artist, track.album))
            .or_default()
            .push(GroupEntry {
                sort_order: track.sort_order,
                title: track.title,
                source_path: track.source_path,
            });
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of (artist, album) groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn track_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Groups in key order, so every run plans them the same way.
    pub fn groups(&self) -> impl Iterator<Item = (&GroupKey, &[GroupEntry])> {
        self.groups.iter().map(|(k, v)| (k, v.as_slice()))
    }
}
