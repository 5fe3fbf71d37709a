//! Library scanning, exclusion rules, and (artist, album) grouping.

mod filter;
mod index;
mod scan;

pub use filter::ExclusionFilter;
pub use index::{GroupEntry, GroupKey, LibraryIndex};
pub use scan::collect_audio_files;
