//! Tag extraction and normalization.
//!
//! `extract` is the lofty boundary: one file in, one `RawTag` out, or a
//! `MetadataError` meaning "skip this file". `normalize` turns a raw tag
//! into the canonical (artist, album, title, sort order) tuple used for
//! grouping and layout.

mod error;
mod extract;
mod normalize;

pub use error::MetadataError;
pub use extract::{RawTag, read_raw_tag};
pub use normalize::{TrackMetadata, normalize, sanitize};
