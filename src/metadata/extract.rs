use std::path::Path;

use lofty::file::TaggedFileExt;
use lofty::prelude::Accessor;
use lofty::read_from_path;
use lofty::tag::ItemKey;

use super::error::MetadataError;

/// Tag fields exactly as stored in the file, before any normalization.
/// Exclusion rules match against these; the normalizer derives the
/// canonical tuple from them.
#[derive(Debug, Clone, Default)]
pub struct RawTag {
    pub artist: Option<String>,
    pub album_artist: Option<String>,
    pub album: Option<String>,
    pub title: Option<String>,
    pub track_number: Option<u32>,
    pub disc_number: Option<u32>,
    pub genre: Option<String>,
}

/// Read the tag record of one audio file.
pub fn read_raw_tag(path: &Path) -> Result<RawTag, MetadataError> {
    let tagged = read_from_path(path).map_err(|source| MetadataError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let tag = tagged
        .primary_tag()
        .or_else(|| tagged.first_tag())
        .ok_or_else(|| MetadataError::NoTag {
            path: path.to_path_buf(),
        })?;

    Ok(RawTag {
        artist: tag.artist().and_then(|v| non_empty(&v)),
        album_artist: tag.get_string(&ItemKey::AlbumArtist).and_then(non_empty),
        album: tag.album().and_then(|v| non_empty(&v)),
        title: tag.title().and_then(|v| non_empty(&v)),
        track_number: tag.track(),
        disc_number: tag.disk(),
        genre: tag.genre().and_then(|v| non_empty(&v)),
    })
}

fn non_empty(v: &str) -> Option<String> {
    let v = v.trim();
    (!v.is_empty()).then(|| v.to_string())
}
