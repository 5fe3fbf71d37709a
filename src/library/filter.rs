use std::collections::HashSet;

use crate::config::ExcludeSettings;
use crate::metadata::RawTag;

/// Skip rules matched against raw tag values, before any sanitization:
/// users copy names into their skip lists as their player shows them.
/// Each axis is independent; any one match excludes the file.
#[derive(Debug, Clone, Default)]
pub struct ExclusionFilter {
    artists: Option<HashSet<String>>,
    albums: Option<HashSet<String>>,
    genres: Option<HashSet<String>>,
}

impl ExclusionFilter {
    pub fn new(
        artists: Option<HashSet<String>>,
        albums: Option<HashSet<String>>,
        genres: Option<HashSet<String>>,
    ) -> Self {
        Self {
            artists,
            albums,
            genres,
        }
    }

    pub fn from_settings(settings: &ExcludeSettings) -> Self {
        Self::new(
            settings.artists.clone(),
            settings.albums.clone(),
            settings.genres.clone(),
        )
    }

    /// True when any configured axis matches. The artist axis checks
    /// the same field the normalizer prefers: album artist when
    /// present, else artist.
    pub fn excludes(&self, raw: &RawTag) -> bool {
        let artist = raw.album_artist.as_deref().or(raw.artist.as_deref());
        Self::hit(&self.artists, artist)
            || Self::hit(&self.albums, raw.album.as_deref())
            || Self::hit(&self.genres, raw.genre.as_deref())
    }

    fn hit(set: &Option<HashSet<String>>, value: Option<&str>) -> bool {
        match (set, value) {
            (Some(set), Some(value)) => set.contains(value),
            _ => false,
        }
    }
}
