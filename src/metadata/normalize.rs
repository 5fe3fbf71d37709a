use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use super::error::MetadataError;
use super::extract::RawTag;

/// Leading "The " (any case) on artist names, stripped so "The Kinks"
/// and "Kinks" share a folder. Requires the trailing space: "TheBeatles"
/// is left alone.
static THE_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^the ").unwrap());

/// Disc marker embedded in an album title: "(Disc 2)", "[disk 10]",
/// "Disc 1". The match deliberately does not consume the space before
/// the marker, so "Live (Disc 1)" and "Live (Disc 2)" leave the same
/// residual album text "Live " and group together.
static DISC_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[(\[]?dis[ck] [0-9]+[)\]]?").unwrap());

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").unwrap());

/// Offset added per disc so every disc-2 track orders after every
/// disc-1 track without a multi-key sort.
const DISC_ORDER_SPAN: u32 = 1000;

/// Canonical tuple for one track, derived once from its raw tag and
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackMetadata {
    pub artist: String,
    pub album: String,
    pub title: String,
    /// Track number, offset by `disc * 1000` on multi-disc albums.
    /// Total-order surrogate only: ties are broken downstream by
    /// encounter order, never by title or path.
    pub sort_order: u32,
    pub source_path: PathBuf,
}

/// Make a tag string safe for FAT filenames: `/` becomes `-`, `"` is
/// dropped, anything outside printable ASCII is dropped. Idempotent.
pub fn sanitize(s: &str) -> String {
    s.chars()
        .filter_map(|c| match c {
            '/' => Some('-'),
            '"' => None,
            c if c.is_ascii() && !c.is_ascii_control() => Some(c),
            _ => None,
        })
        .collect()
}

/// Derive the canonical tuple from a raw tag.
///
/// Artist prefers the album artist, falls back to artist, and loses a
/// leading "The ". A disc number found inside the album text wins over
/// the explicit disc field; only the first marker is removed, and a
/// disc number of zero counts as absent. Fails when artist, album,
/// title, or track number cannot be determined.
pub fn normalize(raw: &RawTag, path: &Path) -> Result<TrackMetadata, MetadataError> {
    let missing = |field: &'static str| MetadataError::MissingField {
        path: path.to_path_buf(),
        field,
    };

    let artist = raw
        .album_artist
        .as_deref()
        .or(raw.artist.as_deref())
        .ok_or_else(|| missing("artist"))?;
    let artist = sanitize(&THE_PREFIX.replace(artist, ""));

    let title = sanitize(raw.title.as_deref().ok_or_else(|| missing("title"))?);
    let mut album = sanitize(raw.album.as_deref().ok_or_else(|| missing("album"))?);

    let mut order = raw.track_number.ok_or_else(|| missing("track number"))?;

    let marker = DISC_MARKER.find(&album).map(|m| {
        let disc = DIGITS
            .find(m.as_str())
            .and_then(|d| d.as_str().parse::<u32>().ok())
            .unwrap_or(0);
        (m.range(), disc)
    });

    let mut disc = None;
    if let Some((range, n)) = marker {
        album.replace_range(range, "");
        if n > 0 {
            disc = Some(n);
        }
    }
    if disc.is_none() {
        disc = raw.disc_number.filter(|&d| d > 0);
    }
    // A disc value big enough to overflow the fold is tag garbage;
    // treat it as no disc info instead of panicking mid-batch.
    if let Some(folded) = disc
        .and_then(|d| d.checked_mul(DISC_ORDER_SPAN))
        .and_then(|offset| order.checked_add(offset))
    {
        order = folded;
    }

    Ok(TrackMetadata {
        artist,
        album,
        title,
        sort_order: order,
        source_path: path.to_path_buf(),
    })
}
