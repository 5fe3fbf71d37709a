use std::collections::HashSet;
use std::path::PathBuf;

use serde::Deserialize;

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/synctunes/config.toml` or `~/.config/synctunes/config.toml`
///
/// Precedence (highest wins):
/// 1) Command-line flags
/// 2) Environment variables (prefix `SYNCTUNES__`, `__` as nested separator)
/// 3) Config file (if present)
/// 4) Struct defaults
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub sync: SyncSettings,
    pub library: LibrarySettings,
    pub exclude: ExcludeSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    /// Root of the audio library to organize.
    pub source: PathBuf,
    /// Mount point of the destination device.
    pub dest: PathBuf,
    /// Staging directory where the planned layout is built before the
    /// mirror runs.
    pub tempdir: PathBuf,
    /// Add-only sync. When false the mirror deletes destination files
    /// that are absent from staging.
    pub update: bool,
    /// Truncate the album prefix in filenames to this many characters.
    /// Unset = keep the full album name.
    pub album_chars: Option<usize>,
    /// Re-sort the destination's FAT directory tables after a
    /// successful mirror (needs diskutil and fatsort).
    pub fatsort: bool,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            source: PathBuf::from("."),
            dest: PathBuf::from("/Volumes/MUSIC"),
            tempdir: PathBuf::from("temp"),
            update: false,
            album_chars: None,
            fatsort: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into(), "aac".into(), "flac".into(), "ogg".into()],
            follow_links: true,
            include_hidden: true,
            recursive: true,
            max_depth: None,
        }
    }
}

/// Skip rules. Each axis is optional; an absent axis never excludes
/// anything. Values are matched against the raw tag strings, before any
/// sanitization.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ExcludeSettings {
    /// Artist names to skip (album artist when the file carries one,
    /// else artist).
    pub artists: Option<HashSet<String>>,
    /// Album names to skip.
    pub albums: Option<HashSet<String>>,
    /// Genres to skip.
    pub genres: Option<HashSet<String>>,
}
