//! Query language for selecting tracks.
//!
//! A raw pattern either starts with a dialect prefix, in which case the rest
//! of it is a query compiled into a [`MatchExpr`], or it is a literal path
//! relative to the music or playlist root:
//!
//! | Prefix | Dialect  | Matches                                   |
//! |--------|----------|-------------------------------------------|
//! | `@`    | title    | track file names                          |
//! | `@@`   | album    | tracks below a matching directory         |
//! | `%`    | playlist | `.txt` playlists under the playlist root  |
//! | `$`    | general  | the whole path, `/` separated             |
//!
//! Prefixes are tried longest first so `@@` is never read as `@`.

pub mod expr;

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

pub use expr::{EXTENSIONS, MatchExpr, PLAYLIST_EXTENSION, is_track_extension};

/// Pattern dialect selected by a prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Title,
    Album,
    Playlist,
    General,
}

impl Dialect {
    pub const ALL: [Dialect; 4] = [
        Dialect::Title,
        Dialect::Album,
        Dialect::Playlist,
        Dialect::General,
    ];

    /// The prefix that selects this dialect.
    pub fn prefix(self) -> &'static str {
        match self {
            Dialect::Title => "@",
            Dialect::Album => "@@",
            Dialect::Playlist => "%",
            Dialect::General => "$",
        }
    }

    /// Compile a query (the pattern with its prefix removed).
    pub fn compile(self, query: &str) -> CompiledPattern {
        match self {
            Dialect::Title => CompiledPattern::TitleSearch(expr::title(query)),
            Dialect::Album => CompiledPattern::AlbumSearch(expr::album(query)),
            Dialect::Playlist => CompiledPattern::PlaylistSearch(expr::playlist(query)),
            Dialect::General => CompiledPattern::GeneralSearch(expr::general(query)),
        }
    }
}

/// Dialects ordered by descending prefix length.
static DIALECT_TABLE: LazyLock<Vec<(&'static str, Dialect)>> = LazyLock::new(|| {
    let mut table: Vec<_> = Dialect::ALL.iter().map(|d| (d.prefix(), *d)).collect();
    table.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    table
});

/// The result of classifying a raw pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompiledPattern {
    TitleSearch(MatchExpr),
    AlbumSearch(MatchExpr),
    PlaylistSearch(MatchExpr),
    GeneralSearch(MatchExpr),
    /// Path relative to the music root.
    LiteralTrack(PathBuf),
    /// Path relative to the playlist root.
    LiteralPlaylist(PathBuf),
    /// No prefix and an unknown extension (with its leading dot, or empty).
    Unrecognized { extension: String },
}

impl CompiledPattern {
    /// The match expression, for the search variants.
    pub fn expr(&self) -> Option<&MatchExpr> {
        match self {
            CompiledPattern::TitleSearch(e)
            | CompiledPattern::AlbumSearch(e)
            | CompiledPattern::PlaylistSearch(e)
            | CompiledPattern::GeneralSearch(e) => Some(e),
            _ => None,
        }
    }
}

/// Find the dialect whose prefix starts `pattern`, returning it with the query.
pub fn detect_dialect(pattern: &str) -> Option<(Dialect, &str)> {
    DIALECT_TABLE.iter().find_map(|(prefix, dialect)| {
        pattern
            .strip_prefix(prefix)
            .map(|rest| (*dialect, rest.trim_start()))
    })
}

/// Compile a raw pattern.
///
/// Literal paths are classified by extension only; they are not checked
/// for existence.
pub fn compile(pattern: &str) -> CompiledPattern {
    if let Some((dialect, query)) = detect_dialect(pattern) {
        return dialect.compile(query);
    }

    let path = Path::new(pattern);
    match path.extension().and_then(|e| e.to_str()) {
        Some(PLAYLIST_EXTENSION) => CompiledPattern::LiteralPlaylist(path.to_path_buf()),
        Some(ext) if is_track_extension(ext) => CompiledPattern::LiteralTrack(path.to_path_buf()),
        Some(ext) => CompiledPattern::Unrecognized {
            extension: format!(".{ext}"),
        },
        None => CompiledPattern::Unrecognized {
            extension: String::new(),
        },
    }
}
