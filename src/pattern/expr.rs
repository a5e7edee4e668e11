//! Match expressions and the builders that produce them.
//!
//! A match expression is a regular expression evaluated case-insensitively
//! against the full path of every file under a search root. User words are
//! always escaped, so nothing typed in a query is read as expression syntax.

use std::fmt;

/// Audio extensions recognized both for searching and for literal paths.
pub const EXTENSIONS: [&str; 10] = [
    "mp3", "aac", "mka", "dts", "flac", "ogg", "m4a", "ac3", "opus", "wav",
];

/// Extension searched for by the playlist dialect and used for literal playlists.
pub const PLAYLIST_EXTENSION: &str = "txt";

/// Any characters inside a single path component.
const WITHIN_COMPONENT: &str = "[^/]*";

/// Any characters spanning at least one path separator.
const ACROSS_COMPONENTS: &str = ".*/.*";

/// Returns true if `ext` (without the dot) is a recognized audio extension.
///
/// The comparison is exact: `MP3` is not `mp3`.
pub fn is_track_extension(ext: &str) -> bool {
    EXTENSIONS.contains(&ext)
}

/// A compiled filesystem-match expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchExpr(String);

impl MatchExpr {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MatchExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `\.(mp3|aac|...)$`
fn track_suffix() -> String {
    format!(r"\.({})$", EXTENSIONS.join("|"))
}

/// Escapes each whitespace-separated word and joins them so that they must
/// appear in order within one path component.
fn words(query: &str) -> String {
    query
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(WITHIN_COMPONENT)
}

/// Track title: the words appear in the file name.
pub fn title(query: &str) -> MatchExpr {
    MatchExpr(format!("{}{WITHIN_COMPONENT}{}", words(query), track_suffix()))
}

/// Album title: the words appear in a directory name with tracks somewhere below it.
pub fn album(query: &str) -> MatchExpr {
    MatchExpr(format!(
        "{}{WITHIN_COMPONENT}/.*{}",
        words(query),
        track_suffix()
    ))
}

/// Playlist name: the words appear in the name of a `.txt` file.
pub fn playlist(query: &str) -> MatchExpr {
    MatchExpr(format!(
        r"{}{WITHIN_COMPONENT}\.{PLAYLIST_EXTENSION}$",
        words(query)
    ))
}

/// Whole path: every `/` in the query must be matched by at least one
/// separator in the path, while spaces still act as wildcards inside a
/// component.
pub fn general(query: &str) -> MatchExpr {
    let segments = query
        .split('/')
        .map(words)
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(ACROSS_COMPONENTS);
    MatchExpr(format!("{segments}.*{}", track_suffix()))
}
