//! Reading playlist files.
//!
//! A playlist is a text file with one raw pattern per line. Lines are
//! trimmed, lines starting with `#` are comments, blank lines are kept and
//! skipped later by the resolver.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Reads the full text of a playlist file.
pub trait PlaylistReader {
    fn read_text(&self, path: &Path) -> io::Result<String>;
}

/// Reads playlists from disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsReader;

impl PlaylistReader for FsReader {
    fn read_text(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }
}

/// Split playlist text into raw patterns, dropping comment lines.
pub fn parse_patterns(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Cache key for a playlist: the canonical path when the file exists,
/// otherwise the absolute path so the read failure is reported as usual.
pub fn canonical_key(path: &Path) -> PathBuf {
    fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
