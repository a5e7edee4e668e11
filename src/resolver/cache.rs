//! Per-run memo of playlist resolutions.
//!
//! Each canonical playlist path moves through
//! `Unvisited -> InProgress -> Resolved`. A path that is absent from the
//! map is unvisited. A failed read returns the path to unvisited so a later
//! reference tries again.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Resolution state of a visited playlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistState {
    /// Being resolved further up the call stack. Seeing it again is a cycle.
    InProgress,
    /// Fully resolved, possibly to nothing.
    Resolved(Vec<PathBuf>),
}

#[derive(Debug, Default)]
pub struct PlaylistCache {
    entries: HashMap<PathBuf, PlaylistState>,
}

impl PlaylistCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state, `None` when unvisited.
    pub fn state(&self, key: &Path) -> Option<&PlaylistState> {
        self.entries.get(key)
    }

    /// Mark `key` as in progress.
    ///
    /// Returns false, leaving the entry untouched, if it was already visited.
    pub fn begin(&mut self, key: &Path) -> bool {
        if self.entries.contains_key(key) {
            return false;
        }
        self.entries
            .insert(key.to_path_buf(), PlaylistState::InProgress);
        true
    }

    /// Store the resolved tracks for `key`.
    pub fn finish(&mut self, key: &Path, tracks: Vec<PathBuf>) {
        self.entries
            .insert(key.to_path_buf(), PlaylistState::Resolved(tracks));
    }

    /// Forget an in-progress entry after a failed read.
    pub fn abandon(&mut self, key: &Path) {
        if let Some(PlaylistState::InProgress) = self.entries.get(key) {
            self.entries.remove(key);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
