//! Resolve raw patterns into track paths.
//!
//! Patterns are compiled and dispatched to the search service, or read as
//! playlists whose lines are patterns in turn. Playlist results are memoized
//! per canonical path for the lifetime of the resolver, and a playlist that
//! reaches itself again while still being resolved contributes nothing.
//!
//! No lookup failure is an error here: a pattern that finds nothing logs a
//! warning and the rest of the patterns carry on.

pub mod cache;
pub mod playlist;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::SearchRoots;
use crate::pattern::{self, CompiledPattern, MatchExpr};
use crate::scanner::{TrackSearch, WalkSearch};

pub use cache::{PlaylistCache, PlaylistState};
pub use playlist::{FsReader, PlaylistReader};

/// Turns patterns into track paths against a fixed pair of roots.
pub struct Resolver<S = WalkSearch, R = FsReader> {
    roots: SearchRoots,
    search: S,
    reader: R,
    cache: PlaylistCache,
}

impl Resolver {
    /// Resolver backed by the filesystem.
    pub fn new(roots: SearchRoots) -> Self {
        Self::with_services(roots, WalkSearch, FsReader)
    }
}

impl<S: TrackSearch, R: PlaylistReader> Resolver<S, R> {
    pub fn with_services(roots: SearchRoots, search: S, reader: R) -> Self {
        Self {
            roots,
            search,
            reader,
            cache: PlaylistCache::new(),
        }
    }

    pub fn cache(&self) -> &PlaylistCache {
        &self.cache
    }

    /// Resolve every pattern in order and concatenate the results.
    ///
    /// Blank patterns are skipped silently. Results are not deduplicated.
    pub fn find_tracks<I>(&mut self, patterns: I) -> Vec<PathBuf>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut paths = Vec::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            if pattern.is_empty() {
                continue;
            }
            paths.extend(self.resolve_pattern(pattern));
        }
        paths
    }

    fn resolve_pattern(&mut self, pattern: &str) -> Vec<PathBuf> {
        let compiled = pattern::compile(pattern);
        if let Some(expr) = compiled.expr() {
            debug!("match {:?} => {}", pattern, expr);
        }

        match compiled {
            CompiledPattern::TitleSearch(expr)
            | CompiledPattern::AlbumSearch(expr)
            | CompiledPattern::GeneralSearch(expr) => {
                let found = self.run_search(&expr, &self.roots.music_dir);
                if found.is_empty() {
                    warn!("no tracks found for pattern {:?}", pattern);
                }
                found
            }
            CompiledPattern::PlaylistSearch(expr) => {
                let playlists = self.run_search(&expr, &self.roots.playlist_dir);
                if playlists.is_empty() {
                    warn!("no tracks found for pattern {:?}", pattern);
                }
                playlists
                    .iter()
                    .flat_map(|playlist| self.resolve_playlist(playlist))
                    .collect()
            }
            CompiledPattern::LiteralTrack(relative) => vec![self.roots.music_dir.join(relative)],
            CompiledPattern::LiteralPlaylist(relative) => {
                let path = self.roots.playlist_dir.join(relative);
                self.resolve_playlist(&path)
            }
            CompiledPattern::Unrecognized { extension } => {
                warn!(
                    "ignoring unknown extension {:?} for pattern {:?}",
                    extension, pattern
                );
                Vec::new()
            }
        }
    }

    /// Run the search service, folding failures into "no results".
    fn run_search(&self, expr: &MatchExpr, root: &Path) -> Vec<PathBuf> {
        debug!("searching {:?} for {}", root, expr);
        match self.search.search(expr, root) {
            Ok(found) => found,
            Err(e) => {
                debug!("search failed: {}", e);
                Vec::new()
            }
        }
    }

    /// Resolve a playlist file into the tracks its lines select.
    ///
    /// Results are cached by canonical path. A playlist already being
    /// resolved (a cycle) yields nothing; an unreadable one yields nothing
    /// and is not cached.
    pub fn resolve_playlist(&mut self, path: &Path) -> Vec<PathBuf> {
        let key = playlist::canonical_key(path);

        match self.cache.state(&key) {
            Some(PlaylistState::InProgress) => {
                warn!("recursive playlists are not supported ({:?})", key);
                return Vec::new();
            }
            Some(PlaylistState::Resolved(tracks)) => {
                debug!("using cache for {:?}", key);
                return tracks.clone();
            }
            None => {}
        }
        self.cache.begin(&key);

        debug!("trying to parse {:?}", key);
        let text = match self.reader.read_text(&key) {
            Ok(text) => text,
            Err(e) => {
                debug!("read failed for {:?}: {}", key, e);
                warn!("could not read playlist file {:?}", key);
                self.cache.abandon(&key);
                return Vec::new();
            }
        };

        let patterns = playlist::parse_patterns(&text);
        if patterns.is_empty() {
            warn!("no patterns in playlist file {:?}", key);
        }

        let tracks = self.find_tracks(&patterns);
        self.cache.finish(&key, tracks.clone());
        tracks
    }
}

/// Remove every excluded path from `paths`, keeping the original order.
pub fn exclude(paths: Vec<PathBuf>, excluded: &[PathBuf]) -> Vec<PathBuf> {
    if excluded.is_empty() {
        return paths;
    }
    let excluded: HashSet<&PathBuf> = excluded.iter().collect();
    paths
        .into_iter()
        .filter(|p| !excluded.contains(p))
        .collect()
}
