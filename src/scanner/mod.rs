//! Filesystem search for tracks and playlists.
//!
//! Walks a root directory and returns every file whose full path matches a
//! [`MatchExpr`]. The [`TrackSearch`] trait lets the resolver run against
//! canned results in tests.

use std::path::{Path, PathBuf};

use regex::RegexBuilder;
use tracing::warn;
use walkdir::WalkDir;

use crate::pattern::MatchExpr;

/// Errors from a filesystem search.
///
/// Callers treat every variant as "no results"; the distinction only
/// shows up in debug logs. Unreadable entries below the root are skipped,
/// not reported as errors.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("search root does not exist: {0}")]
    MissingRoot(PathBuf),

    #[error("invalid match expression {expr:?}: {source}")]
    InvalidExpression {
        expr: String,
        #[source]
        source: regex::Error,
    },
}

/// Finds files under a root whose path matches an expression.
pub trait TrackSearch {
    fn search(&self, expr: &MatchExpr, root: &Path) -> Result<Vec<PathBuf>, SearchError>;
}

/// Searches by walking the directory tree.
///
/// Every non-directory entry whose full path matches the expression
/// (case-insensitive) is returned, in file-name order within each
/// directory. Symlinks are not followed, and entries that cannot be read
/// are logged and skipped.
#[derive(Debug, Default, Clone, Copy)]
pub struct WalkSearch;

impl TrackSearch for WalkSearch {
    fn search(&self, expr: &MatchExpr, root: &Path) -> Result<Vec<PathBuf>, SearchError> {
        if !root.exists() {
            return Err(SearchError::MissingRoot(root.to_path_buf()));
        }

        let regex = RegexBuilder::new(expr.as_str())
            .case_insensitive(true)
            .build()
            .map_err(|source| SearchError::InvalidExpression {
                expr: expr.to_string(),
                source,
            })?;

        let mut found = Vec::new();
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("skipping unreadable entry under {:?}: {}", root, e);
                    continue;
                }
            };
            if entry.file_type().is_dir() {
                continue;
            }
            if regex.is_match(&entry.path().to_string_lossy()) {
                found.push(entry.into_path());
            }
        }
        Ok(found)
    }
}
