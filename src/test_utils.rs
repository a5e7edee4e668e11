//! Test utilities and fixtures for musfind tests.
//!
//! Provides in-memory stand-ins for the two filesystem services the
//! resolver depends on, so resolution can be tested without a real library,
//! and a log capture for asserting on the warnings a run emits.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::{MemoryReader, RecordingSearch, roots};
//!
//! let reader = MemoryReader::new().with_file("/lists/a.txt", "x.mp3\n");
//! let mut resolver = Resolver::with_services(roots(), RecordingSearch::new(), reader);
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;

use crate::config::SearchRoots;
use crate::pattern::MatchExpr;
use crate::resolver::PlaylistReader;
use crate::scanner::{SearchError, TrackSearch};

/// Roots used by resolver tests: `/music` and `/lists`.
pub fn roots() -> SearchRoots {
    SearchRoots {
        music_dir: PathBuf::from("/music"),
        playlist_dir: PathBuf::from("/lists"),
    }
}

/// Search service returning canned results per expression.
///
/// Unknown expressions find nothing. Every call is recorded.
#[derive(Debug, Default)]
pub struct RecordingSearch {
    results: HashMap<String, Vec<PathBuf>>,
    fail: bool,
    calls: RefCell<Vec<(String, PathBuf)>>,
}

impl RecordingSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `paths` when searched with `expr`.
    pub fn with_result(mut self, expr: &MatchExpr, paths: Vec<&str>) -> Self {
        self.results.insert(
            expr.as_str().to_string(),
            paths.into_iter().map(PathBuf::from).collect(),
        );
        self
    }

    /// Fail every search as if the root were missing.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// (expression, root) for every call so far.
    pub fn calls(&self) -> Vec<(String, PathBuf)> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl TrackSearch for RecordingSearch {
    fn search(&self, expr: &MatchExpr, root: &Path) -> Result<Vec<PathBuf>, SearchError> {
        self.calls
            .borrow_mut()
            .push((expr.as_str().to_string(), root.to_path_buf()));
        if self.fail {
            return Err(SearchError::MissingRoot(root.to_path_buf()));
        }
        Ok(self.results.get(expr.as_str()).cloned().unwrap_or_default())
    }
}

/// Playlist reader over in-memory files. Missing files fail with `NotFound`.
#[derive(Debug, Default)]
pub struct MemoryReader {
    files: HashMap<PathBuf, String>,
    reads: RefCell<Vec<PathBuf>>,
}

impl MemoryReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: &str, contents: &str) -> Self {
        self.files.insert(PathBuf::from(path), contents.to_string());
        self
    }

    /// Paths passed to `read_text`, including failed reads.
    pub fn reads(&self) -> Vec<PathBuf> {
        self.reads.borrow().clone()
    }

    pub fn read_count(&self) -> usize {
        self.reads.borrow().len()
    }
}

impl PlaylistReader for MemoryReader {
    fn read_text(&self, path: &Path) -> io::Result<String> {
        self.reads.borrow_mut().push(path.to_path_buf());
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.display().to_string()))
    }
}

/// Formatted log output collected by [`capture_logs`].
#[derive(Debug, Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    /// Number of times `needle` appears in the output.
    pub fn count(&self, needle: &str) -> usize {
        self.contents().matches(needle).count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.lock().unwrap().is_empty()
    }
}

/// Writer handed out to the subscriber for each event.
pub struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

impl Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = CaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CaptureWriter(Arc::clone(&self.0))
    }
}

/// Run `f` with a subscriber at `level` installed for the current thread,
/// returning its result and everything that was logged.
pub fn capture_logs<T>(level: LevelFilter, f: impl FnOnce() -> T) -> (T, LogCapture) {
    let capture = LogCapture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(capture.clone())
        .with_ansi(false)
        .without_time()
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, capture)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::expr;

    #[test]
    fn test_recording_search_returns_canned_results() {
        let search = RecordingSearch::new().with_result(&expr::title("a"), vec!["/music/a.mp3"]);

        let found = search.search(&expr::title("a"), Path::new("/music")).unwrap();
        let missing = search.search(&expr::title("b"), Path::new("/music")).unwrap();

        assert_eq!(found, vec![PathBuf::from("/music/a.mp3")]);
        assert!(missing.is_empty());
        assert_eq!(search.call_count(), 2);
    }

    #[test]
    fn test_memory_reader_counts_reads() {
        let reader = MemoryReader::new().with_file("/lists/a.txt", "x.mp3\n");

        assert_eq!(reader.read_text(Path::new("/lists/a.txt")).unwrap(), "x.mp3\n");
        assert!(reader.read_text(Path::new("/lists/b.txt")).is_err());
        assert_eq!(reader.read_count(), 2);
    }

    #[test]
    fn test_capture_logs_respects_level() {
        let ((), warnings) = capture_logs(LevelFilter::WARN, || {
            tracing::debug!("hidden detail");
            tracing::warn!("visible warning");
        });

        assert_eq!(warnings.count("visible warning"), 1);
        assert_eq!(warnings.count("hidden detail"), 0);
    }
}
