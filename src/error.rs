//! Application-wide error types.
//!
//! Pattern-level failures never surface here: the resolver turns them into
//! warnings and empty results. What remains are the errors that end a run.
//! Library modules use specific error types via `thiserror`, while
//! CLI/main uses `anyhow` for convenient error propagation.

use std::path::PathBuf;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Exit status for a missing music root.
pub const EXIT_MISSING_MUSIC_ROOT: u8 = 2;

/// Exit status for any other fatal error.
pub const EXIT_FAILURE: u8 = 1;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No music root from flags, environment or config file
    #[error("missing music directory (set MUSPLAY_MUSIC or pass --music-dir)")]
    MissingMusicRoot,

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error in {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a config error.
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::MissingMusicRoot => EXIT_MISSING_MUSIC_ROOT,
            Error::WithContext { source, .. } => source.exit_code(),
            _ => EXIT_FAILURE,
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Io(e).context(ctx))
    }
}
