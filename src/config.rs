//! Configuration: where the music and playlists live.
//!
//! Roots are taken from, in order of priority:
//! 1. `--music-dir` / `--playlist-dir` on the command line
//! 2. `MUSPLAY_MUSIC` / `MUSPLAY_PLAYLISTS` in the environment
//! 3. the `[library]` table of the config file in the OS-standard config directory:
//!    - Windows: %APPDATA%\musfind\config.toml
//!    - macOS: ~/Library/Application Support/musfind/config.toml
//!    - Linux: ~/.config/musfind/config.toml
//!
//! Flags and environment variables are handled by clap; this module merges
//! them with the config file and applies the playlist-root defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Subdirectory of the music root used for playlists when it exists.
pub const DEFAULT_PLAYLIST_SUBDIR: &str = "Playlists";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Library settings
    pub library: LibraryConfig,
}

/// Library locations
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Where to find music tracks
    pub music_dir: Option<PathBuf>,

    /// Where to find playlists
    pub playlist_dir: Option<PathBuf>,
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("musfind"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from disk
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::debug!("Could not determine config directory, using defaults");
        return Config::default();
    };

    if !path.exists() {
        tracing::debug!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match load_from(&path) {
        Ok(config) => {
            tracing::debug!("Loaded config from {:?}", path);
            config
        }
        Err(e) => {
            tracing::warn!("{}", e);
            tracing::warn!("Using default configuration");
            Config::default()
        }
    }
}

/// Load and parse a specific config file.
pub fn load_from(path: &Path) -> Result<Config> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| Error::config(path, format!("failed to read: {e}")))?;
    toml::from_str(&contents).map_err(|e| Error::config(path, e.message().to_string()))
}

// ============================================================================
// Search Roots
// ============================================================================

/// The two directories every search is rooted at. Fixed for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRoots {
    pub music_dir: PathBuf,
    pub playlist_dir: PathBuf,
}

impl SearchRoots {
    /// Apply the defaulting rules to whatever roots were supplied.
    ///
    /// - no music root is fatal
    /// - no playlist root: `<music>/Playlists` if it exists, else the music root
    /// - a playlist root that does not exist is used anyway, with a warning
    pub fn resolve(music_dir: Option<PathBuf>, playlist_dir: Option<PathBuf>) -> Result<Self> {
        let music_dir = music_dir.ok_or(Error::MissingMusicRoot)?;

        let playlist_dir = match playlist_dir {
            Some(dir) => {
                if !dir.exists() {
                    tracing::warn!("playlist folder doesn't exist {:?}", dir);
                }
                dir
            }
            None => {
                let default = music_dir.join(DEFAULT_PLAYLIST_SUBDIR);
                if default.exists() {
                    default
                } else {
                    music_dir.clone()
                }
            }
        };

        tracing::debug!(music = ?music_dir, playlists = ?playlist_dir, "search roots");
        Ok(Self {
            music_dir,
            playlist_dir,
        })
    }

    /// Merge explicit roots (flags or environment) over the config file.
    pub fn from_sources(
        music_dir: Option<PathBuf>,
        playlist_dir: Option<PathBuf>,
        config: &Config,
    ) -> Result<Self> {
        Self::resolve(
            music_dir.or_else(|| config.library.music_dir.clone()),
            playlist_dir.or_else(|| config.library.playlist_dir.clone()),
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
