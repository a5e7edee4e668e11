//! CLI definition and dispatch.

use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

use crate::config::{self, SearchRoots};
use crate::error::ResultExt;
use crate::resolver::{self, Resolver};

const DESCRIPTION: &str = "\
Find music tracks by track and album titles.

environment variables:
  MUSPLAY_MUSIC         where to find music tracks (required)
  MUSPLAY_PLAYLISTS     where to find playlists
                        (default: $MUSPLAY_MUSIC/Playlists)";

const PATTERN_HELP: &str = "\
pattern prefixes:
  @         search by track title (filename minus extension)
  @@        search by album title (directory name)
  %         search for playlists in the playlist directory (see above)
  $         search by the entire path to the file
  no prefix use pattern as a literal path to a file or playlist";

/// musfind CLI
#[derive(Parser, Debug)]
#[command(author, version, about = "Find music tracks by track and album titles.", long_about = DESCRIPTION, after_help = PATTERN_HELP)]
pub struct Cli {
    /// The patterns to search with (see pattern prefixes below)
    #[arg(value_name = "PATTERN", required = true)]
    pub patterns: Vec<String>,

    /// Exclude anything matched by the given patterns
    #[arg(long, value_name = "PATTERN", num_args = 1..)]
    pub exclude: Vec<String>,

    /// Print extra information for debugging
    #[arg(short, long)]
    pub debug: bool,

    /// Suppress non-fatal warnings
    #[arg(short, long, conflicts_with = "debug")]
    pub quiet: bool,

    /// Where to find music tracks
    #[arg(long, env = "MUSPLAY_MUSIC")]
    pub music_dir: Option<PathBuf>,

    /// Where to find playlists
    #[arg(long, env = "MUSPLAY_PLAYLISTS")]
    pub playlist_dir: Option<PathBuf>,
}

impl Cli {
    /// Log level implied by `--debug` / `--quiet`.
    pub fn log_level(&self) -> LevelFilter {
        if self.debug {
            LevelFilter::DEBUG
        } else if self.quiet {
            LevelFilter::ERROR
        } else {
            LevelFilter::WARN
        }
    }
}

/// Resolve the patterns and print the surviving paths.
///
/// The resolver (and its playlist cache) is shared by the main patterns
/// and the `--exclude` patterns.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let config = config::load();
    let roots = SearchRoots::from_sources(cli.music_dir.clone(), cli.playlist_dir.clone(), &config)?;
    let mut resolver = Resolver::new(roots);

    let mut paths = resolver.find_tracks(&cli.patterns);
    if !cli.exclude.is_empty() {
        let excluded = resolver.find_tracks(&cli.exclude);
        paths = resolver::exclude(paths, &excluded);
    }

    let stdout = io::stdout();
    write_paths(&mut stdout.lock(), &paths).with_context("writing results")?;
    Ok(())
}

/// Write one path per line.
fn write_paths<W: Write>(out: &mut W, paths: &[PathBuf]) -> io::Result<()> {
    for path in paths {
        writeln!(out, "{}", path.display())?;
    }
    out.flush()
}
