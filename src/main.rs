//! musfind - resolve track and playlist patterns into music file paths.
//!
//! Patterns select tracks by title, album, playlist or full path, or name a
//! track or playlist file directly. Playlists are text files of further
//! patterns and are expanded recursively. The resolved paths are printed
//! one per line.

pub mod cli;
pub mod config;
pub mod error;
pub mod pattern;
pub mod resolver;
pub mod scanner;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use error::{EXIT_FAILURE, Error};

fn main() -> ExitCode {
    let args = cli::Cli::parse();

    // Initialize logging; RUST_LOG takes precedence over --debug/--quiet
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(
            EnvFilter::builder()
                .with_default_directive(args.log_level().into())
                .from_env_lossy(),
        )
        .init();

    match cli::run_command(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            let code = e
                .downcast_ref::<Error>()
                .map_or(EXIT_FAILURE, Error::exit_code);
            ExitCode::from(code)
        }
    }
}
