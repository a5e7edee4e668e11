//! Command-line interface for musfind.
//!
//! This module parses the pattern arguments and prints the resolved
//! track paths, one per line.

mod commands;

pub use commands::{Cli, run_command};
