//! Command-line interface for playlist-dedup.
//!
//! Reads a playlist, drops tracks whose artist or folder was already
//! covered by an earlier track, and writes the result.

mod commands;

pub use commands::{Cli, run_command};
