//! playlist-dedup - trims an XSPF playlist to one track per artist and folder.
//!
//! Reads a source playlist, keeps the first track seen for every artist and
//! for every containing folder, and writes the result as a new playlist.
//! The run ends with a single `Track Count: seen => kept` line on stdout.

pub mod cli;
pub mod config;
pub mod dedup;
pub mod error;
pub mod playlist;
pub mod sanitizer;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging; stdout is reserved for the summary line
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("playlist_dedup=warn")))
        .init();

    cli::run_command(&args)
}
