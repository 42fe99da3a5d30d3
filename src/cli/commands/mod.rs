//! CLI argument definitions and dispatch.
//!
//! Paths given on the command line override the config file, which in
//! turn overrides the built-in defaults.

mod dedup;

use clap::Parser;
use std::path::PathBuf;

use crate::config::{self, Config};

pub use dedup::cmd_dedup;

/// Keep the first track per artist and per folder of an XSPF playlist
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Source playlist (default: "Source List.xspf")
    pub source: Option<PathBuf>,

    /// Destination playlist (default: "Destination List.xspf")
    pub destination: Option<PathBuf>,

    /// Config file to use instead of the one in the user config directory
    #[arg(short, long, env = "PLAYLIST_DEDUP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Parse the source as-is, without repairing unescaped field lines
    #[arg(long)]
    pub no_sanitize: bool,

    /// Run the filter and report counts without writing the destination
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// Resolve the effective configuration for this invocation.
    pub fn resolve_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => config::load_from(path)?,
            None => config::load(),
        };

        if let Some(source) = &self.source {
            config.paths.source = source.clone();
        }
        if let Some(destination) = &self.destination {
            config.paths.destination = destination.clone();
        }
        if self.no_sanitize {
            config.sanitizer.enabled = false;
        }
        Ok(config)
    }
}

/// Run the dedup command and print the summary line.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.resolve_config()?;
    let outcome = cmd_dedup(&config, cli.dry_run)?;

    if let Some(path) = &outcome.written {
        tracing::info!("Saved deduplicated playlist to {:?}", path);
    }
    if cli.dry_run {
        println!("[DRY RUN - nothing written] {}", outcome.stats);
    } else {
        println!("{}", outcome.stats);
    }
    Ok(())
}
