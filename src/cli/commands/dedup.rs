//! The dedup run: read, repair, parse, filter, write.

use anyhow::Context;
use std::path::PathBuf;

use crate::config::Config;
use crate::dedup::{DedupFilter, DedupOptions, DedupStats, mirror};
use crate::playlist;
use crate::sanitizer::{LineTagSanitizer, PassthroughSanitizer, Sanitizer};

/// Result of a completed run
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub stats: DedupStats,
    /// Destination that was written, `None` for dry runs
    pub written: Option<PathBuf>,
}

/// Deduplicate the configured source playlist into the destination.
///
/// Nothing is written unless the whole pass succeeds.
pub fn cmd_dedup(config: &Config, dry_run: bool) -> anyhow::Result<RunOutcome> {
    let source = &config.paths.source;
    let destination = &config.paths.destination;
    tracing::info!("Deduplicating {:?} -> {:?}", source, destination);

    let raw = playlist::read_source(source)?;
    let sanitizer: &dyn Sanitizer = if config.sanitizer.enabled {
        &LineTagSanitizer
    } else {
        &PassthroughSanitizer
    };

    let (xml, stats) = dedup_text(&raw, sanitizer, config.dedup)
        .with_context(|| format!("Failed to deduplicate {}", source.display()))?;

    if dry_run {
        tracing::info!("Dry run, leaving {:?} untouched", destination);
        return Ok(RunOutcome {
            stats,
            written: None,
        });
    }

    playlist::write_atomic(destination, xml.as_bytes())?;
    Ok(RunOutcome {
        stats,
        written: Some(destination.clone()),
    })
}

/// Run the in-memory part of the pipeline on playlist text.
pub fn dedup_text(
    raw: &str,
    sanitizer: &dyn Sanitizer,
    options: DedupOptions,
) -> crate::error::Result<(String, DedupStats)> {
    let text = sanitizer.sanitize(raw);
    let document = playlist::parse(&text)?;

    let mut filter = DedupFilter::new(options);
    let output = mirror(&document, &mut filter)?;

    Ok((playlist::to_xml_string(&output)?, filter.stats()))
}
