//! Counters for a dedup run.

use std::fmt;

/// Track counts gathered during one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DedupStats {
    /// Tracks examined
    pub seen: usize,
    /// Tracks copied to the output
    pub kept: usize,
    /// Tracks dropped because an artist segment was already taken
    pub duplicate_artist: usize,
    /// Tracks dropped because their folder was already taken
    pub duplicate_folder: usize,
}

impl DedupStats {
    /// Tracks that did not make it into the output.
    pub fn dropped(&self) -> usize {
        self.seen - self.kept
    }
}

/// The one-line run summary.
impl fmt::Display for DedupStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Track Count: {} => {}", self.seen, self.kept)
    }
}
