//! Rebuilds the playlist around the filtered track list.

use super::DedupFilter;
use crate::error::{Error, Result};
use crate::playlist::{Document, Element, TRACK_LIST};

/// Produce the deduplicated copy of `source`.
///
/// The root keeps its name and attributes. Every other direct child of
/// the root is reduced to an element of the same name holding only its
/// flattened text and its namespace declarations, so prefixed names stay
/// bound. Each `trackList` child is replaced by the filtered list produced
/// by `filter`; all track lists share the filter's seen-sets.
pub fn mirror(source: &Document, filter: &mut DedupFilter) -> Result<Document> {
    let root = source.root.as_ref().ok_or(Error::MissingRoot)?;

    let mut out = Element::new(root.name.clone());
    out.attributes = root.attributes.clone();

    for child in root.child_elements() {
        if child.local_name() == TRACK_LIST {
            out.push(filter.filter_track_list(child)?);
        } else {
            let mut mirrored = Element::with_text(child.name.clone(), child.text());
            mirrored.attributes = child.namespace_declarations();
            out.push(mirrored);
        }
    }

    let stats = filter.stats();
    tracing::info!(
        "Kept {} of {} tracks, dropped {} ({} duplicate artist, {} duplicate folder)",
        stats.kept,
        stats.seen,
        stats.dropped(),
        stats.duplicate_artist,
        stats.duplicate_folder
    );

    Ok(Document::with_root(out))
}
