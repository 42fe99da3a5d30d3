//! Artist and folder based playlist deduplication.
//!
//! A [`DedupFilter`] walks tracks in document order and keeps a track only
//! when it brings something new on both axes:
//! - every artist segment of its `creator` field is unseen, and
//! - the folder its `location` points into is unseen.
//!
//! The earliest track introducing an artist or a folder wins.
//!
//! # Partial inserts
//!
//! Artist segments are recorded one by one until the first already-seen
//! segment is hit. Segments recorded before that point stay recorded even
//! though the track itself is dropped. With the creators `Z;Y` (after `Y`
//! was taken) the track is dropped but `Z` is now taken as well. With
//! `Y;Z` the collision comes first and `Z` stays free.

mod mirror;
mod stats;

pub use mirror::mirror;
pub use stats::DedupStats;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::playlist::Element;

/// Field holding the (possibly multi-valued) artist.
pub const CREATOR: &str = "creator";
/// Field holding the track's file path.
pub const LOCATION: &str = "location";

/// Separators used to split artist fields and locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupOptions {
    /// Splits a `creator` field into artist segments
    pub artist_separator: char,
    /// Last occurrence splits a `location` into folder and file name
    pub folder_separator: char,
}

impl Default for DedupOptions {
    fn default() -> Self {
        Self {
            artist_separator: ';',
            folder_separator: '\\',
        }
    }
}

/// Outcome for a single track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Kept,
    /// Carries the first artist segment that was already seen
    DuplicateArtist(String),
    /// Carries the folder key that was already seen
    DuplicateFolder(String),
}

/// First-wins filter over artists and folders.
///
/// Owns the seen-sets for one run. Create a fresh filter per playlist.
#[derive(Debug, Default)]
pub struct DedupFilter {
    options: DedupOptions,
    artists: HashSet<String>,
    folders: HashSet<String>,
    stats: DedupStats,
}

impl DedupFilter {
    pub fn new(options: DedupOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    /// Counters accumulated so far.
    pub fn stats(&self) -> DedupStats {
        self.stats
    }

    /// Build a copy of `source` holding only the tracks that pass.
    ///
    /// The copy has the source's name and namespace declarations but no
    /// other attributes; kept tracks are deep copies in their original order.
    pub fn filter_track_list(&mut self, source: &Element) -> Result<Element> {
        let mut out = Element::new(source.name.clone());
        out.attributes = source.namespace_declarations();
        for track in source.child_elements() {
            match self.consider(track)? {
                Verdict::Kept => out.push(track.clone()),
                Verdict::DuplicateArtist(artist) => {
                    tracing::debug!("Track {}: artist {:?} already taken", self.stats.seen, artist);
                }
                Verdict::DuplicateFolder(folder) => {
                    tracing::debug!("Track {}: folder {:?} already taken", self.stats.seen, folder);
                }
            }
        }
        Ok(out)
    }

    /// Decide on one track and update the sets and counters.
    ///
    /// Fails when the track lacks a `creator`, or lacks a `location` after
    /// passing the artist check, or has a location without a folder
    /// separator.
    pub fn consider(&mut self, track: &Element) -> Result<Verdict> {
        self.stats.seen += 1;
        let position = self.stats.seen;

        let artist = track
            .first_child(CREATOR)
            .ok_or_else(|| Error::missing_field(position, CREATOR))?
            .text();

        if let Some(taken) = self.claim_artists(&artist) {
            self.stats.duplicate_artist += 1;
            return Ok(Verdict::DuplicateArtist(taken));
        }

        let location = track
            .first_child(LOCATION)
            .ok_or_else(|| Error::missing_field(position, LOCATION))?
            .text();

        let folder = folder_key(&location, self.options.folder_separator).ok_or_else(|| {
            Error::MalformedLocation {
                track: position,
                location: location.clone(),
            }
        })?;

        if !self.folders.insert(folder.to_string()) {
            self.stats.duplicate_folder += 1;
            return Ok(Verdict::DuplicateFolder(folder.to_string()));
        }

        self.stats.kept += 1;
        Ok(Verdict::Kept)
    }

    /// Record each segment of `field`; stop at and return the first one
    /// that was already recorded.
    fn claim_artists(&mut self, field: &str) -> Option<String> {
        artist_segments(field, self.options.artist_separator)
            .find(|segment| !self.artists.insert((*segment).to_string()))
            .map(str::to_string)
    }
}

/// Split an artist field into trimmed segments. Empty segments are kept.
pub fn artist_segments(field: &str, separator: char) -> impl Iterator<Item = &str> {
    field.split(separator).map(str::trim)
}

/// The part of `location` before its last `separator`.
pub fn folder_key(location: &str, separator: char) -> Option<&str> {
    location.rsplit_once(separator).map(|(folder, _)| folder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{track, track_list};

    fn kept_titles(filter: &mut DedupFilter, list: &Element) -> Vec<String> {
        filter
            .filter_track_list(list)
            .unwrap()
            .child_elements()
            .map(|t| t.first_child("title").unwrap().text())
            .collect()
    }

    #[test]
    fn test_folder_key() {
        assert_eq!(folder_key(r"C:\Music\Band\song.mp3", '\\'), Some(r"C:\Music\Band"));
        assert_eq!(folder_key(r"\song.mp3", '\\'), Some(""));
        assert_eq!(folder_key("song.mp3", '\\'), None);
        assert_eq!(folder_key("/music/band/song.mp3", '/'), Some("/music/band"));
    }

    #[test]
    fn test_artist_segments_trim_and_keep_empties() {
        let segments: Vec<&str> = artist_segments(" A ; B;;C ", ';').collect();
        assert_eq!(segments, vec!["A", "B", "", "C"]);
    }

    #[test]
    fn test_end_to_end_scenario() {
        let list = track_list(&[
            track("t1", "Alpha", r"C:\m\one\1.mp3"),
            track("t2", "Beta", r"C:\m\two\2.mp3"),
            track("t3", "Alpha", r"C:\m\three\3.mp3"),
            track("t4", "Gamma", r"C:\m\two\4.mp3"),
            track("t5", "Delta", r"C:\m\five\5.mp3"),
        ]);
        let mut filter = DedupFilter::default();

        assert_eq!(kept_titles(&mut filter, &list), vec!["t1", "t2", "t5"]);

        let stats = filter.stats();
        assert_eq!((stats.seen, stats.kept), (5, 3));
        assert_eq!(stats.duplicate_artist, 1);
        assert_eq!(stats.duplicate_folder, 1);
    }

    #[test]
    fn test_partial_insert_persists() {
        let list = track_list(&[
            track("t1", "X;Y", r"C:\a\1.mp3"),
            track("t2", "Z;Y", r"C:\b\2.mp3"),
            track("t3", "Z", r"C:\c\3.mp3"),
        ]);
        let mut filter = DedupFilter::default();

        // t2 registers Z before colliding on Y, which then blocks t3
        assert_eq!(kept_titles(&mut filter, &list), vec!["t1"]);
    }

    #[test]
    fn test_collision_stops_registration() {
        let list = track_list(&[
            track("t1", "X;Y", r"C:\a\1.mp3"),
            track("t2", "Y;Z", r"C:\b\2.mp3"),
            track("t3", "Z", r"C:\c\3.mp3"),
        ]);
        let mut filter = DedupFilter::default();

        // t2 collides on its first segment, so Z is never registered
        assert_eq!(kept_titles(&mut filter, &list), vec!["t1", "t3"]);
    }

    #[test]
    fn test_folder_rejection_keeps_artist_claims() {
        let list = track_list(&[
            track("t1", "A", r"C:\same\1.mp3"),
            track("t2", "B", r"C:\same\2.mp3"),
            track("t3", "B", r"C:\other\3.mp3"),
        ]);
        let mut filter = DedupFilter::default();

        assert_eq!(kept_titles(&mut filter, &list), vec!["t1"]);
    }

    #[test]
    fn test_artist_match_is_case_sensitive_and_trimmed() {
        let list = track_list(&[
            track("t1", "Abba", r"C:\a\1.mp3"),
            track("t2", "ABBA", r"C:\b\2.mp3"),
            track("t3", "  Abba ", r"C:\c\3.mp3"),
        ]);
        let mut filter = DedupFilter::default();

        assert_eq!(kept_titles(&mut filter, &list), vec!["t1", "t2"]);
    }

    #[test]
    fn test_verdict_reports_reason() {
        let mut filter = DedupFilter::default();
        let first = track("t1", "A", r"C:\a\1.mp3");

        assert_eq!(filter.consider(&first).unwrap(), Verdict::Kept);
        assert_eq!(
            filter.consider(&track("t2", "B;A", r"C:\b\2.mp3")).unwrap(),
            Verdict::DuplicateArtist("A".to_string())
        );
        assert_eq!(
            filter.consider(&track("t3", "C", r"C:\a\3.mp3")).unwrap(),
            Verdict::DuplicateFolder(r"C:\a".to_string())
        );
    }

    #[test]
    fn test_kept_track_is_copied_whole() {
        let mut source = track("t1", "A", r"C:\a\1.mp3");
        source.attributes.push(("id".to_string(), "7".to_string()));
        source.push(Element::with_text("album", "Arrival"));
        source.push(Element::with_text("image", "cover.jpg"));
        let list = track_list(&[source.clone()]);

        let out = DedupFilter::default().filter_track_list(&list).unwrap();

        assert_eq!(out.child_elements().next(), Some(&source));
    }

    #[test]
    fn test_missing_creator_is_fatal() {
        let mut bare = Element::new("track");
        bare.push(Element::with_text("location", r"C:\a\1.mp3"));
        let list = track_list(&[track("t1", "A", r"C:\a\0.mp3"), bare]);

        let err = DedupFilter::default().filter_track_list(&list).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingRequiredField { track: 2, field: CREATOR }
        ));
    }

    #[test]
    fn test_missing_location_only_checked_after_artist_pass() {
        let mut no_location = Element::new("track");
        no_location.push(Element::with_text("creator", "A"));

        // Duplicate artist: rejected before location is read
        let mut filter = DedupFilter::default();
        filter.consider(&track("t1", "A", r"C:\a\1.mp3")).unwrap();
        assert!(matches!(
            filter.consider(&no_location),
            Ok(Verdict::DuplicateArtist(_))
        ));

        // Fresh artist: location is required
        let err = DedupFilter::default().consider(&no_location).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingRequiredField { track: 1, field: LOCATION }
        ));
    }

    #[test]
    fn test_location_without_separator_is_fatal() {
        let err = DedupFilter::default()
            .consider(&track("t1", "A", "song.mp3"))
            .unwrap_err();
        assert!(matches!(err, Error::MalformedLocation { track: 1, .. }));
    }

    #[test]
    fn test_custom_separators() {
        let options = DedupOptions {
            artist_separator: '/',
            folder_separator: '/',
        };
        let list = track_list(&[
            track("t1", "A/B", "/m/one/1.mp3"),
            track("t2", "C", "/m/one/2.mp3"),
            track("t3", "B", "/m/two/3.mp3"),
            track("t4", "D;E", "/m/four/4.mp3"),
        ]);
        let mut filter = DedupFilter::new(options);

        assert_eq!(kept_titles(&mut filter, &list), vec!["t1", "t4"]);
    }
}
