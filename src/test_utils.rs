//! Test utilities and fixtures for playlist-dedup tests.
//!
//! Builders for tracks and track lists, plus a helper that renders a
//! complete XSPF playlist as text for parser and end-to-end tests.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::{track, track_list};
//!
//! let list = track_list(&[
//!     track("t1", "Alpha", r"C:\Music\Alpha\1.mp3"),
//!     track("t2", "Beta", r"C:\Music\Beta\2.mp3"),
//! ]);
//! ```

use quick_xml::escape::escape;

use crate::playlist::{Element, TRACK_LIST};

/// Creates a `<track>` with a title, a creator and a location.
///
/// The title doubles as an identifier when checking which tracks survived.
pub fn track(title: &str, creator: &str, location: &str) -> Element {
    let mut track = Element::new("track");
    track.push(Element::with_text("location", location));
    track.push(Element::with_text("title", title));
    track.push(Element::with_text("creator", creator));
    track
}

/// Wraps tracks in a `<trackList>`.
pub fn track_list(tracks: &[Element]) -> Element {
    let mut list = Element::new(TRACK_LIST);
    for t in tracks {
        list.push(t.clone());
    }
    list
}

/// Renders an XSPF playlist document.
///
/// `head` is inserted verbatim before the track list, e.g.
/// `"<title>Mix</title>"`. Each track is `(title, creator, location)`.
pub fn playlist_xml(head: &str, tracks: &[(&str, &str, &str)]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<playlist version=\"1\" xmlns=\"http://xspf.org/ns/0/\">\n",
    );
    xml.push_str("  ");
    xml.push_str(head);
    xml.push_str("\n  <trackList>\n");
    for (title, creator, location) in tracks {
        xml.push_str("    <track>\n");
        xml.push_str(&format!("      <location>{}</location>\n", escape(*location)));
        xml.push_str(&format!("      <title>{}</title>\n", escape(*title)));
        xml.push_str(&format!("      <creator>{}</creator>\n", escape(*creator)));
        xml.push_str("    </track>\n");
    }
    xml.push_str("  </trackList>\n</playlist>\n");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_has_required_fields() {
        let t = track("Song", "Artist", r"C:\Music\song.mp3");
        assert_eq!(t.first_child("title").unwrap().text(), "Song");
        assert_eq!(t.first_child("creator").unwrap().text(), "Artist");
        assert_eq!(t.first_child("location").unwrap().text(), r"C:\Music\song.mp3");
    }

    #[test]
    fn test_playlist_xml_parses() {
        let xml = playlist_xml("<date>2024</date>", &[("Song", "Tom & Jerry", r"C:\a\1.mp3")]);
        let doc = crate::playlist::parse(&xml).unwrap();
        let root = doc.root.unwrap();

        let list = root.first_child(TRACK_LIST).unwrap();
        assert_eq!(list.child_elements().count(), 1);
        assert_eq!(
            list.first_child("track").unwrap().first_child("creator").unwrap().text(),
            "Tom & Jerry"
        );
    }
}
