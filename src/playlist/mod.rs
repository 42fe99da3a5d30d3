//! In-memory playlist documents.
//!
//! A playlist is held as a small owned element tree. [`Element`] keeps the
//! qualified name exactly as written in the source (so `xmlns` prefixes
//! survive a round trip), its attributes in source order, and an ordered
//! list of child [`Node`]s.
//!
//! Reading and writing go through `quick-xml`:
//! - [`parse`] builds a [`Document`] from text
//! - [`to_xml_string`] serializes a [`Document`] back to text
//! - [`read_source`] / [`write_atomic`] move text to and from disk

mod file;
mod reader;
mod writer;

pub use file::{read_source, write_atomic};
pub use reader::parse;
pub use writer::to_xml_string;

/// Name of the container element holding the tracks.
pub const TRACK_LIST: &str = "trackList";

/// A parsed playlist document.
///
/// The root is optional so that an input with no root element can be
/// represented and rejected by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub root: Option<Element>,
}

impl Document {
    /// Create a document with the given root element.
    pub fn with_root(root: Element) -> Self {
        Self { root: Some(root) }
    }
}

/// A child of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An XML element with its attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Qualified name as written (may include a prefix)
    pub name: String,
    /// Attributes in source order, values unescaped
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    /// Create an empty element.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create an element holding a single text run.
    ///
    /// An empty `text` produces an element with no children.
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        let mut element = Self::new(name);
        let text = text.into();
        if !text.is_empty() {
            element.children.push(Node::Text(text));
        }
        element
    }

    /// The element name without any namespace prefix.
    pub fn local_name(&self) -> &str {
        match self.name.rsplit_once(':') {
            Some((_, local)) => local,
            None => &self.name,
        }
    }

    /// The `xmlns` and `xmlns:*` attributes declared on this element.
    pub fn namespace_declarations(&self) -> Vec<(String, String)> {
        self.attributes
            .iter()
            .filter(|(key, _)| key == "xmlns" || key.starts_with("xmlns:"))
            .cloned()
            .collect()
    }

    /// Append a child element.
    pub fn push(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    /// Iterate over child elements, skipping text runs.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// First child element whose local name is `local_name`.
    pub fn first_child(&self, local_name: &str) -> Option<&Element> {
        self.child_elements().find(|e| e.local_name() == local_name)
    }

    /// Concatenated text of all descendants, in document order.
    ///
    /// Nested markup is flattened away.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                Node::Text(t) => out.push_str(t),
                Node::Element(e) => e.collect_text(out),
            }
        }
    }
}
