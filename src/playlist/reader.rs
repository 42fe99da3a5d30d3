//! Builds a [`Document`] from XML text with `quick-xml`'s pull reader.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::{Document, Element, Node};
use crate::error::{Error, Result};

/// Parse playlist text into a [`Document`].
///
/// Whitespace-only text runs (indentation between elements) are dropped.
/// Comments, processing instructions and the doctype are skipped; CDATA
/// sections become plain text. Mismatched end tags are reported as
/// [`Error::Xml`]; a second top-level element, text outside the root, or
/// elements left open at the end of input as [`Error::MalformedDocument`].
pub fn parse(xml: &str) -> Result<Document> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().check_end_names = true;

    // Open elements, innermost last
    let mut stack: Vec<Element> = Vec::new();
    let mut document = Document::default();

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                stack.push(element_from_start(&start)?);
            }
            Event::Empty(start) => {
                let element = element_from_start(&start)?;
                attach(&mut stack, &mut document, element)?;
            }
            Event::End(_) => {
                if let Some(element) = stack.pop() {
                    attach(&mut stack, &mut document, element)?;
                }
            }
            Event::Text(text) => {
                let text = text.unescape()?;
                push_text(&mut stack, &text)?;
            }
            Event::CData(cdata) => {
                let text = std::str::from_utf8(&cdata)?;
                push_text(&mut stack, text)?;
            }
            Event::Eof => {
                if let Some(open) = stack.last() {
                    return Err(Error::malformed(format!(
                        "unexpected end of input, <{}> is not closed",
                        open.name
                    )));
                }
                break;
            }
            // Decl, PI, DocType, Comment
            _ => {}
        }
    }

    Ok(document)
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element> {
    let name = std::str::from_utf8(start.name().as_ref())?.to_string();
    let mut element = Element::new(name);

    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
        let value = attr.unescape_value()?.into_owned();
        element.attributes.push((key, value));
    }

    Ok(element)
}

/// Hand a finished element to its parent, or make it the root.
fn attach(stack: &mut [Element], document: &mut Document, element: Element) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.push(element),
        None if document.root.is_some() => {
            return Err(Error::malformed(format!(
                "second top-level element <{}>",
                element.name
            )));
        }
        None => document.root = Some(element),
    }
    Ok(())
}

fn push_text(stack: &mut [Element], text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Ok(());
    }
    let Some(parent) = stack.last_mut() else {
        return Err(Error::malformed(format!(
            "text outside the root element: {:?}",
            text.trim()
        )));
    };
    // Text and CDATA arrive as separate events; merge adjacent runs
    if let Some(Node::Text(existing)) = parent.children.last_mut() {
        existing.push_str(text);
    } else {
        parent.children.push(Node::Text(text.to_string()));
    }
    Ok(())
}
