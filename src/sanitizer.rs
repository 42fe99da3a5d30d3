//! Pre-parse text repair for hand-edited or badly exported playlists.
//!
//! Some exporters write track fields without escaping, e.g.
//! `<creator>Tom & Jerry</creator>`, or drop the slash from the closing
//! tag (`<title>Song<title>`). Neither parses as XML. A [`Sanitizer`]
//! rewrites the raw text before it reaches the parser.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Track fields that are repaired when they sit alone on a line.
pub const REPAIRED_FIELDS: [&str; 6] = [
    "location",
    "creator",
    "title",
    "image",
    "album",
    "annotation",
];

// indent, opening tag, and everything after it up to the end of the line
static RE_FIELD_LINE: LazyLock<Regex> = LazyLock::new(|| {
    let names = REPAIRED_FIELDS.join("|");
    Regex::new(&format!(r"^(?P<indent>\s+)<(?P<name>{names})>(?P<rest>.+)$"))
        .expect("field line pattern is valid")
});

/// Turns raw playlist text into text the XML parser accepts.
pub trait Sanitizer {
    /// Repair `raw`, borrowing it unchanged when nothing needed fixing.
    fn sanitize<'a>(&self, raw: &'a str) -> Cow<'a, str>;
}

/// Leaves the text untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughSanitizer;

impl Sanitizer for PassthroughSanitizer {
    fn sanitize<'a>(&self, raw: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(raw)
    }
}

/// Line-oriented repair of single-line track fields.
///
/// A line is rewritten when it consists of indentation, an opening tag for
/// one of [`REPAIRED_FIELDS`], a non-empty value, and a closing tag for the
/// same field (with or without its slash), optionally followed by
/// whitespace. The value is escaped and the line is re-emitted as
/// `<indent><name>value</name>`. Every other line, and every line ending,
/// is kept byte for byte.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineTagSanitizer;

impl Sanitizer for LineTagSanitizer {
    fn sanitize<'a>(&self, raw: &'a str) -> Cow<'a, str> {
        let mut out = String::with_capacity(raw.len());
        let mut changed = false;

        for line in raw.split_inclusive('\n') {
            let (body, ending) = split_line_ending(line);
            match repair_line(body) {
                Some(fixed) if fixed != body => {
                    changed = true;
                    out.push_str(&fixed);
                    out.push_str(ending);
                }
                _ => out.push_str(line),
            }
        }

        if changed {
            tracing::debug!("Sanitizer rewrote field lines");
            Cow::Owned(out)
        } else {
            Cow::Borrowed(raw)
        }
    }
}

fn split_line_ending(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}

/// Rewrite one line, or `None` if it is not a repairable field line.
fn repair_line(line: &str) -> Option<String> {
    let caps = RE_FIELD_LINE.captures(line)?;
    let indent = &caps["indent"];
    let name = &caps["name"];
    let rest = caps["rest"].trim_end();

    let close = format!("</{name}>");
    let open = format!("<{name}>");
    let value = rest
        .strip_suffix(close.as_str())
        .or_else(|| rest.strip_suffix(open.as_str()))?;
    if value.is_empty() {
        return None;
    }

    Some(format!("{indent}<{name}>{}</{name}>", escape_value(value)))
}

/// Escape markup characters, leaving well-formed entity references alone.
///
/// `&amp;` stays `&amp;` rather than becoming `&amp;amp;`, so values an
/// exporter already escaped correctly keep their meaning.
pub fn escape_value(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len() + 16);
    for (i, c) in value.char_indices() {
        match c {
            '&' if starts_with_reference(&value[i..]) => out.push('&'),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Whether `s` (starting at `&`) begins with `&name;`, `&#123;` or `&#x1F;`.
fn starts_with_reference(s: &str) -> bool {
    let Some(end) = s.find(';') else {
        return false;
    };
    let body = &s[1..end];
    if let Some(hex) = body.strip_prefix("#x").or_else(|| body.strip_prefix("#X")) {
        !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit())
    } else if let Some(dec) = body.strip_prefix('#') {
        !dec.is_empty() && dec.chars().all(|c| c.is_ascii_digit())
    } else {
        matches!(body, "amp" | "lt" | "gt" | "quot" | "apos")
    }
}
