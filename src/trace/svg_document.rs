//! Reading the parts of a traced SVG document that glyph building needs

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Path data and size attributes pulled out of a traced document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SvgOutline {
    /// `d` attribute of the first `<path>`; empty when the attribute is missing
    pub path_data: String,
    /// Root `viewBox`, if present and non-empty
    pub view_box: Option<String>,
    /// Root `width`, if present and non-empty
    pub width: Option<String>,
}

impl SvgOutline {
    /// Width of the traced coordinate space: the third `viewBox` field if
    /// there is a `viewBox`, else the `width` attribute, parsed as an integer.
    pub fn declared_width(&self) -> Option<i64> {
        match (&self.view_box, &self.width) {
            (Some(view_box), _) => view_box.split_whitespace().nth(2).and_then(parse_leading_int),
            (None, Some(width)) => parse_leading_int(width),
            (None, None) => None,
        }
    }
}

/// Find the first `<path>` and the root `<svg>` attributes.
///
/// Returns `None` if the document has no path or is not well-formed.
pub fn read_outline(svg: &str) -> Option<SvgOutline> {
    let mut reader = Reader::from_str(svg);
    let mut outline = SvgOutline::default();
    let mut seen_root = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(element)) | Ok(Event::Empty(element)) => {
                match element.local_name().as_ref() {
                    b"svg" if !seen_root => {
                        seen_root = true;
                        outline.view_box = attribute(&element, "viewBox");
                        outline.width = attribute(&element, "width");
                    }
                    b"path" => {
                        outline.path_data = attribute(&element, "d").unwrap_or_default();
                        return Some(outline);
                    }
                    _ => {}
                }
            }
            Ok(Event::Eof) => return None,
            Err(error) => {
                tracing::debug!(
                    "Unreadable SVG at byte {}: {}",
                    reader.buffer_position(),
                    error
                );
                return None;
            }
            Ok(_) => {}
        }
    }
}

fn attribute(element: &BytesStart<'_>, name: &str) -> Option<String> {
    element
        .try_get_attribute(name)
        .ok()
        .flatten()
        .and_then(|attr| attr.unescape_value().ok())
        .map(|value| value.into_owned())
        .filter(|value| !value.is_empty())
}

/// Parse a leading decimal integer the way lenient HTML attribute parsing
/// does: leading whitespace and a sign are allowed, parsing stops at the
/// first non-digit (`"500.7px"` is 500), and no digits means no value.
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}
