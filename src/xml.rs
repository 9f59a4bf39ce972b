//! Small helpers over the quick-xml pull reader.

use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::BufRead;

/// Read an unprefixed attribute and unescape its value.
pub(crate) fn attribute(element: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>> {
    for attr in element.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == key {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Read an attribute that must be present.
pub(crate) fn required_attribute(
    element: &BytesStart<'_>,
    key: &'static str,
    element_name: &'static str,
) -> Result<String> {
    attribute(element, key.as_bytes())?.ok_or(Error::MissingAttribute {
        element: element_name,
        attribute: key,
    })
}

/// Error for a part that ends while elements are still open.
pub(crate) fn unexpected_eof() -> Error {
    Error::XmlParse("unexpected end of document inside element".to_string())
}

/// Fail unless every element opened during a pass has been closed.
pub(crate) fn ensure_closed(depth: usize) -> Result<()> {
    if depth > 0 {
        return Err(unexpected_eof());
    }
    Ok(())
}

/// Collect all descendant text of the element whose start tag was just read.
///
/// Nested runs are flattened into one string. On return the reader is
/// positioned right after the element's end tag.
pub(crate) fn read_text<R: BufRead>(reader: &mut Reader<R>, buf: &mut Vec<u8>) -> Result<String> {
    let mut text = String::new();
    let mut depth = 0usize;

    loop {
        buf.clear();
        match reader.read_event_into(buf)? {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                if depth == 0 {
                    return Ok(text);
                }
                depth -= 1;
            }
            Event::Text(e) => text.push_str(&e.unescape()?),
            Event::CData(e) => text.push_str(&String::from_utf8_lossy(&e)),
            Event::Eof => return Err(unexpected_eof()),
            _ => {}
        }
    }
}
