//! XLSX shared strings parsing.

use crate::error::{Error, Result};
use crate::xml;
use quick_xml::events::Event;
use std::io::BufRead;

/// Shared strings table.
#[derive(Debug, Clone, Default)]
pub struct SharedStrings {
    /// All strings in document order
    strings: Vec<String>,
}

impl SharedStrings {
    /// Parse shared strings from a part stream.
    ///
    /// Each `si` item becomes one entry; rich-text runs inside an item are
    /// concatenated. `limit` caps the number of accepted items.
    pub fn read<R: BufRead>(stream: R, limit: Option<usize>) -> Result<Self> {
        let mut strings = Vec::new();
        let mut reader = quick_xml::Reader::from_reader(stream);
        let mut buf = Vec::new();
        let mut text_buf = Vec::new();
        let mut depth = 0usize;

        loop {
            let has_content = match reader.read_event_into(&mut buf)? {
                // read_text consumes the item's end tag
                Event::Start(e) if e.local_name().as_ref() == b"si" => Some(true),
                Event::Empty(e) if e.local_name().as_ref() == b"si" => Some(false),
                Event::Start(_) => {
                    depth += 1;
                    None
                }
                Event::End(_) => {
                    depth = depth.saturating_sub(1);
                    None
                }
                Event::Eof => {
                    xml::ensure_closed(depth)?;
                    break;
                }
                _ => None,
            };

            if let Some(has_content) = has_content {
                if let Some(max) = limit {
                    if strings.len() >= max {
                        return Err(Error::LimitExceeded(format!(
                            "more than {} shared strings",
                            max
                        )));
                    }
                }
                let text = if has_content {
                    xml::read_text(&mut reader, &mut text_buf)?
                } else {
                    String::new()
                };
                strings.push(text);
            }
            buf.clear();
        }

        Ok(Self { strings })
    }

    /// Get a string by index.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.strings.get(index).map(|s| s.as_str())
    }

    /// Get a string by index, failing for an index outside the table.
    pub fn lookup(&self, index: usize) -> Result<&str> {
        self.get(index).ok_or(Error::SharedStringOutOfRange {
            index,
            len: self.strings.len(),
        })
    }

    /// Get the count of shared strings.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shared_strings() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="5" uniqueCount="3">
    <si><t>Hello</t></si>
    <si><t>World</t></si>
    <si><t>Test</t></si>
</sst>"#;

        let ss = SharedStrings::read(xml.as_bytes(), None).unwrap();
        assert_eq!(ss.len(), 3);
        assert_eq!(ss.get(0), Some("Hello"));
        assert_eq!(ss.get(1), Some("World"));
        assert_eq!(ss.get(2), Some("Test"));
        assert_eq!(ss.get(3), None);
    }

    #[test]
    fn test_rich_text() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
    <si><r><rPr><b/></rPr><t>Hello</t></r><r><t xml:space="preserve"> World</t></r></si>
</sst>"#;

        let ss = SharedStrings::read(xml.as_bytes(), None).unwrap();
        assert_eq!(ss.len(), 1);
        assert_eq!(ss.get(0), Some("Hello World"));
    }

    #[test]
    fn test_empty_and_escaped_items() {
        let xml = r#"<sst><si/><si><t></t></si><si><t>R&amp;D</t></si></sst>"#;

        let ss = SharedStrings::read(xml.as_bytes(), None).unwrap();
        assert_eq!(ss.len(), 3);
        assert_eq!(ss.get(0), Some(""));
        assert_eq!(ss.get(1), Some(""));
        assert_eq!(ss.get(2), Some("R&D"));
    }

    #[test]
    fn test_lookup_out_of_range() {
        let ss = SharedStrings::read("<sst><si><t>a</t></si></sst>".as_bytes(), None).unwrap();
        assert_eq!(ss.lookup(0).unwrap(), "a");
        let err = ss.lookup(1).unwrap_err();
        assert!(matches!(
            err,
            Error::SharedStringOutOfRange { index: 1, len: 1 }
        ));
        assert!(err.is_malformed());
    }

    #[test]
    fn test_limit() {
        let xml = "<sst><si><t>a</t></si><si><t>b</t></si></sst>";
        assert_eq!(SharedStrings::read(xml.as_bytes(), Some(2)).unwrap().len(), 2);
        assert!(matches!(
            SharedStrings::read(xml.as_bytes(), Some(1)),
            Err(Error::LimitExceeded(_))
        ));
    }

    #[test]
    fn test_truncated_table() {
        let xml = "<sst><si><t>a</t></si><si><t>b</t></si>";
        assert!(matches!(
            SharedStrings::read(xml.as_bytes(), None),
            Err(Error::XmlParse(_))
        ));
    }

    #[test]
    fn test_default_is_empty() {
        let ss = SharedStrings::default();
        assert!(ss.is_empty());
        assert!(ss.lookup(0).is_err());
    }
}
