//! Sheet catalog parsed from workbook.xml.

use crate::error::{Error, Result};
use crate::xml;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;
use std::collections::HashMap;
use std::io::BufRead;

/// Namespace of the `r:id` attribute on `<sheet>`.
const RELATIONSHIPS_NS: &[u8] =
    b"http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Sheet entry from workbook.xml.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetInfo {
    /// Display name, trimmed
    pub name: String,
    /// Relationship id pointing at the worksheet part
    pub rel_id: String,
}

/// Mapping from sheet name to relationship id, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct SheetCatalog {
    sheets: Vec<SheetInfo>,
    by_name: HashMap<String, usize>,
}

impl SheetCatalog {
    /// Parse the workbook manifest.
    pub fn read<R: BufRead>(stream: R) -> Result<Self> {
        let mut catalog = SheetCatalog::default();
        let mut reader = NsReader::from_reader(stream);
        let mut buf = Vec::new();
        let mut depth = 0usize;

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    depth += 1;
                    if e.local_name().as_ref() == b"sheet" {
                        let sheet = Self::read_sheet(&reader, &e)?;
                        catalog.insert(sheet);
                    }
                }
                Event::Empty(e) if e.local_name().as_ref() == b"sheet" => {
                    let sheet = Self::read_sheet(&reader, &e)?;
                    catalog.insert(sheet);
                }
                Event::End(_) => depth = depth.saturating_sub(1),
                Event::Eof => {
                    xml::ensure_closed(depth)?;
                    break;
                }
                _ => {}
            }
            buf.clear();
        }

        Ok(catalog)
    }

    fn read_sheet<R: BufRead>(
        reader: &NsReader<R>,
        element: &BytesStart<'_>,
    ) -> Result<SheetInfo> {
        let mut name = None;
        let mut rel_id = None;

        for attr in element.attributes() {
            let attr = attr?;
            match reader.resolve_attribute(attr.key) {
                (ResolveResult::Bound(Namespace(ns)), local)
                    if ns == RELATIONSHIPS_NS && local.as_ref() == b"id" =>
                {
                    rel_id = Some(attr.unescape_value()?.into_owned());
                }
                (ResolveResult::Unbound, local) if local.as_ref() == b"name" => {
                    name = Some(attr.unescape_value()?.trim().to_string());
                }
                _ => {}
            }
        }

        Ok(SheetInfo {
            name: name.ok_or(Error::MissingAttribute {
                element: "sheet",
                attribute: "name",
            })?,
            rel_id: rel_id.ok_or(Error::MissingAttribute {
                element: "sheet",
                attribute: "r:id",
            })?,
        })
    }

    /// Add a sheet. A repeated name keeps its first position and takes
    /// the new relationship id.
    pub fn insert(&mut self, sheet: SheetInfo) {
        match self.by_name.get(&sheet.name) {
            Some(&idx) => {
                log::warn!(
                    "duplicate sheet name {:?}: {} replaces {}",
                    sheet.name,
                    sheet.rel_id,
                    self.sheets[idx].rel_id
                );
                self.sheets[idx].rel_id = sheet.rel_id;
            }
            None => {
                self.by_name.insert(sheet.name.clone(), self.sheets.len());
                self.sheets.push(sheet);
            }
        }
    }

    /// Get the relationship id for a sheet name.
    pub fn rel_id(&self, name: &str) -> Option<&str> {
        self.by_name
            .get(name)
            .map(|&idx| self.sheets[idx].rel_id.as_str())
    }

    /// Sheet names in declaration order.
    pub fn names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// All sheets in declaration order.
    pub fn sheets(&self) -> &[SheetInfo] {
        &self.sheets
    }

    /// Number of sheets.
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}
