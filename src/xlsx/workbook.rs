//! Workbook initialization and worksheet lookup.

use std::path::Path;

use super::catalog::SheetCatalog;
use super::shared_strings::SharedStrings;
use super::worksheet::Worksheet;
use crate::container::{
    resolve_path, Package, Relationships, SHARED_STRINGS_PART, WORKBOOK_PART, WORKBOOK_RELS_PART,
};
use crate::error::{Error, Result};
use crate::options::ReadOptions;

/// An opened XLSX workbook.
///
/// Opening reads the relationship manifest, the workbook manifest and the
/// shared strings, in that order, one pass each. Worksheets are streamed on
/// demand afterwards, any number of times.
#[derive(Debug)]
pub struct Workbook {
    package: Package,
    relationships: Relationships,
    sheets: SheetCatalog,
    shared_strings: SharedStrings,
}

impl Workbook {
    /// Open an XLSX file.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use unsheet::Workbook;
    ///
    /// let workbook = Workbook::open("book.xlsx")?;
    /// for name in workbook.sheet_names() {
    ///     println!("{}", name);
    /// }
    /// # Ok::<(), unsheet::Error>(())
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_options(path, ReadOptions::default())
    }

    /// Open an XLSX file with explicit options.
    pub fn open_with_options(path: impl AsRef<Path>, options: ReadOptions) -> Result<Self> {
        let package = Package::open_with_options(path, &options)?;
        Self::from_package(package, &options)
    }

    /// Open a workbook held in memory.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_bytes_with_options(data, ReadOptions::default())
    }

    /// Open a workbook held in memory with explicit options.
    pub fn from_bytes_with_options(data: Vec<u8>, options: ReadOptions) -> Result<Self> {
        let package = Package::from_bytes(data, &options);
        Self::from_package(package, &options)
    }

    fn from_package(package: Package, options: &ReadOptions) -> Result<Self> {
        let mut archive = package.archive()?;

        let relationships = Relationships::read(archive.open_part(WORKBOOK_RELS_PART)?)?;
        log::debug!("{} workbook relationships", relationships.len());

        let sheets = SheetCatalog::read(archive.open_part(WORKBOOK_PART)?)?;
        log::debug!("{} sheets declared", sheets.len());

        let shared_strings = match archive.open_part(SHARED_STRINGS_PART) {
            Ok(stream) => SharedStrings::read(stream, options.max_shared_strings)?,
            Err(Error::MissingPart(_)) => {
                log::debug!("no shared strings part");
                SharedStrings::default()
            }
            Err(e) => return Err(e),
        };
        log::debug!("{} shared strings", shared_strings.len());

        Ok(Self {
            package,
            relationships,
            sheets,
            shared_strings,
        })
    }

    /// Sheet names in declaration order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.names()
    }

    /// Get the number of sheets.
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Number of entries in the shared strings table.
    pub fn shared_string_count(&self) -> usize {
        self.shared_strings.len()
    }

    /// The shared strings table.
    pub fn shared_strings(&self) -> &SharedStrings {
        &self.shared_strings
    }

    /// The workbook relationship map.
    pub fn relationships(&self) -> &Relationships {
        &self.relationships
    }

    /// The sheet catalog.
    pub fn catalog(&self) -> &SheetCatalog {
        &self.sheets
    }

    /// Resolve a sheet name to its part path inside the archive.
    pub fn worksheet_part(&self, name: &str) -> Result<String> {
        let rel_id = self
            .sheets
            .rel_id(name)
            .ok_or_else(|| Error::WorksheetNotFound(name.to_string()))?;
        let target = self
            .relationships
            .get(rel_id)
            .ok_or_else(|| Error::UnresolvedRelationship(rel_id.to_string()))?;
        Ok(resolve_path(WORKBOOK_PART, target))
    }

    /// Open a worksheet for streaming.
    ///
    /// The worksheet gets its own archive handle, so several worksheets
    /// (or several passes over one) can be read independently.
    pub fn worksheet(&self, name: &str) -> Result<Worksheet<'_>> {
        let part = self.worksheet_part(name)?;
        log::debug!("opening worksheet {:?} at {}", name, part);
        let archive = self.package.archive()?;
        Ok(Worksheet::new(
            name.to_string(),
            part,
            archive,
            &self.shared_strings,
        ))
    }
}
