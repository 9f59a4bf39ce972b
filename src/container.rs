//! ZIP container access for OOXML workbooks.
//!
//! Parts are never read into memory as a whole: every part is handed out as
//! a buffered stream over its decompressed bytes.

use crate::error::{Error, Result};
use crate::options::ReadOptions;
use crate::xml;
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Relationship manifest of the workbook part.
pub const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";

/// Workbook manifest listing the sheets.
pub const WORKBOOK_PART: &str = "xl/workbook.xml";

/// Shared strings table.
pub const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";

/// A forward-only stream over one decompressed part.
pub type PartStream<'a> = Box<dyn BufRead + 'a>;

/// Relationship map parsed from a .rels part: id to target.
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    by_id: HashMap<String, String>,
}

impl Relationships {
    /// Create a new empty relationships collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a relationships part.
    ///
    /// Every `Relationship` element contributes `Id -> Target`; other
    /// elements are ignored. A part that ends with elements still open is
    /// rejected.
    pub fn read<R: BufRead>(stream: R) -> Result<Self> {
        let mut rels = Relationships::new();
        let mut reader = quick_xml::Reader::from_reader(stream);
        let mut buf = Vec::new();
        let mut depth = 0usize;

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    depth += 1;
                    if e.local_name().as_ref() == b"Relationship" {
                        rels.add_element(&e)?;
                    }
                }
                Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                    rels.add_element(&e)?;
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

        Ok(rels)
    }

    fn add_element(&mut self, element: &BytesStart<'_>) -> Result<()> {
        let id = xml::required_attribute(element, "Id", "Relationship")?;
        let target = xml::required_attribute(element, "Target", "Relationship")?;
        self.add(id, target);
        Ok(())
    }

    /// Get a relationship target by ID.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.by_id.get(id).map(String::as_str)
    }

    /// Add a relationship, replacing any earlier target for the same ID.
    pub fn add(&mut self, id: impl Into<String>, target: impl Into<String>) {
        self.by_id.insert(id.into(), target.into());
    }

    /// Number of relationships.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Iterate over `(id, target)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.by_id.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Where the package bytes come from.
#[derive(Debug, Clone)]
enum Source {
    File(PathBuf),
    Memory(Arc<[u8]>),
}

/// Seekable reader over either source.
enum SourceReader {
    File(BufReader<File>),
    Memory(Cursor<Arc<[u8]>>),
}

impl Read for SourceReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            SourceReader::File(r) => r.read(buf),
            SourceReader::Memory(r) => r.read(buf),
        }
    }
}

impl Seek for SourceReader {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        match self {
            SourceReader::File(r) => r.seek(pos),
            SourceReader::Memory(r) => r.seek(pos),
        }
    }
}

/// OOXML package handle.
///
/// Holds only the location of the document. Each call to
/// [`Package::archive`] opens an independent archive handle, so separate
/// extractions never share a read cursor.
#[derive(Clone)]
pub struct Package {
    source: Source,
    buffer_capacity: usize,
}

impl Package {
    /// Open a package from a file path.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use unsheet::container::Package;
    ///
    /// let package = Package::open("book.xlsx")?;
    /// let archive = package.archive()?;
    /// assert!(archive.has_part("xl/workbook.xml"));
    /// # Ok::<(), unsheet::Error>(())
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_options(path, &ReadOptions::default())
    }

    /// Open a package from a file path with explicit options.
    pub fn open_with_options(path: impl AsRef<Path>, options: &ReadOptions) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        Ok(Self {
            source: Source::File(path.to_path_buf()),
            buffer_capacity: options.buffer_capacity,
        })
    }

    /// Create a package from bytes already in memory.
    pub fn from_bytes(data: Vec<u8>, options: &ReadOptions) -> Self {
        Self {
            source: Source::Memory(Arc::from(data)),
            buffer_capacity: options.buffer_capacity,
        }
    }

    /// Open a fresh archive handle.
    pub fn archive(&self) -> Result<Archive> {
        let reader = match &self.source {
            Source::File(path) => {
                let file = File::open(path).map_err(|e| match e.kind() {
                    io::ErrorKind::NotFound => Error::FileNotFound(path.clone()),
                    _ => Error::Io(e),
                })?;
                SourceReader::File(BufReader::new(file))
            }
            Source::Memory(data) => SourceReader::Memory(Cursor::new(Arc::clone(data))),
        };

        Ok(Archive {
            inner: zip::ZipArchive::new(reader)?,
            buffer_capacity: self.buffer_capacity,
        })
    }

    /// Path of the underlying file, if opened from disk.
    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            Source::File(path) => Some(path),
            Source::Memory(_) => None,
        }
    }
}

impl std::fmt::Debug for Package {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let source = match &self.source {
            Source::File(path) => path.display().to_string(),
            Source::Memory(data) => format!("<{} bytes in memory>", data.len()),
        };
        f.debug_struct("Package").field("source", &source).finish()
    }
}

/// An open archive from which part streams are drawn.
pub struct Archive {
    inner: zip::ZipArchive<SourceReader>,
    buffer_capacity: usize,
}

impl Archive {
    /// Open a stream over the named part.
    ///
    /// The stream borrows the archive and is released when dropped.
    pub fn open_part(&mut self, name: &str) -> Result<PartStream<'_>> {
        let file = self.inner.by_name(name).map_err(|e| match e {
            zip::result::ZipError::FileNotFound => Error::MissingPart(name.to_string()),
            other => Error::from(other),
        })?;
        Ok(Box::new(BufReader::with_capacity(self.buffer_capacity, file)))
    }

    /// Check if a part exists in the archive.
    pub fn has_part(&self, name: &str) -> bool {
        self.inner.file_names().any(|n| n == name)
    }

    /// List all part names in the archive.
    pub fn part_names(&self) -> Vec<String> {
        self.inner.file_names().map(String::from).collect()
    }
}

impl std::fmt::Debug for Archive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Archive")
            .field("parts", &self.inner.len())
            .finish()
    }
}

/// Resolve a relationship target relative to the part that owns it.
pub fn resolve_path(base: &str, relative: &str) -> String {
    if let Some(stripped) = relative.strip_prefix('/') {
        return stripped.to_string();
    }

    let mut parts: Vec<&str> = base.split('/').collect();
    parts.pop();

    for component in relative.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            c => parts.push(c),
        }
    }

    parts.join("/")
}
