//! Error types for the unsheet library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for unsheet operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Broad classification of an [`Error`].
///
/// Callers that only need to tell "not there" apart from "broken" can match
/// on this instead of every individual variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A document, part or worksheet does not exist.
    NotFound,
    /// The document exists but its structure or content is invalid.
    MalformedDocument,
    /// A caller-supplied argument violates its contract.
    InvalidArgument,
    /// An I/O failure unrelated to the document structure.
    Io,
}

/// Errors that can occur while reading a workbook.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The workbook file does not exist.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// A required part is missing from the archive.
    #[error("Missing part: {0}")]
    MissingPart(String),

    /// The requested worksheet is not declared in the workbook.
    #[error("Worksheet not found: {0}")]
    WorksheetNotFound(String),

    /// Error reading ZIP archive.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// Error parsing XML content.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// A required attribute is absent from an element.
    #[error("<{element}> element without '{attribute}' attribute")]
    MissingAttribute {
        /// Element local name
        element: &'static str,
        /// Attribute name
        attribute: &'static str,
    },

    /// A sheet refers to a relationship id that is not in the manifest.
    #[error("Unresolved relationship id: {0}")]
    UnresolvedRelationship(String),

    /// A cell coordinate could not be split into column and row.
    #[error("Invalid cell reference: {0:?}")]
    InvalidCellReference(String),

    /// A shared-string cell does not hold a decimal index.
    #[error("Invalid shared string index: {0:?}")]
    InvalidSharedStringIndex(String),

    /// A shared-string index points past the end of the table.
    #[error("Shared string index {index} out of range (table size {len})")]
    SharedStringOutOfRange {
        /// Referenced index
        index: usize,
        /// Number of entries in the table
        len: usize,
    },

    /// The document exceeds a configured limit.
    #[error("Limit exceeded: {0}")]
    LimitExceeded(String),

    /// A caller-supplied argument is invalid.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::FileNotFound(_) | Error::MissingPart(_) | Error::WorksheetNotFound(_) => {
                ErrorKind::NotFound
            }
            Error::ZipArchive(_)
            | Error::XmlParse(_)
            | Error::MissingAttribute { .. }
            | Error::UnresolvedRelationship(_)
            | Error::InvalidCellReference(_)
            | Error::InvalidSharedStringIndex(_)
            | Error::SharedStringOutOfRange { .. }
            | Error::LimitExceeded(_) => ErrorKind::MalformedDocument,
            Error::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Error::Io(_) => ErrorKind::Io,
        }
    }

    /// Whether this error means something was not found.
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Whether this error means the document is structurally broken.
    pub fn is_malformed(&self) -> bool {
        self.kind() == ErrorKind::MalformedDocument
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            other => Error::ZipArchive(other.to_string()),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlParse(err.to_string())
    }
}
