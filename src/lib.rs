//! # unsheet
//!
//! Streaming cell extraction from Excel (.xlsx) worksheets.
//!
//! A workbook is opened once: its relationship manifest, sheet list and
//! shared strings are read up front. Worksheets are then streamed as a lazy
//! sequence of row and cell events, filtered by column, without loading the
//! sheet into memory.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unsheet::{ColumnSelectors, SheetEvent, Workbook};
//!
//! let workbook = Workbook::open("report.xlsx")?;
//! println!("Sheets: {:?}", workbook.sheet_names());
//!
//! let mut sheet = workbook.worksheet("Sheet1")?;
//! let selectors = ColumnSelectors::new(["A", "C:E"])?;
//!
//! for event in sheet.cells(&selectors)? {
//!     match event? {
//!         SheetEvent::RowStart => print!("|"),
//!         SheetEvent::Cell(cell) => print!(" {} |", cell.value.as_str().unwrap_or("")),
//!         SheetEvent::RowEnd => println!(),
//!     }
//! }
//! # Ok::<(), unsheet::Error>(())
//! ```
//!
//! ## Utilities
//!
//! ```
//! use unsheet::{column_label_to_number, serial_to_date};
//!
//! assert_eq!(column_label_to_number("AA")?, 27);
//! assert_eq!(serial_to_date(44197.0)?.to_string(), "2021-01-01");
//! # Ok::<(), unsheet::Error>(())
//! ```

pub mod container;
pub mod date;
pub mod error;
pub mod model;
pub mod options;
pub mod reference;
pub mod xlsx;

mod xml;

// Re-exports
pub use container::{Archive, Package, Relationships};
pub use date::serial_to_date;
pub use error::{Error, ErrorKind, Result};
pub use model::{CellEvent, CellValue, SheetEvent};
pub use options::ReadOptions;
pub use reference::{column_label_to_number, CellRef};
pub use xlsx::{CellEvents, ColumnSelectors, SharedStrings, Workbook, Worksheet};

use std::path::Path;

/// Open a workbook and list its sheet names in declaration order.
///
/// # Example
///
/// ```no_run
/// let names = unsheet::sheet_names("report.xlsx")?;
/// println!("{:?}", names);
/// # Ok::<(), unsheet::Error>(())
/// ```
pub fn sheet_names(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let workbook = Workbook::open(path)?;
    Ok(workbook
        .sheet_names()
        .into_iter()
        .map(String::from)
        .collect())
}
