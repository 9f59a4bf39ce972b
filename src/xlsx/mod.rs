//! XLSX (Excel) workbook reader.
//!
//! This module streams worksheet cells out of Office Open XML (.xlsx)
//! workbooks without materializing whole parts in memory.
//!
//! # Example
//!
//! ```no_run
//! use unsheet::xlsx::{ColumnSelectors, Workbook};
//!
//! let workbook = Workbook::open("spreadsheet.xlsx")?;
//! println!("{} shared strings", workbook.shared_string_count());
//!
//! let mut sheet = workbook.worksheet("Sheet1")?;
//! let rows = sheet
//!     .cells(&ColumnSelectors::all())?
//!     .filter(|e| matches!(e, Ok(unsheet::SheetEvent::RowStart)))
//!     .count();
//! println!("{} rows", rows);
//! # Ok::<(), unsheet::Error>(())
//! ```

mod catalog;
mod selector;
mod shared_strings;
mod workbook;
mod worksheet;

pub use catalog::{SheetCatalog, SheetInfo};
pub use selector::ColumnSelectors;
pub use shared_strings::SharedStrings;
pub use workbook::Workbook;
pub use worksheet::{CellEvents, Worksheet};
