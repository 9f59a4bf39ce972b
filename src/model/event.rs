//! Row and cell events.

use crate::date::serial_text_to_date;
use crate::error::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Value carried by a cell event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum CellValue {
    /// No value was extracted (self-closing cell, or a cell type that is
    /// not read, such as formula strings)
    #[default]
    Absent,
    /// Raw numeric text, resolved shared string, or raw cell text
    Text(String),
}

impl CellValue {
    /// Borrow the text, if present.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Absent => None,
            CellValue::Text(s) => Some(s),
        }
    }

    /// Check whether a value was extracted.
    pub fn is_absent(&self) -> bool {
        matches!(self, CellValue::Absent)
    }

    /// Interpret the text as a serial date.
    ///
    /// Returns `Ok(None)` for an absent value.
    pub fn to_date(&self) -> Result<Option<NaiveDate>> {
        self.as_str().map(serial_text_to_date).transpose()
    }

    /// Take the text out of the value.
    pub fn into_string(self) -> Option<String> {
        match self {
            CellValue::Absent => None,
            CellValue::Text(s) => Some(s),
        }
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

/// One selected cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellEvent {
    /// Coordinate as written in the sheet (e.g. "B17")
    pub coordinate: String,

    /// Row number, 1-based
    pub row: u64,

    /// Column label (e.g. "B")
    pub column: String,

    /// Extracted value
    pub value: CellValue,
}

/// Event produced while streaming a worksheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SheetEvent {
    /// A `<row>` element opened
    RowStart,
    /// A selected cell
    Cell(CellEvent),
    /// The current row closed
    RowEnd,
}

impl SheetEvent {
    /// Get the cell, if this is a cell event.
    pub fn as_cell(&self) -> Option<&CellEvent> {
        match self {
            SheetEvent::Cell(cell) => Some(cell),
            _ => None,
        }
    }
}
