//! Streaming worksheet parser.
//!
//! A [`Worksheet`] owns its own archive handle; [`Worksheet::cells`] opens a
//! fresh stream over the worksheet part and returns a pull-based iterator.
//! Nothing is buffered beyond the events produced by the element currently
//! under the cursor.

use std::collections::VecDeque;

use quick_xml::events::Event;
use quick_xml::Reader;

use super::selector::ColumnSelectors;
use super::shared_strings::SharedStrings;
use crate::container::{Archive, PartStream};
use crate::error::{Error, Result};
use crate::model::{CellEvent, CellValue, SheetEvent};
use crate::reference::CellRef;
use crate::xml;

/// A worksheet ready to be streamed.
#[derive(Debug)]
pub struct Worksheet<'wb> {
    name: String,
    part: String,
    archive: Archive,
    shared_strings: &'wb SharedStrings,
}

impl<'wb> Worksheet<'wb> {
    pub(crate) fn new(
        name: String,
        part: String,
        archive: Archive,
        shared_strings: &'wb SharedStrings,
    ) -> Self {
        Self {
            name,
            part,
            archive,
            shared_strings,
        }
    }

    /// Sheet display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path of the worksheet part inside the archive.
    pub fn part(&self) -> &str {
        &self.part
    }

    /// Stream row and cell events, keeping only cells picked by `selectors`.
    ///
    /// Each call starts a new pass from the beginning of the part. Dropping
    /// the iterator releases the part stream.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use unsheet::{ColumnSelectors, SheetEvent, Workbook};
    ///
    /// let workbook = Workbook::open("book.xlsx")?;
    /// let mut sheet = workbook.worksheet("Sheet1")?;
    /// let selectors = ColumnSelectors::new(["A", "C:E"])?;
    ///
    /// for event in sheet.cells(&selectors)? {
    ///     if let SheetEvent::Cell(cell) = event? {
    ///         println!("{} = {:?}", cell.coordinate, cell.value.as_str());
    ///     }
    /// }
    /// # Ok::<(), unsheet::Error>(())
    /// ```
    pub fn cells(&mut self, selectors: &ColumnSelectors) -> Result<CellEvents<'_>> {
        let stream = self.archive.open_part(&self.part)?;
        Ok(CellEvents::new(
            stream,
            self.shared_strings,
            selectors.clone(),
        ))
    }
}

/// What a single token from the stream asks the parser to do.
enum Step {
    RowStart,
    EmptyRow,
    RowEnd,
    Cell {
        reference: String,
        cell_type: Option<String>,
        has_content: bool,
    },
    Skip,
    Eof,
}

/// Iterator over the events of one worksheet pass.
///
/// Yields `Err` at most once; after an error or the end of the part the
/// iterator is fused.
pub struct CellEvents<'a> {
    reader: Reader<PartStream<'a>>,
    buf: Vec<u8>,
    text_buf: Vec<u8>,
    shared_strings: &'a SharedStrings,
    selectors: ColumnSelectors,
    pending: VecDeque<SheetEvent>,
    depth: usize,
    finished: bool,
}

impl<'a> CellEvents<'a> {
    fn new(
        stream: PartStream<'a>,
        shared_strings: &'a SharedStrings,
        selectors: ColumnSelectors,
    ) -> Self {
        Self {
            reader: Reader::from_reader(stream),
            buf: Vec::new(),
            text_buf: Vec::new(),
            shared_strings,
            selectors,
            pending: VecDeque::new(),
            depth: 0,
            finished: false,
        }
    }

    /// Read tokens until at least one event is pending or the part ends.
    fn advance(&mut self) -> Result<()> {
        while self.pending.is_empty() && !self.finished {
            match self.next_step()? {
                Step::RowStart => self.pending.push_back(SheetEvent::RowStart),
                Step::EmptyRow => {
                    self.pending.push_back(SheetEvent::RowStart);
                    self.pending.push_back(SheetEvent::RowEnd);
                }
                Step::RowEnd => self.pending.push_back(SheetEvent::RowEnd),
                Step::Cell {
                    reference,
                    cell_type,
                    has_content,
                } => self.read_cell(reference, cell_type.as_deref(), has_content)?,
                Step::Skip => {}
                Step::Eof => self.finished = true,
            }
        }
        Ok(())
    }

    fn next_step(&mut self) -> Result<Step> {
        self.buf.clear();
        let step = match self.reader.read_event_into(&mut self.buf)? {
            Event::Start(e) => {
                self.depth += 1;
                match e.local_name().as_ref() {
                    b"row" => Step::RowStart,
                    b"c" => Step::Cell {
                        reference: xml::required_attribute(&e, "r", "c")?,
                        cell_type: xml::attribute(&e, b"t")?,
                        has_content: true,
                    },
                    _ => Step::Skip,
                }
            }
            Event::Empty(e) => match e.local_name().as_ref() {
                b"row" => Step::EmptyRow,
                b"c" => Step::Cell {
                    reference: xml::required_attribute(&e, "r", "c")?,
                    cell_type: xml::attribute(&e, b"t")?,
                    has_content: false,
                },
                _ => Step::Skip,
            },
            Event::End(e) => {
                self.depth = self.depth.saturating_sub(1);
                if e.local_name().as_ref() == b"row" {
                    Step::RowEnd
                } else {
                    Step::Skip
                }
            }
            Event::Eof => {
                xml::ensure_closed(self.depth)?;
                Step::Eof
            }
            _ => Step::Skip,
        };
        Ok(step)
    }

    /// Resolve the cell value and queue one event per matching selector.
    ///
    /// Cell types other than untyped, `s` and `n` leave the cell's children
    /// unread; they are skipped by the main loop like any other element.
    fn read_cell(
        &mut self,
        reference: String,
        cell_type: Option<&str>,
        has_content: bool,
    ) -> Result<()> {
        let cell = CellRef::parse(&reference)?;
        let (column, row) = (cell.column.to_string(), cell.row);

        let value = match cell_type {
            None | Some("n") if has_content => CellValue::Text(self.read_text()?),
            Some("s") if has_content => {
                let raw = self.read_text()?;
                let index = raw
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| Error::InvalidSharedStringIndex(raw.clone()))?;
                CellValue::Text(self.shared_strings.lookup(index)?.to_string())
            }
            // TODO: read the cached result of formula string cells ("str")
            // once it is decided whether they should carry a value.
            _ => CellValue::Absent,
        };

        let count = self
            .selectors
            .match_count(&column)
            .map_err(|_| Error::InvalidCellReference(reference.clone()))?;
        if count == 0 {
            return Ok(());
        }

        let event = CellEvent {
            coordinate: reference,
            row,
            column,
            value,
        };
        for _ in 1..count {
            self.pending.push_back(SheetEvent::Cell(event.clone()));
        }
        self.pending.push_back(SheetEvent::Cell(event));
        Ok(())
    }

    /// Read the text of the cell just opened, through its end tag.
    fn read_text(&mut self) -> Result<String> {
        let text = xml::read_text(&mut self.reader, &mut self.text_buf)?;
        self.depth = self.depth.saturating_sub(1);
        Ok(text)
    }
}

impl Iterator for CellEvents<'_> {
    type Item = Result<SheetEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(event) = self.pending.pop_front() {
            return Some(Ok(event));
        }
        if self.finished {
            return None;
        }
        match self.advance() {
            Ok(()) => self.pending.pop_front().map(Ok),
            Err(e) => {
                self.finished = true;
                self.pending.clear();
                Some(Err(e))
            }
        }
    }
}

impl std::iter::FusedIterator for CellEvents<'_> {}

impl std::fmt::Debug for CellEvents<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CellEvents")
            .field("pending", &self.pending.len())
            .field("finished", &self.finished)
            .finish()
    }
}
