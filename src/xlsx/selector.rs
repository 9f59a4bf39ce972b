//! Column selectors used to filter worksheet cells.

use crate::error::{Error, Result};
use crate::reference::column_label_to_number;
use std::str::FromStr;

/// Inclusive range of column numbers written as `low:high`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnRange {
    low: u64,
    high: u64,
}

impl ColumnRange {
    fn parse(token: &str) -> Result<Self> {
        let (low, high) = token
            .split_once(':')
            .ok_or_else(|| Error::InvalidArgument(format!("{:?} is not a range", token)))?;
        Ok(Self {
            low: column_label_to_number(low)?,
            high: column_label_to_number(high)?,
        })
    }

    fn contains(&self, column: u64) -> bool {
        self.low <= column && column <= self.high
    }
}

/// Caller-supplied set of column filters.
///
/// A selector is either a single column label (`"C"`) or a closed range
/// (`"C:F"`). Literal and range selectors are independent predicates: a
/// cell in `D` selected by both `"D"` and `"D:F"` is reported twice, once
/// per matching predicate.
///
/// An empty set selects no cells; only row markers are produced. Use
/// [`ColumnSelectors::all`] to report every cell once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSelectors {
    columns: Vec<String>,
    ranges: Vec<ColumnRange>,
    all: bool,
}

impl ColumnSelectors {
    /// Build selectors from labels and ranges.
    ///
    /// Range endpoints must be valid column labels; literal labels are kept
    /// verbatim and simply never match if they are not real labels.
    ///
    /// # Example
    ///
    /// ```
    /// use unsheet::ColumnSelectors;
    ///
    /// let selectors = ColumnSelectors::new(["B", "D:F"])?;
    /// assert!(selectors.has_ranges());
    /// # Ok::<(), unsheet::Error>(())
    /// ```
    pub fn new<I, S>(selectors: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for selector in selectors {
            let selector = selector.as_ref();
            if selector.contains(':') {
                set.ranges.push(ColumnRange::parse(selector)?);
            } else {
                set.columns.push(selector.to_string());
            }
        }
        Ok(set)
    }

    /// Select every cell exactly once.
    pub fn all() -> Self {
        Self {
            all: true,
            ..Self::default()
        }
    }

    /// Whether any range selector is present.
    pub fn has_ranges(&self) -> bool {
        !self.ranges.is_empty()
    }

    /// Whether no selector is present.
    pub fn is_empty(&self) -> bool {
        !self.all && self.columns.is_empty() && self.ranges.is_empty()
    }

    /// Number of events to emit for a cell in `column`.
    pub(crate) fn match_count(&self, column: &str) -> Result<usize> {
        if self.all {
            return Ok(1);
        }

        let mut count = usize::from(self.columns.iter().any(|c| c == column));

        if self.has_ranges() {
            let number = column_label_to_number(column)?;
            count += self.ranges.iter().filter(|r| r.contains(number)).count();
        }

        Ok(count)
    }
}

impl FromStr for ColumnSelectors {
    type Err = Error;

    /// Parse a comma separated list such as `"A,C:F"`. `"*"` selects all.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s == "*" {
            return Ok(Self::all());
        }
        Self::new(s.split(',').map(str::trim).filter(|t| !t.is_empty()))
    }
}
