//! Column labels and A1-style cell references.

use crate::error::{Error, Result};

/// Convert an alphabetic column label to its 1-based column number.
///
/// Labels are bijective base-26 numerals: `A` is 1, `Z` is 26, `AA` is 27.
/// The label must be non-empty and contain only uppercase ASCII letters.
///
/// # Example
///
/// ```
/// use unsheet::reference::column_label_to_number;
///
/// assert_eq!(column_label_to_number("A")?, 1);
/// assert_eq!(column_label_to_number("AZ")?, 52);
/// # Ok::<(), unsheet::Error>(())
/// ```
pub fn column_label_to_number(label: &str) -> Result<u64> {
    if label.is_empty() {
        return Err(Error::InvalidArgument("empty column label".to_string()));
    }

    let mut sum: u64 = 0;
    for byte in label.bytes() {
        if !byte.is_ascii_uppercase() {
            return Err(Error::InvalidArgument(format!(
                "column label {:?} must contain only A-Z",
                label
            )));
        }
        sum = sum
            .checked_mul(26)
            .and_then(|s| s.checked_add(u64::from(byte - b'A' + 1)))
            .ok_or_else(|| {
                Error::InvalidArgument(format!("column label {:?} is too long", label))
            })?;
    }

    Ok(sum)
}

/// A cell coordinate split into its column label and row number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef<'a> {
    /// Leading alphabetic run, e.g. `AB` in `AB12`
    pub column: &'a str,
    /// Trailing numeric run, 1-based
    pub row: u64,
}

impl<'a> CellRef<'a> {
    /// Split a coordinate such as `B17` into column `B` and row `17`.
    ///
    /// The split is purely lexical; the row is not checked against any
    /// sheet bounds.
    pub fn parse(reference: &'a str) -> Result<Self> {
        let split = reference
            .bytes()
            .position(|b| !b.is_ascii_uppercase())
            .unwrap_or(reference.len());
        let (column, digits) = reference.split_at(split);

        if column.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(Error::InvalidCellReference(reference.to_string()));
        }

        let row = digits
            .parse::<u64>()
            .map_err(|_| Error::InvalidCellReference(reference.to_string()))?;

        Ok(Self { column, row })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_letters() {
        for (i, letter) in ('A'..='Z').enumerate() {
            let label = letter.to_string();
            assert_eq!(column_label_to_number(&label).unwrap(), i as u64 + 1);
        }
    }

    #[test]
    fn test_multi_letter_labels() {
        let table = [
            ("A", 1),
            ("Z", 26),
            ("AA", 27),
            ("AB", 28),
            ("AZ", 52),
            ("BA", 53),
            ("ZZ", 702),
            ("AAA", 703),
            ("XFD", 16384),
        ];
        for (label, expected) in table {
            assert_eq!(column_label_to_number(label).unwrap(), expected, "{label}");
        }
    }

    #[test]
    fn test_invalid_labels() {
        for label in ["", "a", "A1", "Ä", "A-B", " A"] {
            let err = column_label_to_number(label).unwrap_err();
            assert!(matches!(err, Error::InvalidArgument(_)), "{label:?}");
        }
    }

    #[test]
    fn test_label_overflow() {
        let label = "Z".repeat(20);
        assert!(matches!(
            column_label_to_number(&label),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_parse_cell_ref() {
        let cell = CellRef::parse("B17").unwrap();
        assert_eq!(cell.column, "B");
        assert_eq!(cell.row, 17);

        let cell = CellRef::parse("XFD1048576").unwrap();
        assert_eq!(cell.column, "XFD");
        assert_eq!(cell.row, 1_048_576);

        let cell = CellRef::parse("A4294967296").unwrap();
        assert_eq!(cell.row, 4_294_967_296);
    }

    #[test]
    fn test_parse_invalid_cell_ref() {
        for reference in ["", "17", "B", "b17", "B1C", "$B$1", "B-1"] {
            assert!(
                matches!(
                    CellRef::parse(reference),
                    Err(Error::InvalidCellReference(_))
                ),
                "{reference:?}"
            );
        }
    }
}
