//! Serial date conversion.
//!
//! Excel stores dates as a day count in the 1900 date system, including the
//! phantom 1900-02-29. Conversion here keeps that behaviour so dates line up
//! with what spreadsheet applications display.

use crate::error::{Error, Result};
use chrono::{Days, NaiveDate};

/// Days subtracted from the serial before offsetting from 1900-01-01.
const SERIAL_OFFSET: f64 = 2.0;

/// Convert a serial day number into a calendar date.
///
/// The fractional (time-of-day) part is dropped. The result is
/// `1900-01-01 + (floor(serial) - 2)` days, so serials below 2 are rejected.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use unsheet::date::serial_to_date;
///
/// assert_eq!(serial_to_date(44197.0)?, NaiveDate::from_ymd_opt(2021, 1, 1).unwrap());
/// # Ok::<(), unsheet::Error>(())
/// ```
pub fn serial_to_date(serial: f64) -> Result<NaiveDate> {
    if !serial.is_finite() {
        return Err(Error::InvalidArgument(format!(
            "serial date {} is not a finite number",
            serial
        )));
    }

    let days = serial.floor() - SERIAL_OFFSET;
    if days < 0.0 {
        return Err(Error::InvalidArgument(format!(
            "serial date {} precedes 1900-01-01",
            serial
        )));
    }

    epoch()
        .checked_add_days(Days::new(days as u64))
        .ok_or_else(|| Error::InvalidArgument(format!("serial date {} is out of range", serial)))
}

/// Parse serial text (as found in a numeric cell) and convert it.
pub fn serial_text_to_date(text: &str) -> Result<NaiveDate> {
    let serial = text
        .trim()
        .parse::<f64>()
        .map_err(|_| Error::InvalidArgument(format!("{:?} is not a serial date", text)))?;
    serial_to_date(serial)
}

fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN)
}
