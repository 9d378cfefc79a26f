//! Acquisition-date parsing and output formatting.
//!
//! Input dates are strict `YYYY-MM-DD`. Single-resource responses render
//! timestamps as `YYYY-MM-DD HH:MM:SS`; list responses render the date part
//! only.

use chrono::{NaiveDate, TimeZone, Utc};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Accepted input format for `acquisition_date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Output format for single-resource responses.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Message returned to clients for a malformed acquisition date.
pub const INVALID_DATE_MESSAGE: &str = "Invalid acquisition date format";

/// Parse a `YYYY-MM-DD` acquisition date into midnight UTC.
///
/// Zero-padding is required (`2023-5-1` is rejected) and the calendar date
/// must exist.
pub fn parse_acquisition_date(raw: &str) -> Result<Timestamp, CoreError> {
    if !has_date_shape(raw) {
        return Err(CoreError::Validation(INVALID_DATE_MESSAGE.to_string()));
    }
    let date = NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| CoreError::Validation(INVALID_DATE_MESSAGE.to_string()))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| CoreError::Validation(INVALID_DATE_MESSAGE.to_string()))?;
    Ok(Utc.from_utc_datetime(&midnight))
}

/// Render a timestamp as `YYYY-MM-DD HH:MM:SS`.
pub fn format_datetime(ts: &Timestamp) -> String {
    ts.format(DATETIME_FORMAT).to_string()
}

/// Render the date part of a timestamp as `YYYY-MM-DD`.
pub fn format_date(ts: &Timestamp) -> String {
    ts.format(DATE_FORMAT).to_string()
}

fn has_date_shape(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}
