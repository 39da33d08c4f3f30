//! Expiration date normalization
//!
//! Pass2U wants `expirationDate` as an ISO-8601 timestamp with an explicit
//! numeric offset. Roster cells hold either a spreadsheet serial day count or
//! `DD/MM/YYYY` text; both are turned into local midnight of that day.

use chrono::{DateTime, Local, LocalResult, NaiveDate, NaiveDateTime, TimeDelta, TimeZone};

use super::value::CellValue;

/// Day 1 of the spreadsheet serial numbering
const SERIAL_EPOCH: (i32, u32, u32) = (1900, 1, 1);

/// Output layout, e.g. `2025-12-31T00:00:00.000+02:00`
const CANONICAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%:z";

/// Raw expiration value, resolved once from the roster cell
#[derive(Debug, Clone, PartialEq)]
pub enum ExpirationInput {
    /// Spreadsheet serial day count
    Serial(f64),
    /// Text expected in `DD/MM/YYYY` form
    Text(String),
    /// Empty, boolean or anything else that cannot carry a date
    Unsupported,
}

impl ExpirationInput {
    pub fn from_cell(cell: &CellValue) -> Self {
        if let Some(serial) = cell.as_number() {
            return ExpirationInput::Serial(serial);
        }
        match cell.as_str() {
            Some(text) => ExpirationInput::Text(text.to_string()),
            None => ExpirationInput::Unsupported,
        }
    }

    /// Calendar date this input denotes, or `None` when it is invalid
    pub fn to_date(&self) -> Option<NaiveDate> {
        match self {
            ExpirationInput::Serial(serial) => serial_to_date(*serial),
            ExpirationInput::Text(text) => parse_day_month_year(text),
            ExpirationInput::Unsupported => None,
        }
    }
}

/// Normalize an expiration value against the process's local offset.
///
/// Returns `None` for any value that does not denote a valid calendar date.
pub fn normalize(input: &ExpirationInput) -> Option<String> {
    normalize_in(input, &Local)
}

/// Normalize an expiration value to local midnight in `tz`.
pub fn normalize_in<Tz>(input: &ExpirationInput, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let date = input.to_date()?;
    let midnight = local_midnight(date, tz)?;
    Some(midnight.format(CANONICAL_FORMAT).to_string())
}

/// Serial `d` is the epoch day plus `d - 1` days. Day 1 is 1900-01-01, so
/// serials past February 1900 land one day after the spreadsheet's own
/// (leap-year-bugged) reading.
pub fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    let whole_days = serial.trunc();
    if !whole_days.is_finite() || whole_days < i64::MIN as f64 || whole_days > i64::MAX as f64 {
        return None;
    }

    let (year, month, day) = SERIAL_EPOCH;
    let epoch = NaiveDate::from_ymd_opt(year, month, day)?;
    let offset = TimeDelta::try_days((whole_days as i64).checked_sub(1)?)?;
    epoch.checked_add_signed(offset)
}

/// Parse strict `DD/MM/YYYY` text. Day and month may drop their leading zero.
pub fn parse_day_month_year(text: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = text.split('/').collect();
    let [day, month, year] = parts.as_slice() else {
        return None;
    };

    if !is_digits(day, 1, 2) || !is_digits(month, 1, 2) || !is_digits(year, 4, 4) {
        return None;
    }

    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

fn is_digits(s: &str, min_len: usize, max_len: usize) -> bool {
    (min_len..=max_len).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
}

/// Midnight of `date` in `tz`. If midnight falls into a DST gap, the first
/// valid quarter hour after it is used instead.
fn local_midnight<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Option<DateTime<Tz>> {
    let midnight: NaiveDateTime = date.and_hms_opt(0, 0, 0)?;

    match tz.from_local_datetime(&midnight) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => (1..=16).find_map(|quarter| {
            let shifted = midnight + TimeDelta::minutes(15 * quarter);
            tz.from_local_datetime(&shifted).earliest()
        }),
    }
}
