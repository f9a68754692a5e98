//! Expiry date shapes, parsing, and the "strictly in the future" rule.
//!
//! Three textual shapes are accepted, tried in this order:
//!
//! | Shape        | Example      |
//! |--------------|--------------|
//! | `YYYYMMDD`   | `20260331`   |
//! | `YYYY-MM-DD` | `2026-03-31` |
//! | `DD/MM/YYYY` | `31/03/2026` |

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// A recognized textual expiry shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryFormat {
    /// Eight contiguous digits, `YYYYMMDD`.
    Compact,
    /// ISO calendar date, `YYYY-MM-DD`.
    Iso,
    /// Day first with slashes, `DD/MM/YYYY`.
    DayMonthYear,
}

impl ExpiryFormat {
    /// Detect which shape `input` has. First match wins; anything else is
    /// `None`.
    pub fn detect(input: &str) -> Option<Self> {
        let b = input.as_bytes();
        if matches_shape(b, b"dddddddd") {
            Some(Self::Compact)
        } else if matches_shape(b, b"dddd-dd-dd") {
            Some(Self::Iso)
        } else if matches_shape(b, b"dd/dd/dddd") {
            Some(Self::DayMonthYear)
        } else {
            None
        }
    }
}

/// `d` in the pattern matches one ASCII digit; every other byte matches
/// itself. Anchored at both ends.
fn matches_shape(input: &[u8], pattern: &[u8]) -> bool {
    input.len() == pattern.len()
        && input.iter().zip(pattern).all(|(c, p)| match p {
            b'd' => c.is_ascii_digit(),
            _ => c == p,
        })
}

fn digits(s: &str) -> u32 {
    // callers pass only slices already checked by `matches_shape`
    s.bytes().fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
}

/// Parse an expiry string in any accepted shape into a calendar date.
///
/// Returns `None` for unknown shapes and for impossible dates such as
/// `2026-02-31` or month `13`.
pub fn parse_expiry(input: &str) -> Option<NaiveDate> {
    let (year, month, day) = match ExpiryFormat::detect(input)? {
        ExpiryFormat::Compact => (
            digits(&input[0..4]),
            digits(&input[4..6]),
            digits(&input[6..8]),
        ),
        ExpiryFormat::Iso => (
            digits(&input[0..4]),
            digits(&input[5..7]),
            digits(&input[8..10]),
        ),
        ExpiryFormat::DayMonthYear => (
            digits(&input[6..10]),
            digits(&input[3..5]),
            digits(&input[0..2]),
        ),
    };
    // year has at most four digits, so it always fits in an i32
    NaiveDate::from_ymd_opt(year as i32, month, day)
}

/// Rewrite an expiry in any accepted shape as ISO `YYYY-MM-DD`.
pub fn normalize_expiry(input: &str) -> Option<String> {
    parse_expiry(input).map(|d| d.format("%Y-%m-%d").to_string())
}

/// Check an optional expiry against a given "today".
///
/// Absent or empty input is valid. Otherwise the input must have an accepted
/// shape, name a real date, and that date must be strictly after `today`:
/// an expiry of today is rejected.
pub fn validate_expiry_date_on(input: Option<&str>, today: NaiveDate) -> bool {
    match input {
        None | Some("") => true,
        Some(s) => parse_expiry(s).is_some_and(|date| date > today),
    }
}

/// Check an optional expiry against the local calendar date.
pub fn validate_expiry_date(input: Option<&str>) -> bool {
    validate_expiry_date_on(input, local_today())
}

/// Today's date in the local timezone.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}
