//! GS1-128 element strings for DUN-14 shipping labels.
//!
//! A label carries up to three GS1 Application Identifiers, always in this
//! order:
//!
//! - `(01)` GTIN-14, fixed length 14
//! - `(17)` expiry date as `YYMMDD`, fixed length 6
//! - `(10)` batch/lot, variable length up to 20
//!
//! Two renderings are produced: the raw value handed to a Code-128 encoder,
//! and the human-readable interpretation printed under the bars.

use serde::{Deserialize, Serialize};

use crate::record::LabelRecord;

/// ASCII GS (group separator), the data form of FNC1 between elements.
pub const GROUP_SEPARATOR: char = '\u{1d}';

/// The GS1 Application Identifiers a DUN-14 label may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ApplicationIdentifier {
    /// `(01)` Global Trade Item Number.
    Gtin,
    /// `(17)` expiration date.
    ExpiryDate,
    /// `(10)` batch or lot number.
    BatchLot,
}

impl ApplicationIdentifier {
    /// The numeric AI prefix.
    pub fn code(self) -> &'static str {
        match self {
            Self::Gtin => "01",
            Self::ExpiryDate => "17",
            Self::BatchLot => "10",
        }
    }

    /// Data length for predefined fixed-length AIs; `None` for
    /// variable-length ones, which need a separator unless last.
    pub fn fixed_length(self) -> Option<usize> {
        match self {
            Self::Gtin => Some(14),
            Self::ExpiryDate => Some(6),
            Self::BatchLot => None,
        }
    }
}

/// One AI with its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gs1Element {
    /// Application identifier.
    pub ai: ApplicationIdentifier,
    /// Element data, without the AI prefix.
    pub data: String,
}

impl Gs1Element {
    fn new(ai: ApplicationIdentifier, data: impl Into<String>) -> Self {
        Self {
            ai,
            data: data.into(),
        }
    }
}

/// The fields of a label that feed the GS1 string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Gs1Input<'a> {
    /// 14-digit GTIN.
    pub gtin14: &'a str,
    /// Batch/lot, AI (10). Empty means absent.
    pub lot: Option<&'a str>,
    /// Expiry, AI (17). Only the ISO shape is encoded.
    pub expiry: Option<&'a str>,
}

impl<'a> From<&'a LabelRecord> for Gs1Input<'a> {
    fn from(record: &'a LabelRecord) -> Self {
        Self {
            gtin14: &record.gtin14,
            lot: record.lot.as_deref(),
            expiry: record.expiry.as_deref(),
        }
    }
}

/// The encoded value and its human-readable form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gs1Strings {
    /// What goes inside the Code-128 symbol: AIs without parentheses.
    pub value_for_encoding: String,
    /// Text under the symbol: each AI in parentheses followed by its data.
    pub human_readable: String,
}

/// Convert a strict `YYYY-MM-DD` date to the GS1 `YYMMDD` form.
///
/// Any other shape (including `YYYYMMDD` and `DD/MM/YYYY`) yields `None`.
/// The digits are copied as written; the date is not checked against the
/// calendar.
pub fn to_yymmdd(iso: Option<&str>) -> Option<String> {
    let iso = iso?;
    let b = iso.as_bytes();
    let shaped = b.len() == 10
        && b[4] == b'-'
        && b[7] == b'-'
        && b.iter()
            .enumerate()
            .all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit());
    if !shaped {
        return None;
    }
    Some(format!("{}{}{}", &iso[2..4], &iso[5..7], &iso[8..10]))
}

/// The ordered element list for a label: `(01)`, then `(17)` when the expiry
/// normalizes, then `(10)` when a non-empty lot is present.
pub fn gs1_elements(input: &Gs1Input<'_>) -> Vec<Gs1Element> {
    let mut elements = vec![Gs1Element::new(ApplicationIdentifier::Gtin, input.gtin14)];
    if let Some(yymmdd) = to_yymmdd(input.expiry) {
        elements.push(Gs1Element::new(ApplicationIdentifier::ExpiryDate, yymmdd));
    }
    if let Some(lot) = input.lot.filter(|l| !l.is_empty()) {
        elements.push(Gs1Element::new(ApplicationIdentifier::BatchLot, lot));
    }
    elements
}

/// Concatenate elements into the encoded and human-readable strings.
///
/// A variable-length element followed by another element is terminated
/// with [`GROUP_SEPARATOR`] in the encoded value; the last element never is.
pub fn encode_elements(elements: &[Gs1Element]) -> Gs1Strings {
    let mut value_for_encoding = String::new();
    let mut human_readable = String::new();
    for (i, el) in elements.iter().enumerate() {
        let code = el.ai.code();
        value_for_encoding.push_str(code);
        value_for_encoding.push_str(&el.data);
        if el.ai.fixed_length().is_none() && i + 1 < elements.len() {
            value_for_encoding.push(GROUP_SEPARATOR);
        }
        human_readable.push('(');
        human_readable.push_str(code);
        human_readable.push(')');
        human_readable.push_str(&el.data);
    }
    Gs1Strings {
        value_for_encoding,
        human_readable,
    }
}

/// Build both GS1 strings for a label.
///
/// # Example
/// ```
/// use dunkit_core::gs1::{Gs1Input, build_gs1_strings};
///
/// let s = build_gs1_strings(&Gs1Input {
///     gtin14: "27898971826272",
///     lot: Some("L2409-A"),
///     expiry: Some("2026-03-31"),
/// });
/// assert_eq!(s.value_for_encoding, "01278989718262721726033110L2409-A");
/// assert_eq!(s.human_readable, "(01)27898971826272(17)260331(10)L2409-A");
/// ```
pub fn build_gs1_strings(input: &Gs1Input<'_>) -> Gs1Strings {
    encode_elements(&gs1_elements(input))
}
