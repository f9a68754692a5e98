//! Diagnostic ID constants.
//!
//! Use these instead of string literals to get compile-time typo detection
//! and IDE autocomplete. `DUN1xxx` are record-field failures, `DUN2xxx`
//! encoding notes, `DUN3xxx` import problems.

use crate::Severity;

/// GTIN-14 is not 14 digits or its check digit does not match.
pub const GTIN14_INVALID: &str = "DUN1001";

/// SKU is shorter than 3 characters after trimming.
pub const SKU_INVALID: &str = "DUN1002";

/// Product name is shorter than 2 characters after trimming.
pub const PRODUCT_INVALID: &str = "DUN1003";

/// Quantity per box is not a positive integer.
pub const QUANTITY_INVALID: &str = "DUN1004";

/// Expiry date has an unknown shape or is not in the future.
pub const EXPIRY_INVALID: &str = "DUN1005";

/// Expiry could not be expressed as `YYYY-MM-DD`, so AI (17) is left out.
pub const EXPIRY_NOT_ENCODABLE: &str = "DUN2001";

/// A CSV row could not be read.
pub const CSV_ROW_UNREADABLE: &str = "DUN3001";

/// No header of the CSV file matches any alias of a required column.
pub const CSV_MISSING_COLUMN: &str = "DUN3002";

/// Every code defined by this module, in numeric order.
pub const ALL: &[&str] = &[
    GTIN14_INVALID,
    SKU_INVALID,
    PRODUCT_INVALID,
    QUANTITY_INVALID,
    EXPIRY_INVALID,
    EXPIRY_NOT_ENCODABLE,
    CSV_ROW_UNREADABLE,
    CSV_MISSING_COLUMN,
];

pub(crate) fn explain(id: &str) -> Option<&'static str> {
    match id {
        GTIN14_INVALID => Some(
            "The GTIN-14 must be exactly 14 decimal digits and its last digit must equal the \
             GS1 Modulus-10 check digit computed over the first 13 (weights 3,1,3,… from the left).",
        ),
        SKU_INVALID => Some("The SKU must have at least 3 characters once surrounding whitespace is removed."),
        PRODUCT_INVALID => {
            Some("The product name must have at least 2 characters once surrounding whitespace is removed.")
        }
        QUANTITY_INVALID => Some("The quantity per box must be a whole number greater than zero."),
        EXPIRY_INVALID => Some(
            "The expiry date must be written as YYYYMMDD, YYYY-MM-DD or DD/MM/YYYY, name a real \
             calendar date, and fall after today.",
        ),
        EXPIRY_NOT_ENCODABLE => Some(
            "GS1 Application Identifier (17) is only emitted for ISO YYYY-MM-DD expiry dates; \
             the barcode for this label omits the expiry segment.",
        ),
        CSV_ROW_UNREADABLE => Some("The CSV reader could not decode this row; it was skipped."),
        CSV_MISSING_COLUMN => Some(
            "None of the known header spellings for a required column were found; every row \
             will fail validation for that field.",
        ),
        _ => None,
    }
}

pub(crate) fn default_severity(id: &str) -> Option<Severity> {
    match id {
        GTIN14_INVALID | SKU_INVALID | PRODUCT_INVALID | QUANTITY_INVALID | EXPIRY_INVALID
        | CSV_ROW_UNREADABLE => Some(Severity::Error),
        EXPIRY_NOT_ENCODABLE | CSV_MISSING_COLUMN => Some(Severity::Warn),
        _ => None,
    }
}
