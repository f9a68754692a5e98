//! dunkit core library.
//!
//! Validation and GS1 encoding for DUN-14 shipping labels. The main entry
//! points are [`validate_gtin14`] for identifiers, [`build_gs1_strings`] for
//! barcode data, and [`validate_label_list`] for partitioning an imported
//! batch. Everything here is pure: no I/O, no shared state.

#![warn(missing_docs)]

/// Expiry date shapes and the future-date rule.
pub mod expiry;
/// GS1 Application Identifiers and element strings.
pub mod gs1;
/// GTIN-14 check digit.
pub mod gtin;
/// Label and QR records.
pub mod record;
/// Reference sample label.
pub mod sample;
/// Record validators and batch partitioning.
pub mod validate;

// ── Convenience re-exports ──────────────────────────────────────────────────

pub use expiry::{
    ExpiryFormat, normalize_expiry, parse_expiry, validate_expiry_date, validate_expiry_date_on,
};
pub use gs1::{Gs1Input, Gs1Strings, build_gs1_strings, to_yymmdd};
pub use gtin::{gtin14_check_digit, normalize_gtin14, validate_gtin14};
pub use record::{LabelRecord, QrEntry};
pub use validate::{
    InvalidLabel, LabelCheck, LabelPartition, ValidationResult, validate_label,
    validate_label_list, validate_label_list_on, validate_label_on,
};

// Diagnostics (re-exported from the diagnostics crate)
pub use dunkit_diagnostics::{Diagnostic, Severity, Span, codes};
