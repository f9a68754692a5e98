//! CSV import and export for dunkit.
//!
//! Maps spreadsheet columns onto [`LabelRecord`](dunkit_core::LabelRecord)
//! fields through an ordered [`AliasTable`], then partitions the rows with
//! the core validator. Row-level problems come back as diagnostics with the
//! byte span of the offending row; only file-level failures are errors.

mod aliases;
mod error;
mod export;
mod labels;
mod qr;
mod reader;

pub use aliases::{AliasError, AliasTable, Field, load_aliases_from_str};
pub use error::ImportError;
pub use export::{export_labels_csv, label_csv_template, label_csv_template_on, qr_csv_template};
pub use labels::{
    LabelImport, import_labels_from_path, import_labels_from_str, import_labels_on, parse_quantity,
};
pub use qr::{import_qr_entries_from_path, import_qr_entries_from_str};
