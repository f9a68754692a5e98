//! QR entry CSV import (`label,value` columns).

use std::fs;
use std::path::Path;

use tracing::debug;

use dunkit_core::QrEntry;

use crate::error::ImportError;
use crate::reader::{csv_reader, header_names};

/// Import QR entries from CSV text.
///
/// Rows with an empty `value` cell are dropped; an empty `label` cell
/// becomes `None`. Values are kept exactly as written.
pub fn import_qr_entries_from_str(input: &str) -> Result<Vec<QrEntry>, ImportError> {
    let mut reader = csv_reader(input);
    let headers = header_names(&mut reader)?;
    let label_col = headers.iter().position(|h| h == "label");
    let value_col = headers.iter().position(|h| h == "value");

    let mut entries = Vec::new();
    for row in reader.records() {
        let row = row?;
        let Some(value) = value_col.and_then(|i| row.get(i)).filter(|v| !v.is_empty()) else {
            continue;
        };
        let label = label_col.and_then(|i| row.get(i));
        entries.push(QrEntry::new(label, value));
    }
    debug!(entries = entries.len(), "imported QR CSV");
    Ok(entries)
}

/// Read a CSV file and import its QR entries.
pub fn import_qr_entries_from_path(path: impl AsRef<Path>) -> Result<Vec<QrEntry>, ImportError> {
    let path = path.as_ref();
    let input = fs::read_to_string(path).map_err(|source| ImportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    import_qr_entries_from_str(&input)
}
