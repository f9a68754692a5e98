//! Shared CSV reader setup.

use csv::{Reader, ReaderBuilder};
use dunkit_diagnostics::Span;

use crate::error::ImportError;

/// A header-aware reader over in-memory CSV text.
///
/// Rows may have fewer or more cells than the header; blank lines are
/// skipped by the reader itself.
pub(crate) fn csv_reader(input: &str) -> Reader<&[u8]> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input.as_bytes())
}

/// Header names with surrounding whitespace and a leading BOM removed.
pub(crate) fn header_names(reader: &mut Reader<&[u8]>) -> Result<Vec<String>, ImportError> {
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();
    if headers.iter().all(String::is_empty) {
        return Err(ImportError::MissingHeader);
    }
    Ok(headers)
}

/// The span of the row starting at byte `start`, up to (not including) its
/// line break.
pub(crate) fn row_span(input: &str, start: usize) -> Span {
    let start = start.min(input.len());
    let end = input[start..]
        .find(['\n', '\r'])
        .map_or(input.len(), |i| start + i);
    Span::new(start, end)
}
