//! Typed error types for CSV import and export.

use std::io;
use std::path::PathBuf;

use crate::aliases::AliasError;

/// Import/export failures that abort the whole file.
///
/// Problems confined to a single row are reported as diagnostics on the
/// import result instead.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// Reading the input file failed.
    #[error("failed to read {path}: {source}")]
    Read {
        /// The file that was attempted.
        path: PathBuf,
        /// The underlying OS error.
        #[source]
        source: io::Error,
    },

    /// The input has no header row.
    #[error("CSV input has no header row")]
    MissingHeader,

    /// The CSV reader or writer failed outside of a single data row.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The alias table is invalid.
    #[error(transparent)]
    Aliases(#[from] AliasError),

    /// Exported CSV was not valid UTF-8.
    #[error("exported CSV is not UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}
