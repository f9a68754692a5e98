//! Typed error types for the label-set store.

use std::io;
use std::path::PathBuf;

/// Store failures.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Creating the store directory failed.
    #[error("failed to create store directory {path}: {source}")]
    CreateDir {
        /// The directory that was attempted.
        path: PathBuf,
        /// The underlying OS error.
        #[source]
        source: io::Error,
    },

    /// Writing or replacing a collection file failed.
    #[error("failed to write {path}: {source}")]
    Write {
        /// The file that was attempted.
        path: PathBuf,
        /// The underlying OS error.
        #[source]
        source: io::Error,
    },

    /// Serializing a collection failed.
    #[error("failed to serialize {what}: {source}")]
    Serialize {
        /// What was being serialized.
        what: &'static str,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },

    /// A set name was empty.
    #[error("set name must not be empty")]
    EmptyName,
}
