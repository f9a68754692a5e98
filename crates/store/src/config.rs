//! Store location and file layout.

use std::path::{Path, PathBuf};

/// Environment variable naming the store directory.
pub const STORE_DIR_ENV: &str = "DUNKIT_STORE_DIR";

/// Directory used when neither a flag nor the environment names one.
pub const DEFAULT_STORE_DIR: &str = ".dunkit";

/// Where and how label sets are persisted.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding the collection files.
    pub dir: PathBuf,
    /// File name of the label-set collection.
    pub label_sets_file: String,
    /// File name of the QR-set collection.
    pub qr_sets_file: String,
    /// Write indented JSON.
    pub pretty: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_STORE_DIR),
            label_sets_file: "dun-saved-labels.json".into(),
            qr_sets_file: "qr-saved-sets.json".into(),
            pretty: true,
        }
    }
}

impl StoreConfig {
    /// A default layout rooted at `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Self::default()
        }
    }

    /// Resolve the store directory from (in priority order):
    ///   1. an explicit path (e.g. `--store`)
    ///   2. the [`STORE_DIR_ENV`] environment variable, when non-empty
    ///   3. [`DEFAULT_STORE_DIR`] in the working directory
    pub fn resolve(explicit: Option<&Path>) -> Self {
        Self::resolve_with(explicit, std::env::var_os(STORE_DIR_ENV).map(PathBuf::from))
    }

    fn resolve_with(explicit: Option<&Path>, env_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = explicit {
            return Self::in_dir(dir);
        }
        match env_dir {
            Some(dir) if !dir.as_os_str().is_empty() => Self::in_dir(dir),
            _ => Self::default(),
        }
    }

    /// Full path of the label-set collection file.
    pub fn label_sets_path(&self) -> PathBuf {
        self.dir.join(&self.label_sets_file)
    }

    /// Full path of the QR-set collection file.
    pub fn qr_sets_path(&self) -> PathBuf {
        self.dir.join(&self.qr_sets_file)
    }
}
