//! File-backed persistence for named label sets and QR sets.
//!
//! Each collection is a single JSON array in the store directory. Reads are
//! forgiving: a missing or corrupt file is an empty collection. Writes go to
//! a temporary file first and are renamed over the collection.

mod config;
mod error;
mod model;

use std::fs;
use std::io;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use dunkit_core::{LabelRecord, QrEntry};

pub use config::{DEFAULT_STORE_DIR, STORE_DIR_ENV, StoreConfig};
pub use error::StoreError;
pub use model::{Orientation, PaperSize, QrSettings, SavedLabelSet, SavedQrSet};

/// Named label sets and QR sets persisted under one directory.
#[derive(Debug, Clone)]
pub struct LabelStore {
    config: StoreConfig,
}

impl LabelStore {
    /// Open a store. Nothing touches the disk until the first write.
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Layout this store reads and writes.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // ── Label sets ──────────────────────────────────────────────────────

    /// All saved label sets, oldest first.
    pub fn label_sets(&self) -> Vec<SavedLabelSet> {
        read_collection(&self.config.label_sets_path())
    }

    /// Look up a label set by id.
    pub fn load_label_set(&self, id: &str) -> Option<SavedLabelSet> {
        self.label_sets().into_iter().find(|s| s.id == id)
    }

    /// Save `labels` under `name` and return the stored set.
    pub fn save_label_set(
        &self,
        name: &str,
        labels: Vec<LabelRecord>,
        orientation: Orientation,
    ) -> Result<SavedLabelSet, StoreError> {
        self.save_label_set_at(name, labels, orientation, Utc::now())
    }

    /// [`save_label_set`](Self::save_label_set) with an explicit save time.
    pub fn save_label_set_at(
        &self,
        name: &str,
        labels: Vec<LabelRecord>,
        orientation: Orientation,
        now: DateTime<Utc>,
    ) -> Result<SavedLabelSet, StoreError> {
        let name = checked_name(name)?;
        let mut sets = self.label_sets();
        let set = SavedLabelSet {
            id: unique_id(now, sets.iter().map(|s| s.id.as_str())),
            name,
            labels,
            created_at: now,
            orientation,
        };
        sets.push(set.clone());
        self.write(&self.config.label_sets_path(), &sets, "label sets")?;
        info!(id = %set.id, name = %set.name, labels = set.labels.len(), "label set saved");
        Ok(set)
    }

    /// Delete a label set. Returns `false` when no set has that id.
    pub fn delete_label_set(&self, id: &str) -> Result<bool, StoreError> {
        let mut sets = self.label_sets();
        let before = sets.len();
        sets.retain(|s| s.id != id);
        if sets.len() == before {
            return Ok(false);
        }
        self.write(&self.config.label_sets_path(), &sets, "label sets")?;
        info!(id, "label set deleted");
        Ok(true)
    }

    // ── QR sets ─────────────────────────────────────────────────────────

    /// All saved QR sets, oldest first.
    pub fn qr_sets(&self) -> Vec<SavedQrSet> {
        read_collection(&self.config.qr_sets_path())
    }

    /// Look up a QR set by id.
    pub fn load_qr_set(&self, id: &str) -> Option<SavedQrSet> {
        self.qr_sets().into_iter().find(|s| s.id == id)
    }

    /// Save `entries` under `name` and return the stored set.
    pub fn save_qr_set(
        &self,
        name: &str,
        entries: Vec<QrEntry>,
        orientation: Orientation,
        settings: QrSettings,
    ) -> Result<SavedQrSet, StoreError> {
        self.save_qr_set_at(name, entries, orientation, settings, Utc::now())
    }

    /// [`save_qr_set`](Self::save_qr_set) with an explicit save time.
    pub fn save_qr_set_at(
        &self,
        name: &str,
        entries: Vec<QrEntry>,
        orientation: Orientation,
        settings: QrSettings,
        now: DateTime<Utc>,
    ) -> Result<SavedQrSet, StoreError> {
        let name = checked_name(name)?;
        let mut sets = self.qr_sets();
        let set = SavedQrSet {
            id: unique_id(now, sets.iter().map(|s| s.id.as_str())),
            name,
            qr_list: entries,
            created_at: now,
            orientation,
            settings,
        };
        sets.push(set.clone());
        self.write(&self.config.qr_sets_path(), &sets, "QR sets")?;
        info!(id = %set.id, name = %set.name, entries = set.qr_list.len(), "QR set saved");
        Ok(set)
    }

    /// Delete a QR set. Returns `false` when no set has that id.
    pub fn delete_qr_set(&self, id: &str) -> Result<bool, StoreError> {
        let mut sets = self.qr_sets();
        let before = sets.len();
        sets.retain(|s| s.id != id);
        if sets.len() == before {
            return Ok(false);
        }
        self.write(&self.config.qr_sets_path(), &sets, "QR sets")?;
        info!(id, "QR set deleted");
        Ok(true)
    }

    fn write<T: Serialize>(
        &self,
        path: &Path,
        items: &[T],
        what: &'static str,
    ) -> Result<(), StoreError> {
        let json = if self.config.pretty {
            serde_json::to_string_pretty(items)
        } else {
            serde_json::to_string(items)
        }
        .map_err(|source| StoreError::Serialize { what, source })?;
        write_atomic(&self.config.dir, path, json.as_bytes())
    }
}

// ── Export ──────────────────────────────────────────────────────────────

/// A label set as indented JSON, for download or backup.
pub fn export_label_set_json(set: &SavedLabelSet) -> Result<String, StoreError> {
    serde_json::to_string_pretty(set).map_err(|source| StoreError::Serialize {
        what: "label set",
        source,
    })
}

/// Suggested file name for an exported label set.
pub fn export_file_name(set: &SavedLabelSet) -> String {
    format!("etiquetas-{}-{}.json", set.name, set.id)
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn checked_name(name: &str) -> Result<String, StoreError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(StoreError::EmptyName);
    }
    Ok(name.to_owned())
}

/// Millisecond timestamp of `now`, bumped past any id already taken.
fn unique_id<'a>(now: DateTime<Utc>, taken: impl Iterator<Item = &'a str>) -> String {
    let taken: Vec<&str> = taken.collect();
    let mut millis = now.timestamp_millis();
    loop {
        let id = millis.to_string();
        if !taken.contains(&id.as_str()) {
            return id;
        }
        millis += 1;
    }
}

fn read_collection<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no collection file yet");
            return Vec::new();
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "unreadable collection, treating as empty");
            return Vec::new();
        }
    };
    match serde_json::from_str(&text) {
        Ok(items) => items,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "corrupt collection, treating as empty");
            Vec::new()
        }
    }
}

fn write_atomic(dir: &Path, path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    fs::create_dir_all(dir).map_err(|source| StoreError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    let tmp = path.with_extension("json.tmp");
    let write_err = |source: io::Error| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };
    fs::write(&tmp, bytes).map_err(write_err)?;
    fs::rename(&tmp, path).map_err(write_err)?;
    debug!(path = %path.display(), bytes = bytes.len(), "collection written");
    Ok(())
}
