//! Dataset store
//!
//! The dataset lives in memory and is mirrored to a single JSON snapshot
//! file after every mutation. Persistence is write-through and
//! last-write-wins: there is no partial-row atomicity and no conflict
//! detection, which is acceptable for a single-user tool.
//!
//! Persistence operations return `Result` so callers decide whether a
//! failed write is worth surfacing; the HTTP layer logs and continues.

use std::path::PathBuf;

use once_cell::sync::Lazy;
use tracing::warn;

use crate::model::{Dataset, RowField};
use crate::score::normalize_score;
use crate::Result;

/// Bundled default dataset, parsed once on first use.
static DEFAULT_DATASET: Lazy<Dataset> = Lazy::new(|| {
    serde_json::from_str(include_str!("../data/default_dataset.json"))
        .expect("bundled default dataset is valid JSON")
});

/// Value carried by an update request. The `check` field takes a flag,
/// every other field takes text.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(untagged)]
pub enum UpdateValue {
    Flag(bool),
    Text(String),
}

/// JSON-snapshot-backed dataset store.
#[derive(Debug, Clone)]
pub struct DatasetStore {
    snapshot_path: PathBuf,
}

impl DatasetStore {
    /// Create a store persisting to `<root>/dataset.json`.
    pub fn new(root_folder: impl Into<PathBuf>) -> Self {
        Self {
            snapshot_path: root_folder.into().join("dataset.json"),
        }
    }

    /// Path of the snapshot file.
    pub fn snapshot_path(&self) -> &PathBuf {
        &self.snapshot_path
    }

    /// Load the dataset: persisted snapshot first, bundled default as
    /// fallback. A missing or corrupt snapshot is never fatal.
    pub fn load(&self) -> Dataset {
        match std::fs::read_to_string(&self.snapshot_path) {
            Ok(content) => match serde_json::from_str::<Dataset>(&content) {
                Ok(dataset) => dataset,
                Err(e) => {
                    warn!(
                        path = %self.snapshot_path.display(),
                        error = %e,
                        "Snapshot is not a valid dataset, using bundled default"
                    );
                    DEFAULT_DATASET.clone()
                }
            },
            Err(_) => DEFAULT_DATASET.clone(),
        }
    }

    /// Persist the dataset snapshot, creating parent directories as
    /// needed.
    pub fn save(&self, dataset: &Dataset) -> Result<()> {
        if let Some(parent) = self.snapshot_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(dataset)?;
        std::fs::write(&self.snapshot_path, content)?;
        Ok(())
    }

    /// Discard the snapshot and return a fresh copy of the bundled
    /// default. The default is cloned, never handed out by reference, so
    /// it cannot be mutated in place.
    pub fn reset(&self) -> Result<Dataset> {
        match std::fs::remove_file(&self.snapshot_path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        Ok(DEFAULT_DATASET.clone())
    }
}

/// Return a new dataset with exactly one row's one field replaced.
///
/// Unknown `id` is a no-op, not an error. Score writes pass through the
/// normalizer so the stored value is always in {"", "N/A", "1".."9"}.
/// A type mismatch between field and value leaves the row unchanged.
pub fn apply_update(dataset: &Dataset, id: u32, field: RowField, value: &UpdateValue) -> Dataset {
    dataset
        .iter()
        .map(|row| {
            if row.id != id {
                return row.clone();
            }

            let mut updated = row.clone();
            match (field, value) {
                (RowField::InspectionElement, UpdateValue::Text(v)) => {
                    updated.inspection_element = v.clone()
                }
                (RowField::IssueCategory, UpdateValue::Text(v)) => updated.issue_category = v.clone(),
                (RowField::IssueSubCategory, UpdateValue::Text(v)) => {
                    updated.issue_sub_category = v.clone()
                }
                (RowField::Skillset, UpdateValue::Text(v)) => updated.skillset = v.clone(),
                (RowField::Score, UpdateValue::Text(v)) => updated.score = normalize_score(v),
                (RowField::Priority, UpdateValue::Text(v)) => updated.priority = v.clone(),
                (RowField::Analysis, UpdateValue::Text(v)) => updated.analysis = v.clone(),
                (RowField::Recommendations, UpdateValue::Text(v)) => {
                    updated.recommendations = v.clone()
                }
                (RowField::Implementer, UpdateValue::Text(v)) => updated.implementer = v.clone(),
                (RowField::Check, UpdateValue::Flag(v)) => updated.check = *v,
                _ => {
                    warn!(id, ?field, "Update value type does not match field, ignoring");
                }
            }
            updated
        })
        .collect()
}

/// Fresh copy of the bundled default dataset.
pub fn default_dataset() -> Dataset {
    DEFAULT_DATASET.clone()
}
