//! JSON-file progress store
//!
//! Progress lives in a single small JSON object:
//! `{ "completed": ["0_0", "0_1", ...], "total_questions": 123 }`.
//! A missing or unparsable file loads as the empty record so a first run and
//! a recovery run look the same to the caller.

use crate::crawler::WorkUnit;
use crate::storage::traits::{ProgressStore, StorageResult};
use crate::storage::write_json_atomic;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// On-disk shape of the progress record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressRecord {
    #[serde(default)]
    pub completed: Vec<String>,

    #[serde(default)]
    pub total_questions: usize,
}

/// File-backed [`ProgressStore`] with atomic writes
pub struct JsonProgressStore {
    path: PathBuf,
    record: ProgressRecord,
    completed: HashSet<String>,
}

impl JsonProgressStore {
    /// Loads the store from `path`; absence or parse failure yields an empty
    /// record, not an error.
    pub fn load(path: &Path) -> Self {
        let record = match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<ProgressRecord>(&content) {
                Ok(record) => {
                    tracing::info!(
                        "Loaded progress: {} completed units, {} questions",
                        record.completed.len(),
                        record.total_questions
                    );
                    record
                }
                Err(e) => {
                    tracing::warn!(
                        "Progress file {} unreadable ({}), starting empty",
                        path.display(),
                        e
                    );
                    ProgressRecord::default()
                }
            },
            Err(_) => {
                tracing::info!("No progress file at {}, starting empty", path.display());
                ProgressRecord::default()
            }
        };

        Self::from_record(path, record)
    }

    /// Creates an empty store at `path`, discarding any previous record
    pub fn fresh(path: &Path) -> Self {
        if path.exists() {
            tracing::info!("Discarding previous progress at {}", path.display());
            if let Err(e) = std::fs::remove_file(path) {
                tracing::warn!("Could not remove old progress file: {}", e);
            }
        }
        Self::from_record(path, ProgressRecord::default())
    }

    fn from_record(path: &Path, record: ProgressRecord) -> Self {
        let completed = record.completed.iter().cloned().collect();
        Self {
            path: path.to_path_buf(),
            record,
            completed,
        }
    }

    /// The record as currently held in memory
    pub fn record(&self) -> &ProgressRecord {
        &self.record
    }

    fn persist(&self) -> StorageResult<()> {
        write_json_atomic(&self.path, &self.record)
    }
}

impl ProgressStore for JsonProgressStore {
    fn is_completed(&self, unit: WorkUnit) -> bool {
        self.completed.contains(&unit.key())
    }

    fn mark_completed(&mut self, unit: WorkUnit, running_count: usize) -> StorageResult<()> {
        let key = unit.key();
        if self.completed.contains(&key) {
            return Ok(());
        }

        self.record.completed.push(key.clone());
        self.record.total_questions = running_count;
        self.completed.insert(key.clone());

        if let Err(e) = self.persist() {
            // Keep memory consistent with disk so the unit is retried
            self.record.completed.pop();
            self.completed.remove(&key);
            return Err(e);
        }

        Ok(())
    }

    fn completed_count(&self) -> usize {
        self.completed.len()
    }

    fn total_questions(&self) -> usize {
        self.record.total_questions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = JsonProgressStore::load(&dir.path().join("progress.json"));
        assert_eq!(store.completed_count(), 0);
        assert_eq!(store.total_questions(), 0);
    }

    #[test]
    fn test_load_unparsable_file_is_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("progress.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = JsonProgressStore::load(&path);
        assert_eq!(store.completed_count(), 0);
    }

    #[test]
    fn test_mark_persists_and_reloads() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("progress.json");

        let mut store = JsonProgressStore::load(&path);
        store.mark_completed(WorkUnit::new(0, 1), 25).unwrap();
        store.mark_completed(WorkUnit::new(2, 0), 40).unwrap();

        let reloaded = JsonProgressStore::load(&path);
        assert!(reloaded.is_completed(WorkUnit::new(0, 1)));
        assert!(reloaded.is_completed(WorkUnit::new(2, 0)));
        assert!(!reloaded.is_completed(WorkUnit::new(1, 0)));
        assert_eq!(reloaded.total_questions(), 40);
    }

    #[test]
    fn test_mark_is_idempotent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("progress.json");

        let mut store = JsonProgressStore::load(&path);
        store.mark_completed(WorkUnit::new(1, 1), 10).unwrap();
        store.mark_completed(WorkUnit::new(1, 1), 99).unwrap();

        assert_eq!(store.completed_count(), 1);
        // Repeat mark did not move the running total
        assert_eq!(store.total_questions(), 10);
    }

    #[test]
    fn test_fresh_ignores_existing_record() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("progress.json");

        let mut store = JsonProgressStore::load(&path);
        store.mark_completed(WorkUnit::new(0, 0), 5).unwrap();

        let fresh = JsonProgressStore::fresh(&path);
        assert!(!fresh.is_completed(WorkUnit::new(0, 0)));
        assert_eq!(fresh.completed_count(), 0);
    }

    #[test]
    fn test_failed_persist_rolls_back_memory() {
        let dir = tempdir().unwrap();
        // Point at a path whose parent doesn't exist so the write fails
        let path = dir.path().join("missing").join("progress.json");

        let mut store = JsonProgressStore::load(&path);
        let result = store.mark_completed(WorkUnit::new(0, 0), 5);

        assert!(result.is_err());
        assert!(!store.is_completed(WorkUnit::new(0, 0)));
        assert_eq!(store.completed_count(), 0);
    }
}
