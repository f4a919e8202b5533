//! Question snapshot persistence
//!
//! The snapshot is the durable form of the in-memory aggregate: a JSON array
//! of question records, rewritten atomically after every completed unit.
//! Write-then-mark ordering means the snapshot on disk always contains the
//! records of every unit the progress store says is completed.

use crate::question::{QuestionBank, QuestionRecord};
use crate::storage::traits::StorageResult;
use crate::storage::write_json_atomic;
use std::path::Path;

/// Writes the full aggregate to `path`, replacing any previous snapshot
pub fn write_snapshot(path: &Path, bank: &QuestionBank) -> StorageResult<()> {
    write_json_atomic(path, bank.records())
}

/// Loads a previously written snapshot.
///
/// Used on resume (so earlier units' records stay in the aggregate) and by
/// the `--stats` / `--export` modes.
pub fn load_snapshot(path: &Path) -> StorageResult<QuestionBank> {
    let content = std::fs::read_to_string(path)?;
    let records: Vec<QuestionRecord> = serde_json::from_str(&content)?;
    Ok(QuestionBank::from_records(records))
}
