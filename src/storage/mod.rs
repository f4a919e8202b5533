//! Storage module for persisting crawl progress and extracted data
//!
//! This module handles:
//! - The durable progress record of completed work units
//! - Incremental question snapshots
//! - Atomic file replacement so a failed write never corrupts prior state

mod json;
mod snapshot;
mod traits;

pub use json::{JsonProgressStore, ProgressRecord};
pub use snapshot::{load_snapshot, write_snapshot};
pub use traits::{ProgressStore, StorageError, StorageResult};

use serde::Serialize;
use std::path::Path;

/// Writes a value as pretty JSON via write-to-temp-then-rename.
///
/// The destination either keeps its previous content or receives the full
/// new content; a partial write can only ever affect the temp file.
pub(crate) fn write_json_atomic<T: Serialize + ?Sized>(
    path: &Path,
    value: &T,
) -> StorageResult<()> {
    let json = serde_json::to_string_pretty(value)?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = std::path::PathBuf::from(tmp);

    std::fs::write(&tmp, json.as_bytes())?;
    std::fs::rename(&tmp, path).map_err(|source| StorageError::Replace {
        path: path.display().to_string(),
        source,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write_creates_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");

        write_json_atomic(&path, &vec![1, 2, 3]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let back: Vec<u32> = serde_json::from_str(&content).unwrap();
        assert_eq!(back, vec![1, 2, 3]);
        // No temp file left behind
        assert!(!dir.path().join("out.json.tmp").exists());
    }

    #[test]
    fn test_atomic_write_replaces_previous_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");

        write_json_atomic(&path, &vec![1]).unwrap();
        write_json_atomic(&path, &vec![1, 2]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let back: Vec<u32> = serde_json::from_str(&content).unwrap();
        assert_eq!(back, vec![1, 2]);
    }

    #[test]
    fn test_write_to_missing_directory_fails_cleanly() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("out.json");

        assert!(write_json_atomic(&path, &vec![1]).is_err());
    }
}
