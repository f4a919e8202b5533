//! Progress persistence traits and error types

use crate::crawler::WorkUnit;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to replace {path}: {source}")]
    Replace {
        path: String,
        source: std::io::Error,
    },
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Durable record of which work units have completed
///
/// The contract that makes resume idempotent: a unit is only ever marked
/// completed after its extracted records were durably written to the
/// question snapshot (write-then-mark). Implementations must persist marks
/// atomically so a partial write cannot corrupt previously recorded
/// completions.
pub trait ProgressStore {
    /// Returns true if this unit completed in a previous (or this) run
    fn is_completed(&self, unit: WorkUnit) -> bool;

    /// Appends the unit to the completed set and persists.
    ///
    /// Re-marking an already-completed unit is a no-op.
    ///
    /// # Arguments
    ///
    /// * `unit` - The completed work unit
    /// * `running_count` - Total questions extracted so far across the run
    fn mark_completed(&mut self, unit: WorkUnit, running_count: usize) -> StorageResult<()>;

    /// Number of completed units on record
    fn completed_count(&self) -> usize;

    /// Running question total as of the last mark
    fn total_questions(&self) -> usize;
}
