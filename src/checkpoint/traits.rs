//! Checkpoint store trait and error types

use std::collections::BTreeSet;
use thiserror::Error;

/// Errors that can occur during checkpoint operations
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for checkpoint operations
pub type CheckpointResult<T> = Result<T, CheckpointError>;

/// Trait for checkpoint persistence backends
///
/// Implementations own the medium (flat file, embedded database) and must
/// guarantee that `merge_and_persist` is atomic: after a crash the checkpoint
/// holds either the pre-merge or the post-merge set, never a torn write.
/// Membership is at-most-once; merging an already-present ID is a no-op.
/// Single-writer discipline is assumed.
pub trait CheckpointStore {
    /// Loads the set of confirmed-valid IDs
    ///
    /// A missing checkpoint is an empty set, not an error.
    fn load(&self) -> CheckpointResult<BTreeSet<u32>>;

    /// Merges the given IDs into the checkpoint and persists it
    ///
    /// A failure here must surface to the caller: continuing a scan as if
    /// progress were saved would cause silent duplicate work on resume.
    fn merge_and_persist(&mut self, ids: &BTreeSet<u32>) -> CheckpointResult<()>;
}
