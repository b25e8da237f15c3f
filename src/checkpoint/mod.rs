//! Checkpoint store for the ID-space scanner
//!
//! The checkpoint is the durable, grow-only set of candidate IDs already
//! confirmed valid. The scanner loads it at start and merges newly valid IDs
//! after every batch, so interrupted runs never re-probe resolved IDs.
//! Invalid outcomes are deliberately never persisted; an ID that is not in
//! the checkpoint is re-probed on the next run.

mod json_file;
mod sqlite;
mod traits;

pub use json_file::JsonFileCheckpoint;
pub use sqlite::SqliteCheckpoint;
pub use traits::{CheckpointError, CheckpointResult, CheckpointStore};
