//! Flat-file checkpoint backend
//!
//! Stores the valid-ID set as a pretty-printed, sorted JSON array. Writes go
//! to a sibling temp file followed by an atomic rename, so a crash mid-write
//! leaves the previous checkpoint intact.

use crate::checkpoint::traits::{CheckpointResult, CheckpointStore};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// File-based checkpoint store
#[derive(Debug)]
pub struct JsonFileCheckpoint {
    path: PathBuf,
}

impl JsonFileCheckpoint {
    /// Creates a store backed by the given file path
    ///
    /// The file does not need to exist yet; it is created on first persist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl CheckpointStore for JsonFileCheckpoint {
    fn load(&self) -> CheckpointResult<BTreeSet<u32>> {
        if !self.path.exists() {
            return Ok(BTreeSet::new());
        }

        let json = fs::read_to_string(&self.path)?;
        let ids: Vec<u32> = serde_json::from_str(&json)?;
        Ok(ids.into_iter().collect())
    }

    fn merge_and_persist(&mut self, ids: &BTreeSet<u32>) -> CheckpointResult<()> {
        let mut merged = self.load()?;
        merged.extend(ids.iter().copied());

        let sorted: Vec<u32> = merged.into_iter().collect();
        let json = serde_json::to_string_pretty(&sorted)?;

        let temp = self.temp_path();
        fs::write(&temp, json)?;
        fs::rename(&temp, &self.path)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> JsonFileCheckpoint {
        JsonFileCheckpoint::new(dir.path().join("checkpoint.json"))
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_persist_and_reload() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        let ids: BTreeSet<u32> = [3, 1, 2].into_iter().collect();
        store.merge_and_persist(&ids).unwrap();

        assert_eq!(store.load().unwrap(), ids);
    }

    #[test]
    fn test_merge_is_a_union_without_duplicates() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        store
            .merge_and_persist(&[1, 2, 3].into_iter().collect())
            .unwrap();
        store
            .merge_and_persist(&[3, 4].into_iter().collect())
            .unwrap();

        let expected: BTreeSet<u32> = [1, 2, 3, 4].into_iter().collect();
        assert_eq!(store.load().unwrap(), expected);
    }

    #[test]
    fn test_file_is_sorted_json_array() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        store
            .merge_and_persist(&[20, 5, 11].into_iter().collect())
            .unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        let parsed: Vec<u32> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, vec![5, 11, 20]);
    }

    #[test]
    fn test_empty_merge_still_writes_a_checkpoint() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);

        store.merge_and_persist(&BTreeSet::new()).unwrap();
        assert!(store.path().exists());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_persist_to_unwritable_path_fails() {
        let mut store = JsonFileCheckpoint::new("/nonexistent-dir/checkpoint.json");
        let result = store.merge_and_persist(&[1].into_iter().collect());
        assert!(result.is_err());
    }
}
