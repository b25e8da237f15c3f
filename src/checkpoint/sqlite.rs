//! SQLite checkpoint backend
//!
//! Stores valid IDs in a single `valid_ids` table, one row per ID, with the
//! discovery timestamp. Merges run inside a transaction with
//! `INSERT OR IGNORE`, so replays and overlapping merges are harmless.

use crate::checkpoint::traits::{CheckpointResult, CheckpointStore};
use chrono::Utc;
use rusqlite::{params, Connection};
use std::collections::BTreeSet;
use std::path::Path;

/// SQLite-based checkpoint store
pub struct SqliteCheckpoint {
    conn: Connection,
}

impl SqliteCheckpoint {
    /// Opens (or creates) a checkpoint database at the given path
    pub fn new(path: &Path) -> CheckpointResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
        ",
        )?;
        Self::initialize(conn)
    }

    /// Creates an in-memory checkpoint (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> CheckpointResult<Self> {
        Self::initialize(Connection::open_in_memory()?)
    }

    fn initialize(conn: Connection) -> CheckpointResult<Self> {
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS valid_ids (
                id INTEGER PRIMARY KEY,
                discovered_at TEXT NOT NULL
            );
        ",
        )?;
        Ok(Self { conn })
    }
}

impl CheckpointStore for SqliteCheckpoint {
    fn load(&self) -> CheckpointResult<BTreeSet<u32>> {
        let mut stmt = self.conn.prepare("SELECT id FROM valid_ids")?;
        let rows = stmt.query_map([], |row| row.get::<_, u32>(0))?;

        let mut ids = BTreeSet::new();
        for id in rows {
            ids.insert(id?);
        }
        Ok(ids)
    }

    fn merge_and_persist(&mut self, ids: &BTreeSet<u32>) -> CheckpointResult<()> {
        let now = Utc::now().to_rfc3339();
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx
                .prepare("INSERT OR IGNORE INTO valid_ids (id, discovered_at) VALUES (?1, ?2)")?;
            for id in ids {
                stmt.execute(params![id, now])?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}
