//! SQLite adapter: Implementation of HistoryStore.
//!
//! Provides local persistence for the rolling analysis history.
//!
//! Input and result are stored as JSON documents so a loaded entry is
//! identical to the one saved.
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::SecondsFormat;
use rusqlite::{params, types::Type, Connection, Row};

use crate::domain::{HistoryEntry, HISTORY_LIMIT};
use crate::ports::HistoryStore;

/// Error type for storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage lock poisoned")]
    LockPoisoned,
}

/// SQLite history store.
pub struct SqliteHistoryStore {
    conn: Mutex<Connection>,
}

impl SqliteHistoryStore {
    /// Create a new SQLite store with the given database path.
    ///
    /// # Errors
    /// Returns error if database cannot be opened or initialized.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory SQLite database (for testing).
    ///
    /// # Errors
    /// Returns error if database cannot be created.
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn.lock().map_err(|_| StorageError::LockPoisoned)
    }

    /// Initialize the database schema.
    fn init_schema(&self) -> Result<(), StorageError> {
        let conn = self.conn()?;

        conn.execute_batch(
            r"
            CREATE TABLE IF NOT EXISTS history (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                created_at TEXT NOT NULL,
                input_json TEXT NOT NULL,
                result_json TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_history_created
                ON history(created_at DESC);
            ",
        )?;

        Ok(())
    }

    /// Decode a row of (id, created_at, input_json, result_json).
    fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<HistoryEntry> {
        let id: String = row.get(0)?;
        let created_at_str: String = row.get(1)?;
        let input_json: String = row.get(2)?;
        let result_json: String = row.get(3)?;

        let created_at = chrono::DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&chrono::Utc))
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e)))?;
        let input = serde_json::from_str(&input_json)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;
        let result = serde_json::from_str(&result_json)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;

        Ok(HistoryEntry {
            id,
            created_at,
            input,
            result,
        })
    }
}

impl HistoryStore for SqliteHistoryStore {
    type Error = StorageError;

    fn save_entry(&self, entry: &HistoryEntry) -> Result<(), Self::Error> {
        let input_json = serde_json::to_string(&entry.input)?;
        let result_json = serde_json::to_string(&entry.result)?;

        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        tx.execute(
            r"
            INSERT INTO history (id, created_at, input_json, result_json)
            VALUES (?1, ?2, ?3, ?4)
            ",
            params![
                entry.id,
                entry.created_at.to_rfc3339_opts(SecondsFormat::Nanos, true),
                input_json,
                result_json,
            ],
        )?;

        let evicted = tx.execute(
            r"
            DELETE FROM history WHERE seq NOT IN (
                SELECT seq FROM history
                ORDER BY created_at DESC, seq DESC
                LIMIT ?1
            )
            ",
            params![HISTORY_LIMIT as i64],
        )?;

        tx.commit()?;

        tracing::debug!("Saved history entry {} (evicted {})", entry.id, evicted);
        Ok(())
    }

    fn load_recent(&self, limit: usize) -> Result<Vec<HistoryEntry>, Self::Error> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(
            r"
            SELECT id, created_at, input_json, result_json
            FROM history
            ORDER BY created_at DESC, seq DESC
            LIMIT ?1
            ",
        )?;

        let entries = stmt
            .query_map(params![limit as i64], Self::entry_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    fn load_entry(&self, id: &str) -> Result<Option<HistoryEntry>, Self::Error> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(
            "SELECT id, created_at, input_json, result_json FROM history WHERE id = ?1",
        )?;

        match stmt.query_row(params![id], Self::entry_from_row) {
            Ok(entry) => Ok(Some(entry)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn count_entries(&self) -> Result<usize, Self::Error> {
        let conn = self.conn()?;

        let count: i64 = conn.query_row("SELECT COUNT(*) FROM history", [], |row| row.get(0))?;

        Ok(count as usize)
    }

    fn delete_entry(&self, id: &str) -> Result<(), Self::Error> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM history WHERE id = ?1", params![id])?;
        Ok(())
    }

    fn clear_all(&self) -> Result<(), Self::Error> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM history", [])?;
        tracing::warn!("Cleared analysis history");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{analyze, samples, CbcInput};

    fn entry(sample: &str) -> HistoryEntry {
        let input: CbcInput = samples::find(sample).expect("Sample exists").data;
        HistoryEntry::new(input, analyze(&input))
    }

    #[test]
    fn test_entry_roundtrip() {
        let store = SqliteHistoryStore::in_memory().expect("Should create db");
        let saved = entry("thalassemia");

        store.save_entry(&saved).expect("Should save");
        let loaded = store
            .load_entry(&saved.id)
            .expect("Should load")
            .expect("Should exist");

        assert_eq!(loaded, saved);
        assert_eq!(
            serde_json::to_string(&loaded.result).expect("Should serialize"),
            serde_json::to_string(&saved.result).expect("Should serialize"),
        );
    }

    #[test]
    fn test_missing_entry() {
        let store = SqliteHistoryStore::in_memory().expect("Should create db");
        assert!(store.load_entry("nope").expect("Should query").is_none());
    }

    #[test]
    fn test_history_is_bounded_newest_first() {
        let store = SqliteHistoryStore::in_memory().expect("Should create db");
        let base = chrono::Utc::now();

        let mut ids = Vec::new();
        for i in 0..13 {
            let mut e = entry("normal");
            e.created_at = base + chrono::Duration::seconds(i);
            ids.push(e.id.clone());
            store.save_entry(&e).expect("Should save");
        }

        assert_eq!(store.count_entries().expect("Should count"), HISTORY_LIMIT);

        let recent = store.load_recent(HISTORY_LIMIT).expect("Should load");
        assert_eq!(recent.len(), HISTORY_LIMIT);
        assert_eq!(recent[0].id, ids[12]);
        assert_eq!(recent[9].id, ids[3]);
        assert!(store.load_entry(&ids[0]).expect("Should query").is_none());
    }

    #[test]
    fn test_delete_and_clear() {
        let store = SqliteHistoryStore::in_memory().expect("Should create db");
        let a = entry("b12-def");
        let b = entry("chronic");
        store.save_entry(&a).expect("Should save");
        store.save_entry(&b).expect("Should save");

        store.delete_entry(&a.id).expect("Should delete");
        assert_eq!(store.count_entries().expect("Should count"), 1);

        store.clear_all().expect("Should clear");
        assert_eq!(store.count_entries().expect("Should count"), 0);
    }

    #[test]
    fn test_schema_stores_documents_only() {
        let store = SqliteHistoryStore::in_memory().expect("Should create db");
        let conn = store.conn().expect("Should lock");

        let mut stmt = conn
            .prepare("SELECT name FROM pragma_table_info('history') ORDER BY cid")
            .expect("Should prepare");
        let columns: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .expect("Should query")
            .collect::<Result<_, _>>()
            .expect("Should read");

        assert_eq!(columns, ["seq", "id", "created_at", "input_json", "result_json"]);
    }
}
