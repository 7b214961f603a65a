/// SQLite implementation of the habit storage interface
///
/// Values live in a single `kv_store` table. The storage layer never looks
/// inside them; the codec owns their format.

use std::path::PathBuf;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::storage::{migrations, HabitStorage, StorageError};

/// SQLite-based storage implementation
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Open (or create) the database file and bring its schema up to date
    pub fn new(db_path: PathBuf) -> Result<Self, StorageError> {
        let conn = Connection::open(&db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        migrations::initialize_database(&conn)?;

        tracing::info!("SQLite storage initialized at: {:?}", db_path);

        Ok(Self { conn })
    }

    /// Throwaway database, used by tests
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        migrations::initialize_database(&conn)?;

        Ok(Self { conn })
    }
}

impl HabitStorage for SqliteStorage {
    fn get_value(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        Ok(value)
    }

    fn put_value(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![key, value, Utc::now().to_rfc3339()],
        )?;

        tracing::debug!("Stored {} bytes under '{}'", value.len(), key);
        Ok(())
    }

    fn remove_value(&self, key: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;

        tracing::debug!("Removed '{}'", key);
        Ok(())
    }
}
