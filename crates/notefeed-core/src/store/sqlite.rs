//! `SQLite`-backed preference store.

use std::path::Path;
use std::sync::Arc;

use rusqlite::{params, Connection, OptionalExtension};
use tokio::sync::Mutex;

use super::{LocalStore, StoreKey, StoreResult};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS preferences (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL
);
";

/// Single-table key/value store in a local `SQLite` file
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) the store at the given path
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        tracing::debug!("Opening preference store at {}", path.display());
        Self::from_connection(Connection::open(path)?)
    }

    /// Open an in-memory store (useful for testing)
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

impl LocalStore for SqliteStore {
    async fn get(&self, key: StoreKey) -> StoreResult<Option<String>> {
        let conn = self.conn.lock().await;
        let value = conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                params![key.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    async fn put(&self, key: StoreKey, value: &str) -> StoreResult<()> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT OR REPLACE INTO preferences (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![key.as_str(), value, crate::util::now_millis()],
        )?;
        Ok(())
    }

    async fn delete(&self, key: StoreKey) -> StoreResult<()> {
        let conn = self.conn.lock().await;
        conn.execute(
            "DELETE FROM preferences WHERE key = ?1",
            params![key.as_str()],
        )?;
        Ok(())
    }

    async fn clear(&self) -> StoreResult<()> {
        let conn = self.conn.lock().await;
        conn.execute("DELETE FROM preferences", [])?;
        Ok(())
    }
}
