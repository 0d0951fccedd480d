//! SQLite backend: a key/value table holding the state blob.

use std::{fs, path::Path};

use rusqlite::{Connection, OptionalExtension};

use crate::model::AppState;

use super::{Persist, Result, STORAGE_KEY, decode, encode};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS kv (
    key   TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL
)";

/// Stores the state blob in `kv` under [`STORAGE_KEY`].
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Opens (or creates) the database at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Opens `<root>/state.sqlite`, creating `root` if it doesn't exist.
    pub fn in_root(root: &Path) -> Result<Self> {
        fs::create_dir_all(root)?;
        Self::open(root.join("state.sqlite"))
    }
}

impl Persist for SqliteStorage {
    fn load(&self) -> Result<Option<AppState>> {
        let blob = self
            .conn
            .query_row(
                "SELECT value FROM kv WHERE key = ?1",
                [STORAGE_KEY],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        blob.as_deref().map(decode).transpose()
    }

    fn save(&self, state: &AppState) -> Result<()> {
        let json = encode(state)?;
        // A single upsert is atomic; the old row survives a failed write.
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            rusqlite::params![STORAGE_KEY, json],
        )?;
        Ok(())
    }
}
