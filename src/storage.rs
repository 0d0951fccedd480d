//! Durable storage for the app state.
//!
//! The whole [`AppState`] is stored as one JSON blob under [`STORAGE_KEY`].
//! Two backends implement [`Persist`]:
//!
//! ```text
//! <root>/@brain_tumor_app_state.json   # FileStorage: replaced atomically on save
//! <root>/state.sqlite                  # SqliteStorage: `kv` table, one row per key
//! ```

mod file;
mod sqlite;

use std::{io, path::Path, path::PathBuf};

use tracing::debug;

use crate::config::Backend;
use crate::model::AppState;

pub use file::FileStorage;
pub use sqlite::SqliteStorage;

/// The fixed key the state blob is stored under.
pub const STORAGE_KEY: &str = "@brain_tumor_app_state";

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("stored state is corrupt: {0}")]
    Corrupt(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type Result<T> = core::result::Result<T, StorageError>;

/// Saves and restores the full app state.
///
/// `Send` so the store can hand the backend to its writer thread.
pub trait Persist: Send {
    /// Returns `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<AppState>>;

    /// Replaces the stored state. A failed save leaves the previous snapshot intact.
    fn save(&self, state: &AppState) -> Result<()>;
}

/// Opens the configured backend rooted at `root`, creating the directory if needed.
pub fn open(backend: Backend, root: &Path) -> Result<Box<dyn Persist>> {
    Ok(match backend {
        Backend::Json => {
            let file = FileStorage::new(root)?;
            debug!(path = %file.path().display(), "opened state file");
            Box::new(file)
        }
        Backend::Sqlite => {
            let db = SqliteStorage::in_root(root)?;
            debug!(root = %root.display(), "opened state database");
            Box::new(db)
        }
    })
}

/// Returns the default storage root: `~/.brainscan/data/`.
pub fn default_root() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".brainscan").join("data"))
}

fn encode(state: &AppState) -> Result<String> {
    Ok(serde_json::to_string(state)?)
}

fn decode(blob: &str) -> Result<AppState> {
    serde_json::from_str(blob).map_err(|e| StorageError::Corrupt(e.to_string()))
}
