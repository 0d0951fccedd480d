//! JSON file backend.
//!
//! Saves go to a temporary file in the same directory and are renamed over
//! the previous snapshot, so a crash mid-write never truncates good data.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

// Trait must be in scope for `.write_all()` on `NamedTempFile`.
use io::Write;

use tempfile::NamedTempFile;

use crate::model::AppState;

use super::{Persist, Result, STORAGE_KEY, decode, encode};

/// Stores the state as `<root>/@brain_tumor_app_state.json`.
pub struct FileStorage {
    root: PathBuf,
    path: PathBuf,
}

impl FileStorage {
    /// Creates a file storage rooted at the given directory.
    ///
    /// The directory is created if it doesn't exist.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        let path = root.join(format!("{STORAGE_KEY}.json"));
        Ok(Self { root, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Persist for FileStorage {
    fn load(&self) -> Result<Option<AppState>> {
        let json = match fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        decode(&json).map(Some)
    }

    fn save(&self, state: &AppState) -> Result<()> {
        let json = encode(state)?;
        let mut tmp = NamedTempFile::new_in(&self.root)?;
        tmp.write_all(json.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}
