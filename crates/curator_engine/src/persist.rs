use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("state directory missing or not writable: {0}")]
    StateDir(String),
    #[error("draft could not be serialized: {0}")]
    Encode(String),
    #[error("draft file is not valid RON: {0}")]
    Decode(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// RON snapshot storage for editor drafts.
///
/// Saves go through a temp file in the state directory and are renamed into
/// place, so a crash mid-write never leaves a truncated draft behind. A draft
/// that has been committed to the backend is removed through
/// [`remove`](Self::remove) rather than overwritten with an empty snapshot,
/// so the next session starts clean instead of restoring a stale member list.
pub struct DraftStore {
    dir: PathBuf,
}

impl DraftStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Serializes `snapshot` as pretty RON to `{dir}/{filename}`, creating
    /// the state directory if needed.
    pub fn save<T: Serialize>(&self, filename: &str, snapshot: &T) -> Result<PathBuf, PersistError> {
        if !self.dir.is_dir() {
            fs::create_dir_all(&self.dir).map_err(|e| PersistError::StateDir(e.to_string()))?;
        }

        let pretty = ron::ser::PrettyConfig::new();
        let content = ron::ser::to_string_pretty(snapshot, pretty)
            .map_err(|e| PersistError::Encode(e.to_string()))?;

        let mut tmp = NamedTempFile::new_in(&self.dir)
            .map_err(|e| PersistError::StateDir(e.to_string()))?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        // Rename does not replace an existing file on every platform.
        let target = self.dir.join(filename);
        if target.exists() {
            fs::remove_file(&target)?;
        }
        tmp.persist(&target).map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }

    /// Reads a snapshot back, returning `Ok(None)` when no draft exists.
    pub fn load<T: DeserializeOwned>(&self, filename: &str) -> Result<Option<T>, PersistError> {
        let path = self.dir.join(filename);
        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        ron::from_str(&content)
            .map(Some)
            .map_err(|e| PersistError::Decode(e.to_string()))
    }

    /// Deletes a snapshot. Removing a draft that is already gone is a no-op.
    pub fn remove(&self, filename: &str) -> Result<(), PersistError> {
        match fs::remove_file(self.dir.join(filename)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    pub fn path_of(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }
}
