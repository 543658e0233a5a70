//! # Flat Collection Store
//!
//! Whole-collection persistence over named slots.
//!
//! Every entity collection lives in exactly one slot: a JSON array in a file
//! under the data directory. There is no smaller unit of change — a mutation
//! is always load-everything, change in memory, save-everything.
//!
//! ## Failure contract
//!
//! - [`FileStore::load`] never fails the caller. A missing slot, a
//!   zero-length file or undecodable content all yield an empty collection
//!   (with a `warn!` for the damaged cases) so the system can start cold.
//! - [`FileStore::save`] replaces the entire slot contents and PROPAGATES
//!   failures. Callers must inspect the result before performing the next
//!   mutation step; a swallowed save would make a failed commit
//!   indistinguishable from a successful one.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

/// Errors raised while persisting a collection.
///
/// Only `save` surfaces these; `load` degrades to an empty collection.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The data directory could not be created.
    #[error("Cannot create data directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The slot file could not be written.
    #[error("Cannot write slot {slot}: {source}")]
    Write {
        slot: String,
        source: std::io::Error,
    },

    /// The collection could not be serialized.
    #[error("Cannot encode slot {slot}: {source}")]
    Encode {
        slot: String,
        source: serde_json::Error,
    },
}

/// A directory of named slots, each holding one serialized collection.
#[derive(Debug, Clone)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `data_dir`. The directory itself is created
    /// lazily on the first save.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.data_dir.join(slot)
    }

    /// Loads the full collection stored in `slot`.
    ///
    /// Returns an empty vector for a slot that was never written, is empty,
    /// or cannot be read or decoded. The damaged cases are logged; none of
    /// them are surfaced as errors.
    pub fn load<T: DeserializeOwned>(&self, slot: &str) -> Vec<T> {
        let path = self.slot_path(slot);

        match fs::metadata(&path) {
            Err(_) => {
                debug!(slot, "Slot not written yet, starting cold");
                return Vec::new();
            }
            Ok(meta) if meta.len() == 0 => {
                debug!(slot, "Slot file is empty");
                return Vec::new();
            }
            Ok(_) => {}
        }

        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) => {
                warn!(slot, error = %e, "Slot unreadable, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_reader::<_, Vec<T>>(BufReader::new(file)) {
            Ok(records) => {
                debug!(slot, count = records.len(), "Slot loaded");
                records
            }
            Err(e) => {
                warn!(slot, error = %e, "Slot undecodable, treating as empty");
                Vec::new()
            }
        }
    }

    /// Replaces the entire contents of `slot` with `records`, creating the
    /// data directory if it does not exist yet.
    pub fn save<T: Serialize>(&self, slot: &str, records: &[T]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.data_dir).map_err(|source| StoreError::CreateDir {
            path: self.data_dir.clone(),
            source,
        })?;

        let path = self.slot_path(slot);
        let file = File::create(&path).map_err(|source| StoreError::Write {
            slot: slot.to_string(),
            source,
        })?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, records).map_err(|source| StoreError::Encode {
            slot: slot.to_string(),
            source,
        })?;
        writer.flush().map_err(|source| StoreError::Write {
            slot: slot.to_string(),
            source,
        })?;

        debug!(slot, count = records.len(), "Slot saved");
        Ok(())
    }

    /// Whether `slot` has ever been written.
    pub fn exists(&self, slot: &str) -> bool {
        self.slot_path(slot).is_file()
    }

    /// Removes `slot` from disk. Returns whether a file was actually deleted.
    pub fn delete(&self, slot: &str) -> bool {
        let path = self.slot_path(slot);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(slot, "Slot deleted");
                true
            }
            Err(_) => false,
        }
    }

    /// The directory this store writes into.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: u32,
        text: String,
    }

    fn note(id: u32, text: &str) -> Note {
        Note {
            id,
            text: text.to_string(),
        }
    }

    const SLOT: &str = "notes.json";

    #[test]
    fn round_trips_empty_single_and_many() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        for count in [0usize, 1, 25] {
            let records: Vec<Note> = (0..count as u32).map(|i| note(i, "x")).collect();
            store.save(SLOT, &records).unwrap();
            let loaded: Vec<Note> = store.load(SLOT);
            assert_eq!(loaded, records);
        }
    }

    #[test]
    fn missing_slot_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        let loaded: Vec<Note> = store.load("never-written.json");
        assert!(loaded.is_empty());
        assert!(!store.exists("never-written.json"));
    }

    #[test]
    fn empty_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        std::fs::write(dir.path().join(SLOT), b"").unwrap();
        let loaded: Vec<Note> = store.load(SLOT);
        assert!(loaded.is_empty());
    }

    #[test]
    fn corrupt_slot_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        std::fs::write(dir.path().join(SLOT), b"{ this is not a json array").unwrap();
        let loaded: Vec<Note> = store.load(SLOT);
        assert!(loaded.is_empty());
    }

    #[test]
    fn save_creates_missing_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("data"));

        store.save(SLOT, &[note(1, "hello")]).unwrap();
        let loaded: Vec<Note> = store.load(SLOT);
        assert_eq!(loaded.len(), 1);
    }

    #[test]
    fn save_fails_when_data_dir_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("data");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let store = FileStore::new(&blocker);
        let result = store.save(SLOT, &[note(1, "hello")]);
        assert!(matches!(result, Err(StoreError::CreateDir { .. })));
    }

    #[test]
    fn delete_removes_slot() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.save(SLOT, &[note(1, "hello")]).unwrap();
        assert!(store.exists(SLOT));
        assert!(store.delete(SLOT));
        assert!(!store.exists(SLOT));
        assert!(!store.delete(SLOT));

        let loaded: Vec<Note> = store.load(SLOT);
        assert!(loaded.is_empty());
    }
}
