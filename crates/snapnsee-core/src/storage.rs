use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use crate::error::PersistenceError;

/// Durable backing for a collection of records.
///
/// `save` replaces the whole collection and must be all-or-nothing.
pub trait RecordStorage<T>: Send + Sync {
    fn load(&self) -> Result<Vec<T>, PersistenceError>;
    fn save(&self, records: &[T]) -> Result<(), PersistenceError>;
}

/// Records kept as a pretty-printed JSON array in one file
pub struct JsonFileStorage<T> {
    path: PathBuf,
    _records: PhantomData<fn() -> T>,
}

impl<T> JsonFileStorage<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _records: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn backup_incompatible(&self, reason: &serde_json::Error) {
        let backup_path = self.path.with_extension("json.bak");
        match std::fs::rename(&self.path, &backup_path) {
            Ok(()) => info!(
                "Stored records at {:?} are unreadable ({}). Moved them to {:?} and starting empty.",
                self.path, reason, backup_path
            ),
            Err(e) => warn!(
                "Stored records at {:?} are unreadable ({}) and could not be backed up: {}",
                self.path, reason, e
            ),
        }
    }
}

impl<T> RecordStorage<T> for JsonFileStorage<T>
where
    T: Serialize + DeserializeOwned,
{
    fn load(&self) -> Result<Vec<T>, PersistenceError> {
        if !self.path.exists() {
            debug!("No stored records at {:?}", self.path);
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|source| PersistenceError::Read {
            path: self.path.clone(),
            source,
        })?;

        match serde_json::from_str::<Vec<T>>(&content) {
            Ok(records) => {
                debug!("Loaded {} records from {:?}", records.len(), self.path);
                Ok(records)
            }
            Err(e) => {
                self.backup_incompatible(&e);
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, records: &[T]) -> Result<(), PersistenceError> {
        let json = serde_json::to_string_pretty(records)?;
        let write_err = |source| PersistenceError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }

        // Atomic write: write to temp file, then rename
        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, json).map_err(write_err)?;
        std::fs::rename(&temp_path, &self.path).map_err(write_err)?;

        debug!("Saved {} records to {:?}", records.len(), self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage: JsonFileStorage<String> = JsonFileStorage::new(dir.path().join("records.json"));
        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("nested").join("records.json"));
        storage.save(&["a".to_string(), "b".to_string()]).unwrap();

        let loaded: Vec<String> = storage.load().unwrap();
        assert_eq!(loaded, vec!["a", "b"]);
        assert!(!dir.path().join("nested").join("records.json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_is_backed_up() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        std::fs::write(&path, "{not json").unwrap();

        let storage: JsonFileStorage<String> = JsonFileStorage::new(&path);
        assert!(storage.load().unwrap().is_empty());
        assert!(dir.path().join("records.json.bak").exists());
        assert!(!path.exists());
    }

    #[test]
    fn test_unwritable_location_is_persistence_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "a file, not a directory").unwrap();

        let storage = JsonFileStorage::new(blocker.join("records.json"));
        let err = storage.save(&["a".to_string()]).unwrap_err();
        assert!(matches!(err, PersistenceError::Write { .. }));
    }
}
