//! Keyed storage for processed delimited-text output.
//!
//! The store is append-only: every `put` generates a fresh identifier, so
//! entries are never overwritten and lookups need no locking for
//! correctness. Spreadsheet output is returned inline and never stored.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use uuid::Uuid;

use crate::error::{ProcessingError, ProcessingResult};

/// Keyed byte store for processed output files.
///
/// Implementors generate the identifier on `put`; callers retrieve bytes by
/// that identifier. Unknown identifiers report [`ProcessingError::NotFound`].
pub trait OutputStore: Send + Sync {
    /// Store `bytes` under a freshly generated opaque identifier.
    fn put(&self, bytes: &[u8]) -> ProcessingResult<String>;

    /// Retrieve the bytes stored under `id`.
    fn get(&self, id: &str) -> ProcessingResult<Vec<u8>>;
}

/// Directory-backed store writing one `<uuid>.csv` file per entry.
#[derive(Debug)]
pub struct DirectoryStore {
    dir: PathBuf,
}

impl DirectoryStore {
    /// Default directory name for processed output.
    pub const DEFAULT_DIR: &'static str = "processed_files";

    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl AsRef<Path>) -> ProcessingResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn entry_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.csv"))
    }
}

impl OutputStore for DirectoryStore {
    fn put(&self, bytes: &[u8]) -> ProcessingResult<String> {
        let id = Uuid::new_v4().to_string();
        fs::write(self.entry_path(&id), bytes)?;
        Ok(id)
    }

    fn get(&self, id: &str) -> ProcessingResult<Vec<u8>> {
        // Identifiers are always UUIDs; anything else (including path
        // fragments) is unknown by construction.
        if Uuid::parse_str(id).is_err() {
            return Err(ProcessingError::NotFound { id: id.to_string() });
        }
        match fs::read(self.entry_path(id)) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ProcessingError::NotFound { id: id.to_string() })
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store, used as the test double for [`DirectoryStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl OutputStore for MemoryStore {
    fn put(&self, bytes: &[u8]) -> ProcessingResult<String> {
        let id = Uuid::new_v4().to_string();
        self.entries().insert(id.clone(), bytes.to_vec());
        Ok(id)
    }

    fn get(&self, id: &str) -> ProcessingResult<Vec<u8>> {
        self.entries()
            .get(id)
            .cloned()
            .ok_or_else(|| ProcessingError::NotFound { id: id.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::{MemoryStore, OutputStore};
    use crate::error::ProcessingError;

    #[test]
    fn put_then_get_round_trips() {
        let store = MemoryStore::default();
        let id = store.put(b"a,b\n1,2\n").unwrap();
        assert_eq!(store.get(&id).unwrap(), b"a,b\n1,2\n");
    }

    #[test]
    fn ids_are_unique_per_put() {
        let store = MemoryStore::default();
        let a = store.put(b"x").unwrap();
        let b = store.put(b"x").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn unknown_id_is_not_found() {
        let store = MemoryStore::default();
        let err = store.get("no-such-id").unwrap_err();
        assert!(matches!(err, ProcessingError::NotFound { .. }));
    }
}
