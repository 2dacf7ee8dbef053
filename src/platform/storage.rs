//! Durable per-device key-value storage.
//!
//! Both operations may fail (quota, disabled storage, privacy mode). Callers in
//! this crate treat failure as "memory only for this session".

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::error::StorageError;

/// String key-value store with last-write-wins semantics.
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

// =============================================================================
// MEMORY STORAGE
// =============================================================================

#[derive(Default)]
struct MemoryInner {
    entries: RefCell<HashMap<String, String>>,
    writes: Cell<usize>,
    reads: Cell<usize>,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
}

/// In-memory storage. Clones share the same entries.
///
/// Counts reads and writes, and can be switched into a failing mode to
/// simulate disabled storage.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    inner: Rc<MemoryInner>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with one entry. Seeding is not counted as a write.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .inner
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        storage
    }

    /// Number of successful `set` calls.
    pub fn write_count(&self) -> usize {
        self.inner.writes.get()
    }

    /// Number of `get` calls, failed or not.
    pub fn read_count(&self) -> usize {
        self.inner.reads.get()
    }

    /// Make every subsequent read fail.
    pub fn fail_reads(&self, fail: bool) {
        self.inner.fail_reads.set(fail);
    }

    /// Make every subsequent write fail.
    pub fn fail_writes(&self, fail: bool) {
        self.inner.fail_writes.set(fail);
    }

    /// Stored value without touching the counters.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.inner.entries.borrow().get(key).cloned()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.reads.set(self.inner.reads.get() + 1);
        if self.inner.fail_reads.get() {
            return Err(StorageError::Unavailable("reads disabled".to_string()));
        }
        Ok(self.inner.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.inner.fail_writes.get() {
            return Err(StorageError::QuotaExceeded { key: key.to_string() });
        }
        self.inner
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.inner.writes.set(self.inner.writes.get() + 1);
        Ok(())
    }
}

// =============================================================================
// FILE STORAGE
// =============================================================================

/// Storage backed by one file per key under a directory.
///
/// Keys map to `<dir>/<key>.json`; characters outside `[A-Za-z0-9_-]` are
/// replaced with `_`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
