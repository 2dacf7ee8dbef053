//! Persistent Preference Bridge
//!
//! One-directional sync between the store and device storage:
//! - storage → store: read once at store initialization (`load`)
//! - store → storage: on every settle, write the preference projection when
//!   its serialized form differs from the last one read or written (`sync`)
//!
//! Storage failures are logged and swallowed. After a failed read or write the
//! bridge stops touching storage and the store runs memory-only for the session.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::error::StorageError;
use crate::platform::storage::KeyValueStorage;
use crate::types::{AppState, PersistedPreferences};

pub struct PreferenceBridge {
    storage: Rc<dyn KeyValueStorage>,
    key: String,
    /// Serialized form of the blob last read or written.
    last_serialized: RefCell<String>,
    degraded: Cell<bool>,
}

impl PreferenceBridge {
    pub fn new(storage: Rc<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            last_serialized: RefCell::new(empty_blob()),
            degraded: Cell::new(false),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// True once storage has failed and the bridge went memory-only.
    pub fn is_degraded(&self) -> bool {
        self.degraded.get()
    }

    /// Read the stored blob.
    ///
    /// Returns `None` when nothing is stored, the blob is malformed, or
    /// storage is unavailable.
    pub fn load(&self) -> Option<PersistedPreferences> {
        match self.read() {
            Ok(blob) => blob,
            Err(StorageError::Serde(err)) => {
                tracing::warn!(key = %self.key, error = %err, "ignoring malformed stored preferences");
                None
            }
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "preference storage unreadable, running in memory");
                self.degraded.set(true);
                None
            }
        }
    }

    fn read(&self) -> Result<Option<PersistedPreferences>, StorageError> {
        let Some(raw) = self.storage.get(&self.key)? else {
            return Ok(None);
        };
        let blob = decode(&raw)?;
        // Normalized so the comparison in `sync` is by value, not by text
        *self.last_serialized.borrow_mut() = serde_json::to_string(&blob)?;
        tracing::debug!(key = %self.key, "loaded stored preferences");
        Ok(Some(blob))
    }

    /// Persist the projection of `state` if it changed.
    ///
    /// Returns `true` when a write happened.
    pub fn sync(&self, state: &AppState) -> bool {
        if self.degraded.get() {
            return false;
        }

        let next = match serde_json::to_string(&state.preferences_snapshot()) {
            Ok(next) => next,
            Err(err) => {
                tracing::warn!(error = %err, "failed to serialize preferences");
                return false;
            }
        };
        if *self.last_serialized.borrow() == next {
            return false;
        }

        match self.storage.set(&self.key, &next) {
            Ok(()) => {
                tracing::debug!(key = %self.key, blob = %next, "persisted preferences");
                *self.last_serialized.borrow_mut() = next;
                true
            }
            Err(err) => {
                tracing::warn!(key = %self.key, error = %err, "preference storage unwritable, running in memory");
                self.degraded.set(true);
                false
            }
        }
    }
}

fn decode(raw: &str) -> Result<PersistedPreferences, StorageError> {
    Ok(serde_json::from_str(raw)?)
}

fn empty_blob() -> String {
    // Matches the serialized form of an all-`None` blob
    "{}".to_string()
}

// =============================================================================
// TESTS
// =============================================================================
