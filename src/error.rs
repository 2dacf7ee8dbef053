//! Error types for folio-core.
//!
//! Only configuration loading and form submission surface errors to callers.
//! Storage and observer errors are produced at the platform seams and absorbed
//! by the store, bridge and visibility trigger.

use thiserror::Error;

/// Failures of the durable key-value storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Storage is disabled or inaccessible (privacy mode, denied).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The write would exceed the storage quota.
    #[error("storage quota exceeded writing '{key}'")]
    QuotaExceeded { key: String },

    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Stored value could not be (de)serialized.
    #[error("malformed stored value: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Failures setting up a viewport intersection observer.
#[derive(Debug, Error)]
pub enum ObserverError {
    /// The execution environment has no intersection primitive.
    #[error("intersection observation unsupported: {0}")]
    Unsupported(&'static str),

    #[error("invalid root margin '{0}'")]
    InvalidRootMargin(String),
}

/// Rejection of a caller-supplied submit handler.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("submission rejected: {0}")]
    Rejected(String),

    #[error("submission failed: {0}")]
    Failed(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Failures loading a [`FolioConfig`](crate::config::FolioConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
