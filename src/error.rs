//! Error types for storage, encoding and slot access
//!
//! None of these escape a [`PersistedCell`](crate::persistence::PersistedCell):
//! the cell logs them and keeps running on its in-memory value.

use thiserror::Error;

/// Failure reported by a durable storage backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// No storage available (no window, storage disabled, private mode)
    #[error("storage backend unavailable")]
    Unavailable,

    /// Backend refused the operation
    #[error("storage backend rejected operation: {0}")]
    Rejected(String),

    /// Write would exceed the backend's byte quota
    #[error("quota exceeded writing '{key}': need {needed} bytes, quota is {quota}")]
    QuotaExceeded {
        key: String,
        needed: usize,
        quota: usize,
    },
}

/// Value could not be converted to or from its text form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("codec error: {0}")]
pub struct CodecError(pub String);

impl From<serde_json::Error> for CodecError {
    fn from(e: serde_json::Error) -> Self {
        CodecError(e.to_string())
    }
}

/// Hydrating a cell from its slot failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotReadFailure {
    /// Slot has content but it does not decode
    #[error("slot '{key}' holds unreadable content: {source}")]
    Corrupt { key: String, source: CodecError },

    /// Backend read failed
    #[error("slot '{key}' could not be read: {source}")]
    Backend { key: String, source: StorageError },
}

/// Mirroring a new value into its slot failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotWriteFailure {
    /// Value could not be encoded
    #[error("value for slot '{key}' could not be encoded: {source}")]
    Encode { key: String, source: CodecError },

    /// Backend write failed
    #[error("slot '{key}' could not be written: {source}")]
    Backend { key: String, source: StorageError },
}

impl SlotWriteFailure {
    /// Key of the slot the write was aimed at
    pub fn key(&self) -> &str {
        match self {
            SlotWriteFailure::Encode { key, .. } | SlotWriteFailure::Backend { key, .. } => key,
        }
    }
}
