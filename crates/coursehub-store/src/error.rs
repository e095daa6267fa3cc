//! # Storage Error Types
//!
//! Error types for durable storage operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  StorageError (this file)                                               │
//! │         │                                                               │
//! │         ├──► AppStore: logged at WARN, state change kept                │
//! │         │                                                               │
//! │         └──► CLI (opening the data dir): ApiError STORAGE_ERROR         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Durable storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    ///
    /// ## When This Occurs
    /// - Data directory is read-only or was removed
    /// - Disk full
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file exists but is not a JSON object of strings.
    #[error("Corrupt storage file {}: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Encoding a value for storage failed.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backend refused the operation.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience type alias for Results with StorageError.
pub type StorageResult<T> = Result<T, StorageError>;
