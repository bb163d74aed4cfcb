//! Store error types
//!
//! Validation failures are kept apart from everything else so the HTTP
//! layer can answer 400 for bad input and 500 for store faults.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::model::ValidationError;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Document rejected before persistence
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Journal could not be read or written
    #[error("Journal I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Journal content failed verification during replay
    #[error("Journal corruption at line {line}: {reason}")]
    Corruption { line: usize, reason: String },

    /// Anything else (poisoned lock, document encoding)
    #[error("Internal store error: {0}")]
    Internal(String),
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn corruption(line: usize, reason: impl Into<String>) -> Self {
        StoreError::Corruption {
            line,
            reason: reason.into(),
        }
    }

    /// Returns true if the failure was caused by the document itself
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation(_))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Internal(format!("document encoding failed: {}", err))
    }
}
