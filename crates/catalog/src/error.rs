//! Error taxonomy of the publication pipeline.

use thiserror::Error;

/// Failure reported by a store collaborator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Backend failure (connection, lock, rejected write).
    #[error("storage backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

/// Failure of a publish operation.
///
/// Not-applicable inputs (missing product, variant passed as product, missing
/// shop) are *not* errors; they surface as skipped outcomes. Store failures
/// propagate here and retry policy belongs to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PublishError {
    #[error(transparent)]
    Store(#[from] StoreError),
}
