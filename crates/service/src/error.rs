//! Typed error enum for the service layer.

use bear_tracks_storage::StorageError;
use thiserror::Error;

/// Service-layer error: store failures and rejected input.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage operation failed (DB, pool, corrupt row).
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// Caller provided invalid input. Raised before any write.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ServiceError {
    /// Whether this error is likely transient (worth retrying).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Storage(e) => e.is_transient(),
            Self::InvalidInput(_) => false,
        }
    }

    /// Whether this error represents a not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Storage(e) if e.is_not_found())
    }
}
