use thiserror::Error;

use crate::store::StoreError;

/// Errors surfaced by record synchronization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// A required startup parameter is missing or empty.
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// Input rejected locally, before any store call.
    #[error("Validation error: {0}")]
    Validation(String),
    /// The data store reported a failure.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
    /// The synchronizer task is no longer running.
    #[error("Record synchronizer stopped")]
    ActorStopped,
}

/// Result type for synchronization operations.
pub type Result<T> = std::result::Result<T, SyncError>;
