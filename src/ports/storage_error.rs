//! Error type shared by every storage port.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Faults raised by record and blob stores.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// Underlying read or write failed.
    #[error("IO error: {0}")]
    Io(String),

    /// Stored data could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The backing store is not reachable.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl From<StorageError> for DomainError {
    fn from(err: StorageError) -> Self {
        DomainError::new(ErrorCode::StorageFault, err.to_string())
    }
}
