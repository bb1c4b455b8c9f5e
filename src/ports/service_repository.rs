//! ServiceRepository port.

use async_trait::async_trait;

use super::StorageError;
use crate::domain::foundation::{OwnerId, ServiceId};
use crate::domain::service::ServiceRecord;

/// Key-based storage for service records plus an owner-scoped listing.
#[async_trait]
pub trait ServiceRepository: Send + Sync {
    /// Insert or replace a record.
    async fn put(&self, record: &ServiceRecord) -> Result<(), StorageError>;

    /// Returns `Ok(None)` if not found.
    async fn get(&self, id: ServiceId) -> Result<Option<ServiceRecord>, StorageError>;

    /// Every record owned by `owner`, oldest first.
    async fn list_by_owner(&self, owner: &OwnerId) -> Result<Vec<ServiceRecord>, StorageError>;
}
