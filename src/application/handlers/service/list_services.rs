//! ListServicesHandler - Query handler for the acting principal's services.

use std::sync::Arc;

use crate::domain::foundation::OwnerId;
use crate::domain::service::ServiceRecord;
use crate::ports::{ServiceRepository, StorageError};

/// Handler for listing services, using the same owner-scoped query as discovery.
pub struct ListServicesHandler {
    services: Arc<dyn ServiceRepository>,
    owner: OwnerId,
}

impl ListServicesHandler {
    pub fn new(services: Arc<dyn ServiceRepository>, owner: OwnerId) -> Self {
        Self { services, owner }
    }

    pub async fn handle(&self) -> Result<Vec<ServiceRecord>, StorageError> {
        self.services.list_by_owner(&self.owner).await
    }
}
