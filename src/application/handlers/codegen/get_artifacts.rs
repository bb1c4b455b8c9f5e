//! GetArtifactsHandler - Query handler for the latest generated code of a service.

use indexmap::IndexMap;
use std::sync::Arc;
use thiserror::Error;

use crate::domain::codegen::CodeArtifactSet;
use crate::domain::foundation::{ErrorCode, ServiceId};
use crate::ports::{ArtifactRepository, BlobStore, ServiceRepository, StorageError};

#[derive(Debug, Clone, Error)]
pub enum GetArtifactsError {
    #[error("Service not found: {0}")]
    ServiceNotFound(ServiceId),

    #[error("No generated code found for service {0}")]
    NoArtifacts(ServiceId),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl GetArtifactsError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::ServiceNotFound(_) => ErrorCode::ServiceNotFound,
            Self::NoArtifacts(_) => ErrorCode::ArtifactNotFound,
            Self::Storage(_) => ErrorCode::StorageFault,
        }
    }
}

/// Handler for reading back the most recent artifact set.
pub struct GetArtifactsHandler {
    services: Arc<dyn ServiceRepository>,
    artifacts: Arc<dyn ArtifactRepository>,
    blobs: Arc<dyn BlobStore>,
}

impl GetArtifactsHandler {
    pub fn new(
        services: Arc<dyn ServiceRepository>,
        artifacts: Arc<dyn ArtifactRepository>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            services,
            artifacts,
            blobs,
        }
    }

    pub async fn handle(&self, service_id: ServiceId) -> Result<CodeArtifactSet, GetArtifactsError> {
        if self.services.get(service_id).await?.is_none() {
            return Err(GetArtifactsError::ServiceNotFound(service_id));
        }

        let manifest = self
            .artifacts
            .latest_for_service(service_id)
            .await?
            .ok_or(GetArtifactsError::NoArtifacts(service_id))?;

        let mut files = IndexMap::with_capacity(manifest.blob_keys.len());
        for (filename, key) in &manifest.blob_keys {
            let bytes = self.blobs.get(key).await?.ok_or_else(|| {
                StorageError::Io(format!("blob '{}' listed in manifest is missing", key))
            })?;
            files.insert(filename.clone(), String::from_utf8_lossy(&bytes).into_owned());
        }

        Ok(CodeArtifactSet {
            id: manifest.artifact_id,
            service_id,
            files,
            created_at: manifest.created_at,
        })
    }
}
