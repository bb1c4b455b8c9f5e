//! ArtifactRepository port.

use async_trait::async_trait;

use super::StorageError;
use crate::domain::codegen::ArtifactManifest;
use crate::domain::foundation::ServiceId;

/// Metadata storage for generated artifact sets.
///
/// File bodies are kept in a [`BlobStore`](super::BlobStore); this port only
/// tracks which sets exist and where their files live.
#[async_trait]
pub trait ArtifactRepository: Send + Sync {
    async fn save(&self, manifest: &ArtifactManifest) -> Result<(), StorageError>;

    /// All manifests for a service, oldest first.
    async fn list_for_service(&self, service_id: ServiceId) -> Result<Vec<ArtifactManifest>, StorageError>;

    /// Most recent manifest by `created_at`, if any.
    async fn latest_for_service(&self, service_id: ServiceId) -> Result<Option<ArtifactManifest>, StorageError> {
        let manifests = self.list_for_service(service_id).await?;
        Ok(manifests.into_iter().max_by_key(|m| m.created_at))
    }
}
