//! In-memory storage adapters.
//!
//! Useful for tests and single-process deployments where durability
//! is not required. All data is lost when the process exits.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::codegen::ArtifactManifest;
use crate::domain::conversation::Conversation;
use crate::domain::foundation::{ConversationId, OwnerId, ServiceId, TestRunId};
use crate::domain::lifecycle::TestRun;
use crate::domain::service::ServiceRecord;
use crate::ports::{
    ArtifactRepository, BlobStore, ConversationRepository, ServiceRepository, StorageError,
    TestRunRepository,
};

/// In-memory record store implementing every record repository port.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordStore {
    conversations: Arc<RwLock<HashMap<ConversationId, Conversation>>>,
    services: Arc<RwLock<HashMap<ServiceId, ServiceRecord>>>,
    artifacts: Arc<RwLock<HashMap<ServiceId, Vec<ArtifactManifest>>>>,
    test_runs: Arc<RwLock<HashMap<TestRunId, TestRun>>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored service records.
    pub async fn service_count(&self) -> usize {
        self.services.read().await.len()
    }

    /// Number of stored test runs.
    pub async fn test_run_count(&self) -> usize {
        self.test_runs.read().await.len()
    }
}

#[async_trait]
impl ConversationRepository for InMemoryRecordStore {
    async fn save(&self, conversation: &Conversation) -> Result<(), StorageError> {
        self.conversations
            .write()
            .await
            .insert(conversation.id(), conversation.clone());
        Ok(())
    }

    async fn find(&self, id: ConversationId) -> Result<Option<Conversation>, StorageError> {
        Ok(self.conversations.read().await.get(&id).cloned())
    }
}

#[async_trait]
impl ServiceRepository for InMemoryRecordStore {
    async fn put(&self, record: &ServiceRecord) -> Result<(), StorageError> {
        self.services.write().await.insert(record.id, record.clone());
        Ok(())
    }

    async fn get(&self, id: ServiceId) -> Result<Option<ServiceRecord>, StorageError> {
        Ok(self.services.read().await.get(&id).cloned())
    }

    async fn list_by_owner(&self, owner: &OwnerId) -> Result<Vec<ServiceRecord>, StorageError> {
        let services = self.services.read().await;
        let mut owned: Vec<ServiceRecord> = services
            .values()
            .filter(|s| &s.owner == owner)
            .cloned()
            .collect();
        owned.sort_by_key(|s| s.created_at);
        Ok(owned)
    }
}

#[async_trait]
impl ArtifactRepository for InMemoryRecordStore {
    async fn save(&self, manifest: &ArtifactManifest) -> Result<(), StorageError> {
        self.artifacts
            .write()
            .await
            .entry(manifest.service_id)
            .or_default()
            .push(manifest.clone());
        Ok(())
    }

    async fn list_for_service(&self, service_id: ServiceId) -> Result<Vec<ArtifactManifest>, StorageError> {
        let artifacts = self.artifacts.read().await;
        let mut manifests = artifacts.get(&service_id).cloned().unwrap_or_default();
        manifests.sort_by_key(|m| m.created_at);
        Ok(manifests)
    }
}

#[async_trait]
impl TestRunRepository for InMemoryRecordStore {
    async fn save(&self, run: &TestRun) -> Result<(), StorageError> {
        self.test_runs.write().await.insert(run.id, run.clone());
        Ok(())
    }

    async fn find(&self, id: TestRunId) -> Result<Option<TestRun>, StorageError> {
        Ok(self.test_runs.read().await.get(&id).cloned())
    }
}

/// In-memory key -> bytes map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBlobStore {
    blobs: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.blobs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.blobs.read().await.is_empty()
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
        self.blobs.write().await.insert(key.to_string(), bytes);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.blobs.read().await.get(key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::codegen::CodeArtifactSet;
    use crate::domain::questionnaire::QuestionCatalog;
    use indexmap::IndexMap;

    fn record(service_type: &str, owner: &str) -> ServiceRecord {
        let mut answers = IndexMap::new();
        answers.insert("service_type".to_string(), service_type.to_string());
        ServiceRecord::from_answers(&answers, OwnerId::new(owner).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn conversation_save_and_find() {
        let store = InMemoryRecordStore::new();
        let mut conv = Conversation::start();
        ConversationRepository::save(&store, &conv).await.unwrap();

        conv.advance(&QuestionCatalog::standard(), "vRouter").unwrap();
        ConversationRepository::save(&store, &conv).await.unwrap();

        let found = ConversationRepository::find(&store, conv.id()).await.unwrap().unwrap();
        assert_eq!(found.current_step(), 2);
        assert!(ConversationRepository::find(&store, ConversationId::new())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn list_by_owner_filters_and_orders_by_creation() {
        let store = InMemoryRecordStore::new();
        let first = record("vFirewall", "anonymous");
        let other = record("vRouter", "alice");
        let second = record("vVPN", "anonymous");
        for r in [&second, &other, &first] {
            store.put(r).await.unwrap();
        }

        let owned = store.list_by_owner(&OwnerId::anonymous()).await.unwrap();
        let ids: Vec<ServiceId> = owned.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
        assert_eq!(store.service_count().await, 3);
    }

    #[tokio::test]
    async fn latest_manifest_is_most_recent() {
        let store = InMemoryRecordStore::new();
        let service_id = ServiceId::new();
        let older = CodeArtifactSet::new(service_id, IndexMap::new()).manifest(None);
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let newer = CodeArtifactSet::new(service_id, IndexMap::new()).manifest(None);

        ArtifactRepository::save(&store, &newer).await.unwrap();
        ArtifactRepository::save(&store, &older).await.unwrap();

        let latest = store.latest_for_service(service_id).await.unwrap().unwrap();
        assert_eq!(latest.artifact_id, newer.artifact_id);
        assert!(store.latest_for_service(ServiceId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn blob_put_and_get() {
        let blobs = InMemoryBlobStore::new();
        blobs.put("a/b/c.txt", b"hello".to_vec()).await.unwrap();
        assert_eq!(blobs.get("a/b/c.txt").await.unwrap(), Some(b"hello".to_vec()));
        assert_eq!(blobs.get("missing").await.unwrap(), None);
        assert_eq!(blobs.len().await, 1);
    }
}
