//! File-based storage adapters.
//!
//! Records are YAML files on disk, one per entity:
//!
//! ```text
//! {data_dir}/conversations/{id}.yaml
//! {data_dir}/services/{id}.yaml
//! {data_dir}/artifacts/{service_id}/{artifact_id}.yaml
//! {data_dir}/test_runs/{id}.yaml
//! {data_dir}/blobs/{key}
//! ```

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::codegen::{is_contained_path, ArtifactManifest};
use crate::domain::conversation::Conversation;
use crate::domain::foundation::{ConversationId, OwnerId, ServiceId, TestRunId};
use crate::domain::lifecycle::TestRun;
use crate::domain::service::ServiceRecord;
use crate::ports::{
    ArtifactRepository, BlobStore, ConversationRepository, ServiceRepository, StorageError,
    TestRunRepository,
};

fn io_err(e: std::io::Error) -> StorageError {
    StorageError::Io(e.to_string())
}

async fn ensure_dir(path: &Path) -> Result<(), StorageError> {
    fs::create_dir_all(path).await.map_err(io_err)
}

async fn write_yaml<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent).await?;
    }
    let yaml = serde_yaml::to_string(value).map_err(|e| StorageError::Serialization(e.to_string()))?;
    fs::write(path, yaml).await.map_err(io_err)
}

async fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StorageError> {
    let yaml = match fs::read_to_string(path).await {
        Ok(yaml) => yaml,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(io_err(e)),
    };
    serde_yaml::from_str(&yaml)
        .map(Some)
        .map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Reads every `*.yaml` file in a directory. A missing directory is empty.
async fn read_all_yaml<T: DeserializeOwned>(dir: &Path) -> Result<Vec<T>, StorageError> {
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(io_err(e)),
    };

    let mut values = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(io_err)? {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("yaml") {
            continue;
        }
        if let Some(value) = read_yaml(&path).await? {
            values.push(value);
        }
    }
    Ok(values)
}

/// YAML-file record store implementing every record repository port.
#[derive(Debug, Clone)]
pub struct FileRecordStore {
    base_path: PathBuf,
}

impl FileRecordStore {
    /// # Example
    /// ```ignore
    /// let store = FileRecordStore::new("./data");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn conversation_path(&self, id: ConversationId) -> PathBuf {
        self.base_path.join("conversations").join(format!("{}.yaml", id))
    }

    fn services_dir(&self) -> PathBuf {
        self.base_path.join("services")
    }

    fn artifacts_dir(&self, service_id: ServiceId) -> PathBuf {
        self.base_path.join("artifacts").join(service_id.to_string())
    }

    fn test_run_path(&self, id: TestRunId) -> PathBuf {
        self.base_path.join("test_runs").join(format!("{}.yaml", id))
    }
}

#[async_trait]
impl ConversationRepository for FileRecordStore {
    async fn save(&self, conversation: &Conversation) -> Result<(), StorageError> {
        write_yaml(&self.conversation_path(conversation.id()), conversation).await
    }

    async fn find(&self, id: ConversationId) -> Result<Option<Conversation>, StorageError> {
        read_yaml(&self.conversation_path(id)).await
    }
}

#[async_trait]
impl ServiceRepository for FileRecordStore {
    async fn put(&self, record: &ServiceRecord) -> Result<(), StorageError> {
        let path = self.services_dir().join(format!("{}.yaml", record.id));
        write_yaml(&path, record).await
    }

    async fn get(&self, id: ServiceId) -> Result<Option<ServiceRecord>, StorageError> {
        read_yaml(&self.services_dir().join(format!("{}.yaml", id))).await
    }

    async fn list_by_owner(&self, owner: &OwnerId) -> Result<Vec<ServiceRecord>, StorageError> {
        let mut owned: Vec<ServiceRecord> = read_all_yaml::<ServiceRecord>(&self.services_dir())
            .await?
            .into_iter()
            .filter(|s| &s.owner == owner)
            .collect();
        owned.sort_by_key(|s| s.created_at);
        Ok(owned)
    }
}

#[async_trait]
impl ArtifactRepository for FileRecordStore {
    async fn save(&self, manifest: &ArtifactManifest) -> Result<(), StorageError> {
        let path = self
            .artifacts_dir(manifest.service_id)
            .join(format!("{}.yaml", manifest.artifact_id));
        write_yaml(&path, manifest).await
    }

    async fn list_for_service(&self, service_id: ServiceId) -> Result<Vec<ArtifactManifest>, StorageError> {
        let mut manifests: Vec<ArtifactManifest> = read_all_yaml(&self.artifacts_dir(service_id)).await?;
        manifests.sort_by_key(|m| m.created_at);
        Ok(manifests)
    }
}

#[async_trait]
impl TestRunRepository for FileRecordStore {
    async fn save(&self, run: &TestRun) -> Result<(), StorageError> {
        write_yaml(&self.test_run_path(run.id), run).await
    }

    async fn find(&self, id: TestRunId) -> Result<Option<TestRun>, StorageError> {
        read_yaml(&self.test_run_path(id)).await
    }
}

/// Blob store writing each key as a file under `{base}/blobs`.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    root: PathBuf,
}

impl FileBlobStore {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            root: base_path.as_ref().join("blobs"),
        }
    }

    /// Maps a key to a path, rejecting keys that would escape the root.
    fn blob_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        if !is_contained_path(key) {
            return Err(StorageError::Io(format!("invalid blob key '{}'", key)));
        }
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl BlobStore for FileBlobStore {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
        let path = self.blob_path(key)?;
        if let Some(parent) = path.parent() {
            ensure_dir(parent).await?;
        }
        fs::write(&path, bytes).await.map_err(io_err)
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.blob_path(key)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_err(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::codegen::CodeArtifactSet;
    use crate::domain::lifecycle::{
        AgentDetails, AgentResult, AgentStatus, TestSummary, TestTarget, TestType,
    };
    use crate::domain::questionnaire::QuestionCatalog;
    use crate::domain::foundation::Timestamp;
    use indexmap::IndexMap;
    use tempfile::TempDir;

    fn record(owner: OwnerId) -> ServiceRecord {
        let mut answers = IndexMap::new();
        answers.insert("service_type".to_string(), "vFirewall".to_string());
        answers.insert("features".to_string(), "A, B".to_string());
        ServiceRecord::from_answers(&answers, owner).unwrap()
    }

    #[tokio::test]
    async fn conversation_round_trips_through_yaml() {
        let dir = TempDir::new().unwrap();
        let store = FileRecordStore::new(dir.path());
        let mut conv = Conversation::start();
        conv.advance(&QuestionCatalog::standard(), "line one\nline two").unwrap();

        ConversationRepository::save(&store, &conv).await.unwrap();
        let loaded = ConversationRepository::find(&store, conv.id()).await.unwrap().unwrap();

        assert_eq!(loaded, conv);
        assert!(dir.path().join("conversations").join(format!("{}.yaml", conv.id())).exists());
    }

    #[tokio::test]
    async fn missing_records_are_none() {
        let dir = TempDir::new().unwrap();
        let store = FileRecordStore::new(dir.path());
        assert!(store.get(ServiceId::new()).await.unwrap().is_none());
        assert!(TestRunRepository::find(&store, TestRunId::new()).await.unwrap().is_none());
        assert!(store.list_by_owner(&OwnerId::anonymous()).await.unwrap().is_empty());
        assert!(store.list_for_service(ServiceId::new()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn services_are_listed_per_owner() {
        let dir = TempDir::new().unwrap();
        let store = FileRecordStore::new(dir.path());
        let mine = record(OwnerId::anonymous());
        let theirs = record(OwnerId::new("bob").unwrap());
        store.put(&mine).await.unwrap();
        store.put(&theirs).await.unwrap();

        let listed = store.list_by_owner(&OwnerId::anonymous()).await.unwrap();
        assert_eq!(listed, vec![mine]);
    }

    #[tokio::test]
    async fn manifests_and_test_runs_persist() {
        let dir = TempDir::new().unwrap();
        let store = FileRecordStore::new(dir.path());
        let service_id = ServiceId::new();
        let mut files = IndexMap::new();
        files.insert("a.py".to_string(), "x".to_string());
        let manifest = CodeArtifactSet::new(service_id, files).manifest(None);
        ArtifactRepository::save(&store, &manifest).await.unwrap();
        assert_eq!(store.latest_for_service(service_id).await.unwrap(), Some(manifest));

        let mut summary = TestSummary::default();
        summary.record(AgentStatus::Completed);
        let run = TestRun {
            id: TestRunId::new(),
            test_type: TestType::Deploy,
            target: TestTarget::Service(service_id),
            results: vec![AgentResult::orchestrator(
                AgentStatus::Completed,
                AgentDetails::None,
                "done",
            )],
            summary,
            created_at: Timestamp::now(),
        };
        TestRunRepository::save(&store, &run).await.unwrap();
        assert_eq!(TestRunRepository::find(&store, run.id).await.unwrap(), Some(run));
    }

    #[tokio::test]
    async fn blobs_round_trip_and_reject_escaping_keys() {
        let dir = TempDir::new().unwrap();
        let blobs = FileBlobStore::new(dir.path());
        blobs.put("svc/art/README.md", b"# hi".to_vec()).await.unwrap();

        assert_eq!(blobs.get("svc/art/README.md").await.unwrap(), Some(b"# hi".to_vec()));
        assert_eq!(blobs.get("svc/art/none.md").await.unwrap(), None);
        assert!(blobs.put("../outside", vec![]).await.is_err());
        assert!(blobs.put("/etc/passwd", vec![]).await.is_err());
        assert!(blobs.get("").await.is_err());
    }

    #[tokio::test]
    async fn corrupt_yaml_is_a_serialization_error() {
        let dir = TempDir::new().unwrap();
        let store = FileRecordStore::new(dir.path());
        let id = ServiceId::new();
        let services = dir.path().join("services");
        std::fs::create_dir_all(&services).unwrap();
        std::fs::write(services.join(format!("{}.yaml", id)), ": : not yaml [").unwrap();

        assert!(matches!(
            store.get(id).await,
            Err(StorageError::Serialization(_))
        ));
    }
}
