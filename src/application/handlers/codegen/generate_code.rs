//! GenerateCodeHandler - turns a completed questionnaire into stored code.

use indexmap::IndexMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::domain::codegen::{blob_key, build_generation_prompt, CodeArtifactSet, CodeBlockParser};
use crate::domain::foundation::{
    ArtifactId, ConversationId, ErrorCode, OwnerId, ServiceId, ValidationError,
};
use crate::domain::service::ServiceRecord;
use crate::ports::{
    ArtifactRepository, BlobStore, ConversationRepository, GenerationError, ServiceRepository,
    StorageError, TextGenerator,
};

/// Command to generate code for a completed conversation.
#[derive(Debug, Clone)]
pub struct GenerateCodeCommand {
    pub conversation_id: ConversationId,
    /// Attach the output to an existing service instead of creating one.
    pub service_id: Option<ServiceId>,
}

/// Result of a successful generation.
#[derive(Debug, Clone)]
pub struct GenerateCodeResult {
    pub artifact_id: ArtifactId,
    pub service_id: ServiceId,
    pub conversation_id: ConversationId,
    pub files: IndexMap<String, String>,
    pub total_lines: usize,
}

/// Errors that can occur during code generation.
#[derive(Debug, Clone, Error)]
pub enum GenerateCodeError {
    #[error("Conversation not found: {0}")]
    ConversationNotFound(ConversationId),

    #[error("Service not found: {0}")]
    ServiceNotFound(ServiceId),

    #[error("Conversation {0} is not completed")]
    NotCompleted(ConversationId),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Generation failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("Generated output contained no files")]
    NoFiles,

    #[error("Generated output named an unusable file: {0}")]
    UnsafeFilename(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl GenerateCodeError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::ConversationNotFound(_) => ErrorCode::ConversationNotFound,
            Self::ServiceNotFound(_) => ErrorCode::ServiceNotFound,
            Self::NotCompleted(_) => ErrorCode::InvalidState,
            Self::Validation(_) => ErrorCode::ValidationFailed,
            Self::Generation(e) => e.code(),
            Self::NoFiles | Self::UnsafeFilename(_) => ErrorCode::UpstreamFailure,
            Self::Storage(_) => ErrorCode::StorageFault,
        }
    }
}

/// Handler for code generation.
///
/// Flow: load the completed conversation, resolve or build the service
/// record, prompt the generator under a time cap, parse and check the
/// output, write every file to the blob store, save the manifest, then
/// save the service record. A record is never persisted ahead of its code.
pub struct GenerateCodeHandler {
    conversations: Arc<dyn ConversationRepository>,
    services: Arc<dyn ServiceRepository>,
    artifacts: Arc<dyn ArtifactRepository>,
    blobs: Arc<dyn BlobStore>,
    generator: Arc<dyn TextGenerator>,
    parser: CodeBlockParser,
    owner: OwnerId,
    timeout: Duration,
}

impl GenerateCodeHandler {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        conversations: Arc<dyn ConversationRepository>,
        services: Arc<dyn ServiceRepository>,
        artifacts: Arc<dyn ArtifactRepository>,
        blobs: Arc<dyn BlobStore>,
        generator: Arc<dyn TextGenerator>,
        parser: CodeBlockParser,
        owner: OwnerId,
        timeout: Duration,
    ) -> Self {
        Self {
            conversations,
            services,
            artifacts,
            blobs,
            generator,
            parser,
            owner,
            timeout,
        }
    }

    pub async fn handle(&self, cmd: GenerateCodeCommand) -> Result<GenerateCodeResult, GenerateCodeError> {
        let conversation = self
            .conversations
            .find(cmd.conversation_id)
            .await?
            .ok_or(GenerateCodeError::ConversationNotFound(cmd.conversation_id))?;

        if !conversation.is_completed() {
            return Err(GenerateCodeError::NotCompleted(cmd.conversation_id));
        }

        let mut record = match cmd.service_id {
            Some(id) => self
                .services
                .get(id)
                .await?
                .ok_or(GenerateCodeError::ServiceNotFound(id))?,
            None => ServiceRecord::from_answers(conversation.answers(), self.owner.clone())?,
        };

        let prompt = build_generation_prompt(&record, self.parser.markers());
        let raw = self.generate(&prompt).await.map_err(|e| {
            tracing::error!(
                conversation_id = %cmd.conversation_id,
                generator = self.generator.name(),
                error = %e,
                "Code generation failed"
            );
            e
        })?;

        let files = self.parser.parse(&raw);
        if files.is_empty() {
            tracing::warn!(
                conversation_id = %cmd.conversation_id,
                chars = raw.len(),
                "Generated output contained no file blocks"
            );
            return Err(GenerateCodeError::NoFiles);
        }
        if let Some(name) = CodeArtifactSet::find_unsafe_filename(&files) {
            tracing::warn!(
                conversation_id = %cmd.conversation_id,
                filename = name,
                "Generated output named a file outside its artifact directory"
            );
            return Err(GenerateCodeError::UnsafeFilename(name.to_string()));
        }

        let artifact = CodeArtifactSet::new(record.id, files);
        for (filename, content) in &artifact.files {
            let key = blob_key(record.id, artifact.id, filename);
            self.blobs.put(&key, content.clone().into_bytes()).await?;
        }

        let manifest = artifact.manifest(Some(cmd.conversation_id));
        self.artifacts.save(&manifest).await?;

        record.mark_code_generated();
        self.services.put(&record).await?;

        tracing::info!(
            conversation_id = %cmd.conversation_id,
            service_id = %record.id,
            artifact_id = %artifact.id,
            file_count = manifest.file_count,
            total_lines = manifest.total_lines,
            "Code generated"
        );

        Ok(GenerateCodeResult {
            artifact_id: artifact.id,
            service_id: record.id,
            conversation_id: cmd.conversation_id,
            files: artifact.files,
            total_lines: manifest.total_lines,
        })
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        match tokio::time::timeout(self.timeout, self.generator.generate(prompt)).await {
            Ok(result) => result,
            Err(_) => Err(GenerationError::Timeout {
                secs: self.timeout.as_secs(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockTextGenerator;
    use crate::adapters::storage::{InMemoryBlobStore, InMemoryRecordStore};
    use crate::domain::conversation::Conversation;
    use crate::domain::questionnaire::QuestionCatalog;
    use crate::domain::service::ServiceStatus;

    struct Fixture {
        store: InMemoryRecordStore,
        blobs: InMemoryBlobStore,
        generator: MockTextGenerator,
    }

    impl Fixture {
        fn new(generator: MockTextGenerator) -> Self {
            Self {
                store: InMemoryRecordStore::new(),
                blobs: InMemoryBlobStore::new(),
                generator,
            }
        }

        fn handler(&self, timeout: Duration) -> GenerateCodeHandler {
            GenerateCodeHandler::new(
                Arc::new(self.store.clone()),
                Arc::new(self.store.clone()),
                Arc::new(self.store.clone()),
                Arc::new(self.blobs.clone()),
                Arc::new(self.generator.clone()),
                CodeBlockParser::default(),
                OwnerId::anonymous(),
                timeout,
            )
        }

        async fn conversation(&self, complete: bool) -> ConversationId {
            let catalog = QuestionCatalog::standard();
            let mut conv = Conversation::start();
            let answers = [
                "vFirewall",
                "Fortinet",
                "Hybrid Cloud",
                "Traffic Filtering,VPN Support",
                "99.9% (Standard)",
                "Small (1-10 instances)",
                "SIEM",
            ];
            let count = if complete { answers.len() } else { 3 };
            for answer in &answers[..count] {
                conv.advance(&catalog, *answer).unwrap();
            }
            ConversationRepository::save(&self.store, &conv).await.unwrap();
            conv.id()
        }
    }

    fn cmd(conversation_id: ConversationId) -> GenerateCodeCommand {
        GenerateCodeCommand {
            conversation_id,
            service_id: None,
        }
    }

    #[tokio::test]
    async fn generates_and_persists_files_for_new_service() {
        let fixture = Fixture::new(MockTextGenerator::new().with_response(
            "Sure!\nbegin-block: app.py\nprint('hi')\n\nrun()\nend-block\nbegin-block: README.md\n# Readme\nend-block\n",
        ));
        let conversation_id = fixture.conversation(true).await;

        let result = fixture
            .handler(Duration::from_secs(5))
            .handle(cmd(conversation_id))
            .await
            .unwrap();

        assert_eq!(result.files.len(), 2);
        assert_eq!(result.files["app.py"], "print('hi')\n\nrun()");
        assert_eq!(result.total_lines, 4);

        let record = fixture.store.get(result.service_id).await.unwrap().unwrap();
        assert_eq!(record.status, ServiceStatus::CodeGenerated);
        assert_eq!(record.service_type, "vFirewall");
        assert_eq!(record.features, vec!["Traffic Filtering", "VPN Support"]);

        let key = blob_key(result.service_id, result.artifact_id, "README.md");
        assert_eq!(fixture.blobs.get(&key).await.unwrap(), Some(b"# Readme".to_vec()));

        let manifest = fixture
            .store
            .latest_for_service(result.service_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(manifest.artifact_id, result.artifact_id);
        assert_eq!(manifest.conversation_id, Some(conversation_id));

        let prompt = &fixture.generator.calls()[0];
        assert!(prompt.contains("Service Type: vFirewall"));
    }

    #[tokio::test]
    async fn incomplete_conversation_is_invalid_state() {
        let fixture = Fixture::new(MockTextGenerator::new());
        let conversation_id = fixture.conversation(false).await;

        let err = fixture
            .handler(Duration::from_secs(5))
            .handle(cmd(conversation_id))
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidState);
        assert_eq!(fixture.generator.call_count(), 0);
    }

    #[tokio::test]
    async fn unknown_conversation_and_service_are_not_found() {
        let fixture = Fixture::new(MockTextGenerator::new());
        let handler = fixture.handler(Duration::from_secs(5));

        let err = handler.handle(cmd(ConversationId::new())).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::ConversationNotFound);

        let conversation_id = fixture.conversation(true).await;
        let err = handler
            .handle(GenerateCodeCommand {
                conversation_id,
                service_id: Some(ServiceId::new()),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ServiceNotFound);
    }

    #[tokio::test]
    async fn existing_service_gets_a_second_artifact_set() {
        let fixture = Fixture::new(MockTextGenerator::new());
        let conversation_id = fixture.conversation(true).await;
        let handler = fixture.handler(Duration::from_secs(5));

        let first = handler.handle(cmd(conversation_id)).await.unwrap();
        let second = handler
            .handle(GenerateCodeCommand {
                conversation_id,
                service_id: Some(first.service_id),
            })
            .await
            .unwrap();

        assert_eq!(first.service_id, second.service_id);
        assert_ne!(first.artifact_id, second.artifact_id);
        assert_eq!(fixture.store.service_count().await, 1);
        assert_eq!(
            fixture.store.list_for_service(first.service_id).await.unwrap().len(),
            2
        );
    }

    #[tokio::test]
    async fn upstream_failures_keep_their_codes_and_store_nothing() {
        let cases = [
            (GenerationError::AuthenticationFailed, ErrorCode::UpstreamAuthError),
            (
                GenerationError::RateLimited { retry_after_secs: 9 },
                ErrorCode::UpstreamRateLimit,
            ),
            (GenerationError::upstream("503"), ErrorCode::UpstreamFailure),
        ];
        for (error, code) in cases {
            let fixture = Fixture::new(MockTextGenerator::new().with_error(error));
            let conversation_id = fixture.conversation(true).await;
            let err = fixture
                .handler(Duration::from_secs(5))
                .handle(cmd(conversation_id))
                .await
                .unwrap_err();
            assert_eq!(err.code(), code);
            assert_eq!(fixture.store.service_count().await, 0);
            assert!(fixture.blobs.is_empty().await);
        }
    }

    #[tokio::test]
    async fn slow_generator_times_out_as_upstream_failure() {
        let fixture = Fixture::new(MockTextGenerator::new().with_delay(Duration::from_millis(500)));
        let conversation_id = fixture.conversation(true).await;

        let err = fixture
            .handler(Duration::from_millis(20))
            .handle(cmd(conversation_id))
            .await
            .unwrap_err();
        assert!(matches!(err, GenerateCodeError::Generation(GenerationError::Timeout { .. })));
        assert_eq!(err.code(), ErrorCode::UpstreamFailure);
    }

    #[tokio::test]
    async fn output_without_blocks_is_rejected() {
        let fixture = Fixture::new(MockTextGenerator::new().with_response("I cannot do that."));
        let conversation_id = fixture.conversation(true).await;

        let err = fixture
            .handler(Duration::from_secs(5))
            .handle(cmd(conversation_id))
            .await
            .unwrap_err();
        assert!(matches!(err, GenerateCodeError::NoFiles));
        assert_eq!(fixture.store.service_count().await, 0);
    }

    struct FullDisk;

    #[async_trait::async_trait]
    impl BlobStore for FullDisk {
        async fn put(&self, _: &str, _: Vec<u8>) -> Result<(), StorageError> {
            Err(StorageError::Io("no space left on device".to_string()))
        }

        async fn get(&self, _: &str) -> Result<Option<Vec<u8>>, StorageError> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn traversing_filename_is_rejected_before_anything_is_stored() {
        let fixture = Fixture::new(MockTextGenerator::new().with_response(
            "begin-block: app.py\nprint()\nend-block\nbegin-block: ../config.yaml\nkey: 1\nend-block\n",
        ));
        let conversation_id = fixture.conversation(true).await;

        let err = fixture
            .handler(Duration::from_secs(5))
            .handle(cmd(conversation_id))
            .await
            .unwrap_err();
        assert!(matches!(&err, GenerateCodeError::UnsafeFilename(name) if name == "../config.yaml"));
        assert_eq!(err.code(), ErrorCode::UpstreamFailure);
        assert_eq!(fixture.store.service_count().await, 0);
        assert!(fixture.blobs.is_empty().await);
    }

    #[tokio::test]
    async fn blob_write_failure_leaves_no_service_record() {
        let fixture = Fixture::new(MockTextGenerator::new());
        let conversation_id = fixture.conversation(true).await;
        let handler = GenerateCodeHandler::new(
            Arc::new(fixture.store.clone()),
            Arc::new(fixture.store.clone()),
            Arc::new(fixture.store.clone()),
            Arc::new(FullDisk),
            Arc::new(fixture.generator.clone()),
            CodeBlockParser::default(),
            OwnerId::anonymous(),
            Duration::from_secs(5),
        );

        let err = handler.handle(cmd(conversation_id)).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::StorageFault);
        assert_eq!(fixture.store.service_count().await, 0);
        assert!(fixture
            .store
            .list_by_owner(&OwnerId::anonymous())
            .await
            .unwrap()
            .is_empty());
    }
}
