//! ConversationEngine - drives the questionnaire one answer at a time.

use indexmap::IndexMap;
use std::sync::Arc;
use thiserror::Error;

use crate::domain::conversation::{Conversation, StepOutcome};
use crate::domain::foundation::{ConversationId, DomainError, ErrorCode};
use crate::domain::questionnaire::{Question, QuestionCatalog};
use crate::ports::{ConversationRepository, StorageError};

/// Errors surfaced by the conversation engine.
#[derive(Debug, Clone, Error)]
pub enum ConversationError {
    #[error("Conversation not found: {0}")]
    NotFound(ConversationId),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ConversationError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound(_) => ErrorCode::ConversationNotFound,
            Self::InvalidState(_) => ErrorCode::InvalidState,
            Self::Storage(_) => ErrorCode::StorageFault,
        }
    }
}

impl From<DomainError> for ConversationError {
    fn from(err: DomainError) -> Self {
        ConversationError::InvalidState(err.message)
    }
}

/// Command to record one answer.
#[derive(Debug, Clone)]
pub struct AdvanceCommand {
    pub conversation_id: ConversationId,
    pub answer: String,
}

/// Result of starting a conversation.
#[derive(Debug, Clone)]
pub struct StartConversationResult {
    pub conversation_id: ConversationId,
    pub question: Question,
    pub total_steps: usize,
}

/// Result of recording an answer.
#[derive(Debug, Clone)]
pub enum AdvanceResult {
    /// More questions remain.
    NextQuestion {
        conversation_id: ConversationId,
        question: Question,
        total_steps: usize,
    },
    /// The last answer was recorded.
    Completed {
        conversation_id: ConversationId,
        answers: IndexMap<String, String>,
    },
}

/// Owns questionnaire progress for every conversation.
///
/// Each `advance` is a load, mutate, save sequence with no locking. Two
/// callers advancing the same conversation at once may lose an answer.
pub struct ConversationEngine {
    repository: Arc<dyn ConversationRepository>,
    catalog: Arc<QuestionCatalog>,
}

impl ConversationEngine {
    pub fn new(repository: Arc<dyn ConversationRepository>, catalog: Arc<QuestionCatalog>) -> Self {
        Self { repository, catalog }
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    /// Creates a conversation at step 1 and returns the first question.
    pub async fn start(&self) -> Result<StartConversationResult, ConversationError> {
        let conversation = Conversation::start();
        self.repository.save(&conversation).await?;

        tracing::info!(conversation_id = %conversation.id(), "Conversation started");

        Ok(StartConversationResult {
            conversation_id: conversation.id(),
            question: self.catalog.first().clone(),
            total_steps: self.catalog.len(),
        })
    }

    /// Records an answer for the current step and returns what comes next.
    pub async fn advance(&self, cmd: AdvanceCommand) -> Result<AdvanceResult, ConversationError> {
        let mut conversation = self.load(cmd.conversation_id).await?;
        let answered_step = conversation.current_step();

        let outcome = conversation.advance(&self.catalog, cmd.answer)?;
        self.repository.save(&conversation).await?;

        tracing::debug!(
            conversation_id = %cmd.conversation_id,
            step = answered_step,
            "Answer recorded"
        );

        match outcome {
            StepOutcome::Next(step) => {
                let question = self.catalog.question(step).cloned().ok_or_else(|| {
                    ConversationError::InvalidState(format!("No question at step {}", step))
                })?;
                Ok(AdvanceResult::NextQuestion {
                    conversation_id: cmd.conversation_id,
                    question,
                    total_steps: self.catalog.len(),
                })
            }
            StepOutcome::Completed => {
                tracing::info!(
                    conversation_id = %cmd.conversation_id,
                    answers = conversation.answers().len(),
                    "Conversation completed"
                );
                Ok(AdvanceResult::Completed {
                    conversation_id: cmd.conversation_id,
                    answers: conversation.answers().clone(),
                })
            }
        }
    }

    /// Returns the stored conversation.
    pub async fn get(&self, id: ConversationId) -> Result<Conversation, ConversationError> {
        self.load(id).await
    }

    async fn load(&self, id: ConversationId) -> Result<Conversation, ConversationError> {
        self.repository
            .find(id)
            .await?
            .ok_or(ConversationError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryRecordStore;
    use crate::domain::conversation::ConversationStatus;
    use async_trait::async_trait;

    fn engine() -> ConversationEngine {
        ConversationEngine::new(Arc::new(InMemoryRecordStore::new()), QuestionCatalog::standard())
    }

    fn cmd(id: ConversationId, answer: &str) -> AdvanceCommand {
        AdvanceCommand {
            conversation_id: id,
            answer: answer.to_string(),
        }
    }

    #[tokio::test]
    async fn start_returns_first_question() {
        let engine = engine();
        let started = engine.start().await.unwrap();

        assert_eq!(started.question.step, 1);
        assert_eq!(started.question.field, "service_type");
        assert_eq!(started.total_steps, 7);

        let stored = engine.get(started.conversation_id).await.unwrap();
        assert_eq!(stored.status(), ConversationStatus::Active);
        assert_eq!(stored.current_step(), 1);
    }

    #[tokio::test]
    async fn advance_walks_every_question_then_completes() {
        let engine = engine();
        let id = engine.start().await.unwrap().conversation_id;

        for step in 2..=7 {
            match engine.advance(cmd(id, "answer")).await.unwrap() {
                AdvanceResult::NextQuestion { question, .. } => assert_eq!(question.step, step),
                other => panic!("Expected next question, got {:?}", other),
            }
            assert_eq!(engine.get(id).await.unwrap().status(), ConversationStatus::Active);
        }

        match engine.advance(cmd(id, "SIEM")).await.unwrap() {
            AdvanceResult::Completed { answers, .. } => {
                assert_eq!(answers.len(), 7);
                assert_eq!(answers.get("integration").map(String::as_str), Some("SIEM"));
            }
            other => panic!("Expected completion, got {:?}", other),
        }
        assert!(engine.get(id).await.unwrap().is_completed());
    }

    #[tokio::test]
    async fn advance_unknown_conversation_is_not_found() {
        let err = engine().advance(cmd(ConversationId::new(), "x")).await.unwrap_err();
        assert!(matches!(err, ConversationError::NotFound(_)));
        assert_eq!(err.code(), ErrorCode::ConversationNotFound);
    }

    #[tokio::test]
    async fn advance_completed_conversation_is_invalid_state() {
        let engine = engine();
        let id = engine.start().await.unwrap().conversation_id;
        for _ in 0..7 {
            engine.advance(cmd(id, "a")).await.unwrap();
        }

        let err = engine.advance(cmd(id, "again")).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidState);
    }

    struct BrokenRepository;

    #[async_trait]
    impl ConversationRepository for BrokenRepository {
        async fn save(&self, _: &Conversation) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disk detached".to_string()))
        }

        async fn find(&self, _: ConversationId) -> Result<Option<Conversation>, StorageError> {
            Err(StorageError::Unavailable("disk detached".to_string()))
        }
    }

    #[tokio::test]
    async fn storage_faults_surface_as_storage_errors() {
        let engine = ConversationEngine::new(Arc::new(BrokenRepository), QuestionCatalog::standard());
        let err = engine.start().await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::StorageFault);
    }
}
