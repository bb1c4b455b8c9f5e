//! ConversationRepository port.

use async_trait::async_trait;

use super::StorageError;
use crate::domain::conversation::Conversation;
use crate::domain::foundation::ConversationId;

/// Persistence for questionnaire conversations.
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Insert or replace a conversation.
    async fn save(&self, conversation: &Conversation) -> Result<(), StorageError>;

    /// Returns `Ok(None)` if not found.
    async fn find(&self, id: ConversationId) -> Result<Option<Conversation>, StorageError>;
}
