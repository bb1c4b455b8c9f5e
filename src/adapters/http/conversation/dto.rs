//! Request and response bodies for conversation endpoints.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::application::GenerateCodeResult;
use crate::domain::conversation::{Conversation, ConversationStatus, LogEntry, COMPLETION_NOTICE};
use crate::domain::questionnaire::Question;

// ════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct AnswerRequest {
    pub answer: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub service_id: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionResponse {
    pub step: usize,
    pub total_steps: usize,
    pub prompt: String,
    pub field: String,
    pub options: Vec<String>,
    pub multi_select: bool,
}

impl QuestionResponse {
    pub fn new(question: Question, total_steps: usize) -> Self {
        Self {
            step: question.step,
            total_steps,
            prompt: question.prompt,
            field: question.field,
            options: question.options,
            multi_select: question.multi_select,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartConversationResponse {
    pub conversation_id: String,
    pub question: QuestionResponse,
}

/// Either the next question or the completion payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AdvanceResponse {
    Active {
        conversation_id: String,
        question: QuestionResponse,
    },
    Completed {
        conversation_id: String,
        answers: IndexMap<String, String>,
        message: String,
    },
}

impl AdvanceResponse {
    pub fn completed(conversation_id: String, answers: IndexMap<String, String>) -> Self {
        Self::Completed {
            conversation_id,
            answers,
            message: COMPLETION_NOTICE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationResponse {
    pub conversation_id: String,
    pub status: ConversationStatus,
    pub current_step: usize,
    pub total_steps: usize,
    pub answers: IndexMap<String, String>,
    pub message_log: Vec<LogEntry>,
    pub created_at: String,
    pub updated_at: String,
}

impl ConversationResponse {
    pub fn new(conversation: &Conversation, total_steps: usize) -> Self {
        Self {
            conversation_id: conversation.id().to_string(),
            status: conversation.status(),
            current_step: conversation.current_step(),
            total_steps,
            answers: conversation.answers().clone(),
            message_log: conversation.message_log().to_vec(),
            created_at: conversation.created_at().to_string(),
            updated_at: conversation.updated_at().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub conversation_id: String,
    pub service_id: String,
    pub artifact_id: String,
    pub files: IndexMap<String, String>,
    pub file_count: usize,
    pub total_lines: usize,
    pub message: String,
}

impl From<GenerateCodeResult> for GenerateResponse {
    fn from(result: GenerateCodeResult) -> Self {
        Self {
            conversation_id: result.conversation_id.to_string(),
            service_id: result.service_id.to_string(),
            artifact_id: result.artifact_id.to_string(),
            file_count: result.files.len(),
            files: result.files,
            total_lines: result.total_lines,
            message: "Code generated successfully!".to_string(),
        }
    }
}
