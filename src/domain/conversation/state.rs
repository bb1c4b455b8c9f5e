//! Conversation status and message log types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a questionnaire conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStatus {
    /// Questions remain to be answered.
    Active,
    /// Every question answered. Read-only from here on.
    Completed,
}

impl ConversationStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for ConversationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// Who produced a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogRole {
    User,
    System,
}

/// One entry of a conversation's message log, tagged with the step it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub role: LogRole,
    pub content: String,
    pub step: usize,
}

impl LogEntry {
    pub fn user(content: impl Into<String>, step: usize) -> Self {
        Self {
            role: LogRole::User,
            content: content.into(),
            step,
        }
    }

    pub fn system(content: impl Into<String>, step: usize) -> Self {
        Self {
            role: LogRole::System,
            content: content.into(),
            step,
        }
    }
}
