//! Conversation domain module.
//!
//! The questionnaire state machine: one answer per step until the
//! catalog is exhausted, then the conversation is completed and frozen.
//!
//! Concurrent `advance` calls on the same conversation are not serialized.
//! A conversation is expected to be driven by one caller at a time.

mod conversation;
mod state;

pub use conversation::{Conversation, StepOutcome, COMPLETION_NOTICE};
pub use state::{ConversationStatus, LogEntry, LogRole};
