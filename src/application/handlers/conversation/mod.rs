//! Conversation handlers - the questionnaire engine.

mod engine;

pub use engine::{
    AdvanceCommand, AdvanceResult, ConversationEngine, ConversationError, StartConversationResult,
};
