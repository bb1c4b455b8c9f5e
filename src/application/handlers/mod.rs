//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod codegen;
pub mod conversation;
pub mod lifecycle;
pub mod service;

pub use codegen::{
    GenerateCodeCommand, GenerateCodeError, GenerateCodeHandler, GenerateCodeResult,
    GetArtifactsError, GetArtifactsHandler,
};
pub use conversation::{
    AdvanceCommand, AdvanceResult, ConversationEngine, ConversationError, StartConversationResult,
};
pub use lifecycle::{
    AgentContext, LifecycleAgent, LifecycleTestOrchestrator, OrchestrateCommand,
    OrchestrationError, OrchestratorConfig, TestRunReport,
};
pub use service::ListServicesHandler;
