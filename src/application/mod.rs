//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    AdvanceCommand, AdvanceResult, AgentContext, ConversationEngine, ConversationError,
    GenerateCodeCommand, GenerateCodeError, GenerateCodeHandler, GenerateCodeResult,
    GetArtifactsError, GetArtifactsHandler, LifecycleAgent, LifecycleTestOrchestrator,
    ListServicesHandler, OrchestrateCommand, OrchestrationError, OrchestratorConfig,
    StartConversationResult, TestRunReport,
};
