//! Lifecycle test handlers - simulated deploy/modify/delete checks.

mod agents;
mod orchestrator;

pub use agents::{discover, AgentContext, LifecycleAgent};
pub use orchestrator::{
    LifecycleTestOrchestrator, OrchestrateCommand, OrchestrationError, OrchestratorConfig,
    TestRunReport,
};
