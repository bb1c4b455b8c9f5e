//! Shared handler state for the HTTP surface.

use std::sync::Arc;

use crate::application::{
    ConversationEngine, GenerateCodeHandler, GetArtifactsHandler, LifecycleTestOrchestrator,
    ListServicesHandler,
};

#[derive(Clone)]
pub struct AppState {
    pub conversations: Arc<ConversationEngine>,
    pub generate_code: Arc<GenerateCodeHandler>,
    pub get_artifacts: Arc<GetArtifactsHandler>,
    pub list_services: Arc<ListServicesHandler>,
    pub orchestrator: Arc<LifecycleTestOrchestrator>,
}
