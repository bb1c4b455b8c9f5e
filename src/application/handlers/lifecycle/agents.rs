//! Service discovery and the three per-service lifecycle checkers.
//!
//! Every check is simulated. Agents never return errors: any fault while
//! checking becomes a `failed` result scoped to that one call.

use std::sync::Arc;

use crate::domain::foundation::OwnerId;
use crate::domain::lifecycle::{AgentDetails, AgentName, AgentResult, AgentStatus};
use crate::domain::service::ServiceRecord;
use crate::ports::{ArtifactRepository, ServiceRepository};

const DEPLOYMENT_TIME: &str = "45s";
const ENDPOINTS_VALIDATED: u32 = 12;
const MODIFICATION_CHECKS: [&str; 3] = [
    "Scale: 5→10 instances",
    "Config: Firewall rules +3",
    "API rate limit: 100→200 req/s",
];
const RESOURCES_REMOVED: u32 = 15;
const CLEANUP_TIME: &str = "8s";

/// Collaborators the agents read from.
#[derive(Clone)]
pub struct AgentContext {
    pub services: Arc<dyn ServiceRepository>,
    pub artifacts: Arc<dyn ArtifactRepository>,
    /// Principal whose services discovery enumerates.
    pub owner: OwnerId,
}

/// A checker run against one service. Discovery is not one of these; it
/// runs once per test run through [`discover`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleAgent {
    Deployment,
    Modification,
    Deletion,
}

impl LifecycleAgent {
    pub fn name(&self) -> AgentName {
        match self {
            Self::Deployment => AgentName::Deployment,
            Self::Modification => AgentName::Modification,
            Self::Deletion => AgentName::Deletion,
        }
    }

    /// The per-service agent for a stage name, if it is one.
    pub fn for_stage(name: AgentName) -> Option<Self> {
        match name {
            AgentName::Deployment => Some(Self::Deployment),
            AgentName::Modification => Some(Self::Modification),
            AgentName::Deletion => Some(Self::Deletion),
            AgentName::Discovery | AgentName::Orchestrator => None,
        }
    }

    pub async fn run(&self, ctx: &AgentContext, service: &ServiceRecord) -> AgentResult {
        match self {
            Self::Deployment => deploy(ctx, service).await,
            Self::Modification => modify(ctx, service).await,
            Self::Deletion => delete(ctx, service).await,
        }
    }
}

/// Lists the owner's services. Returns the result plus the records found.
pub async fn discover(ctx: &AgentContext) -> (AgentResult, Vec<ServiceRecord>) {
    match ctx.services.list_by_owner(&ctx.owner).await {
        Ok(services) => {
            let summaries = services.iter().map(ServiceRecord::summary).collect();
            let result = AgentResult::new(
                AgentName::Discovery,
                AgentStatus::Completed,
                None,
                AgentDetails::Discovery {
                    services_found: services.len(),
                    services: summaries,
                },
                format!("Found {} services ready for testing", services.len()),
            );
            (result, services)
        }
        Err(e) => {
            tracing::warn!(owner = %ctx.owner, error = %e, "Service discovery failed");
            let mut result = AgentResult::failed(AgentName::Discovery, None, e.to_string());
            result.message = format!("Discovery failed: {}", e);
            (result, Vec::new())
        }
    }
}

async fn deploy(ctx: &AgentContext, service: &ServiceRecord) -> AgentResult {
    let manifest = match ctx.artifacts.latest_for_service(service.id).await {
        Ok(Some(manifest)) => manifest,
        Ok(None) => {
            return AgentResult::new(
                AgentName::Deployment,
                AgentStatus::Skipped,
                Some(service.id),
                AgentDetails::None,
                format!("No generated code found for {}", service.label()),
            )
        }
        Err(e) => return AgentResult::failed(AgentName::Deployment, Some(service.id), e.to_string()),
    };

    AgentResult::new(
        AgentName::Deployment,
        AgentStatus::Completed,
        Some(service.id),
        AgentDetails::Deployment {
            deployment_time: DEPLOYMENT_TIME.to_string(),
            endpoints_validated: ENDPOINTS_VALIDATED,
            health_check: "passed".to_string(),
            artifact_id: manifest.artifact_id,
        },
        format!(
            "Deployment test passed for {}\n- Time: {}\n- Endpoints: {}/{} validated\n- Health check: passed",
            service.service_type, DEPLOYMENT_TIME, ENDPOINTS_VALIDATED, ENDPOINTS_VALIDATED
        ),
    )
}

/// Confirms the record still exists before simulating a stage against it.
async fn still_exists(ctx: &AgentContext, agent: AgentName, service: &ServiceRecord) -> Option<AgentResult> {
    match ctx.services.get(service.id).await {
        Ok(Some(_)) => None,
        Ok(None) => Some(AgentResult::failed(
            agent,
            Some(service.id),
            format!("service {} no longer exists", service.label()),
        )),
        Err(e) => Some(AgentResult::failed(agent, Some(service.id), e.to_string())),
    }
}

async fn modify(ctx: &AgentContext, service: &ServiceRecord) -> AgentResult {
    if let Some(failed) = still_exists(ctx, AgentName::Modification, service).await {
        return failed;
    }

    let checks: Vec<String> = MODIFICATION_CHECKS.iter().map(|c| c.to_string()).collect();
    let bullets = checks
        .iter()
        .map(|c| format!("- {}", c))
        .collect::<Vec<_>>()
        .join("\n");

    AgentResult::new(
        AgentName::Modification,
        AgentStatus::Completed,
        Some(service.id),
        AgentDetails::Modification {
            modifications_tested: checks.len(),
            modifications: checks,
            rollback_tested: true,
        },
        format!(
            "Modification test passed for {}\n{}\n- Rollback test: successful",
            service.service_type, bullets
        ),
    )
}

async fn delete(ctx: &AgentContext, service: &ServiceRecord) -> AgentResult {
    if let Some(failed) = still_exists(ctx, AgentName::Deletion, service).await {
        return failed;
    }

    AgentResult::new(
        AgentName::Deletion,
        AgentStatus::Completed,
        Some(service.id),
        AgentDetails::Deletion {
            resources_removed: RESOURCES_REMOVED,
            orphaned_resources: 0,
            cleanup_time: CLEANUP_TIME.to_string(),
        },
        format!(
            "Deletion test passed for {}\n- Resources removed: {}/{}\n- Orphaned resources: 0\n- Database cleanup: verified\n- Time: {}",
            service.service_type, RESOURCES_REMOVED, RESOURCES_REMOVED, CLEANUP_TIME
        ),
    )
}
