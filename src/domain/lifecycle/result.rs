//! Agent results recorded during a lifecycle test run.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{ArtifactId, ServiceId, TestRunId};
use crate::domain::service::ServiceSummary;

use super::TestSummary;

/// Which checker produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentName {
    Discovery,
    Deployment,
    Modification,
    Deletion,
    Orchestrator,
}

impl fmt::Display for AgentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Discovery => "discovery",
            Self::Deployment => "deployment",
            Self::Modification => "modification",
            Self::Deletion => "deletion",
            Self::Orchestrator => "orchestrator",
        };
        write!(f, "{}", s)
    }
}

/// Outcome of one agent call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    Running,
    Completed,
    Skipped,
    Failed,
}

/// Structured fields attached to a result, one variant per producer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AgentDetails {
    None,
    Discovery {
        services_found: usize,
        services: Vec<ServiceSummary>,
    },
    Deployment {
        deployment_time: String,
        endpoints_validated: u32,
        health_check: String,
        artifact_id: ArtifactId,
    },
    Modification {
        modifications_tested: usize,
        modifications: Vec<String>,
        rollback_tested: bool,
    },
    Deletion {
        resources_removed: u32,
        orphaned_resources: u32,
        cleanup_time: String,
    },
    Error {
        error: String,
    },
    Summary {
        test_run_id: TestRunId,
        summary: TestSummary,
    },
}

/// One entry of a test run's ordered result log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentResult {
    pub agent: AgentName,
    pub status: AgentStatus,
    /// None for orchestrator and discovery entries.
    pub service_id: Option<ServiceId>,
    pub details: AgentDetails,
    pub message: String,
}

impl AgentResult {
    pub fn new(
        agent: AgentName,
        status: AgentStatus,
        service_id: Option<ServiceId>,
        details: AgentDetails,
        message: impl Into<String>,
    ) -> Self {
        Self {
            agent,
            status,
            service_id,
            details,
            message: message.into(),
        }
    }

    /// A failed result carrying the error text, scoped to one service if given.
    pub fn failed(agent: AgentName, service_id: Option<ServiceId>, error: impl Into<String>) -> Self {
        let error = error.into();
        Self::new(
            agent,
            AgentStatus::Failed,
            service_id,
            AgentDetails::Error { error: error.clone() },
            format!("{} agent failed: {}", agent, error),
        )
    }

    /// An orchestrator-level marker with no service attached.
    pub fn orchestrator(status: AgentStatus, details: AgentDetails, message: impl Into<String>) -> Self {
        Self::new(AgentName::Orchestrator, status, None, details, message)
    }

    pub fn is_failed(&self) -> bool {
        self.status == AgentStatus::Failed
    }
}
