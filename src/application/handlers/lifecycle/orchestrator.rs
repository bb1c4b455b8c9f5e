//! LifecycleTestOrchestrator - runs discovery, then the per-service agents,
//! and aggregates the outcome into a persisted test run.

use futures::future::join_all;
use futures::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use super::agents::{discover, AgentContext, LifecycleAgent};
use crate::domain::foundation::{ErrorCode, TestRunId, Timestamp, ValidationError};
use crate::domain::lifecycle::{
    AgentDetails, AgentName, AgentResult, AgentStatus, TestRun, TestSummary, TestTarget,
    TestType,
};
use crate::domain::service::ServiceRecord;
use crate::ports::{StorageError, TestRunRepository};

/// Bounds applied to every run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrchestratorConfig {
    /// Most services tested in one "all" run.
    pub max_services: usize,
    /// Cap on a single agent call.
    pub agent_timeout: Duration,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            max_services: 5,
            agent_timeout: Duration::from_secs(30),
        }
    }
}

/// Unparsed request, as received from a caller.
#[derive(Debug, Clone)]
pub struct OrchestrateCommand {
    pub test_type: String,
    pub target: String,
}

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct TestRunReport {
    /// Set only when the run reached its final summary.
    pub test_run_id: Option<TestRunId>,
    pub test_type: TestType,
    pub target: TestTarget,
    pub results: Vec<AgentResult>,
    pub summary: TestSummary,
}

#[derive(Debug, Clone, Error)]
pub enum OrchestrationError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Test run not found: {0}")]
    TestRunNotFound(TestRunId),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl OrchestrationError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(_) => ErrorCode::ValidationFailed,
            Self::TestRunNotFound(_) => ErrorCode::TestRunNotFound,
            Self::Storage(_) => ErrorCode::StorageFault,
        }
    }
}

/// Composes the lifecycle agents into a bounded, failure-isolated workflow.
///
/// Services are tested concurrently; the agents for one service run in
/// their fixed order. Only a failed discovery stops a run early.
pub struct LifecycleTestOrchestrator {
    ctx: AgentContext,
    runs: Arc<dyn TestRunRepository>,
    config: OrchestratorConfig,
}

impl LifecycleTestOrchestrator {
    pub fn new(ctx: AgentContext, runs: Arc<dyn TestRunRepository>, config: OrchestratorConfig) -> Self {
        Self { ctx, runs, config }
    }

    /// Validates the raw request, then runs it.
    pub async fn handle(&self, cmd: OrchestrateCommand) -> Result<TestRunReport, OrchestrationError> {
        let test_type: TestType = cmd.test_type.parse()?;
        let target: TestTarget = cmd.target.parse()?;
        Ok(self.orchestrate(test_type, target).await)
    }

    pub async fn orchestrate(&self, test_type: TestType, target: TestTarget) -> TestRunReport {
        tracing::info!(test_type = %test_type, target = %target, "Lifecycle test run starting");

        let mut results = vec![AgentResult::orchestrator(
            AgentStatus::Running,
            AgentDetails::None,
            "Starting multi-agent service testing workflow...",
        )];
        let unfinished = |results: Vec<AgentResult>| TestRunReport {
            test_run_id: None,
            test_type,
            target,
            results,
            summary: TestSummary::default(),
        };

        let (discovery, services) = match self.guard(discover(&self.ctx)).await {
            Ok(found) => found,
            Err(reason) => (
                AgentResult::failed(AgentName::Discovery, None, reason),
                Vec::new(),
            ),
        };
        let discovery_failed = discovery.is_failed();
        results.push(discovery);

        if discovery_failed {
            tracing::warn!(test_type = %test_type, "Discovery failed, aborting test run");
            return unfinished(results);
        }

        if services.is_empty() {
            results.push(AgentResult::orchestrator(
                AgentStatus::Completed,
                AgentDetails::None,
                "No services found to test",
            ));
            return unfinished(results);
        }

        let selected = self.select(services, target);
        let stages: Vec<LifecycleAgent> = test_type
            .agents()
            .iter()
            .filter_map(|name| LifecycleAgent::for_stage(*name))
            .collect();

        let per_service = join_all(
            selected
                .iter()
                .map(|service| self.run_service(service, &stages)),
        )
        .await;

        let mut summary = TestSummary {
            services_tested: selected.len(),
            ..TestSummary::default()
        };
        for result in per_service.into_iter().flatten() {
            summary.record(result.status);
            results.push(result);
        }

        let test_run_id = TestRunId::new();
        results.push(AgentResult::orchestrator(
            AgentStatus::Completed,
            AgentDetails::Summary {
                test_run_id,
                summary,
            },
            summary_message(&summary),
        ));

        let run = TestRun {
            id: test_run_id,
            test_type,
            target,
            results,
            summary,
            created_at: Timestamp::now(),
        };
        if let Err(e) = self.runs.save(&run).await {
            tracing::warn!(test_run_id = %test_run_id, error = %e, "Failed to store test results");
        }

        tracing::info!(
            test_run_id = %test_run_id,
            services_tested = summary.services_tested,
            total_tests = summary.total_tests,
            passed = summary.passed,
            failed = summary.failed,
            success_rate = summary.success_rate,
            "Lifecycle test run completed"
        );

        TestRunReport {
            test_run_id: Some(test_run_id),
            test_type,
            target,
            results: run.results,
            summary,
        }
    }

    /// Returns a persisted run.
    pub async fn find_run(&self, id: TestRunId) -> Result<TestRun, OrchestrationError> {
        self.runs
            .find(id)
            .await?
            .ok_or(OrchestrationError::TestRunNotFound(id))
    }

    fn select(&self, services: Vec<ServiceRecord>, target: TestTarget) -> Vec<ServiceRecord> {
        let limit = match target {
            TestTarget::All => self.config.max_services,
            TestTarget::Service(_) => 1,
        };
        services
            .into_iter()
            .filter(|s| target.matches(s.id))
            .take(limit)
            .collect()
    }

    async fn run_service(&self, service: &ServiceRecord, stages: &[LifecycleAgent]) -> Vec<AgentResult> {
        let mut results = Vec::with_capacity(stages.len());
        for agent in stages {
            let result = match self.guard(agent.run(&self.ctx, service)).await {
                Ok(result) => result,
                Err(reason) => AgentResult::failed(agent.name(), Some(service.id), reason),
            };
            if result.is_failed() {
                tracing::warn!(
                    service_id = %service.id,
                    agent = %agent.name(),
                    message = %result.message,
                    "Lifecycle agent failed"
                );
            }
            results.push(result);
        }
        results
    }

    /// Runs one agent call under the time cap, turning a timeout or a
    /// panic into an error message.
    async fn guard<F, T>(&self, call: F) -> Result<T, String>
    where
        F: Future<Output = T>,
    {
        let limit = self.config.agent_timeout;
        match tokio::time::timeout(limit, AssertUnwindSafe(call).catch_unwind()).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(_)) => Err("agent panicked".to_string()),
            Err(_) => Err(format!("timed out after {:?}", limit)),
        }
    }
}

fn summary_message(summary: &TestSummary) -> String {
    format!(
        "Testing complete!\n\nSummary:\n- Services tested: {}\n- Total tests: {}\n- Passed: {}\n- Failed: {}\n- Success rate: {}%",
        summary.services_tested,
        summary.total_tests,
        summary.passed,
        summary.failed,
        summary.success_rate
    )
}
