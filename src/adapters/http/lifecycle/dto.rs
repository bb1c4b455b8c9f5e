//! Request and response bodies for lifecycle test endpoints.

use serde::{Deserialize, Serialize};

use crate::application::TestRunReport;
use crate::domain::lifecycle::{AgentResult, TestRun, TestSummary};

// ════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════

fn default_test_type() -> String {
    "full_cycle".to_string()
}

fn default_target() -> String {
    "all".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct TestRequest {
    #[serde(default = "default_test_type")]
    pub test_type: String,
    /// "all" or a service id.
    #[serde(default = "default_target", alias = "service_id")]
    pub target: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestRunResponse {
    pub test_run_id: Option<String>,
    pub test_type: String,
    pub target: String,
    pub results: Vec<AgentResult>,
    pub summary: TestSummary,
}

impl From<TestRunReport> for TestRunResponse {
    fn from(report: TestRunReport) -> Self {
        Self {
            test_run_id: report.test_run_id.map(|id| id.to_string()),
            test_type: report.test_type.to_string(),
            target: report.target.to_string(),
            results: report.results,
            summary: report.summary,
        }
    }
}

impl From<TestRun> for TestRunResponse {
    fn from(run: TestRun) -> Self {
        Self {
            test_run_id: Some(run.id.to_string()),
            test_type: run.test_type.to_string(),
            target: run.target.to_string(),
            results: run.results,
            summary: run.summary,
        }
    }
}
