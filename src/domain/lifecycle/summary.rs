//! Pass/fail tally for a test run.

use serde::{Deserialize, Serialize};

use super::AgentStatus;

/// Aggregated counters. `success_rate` is always derived from
/// `total_tests` and `passed`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestSummary {
    pub services_tested: usize,
    pub total_tests: usize,
    pub passed: usize,
    pub failed: usize,
    pub success_rate: u32,
}

impl TestSummary {
    /// Counts one agent call. Skipped calls count toward the total only.
    pub fn record(&mut self, status: AgentStatus) {
        self.total_tests += 1;
        match status {
            AgentStatus::Completed => self.passed += 1,
            AgentStatus::Failed => self.failed += 1,
            AgentStatus::Skipped | AgentStatus::Running => {}
        }
        self.success_rate = success_rate(self.passed, self.total_tests);
    }

    /// Number of calls that neither passed nor failed.
    pub fn skipped(&self) -> usize {
        self.total_tests - self.passed - self.failed
    }
}

/// round(passed / total * 100), or 0 when nothing ran.
pub fn success_rate(passed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (passed as f64 / total as f64 * 100.0).round() as u32
}
