//! Lifecycle test module.
//!
//! Values produced by the simulated deploy/modify/delete checks and the
//! run that aggregates them.

mod result;
mod summary;
mod test_run;

pub use result::{AgentDetails, AgentName, AgentResult, AgentStatus};
pub use summary::{success_rate, TestSummary};
pub use test_run::{TestRun, TestTarget, TestType};
