//! Test run request values and the persisted run.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{AgentName, AgentResult, TestSummary};
use crate::domain::foundation::{ServiceId, TestRunId, Timestamp, ValidationError};

/// Which lifecycle stages to exercise per service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestType {
    FullCycle,
    Deploy,
    Modify,
    Delete,
}

impl TestType {
    const ALLOWED: [&'static str; 4] = ["full_cycle", "deploy", "modify", "delete"];

    /// Agents to run for each service, in execution order.
    pub fn agents(&self) -> &'static [AgentName] {
        match self {
            Self::FullCycle => &[AgentName::Deployment, AgentName::Modification, AgentName::Deletion],
            Self::Deploy => &[AgentName::Deployment],
            Self::Modify => &[AgentName::Modification],
            Self::Delete => &[AgentName::Deletion],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullCycle => "full_cycle",
            Self::Deploy => "deploy",
            Self::Modify => "modify",
            Self::Delete => "delete",
        }
    }
}

impl Default for TestType {
    fn default() -> Self {
        Self::FullCycle
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TestType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "full_cycle" => Ok(Self::FullCycle),
            "deploy" => Ok(Self::Deploy),
            "modify" => Ok(Self::Modify),
            "delete" => Ok(Self::Delete),
            other => Err(ValidationError::not_allowed("test_type", &Self::ALLOWED, other)),
        }
    }
}

/// Which services a run covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestTarget {
    All,
    Service(ServiceId),
}

impl TestTarget {
    pub fn matches(&self, id: ServiceId) -> bool {
        match self {
            Self::All => true,
            Self::Service(target) => *target == id,
        }
    }
}

impl Default for TestTarget {
    fn default() -> Self {
        Self::All
    }
}

impl fmt::Display for TestTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Service(id) => write!(f, "{}", id),
        }
    }
}

impl FromStr for TestTarget {
    type Err = ValidationError;

    /// Accepts "all" or a service id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ValidationError::empty_field("target"));
        }
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse::<ServiceId>()
            .map(Self::Service)
            .map_err(|_| ValidationError::invalid_format("target", "expected \"all\" or a service id"))
    }
}

/// A completed, persisted lifecycle test run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestRun {
    pub id: TestRunId,
    pub test_type: TestType,
    pub target: TestTarget,
    pub results: Vec<AgentResult>,
    pub summary: TestSummary,
    pub created_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_cycle_runs_three_agents_in_fixed_order() {
        assert_eq!(
            TestType::FullCycle.agents(),
            &[AgentName::Deployment, AgentName::Modification, AgentName::Deletion]
        );
        assert_eq!(TestType::Modify.agents(), &[AgentName::Modification]);
    }

    #[test]
    fn test_type_parses_known_values() {
        assert_eq!("deploy".parse::<TestType>().unwrap(), TestType::Deploy);
        assert_eq!("full_cycle".parse::<TestType>().unwrap(), TestType::FullCycle);
    }

    #[test]
    fn unknown_test_type_is_a_validation_error() {
        let err = "explode".parse::<TestType>().unwrap_err();
        assert!(matches!(err, ValidationError::NotAllowed { .. }));
    }

    #[test]
    fn target_parses_all_and_ids() {
        assert_eq!("all".parse::<TestTarget>().unwrap(), TestTarget::All);
        let id = ServiceId::new();
        assert_eq!(id.to_string().parse::<TestTarget>().unwrap(), TestTarget::Service(id));
        assert!(TestTarget::Service(id).matches(id));
        assert!(!TestTarget::Service(id).matches(ServiceId::new()));
    }

    #[test]
    fn target_rejects_empty_and_garbage() {
        assert!(matches!(
            "".parse::<TestTarget>(),
            Err(ValidationError::EmptyField { .. })
        ));
        assert!(matches!(
            "everything".parse::<TestTarget>(),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }
}
