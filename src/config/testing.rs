//! Lifecycle test configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct TestingConfig {
    /// Most services exercised by one "all" run
    #[serde(default = "default_max_services")]
    pub max_services: usize,

    /// Cap on one agent call, in seconds
    #[serde(default = "default_agent_timeout")]
    pub agent_timeout_secs: u64,
}

impl TestingConfig {
    pub fn agent_timeout(&self) -> Duration {
        Duration::from_secs(self.agent_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_services == 0 {
            return Err(ValidationError::InvalidMaxServices);
        }
        if self.agent_timeout_secs == 0 {
            return Err(ValidationError::InvalidAgentTimeout);
        }
        Ok(())
    }
}

impl Default for TestingConfig {
    fn default() -> Self {
        Self {
            max_services: default_max_services(),
            agent_timeout_secs: default_agent_timeout(),
        }
    }
}

fn default_max_services() -> usize {
    5
}

fn default_agent_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_testing_defaults() {
        let config = TestingConfig::default();
        assert_eq!(config.max_services, 5);
        assert_eq!(config.agent_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_zero_bounds_rejected() {
        let config = TestingConfig {
            max_services: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidMaxServices));

        let config = TestingConfig {
            agent_timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidAgentTimeout));
    }
}
