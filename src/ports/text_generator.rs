//! TextGenerator port - the external code-generation collaborator.
//!
//! The core sends one prompt and receives one raw text blob. Retries are
//! never attempted here; callers surface each failure mode to the user.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Produces raw text from a prompt.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;

    /// Name used in logs, e.g. "anthropic" or "mock".
    fn name(&self) -> &str;
}

/// Failure modes of the text-generation collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// API key missing or rejected.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Provider throttled the request.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    /// Any other provider, network or response fault.
    #[error("upstream failure: {0}")]
    Upstream(String),

    /// No response within the execution cap.
    #[error("generation timed out after {secs}s")]
    Timeout { secs: u64 },
}

impl GenerationError {
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream(message.into())
    }

    /// The user-facing code for this failure.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::AuthenticationFailed => ErrorCode::UpstreamAuthError,
            Self::RateLimited { .. } => ErrorCode::UpstreamRateLimit,
            Self::Upstream(_) | Self::Timeout { .. } => ErrorCode::UpstreamFailure,
        }
    }
}

impl From<GenerationError> for DomainError {
    fn from(err: GenerationError) -> Self {
        let domain = DomainError::new(err.code(), err.to_string());
        match err {
            GenerationError::RateLimited { retry_after_secs } => {
                domain.with_detail("retry_after_secs", retry_after_secs.to_string())
            }
            _ => domain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_failure_mode_has_distinct_code() {
        assert_eq!(GenerationError::AuthenticationFailed.code(), ErrorCode::UpstreamAuthError);
        assert_eq!(
            GenerationError::RateLimited { retry_after_secs: 30 }.code(),
            ErrorCode::UpstreamRateLimit
        );
        assert_eq!(GenerationError::upstream("boom").code(), ErrorCode::UpstreamFailure);
        assert_eq!(GenerationError::Timeout { secs: 5 }.code(), ErrorCode::UpstreamFailure);
    }

    #[test]
    fn rate_limit_keeps_retry_hint_in_details() {
        let err: DomainError = GenerationError::RateLimited { retry_after_secs: 42 }.into();
        assert_eq!(err.details.get("retry_after_secs"), Some(&"42".to_string()));
    }
}
