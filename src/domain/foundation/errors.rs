//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("Field '{field}' must be one of [{allowed}], got '{actual}'")]
    NotAllowed {
        field: String,
        allowed: String,
        actual: String,
    },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a not-allowed validation error listing the accepted values.
    pub fn not_allowed(field: impl Into<String>, allowed: &[&str], actual: impl Into<String>) -> Self {
        ValidationError::NotAllowed {
            field: field.into(),
            allowed: allowed.join(", "),
            actual: actual.into(),
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,

    // Not found errors
    ConversationNotFound,
    ServiceNotFound,
    ArtifactNotFound,
    TestRunNotFound,

    // State errors
    InvalidState,

    // Text-generation collaborator errors
    UpstreamAuthError,
    UpstreamRateLimit,
    UpstreamFailure,

    // Infrastructure errors
    StorageFault,
    InternalError,
}

impl ErrorCode {
    /// True for the not-found family.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ErrorCode::ConversationNotFound
                | ErrorCode::ServiceNotFound
                | ErrorCode::ArtifactNotFound
                | ErrorCode::TestRunNotFound
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::ConversationNotFound => "CONVERSATION_NOT_FOUND",
            ErrorCode::ServiceNotFound => "SERVICE_NOT_FOUND",
            ErrorCode::ArtifactNotFound => "ARTIFACT_NOT_FOUND",
            ErrorCode::TestRunNotFound => "TEST_RUN_NOT_FOUND",
            ErrorCode::InvalidState => "INVALID_STATE",
            ErrorCode::UpstreamAuthError => "UPSTREAM_AUTH_ERROR",
            ErrorCode::UpstreamRateLimit => "UPSTREAM_RATE_LIMIT",
            ErrorCode::UpstreamFailure => "UPSTREAM_FAILURE",
            ErrorCode::StorageFault => "STORAGE_FAULT",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates an invalid state error.
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidState, message)
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        DomainError::new(ErrorCode::ValidationFailed, err.to_string())
    }
}
