//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the service creator domain.

mod errors;
mod ids;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ArtifactId, ConversationId, OwnerId, ServiceId, TestRunId};
pub use timestamp::Timestamp;
