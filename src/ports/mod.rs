//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Record Ports
//!
//! - `ConversationRepository` - questionnaire conversations
//! - `ServiceRepository` - service records with owner-scoped listing
//! - `ArtifactRepository` - manifests of generated code
//! - `TestRunRepository` - persisted lifecycle test runs
//!
//! ## Collaborator Ports
//!
//! - `BlobStore` - opaque key to bytes storage for file bodies
//! - `TextGenerator` - the external code-generation call

mod artifact_repository;
mod blob_store;
mod conversation_repository;
mod service_repository;
mod storage_error;
mod test_run_repository;
mod text_generator;

pub use artifact_repository::ArtifactRepository;
pub use blob_store::BlobStore;
pub use conversation_repository::ConversationRepository;
pub use service_repository::ServiceRepository;
pub use storage_error::StorageError;
pub use test_run_repository::TestRunRepository;
pub use text_generator::{GenerationError, TextGenerator};
