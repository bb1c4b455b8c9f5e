//! Code generation handlers.

mod generate_code;
mod get_artifacts;

pub use generate_code::{GenerateCodeCommand, GenerateCodeError, GenerateCodeHandler, GenerateCodeResult};
pub use get_artifacts::{GetArtifactsError, GetArtifactsHandler};
