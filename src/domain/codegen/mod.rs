//! Code generation domain module.
//!
//! Prompt construction, parsing of generated text into files, and the
//! artifact types that describe persisted output.

mod artifact;
mod parser;
mod prompt;

pub use artifact::{blob_key, is_contained_path, ArtifactManifest, CodeArtifactSet};
pub use parser::{BlockMarkers, CodeBlockParser};
pub use prompt::{build_generation_prompt, EXPECTED_FILES};
