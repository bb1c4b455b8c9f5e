//! Text generator adapters.
//!
//! - `AnthropicGenerator` - Anthropic Messages API
//! - `MockTextGenerator` - canned or scripted responses

mod anthropic_generator;
mod mock_generator;

pub use anthropic_generator::{AnthropicConfig, AnthropicGenerator};
pub use mock_generator::MockTextGenerator;
