//! Mock text generator for tests and offline runs.
//!
//! Provides a configurable implementation of the TextGenerator port,
//! allowing the service to run without calling a real API.
//!
//! # Features
//!
//! - Pre-configured responses, consumed in order
//! - Simulated delays for timeout testing
//! - Error injection
//! - Call tracking for verification
//!
//! When the queue is empty it answers with a canned set of stub files
//! wrapped in the default block markers.
//!
//! # Example
//!
//! ```ignore
//! let generator = MockTextGenerator::new()
//!     .with_response("begin-block: app.py\nprint()\nend-block")
//!     .with_delay(Duration::from_millis(100));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::codegen::{BlockMarkers, EXPECTED_FILES};
use crate::ports::{GenerationError, TextGenerator};

/// Mock text generator.
#[derive(Debug, Clone, Default)]
pub struct MockTextGenerator {
    responses: Arc<Mutex<VecDeque<Result<String, GenerationError>>>>,
    delay: Duration,
    calls: Arc<Mutex<Vec<String>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockTextGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        lock(&self.responses).push_back(Ok(content.into()));
        self
    }

    /// Queues an error.
    pub fn with_error(self, error: GenerationError) -> Self {
        lock(&self.responses).push_back(Err(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Prompts received so far.
    pub fn calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }

    /// Stub output covering every expected file.
    pub fn canned_output() -> String {
        let markers = BlockMarkers::default();
        let mut out = String::from("Here is the generated service.\n\n");
        for (name, purpose) in EXPECTED_FILES {
            out.push_str(&format!(
                "{} {}\n# {}\n{}\n\n",
                markers.begin, name, purpose, markers.end
            ));
        }
        out
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        lock(&self.calls).push(prompt.to_string());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let next = lock(&self.responses).pop_front();
        next.unwrap_or_else(|| Ok(Self::canned_output()))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::codegen::CodeBlockParser;

    #[tokio::test]
    async fn returns_queued_responses_in_order() {
        let generator = MockTextGenerator::new()
            .with_response("first")
            .with_error(GenerationError::AuthenticationFailed);

        assert_eq!(generator.generate("p1").await.unwrap(), "first");
        assert_eq!(
            generator.generate("p2").await.unwrap_err(),
            GenerationError::AuthenticationFailed
        );
        assert_eq!(generator.calls(), vec!["p1", "p2"]);
    }

    #[tokio::test]
    async fn empty_queue_falls_back_to_canned_files() {
        let generator = MockTextGenerator::new();
        let output = generator.generate("anything").await.unwrap();
        let files = CodeBlockParser::default().parse(&output);
        assert_eq!(files.len(), EXPECTED_FILES.len());
        assert_eq!(files["README.md"], "# Setup and deployment guide");
        assert_eq!(generator.call_count(), 1);
    }
}
