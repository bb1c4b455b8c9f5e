//! Anthropic text generator - calls the Messages API for code generation.
//!
//! # Configuration
//!
//! ```ignore
//! let config = AnthropicConfig::new(api_key)
//!     .with_model("claude-sonnet-4-20250514")
//!     .with_max_tokens(8000);
//!
//! let generator = AnthropicGenerator::new(config)?;
//! ```
//!
//! One request per prompt. Failures are classified and returned, never retried.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::{GenerationError, TextGenerator};

/// Anthropic API version header value.
const ANTHROPIC_API_VERSION: &str = "2023-06-01";

/// Retry hint used when a 429 body carries none.
const DEFAULT_RETRY_AFTER_SECS: u32 = 60;

/// Configuration for the Anthropic generator.
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
    pub max_tokens: u32,
    /// HTTP client timeout.
    pub timeout: Duration,
}

impl AnthropicConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "claude-sonnet-4-20250514".to_string(),
            base_url: "https://api.anthropic.com".to_string(),
            max_tokens: 8000,
            timeout: Duration::from_secs(120),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Anthropic Messages API client implementing [`TextGenerator`].
pub struct AnthropicGenerator {
    config: AnthropicConfig,
    client: Client,
}

impl AnthropicGenerator {
    pub fn new(config: AnthropicConfig) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GenerationError::upstream(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.config.base_url.trim_end_matches('/'))
    }

    fn to_request(&self, prompt: &str) -> MessagesRequest {
        MessagesRequest {
            model: self.config.model.clone(),
            max_tokens: self.config.max_tokens,
            messages: vec![RequestMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        }
    }

    async fn send(&self, prompt: &str) -> Result<Response, GenerationError> {
        self.client
            .post(self.messages_url())
            .header("x-api-key", self.config.api_key())
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .header("Content-Type", "application/json")
            .json(&self.to_request(prompt))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout {
                        secs: self.config.timeout.as_secs(),
                    }
                } else if e.is_connect() {
                    GenerationError::upstream(format!("Connection failed: {}", e))
                } else {
                    GenerationError::upstream(e.to_string())
                }
            })
    }

    /// Maps a non-success status to the matching failure mode.
    async fn check_status(response: Response) -> Result<Response, GenerationError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(classify_status(status.as_u16(), &body))
    }
}

fn classify_status(status: u16, body: &str) -> GenerationError {
    match status {
        401 | 403 => GenerationError::AuthenticationFailed,
        429 => GenerationError::RateLimited {
            retry_after_secs: parse_retry_after(body),
        },
        500..=599 => GenerationError::upstream(format!("Server error {}: {}", status, body)),
        _ => GenerationError::upstream(format!("Unexpected status {}: {}", status, body)),
    }
}

/// Pulls "try again in Ns" out of an error body, if present.
fn parse_retry_after(body: &str) -> u32 {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error")?.get("message")?.as_str().map(str::to_string));

    if let Some(msg) = message {
        if let Some(idx) = msg.find("try again in ") {
            let digits: String = msg[idx + 13..]
                .chars()
                .take_while(|c| c.is_ascii_digit())
                .collect();
            if let Ok(secs) = digits.parse::<u32>() {
                return secs;
            }
        }
    }
    DEFAULT_RETRY_AFTER_SECS
}

#[async_trait]
impl TextGenerator for AnthropicGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let response = self.send(prompt).await?;
        let response = Self::check_status(response).await?;

        let body: MessagesResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::upstream(format!("Failed to parse response: {}", e)))?;

        let text = body
            .content
            .into_iter()
            .filter(|block| block.block_type == "text")
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join("");

        if text.is_empty() {
            return Err(GenerationError::upstream("Response contained no text"));
        }

        tracing::debug!(
            model = %body.model,
            stop_reason = ?body.stop_reason,
            chars = text.len(),
            "Anthropic generation finished"
        );
        Ok(text)
    }

    fn name(&self) -> &str {
        "anthropic"
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Wire types
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<RequestMessage>,
}

#[derive(Debug, Serialize)]
struct RequestMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    model: String,
    stop_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}
