//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid bind address: {0}")]
    InvalidAddress(String),

    #[error("Invalid AI base URL")]
    InvalidBaseUrl,

    #[error("max_tokens must be greater than zero")]
    InvalidMaxTokens,

    #[error("Storage data_dir must not be empty for the file backend")]
    EmptyDataDir,

    #[error("Storage owner must not be empty")]
    EmptyOwner,

    #[error("Testing max_services must be at least 1")]
    InvalidMaxServices,

    #[error("Testing agent_timeout_secs must be at least 1")]
    InvalidAgentTimeout,
}
