//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables carry the
//! `CLOUD_SERVICE_CREATOR` prefix and nested values are separated by `__`.
//!
//! # Example
//!
//! ```no_run
//! use cloud_service_creator::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod error;
mod server;
mod storage;
mod testing;

pub use ai::{AiConfig, AiProvider};
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, LogFormat, ServerConfig};
pub use storage::{StorageBackend, StorageConfig};
pub use testing::TestingConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment still loads.
/// Validation then decides whether the result is usable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub ai: AiConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub testing: TestingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CLOUD_SERVICE_CREATOR` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// - `CLOUD_SERVICE_CREATOR__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `CLOUD_SERVICE_CREATOR__AI__PROVIDER=mock` -> `ai.provider = mock`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CLOUD_SERVICE_CREATOR")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.storage.validate()?;
        self.testing.validate()?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "CLOUD_SERVICE_CREATOR__SERVER__PORT",
        "CLOUD_SERVICE_CREATOR__SERVER__ENVIRONMENT",
        "CLOUD_SERVICE_CREATOR__SERVER__LOG_FORMAT",
        "CLOUD_SERVICE_CREATOR__AI__PROVIDER",
        "CLOUD_SERVICE_CREATOR__AI__ANTHROPIC_API_KEY",
        "CLOUD_SERVICE_CREATOR__STORAGE__BACKEND",
        "CLOUD_SERVICE_CREATOR__STORAGE__DATA_DIR",
        "CLOUD_SERVICE_CREATOR__TESTING__MAX_SERVICES",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    fn load_with(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        clear_env();
        for (key, value) in vars {
            env::set_var(key, value);
        }
        let result = AppConfig::load();
        clear_env();
        result
    }

    #[test]
    fn test_defaults_load_from_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[]).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.ai.provider, AiProvider::Anthropic);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.testing.max_services, 5);
    }

    #[test]
    fn test_default_anthropic_without_key_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[]).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_mock_provider_validates() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[("CLOUD_SERVICE_CREATOR__AI__PROVIDER", "mock")]).unwrap();
        assert_eq!(config.ai.provider, AiProvider::Mock);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nested_values_override_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config = load_with(&[
            ("CLOUD_SERVICE_CREATOR__SERVER__PORT", "3000"),
            ("CLOUD_SERVICE_CREATOR__SERVER__LOG_FORMAT", "json"),
            ("CLOUD_SERVICE_CREATOR__AI__ANTHROPIC_API_KEY", "sk-ant-xxx"),
            ("CLOUD_SERVICE_CREATOR__STORAGE__BACKEND", "file"),
            ("CLOUD_SERVICE_CREATOR__STORAGE__DATA_DIR", "/tmp/css"),
            ("CLOUD_SERVICE_CREATOR__TESTING__MAX_SERVICES", "2"),
        ])
        .unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.log_format, LogFormat::Json);
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.storage.data_dir.to_str(), Some("/tmp/css"));
        assert_eq!(config.testing.max_services, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        let config =
            load_with(&[("CLOUD_SERVICE_CREATOR__SERVER__ENVIRONMENT", "production")]).unwrap();
        assert!(config.is_production());
    }
}
