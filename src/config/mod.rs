//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `DATASET_ASSISTANT` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use dataset_assistant::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Polling up to {} times", config.polling.max_attempts);
//! ```

mod assistant;
mod error;
mod logging;
mod polling;

pub use assistant::{AssistantConfig, API_KEY_VAR, ASSISTANT_ID_VAR};
pub use error::{ConfigError, ValidationError};
pub use logging::{LogFormat, LoggingConfig};
pub use polling::PollingConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Assistant service configuration (API key, assistant id)
    #[serde(default)]
    pub assistant: AssistantConfig,

    /// Run polling configuration
    #[serde(default)]
    pub polling: PollingConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `DATASET_ASSISTANT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `DATASET_ASSISTANT__ASSISTANT__OPENAI_API_KEY=sk-...` -> `assistant.openai_api_key`
    /// - `DATASET_ASSISTANT__POLLING__MAX_ATTEMPTS=20` -> `polling.max_attempts = 20`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("DATASET_ASSISTANT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is missing or invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.assistant.validate()?;
        self.polling.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var(API_KEY_VAR, "sk-test");
        env::set_var(ASSISTANT_ID_VAR, "asst_test");
    }

    fn clear_env() {
        env::remove_var("DATASET_ASSISTANT__ASSISTANT__OPENAI_API_KEY");
        env::remove_var("DATASET_ASSISTANT__ASSISTANT__ASSISTANT_ID");
        env::remove_var("DATASET_ASSISTANT__POLLING__MAX_ATTEMPTS");
        env::remove_var("DATASET_ASSISTANT__POLLING__POLL_INTERVAL_MS");
        env::remove_var("DATASET_ASSISTANT__LOGGING__FORMAT");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.assistant.api_key(), Some("sk-test"));
        assert_eq!(config.assistant.assistant(), Some("asst_test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_apply() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.polling.max_attempts, 50);
        assert_eq!(config.polling.poll_interval_ms, 2000);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.assistant.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn test_custom_polling_and_format() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("DATASET_ASSISTANT__POLLING__MAX_ATTEMPTS", "5");
        env::set_var("DATASET_ASSISTANT__POLLING__POLL_INTERVAL_MS", "100");
        env::set_var("DATASET_ASSISTANT__LOGGING__FORMAT", "json");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.polling.max_attempts, 5);
        assert_eq!(config.polling.poll_interval_ms, 100);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_missing_credentials_fail_validation() {
        let config = AppConfig::default();
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired(API_KEY_VAR))
        );
    }
}
