//! Assistant service configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Environment variable holding the OpenAI API key
pub const API_KEY_VAR: &str = "DATASET_ASSISTANT__ASSISTANT__OPENAI_API_KEY";

/// Environment variable holding the assistant id
pub const ASSISTANT_ID_VAR: &str = "DATASET_ASSISTANT__ASSISTANT__ASSISTANT_ID";

/// Connection settings for the OpenAI Assistants API
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantConfig {
    /// OpenAI API key
    pub openai_api_key: Option<String>,

    /// Identifier of the pre-configured assistant (`asst_...`)
    pub assistant_id: Option<String>,

    /// API root
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries of a read on transient failure
    #[serde(default = "default_retries")]
    pub max_retries: u32,
}

impl AssistantConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// API key, if one is set and non-empty
    pub fn api_key(&self) -> Option<&str> {
        self.openai_api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    /// Assistant id, if one is set and non-empty
    pub fn assistant(&self) -> Option<&str> {
        self.assistant_id.as_deref().filter(|id| !id.trim().is_empty())
    }

    /// Validate assistant configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.api_key().is_none() {
            return Err(ValidationError::MissingRequired(API_KEY_VAR));
        }
        if self.assistant().is_none() {
            return Err(ValidationError::MissingRequired(ASSISTANT_ID_VAR));
        }
        if !self.base_url.starts_with("https://") && !self.base_url.starts_with("http://") {
            return Err(ValidationError::InvalidBaseUrl);
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            assistant_id: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_retries() -> u32 {
    3
}
