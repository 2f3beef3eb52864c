//! Client configuration.
//!
//! A single credential gates every outbound call. Its absence is a valid
//! runtime state, not a startup failure: `from_env` always succeeds and the
//! client degrades per call instead.

use std::env;

/// Environment variable holding the API credential.
pub const API_KEY_ENV: &str = "SKILLMATRIX_API_KEY";

/// Environment variable overriding the messages endpoint URL.
pub const API_URL_ENV: &str = "SKILLMATRIX_API_URL";

/// Environment variable overriding the model id.
pub const MODEL_ENV: &str = "SKILLMATRIX_MODEL";

const DEFAULT_API_URL: &str = "https://api.anthropic.com/v1/messages";
const DEFAULT_MODEL: &str = "claude-3-5-haiku-latest";

/// Maximum completion size for chat turns; recommendations get more room.
pub const CHAT_MAX_TOKENS: usize = 300;
pub const RECOMMEND_MAX_TOKENS: usize = 1024;

/// Configuration for the AI client.
#[derive(Debug, Clone)]
pub struct AiClientConfig {
    /// API credential; `None` means the AI features degrade gracefully
    pub api_key: Option<String>,
    /// Messages endpoint URL
    pub api_url: String,
    /// Model id to request
    pub model: String,
}

impl AiClientConfig {
    /// Read configuration from the environment.
    pub fn from_env() -> Self {
        Self {
            api_key: env::var(API_KEY_ENV).ok().filter(|key| !key.is_empty()),
            api_url: env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            model: env::var(MODEL_ENV).unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
        }
    }

    /// Config with no credential; every call degrades.
    pub fn unconfigured() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfigured_has_no_key_but_valid_endpoint() {
        let config = AiClientConfig::unconfigured();
        assert!(!config.is_configured());
        assert!(config.api_url.starts_with("https://"));
        assert!(!config.model.is_empty());
    }
}
