//! AI provider configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// AI provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// OpenRouter API key
    pub openrouter_api_key: Option<SecretString>,

    /// Groq API key
    pub groq_api_key: Option<SecretString>,

    /// OpenAI API key
    pub openai_api_key: Option<SecretString>,

    /// Primary AI provider
    #[serde(default = "default_provider")]
    pub primary_provider: LlmProvider,

    /// Model identifier for the primary provider
    #[serde(default = "default_model")]
    pub model: String,

    /// Fallback AI provider used when the primary fails
    pub fallback_provider: Option<LlmProvider>,

    /// Model identifier for the fallback provider
    pub fallback_model: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries on retryable failures
    #[serde(default = "default_retries")]
    pub max_retries: u32,
}

/// AI provider type
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    #[default]
    OpenRouter,
    Groq,
    OpenAI,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// API key for the given provider, if configured and non-empty
    pub fn key_for(&self, provider: LlmProvider) -> Option<&SecretString> {
        let key = match provider {
            LlmProvider::OpenRouter => self.openrouter_api_key.as_ref(),
            LlmProvider::Groq => self.groq_api_key.as_ref(),
            LlmProvider::OpenAI => self.openai_api_key.as_ref(),
        };
        key.filter(|k| !k.expose_secret().is_empty())
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }

        if self.key_for(self.primary_provider).is_none() {
            return Err(ValidationError::NoAiProviderConfigured);
        }

        if let Some(fallback) = self.fallback_provider {
            if self.key_for(fallback).is_none() {
                return Err(ValidationError::FallbackMissingKey);
            }
        }

        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            openrouter_api_key: None,
            groq_api_key: None,
            openai_api_key: None,
            primary_provider: default_provider(),
            model: default_model(),
            fallback_provider: None,
            fallback_model: None,
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
        }
    }
}

fn default_provider() -> LlmProvider {
    LlmProvider::OpenRouter
}

fn default_model() -> String {
    "deepseek/deepseek-chat".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_retries() -> u32 {
    2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.primary_provider, LlmProvider::OpenRouter);
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.max_retries, 2);
    }

    #[test]
    fn test_timeout_duration() {
        let config = AiConfig {
            timeout_secs: 30,
            ..Default::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_validation_no_provider() {
        let config = AiConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_empty_key_is_missing() {
        let config = AiConfig {
            openrouter_api_key: Some(SecretString::new("".into())),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_valid_config() {
        let config = AiConfig {
            openrouter_api_key: Some(SecretString::new("sk-or-xxx".into())),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_fallback_missing_key() {
        let config = AiConfig {
            openrouter_api_key: Some(SecretString::new("sk-or-xxx".into())),
            fallback_provider: Some(LlmProvider::Groq),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::FallbackMissingKey)
        ));
    }

    #[test]
    fn test_validation_with_fallback() {
        let config = AiConfig {
            openrouter_api_key: Some(SecretString::new("sk-or-xxx".into())),
            fallback_provider: Some(LlmProvider::Groq),
            groq_api_key: Some(SecretString::new("gsk-xxx".into())),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
