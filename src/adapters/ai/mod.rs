//! AI provider adapters.
//!
//! - `OpenAiCompatibleProvider` - OpenRouter/Groq/OpenAI over the shared
//!   chat-completions wire protocol
//! - `FailoverProvider` - wraps a primary and fallback provider
//! - `MockAiProvider` - scripted provider for tests

mod failover_provider;
mod mock_provider;
mod openai_compatible;

pub use failover_provider::{FailoverProvider, NoFallback};
pub use mock_provider::{MockAiProvider, MockError, MockResponse};
pub use openai_compatible::{OpenAiCompatibleConfig, OpenAiCompatibleProvider};

use secrecy::ExposeSecret;

use crate::config::{AiConfig, LlmProvider};

/// Builds a provider for the given slot from configuration.
fn provider_from_config(
    config: &AiConfig,
    provider: LlmProvider,
    model: &str,
) -> Option<OpenAiCompatibleProvider> {
    let key = config.key_for(provider)?.expose_secret().clone();
    let preset = match provider {
        LlmProvider::OpenRouter => OpenAiCompatibleConfig::openrouter(key),
        LlmProvider::Groq => OpenAiCompatibleConfig::groq(key),
        LlmProvider::OpenAI => OpenAiCompatibleConfig::openai(key),
    };
    Some(OpenAiCompatibleProvider::new(
        preset
            .with_model(model)
            .with_timeout(config.timeout())
            .with_max_retries(config.max_retries),
    ))
}

/// Assembles the failover provider stack from validated configuration.
///
/// Returns `None` if the primary provider has no API key configured.
pub fn build_provider_stack(
    config: &AiConfig,
) -> Option<FailoverProvider<OpenAiCompatibleProvider, OpenAiCompatibleProvider>> {
    let primary = provider_from_config(config, config.primary_provider, &config.model)?;

    let fallback = config.fallback_provider.and_then(|fb| {
        let model = config.fallback_model.as_deref().unwrap_or(&config.model);
        provider_from_config(config, fb, model)
    });

    Some(FailoverProvider::with_optional_fallback(primary, fallback))
}
