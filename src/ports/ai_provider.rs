//! AI Provider Port - Interface for LLM provider integrations.
//!
//! This port abstracts all interactions with AI/LLM providers (OpenRouter,
//! Groq, OpenAI), enabling handlers to request completions without coupling
//! to specific providers.
//!
//! # Design
//!
//! - Plain-text and structured (JSON) completions
//! - Tolerant extraction of JSON from fenced or prose-wrapped output
//! - Error types for common failure modes (rate limits, timeouts, etc.)

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::foundation::CoreError;

/// Port for AI/LLM provider interactions.
///
/// Implementations connect to external AI services and translate between
/// the provider-specific API and our domain types.
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Generate a single plain-text completion.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AiError>;

    /// Generate a completion and parse its content as a JSON value.
    ///
    /// The default implementation delegates to [`AiProvider::complete`] and
    /// extracts JSON from the raw content, tolerating markdown code fences
    /// and surrounding prose.
    async fn complete_structured(&self, request: CompletionRequest) -> Result<Value, AiError> {
        let response = self.complete(request).await?;
        parse_structured(&response.content)
    }

    /// Get provider information (name, model).
    fn provider_info(&self) -> ProviderInfo;
}

/// Request for AI completion.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Fully rendered prompt (context + task).
    pub prompt: String,
    /// System prompt to guide model behavior.
    pub system: Option<String>,
    /// Temperature for response randomness.
    pub temperature: Option<f32>,
    /// Maximum tokens to generate.
    pub max_tokens: Option<u32>,
}

impl CompletionRequest {
    /// Creates a new completion request for the given prompt.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system: None,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Sets the system prompt.
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Sets the temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the maximum tokens to generate.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Response from AI completion.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Generated content.
    pub content: String,
    /// Model that generated the response.
    pub model: String,
}

/// Provider information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderInfo {
    /// Provider name (e.g., "openrouter", "groq").
    pub name: String,
    /// Model identifier.
    pub model: String,
}

impl ProviderInfo {
    /// Creates new provider info.
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// AI provider errors.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// Rate limited by provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// Provider is unavailable.
    #[error("provider unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },

    /// Provider returned content that could not be parsed as expected.
    #[error("malformed output: {0}")]
    MalformedOutput(String),

    /// Invalid request configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl AiError {
    /// Creates a rate limited error.
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a malformed output error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedOutput(message.into())
    }

    /// Returns true if this error is retryable against the same provider.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AiError::RateLimited { .. }
                | AiError::Unavailable { .. }
                | AiError::Network(_)
                | AiError::Timeout { .. }
        )
    }
}

impl From<AiError> for CoreError {
    fn from(err: AiError) -> Self {
        CoreError::Provider(err.to_string())
    }
}

/// Extracts a JSON value from raw model output.
///
/// Handles three shapes of content: bare JSON, JSON inside a markdown code
/// fence, and JSON embedded in surrounding prose (first `{` to last `}`).
pub fn parse_structured(content: &str) -> Result<Value, AiError> {
    let trimmed = content.trim();

    if let Ok(value) = serde_json::from_str(trimmed) {
        return Ok(value);
    }

    if let Some(fenced) = strip_code_fence(trimmed) {
        if let Ok(value) = serde_json::from_str(fenced) {
            return Ok(value);
        }
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if start < end {
            if let Ok(value) = serde_json::from_str(&trimmed[start..=end]) {
                return Ok(value);
            }
        }
    }

    Err(AiError::malformed(format!(
        "no valid JSON object in model output ({} bytes)",
        content.len()
    )))
}

/// Strips a surrounding markdown code fence, if present.
fn strip_code_fence(content: &str) -> Option<&str> {
    let rest = content.strip_prefix("```")?;
    let rest = match rest.split_once('\n') {
        // Drop the language tag line ("json", "JSON", or empty).
        Some((_tag, body)) => body,
        None => rest,
    };
    let rest = rest.trim_end();
    rest.strip_suffix("```").map(str::trim)
}
