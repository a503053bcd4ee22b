//! Failover AI Provider - Wrapper that provides automatic failover between providers.
//!
//! When the primary provider fails for any reason, automatically falls
//! back to the secondary provider if configured. Rate limits and outages
//! are the common case, but a primary that returns malformed output is
//! just as unusable to callers, so every error triggers the fallback.
//!
//! # Example
//!
//! ```ignore
//! let primary = OpenAiCompatibleProvider::new(openrouter_config);
//! let fallback = OpenAiCompatibleProvider::new(groq_config);
//!
//! let provider = FailoverProvider::new(primary)
//!     .with_fallback(fallback);
//! ```

use async_trait::async_trait;
use serde_json::Value;

use crate::ports::{AiError, AiProvider, CompletionRequest, CompletionResponse, ProviderInfo};

/// AI provider wrapper with automatic failover support.
///
/// Wraps a primary provider and optionally a fallback provider.
pub struct FailoverProvider<P: AiProvider, F: AiProvider = NoFallback> {
    primary: P,
    fallback: Option<F>,
}

/// Marker type for when no fallback is configured.
pub struct NoFallback;

#[async_trait]
impl AiProvider for NoFallback {
    async fn complete(&self, _: CompletionRequest) -> Result<CompletionResponse, AiError> {
        unreachable!("NoFallback should never be called")
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("none", "none")
    }
}

impl<P: AiProvider> FailoverProvider<P, NoFallback> {
    /// Creates a new failover provider with only a primary provider.
    pub fn new(primary: P) -> Self {
        Self {
            primary,
            fallback: None,
        }
    }

    /// Adds a fallback provider.
    pub fn with_fallback<F: AiProvider>(self, fallback: F) -> FailoverProvider<P, F> {
        FailoverProvider {
            primary: self.primary,
            fallback: Some(fallback),
        }
    }
}

impl<P: AiProvider, F: AiProvider> FailoverProvider<P, F> {
    /// Creates a provider with an optional fallback slot.
    pub fn with_optional_fallback(primary: P, fallback: Option<F>) -> Self {
        Self { primary, fallback }
    }

    fn log_fallback(&self, fallback: &F, err: &AiError) {
        tracing::warn!(
            primary = %self.primary.provider_info().name,
            fallback = %fallback.provider_info().name,
            error = %err,
            "primary provider failed, using fallback"
        );
    }
}

#[async_trait]
impl<P: AiProvider + 'static, F: AiProvider + 'static> AiProvider for FailoverProvider<P, F> {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AiError> {
        match self.primary.complete(request.clone()).await {
            Ok(response) => Ok(response),
            Err(err) => match &self.fallback {
                Some(fallback) => {
                    self.log_fallback(fallback, &err);
                    fallback.complete(request).await
                }
                None => Err(err),
            },
        }
    }

    async fn complete_structured(&self, request: CompletionRequest) -> Result<Value, AiError> {
        match self.primary.complete_structured(request.clone()).await {
            Ok(value) => Ok(value),
            Err(err) => match &self.fallback {
                Some(fallback) => {
                    self.log_fallback(fallback, &err);
                    fallback.complete_structured(request).await
                }
                None => Err(err),
            },
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.primary.provider_info()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAiProvider, MockError};

    fn make_request() -> CompletionRequest {
        CompletionRequest::new("Hello").with_temperature(0.2)
    }

    #[tokio::test]
    async fn primary_success_no_fallback_used() {
        let primary = MockAiProvider::new().with_response("Hi there!");
        let fallback = MockAiProvider::new().with_response("Fallback response");

        let provider = FailoverProvider::new(primary).with_fallback(fallback);

        let response = provider.complete(make_request()).await.unwrap();
        assert_eq!(response.content, "Hi there!");
    }

    #[tokio::test]
    async fn primary_rate_limited_uses_fallback() {
        let primary =
            MockAiProvider::new().with_error(MockError::RateLimited { retry_after_secs: 30 });
        let fallback = MockAiProvider::new().with_response("Fallback response");

        let provider = FailoverProvider::new(primary).with_fallback(fallback);

        let response = provider.complete(make_request()).await.unwrap();
        assert_eq!(response.content, "Fallback response");
    }

    #[tokio::test]
    async fn non_retryable_error_still_uses_fallback() {
        let primary = MockAiProvider::new().with_error(MockError::AuthenticationFailed);
        let fallback = MockAiProvider::new().with_response("Fallback response");

        let provider = FailoverProvider::new(primary).with_fallback(fallback);

        let response = provider.complete(make_request()).await.unwrap();
        assert_eq!(response.content, "Fallback response");
    }

    #[tokio::test]
    async fn no_fallback_configured_returns_error() {
        let primary =
            MockAiProvider::new().with_error(MockError::RateLimited { retry_after_secs: 30 });

        let provider = FailoverProvider::new(primary);

        let result = provider.complete(make_request()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn fallback_also_fails_returns_fallback_error() {
        let primary =
            MockAiProvider::new().with_error(MockError::RateLimited { retry_after_secs: 30 });
        let fallback = MockAiProvider::new().with_error(MockError::AuthenticationFailed);

        let provider = FailoverProvider::new(primary).with_fallback(fallback);

        let result = provider.complete(make_request()).await;
        assert!(matches!(result.unwrap_err(), AiError::AuthenticationFailed));
    }

    #[tokio::test]
    async fn structured_completion_fails_over_on_malformed_output() {
        let primary = MockAiProvider::new().with_response("not json at all");
        let fallback = MockAiProvider::new().with_response(r#"{"score": 7}"#);

        let provider = FailoverProvider::new(primary).with_fallback(fallback);

        let value = provider.complete_structured(make_request()).await.unwrap();
        assert_eq!(value["score"], 7);
    }

    #[test]
    fn provider_info_reports_primary() {
        let primary = MockAiProvider::new().with_response("hi");
        let provider = FailoverProvider::new(primary);

        assert_eq!(provider.provider_info().name, "mock");
    }
}
