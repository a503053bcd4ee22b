//! OpenAI-compatible provider - AiProvider over the chat-completions wire protocol.
//!
//! OpenRouter, Groq, and OpenAI all speak the same chat-completions API, so
//! one adapter covers all three via base-URL presets.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAiCompatibleConfig::openrouter(api_key)
//!     .with_model("deepseek/deepseek-chat");
//!
//! let provider = OpenAiCompatibleProvider::new(config);
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    parse_structured, AiError, AiProvider, CompletionRequest, CompletionResponse, ProviderInfo,
};

/// Configuration for an OpenAI-compatible provider.
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Provider label for logs and `ProviderInfo`.
    pub name: String,
    /// Model to use.
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retries on transient failures.
    pub max_retries: u32,
}

impl OpenAiCompatibleConfig {
    fn new(
        name: &str,
        base_url: &str,
        default_model: &str,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            name: name.to_string(),
            model: default_model.to_string(),
            base_url: base_url.to_string(),
            timeout: Duration::from_secs(60),
            max_retries: 2,
        }
    }

    /// OpenRouter preset.
    pub fn openrouter(api_key: impl Into<String>) -> Self {
        Self::new(
            "openrouter",
            "https://openrouter.ai/api/v1",
            "deepseek/deepseek-chat",
            api_key,
        )
    }

    /// Groq preset.
    pub fn groq(api_key: impl Into<String>) -> Self {
        Self::new(
            "groq",
            "https://api.groq.com/openai/v1",
            "llama-3.3-70b-versatile",
            api_key,
        )
    }

    /// OpenAI preset.
    pub fn openai(api_key: impl Into<String>) -> Self {
        Self::new("openai", "https://api.openai.com/v1", "gpt-4o-mini", api_key)
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the maximum retry count.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI-compatible API provider implementation.
pub struct OpenAiCompatibleProvider {
    config: OpenAiCompatibleConfig,
    client: Client,
}

impl OpenAiCompatibleProvider {
    /// Creates a new provider with the given configuration.
    pub fn new(config: OpenAiCompatibleConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    fn to_wire_request(&self, request: &CompletionRequest, json_mode: bool) -> WireRequest {
        let mut messages = Vec::new();

        if let Some(ref system) = request.system {
            messages.push(WireMessage {
                role: "system".to_string(),
                content: system.clone(),
            });
        }
        messages.push(WireMessage {
            role: "user".to_string(),
            content: request.prompt.clone(),
        });

        WireRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            response_format: json_mode.then(|| ResponseFormat {
                format_type: "json_object".to_string(),
            }),
        }
    }

    async fn send_request(
        &self,
        request: &CompletionRequest,
        json_mode: bool,
    ) -> Result<Response, AiError> {
        let wire_request = self.to_wire_request(request, json_mode);

        self.client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AiError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    AiError::network(format!("Connection failed: {}", e))
                } else {
                    AiError::network(e.to_string())
                }
            })
    }

    async fn handle_response_status(&self, response: Response) -> Result<Response, AiError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 | 403 => Err(AiError::AuthenticationFailed),
            429 => Err(AiError::rate_limited(Self::parse_retry_after(&error_body))),
            400 => Err(AiError::InvalidRequest(error_body)),
            500..=599 => Err(AiError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(AiError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }

    /// Parses retry-after from the error body, defaulting to 30 seconds.
    fn parse_retry_after(error_body: &str) -> u32 {
        if let Ok(parsed) = serde_json::from_str::<Value>(error_body) {
            if let Some(msg) = parsed
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(Value::as_str)
            {
                // "try again in Xs" pattern
                if let Some(idx) = msg.find("try again in ") {
                    let rest = &msg[idx + 13..];
                    if let Some(num_end) = rest.find(|c: char| !c.is_ascii_digit()) {
                        if let Ok(secs) = rest[..num_end].parse::<u32>() {
                            return secs;
                        }
                    }
                }
            }
        }
        30
    }

    async fn parse_response(&self, response: Response) -> Result<CompletionResponse, AiError> {
        let response = self.handle_response_status(response).await?;

        let wire_response: WireResponse = response
            .json()
            .await
            .map_err(|e| AiError::malformed(format!("Failed to parse response: {}", e)))?;

        let choice = wire_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AiError::malformed("No choices in response"))?;

        Ok(CompletionResponse {
            content: choice.message.content,
            model: wire_response.model,
        })
    }

    /// One full request with bounded retry on retryable errors.
    ///
    /// Backoff doubles per attempt and is capped at 8 seconds.
    async fn complete_with_retry(
        &self,
        request: &CompletionRequest,
        json_mode: bool,
    ) -> Result<CompletionResponse, AiError> {
        let mut retry_count = 0;

        loop {
            let result = match self.send_request(request, json_mode).await {
                Ok(response) => self.parse_response(response).await,
                Err(err) => Err(err),
            };

            match result {
                Ok(completion) => return Ok(completion),
                Err(err) => {
                    if !err.is_retryable() || retry_count >= self.config.max_retries {
                        return Err(err);
                    }
                    let delay = Duration::from_secs((1u64 << retry_count).min(8));
                    tracing::warn!(
                        provider = %self.config.name,
                        error = %err,
                        retry = retry_count + 1,
                        "completion failed, retrying"
                    );
                    sleep(delay).await;
                    retry_count += 1;
                }
            }
        }
    }
}

#[async_trait]
impl AiProvider for OpenAiCompatibleProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AiError> {
        self.complete_with_retry(&request, false).await
    }

    async fn complete_structured(&self, request: CompletionRequest) -> Result<Value, AiError> {
        // Ask for native JSON mode first; some routed models reject the
        // response_format parameter, so fall back to a plain completion.
        let response = match self.complete_with_retry(&request, true).await {
            Ok(response) => response,
            Err(AiError::InvalidRequest(_)) => self.complete_with_retry(&request, false).await?,
            Err(err) => return Err(err),
        };
        parse_structured(&response.content)
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new(&self.config.name, &self.config.model)
    }
}

// ----- Wire types -----

#[derive(Debug, Serialize)]
struct WireRequest {
    model: String,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    model: String,
    choices: Vec<WireChoice>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireMessage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_set_base_urls() {
        let openrouter = OpenAiCompatibleConfig::openrouter("key");
        assert_eq!(openrouter.base_url, "https://openrouter.ai/api/v1");
        assert_eq!(openrouter.name, "openrouter");

        let groq = OpenAiCompatibleConfig::groq("key");
        assert_eq!(groq.base_url, "https://api.groq.com/openai/v1");

        let openai = OpenAiCompatibleConfig::openai("key");
        assert_eq!(openai.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn config_builder_works() {
        let config = OpenAiCompatibleConfig::openrouter("test-key")
            .with_model("qwen/qwen-2.5-coder-32b")
            .with_timeout(Duration::from_secs(30))
            .with_max_retries(5);

        assert_eq!(config.model, "qwen/qwen-2.5-coder-32b");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.api_key(), "test-key");
    }

    #[test]
    fn wire_request_includes_system_first() {
        let provider =
            OpenAiCompatibleProvider::new(OpenAiCompatibleConfig::openrouter("test-key"));
        let request = CompletionRequest::new("Review this code")
            .with_system("You are a reviewer")
            .with_temperature(0.2);

        let wire = provider.to_wire_request(&request, true);
        assert_eq!(wire.messages.len(), 2);
        assert_eq!(wire.messages[0].role, "system");
        assert_eq!(wire.messages[1].role, "user");
        assert_eq!(wire.messages[1].content, "Review this code");
        assert!(wire.response_format.is_some());
    }

    #[test]
    fn wire_request_omits_json_mode_when_disabled() {
        let provider =
            OpenAiCompatibleProvider::new(OpenAiCompatibleConfig::groq("test-key"));
        let request = CompletionRequest::new("Hello");

        let wire = provider.to_wire_request(&request, false);
        assert_eq!(wire.messages.len(), 1);
        assert!(wire.response_format.is_none());
    }

    #[test]
    fn parse_retry_after_from_message() {
        let error = r#"{"error":{"message":"Rate limit exceeded. Please try again in 12 seconds."}}"#;
        assert_eq!(OpenAiCompatibleProvider::parse_retry_after(error), 12);
    }

    #[test]
    fn parse_retry_after_default() {
        let error = r#"{"error":{"message":"Something went wrong"}}"#;
        assert_eq!(OpenAiCompatibleProvider::parse_retry_after(error), 30);
    }

    #[test]
    fn provider_info_reflects_config() {
        let provider = OpenAiCompatibleProvider::new(
            OpenAiCompatibleConfig::openrouter("key").with_model("deepseek/deepseek-chat"),
        );
        let info = provider.provider_info();
        assert_eq!(info.name, "openrouter");
        assert_eq!(info.model, "deepseek/deepseek-chat");
    }
}
