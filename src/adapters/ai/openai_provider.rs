//! OpenAI-compatible Provider - Implementation of AIProvider for chat-completions APIs.
//!
//! Talks to any endpoint that speaks the OpenAI `/chat/completions` protocol.
//! Defaults to Groq's hosted `openai/gpt-oss-120b`.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAIConfig::new(api_key)
//!     .with_model("openai/gpt-oss-120b")
//!     .with_base_url("https://api.groq.com/openai/v1");
//!
//! let provider = OpenAIProvider::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::header::RETRY_AFTER;
use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, MessageRole,
    ProviderInfo, TokenUsage,
};

/// Default endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Default model.
pub const DEFAULT_MODEL: &str = "openai/gpt-oss-120b";

/// Longest wait between two attempts, whatever the provider asks for.
const MAX_BACKOFF: Duration = Duration::from_secs(60);

/// Configuration for the provider.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use.
    pub model: String,
    /// Base URL for the API, without the `/chat/completions` suffix.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retries on transient failures.
    pub max_retries: u32,
    /// Name reported in `ProviderInfo`.
    pub provider_name: String,
}

impl OpenAIConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
            max_retries: 3,
            provider_name: "groq".to_string(),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL. A trailing slash is dropped.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
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

    /// Sets the provider name reported in logs and `ProviderInfo`.
    pub fn with_provider_name(mut self, name: impl Into<String>) -> Self {
        self.provider_name = name.into();
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Chat-completions provider implementation.
pub struct OpenAIProvider {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAIProvider {
    /// Creates a new provider with the given configuration.
    pub fn new(config: OpenAIConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::InvalidRequest(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Builds the chat completions endpoint URL.
    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    /// Converts our request to the wire format.
    fn to_openai_request(&self, request: &CompletionRequest) -> OpenAIRequest {
        let system = request.system_prompt.iter().map(|prompt| OpenAIMessage {
            role: "system".to_string(),
            content: Some(prompt.clone()),
        });

        let conversation = request.messages.iter().map(|msg| OpenAIMessage {
            role: match msg.role {
                MessageRole::System => "system",
                MessageRole::User => "user",
                MessageRole::Assistant => "assistant",
            }
            .to_string(),
            content: Some(msg.content.clone()),
        });

        OpenAIRequest {
            model: self.config.model.clone(),
            messages: system.chain(conversation).collect(),
            temperature: request.temperature,
        }
    }

    /// Sends a request.
    async fn send_request(&self, request: &CompletionRequest) -> Result<Response, AIError> {
        let body = self.to_openai_request(request);

        self.client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AIError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    AIError::network(format!("Connection failed: {}", e))
                } else {
                    AIError::network(e.to_string())
                }
            })
    }

    /// Parses the response, mapping error statuses.
    async fn parse_response(&self, response: Response) -> Result<CompletionResponse, AIError> {
        let status = response.status();

        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.trim().parse::<u32>().ok());
            let error_body = response.text().await.unwrap_or_default();
            return Err(error_for_status(status, &error_body, retry_after));
        }

        let openai_response: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))?;

        completion_from_response(openai_response)
    }

    /// One attempt: send and parse.
    async fn attempt(&self, request: &CompletionRequest) -> Result<CompletionResponse, AIError> {
        let response = self.send_request(request).await?;
        self.parse_response(response).await
    }
}

#[async_trait]
impl AIProvider for OpenAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let mut retry_count = 0;

        loop {
            debug!(
                provider = %self.config.provider_name,
                model = %self.config.model,
                operation = %request.metadata.operation,
                trace_id = %request.metadata.trace_id,
                attempt = retry_count + 1,
                "sending completion request"
            );

            match self.attempt(&request).await {
                Ok(completion) => return Ok(completion),
                Err(err) if err.is_retryable() && retry_count < self.config.max_retries => {
                    let delay = backoff_delay(&err, retry_count);
                    warn!(
                        error = %err,
                        trace_id = %request.metadata.trace_id,
                        delay_secs = delay.as_secs(),
                        "completion failed, retrying"
                    );
                    sleep(delay).await;
                    retry_count += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new(&self.config.provider_name, &self.config.model)
    }
}

/// Wait before retry number `retry_count` (0-based).
///
/// A rate limit waits as long as the provider asked. Other failures back off
/// exponentially: 1s, 2s, 4s, ... Both are capped at `MAX_BACKOFF`.
fn backoff_delay(err: &AIError, retry_count: u32) -> Duration {
    let delay = match err {
        AIError::RateLimited { retry_after_secs } => Duration::from_secs(u64::from(*retry_after_secs)),
        _ => Duration::from_secs(2u64.saturating_pow(retry_count)),
    };
    delay.min(MAX_BACKOFF)
}

/// Maps an error status and body to an `AIError`.
///
/// For 429, a `Retry-After` header in seconds wins over a hint in the body.
fn error_for_status(status: StatusCode, error_body: &str, retry_after: Option<u32>) -> AIError {
    let message = error_message(error_body);

    match status.as_u16() {
        401 => AIError::AuthenticationFailed,
        429 => AIError::rate_limited(retry_after.unwrap_or_else(|| parse_retry_after(&message))),
        400 | 404 | 413 | 422 => AIError::InvalidRequest(message),
        500..=599 => AIError::unavailable(format!("Server error {}: {}", status, message)),
        _ => AIError::network(format!("Unexpected status {}: {}", status, message)),
    }
}

/// Best-effort `error.message` from an error body, else the body itself.
fn error_message(error_body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(error_body)
        .ok()
        .and_then(|parsed| {
            parsed
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| error_body.to_string())
}

/// Parses "try again in Xs" from a rate limit message. Defaults to 30 seconds.
fn parse_retry_after(message: &str) -> u32 {
    const MARKER: &str = "try again in ";

    message
        .find(MARKER)
        .map(|idx| &message[idx + MARKER.len()..])
        .and_then(|rest| {
            let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
            digits.parse::<u32>().ok()
        })
        .unwrap_or(30)
}

/// Converts a successful response body. Missing content reads as empty text.
fn completion_from_response(response: OpenAIResponse) -> Result<CompletionResponse, AIError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| AIError::parse("No choices in response"))?;

    let finish_reason = match choice.finish_reason.as_deref() {
        Some("length") => FinishReason::Length,
        Some("content_filter") => FinishReason::ContentFilter,
        _ => FinishReason::Stop,
    };

    let usage = response
        .usage
        .map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens))
        .unwrap_or_default();

    Ok(CompletionResponse {
        content: choice.message.content.unwrap_or_default(),
        usage,
        model: response.model,
        finish_reason,
    })
}

// ----- Chat Completions API Types -----

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAIMessage {
    role: String,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    #[serde(default)]
    model: String,
    choices: Vec<OpenAIChoice>,
    usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{Operation, RequestMetadata};

    fn provider() -> OpenAIProvider {
        OpenAIProvider::new(OpenAIConfig::new("test-key")).unwrap()
    }

    #[test]
    fn config_defaults_to_groq() {
        let config = OpenAIConfig::new("test-key");

        assert_eq!(config.model, "openai/gpt-oss-120b");
        assert_eq!(config.base_url, "https://api.groq.com/openai/v1");
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.api_key(), "test-key");
    }

    #[test]
    fn config_builder_works() {
        let config = OpenAIConfig::new("test-key")
            .with_model("gpt-4o")
            .with_base_url("https://custom.api.com/v1/")
            .with_timeout(Duration::from_secs(30))
            .with_max_retries(5)
            .with_provider_name("openai");

        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.base_url, "https://custom.api.com/v1");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.provider_name, "openai");
    }

    #[test]
    fn config_debug_does_not_leak_key() {
        let config = OpenAIConfig::new("super-secret");
        assert!(!format!("{:?}", config).contains("super-secret"));
    }

    #[test]
    fn completions_url_appends_path() {
        assert_eq!(
            provider().completions_url(),
            "https://api.groq.com/openai/v1/chat/completions"
        );
    }

    #[test]
    fn request_puts_system_prompt_first() {
        let request = CompletionRequest::new(RequestMetadata::new(Operation::SuggestCriteria))
            .with_system_prompt("system text")
            .with_message(MessageRole::User, "user text")
            .with_temperature(0.7);

        let body = serde_json::to_value(provider().to_openai_request(&request)).unwrap();

        assert_eq!(body["model"], "openai/gpt-oss-120b");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "system text");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "user text");
        assert!((body["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn unauthorized_status_maps_to_authentication_failed() {
        let err = error_for_status(
            StatusCode::UNAUTHORIZED,
            r#"{"error":{"message":"Invalid API Key"}}"#,
            None,
        );
        assert!(matches!(err, AIError::AuthenticationFailed));
    }

    #[test]
    fn rate_limit_status_parses_retry_after() {
        let body = r#"{"error":{"message":"Rate limit reached. Please try again in 12s."}}"#;
        let err = error_for_status(StatusCode::TOO_MANY_REQUESTS, body, None);
        assert!(matches!(err, AIError::RateLimited { retry_after_secs: 12 }));
    }

    #[test]
    fn rate_limit_header_wins_over_body_hint() {
        let body = r#"{"error":{"message":"Rate limit reached. Please try again in 12s."}}"#;
        let err = error_for_status(StatusCode::TOO_MANY_REQUESTS, body, Some(4));
        assert!(matches!(err, AIError::RateLimited { retry_after_secs: 4 }));
    }

    #[test]
    fn backoff_is_exponential_and_capped() {
        let err = AIError::network("reset");
        assert_eq!(backoff_delay(&err, 0), Duration::from_secs(1));
        assert_eq!(backoff_delay(&err, 2), Duration::from_secs(4));
        assert_eq!(backoff_delay(&err, 64), MAX_BACKOFF);
        assert_eq!(backoff_delay(&err, u32::MAX), MAX_BACKOFF);
    }

    #[test]
    fn rate_limited_backoff_uses_provider_hint() {
        assert_eq!(backoff_delay(&AIError::rate_limited(7), 0), Duration::from_secs(7));
        assert_eq!(backoff_delay(&AIError::rate_limited(7), 3), Duration::from_secs(7));
        assert_eq!(backoff_delay(&AIError::rate_limited(3600), 0), MAX_BACKOFF);
    }

    #[test]
    fn server_errors_are_unavailable() {
        let err = error_for_status(StatusCode::BAD_GATEWAY, "upstream down", None);
        assert!(matches!(err, AIError::Unavailable { .. }));
        assert!(err.is_retryable());
    }

    #[test]
    fn bad_request_keeps_provider_message() {
        let err = error_for_status(
            StatusCode::BAD_REQUEST,
            r#"{"error":{"message":"model not found"}}"#,
            None,
        );
        match err {
            AIError::InvalidRequest(message) => assert_eq!(message, "model not found"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn parse_retry_after_default() {
        assert_eq!(parse_retry_after("Something went wrong"), 30);
        assert_eq!(parse_retry_after("please try again in 30 seconds"), 30);
        assert_eq!(parse_retry_after("please try again in 7.5s"), 7);
    }

    #[test]
    fn completion_from_response_reads_first_choice() {
        let response: OpenAIResponse = serde_json::from_str(
            r#"{
                "model": "openai/gpt-oss-120b",
                "choices": [{"message": {"role": "assistant", "content": "[\"Cost\"]"}, "finish_reason": "stop"}],
                "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
            }"#,
        )
        .unwrap();

        let completion = completion_from_response(response).unwrap();

        assert_eq!(completion.content, "[\"Cost\"]");
        assert_eq!(completion.usage.total_tokens, 15);
        assert_eq!(completion.finish_reason, FinishReason::Stop);
    }

    #[test]
    fn null_content_reads_as_empty() {
        let response: OpenAIResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant", "content": null}, "finish_reason": "length"}]}"#,
        )
        .unwrap();

        let completion = completion_from_response(response).unwrap();

        assert_eq!(completion.content, "");
        assert_eq!(completion.finish_reason, FinishReason::Length);
    }

    #[test]
    fn no_choices_is_a_parse_error() {
        let response: OpenAIResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(completion_from_response(response), Err(AIError::Parse(_))));
    }

    #[tokio::test]
    async fn connection_failure_maps_to_network_error() {
        let config = OpenAIConfig::new("test-key")
            .with_base_url("http://127.0.0.1:9")
            .with_timeout(Duration::from_secs(5))
            .with_max_retries(0);
        let provider = OpenAIProvider::new(config).unwrap();
        let request = CompletionRequest::new(RequestMetadata::new(Operation::SuggestCriteria))
            .with_message(MessageRole::User, "hi");

        let result = provider.complete(request).await;

        assert!(matches!(
            result,
            Err(AIError::Network(_)) | Err(AIError::Timeout { .. })
        ));
    }
}
