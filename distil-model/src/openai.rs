//! OpenAI-compatible chat completions client.
//!
//! Works against the standard OpenAI API and any endpoint speaking the same
//! wire format (Ollama, vLLM, Groq, ...) via `base_url`.

use crate::retry::{
    RetryConfig, execute_with_retry, is_retryable_generation_error, is_retryable_status_code,
};
use async_trait::async_trait;
use distil_core::{DistilError, Generator, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Default OpenAI API base URL.
pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// Configuration for an OpenAI-compatible generator.
///
/// The model identifier and sampling temperature are fixed here, at
/// construction time; the loop never passes per-call options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIConfig {
    /// API key.
    pub api_key: String,
    /// Model name (e.g., "gpt-4o", "gpt-4o-mini").
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum tokens for output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Optional custom base URL for OpenAI-compatible APIs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            max_tokens: None,
            base_url: None,
        }
    }
}

impl OpenAIConfig {
    /// Create a new config with the given API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self { api_key: api_key.into(), model: model.into(), ..Default::default() }
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set max tokens for output.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set a custom base URL (e.g., for Ollama or vLLM).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}

/// Chat message on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Message {
    role: String,
    content: Option<String>,
}

/// Chat completion request body.
#[derive(Debug, Clone, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

/// Chat completion response body. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
struct Choice {
    message: Option<Message>,
}

/// [`Generator`] backed by an OpenAI-compatible chat completions endpoint.
///
/// Retryable HTTP failures (429, 5xx) are retried here with bounded backoff;
/// the refinement loop above never retries, so this layer is the only place
/// transient provider errors get absorbed.
#[derive(Debug)]
pub struct OpenAIGenerator {
    client: Client,
    config: OpenAIConfig,
    retry_config: RetryConfig,
}

impl OpenAIGenerator {
    /// Create a new generator.
    pub fn new(config: OpenAIConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(DistilError::Config("OpenAI API key is empty".to_string()));
        }

        let client = Client::builder()
            .build()
            .map_err(|e| DistilError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config, retry_config: RetryConfig::default() })
    }

    #[must_use]
    pub fn with_retry_config(mut self, retry_config: RetryConfig) -> Self {
        self.retry_config = retry_config;
        self
    }

    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry_config
    }

    fn api_url(&self) -> String {
        let base = self.config.base_url.as_deref().unwrap_or(OPENAI_API_BASE);
        format!("{}/chat/completions", base.trim_end_matches('/'))
    }

    fn build_request(&self, prompt: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![Message { role: "user".to_string(), content: Some(prompt.to_string()) }],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        }
    }
}

#[async_trait]
impl Generator for OpenAIGenerator {
    fn name(&self) -> &str {
        &self.config.model
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let api_url = self.api_url();
        let api_key = self.config.api_key.clone();
        let chat_request = self.build_request(prompt);
        let client = self.client.clone();

        let response =
            execute_with_retry(&self.retry_config, is_retryable_generation_error, || {
                let client = client.clone();
                let api_url = api_url.clone();
                let api_key = api_key.clone();
                let chat_request = chat_request.clone();
                async move {
                    let response = client
                        .post(&api_url)
                        .header("Authorization", format!("Bearer {}", api_key))
                        .header("Content-Type", "application/json")
                        .json(&chat_request)
                        .send()
                        .await
                        .map_err(|e| {
                            DistilError::Generation(format!("API request failed: {}", e))
                        })?;

                    if !response.status().is_success() {
                        let status = response.status();
                        let error_text = response.text().await.unwrap_or_default();
                        let retryability = if is_retryable_status_code(status.as_u16()) {
                            "retryable"
                        } else {
                            "non-retryable"
                        };
                        return Err(DistilError::Generation(format!(
                            "API error ({}, {}): {}",
                            status, retryability, error_text
                        )));
                    }

                    Ok(response)
                }
            })
            .await?;

        let response_text = response
            .text()
            .await
            .map_err(|e| DistilError::Generation(format!("Failed to read response: {}", e)))?;

        let chat_response: ChatCompletionResponse = serde_json::from_str(&response_text)
            .map_err(|e| {
                DistilError::Generation(format!("Failed to parse response: {} - {}", e, response_text))
            })?;

        let content = chat_response
            .choices
            .first()
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.as_deref())
            .unwrap_or("");

        if content.is_empty() {
            return Err(DistilError::Generation("Empty response from model".to_string()));
        }

        Ok(content.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn generator_for(server: &MockServer) -> OpenAIGenerator {
        OpenAIGenerator::new(
            OpenAIConfig::new("test-key", "gpt-4o-mini").with_base_url(server.uri()),
        )
        .unwrap()
        .with_retry_config(
            RetryConfig::default()
                .with_initial_delay(Duration::ZERO)
                .with_max_delay(Duration::ZERO),
        )
    }

    fn completion_body(content: &str) -> serde_json::Value {
        json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 1700000000,
            "model": "gpt-4o-mini",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }]
        })
    }

    #[test]
    fn test_config_defaults() {
        let config = OpenAIConfig::default();
        assert_eq!(config.model, "gpt-4o-mini");
        assert!((config.temperature - 0.7).abs() < f32::EPSILON);
        assert!(config.base_url.is_none());
    }

    #[test]
    fn test_empty_api_key_rejected() {
        let err = OpenAIGenerator::new(OpenAIConfig::default()).unwrap_err();
        assert!(matches!(err, DistilError::Config(_)));
    }

    #[tokio::test]
    async fn test_generate_returns_first_choice_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer test-key"))
            .and(body_partial_json(json!({"model": "gpt-4o-mini", "temperature": 0.7})))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("a summary")))
            .expect(1)
            .mount(&server)
            .await;

        let generator = generator_for(&server);
        let text = generator.generate("summarize this").await.unwrap();
        assert_eq!(text, "a summary");
    }

    #[tokio::test]
    async fn test_generate_surfaces_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid key"))
            .mount(&server)
            .await;

        let generator = generator_for(&server);
        let err = generator.generate("p").await.unwrap_err();
        match err {
            DistilError::Generation(message) => {
                assert!(message.contains("401"));
                assert!(message.contains("non-retryable"));
            }
            other => panic!("expected Generation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_generate_rejects_empty_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("")))
            .mount(&server)
            .await;

        let generator = generator_for(&server);
        let err = generator.generate("p").await.unwrap_err();
        assert!(matches!(err, DistilError::Generation(_)));
    }

    #[tokio::test]
    async fn test_generate_retries_rate_limit_then_succeeds() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("recovered")))
            .expect(1)
            .mount(&server)
            .await;

        let generator = generator_for(&server);
        let text = generator.generate("p").await.unwrap();
        assert_eq!(text, "recovered");
    }

    #[tokio::test]
    async fn test_generate_rejects_malformed_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let generator = generator_for(&server);
        let err = generator.generate("p").await.unwrap_err();
        assert!(matches!(err, DistilError::Generation(_)));
    }
}
