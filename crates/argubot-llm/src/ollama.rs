//! Ollama Provider Implementation
//!
//! Provides integration with Ollama's local chat API.
//!
//! # Features
//!
//! - Async HTTP communication with `/api/chat`
//! - Configurable endpoint; the model is chosen per call
//! - Retry logic with exponential backoff
//! - Timeout handling
//!
//! # Examples
//!
//! ```no_run
//! use argubot_domain::{ChatMessage, Generator};
//! use argubot_llm::OllamaProvider;
//!
//! # async fn run() -> Result<(), argubot_llm::LlmError> {
//! let provider = OllamaProvider::new("http://localhost:11434")?;
//! let reply = provider
//!     .complete(&[ChatMessage::user("Say hello")], "llama3")
//!     .await?;
//! # Ok(())
//! # }
//! ```

use crate::{LlmError, SamplingOptions};
use argubot_domain::{ChatMessage, Generator};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default timeout for a single HTTP request (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of attempts per call
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Ollama API provider for local inference
#[derive(Debug, Clone)]
pub struct OllamaProvider {
    endpoint: String,
    client: reqwest::Client,
    timeout: Duration,
    max_retries: u32,
    backoff: Duration,
    sampling: SamplingOptions,
}

/// Request body for the Ollama chat API
#[derive(Debug, Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: Vec<OllamaMessage<'a>>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<OllamaOptions>,
}

#[derive(Debug, Serialize)]
struct OllamaMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

/// Response from the Ollama chat API
#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: OllamaReply,
    #[allow(dead_code)]
    #[serde(default)]
    done: bool,
}

#[derive(Debug, Deserialize)]
struct OllamaReply {
    content: String,
}

impl OllamaProvider {
    /// Create a new Ollama provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Ollama API endpoint (e.g., "http://localhost:11434")
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, LlmError> {
        Self::with_timeout(endpoint, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a provider with an explicit per-request timeout
    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            client,
            timeout,
            max_retries: DEFAULT_MAX_RETRIES,
            backoff: Duration::from_secs(1),
            sampling: SamplingOptions::default(),
        })
    }

    /// Create a provider for `http://localhost:11434`
    pub fn default_endpoint() -> Result<Self, LlmError> {
        Self::new(DEFAULT_ENDPOINT)
    }

    /// Set the maximum number of attempts per call
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Set the delay before the first retry; later retries double it
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    /// Set sampling parameters sent with every request
    pub fn with_sampling(mut self, sampling: SamplingOptions) -> Self {
        self.sampling = sampling;
        self
    }

    /// The configured endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request_body<'a>(&self, messages: &'a [ChatMessage], model: &'a str) -> OllamaChatRequest<'a> {
        let options = if self.sampling == SamplingOptions::default() {
            None
        } else {
            Some(OllamaOptions {
                temperature: self.sampling.temperature,
                num_predict: self.sampling.max_tokens,
            })
        };

        OllamaChatRequest {
            model,
            messages: messages
                .iter()
                .map(|m| OllamaMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            stream: false,
            options,
        }
    }

    async fn attempt(&self, url: &str, body: &OllamaChatRequest<'_>) -> Result<String, LlmError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| LlmError::from_transport(e, self.timeout))?;

        let status = response.status();
        if status.is_success() {
            let parsed = response
                .json::<OllamaChatResponse>()
                .await
                .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;
            return Ok(parsed.message.content);
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LlmError::ModelNotAvailable(body.model.to_string()));
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmError::RateLimitExceeded);
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(LlmError::Communication(format!("HTTP {}: {}", status, error_text)))
    }
}

impl Generator for OllamaProvider {
    type Error = LlmError;

    async fn complete(&self, messages: &[ChatMessage], model: &str) -> Result<String, LlmError> {
        let url = format!("{}/api/chat", self.endpoint);
        let body = self.request_body(messages, model);

        let mut attempts = 0;
        loop {
            attempts += 1;
            match self.attempt(&url, &body).await {
                Ok(text) => {
                    debug!("ollama replied with {} chars after {} attempt(s)", text.len(), attempts);
                    return Ok(text);
                }
                Err(e) if e.is_transient() && attempts < self.max_retries => {
                    // Exponential backoff: 1x, 2x, 4x, ...
                    let delay = self.backoff * 2u32.saturating_pow(attempts - 1);
                    warn!("ollama attempt {} failed ({}), retrying in {:?}", attempts, e, delay);
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ollama_provider_creation() {
        let provider = OllamaProvider::new("http://localhost:11434/").unwrap();
        assert_eq!(provider.endpoint(), "http://localhost:11434");
        assert_eq!(provider.max_retries, DEFAULT_MAX_RETRIES);
        assert_eq!(provider.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_ollama_provider_default_endpoint() {
        let provider = OllamaProvider::default_endpoint().unwrap();
        assert_eq!(provider.endpoint(), DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_ollama_provider_with_max_retries() {
        let provider = OllamaProvider::default_endpoint().unwrap().with_max_retries(5);
        assert_eq!(provider.max_retries, 5);

        let provider = provider.with_max_retries(0);
        assert_eq!(provider.max_retries, 1);
    }

    #[test]
    fn test_request_body_shape() {
        let provider = OllamaProvider::default_endpoint().unwrap();
        let messages = vec![ChatMessage::system("Be terse."), ChatMessage::user("Hi")];

        let body = serde_json::to_value(provider.request_body(&messages, "llama3")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "model": "llama3",
                "messages": [
                    {"role": "system", "content": "Be terse."},
                    {"role": "user", "content": "Hi"}
                ],
                "stream": false
            })
        );

        let provider = provider.with_sampling(SamplingOptions {
            temperature: Some(0.5),
            max_tokens: Some(64),
        });
        let body = serde_json::to_value(provider.request_body(&messages, "llama3")).unwrap();
        assert_eq!(body["options"]["temperature"], 0.5);
        assert_eq!(body["options"]["num_predict"], 64);
    }

    #[test]
    fn test_response_parsing() {
        let raw = r#"{"model":"llama3","message":{"role":"assistant","content":"Hello!"},"done":true}"#;
        let parsed: OllamaChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.message.content, "Hello!");
    }

    // Integration tests (requires running Ollama)
    #[tokio::test]
    #[ignore] // Only run when Ollama is available
    async fn test_ollama_chat_integration() {
        let provider = OllamaProvider::default_endpoint().unwrap();
        let result = provider
            .complete(&[ChatMessage::user("Say 'hello' and nothing else")], "llama3")
            .await;

        if let Ok(response) = result {
            assert!(!response.is_empty());
        }
    }

    #[tokio::test]
    async fn test_ollama_error_handling() {
        // Invalid port makes every request fail before it leaves the process
        let provider = OllamaProvider::new("http://localhost:99999")
            .unwrap()
            .with_max_retries(2)
            .with_backoff(Duration::from_millis(1));

        let result = provider.complete(&[ChatMessage::user("test")], "llama3").await;

        match result {
            Err(LlmError::Communication(_)) => {} // Expected
            other => panic!("Expected Communication error, got {:?}", other),
        }
    }
}
