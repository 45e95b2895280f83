//! Argubot Generation Provider Layer
//!
//! Pluggable implementations of the `Generator` trait from `argubot-domain`.
//!
//! # Architecture
//!
//! Every provider takes role-tagged messages plus a model identifier and
//! returns the generated text. Agents never see provider details; any
//! provider failure is an [`LlmError`].
//!
//! # Providers
//!
//! - `MockProvider`: scripted, deterministic provider for testing
//! - `OllamaProvider`: local Ollama `/api/chat` integration
//! - `OpenAiProvider`: OpenAI-compatible chat completions
//! - `MeteredProvider`: wrapper that counts calls, failures and characters
//!
//! # Examples
//!
//! ```
//! use argubot_domain::{ChatMessage, Generator};
//! use argubot_llm::MockProvider;
//!
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! let provider = MockProvider::new("Hello from the model!");
//! let reply = rt
//!     .block_on(provider.complete(&[ChatMessage::user("hi")], "test-model"))
//!     .unwrap();
//! assert_eq!(reply, "Hello from the model!");
//! ```

#![warn(missing_docs)]

pub mod metered;
pub mod ollama;
pub mod openai;

use argubot_domain::{ChatMessage, ChatRole, Generator};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

pub use metered::{GenerationMetrics, MeteredProvider, MetricsSnapshot};
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;

/// Errors that can occur during generation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from the provider
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// The request did not finish in time
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

impl LlmError {
    /// Classify a transport error from the HTTP client
    pub(crate) fn from_transport(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            LlmError::Timeout(timeout)
        } else {
            LlmError::Communication(format!("Request failed: {}", err))
        }
    }

    /// Whether a retry could plausibly succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            LlmError::Communication(_) | LlmError::RateLimitExceeded | LlmError::Timeout(_)
        )
    }
}

/// Sampling parameters forwarded to HTTP providers
///
/// Unset fields are left to the provider's defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SamplingOptions {
    /// Sampling temperature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Upper bound on generated tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// One call received by a [`MockProvider`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// Messages as sent
    pub messages: Vec<ChatMessage>,
    /// Model identifier as sent
    pub model: String,
}

impl RecordedCall {
    /// Content of the system message, if any
    pub fn system(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == ChatRole::System)
            .map(|m| m.content.as_str())
    }

    /// Content of the final message
    pub fn last_content(&self) -> Option<&str> {
        self.messages.last().map(|m| m.content.as_str())
    }
}

#[derive(Debug, Default)]
struct MockState {
    queue: VecDeque<Result<String, LlmError>>,
    responses: HashMap<String, String>,
    failure: Option<LlmError>,
    calls: Vec<RecordedCall>,
}

/// Mock generation provider for deterministic testing
///
/// Replies are chosen in this order: a configured failure, the next scripted
/// outcome in the queue (a reply or an error), a reply registered for the
/// content of the final message, then the default reply. Every call is
/// recorded.
///
/// Clones share state, so a test can keep a handle while an agent owns the
/// provider.
///
/// # Examples
///
/// ```
/// use argubot_domain::{ChatMessage, Generator};
/// use argubot_llm::MockProvider;
///
/// let rt = tokio::runtime::Runtime::new().unwrap();
/// let provider = MockProvider::new("fallback");
/// provider.add_response("ping", "pong");
/// provider.push_reply("first");
///
/// let ask = |text: &str| rt.block_on(provider.complete(&[ChatMessage::user(text)], "m"));
/// assert_eq!(ask("ping").unwrap(), "first");
/// assert_eq!(ask("ping").unwrap(), "pong");
/// assert_eq!(ask("other").unwrap(), "fallback");
/// assert_eq!(provider.call_count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    latency: Option<Duration>,
    state: Arc<Mutex<MockState>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed reply for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            latency: None,
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// A provider that fails every call with a communication error
    pub fn failing(reason: impl Into<String>) -> Self {
        let provider = Self::default();
        provider.set_failure(Some(LlmError::Communication(reason.into())));
        provider
    }

    /// Script replies returned in order before any other rule applies
    pub fn with_replies<I, S>(self, replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for reply in replies {
            self.push_reply(reply);
        }
        self
    }

    /// Sleep this long before answering each call
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Queue one scripted reply
    pub fn push_reply(&self, reply: impl Into<String>) {
        self.lock().queue.push_back(Ok(reply.into()));
    }

    /// Queue one scripted failure, answered in turn with the scripted replies
    pub fn push_failure(&self, error: LlmError) {
        self.lock().queue.push_back(Err(error));
    }

    /// Add a specific reply for a given final-message content
    pub fn add_response(&self, prompt: impl Into<String>, response: impl Into<String>) {
        self.lock().responses.insert(prompt.into(), response.into());
    }

    /// Fail every call with `error` until cleared with `None`
    pub fn set_failure(&self, error: Option<LlmError>) {
        self.lock().failure = error;
    }

    /// Get the number of times complete was called
    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    /// Every call received so far, oldest first
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    /// Forget recorded calls
    pub fn reset_calls(&self) {
        self.lock().calls.clear();
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn answer(&self, messages: &[ChatMessage], model: &str) -> Result<String, LlmError> {
        let mut state = self.lock();
        state.calls.push(RecordedCall {
            messages: messages.to_vec(),
            model: model.to_string(),
        });

        if let Some(error) = &state.failure {
            return Err(error.clone());
        }
        if let Some(outcome) = state.queue.pop_front() {
            return outcome;
        }
        let key = messages.last().map(|m| m.content.as_str()).unwrap_or("");
        if let Some(reply) = state.responses.get(key) {
            return Ok(reply.clone());
        }
        Ok(self.default_response.clone())
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl Generator for MockProvider {
    type Error = LlmError;

    async fn complete(&self, messages: &[ChatMessage], model: &str) -> Result<String, LlmError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        debug!("mock completion: {} messages, model {}", messages.len(), model);
        self.answer(messages, model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(text: &str) -> Vec<ChatMessage> {
        vec![ChatMessage::system("be brief"), ChatMessage::user(text)]
    }

    #[tokio::test]
    async fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider.complete(&user("any prompt"), "m").await;
        assert_eq!(result.unwrap(), "Test response");
    }

    #[tokio::test]
    async fn test_mock_provider_specific_responses() {
        let provider = MockProvider::default();
        provider.add_response("hello", "world");
        provider.add_response("foo", "bar");

        assert_eq!(provider.complete(&user("hello"), "m").await.unwrap(), "world");
        assert_eq!(provider.complete(&user("foo"), "m").await.unwrap(), "bar");
        assert_eq!(
            provider.complete(&user("unknown"), "m").await.unwrap(),
            "Default mock response"
        );
    }

    #[tokio::test]
    async fn test_queue_takes_precedence() {
        let provider = MockProvider::default().with_replies(["one", "two"]);
        provider.add_response("hello", "world");

        assert_eq!(provider.complete(&user("hello"), "m").await.unwrap(), "one");
        assert_eq!(provider.complete(&user("hello"), "m").await.unwrap(), "two");
        assert_eq!(provider.complete(&user("hello"), "m").await.unwrap(), "world");
    }

    #[tokio::test]
    async fn test_mock_provider_records_calls() {
        let provider = MockProvider::new("ok");
        assert_eq!(provider.call_count(), 0);

        provider.complete(&user("first"), "model-a").await.unwrap();
        provider.complete(&user("second"), "model-b").await.unwrap();

        let calls = provider.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].model, "model-a");
        assert_eq!(calls[0].system(), Some("be brief"));
        assert_eq!(calls[1].last_content(), Some("second"));

        provider.reset_calls();
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_mock_provider_failure() {
        let provider = MockProvider::failing("offline").with_replies(["never"]);

        let result = provider.complete(&user("x"), "m").await;
        assert_eq!(result, Err(LlmError::Communication("offline".to_string())));
        assert_eq!(provider.call_count(), 1);

        provider.set_failure(None);
        assert_eq!(provider.complete(&user("x"), "m").await.unwrap(), "never");
    }

    #[tokio::test]
    async fn test_scripted_failure_in_queue() {
        let provider = MockProvider::new("after").with_replies(["first"]);
        provider.push_failure(LlmError::Timeout(Duration::from_secs(2)));

        assert_eq!(provider.complete(&user("x"), "m").await.unwrap(), "first");
        assert_eq!(
            provider.complete(&user("x"), "m").await,
            Err(LlmError::Timeout(Duration::from_secs(2)))
        );
        assert_eq!(provider.complete(&user("x"), "m").await.unwrap(), "after");
        assert_eq!(provider.call_count(), 3);
    }

    #[tokio::test]
    async fn test_mock_provider_clone_shares_state() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        provider1.complete(&user("test"), "m").await.unwrap();

        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_provider_latency() {
        let provider = MockProvider::new("slow").with_latency(Duration::from_millis(50));
        let start = std::time::Instant::now();
        provider.complete(&user("x"), "m").await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn test_transient_errors() {
        assert!(LlmError::RateLimitExceeded.is_transient());
        assert!(LlmError::Timeout(Duration::from_secs(1)).is_transient());
        assert!(!LlmError::ModelNotAvailable("x".into()).is_transient());
        assert!(!LlmError::InvalidResponse("x".into()).is_transient());
    }
}
