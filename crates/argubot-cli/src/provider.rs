//! Generation provider selected from configuration.

use crate::config::{ProviderConfig, ProviderKind};
use crate::error::{CliError, Result};
use argubot_agents::GenerationConfig;
use argubot_domain::{ChatMessage, Generator};
use argubot_llm::{LlmError, MockProvider, OllamaProvider, OpenAiProvider, SamplingOptions};
use tracing::info;

/// The generation service backing a chat session.
#[derive(Debug, Clone)]
pub enum Provider {
    /// Local Ollama server
    Ollama(OllamaProvider),
    /// OpenAI-compatible API
    OpenAi(OpenAiProvider),
    /// Scripted replies
    Mock(MockProvider),
    /// No service; the bot never generates
    Disabled,
}

impl Provider {
    /// Build the provider named by `config`, sampling as `generation` asks.
    pub fn from_config(config: &ProviderConfig, generation: &GenerationConfig) -> Result<Self> {
        let sampling = SamplingOptions {
            temperature: generation.temperature,
            max_tokens: generation.max_tokens,
        };

        let provider = match config.kind {
            ProviderKind::Ollama => {
                let endpoint = config
                    .endpoint
                    .clone()
                    .unwrap_or_else(|| argubot_llm::ollama::DEFAULT_ENDPOINT.to_string());
                let ollama = OllamaProvider::with_timeout(endpoint, generation.timeout())?
                    .with_max_retries(config.max_retries)
                    .with_sampling(sampling);
                Provider::Ollama(ollama)
            }
            ProviderKind::OpenAi => {
                let api_key = config.resolve_api_key().ok_or_else(|| {
                    CliError::Config(format!(
                        "No API key configured; set provider.api_key or {}",
                        config.api_key_env
                    ))
                })?;
                let openai = match &config.endpoint {
                    Some(base_url) => OpenAiProvider::with_base_url(api_key, base_url.as_str())?,
                    None => OpenAiProvider::new(api_key)?,
                };
                Provider::OpenAi(openai.with_sampling(sampling))
            }
            ProviderKind::Mock => Provider::Mock(MockProvider::new(config.mock_reply.as_str())),
        };

        info!("Using {} generation provider", provider.label());
        Ok(provider)
    }

    /// Short name for logs and status lines.
    pub fn label(&self) -> &'static str {
        match self {
            Provider::Ollama(_) => "ollama",
            Provider::OpenAi(_) => "openai",
            Provider::Mock(_) => "mock",
            Provider::Disabled => "disabled",
        }
    }
}

impl Generator for Provider {
    type Error = LlmError;

    async fn complete(
        &self,
        messages: &[ChatMessage],
        model: &str,
    ) -> std::result::Result<String, LlmError> {
        match self {
            Provider::Ollama(p) => p.complete(messages, model).await,
            Provider::OpenAi(p) => p.complete(messages, model).await,
            Provider::Mock(p) => p.complete(messages, model).await,
            Provider::Disabled => Err(LlmError::ModelNotAvailable(format!(
                "{} (no generation provider configured)",
                model
            ))),
        }
    }
}
