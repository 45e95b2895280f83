//! Error types for the chat binary.

use argubot_agents::AgentError;
use argubot_corpus::CorpusError;
use argubot_llm::LlmError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Corpus could not be loaded
    #[error("Corpus error: {0}")]
    Corpus(#[from] CorpusError),

    /// Bot construction or reply failed
    #[error(transparent)]
    Agent(#[from] AgentError),

    /// Generation provider could not be set up
    #[error("Provider error: {0}")]
    Provider(#[from] LlmError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Line editor failure
    #[error("Line editor error: {0}")]
    Readline(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
