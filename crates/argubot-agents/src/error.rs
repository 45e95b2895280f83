//! Error types for agents

use argubot_corpus::{CorpusError, NoMatchError};
use std::fmt;
use thiserror::Error;

/// Which generation call of a turn failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationStage {
    /// The single call of a prompted agent
    Reply,
    /// Rewriting the last turn into an explicit statement
    Paraphrase,
    /// The user-facing reply of a two-stage agent
    Final,
    /// The private analysis of the last turn
    Analysis,
}

impl GenerationStage {
    /// Lower-case stage name
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationStage::Reply => "reply",
            GenerationStage::Paraphrase => "paraphrase",
            GenerationStage::Final => "final",
            GenerationStage::Analysis => "analysis",
        }
    }
}

impl fmt::Display for GenerationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while building an agent or producing a turn
#[derive(Error, Debug)]
pub enum AgentError {
    /// The generation capability failed or timed out
    #[error("Generation failed at {stage} stage: {reason}")]
    Generation {
        /// The failing call
        stage: GenerationStage,
        /// Stringified provider error
        reason: String,
    },

    /// Retrieval found nothing usable
    #[error(transparent)]
    NoMatch(#[from] NoMatchError),

    /// The corpus cannot back this agent
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A corpus guarantee the agent relies on did not hold
    #[error("Invariant violated: {0}")]
    InvariantViolation(String),
}

impl AgentError {
    /// Build a generation error for `stage`
    pub fn generation(stage: GenerationStage, reason: impl fmt::Display) -> Self {
        AgentError::Generation {
            stage,
            reason: reason.to_string(),
        }
    }

    /// The failing stage, for generation errors
    pub fn stage(&self) -> Option<GenerationStage> {
        match self {
            AgentError::Generation { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

impl From<CorpusError> for AgentError {
    fn from(e: CorpusError) -> Self {
        AgentError::Corpus(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argubot_corpus::ClaimFilter;

    #[test]
    fn test_generation_error_names_stage() {
        let err = AgentError::generation(GenerationStage::Paraphrase, "connection refused");
        assert_eq!(err.stage(), Some(GenerationStage::Paraphrase));
        assert_eq!(
            err.to_string(),
            "Generation failed at paraphrase stage: connection refused"
        );
    }

    #[test]
    fn test_no_match_is_transparent() {
        let err = AgentError::from(NoMatchError {
            query: "q".to_string(),
            filter: ClaimFilter::HasOpposition,
        });
        assert!(err.to_string().starts_with("No claims matching HasOpposition"));
        assert_eq!(err.stage(), None);
    }

    #[test]
    fn test_corpus_error_conversion() {
        let err = AgentError::from(CorpusError::Empty);
        assert!(matches!(err, AgentError::Corpus(_)));
    }
}
