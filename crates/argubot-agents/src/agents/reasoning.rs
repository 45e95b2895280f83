use super::complete_within;
use crate::config::GenerationConfig;
use crate::error::{AgentError, GenerationStage};
use crate::prompt::{analysis_messages, considered_reply_messages};
use argubot_domain::{Agent, Dialogue, Generator};
use tracing::debug;

/// Analyse the last turn privately, then reply
///
/// The analysis only feeds the second call; it is never returned.
#[derive(Debug, Clone)]
pub struct ReasoningAgent<G> {
    name: String,
    generator: G,
    generation: GenerationConfig,
}

impl<G: Generator> ReasoningAgent<G> {
    /// Create a private-reasoning agent
    pub fn new(name: impl Into<String>, generator: G, generation: GenerationConfig) -> Self {
        Self {
            name: name.into(),
            generator,
            generation,
        }
    }
}

impl<G: Generator> Agent for ReasoningAgent<G> {
    type Error = AgentError;

    fn name(&self) -> &str {
        &self.name
    }

    async fn respond(&self, dialogue: &Dialogue) -> Result<String, AgentError> {
        let last_turn = dialogue.last().map(|t| t.content.as_str()).unwrap_or("");

        let analysis = complete_within(
            &self.generator,
            &analysis_messages(last_turn),
            &self.generation,
            GenerationStage::Analysis,
        )
        .await?;
        let analysis = analysis.trim();
        debug!("{}: private analysis of {} chars", self.name, analysis.len());

        let reply = complete_within(
            &self.generator,
            &considered_reply_messages(analysis, last_turn),
            &self.generation,
            GenerationStage::Final,
        )
        .await?;
        Ok(reply.trim().to_string())
    }
}
