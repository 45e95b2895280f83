use super::complete_within;
use crate::config::GenerationConfig;
use crate::error::{AgentError, GenerationStage};
use crate::prompt::{dialogue_messages, DEBATER_INSTRUCTIONS};
use argubot_domain::{Agent, Dialogue, Generator};

/// Forwards the dialogue to a generation provider under a fixed instruction
///
/// The provider's text is returned verbatim. Failures are reported, never
/// retried here.
#[derive(Debug, Clone)]
pub struct PromptedAgent<G> {
    name: String,
    system: String,
    generator: G,
    generation: GenerationConfig,
}

impl<G: Generator> PromptedAgent<G> {
    /// Create a prompted agent with the built-in debating instruction
    pub fn new(name: impl Into<String>, generator: G, generation: GenerationConfig) -> Self {
        Self::with_system(name, DEBATER_INSTRUCTIONS, generator, generation)
    }

    /// Create a prompted agent with its own system instruction
    pub fn with_system(
        name: impl Into<String>,
        system: impl Into<String>,
        generator: G,
        generation: GenerationConfig,
    ) -> Self {
        Self {
            name: name.into(),
            system: system.into(),
            generator,
            generation,
        }
    }

    /// The system instruction
    pub fn system(&self) -> &str {
        &self.system
    }
}

impl<G: Generator> Agent for PromptedAgent<G> {
    type Error = AgentError;

    fn name(&self) -> &str {
        &self.name
    }

    async fn respond(&self, dialogue: &Dialogue) -> Result<String, AgentError> {
        let messages = dialogue_messages(&self.system, dialogue, &self.name);
        complete_within(
            &self.generator,
            &messages,
            &self.generation,
            GenerationStage::Reply,
        )
        .await
    }
}
