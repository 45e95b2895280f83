use super::complete_within;
use crate::config::{GenerationConfig, LookupConfig};
use crate::error::{AgentError, GenerationStage};
use crate::prompt::{grounded_reply_messages, paraphrase_messages};
use argubot_corpus::Retriever;
use argubot_domain::{Agent, Claim, Dialogue, Generator};
use std::sync::Arc;
use tracing::{debug, warn};

/// Paraphrase the last turn, retrieve related claims, then generate
///
/// Stages:
/// 1. rewrite the last turn as an explicit statement
/// 2. retrieve up to `candidates` opposed claims for that statement
/// 3. reply to the original turn grounded in the retrieved claims
///
/// When retrieval finds nothing the reply is still generated, with an
/// explicit "no related claims" grounding.
#[derive(Debug, Clone)]
pub struct RagAgent<G> {
    name: String,
    generator: G,
    generation: GenerationConfig,
    retriever: Arc<Retriever>,
    lookup: LookupConfig,
}

impl<G: Generator> RagAgent<G> {
    /// Create a retrieval-augmented agent
    pub fn new(
        name: impl Into<String>,
        generator: G,
        generation: GenerationConfig,
        retriever: Arc<Retriever>,
        lookup: LookupConfig,
    ) -> Self {
        Self {
            name: name.into(),
            generator,
            generation,
            retriever,
            lookup,
        }
    }

    fn related_claims(&self, statement: &str) -> Vec<&Claim> {
        match self
            .retriever
            .closest_claims(statement, self.lookup.candidates, true)
        {
            Ok(claims) => {
                debug!("{}: grounding on {} claim(s)", self.name, claims.len());
                claims
            }
            Err(no_match) => {
                warn!("{}: {}; replying without grounding", self.name, no_match);
                Vec::new()
            }
        }
    }
}

impl<G: Generator> Agent for RagAgent<G> {
    type Error = AgentError;

    fn name(&self) -> &str {
        &self.name
    }

    async fn respond(&self, dialogue: &Dialogue) -> Result<String, AgentError> {
        let last_turn = dialogue.last().map(|t| t.content.as_str()).unwrap_or("");

        let explicit = complete_within(
            &self.generator,
            &paraphrase_messages(last_turn),
            &self.generation,
            GenerationStage::Paraphrase,
        )
        .await?;
        let explicit = explicit.trim();
        debug!("{}: paraphrased last turn as {:?}", self.name, explicit);

        let messages = grounded_reply_messages(&self.related_claims(explicit), last_turn);

        let reply = complete_within(
            &self.generator,
            &messages,
            &self.generation,
            GenerationStage::Final,
        )
        .await?;
        Ok(reply.trim().to_string())
    }
}
