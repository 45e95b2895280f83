//! The closed set of argubots, selected once from configuration

use crate::agents::{
    ConstantAgent, ContextualKialoAgent, KialoAgent, PromptedAgent, RagAgent, ReasoningAgent,
};
use crate::config::{BotConfig, BotKind};
use crate::error::AgentError;
use argubot_corpus::Retriever;
use argubot_domain::{Agent, Dialogue, Generator};
use std::sync::Arc;
use tracing::info;

/// Any argubot
///
/// Each variant owns one strategy; which one is decided when the bot is
/// built and never changes afterwards.
#[derive(Debug)]
pub enum Argubot<G> {
    /// Fixed reply
    Constant(ConstantAgent),
    /// Prompted generative model
    Prompted(PromptedAgent<G>),
    /// Counter-argument lookup on the last turn
    Lookup(KialoAgent),
    /// Counter-argument lookup on recent turns
    ContextualLookup(ContextualKialoAgent),
    /// Paraphrase, retrieve, generate
    Rag(RagAgent<G>),
    /// Private analysis, then reply
    Reasoning(ReasoningAgent<G>),
}

impl<G: Generator> Argubot<G> {
    /// Build the bot described by `config`
    ///
    /// `retriever` is required by the corpus-backed kinds and ignored by the
    /// others. `generator` is only called by the generative kinds.
    ///
    /// # Errors
    ///
    /// Fails on invalid configuration, a missing corpus, or a corpus that
    /// cannot back a lookup bot.
    pub fn from_config(
        config: &BotConfig,
        retriever: Option<Arc<Retriever>>,
        generator: G,
    ) -> Result<Self, AgentError> {
        config.validate().map_err(AgentError::Config)?;

        let name = config.display_name().to_string();
        let corpus = || {
            retriever.clone().ok_or_else(|| {
                AgentError::Config(format!("{} needs a claim corpus", config.kind))
            })
        };

        let bot = match config.kind {
            BotKind::Airhead => {
                Argubot::Constant(ConstantAgent::new(name, config.constant_reply.as_str()))
            }
            BotKind::Alice => {
                let agent = match &config.system_prompt {
                    Some(system) => PromptedAgent::with_system(
                        name,
                        system.as_str(),
                        generator,
                        config.generation.clone(),
                    ),
                    None => PromptedAgent::new(name, generator, config.generation.clone()),
                };
                Argubot::Prompted(agent)
            }
            BotKind::Akiko => Argubot::Lookup(KialoAgent::new(
                name,
                corpus()?,
                config.random_source(),
                config.lookup.clone(),
            )?),
            BotKind::Akiki => Argubot::ContextualLookup(ContextualKialoAgent::new(
                name,
                corpus()?,
                config.random_source(),
                config.lookup.clone(),
            )),
            BotKind::Aragorn => Argubot::Rag(RagAgent::new(
                name,
                generator,
                config.generation.clone(),
                corpus()?,
                config.lookup.clone(),
            )),
            BotKind::Awsom => Argubot::Reasoning(ReasoningAgent::new(
                name,
                generator,
                config.generation.clone(),
            )),
        };

        info!("Built {} bot '{}'", config.kind, bot.name());
        Ok(bot)
    }

    /// Which kind of bot this is
    pub fn kind(&self) -> BotKind {
        match self {
            Argubot::Constant(_) => BotKind::Airhead,
            Argubot::Prompted(_) => BotKind::Alice,
            Argubot::Lookup(_) => BotKind::Akiko,
            Argubot::ContextualLookup(_) => BotKind::Akiki,
            Argubot::Rag(_) => BotKind::Aragorn,
            Argubot::Reasoning(_) => BotKind::Awsom,
        }
    }
}

impl<G: Generator> Agent for Argubot<G> {
    type Error = AgentError;

    fn name(&self) -> &str {
        match self {
            Argubot::Constant(a) => a.name(),
            Argubot::Prompted(a) => a.name(),
            Argubot::Lookup(a) => a.name(),
            Argubot::ContextualLookup(a) => a.name(),
            Argubot::Rag(a) => a.name(),
            Argubot::Reasoning(a) => a.name(),
        }
    }

    async fn respond(&self, dialogue: &Dialogue) -> Result<String, AgentError> {
        match self {
            Argubot::Constant(a) => a.respond(dialogue).await,
            Argubot::Prompted(a) => a.respond(dialogue).await,
            Argubot::Lookup(a) => a.respond(dialogue).await,
            Argubot::ContextualLookup(a) => a.respond(dialogue).await,
            Argubot::Rag(a) => a.respond(dialogue).await,
            Argubot::Reasoning(a) => a.respond(dialogue).await,
        }
    }
}
