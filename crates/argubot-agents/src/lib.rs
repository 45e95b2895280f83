//! Argubot Agents
//!
//! Dialogue agents that argue with their interlocutor, either by looking up
//! recorded counter-arguments in a claim corpus or by prompting a generation
//! provider.
//!
//! # Overview
//!
//! | Kind      | Strategy                                              |
//! |-----------|-------------------------------------------------------|
//! | `airhead` | always the same reply                                 |
//! | `alice`   | the dialogue under a fixed debating instruction       |
//! | `akiko`   | a counter-argument to the claim closest to last turn  |
//! | `akiki`   | like `akiko`, querying with a window of recent turns  |
//! | `aragorn` | paraphrase, retrieve related claims, grounded reply   |
//! | `awsom`   | private analysis of the last turn, then a reply       |
//!
//! # Architecture
//!
//! ```text
//! Dialogue → Argubot ─┬─ Retriever (argubot-corpus)
//!                     └─ Generator (argubot-llm)  → reply
//! ```
//!
//! Agents are stateless across turns: everything they know about the
//! conversation comes from the dialogue they are handed. Generation calls
//! are bounded by the configured timeout and never retried here.
//!
//! # Example Usage
//!
//! ```
//! use argubot_agents::{Argubot, BotConfig, BotKind};
//! use argubot_corpus::{parse_sources, Retriever};
//! use argubot_domain::{Agent, Dialogue};
//! use argubot_llm::MockProvider;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let graph = parse_sources(&[(
//!     "pets.txt",
//!     "1. Cats make the best pets.\n1.1. Con: Dogs are more loyal than cats.\n",
//! )])?;
//! let retriever = Arc::new(Retriever::new(graph));
//!
//! let config = BotConfig::new(BotKind::Akiko).with_seed(42);
//! let bot = Argubot::from_config(&config, Some(retriever), MockProvider::default())?;
//!
//! let dialogue = Dialogue::new().add("Human", "Cats are wonderful pets");
//! assert_eq!(bot.respond(&dialogue).await?, "Dogs are more loyal than cats.");
//! # Ok(())
//! # }
//! # tokio::runtime::Runtime::new().unwrap().block_on(example()).unwrap();
//! ```

#![warn(missing_docs)]

pub mod agents;
pub mod argubot;
pub mod config;
pub mod error;
pub mod prompt;
pub mod random;

pub use agents::{
    ConstantAgent, ContextualKialoAgent, KialoAgent, PromptedAgent, RagAgent, ReasoningAgent,
    NO_RELEVANT_RESPONSE,
};
pub use argubot::Argubot;
pub use config::{BotConfig, BotKind, GenerationConfig, LookupConfig, DEFAULT_CONSTANT_REPLY};
pub use error::{AgentError, GenerationStage};
pub use random::RandomSource;
