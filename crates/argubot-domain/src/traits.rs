//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the domain and infrastructure.
//! Implementations live in other crates.

use crate::{ChatMessage, Dialogue};
use std::future::Future;
use std::sync::Arc;

/// Trait for text-generation providers
///
/// Implemented by the infrastructure layer (argubot-llm). The model
/// identifier is passed on every call; providers hold no default model.
pub trait Generator: Send + Sync {
    /// Error type for generation failures
    type Error: std::fmt::Display + Send;

    /// Generate the next message for a role-tagged conversation
    fn complete(
        &self,
        messages: &[ChatMessage],
        model: &str,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

impl<G: Generator> Generator for Arc<G> {
    type Error = G::Error;

    fn complete(
        &self,
        messages: &[ChatMessage],
        model: &str,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send {
        (**self).complete(messages, model)
    }
}

/// Trait for dialogue agents
///
/// Implemented by the application layer (argubot-agents). An agent never
/// mutates the dialogue it is given; everything it knows about the
/// conversation comes from that dialogue.
pub trait Agent: Send + Sync {
    /// Error type for a failed turn
    type Error;

    /// Speaker name used for this agent's turns
    fn name(&self) -> &str;

    /// Produce the next utterance
    fn respond(
        &self,
        dialogue: &Dialogue,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;
}
