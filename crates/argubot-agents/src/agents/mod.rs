//! Agent implementations, one type per strategy

mod constant;
mod lookup;
mod prompted;
mod rag;
mod reasoning;

pub use constant::ConstantAgent;
pub use lookup::{ContextualKialoAgent, KialoAgent, NO_RELEVANT_RESPONSE};
pub use prompted::PromptedAgent;
pub use rag::RagAgent;
pub use reasoning::ReasoningAgent;

use crate::config::GenerationConfig;
use crate::error::{AgentError, GenerationStage};
use argubot_domain::{ChatMessage, Generator};
use tokio::time::timeout;
use tracing::debug;

/// One generation call bounded by the configured timeout
pub(crate) async fn complete_within<G: Generator>(
    generator: &G,
    messages: &[ChatMessage],
    config: &GenerationConfig,
    stage: GenerationStage,
) -> Result<String, AgentError> {
    let prompt_chars: usize = messages.iter().map(|m| m.content.len()).sum();
    debug!(
        "{} call: {} messages, {} chars, model {}",
        stage,
        messages.len(),
        prompt_chars,
        config.model
    );

    let text = timeout(config.timeout(), generator.complete(messages, &config.model))
        .await
        .map_err(|_| {
            AgentError::generation(
                stage,
                format!("timed out after {}s", config.timeout_secs),
            )
        })?
        .map_err(|e| AgentError::generation(stage, e))?;

    debug!("{} call returned {} chars", stage, text.len());
    Ok(text)
}
