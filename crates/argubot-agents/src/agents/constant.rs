use crate::error::AgentError;
use argubot_domain::{Agent, Dialogue};

/// Always says the same thing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantAgent {
    name: String,
    reply: String,
}

impl ConstantAgent {
    /// Create a constant agent
    pub fn new(name: impl Into<String>, reply: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reply: reply.into(),
        }
    }

    /// The fixed reply
    pub fn reply(&self) -> &str {
        &self.reply
    }
}

impl Agent for ConstantAgent {
    type Error = AgentError;

    fn name(&self) -> &str {
        &self.name
    }

    async fn respond(&self, _dialogue: &Dialogue) -> Result<String, AgentError> {
        Ok(self.reply.clone())
    }
}
