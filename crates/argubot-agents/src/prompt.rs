//! Prompts for the generative argubots

use argubot_domain::{ChatMessage, Claim, Dialogue};

/// System instruction of the prompted bot
pub const DEBATER_INSTRUCTIONS: &str = "You are an intelligent bot who wants to broaden your \
user's mind. Ask a conversation starter question.  Then, WHATEVER position the user initially \
takes, push back on it. Try to help the user see the other side of the issue. Answer in 1-2 \
sentences. Be thoughtful and polite.";

const PARAPHRASE_INSTRUCTIONS: &str =
    "Paraphrase the following statement to make it more explicit and detailed:";

const GROUNDED_REPLY_INSTRUCTIONS: &str =
    "Generate a response based on the user's statement and the following related claims:";

/// Grounding used when retrieval finds no related claim
pub const NO_RELATED_CLAIMS: &str = "(no related claims were found)";

const ANALYSIS_INSTRUCTIONS: &str =
    "You are a helpful assistant that analyzes dialogue to infer intent and emotional tone.";

const CONSIDERED_REPLY_INSTRUCTIONS: &str =
    "You are an assistant that responds thoughtfully to human dialogue based on analyzed context.";

/// The whole dialogue as chat messages after a system instruction
///
/// Turns spoken by `own_name` become assistant messages, every other
/// speaker's turns become user messages.
pub fn dialogue_messages(system: &str, dialogue: &Dialogue, own_name: &str) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(dialogue.len() + 1);
    messages.push(ChatMessage::system(system));
    for turn in dialogue {
        if turn.speaker == own_name {
            messages.push(ChatMessage::assistant(turn.content.as_str()));
        } else {
            messages.push(ChatMessage::user(turn.content.as_str()));
        }
    }
    messages
}

/// Ask for an explicit restatement of `statement`
pub fn paraphrase_messages(statement: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(PARAPHRASE_INSTRUCTIONS),
        ChatMessage::user(statement),
    ]
}

/// Ask for a reply to `statement` grounded in `claims`
pub fn grounded_reply_messages(claims: &[&Claim], statement: &str) -> Vec<ChatMessage> {
    let summary = if claims.is_empty() {
        NO_RELATED_CLAIMS.to_string()
    } else {
        claims
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    };
    vec![
        ChatMessage::system(format!("{}\n{}", GROUNDED_REPLY_INSTRUCTIONS, summary)),
        ChatMessage::user(statement),
    ]
}

/// Ask for a private analysis of `statement`
pub fn analysis_messages(statement: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(ANALYSIS_INSTRUCTIONS),
        ChatMessage::user(format!(
            "Analyze the following human statement and summarize their intent, tone, \
             and possible motivations: {}",
            statement
        )),
    ]
}

/// Ask for a reply to `statement` informed by `analysis`
pub fn considered_reply_messages(analysis: &str, statement: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(CONSIDERED_REPLY_INSTRUCTIONS),
        ChatMessage::user(format!(
            "Using the following analysis: {}, generate a helpful and contextually \
             appropriate response to the statement: {}",
            analysis, statement
        )),
    ]
}
