//! Dialogue module - the transcript agents respond to
//!
//! A dialogue is an ordered, append-only list of turns. Adding a turn
//! produces a new dialogue; existing turns are never edited or removed.

use std::fmt;

/// One utterance in a dialogue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// Who said it
    pub speaker: String,

    /// What was said
    pub content: String,
}

impl Turn {
    /// Create a new turn
    pub fn new(speaker: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            content: content.into(),
        }
    }
}

/// An append-only transcript
///
/// # Examples
///
/// ```
/// use argubot_domain::Dialogue;
///
/// let empty = Dialogue::new();
/// let d = empty.add("Human", "Cats are better than dogs.");
/// assert!(empty.is_empty());
/// assert_eq!(d.len(), 1);
/// assert_eq!(d.last().unwrap().content, "Cats are better than dogs.");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dialogue {
    turns: Vec<Turn>,
}

impl Dialogue {
    /// Create an empty dialogue
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a new dialogue with one more turn at the end
    pub fn add(&self, speaker: impl Into<String>, content: impl Into<String>) -> Self {
        self.clone().with_turn(speaker, content)
    }

    /// Append a turn, consuming the dialogue
    pub fn with_turn(mut self, speaker: impl Into<String>, content: impl Into<String>) -> Self {
        self.turns.push(Turn::new(speaker, content));
        self
    }

    /// Number of turns
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether no one has spoken yet
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// All turns, oldest first
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// The most recent turn
    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// The most recent `n` turns (fewer if the dialogue is shorter), oldest first
    pub fn last_n(&self, n: usize) -> &[Turn] {
        let start = self.turns.len().saturating_sub(n);
        &self.turns[start..]
    }

    /// Iterate over turns, oldest first
    pub fn iter(&self) -> std::slice::Iter<'_, Turn> {
        self.turns.iter()
    }

    /// Whether any turn's content equals `text` (ignoring surrounding whitespace)
    pub fn mentions(&self, text: &str) -> bool {
        let text = text.trim();
        self.turns.iter().any(|t| t.content.trim() == text)
    }
}

impl<'a> IntoIterator for &'a Dialogue {
    type Item = &'a Turn;
    type IntoIter = std::slice::Iter<'a, Turn>;

    fn into_iter(self) -> Self::IntoIter {
        self.turns.iter()
    }
}

impl fmt::Display for Dialogue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for turn in &self.turns {
            writeln!(f, "({}) {}", turn.speaker, turn.content)?;
        }
        Ok(())
    }
}
