//! Configuration for argubots

use crate::random::RandomSource;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Reply of the constant bot unless configured otherwise
pub const DEFAULT_CONSTANT_REPLY: &str = "I know right???";

/// Which argubot to build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BotKind {
    /// Always says the same thing
    Airhead,
    /// Prompted generative model
    #[default]
    Alice,
    /// Counter-argument lookup on the last turn
    Akiko,
    /// Counter-argument lookup on a window of recent turns
    Akiki,
    /// Paraphrase, retrieve, then generate
    Aragorn,
    /// Private analysis, then reply
    Awsom,
}

impl BotKind {
    /// Every kind, in declaration order
    pub const ALL: [BotKind; 6] = [
        BotKind::Airhead,
        BotKind::Alice,
        BotKind::Akiko,
        BotKind::Akiki,
        BotKind::Aragorn,
        BotKind::Awsom,
    ];

    /// Lower-case identifier used in config files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            BotKind::Airhead => "airhead",
            BotKind::Alice => "alice",
            BotKind::Akiko => "akiko",
            BotKind::Akiki => "akiki",
            BotKind::Aragorn => "aragorn",
            BotKind::Awsom => "awsom",
        }
    }

    /// Speaker name used when none is configured
    pub fn default_name(&self) -> &'static str {
        match self {
            BotKind::Airhead => "Airhead",
            BotKind::Alice => "Alice",
            BotKind::Akiko => "Akiko",
            BotKind::Akiki => "Akiki",
            BotKind::Aragorn => "Aragorn",
            BotKind::Awsom => "Awsom",
        }
    }

    /// Whether this kind calls a generation provider
    pub fn needs_generator(&self) -> bool {
        matches!(self, BotKind::Alice | BotKind::Aragorn | BotKind::Awsom)
    }

    /// Whether this kind reads the claim corpus
    pub fn needs_corpus(&self) -> bool {
        matches!(self, BotKind::Akiko | BotKind::Akiki | BotKind::Aragorn)
    }
}

impl fmt::Display for BotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BotKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BotKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let names: Vec<&str> = BotKind::ALL.iter().map(|k| k.as_str()).collect();
                format!("unknown bot '{}', expected one of: {}", s, names.join(", "))
            })
    }
}

/// Settings for calls to the generation provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Model identifier passed on every call
    pub model: String,

    /// Maximum time for a single generation call (seconds)
    pub timeout_secs: u64,

    /// Upper bound on generated tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Sampling temperature
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl GenerationConfig {
    /// Get the call timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        if self.max_tokens == Some(0) {
            return Err("max_tokens must be greater than 0".to_string());
        }
        if let Some(t) = self.temperature {
            if !(0.0..=2.0).contains(&t) {
                return Err(format!("temperature must be within [0, 2], got {}", t));
            }
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: "llama3".to_string(),
            timeout_secs: 60,
            max_tokens: None,
            temperature: None,
        }
    }
}

/// Settings for the corpus-lookup bots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// How many similar claims to choose from
    pub candidates: usize,

    /// How many recent turns form the query of the contextual bot
    pub context_turns: usize,

    /// Skip claims whose text already appears in the dialogue
    pub avoid_repeats: bool,
}

impl LookupConfig {
    /// Varied preset: a wider candidate pool and no repeated claims
    pub fn varied() -> Self {
        Self {
            candidates: 5,
            context_turns: 3,
            avoid_repeats: true,
        }
    }

    /// Focused preset: always the single closest claim, queried on the last turn only
    pub fn focused() -> Self {
        Self {
            candidates: 1,
            context_turns: 1,
            avoid_repeats: false,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.candidates == 0 {
            return Err("candidates must be greater than 0".to_string());
        }
        if self.context_turns == 0 {
            return Err("context_turns must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            candidates: 3,
            context_turns: 3,
            avoid_repeats: false,
        }
    }
}

/// Everything needed to build one argubot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Which bot to build
    pub kind: BotKind,

    /// Speaker name; the kind's default name when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Seed for reproducible random choices; fresh entropy when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Generation provider settings
    pub generation: GenerationConfig,

    /// Corpus lookup settings
    pub lookup: LookupConfig,

    /// Reply of the constant bot
    pub constant_reply: String,

    /// Replaces the prompted bot's built-in system instruction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
}

impl BotConfig {
    /// Default configuration for `kind`
    pub fn new(kind: BotKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Set the seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the speaker name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The speaker name this configuration produces
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or_else(|| self.kind.default_name())
    }

    /// Random source seeded from `seed`, or from entropy
    pub fn random_source(&self) -> RandomSource {
        match self.seed {
            Some(seed) => RandomSource::seeded(seed),
            None => RandomSource::from_entropy(),
        }
    }

    /// Validate the configuration
    ///
    /// Sections the selected kind never reads are not checked.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err("name must not be blank".to_string());
            }
        }
        match self.kind {
            BotKind::Airhead => {
                if self.constant_reply.is_empty() {
                    return Err("constant_reply must not be empty".to_string());
                }
            }
            BotKind::Akiko | BotKind::Akiki => self.lookup.validate()?,
            BotKind::Aragorn => {
                self.lookup.validate()?;
                self.generation.validate()?;
            }
            BotKind::Alice | BotKind::Awsom => self.generation.validate()?,
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            kind: BotKind::default(),
            name: None,
            seed: None,
            generation: GenerationConfig::default(),
            lookup: LookupConfig::default(),
            constant_reply: DEFAULT_CONSTANT_REPLY.to_string(),
            system_prompt: None,
        }
    }
}
