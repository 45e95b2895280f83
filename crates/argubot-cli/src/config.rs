//! Configuration file for the chat binary.

use crate::error::{CliError, Result};
use argubot_agents::BotConfig;
use argubot_corpus::RetrievalConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration read from `~/.argubot/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArgubotConfig {
    /// Corpus files or directories used when none are given on the command line
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub corpus: Vec<PathBuf>,

    /// Which bot to run and how it is tuned
    #[serde(default)]
    pub bot: BotConfig,

    /// Generation service settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Similarity search tuning
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Terminal settings
    #[serde(default)]
    pub settings: Settings,
}

/// Which generation service backs the generative bots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Local Ollama server
    #[default]
    Ollama,
    /// OpenAI-compatible chat completions API
    OpenAi,
    /// Scripted replies, no network
    Mock,
}

/// Generation service settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Service kind
    #[serde(default)]
    pub kind: ProviderKind,

    /// Base URL; the service default when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// API key; read from `api_key_env` when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Attempts per call for providers that retry
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Reply used by the mock provider
    #[serde(default = "default_mock_reply")]
    pub mock_reply: String,
}

/// Terminal settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Name the human speaks under in the transcript
    #[serde(default = "default_human_name")]
    pub human_name: String,
}

impl ArgubotConfig {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".argubot").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one the default path is tried
    /// and a missing file yields the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => {
                let path = Self::path()?;
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: ArgubotConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a file, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Check every section.
    pub fn validate(&self) -> Result<()> {
        self.bot.validate().map_err(CliError::Config)?;
        self.retrieval.validate().map_err(CliError::Config)?;
        if self.provider.max_retries == 0 {
            return Err(CliError::Config(
                "provider.max_retries must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl ProviderConfig {
    /// The API key from the file or, failing that, the environment.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|key| !key.trim().is_empty())
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::default(),
            endpoint: None,
            api_key: None,
            api_key_env: default_api_key_env(),
            max_retries: default_max_retries(),
            mock_reply: default_mock_reply(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            human_name: default_human_name(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_human_name() -> String {
    "Human".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_max_retries() -> u32 {
    3
}

fn default_mock_reply() -> String {
    "Default mock response".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use argubot_agents::BotKind;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = ArgubotConfig::default();
        assert_eq!(config.bot.kind, BotKind::Alice);
        assert_eq!(config.provider.kind, ProviderKind::Ollama);
        assert!(config.settings.color);
        assert_eq!(config.settings.human_name, "Human");
        assert!(config.corpus.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: ArgubotConfig = toml::from_str(
            r#"
corpus = ["debates/"]

[bot]
kind = "akiki"
seed = 7

[bot.lookup]
context_turns = 5

[provider]
kind = "openai"
endpoint = "http://localhost:9000"
"#,
        )
        .unwrap();

        assert_eq!(config.bot.kind, BotKind::Akiki);
        assert_eq!(config.bot.seed, Some(7));
        assert_eq!(config.bot.lookup.context_turns, 5);
        assert_eq!(config.bot.lookup.candidates, 3);
        assert_eq!(config.provider.kind, ProviderKind::OpenAi);
        assert_eq!(config.provider.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.corpus, vec![PathBuf::from("debates/")]);
        assert!(config.settings.color);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = ArgubotConfig::default();
        config.bot = BotConfig::new(BotKind::Aragorn).with_seed(11);
        config.provider.kind = ProviderKind::Mock;
        config.settings.color = false;
        config.save_to(&path).unwrap();

        let loaded = ArgubotConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = ArgubotConfig::load(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[bot.lookup]\ncandidates = 0\n").unwrap();
        assert!(matches!(
            ArgubotConfig::load_from(&path),
            Err(CliError::Config(_))
        ));

        fs::write(&path, "[provider]\nkind = \"carrier-pigeon\"\n").unwrap();
        assert!(matches!(
            ArgubotConfig::load_from(&path),
            Err(CliError::Toml(_))
        ));
    }

    #[test]
    fn test_api_key_prefers_file() {
        let provider = ProviderConfig {
            api_key: Some("sk-file".to_string()),
            api_key_env: "ARGUBOT_TEST_UNSET_KEY".to_string(),
            ..ProviderConfig::default()
        };
        assert_eq!(provider.resolve_api_key().as_deref(), Some("sk-file"));

        let provider = ProviderConfig {
            api_key: None,
            api_key_env: "ARGUBOT_TEST_UNSET_KEY".to_string(),
            ..ProviderConfig::default()
        };
        assert_eq!(provider.resolve_api_key(), None);
    }
}
