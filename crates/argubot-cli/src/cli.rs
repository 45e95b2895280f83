//! CLI command definitions and argument parsing.

use argubot_agents::BotKind;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Argubot - argue with a bot about debate topics.
#[derive(Debug, Parser)]
#[command(name = "argubot")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "ARGUBOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Chat with a bot in an interactive session
    Chat(ChatArgs),

    /// Print the claims closest to a query
    Search(SearchArgs),

    /// Print a random root-to-leaf chain of claims
    Chain(ChainArgs),
}

/// Corpus location shared by every command.
#[derive(Debug, Clone, Default, Args)]
pub struct CorpusArgs {
    /// Corpus files or directories of `*.txt` debate exports
    #[arg(long = "corpus", value_name = "PATH", num_args = 1..)]
    pub paths: Vec<PathBuf>,
}

/// Arguments for the chat command.
#[derive(Debug, Args)]
pub struct ChatArgs {
    /// Bot kind (airhead, alice, akiko, akiki, aragorn, awsom)
    #[arg(short, long)]
    pub bot: Option<BotKind>,

    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Seed for reproducible lookup bots
    #[arg(long)]
    pub seed: Option<u64>,

    /// Name the bot speaks under
    #[arg(long)]
    pub name: Option<String>,

    /// Model requested from the generation provider
    #[arg(short, long)]
    pub model: Option<String>,

    /// Let the bot speak first
    #[arg(long)]
    pub bot_first: bool,
}

/// Arguments for the search command.
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Query text
    pub query: String,

    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Maximum number of results
    #[arg(short, long, default_value = "5")]
    pub limit: usize,

    /// Only return claims that have at least one counter-argument
    #[arg(long)]
    pub with_opposition: bool,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the chain command.
#[derive(Debug, Args)]
pub struct ChainArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Seed for a reproducible chain
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start from this root claim key instead of a random root
    #[arg(long)]
    pub root: Option<String>,
}
