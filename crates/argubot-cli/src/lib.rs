//! Argubot CLI library.
//!
//! Configuration, provider selection, output formatting and the interactive
//! chat loop behind the `argubot` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod provider;
pub mod repl;

pub use cli::{Cli, Command};
pub use config::{ArgubotConfig, ProviderConfig, ProviderKind};
pub use error::{CliError, Result};
pub use output::Formatter;
pub use provider::Provider;
pub use repl::{ChatSession, ReplInput};
