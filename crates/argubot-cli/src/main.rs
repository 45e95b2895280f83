//! Argubot CLI - chat with argument bots over a debate corpus.

use anyhow::Context;
use argubot_cli::commands::{self, corpus_paths, load_retriever};
use argubot_cli::{ArgubotConfig, Cli, Command, Formatter};
use clap::Parser;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let config = ArgubotConfig::load(cli.config.as_deref())
        .context("Failed to load configuration")?;

    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(color_enabled);

    match cli.command {
        Command::Chat(args) => {
            commands::execute_chat(&args, &config, &formatter).await?;
        }
        Command::Search(args) => {
            let retriever = load_retriever(&corpus_paths(&args.corpus, &config), &config)?;
            commands::execute_search(&args, &retriever, &formatter)?;
        }
        Command::Chain(args) => {
            let retriever = load_retriever(&corpus_paths(&args.corpus, &config), &config)?;
            commands::execute_chain(&args, &retriever, &formatter)?;
        }
    }

    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` or the verbosity flag.
fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();
}
