//! Chat command implementation.

use super::{corpus_paths, load_retriever};
use crate::cli::ChatArgs;
use crate::config::ArgubotConfig;
use crate::error::Result;
use crate::output::Formatter;
use crate::provider::Provider;
use crate::repl::{run_chat, ChatSession};
use argubot_agents::{Argubot, BotConfig};
use argubot_domain::Agent;
use argubot_llm::{GenerationMetrics, MeteredProvider};
use std::sync::Arc;

/// Merge command-line overrides into the configured bot.
pub fn bot_config(args: &ChatArgs, config: &ArgubotConfig) -> BotConfig {
    let mut bot = config.bot.clone();
    if let Some(kind) = args.bot {
        // A different kind keeps tuning sections but not the old kind's name
        if kind != bot.kind {
            bot.name = None;
        }
        bot.kind = kind;
    }
    if let Some(seed) = args.seed {
        bot.seed = Some(seed);
    }
    if let Some(name) = &args.name {
        bot.name = Some(name.clone());
    }
    if let Some(model) = &args.model {
        bot.generation.model = model.clone();
    }
    bot
}

/// Build the bot the arguments and config describe, with the counters of
/// its generation provider.
pub fn build_bot(
    args: &ChatArgs,
    config: &ArgubotConfig,
) -> Result<(Argubot<MeteredProvider<Provider>>, Arc<GenerationMetrics>)> {
    let bot_config = bot_config(args, config);

    let retriever = if bot_config.kind.needs_corpus() {
        Some(load_retriever(&corpus_paths(&args.corpus, config), config)?)
    } else {
        None
    };

    let provider = if bot_config.kind.needs_generator() {
        Provider::from_config(&config.provider, &bot_config.generation)?
    } else {
        Provider::Disabled
    };

    let metered = MeteredProvider::new(provider);
    let metrics = metered.metrics();
    let bot = Argubot::from_config(&bot_config, retriever, metered)?;
    Ok((bot, metrics))
}

/// Execute the chat command.
pub async fn execute_chat(
    args: &ChatArgs,
    config: &ArgubotConfig,
    formatter: &Formatter,
) -> Result<()> {
    let (bot, metrics) = build_bot(args, config)?;
    println!(
        "{}",
        formatter.success(&format!("{} the {} is ready", bot.name(), bot.kind()))
    );

    let session = ChatSession::new(bot, config.settings.human_name.as_str());
    run_chat(session, metrics, args.bot_first, formatter).await
}
