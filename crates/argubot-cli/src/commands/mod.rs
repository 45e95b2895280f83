//! Command implementations.

pub mod chain;
pub mod chat;
pub mod search;

pub use self::chain::execute_chain;
pub use self::chat::execute_chat;
pub use self::search::execute_search;

use crate::cli::CorpusArgs;
use crate::config::ArgubotConfig;
use crate::error::{CliError, Result};
use argubot_corpus::Retriever;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Corpus paths from the command line, else from the config file.
pub fn corpus_paths(args: &CorpusArgs, config: &ArgubotConfig) -> Vec<PathBuf> {
    if args.paths.is_empty() {
        config.corpus.clone()
    } else {
        args.paths.clone()
    }
}

/// Load and index the corpus at `paths`.
pub fn load_retriever(paths: &[PathBuf], config: &ArgubotConfig) -> Result<Arc<Retriever>> {
    if paths.is_empty() {
        return Err(CliError::InvalidInput(
            "No corpus given; pass --corpus or set `corpus` in the config file".to_string(),
        ));
    }

    let retriever = Retriever::load(paths, config.retrieval.clone())?;
    let graph = retriever.graph();
    info!(
        "Loaded {} claims in {} discussion(s), {} with counter-arguments",
        graph.len(),
        graph.roots().len(),
        graph.opposed_count()
    );
    Ok(Arc::new(retriever))
}
