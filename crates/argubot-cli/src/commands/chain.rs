//! Chain command implementation.

use crate::cli::ChainArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use argubot_corpus::Retriever;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Execute the chain command.
pub fn execute_chain(args: &ChainArgs, retriever: &Retriever, formatter: &Formatter) -> Result<()> {
    println!("{}", render_chain(args, retriever, formatter)?);
    Ok(())
}

/// Sample a chain and format it.
pub fn render_chain(args: &ChainArgs, retriever: &Retriever, formatter: &Formatter) -> Result<String> {
    let root = match &args.root {
        Some(key) => {
            let claim = retriever
                .claim_by_key(key)
                .ok_or_else(|| CliError::InvalidInput(format!("Unknown claim key: {}", key)))?;
            if !claim.is_root() {
                return Err(CliError::InvalidInput(format!(
                    "{} is not a root claim; chains start at a discussion root",
                    key
                )));
            }
            Some(claim.id)
        }
        None => None,
    };

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let chain = retriever.random_chain(&mut rng, root);
    Ok(formatter.chain(&chain))
}
