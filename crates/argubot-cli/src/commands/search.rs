//! Search command implementation.

use crate::cli::SearchArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use argubot_corpus::{ClaimFilter, Retriever};

/// Execute the search command.
pub fn execute_search(args: &SearchArgs, retriever: &Retriever, formatter: &Formatter) -> Result<()> {
    println!("{}", render_search(args, retriever, formatter)?);
    Ok(())
}

/// Rank claims for `args.query` and format them.
pub fn render_search(args: &SearchArgs, retriever: &Retriever, formatter: &Formatter) -> Result<String> {
    if args.limit == 0 {
        return Err(CliError::InvalidInput(
            "Limit must be greater than 0".to_string(),
        ));
    }

    let filter = if args.with_opposition {
        ClaimFilter::HasOpposition
    } else {
        ClaimFilter::Any
    };

    let claims = match retriever.closest_matching(&args.query, args.limit, filter) {
        Ok(claims) => claims,
        Err(no_match) => {
            if !args.json {
                return Ok(formatter.warning(&no_match.to_string()));
            }
            Vec::new()
        }
    };

    if args.json {
        formatter.claims_json(&claims)
    } else {
        Ok(formatter.claims_table(&claims))
    }
}
