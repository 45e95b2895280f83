//! Search and chain commands over a corpus on disk

use argubot_cli::cli::{ChainArgs, CorpusArgs, SearchArgs};
use argubot_cli::commands::chain::render_chain;
use argubot_cli::commands::search::render_search;
use argubot_cli::commands::{corpus_paths, load_retriever};
use argubot_cli::{ArgubotConfig, CliError, Formatter};
use argubot_corpus::Retriever;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

const TRANSIT: &str = "\
Discussion Title: Transit
1. Public transit should be free.
1.1. Con: Free fares would starve transit budgets.
1.1.1. Pro: Fare revenue pays for maintenance.
2. Cities should build more bike lanes.
";

fn retriever() -> (TempDir, Arc<Retriever>) {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("transit.txt"), TRANSIT).unwrap();
    let retriever =
        load_retriever(&[dir.path().to_path_buf()], &ArgubotConfig::default()).unwrap();
    (dir, retriever)
}

fn search(query: &str) -> SearchArgs {
    SearchArgs {
        query: query.to_string(),
        corpus: CorpusArgs::default(),
        limit: 5,
        with_opposition: false,
        json: false,
    }
}

fn chain(seed: u64) -> ChainArgs {
    ChainArgs {
        corpus: CorpusArgs::default(),
        seed: Some(seed),
        root: None,
    }
}

#[test]
fn test_search_ranks_closest_first() {
    let (_dir, retriever) = retriever();
    let formatter = Formatter::new(false);

    let mut args = search("bike lanes for cities");
    args.json = true;
    let output = render_search(&args, &retriever, &formatter).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed[0]["key"], "Transit#2");
    assert_eq!(parsed.as_array().unwrap().len(), 4);

    args.json = false;
    let table = render_search(&args, &retriever, &formatter).unwrap();
    assert!(table.contains("Cities should build more bike lanes."));
}

#[test]
fn test_search_with_opposition() {
    let (_dir, retriever) = retriever();
    let mut args = search("bike lanes for cities");
    args.with_opposition = true;
    args.json = true;

    let output = render_search(&args, &retriever, &Formatter::new(false)).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    let keys: Vec<&str> = parsed
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["Transit#1"]);
}

#[test]
fn test_search_rejects_zero_limit() {
    let (_dir, retriever) = retriever();
    let mut args = search("transit");
    args.limit = 0;
    assert!(matches!(
        render_search(&args, &retriever, &Formatter::new(false)),
        Err(CliError::InvalidInput(_))
    ));
}

#[test]
fn test_chain_from_named_root() {
    let (_dir, retriever) = retriever();
    let mut args = chain(8);
    args.root = Some("Transit#1".to_string());

    let output = render_chain(&args, &retriever, &Formatter::new(false)).unwrap();
    assert_eq!(
        output,
        "Public transit should be free.\n  Con: Free fares would starve transit budgets.\n    Pro: Fare revenue pays for maintenance."
    );
}

#[test]
fn test_chain_is_reproducible_with_seed() {
    let (_dir, retriever) = retriever();
    let formatter = Formatter::new(false);
    let first = render_chain(&chain(21), &retriever, &formatter).unwrap();
    for _ in 0..5 {
        assert_eq!(render_chain(&chain(21), &retriever, &formatter).unwrap(), first);
    }
}

#[test]
fn test_chain_unknown_root() {
    let (_dir, retriever) = retriever();
    let mut args = chain(1);
    args.root = Some("Transit#9".to_string());
    assert!(matches!(
        render_chain(&args, &retriever, &Formatter::new(false)),
        Err(CliError::InvalidInput(_))
    ));
}

#[test]
fn test_chain_rejects_non_root_start() {
    let (_dir, retriever) = retriever();
    let mut args = chain(1);
    args.root = Some("Transit#1.1".to_string());
    match render_chain(&args, &retriever, &Formatter::new(false)) {
        Err(CliError::InvalidInput(message)) => assert!(message.contains("not a root")),
        other => panic!("Expected InvalidInput, got {:?}", other),
    }
}

#[test]
fn test_chain_always_starts_at_a_root() {
    let (_dir, retriever) = retriever();
    let roots = ["Public transit should be free.", "Cities should build more bike lanes."];
    for seed in 0..20 {
        let output = render_chain(&chain(seed), &retriever, &Formatter::new(false)).unwrap();
        let first = output.lines().next().unwrap();
        assert!(roots.contains(&first), "{} is not a root", first);
    }
}

#[test]
fn test_corpus_paths_prefer_flags() {
    let mut config = ArgubotConfig::default();
    config.corpus = vec![PathBuf::from("from-config/")];

    let flags = CorpusArgs {
        paths: vec![PathBuf::from("from-flags.txt")],
    };
    assert_eq!(
        corpus_paths(&flags, &config),
        vec![PathBuf::from("from-flags.txt")]
    );
    assert_eq!(
        corpus_paths(&CorpusArgs::default(), &config),
        vec![PathBuf::from("from-config/")]
    );
}

#[test]
fn test_no_corpus_is_invalid_input() {
    let result = load_retriever(&[], &ArgubotConfig::default());
    assert!(matches!(result, Err(CliError::InvalidInput(_))));
}
