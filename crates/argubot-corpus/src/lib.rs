//! Argubot Corpus Layer
//!
//! Loads debate corpora into an in-memory claim forest and answers the
//! retrieval queries agents build on.
//!
//! # Architecture
//!
//! - `loader`: numbered-outline debate exports → [`ClaimGraph`]
//! - `graph`: read-only claim arena with supports/opposes adjacency
//! - `embedding`: TF-IDF text vectors
//! - `similarity`: exact inverted-index nearest-claim search
//! - `retrieval`: [`Retriever`], the query surface used by agents
//!
//! Everything is immutable once built, so a `Retriever` can be shared
//! across threads without locking.
//!
//! # Examples
//!
//! ```
//! use argubot_corpus::{parse_sources, Retriever};
//!
//! let graph = parse_sources(&[(
//!     "pets.txt",
//!     "1. Cats make the best pets.\n1.1. Con: Dogs are more loyal than cats.\n",
//! )])
//! .unwrap();
//! let retriever = Retriever::new(graph);
//!
//! let claims = retriever.closest_claims("cats are great pets", 3, true).unwrap();
//! assert_eq!(claims[0].text, "Cats make the best pets.");
//! let cons = retriever.opposing_arguments(claims[0].id);
//! assert_eq!(cons[0].text, "Dogs are more loyal than cats.");
//! ```

#![warn(missing_docs)]

pub mod embedding;
pub mod error;
pub mod graph;
pub mod loader;
pub mod retrieval;
pub mod similarity;

pub use error::CorpusError;
pub use graph::{ClaimGraph, GraphBuilder};
pub use loader::{load_corpus, parse_sources, CorpusLoader, LoadStats};
pub use retrieval::{ClaimFilter, NoMatchError, RetrievalConfig, Retriever};
pub use similarity::{ScoredClaim, SimilarityIndex};
