//! Retrieval over a loaded corpus
//!
//! [`Retriever`] pairs a [`ClaimGraph`] with its [`SimilarityIndex`] and
//! answers the queries agents need. Every operation is read-only, so one
//! retriever can be shared (e.g. behind an `Arc`) by any number of
//! concurrent dialogues.

use crate::error::CorpusError;
use crate::graph::ClaimGraph;
use crate::loader::load_corpus;
use crate::similarity::SimilarityIndex;
use argubot_domain::{Claim, ClaimId};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Which claims a similarity search may return
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimFilter {
    /// Every claim
    #[default]
    Any,
    /// Claims with at least one supporting child
    HasSupport,
    /// Claims with at least one opposing child
    HasOpposition,
    /// Claims with both supporting and opposing children
    HasBoth,
}

impl ClaimFilter {
    /// Whether `claim` passes the filter
    pub fn accepts(&self, claim: &Claim) -> bool {
        match self {
            ClaimFilter::Any => true,
            ClaimFilter::HasSupport => claim.has_support(),
            ClaimFilter::HasOpposition => claim.has_opposition(),
            ClaimFilter::HasBoth => claim.has_support() && claim.has_opposition(),
        }
    }
}

/// No claim survived a filtered similarity search
///
/// Recoverable: the caller decides whether to widen the search, fall back to
/// other text, or report the failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("No claims matching {filter:?} found for query {query:?}")]
pub struct NoMatchError {
    /// The query text
    pub query: String,
    /// The filter that removed every candidate
    pub filter: ClaimFilter,
}

/// Tuning for similarity searches
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// How many candidates to fetch per requested result before filtering.
    /// `None` ranks the whole corpus, so a filter only fails when no claim
    /// in the corpus passes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overfetch_factor: Option<usize>,
}

impl RetrievalConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.overfetch_factor == Some(0) {
            return Err("overfetch_factor must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Candidate pool size for a request of `n` results
    fn pool_size(&self, n: usize, corpus: usize) -> usize {
        match self.overfetch_factor {
            Some(factor) => n.saturating_mul(factor).max(n.saturating_add(1)),
            None => corpus,
        }
    }
}

/// Query engine over one corpus
#[derive(Debug, Clone)]
pub struct Retriever {
    graph: ClaimGraph,
    index: SimilarityIndex,
    config: RetrievalConfig,
}

impl Retriever {
    /// Index a graph with the default configuration
    pub fn new(graph: ClaimGraph) -> Self {
        Self::with_config(graph, RetrievalConfig::default())
    }

    /// Index a graph with an explicit configuration
    pub fn with_config(graph: ClaimGraph, config: RetrievalConfig) -> Self {
        let index = SimilarityIndex::build(&graph);
        Self {
            graph,
            index,
            config,
        }
    }

    /// Load corpus files and index them
    pub fn load<P: AsRef<Path>>(paths: &[P], config: RetrievalConfig) -> Result<Self, CorpusError> {
        let graph = load_corpus(paths)?;
        Ok(Self::with_config(graph, config))
    }

    /// The claim graph
    pub fn graph(&self) -> &ClaimGraph {
        &self.graph
    }

    /// The similarity index
    pub fn index(&self) -> &SimilarityIndex {
        &self.index
    }

    /// Active configuration
    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// A claim by id
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this corpus.
    pub fn claim(&self, id: ClaimId) -> &Claim {
        &self.graph[id]
    }

    /// A claim by source key
    pub fn claim_by_key(&self, key: &str) -> Option<&Claim> {
        self.graph.claim_by_key(key)
    }

    /// Parent of a claim
    pub fn parent(&self, id: ClaimId) -> Option<&Claim> {
        self.graph.parent(id)
    }

    /// Up to `n` claims most similar to `query`, optionally restricted to
    /// claims that have at least one opposing child
    pub fn closest_claims(
        &self,
        query: &str,
        n: usize,
        only_with_opposition: bool,
    ) -> Result<Vec<&Claim>, NoMatchError> {
        let filter = if only_with_opposition {
            ClaimFilter::HasOpposition
        } else {
            ClaimFilter::Any
        };
        self.closest_matching(query, n, filter)
    }

    /// Up to `n` claims most similar to `query` that pass `filter`
    pub fn closest_matching(
        &self,
        query: &str,
        n: usize,
        filter: ClaimFilter,
    ) -> Result<Vec<&Claim>, NoMatchError> {
        self.closest_matching_where(query, n, filter, |_| true)
    }

    /// Like [`Retriever::closest_matching`], with an extra caller predicate
    pub fn closest_matching_where<F>(
        &self,
        query: &str,
        n: usize,
        filter: ClaimFilter,
        predicate: F,
    ) -> Result<Vec<&Claim>, NoMatchError>
    where
        F: Fn(&Claim) -> bool,
    {
        let pool = self.config.pool_size(n, self.graph.len());
        let candidates = self.index.nearest(query, pool);

        let survivors: Vec<&Claim> = candidates
            .iter()
            .map(|scored| &self.graph[scored.id])
            .filter(|claim| filter.accepts(claim) && predicate(claim))
            .take(n)
            .collect();

        debug!(
            "closest {:?}: {} of {} candidates kept (n = {})",
            filter,
            survivors.len(),
            candidates.len(),
            n
        );

        if survivors.is_empty() {
            return Err(NoMatchError {
                query: query.to_string(),
                filter,
            });
        }
        Ok(survivors)
    }

    /// Random walk from a root (or `root`) down to a leaf
    ///
    /// The start is drawn uniformly from the roots; each step draws
    /// uniformly from the pooled pro and con children in source order.
    /// The result always holds at least the starting claim and ends at a leaf.
    pub fn random_chain<R: Rng>(&self, rng: &mut R, root: Option<ClaimId>) -> Vec<&Claim> {
        let start = match root {
            Some(id) => id,
            None => {
                let roots = self.graph.roots();
                roots[rng.random_range(0..roots.len())]
            }
        };

        let mut chain = vec![&self.graph[start]];
        let mut current = &self.graph[start];
        while !current.children.is_empty() {
            let next = current.children[rng.random_range(0..current.children.len())];
            current = &self.graph[next];
            chain.push(current);
        }
        chain
    }

    /// The claim's opposing children, in source order
    pub fn opposing_arguments(&self, id: ClaimId) -> Vec<&Claim> {
        self.graph[id]
            .opposes
            .iter()
            .map(|child| &self.graph[*child])
            .collect()
    }

    /// The claim's supporting children, in source order
    pub fn supporting_arguments(&self, id: ClaimId) -> Vec<&Claim> {
        self.graph[id]
            .supports
            .iter()
            .map(|child| &self.graph[*child])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_sources;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const CORPUS: &str = "\
1. Nuclear power is the safest source of energy.
1.1. Con: Nuclear accidents contaminate land for decades.
1.2. Con: Nuclear waste stays dangerous for millennia.
1.3. Pro: Coal kills far more people per unit of energy.
1.3.1. Con: Coal deaths are falling as plants close.
2. Cities should ban private cars downtown.
2.1. Pro: Car-free streets are safer for pedestrians.
";

    fn retriever() -> Retriever {
        Retriever::new(parse_sources(&[("energy.txt", CORPUS)]).unwrap())
    }

    #[test]
    fn test_filter_accepts() {
        let r = retriever();
        let root = r.claim_by_key("energy#1").unwrap();
        let cars = r.claim_by_key("energy#2").unwrap();
        assert!(ClaimFilter::HasBoth.accepts(root));
        assert!(ClaimFilter::HasOpposition.accepts(root));
        assert!(!ClaimFilter::HasOpposition.accepts(cars));
        assert!(ClaimFilter::HasSupport.accepts(cars));
        assert!(ClaimFilter::Any.accepts(cars));
    }

    #[test]
    fn test_closest_claims_respects_opposition_filter() {
        let r = retriever();
        let results = r.closest_claims("ban cars downtown", 3, true).unwrap();
        assert!(results.iter().all(|c| c.has_opposition()));
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_closest_claims_without_filter() {
        let r = retriever();
        let results = r.closest_claims("ban private cars downtown", 1, false).unwrap();
        assert_eq!(results[0].key, "energy#2");
    }

    #[test]
    fn test_no_match() {
        let r = retriever();
        let both = r.closest_matching("cars", 3, ClaimFilter::HasBoth).unwrap();
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].key, "energy#1");

        let err = r
            .closest_matching_where("x", 3, ClaimFilter::Any, |_| false)
            .unwrap_err();
        assert_eq!(err.filter, ClaimFilter::Any);
        assert_eq!(err.query, "x");
    }

    #[test]
    fn test_limited_overfetch_can_miss() {
        let graph = parse_sources(&[("energy.txt", CORPUS)]).unwrap();
        let r = Retriever::with_config(
            graph,
            RetrievalConfig {
                overfetch_factor: Some(1),
            },
        );
        // Pool of 2: the cars thesis and its pro, neither opposed.
        let result = r.closest_claims("private cars downtown pedestrians", 1, true);
        assert!(result.is_err());
    }

    #[test]
    fn test_opposing_arguments_in_source_order() {
        let r = retriever();
        let root = r.claim_by_key("energy#1").unwrap();
        let cons: Vec<&str> = r
            .opposing_arguments(root.id)
            .iter()
            .map(|c| c.text.as_str())
            .collect();
        assert_eq!(
            cons,
            vec![
                "Nuclear accidents contaminate land for decades.",
                "Nuclear waste stays dangerous for millennia."
            ]
        );
        assert_eq!(r.supporting_arguments(root.id).len(), 1);
        let leaf = r.claim_by_key("energy#1.1").unwrap();
        assert!(r.opposing_arguments(leaf.id).is_empty());
    }

    #[test]
    fn test_random_chain_root_to_leaf() {
        let r = retriever();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let chain = r.random_chain(&mut rng, None);
            assert!(chain[0].is_root());
            assert!(chain.last().unwrap().is_leaf());
            for pair in chain.windows(2) {
                assert_eq!(pair[1].parent, Some(pair[0].id));
            }
        }
    }

    #[test]
    fn test_random_chain_from_given_root() {
        let r = retriever();
        let cars = r.claim_by_key("energy#2").unwrap().id;
        let mut rng = StdRng::seed_from_u64(1);
        let chain = r.random_chain(&mut rng, Some(cars));
        assert_eq!(chain.len(), 2);
        assert_eq!(chain[0].id, cars);
    }

    #[test]
    fn test_random_chain_seeded_is_reproducible() {
        let r = retriever();
        let a: Vec<ClaimId> = r
            .random_chain(&mut StdRng::seed_from_u64(42), None)
            .iter()
            .map(|c| c.id)
            .collect();
        let b: Vec<ClaimId> = r
            .random_chain(&mut StdRng::seed_from_u64(42), None)
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_config_validation() {
        assert!(RetrievalConfig::default().validate().is_ok());
        let bad = RetrievalConfig {
            overfetch_factor: Some(0),
        };
        assert!(bad.validate().is_err());
    }
}
