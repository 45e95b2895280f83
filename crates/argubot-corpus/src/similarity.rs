//! Similarity index over claim texts
//!
//! Exact (not approximate) nearest-neighbour search: every query scores every
//! claim through an inverted index, then the ranking is sorted by score with
//! ties broken by claim creation order. Results are therefore reproducible.
//!
//! The index is built once from a graph and is read-only afterwards; entry
//! `i` always belongs to the claim with id `i`.

use crate::embedding::{EmbeddingModel, SparseVector, TfIdfModel};
use crate::graph::ClaimGraph;
use argubot_domain::ClaimId;
use tracing::debug;

/// A claim id with its similarity to a query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredClaim {
    /// The claim
    pub id: ClaimId,
    /// Cosine similarity in [0, 1]
    pub score: f32,
}

/// Inverted TF-IDF index aligned 1:1 with a [`ClaimGraph`]
#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    model: TfIdfModel,
    vectors: Vec<SparseVector>,
    /// term -> (claim index, weight)
    postings: Vec<Vec<(u32, f32)>>,
}

impl SimilarityIndex {
    /// Build the index from every claim of the graph
    pub fn build(graph: &ClaimGraph) -> Self {
        let model = TfIdfModel::fit(graph.iter().map(|c| c.text.as_str()));
        let vectors: Vec<SparseVector> = graph.iter().map(|c| model.embed(&c.text)).collect();

        let mut postings: Vec<Vec<(u32, f32)>> = vec![Vec::new(); model.dimension()];
        for (doc, vector) in vectors.iter().enumerate() {
            for (term, weight) in vector.entries() {
                postings[*term as usize].push((doc as u32, *weight));
            }
        }

        debug!(
            "Built similarity index: {} claims, {} terms",
            vectors.len(),
            model.dimension()
        );

        Self {
            model,
            vectors,
            postings,
        }
    }

    /// Number of indexed claims
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Whether the index holds no claims
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Vector length (vocabulary size)
    pub fn dimension(&self) -> usize {
        self.model.dimension()
    }

    /// The fitted text model
    pub fn model(&self) -> &TfIdfModel {
        &self.model
    }

    /// Feature vector of an indexed claim
    pub fn vector(&self, id: ClaimId) -> Option<&SparseVector> {
        self.vectors.get(id.index())
    }

    /// Similarity of every claim to `query`, indexed by claim id
    pub fn scores(&self, query: &str) -> Vec<f32> {
        let query = self.model.embed(query);
        let mut scores = vec![0.0f32; self.vectors.len()];
        for (term, weight) in query.entries() {
            for (doc, doc_weight) in &self.postings[*term as usize] {
                scores[*doc as usize] += weight * doc_weight;
            }
        }
        scores
    }

    /// Every claim, most similar first
    pub fn ranked(&self, query: &str) -> Vec<ScoredClaim> {
        let scores = self.scores(query);
        let mut order: Vec<usize> = (0..scores.len()).collect();
        order.sort_by(|a, b| scores[*b].total_cmp(&scores[*a]).then(a.cmp(b)));
        order
            .into_iter()
            .map(|i| ScoredClaim {
                id: ClaimId::from_index(i),
                score: scores[i],
            })
            .collect()
    }

    /// The `k` claims most similar to `query`, most similar first
    ///
    /// `k` larger than the index returns every claim.
    pub fn nearest(&self, query: &str, k: usize) -> Vec<ScoredClaim> {
        let mut ranked = self.ranked(query);
        ranked.truncate(k);
        ranked
    }
}
