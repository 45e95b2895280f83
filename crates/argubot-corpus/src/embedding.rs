//! Text vectorization for similarity search
//!
//! This module turns claim text into fixed-length feature vectors. The
//! dimension is the size of the corpus vocabulary; vectors are stored
//! sparsely because a claim uses only a handful of terms.
//!
//! # Model
//!
//! [`TfIdfModel`] is fitted once on the claim texts:
//!
//! - tokens are lower-cased runs of alphanumeric characters
//! - term frequency is sublinear (`1 + ln tf`)
//! - inverse document frequency is smoothed (`ln((1 + n) / (1 + df)) + 1`)
//! - every vector is L2-normalized, so cosine similarity is a dot product
//!
//! Query terms that never occur in the corpus carry no weight.
//!
//! # Examples
//!
//! ```rust
//! use argubot_corpus::embedding::{cosine_similarity, EmbeddingModel, TfIdfModel};
//!
//! let model = TfIdfModel::fit(["The sky is blue", "Grass is green"]);
//! let a = model.embed("the sky is blue");
//! let b = model.embed("The sky is BLUE!");
//! assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-6);
//! ```

use std::collections::HashMap;

/// Trait for embedding models
pub trait EmbeddingModel {
    /// Generate a feature vector for the given text
    fn embed(&self, text: &str) -> SparseVector;

    /// Length of the vectors produced by this model
    fn dimension(&self) -> usize;
}

/// A sparse feature vector, entries sorted by term index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(u32, f32)>,
}

impl SparseVector {
    /// Build from `(term, weight)` pairs; duplicates are summed and zeros dropped
    pub fn from_entries(mut entries: Vec<(u32, f32)>) -> Self {
        entries.sort_by_key(|(term, _)| *term);
        let mut merged: Vec<(u32, f32)> = Vec::with_capacity(entries.len());
        for (term, weight) in entries {
            match merged.last_mut() {
                Some((last, w)) if *last == term => *w += weight,
                _ => merged.push((term, weight)),
            }
        }
        merged.retain(|(_, w)| *w != 0.0);
        Self { entries: merged }
    }

    /// Non-zero entries in term order
    pub fn entries(&self) -> &[(u32, f32)] {
        &self.entries
    }

    /// Number of non-zero entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether every entry is zero
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Euclidean norm
    pub fn norm(&self) -> f32 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f32>().sqrt()
    }

    /// Scale to unit length (no-op for the zero vector)
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, w) in &mut self.entries {
                *w /= norm;
            }
        }
    }

    /// Dot product, by merging the two sorted entry lists
    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (ta, wa) = self.entries[i];
            let (tb, wb) = other.entries[j];
            match ta.cmp(&tb) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += wa * wb;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// Split text into lower-cased alphanumeric tokens
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// TF-IDF model fitted on a fixed set of documents
#[derive(Debug, Clone)]
pub struct TfIdfModel {
    vocabulary: HashMap<String, u32>,
    idf: Vec<f32>,
    documents: usize,
}

impl TfIdfModel {
    /// Fit the vocabulary and document frequencies
    ///
    /// Term indices are assigned in first-seen order, so fitting the same
    /// documents in the same order always gives the same model.
    pub fn fit<'a, I>(documents: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut vocabulary: HashMap<String, u32> = HashMap::new();
        let mut df: Vec<u32> = Vec::new();
        let mut count = 0usize;

        for doc in documents {
            count += 1;
            let mut seen: Vec<u32> = Vec::new();
            for token in tokenize(doc) {
                let next = vocabulary.len() as u32;
                let term = *vocabulary.entry(token).or_insert(next);
                if term as usize == df.len() {
                    df.push(0);
                }
                if !seen.contains(&term) {
                    seen.push(term);
                    df[term as usize] += 1;
                }
            }
        }

        let n = count as f32;
        let idf = df
            .iter()
            .map(|d| ((1.0 + n) / (1.0 + *d as f32)).ln() + 1.0)
            .collect();

        Self {
            vocabulary,
            idf,
            documents: count,
        }
    }

    /// Number of documents the model was fitted on
    pub fn documents(&self) -> usize {
        self.documents
    }

    /// Index of a term, if it is in the vocabulary
    pub fn term(&self, token: &str) -> Option<u32> {
        self.vocabulary.get(token).copied()
    }

    /// Inverse document frequency of a term index
    pub fn idf(&self, term: u32) -> f32 {
        self.idf.get(term as usize).copied().unwrap_or(0.0)
    }
}

impl EmbeddingModel for TfIdfModel {
    fn embed(&self, text: &str) -> SparseVector {
        let mut counts: HashMap<u32, u32> = HashMap::new();
        for token in tokenize(text) {
            if let Some(term) = self.term(&token) {
                *counts.entry(term).or_insert(0) += 1;
            }
        }

        let entries = counts
            .into_iter()
            .map(|(term, tf)| (term, (1.0 + (tf as f32).ln()) * self.idf(term)))
            .collect();

        let mut vector = SparseVector::from_entries(entries);
        vector.normalize();
        vector
    }

    fn dimension(&self) -> usize {
        self.vocabulary.len()
    }
}

/// Calculate cosine similarity between two sparse vectors
///
/// Returns 0.0 when either vector is zero.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f32 {
    let magnitude_a = a.norm();
    let magnitude_b = b.norm();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }

    a.dot(b) / (magnitude_a * magnitude_b)
}
