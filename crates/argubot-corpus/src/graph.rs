//! In-memory claim forest
//!
//! Claims live in an arena indexed by [`ClaimId`]. A [`GraphBuilder`] is the
//! only way to add claims; [`GraphBuilder::build`] freezes the arena into a
//! read-only [`ClaimGraph`].

use crate::error::CorpusError;
use argubot_domain::{Claim, ClaimId, Polarity, SourceLocation};
use std::collections::HashMap;
use std::ops::Index;

/// A read-only forest of debate claims
///
/// Invariants upheld by construction:
/// - at least one claim exists
/// - every non-root claim has exactly one parent, created before it
/// - keys are unique
/// - child lists are in source order
#[derive(Debug, Clone)]
pub struct ClaimGraph {
    claims: Vec<Claim>,
    roots: Vec<ClaimId>,
    keys: HashMap<String, ClaimId>,
}

impl ClaimGraph {
    /// Number of claims
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    /// Always false for a built graph; kept for API symmetry
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// All claims in creation order
    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    /// Iterate over claims in creation order
    pub fn iter(&self) -> std::slice::Iter<'_, Claim> {
        self.claims.iter()
    }

    /// Look up a claim by id
    pub fn get(&self, id: ClaimId) -> Option<&Claim> {
        self.claims.get(id.index())
    }

    /// Look up a claim by its source key (`<discussion>#<path>`)
    pub fn claim_by_key(&self, key: &str) -> Option<&Claim> {
        self.keys.get(key).map(|id| &self[*id])
    }

    /// Top-level theses in creation order
    pub fn roots(&self) -> &[ClaimId] {
        &self.roots
    }

    /// Parent of a claim, `None` for roots
    pub fn parent(&self, id: ClaimId) -> Option<&Claim> {
        self.get(id)
            .and_then(|c| c.parent)
            .map(|parent| &self[parent])
    }

    /// The root a claim descends from
    pub fn root_of(&self, id: ClaimId) -> ClaimId {
        let mut current = id;
        while let Some(parent) = self[current].parent {
            current = parent;
        }
        current
    }

    /// Distance from the claim's root (roots have depth 0)
    pub fn depth(&self, id: ClaimId) -> usize {
        let mut depth = 0;
        let mut current = id;
        while let Some(parent) = self[current].parent {
            current = parent;
            depth += 1;
        }
        depth
    }

    /// Number of claims with at least one opposing child
    pub fn opposed_count(&self) -> usize {
        self.claims.iter().filter(|c| c.has_opposition()).count()
    }

    /// Number of claims without children
    pub fn leaf_count(&self) -> usize {
        self.claims.iter().filter(|c| c.is_leaf()).count()
    }
}

impl Index<ClaimId> for ClaimGraph {
    type Output = Claim;

    fn index(&self, id: ClaimId) -> &Claim {
        &self.claims[id.index()]
    }
}

impl<'a> IntoIterator for &'a ClaimGraph {
    type Item = &'a Claim;
    type IntoIter = std::slice::Iter<'a, Claim>;

    fn into_iter(self) -> Self::IntoIter {
        self.claims.iter()
    }
}

/// Incrementally assembles a [`ClaimGraph`]
#[derive(Debug, Default)]
pub struct GraphBuilder {
    claims: Vec<Claim>,
    roots: Vec<ClaimId>,
    keys: HashMap<String, ClaimId>,
}

impl GraphBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of claims added so far
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    /// Whether no claim was added yet
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// Id of an already added claim
    pub fn id_of(&self, key: &str) -> Option<ClaimId> {
        self.keys.get(key).copied()
    }

    /// Add a top-level thesis
    pub fn add_root(
        &mut self,
        key: impl Into<String>,
        text: impl Into<String>,
        location: SourceLocation,
    ) -> Result<ClaimId, CorpusError> {
        let id = self.insert(key.into(), text.into(), None, location)?;
        self.roots.push(id);
        Ok(id)
    }

    /// Add a child under an existing claim
    ///
    /// # Panics
    ///
    /// Panics if `parent` was not returned by this builder.
    pub fn add_child(
        &mut self,
        parent: ClaimId,
        polarity: Polarity,
        key: impl Into<String>,
        text: impl Into<String>,
        location: SourceLocation,
    ) -> Result<ClaimId, CorpusError> {
        assert!(parent.index() < self.claims.len(), "unknown parent {}", parent);
        let id = self.insert(key.into(), text.into(), Some((parent, polarity)), location)?;
        self.claims[parent.index()].attach_child(id, polarity);
        Ok(id)
    }

    fn insert(
        &mut self,
        key: String,
        text: String,
        parent: Option<(ClaimId, Polarity)>,
        location: SourceLocation,
    ) -> Result<ClaimId, CorpusError> {
        if let Some(existing) = self.keys.get(&key) {
            return Err(CorpusError::DuplicateClaim {
                key,
                first: self.claims[existing.index()].location.clone(),
                second: location,
            });
        }

        let id = ClaimId::try_from_index(self.claims.len()).ok_or_else(|| {
            CorpusError::TooManyClaims {
                location: location.clone(),
                limit: u32::MAX as usize + 1,
            }
        })?;
        self.keys.insert(key.clone(), id);
        self.claims.push(Claim::new(id, key, text, parent, location));
        Ok(id)
    }

    /// Freeze the builder into a read-only graph
    pub fn build(self) -> Result<ClaimGraph, CorpusError> {
        if self.claims.is_empty() {
            return Err(CorpusError::Empty);
        }

        Ok(ClaimGraph {
            claims: self.claims,
            roots: self.roots,
            keys: self.keys,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(line: usize) -> SourceLocation {
        SourceLocation::new("test.txt", line)
    }

    fn sample() -> ClaimGraph {
        let mut b = GraphBuilder::new();
        let a = b.add_root("t#1", "A", loc(1)).unwrap();
        let c = b.add_child(a, Polarity::Opposes, "t#1.1", "C", loc(2)).unwrap();
        b.add_child(c, Polarity::Supports, "t#1.1.1", "D", loc(3)).unwrap();
        b.add_child(a, Polarity::Supports, "t#1.2", "E", loc(4)).unwrap();
        b.add_root("t#2", "B", loc(5)).unwrap();
        b.build().unwrap()
    }

    #[test]
    fn test_build_links_children() {
        let g = sample();
        assert_eq!(g.len(), 5);
        assert_eq!(g.roots().len(), 2);

        let a = g.claim_by_key("t#1").unwrap();
        let texts: Vec<&str> = a.children.iter().map(|id| g[*id].text.as_str()).collect();
        assert_eq!(texts, vec!["C", "E"]);
        assert_eq!(g[a.opposes[0]].text, "C");
        assert_eq!(g[a.supports[0]].text, "E");
    }

    #[test]
    fn test_root_and_depth() {
        let g = sample();
        let d = g.claim_by_key("t#1.1.1").unwrap().id;
        let a = g.claim_by_key("t#1").unwrap().id;

        assert_eq!(g.root_of(d), a);
        assert_eq!(g.depth(d), 2);
        assert_eq!(g.depth(a), 0);
        assert_eq!(g.parent(d).unwrap().text, "C");
        assert!(g.parent(a).is_none());
    }

    #[test]
    fn test_counts() {
        let g = sample();
        assert_eq!(g.opposed_count(), 1);
        assert_eq!(g.leaf_count(), 3);
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let mut b = GraphBuilder::new();
        b.add_root("t#1", "A", loc(1)).unwrap();
        let err = b.add_root("t#1", "A again", loc(7)).unwrap_err();

        match err {
            CorpusError::DuplicateClaim { key, first, second } => {
                assert_eq!(key, "t#1");
                assert_eq!(first.line, 1);
                assert_eq!(second.line, 7);
            }
            other => panic!("Expected DuplicateClaim, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_builder_fails() {
        assert!(matches!(GraphBuilder::new().build(), Err(CorpusError::Empty)));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: whatever shape the forest has, every claim reaches exactly
        /// one root and ids follow creation order
        #[test]
        fn test_every_claim_reaches_one_root(
            shape in proptest::collection::vec((any::<prop::sample::Index>(), any::<bool>(), any::<bool>()), 1..64)
        ) {
            let mut b = GraphBuilder::new();
            b.add_root("p#0", "root 0", SourceLocation::new("p.txt", 1)).unwrap();

            for (i, (pick, new_root, pro)) in shape.iter().enumerate() {
                let key = format!("p#{}", i + 1);
                let location = SourceLocation::new("p.txt", i + 2);
                if *new_root {
                    b.add_root(key, "root", location).unwrap();
                } else {
                    let parent = ClaimId::from_index(pick.index(b.len()));
                    let polarity = if *pro { Polarity::Supports } else { Polarity::Opposes };
                    b.add_child(parent, polarity, key, "child", location).unwrap();
                }
            }

            let g = b.build().unwrap();
            prop_assert_eq!(g.len(), shape.len() + 1);

            let mut reached = vec![0usize; g.len()];
            for claim in &g {
                let root = g.root_of(claim.id);
                prop_assert!(g[root].is_root());
                prop_assert!(g.roots().contains(&root));
                reached[claim.id.index()] += 1;
                if let Some(parent) = claim.parent {
                    prop_assert!(parent < claim.id);
                    prop_assert!(g[parent].children.contains(&claim.id));
                }
            }
            prop_assert!(reached.iter().all(|n| *n == 1));
        }
    }
}
