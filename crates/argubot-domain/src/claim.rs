//! Claim module - the fundamental unit of a debate corpus

use std::fmt;
use std::path::PathBuf;

/// Identifier of a claim inside one loaded corpus
///
/// Identifiers are dense indices assigned in creation order, so comparing
/// two ids compares the order in which the claims were loaded. That order
/// is the tie-break order used by retrieval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClaimId(u32);

impl ClaimId {
    /// Create a ClaimId from its position in the corpus
    ///
    /// # Examples
    ///
    /// ```
    /// use argubot_domain::ClaimId;
    ///
    /// let id = ClaimId::from_index(3);
    /// assert_eq!(id.index(), 3);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `index` does not fit in a `u32`. Use
    /// [`ClaimId::try_from_index`] when the index is not known to fit.
    pub fn from_index(index: usize) -> Self {
        match Self::try_from_index(index) {
            Some(id) => id,
            None => panic!("claim index {} out of range", index),
        }
    }

    /// Create a ClaimId, or `None` when `index` is past the id range
    pub fn try_from_index(index: usize) -> Option<Self> {
        u32::try_from(index).ok().map(Self)
    }

    /// Position of the claim in creation order
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Polarity of the edge from a parent claim to a child claim
///
/// Fixed when the edge is created and never changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    /// The child argues for its parent ("Pro")
    Supports,

    /// The child argues against its parent ("Con")
    Opposes,
}

impl Polarity {
    /// Marker used for this polarity in debate exports
    pub fn as_marker(&self) -> &'static str {
        match self {
            Polarity::Supports => "Pro",
            Polarity::Opposes => "Con",
        }
    }

    /// Parse an export marker (`Pro` / `Con`, case-insensitive)
    pub fn parse_marker(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pro" => Some(Polarity::Supports),
            "con" => Some(Polarity::Opposes),
            _ => None,
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_marker())
    }
}

/// Where a claim was declared
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    /// Source file (or in-memory source name)
    pub file: PathBuf,

    /// 1-based line number
    pub line: usize,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(file: impl Into<PathBuf>, line: usize) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file.display(), self.line)
    }
}

/// A claim - one node of the debate forest
///
/// Claims are created while a corpus is loaded and are read-only after that.
/// Child lists keep the order in which the children appeared in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Claim {
    /// Unique identifier (creation order)
    pub id: ClaimId,

    /// Source key, `<discussion>#<outline path>`
    pub key: String,

    /// Full claim text
    pub text: String,

    /// Parent claim, `None` for a root
    pub parent: Option<ClaimId>,

    /// Polarity relative to the parent, `None` for a root
    pub polarity: Option<Polarity>,

    /// All children, pro and con pooled, in insertion order
    pub children: Vec<ClaimId>,

    /// Children reached through a "supports" edge
    pub supports: Vec<ClaimId>,

    /// Children reached through an "opposes" edge
    pub opposes: Vec<ClaimId>,

    /// Where the claim was declared
    pub location: SourceLocation,
}

impl Claim {
    /// Create a claim with no children yet
    pub fn new(
        id: ClaimId,
        key: String,
        text: String,
        parent: Option<(ClaimId, Polarity)>,
        location: SourceLocation,
    ) -> Self {
        Self {
            id,
            key,
            text,
            parent: parent.map(|(p, _)| p),
            polarity: parent.map(|(_, pol)| pol),
            children: Vec::new(),
            supports: Vec::new(),
            opposes: Vec::new(),
            location,
        }
    }

    /// Whether this claim is a top-level thesis
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Whether this claim has no children
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Whether at least one child opposes this claim
    pub fn has_opposition(&self) -> bool {
        !self.opposes.is_empty()
    }

    /// Whether at least one child supports this claim
    pub fn has_support(&self) -> bool {
        !self.supports.is_empty()
    }

    /// Record a new child under the given polarity
    ///
    /// Only the corpus builder calls this, before the graph is frozen.
    pub fn attach_child(&mut self, child: ClaimId, polarity: Polarity) {
        self.children.push(child);
        match polarity {
            Polarity::Supports => self.supports.push(child),
            Polarity::Opposes => self.opposes.push(child),
        }
    }
}

impl fmt::Display for Claim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claim(index: usize, parent: Option<(ClaimId, Polarity)>) -> Claim {
        Claim::new(
            ClaimId::from_index(index),
            format!("test#{}", index + 1),
            format!("claim {}", index),
            parent,
            SourceLocation::new("test.txt", index + 1),
        )
    }

    #[test]
    fn test_claim_id_ordering() {
        let id1 = ClaimId::from_index(1);
        let id2 = ClaimId::from_index(2);

        assert!(id1 < id2);
        assert_eq!(id2.index(), 2);
    }

    #[test]
    fn test_claim_id_range_is_checked() {
        let last = u32::MAX as usize;
        assert_eq!(ClaimId::try_from_index(last).map(|id| id.index()), Some(last));
        assert_eq!(ClaimId::try_from_index(last + 1), None);
        assert_ne!(
            ClaimId::try_from_index(last + 1),
            ClaimId::try_from_index(last)
        );
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_from_index_rejects_overflow() {
        ClaimId::from_index(u32::MAX as usize + 1);
    }

    #[test]
    fn test_polarity_markers() {
        assert_eq!(Polarity::parse_marker("Pro"), Some(Polarity::Supports));
        assert_eq!(Polarity::parse_marker("CON"), Some(Polarity::Opposes));
        assert_eq!(Polarity::parse_marker("Maybe"), None);
        assert_eq!(Polarity::Opposes.to_string(), "Con");
    }

    #[test]
    fn test_attach_child_keeps_both_lists() {
        let mut root = claim(0, None);
        root.attach_child(ClaimId::from_index(1), Polarity::Opposes);
        root.attach_child(ClaimId::from_index(2), Polarity::Supports);
        root.attach_child(ClaimId::from_index(3), Polarity::Opposes);

        assert!(root.is_root());
        assert!(!root.is_leaf());
        assert_eq!(
            root.children,
            vec![
                ClaimId::from_index(1),
                ClaimId::from_index(2),
                ClaimId::from_index(3)
            ]
        );
        assert_eq!(root.opposes, vec![ClaimId::from_index(1), ClaimId::from_index(3)]);
        assert_eq!(root.supports, vec![ClaimId::from_index(2)]);
        assert!(root.has_opposition());
        assert!(root.has_support());
    }

    #[test]
    fn test_child_records_parent_and_polarity() {
        let child = claim(1, Some((ClaimId::from_index(0), Polarity::Opposes)));
        assert!(!child.is_root());
        assert!(child.is_leaf());
        assert_eq!(child.parent, Some(ClaimId::from_index(0)));
        assert_eq!(child.polarity, Some(Polarity::Opposes));
    }
}
