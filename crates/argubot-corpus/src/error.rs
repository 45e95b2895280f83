//! Error types for corpus loading

use argubot_domain::SourceLocation;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a debate corpus
///
/// Every variant is fatal: a loader that returns one of these hands out no graph.
#[derive(Error, Debug)]
pub enum CorpusError {
    /// A source file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A line could not be parsed
    #[error("{location}: malformed line: {reason}")]
    Malformed {
        /// File and line of the offending line
        location: SourceLocation,
        /// What was wrong with it
        reason: String,
    },

    /// A claim's parent path was never declared in the same file
    #[error("{location}: claim {key} refers to undeclared parent {parent}")]
    MissingParent {
        /// File and line of the orphan
        location: SourceLocation,
        /// Key of the orphan claim
        key: String,
        /// Key of the missing parent
        parent: String,
    },

    /// Two claims share a key, within one file or across files
    #[error("Duplicate claim {key}: declared at {first} and again at {second}")]
    DuplicateClaim {
        /// The colliding key
        key: String,
        /// Where it was first declared
        first: SourceLocation,
        /// Where it was declared again
        second: SourceLocation,
    },

    /// The corpus holds more claims than ids can number
    #[error("{location}: too many claims; at most {limit} fit in one corpus")]
    TooManyClaims {
        /// File and line of the first claim that did not fit
        location: SourceLocation,
        /// Largest number of claims a corpus can hold
        limit: usize,
    },

    /// Nothing was loaded
    #[error("Corpus is empty: no claims were loaded")]
    Empty,
}

impl CorpusError {
    /// Location the error points at, when it points at a single line
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            CorpusError::Malformed { location, .. }
            | CorpusError::MissingParent { location, .. }
            | CorpusError::TooManyClaims { location, .. } => Some(location),
            CorpusError::DuplicateClaim { second, .. } => Some(second),
            CorpusError::Io { .. } | CorpusError::Empty => None,
        }
    }
}
