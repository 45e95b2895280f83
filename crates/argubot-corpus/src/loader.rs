//! Debate-export parser
//!
//! Reads numbered-outline debate exports into a [`ClaimGraph`]:
//!
//! ```text
//! Discussion Title: Should animal testing be banned?
//!
//! 1. Animal testing should be banned.
//! 1.1. Pro: Animals cannot consent to experiments.
//! 1.1.1. Con: Consent is not required for many uses of animals.
//! 1.2. Con: Animal testing has led to major medical breakthroughs.
//! 1.2.1. -> See 1.1.1.
//! ```
//!
//! - blank lines are ignored
//! - an optional `Discussion Title:` header may precede the first claim;
//!   without it the discussion is named after the file stem
//! - roots have a single-component path and no marker
//! - every other claim needs a `Pro:` or `Con:` marker and a parent path
//!   declared earlier in the same file
//! - `-> See <path>` lines are cross-references, not claims
//!
//! Claim keys are `<discussion>#<path>` and must be unique across all sources.

use crate::error::CorpusError;
use crate::graph::{ClaimGraph, GraphBuilder};
use argubot_domain::{ClaimId, Polarity, SourceLocation};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const TITLE_PREFIX: &str = "Discussion Title:";
const REFERENCE_PREFIX: &str = "->";
const CORPUS_EXTENSION: &str = "txt";

/// Summary of a finished load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Sources parsed
    pub sources: usize,
    /// Claim lines turned into claims
    pub claims: usize,
    /// Cross-reference lines seen
    pub references: usize,
}

/// Load every corpus file under `paths` into one graph
///
/// Directories are expanded to the `*.txt` files they contain. Paths are
/// sorted and de-duplicated first, so the order in which they are supplied
/// never changes the result.
pub fn load_corpus<P: AsRef<Path>>(paths: &[P]) -> Result<ClaimGraph, CorpusError> {
    let files = expand_paths(paths)?;
    let mut loader = CorpusLoader::new();
    for file in &files {
        loader.add_file(file)?;
    }
    loader.finish()
}

/// Parse in-memory sources, named like files, into one graph
///
/// Sources are sorted by name before parsing.
pub fn parse_sources<N: AsRef<Path>, T: AsRef<str>>(
    sources: &[(N, T)],
) -> Result<ClaimGraph, CorpusError> {
    let mut ordered: Vec<(&Path, &str)> = sources
        .iter()
        .map(|(name, text)| (name.as_ref(), text.as_ref()))
        .collect();
    ordered.sort_by(|a, b| a.0.cmp(b.0));

    let mut loader = CorpusLoader::new();
    for (name, text) in ordered {
        loader.add_source(name, text)?;
    }
    loader.finish()
}

fn expand_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<PathBuf>, CorpusError> {
    let mut files = Vec::new();
    for path in paths {
        let path = path.as_ref();
        if path.is_dir() {
            let entries = fs::read_dir(path).map_err(|source| CorpusError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            for entry in entries {
                let entry = entry.map_err(|source| CorpusError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                let file = entry.path();
                if file.is_file()
                    && file.extension().and_then(|e| e.to_str()) == Some(CORPUS_EXTENSION)
                {
                    files.push(file);
                }
            }
        } else {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

/// Accumulates sources into a single graph
#[derive(Debug, Default)]
pub struct CorpusLoader {
    builder: GraphBuilder,
    stats: LoadStats,
}

impl CorpusLoader {
    /// Create an empty loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and parse one file
    pub fn add_file(&mut self, path: &Path) -> Result<(), CorpusError> {
        let text = fs::read_to_string(path).map_err(|source| CorpusError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.add_source(path, &text)
    }

    /// Parse one source
    pub fn add_source(&mut self, name: &Path, text: &str) -> Result<(), CorpusError> {
        let mut discussion: Option<String> = None;
        let mut declared: HashMap<String, ClaimId> = HashMap::new();
        let mut claims = 0;
        let mut references = 0;

        for (idx, raw) in text.lines().enumerate() {
            let location = SourceLocation::new(name, idx + 1);
            let line = parse_line(raw).map_err(|reason| CorpusError::Malformed {
                location: location.clone(),
                reason,
            })?;

            match line {
                Line::Blank => {}
                Line::Title(title) => {
                    if discussion.is_some() || !declared.is_empty() {
                        return Err(CorpusError::Malformed {
                            location,
                            reason: "discussion title must come once, before the first claim"
                                .to_string(),
                        });
                    }
                    discussion = Some(title.to_string());
                }
                Line::Reference { path, target } => {
                    debug!("{}: cross-reference {} -> {}", location, path, target);
                    references += 1;
                }
                Line::Claim { path, parent, text } => {
                    let name_of_discussion = discussion.get_or_insert_with(|| stem_of(name));
                    let key = format!("{}#{}", name_of_discussion, path);
                    let id = match parent {
                        None => self.builder.add_root(key, text, location)?,
                        Some((parent_path, polarity)) => {
                            let parent = declared.get(parent_path).copied().ok_or_else(|| {
                                CorpusError::MissingParent {
                                    location: location.clone(),
                                    key: key.clone(),
                                    parent: format!("{}#{}", name_of_discussion, parent_path),
                                }
                            })?;
                            self.builder
                                .add_child(parent, polarity, key, text, location)?
                        }
                    };
                    declared.insert(path.to_string(), id);
                    claims += 1;
                }
            }
        }

        debug!(
            "Parsed {}: {} claims, {} cross-references",
            name.display(),
            claims,
            references
        );
        self.stats.sources += 1;
        self.stats.claims += claims;
        self.stats.references += references;
        Ok(())
    }

    /// Statistics so far
    pub fn stats(&self) -> LoadStats {
        self.stats
    }

    /// Freeze into a graph
    pub fn finish(self) -> Result<ClaimGraph, CorpusError> {
        let stats = self.stats;
        let graph = self.builder.build()?;
        info!(
            "Loaded corpus: {} claims ({} roots) from {} source(s), {} cross-references",
            graph.len(),
            graph.roots().len(),
            stats.sources,
            stats.references
        );
        Ok(graph)
    }
}

fn stem_of(name: &Path) -> String {
    name.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.display().to_string())
}

/// One classified source line
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Blank,
    Title(&'a str),
    Reference {
        path: &'a str,
        target: &'a str,
    },
    /// `parent` is the parent path and the edge polarity; `None` for roots
    Claim {
        path: &'a str,
        parent: Option<(&'a str, Polarity)>,
        text: &'a str,
    },
}

fn parse_line(raw: &str) -> Result<Line<'_>, String> {
    let line = raw.trim();
    if line.is_empty() {
        return Ok(Line::Blank);
    }

    if let Some(title) = line.strip_prefix(TITLE_PREFIX) {
        let title = title.trim();
        if title.is_empty() {
            return Err("empty discussion title".to_string());
        }
        return Ok(Line::Title(title));
    }

    if !line.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(format!(
            "expected a numbered claim such as '1.2. Con: ...', found {:?}",
            truncate(line)
        ));
    }

    let number_end = line
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(line.len());
    let number = &line[..number_end];
    let path = number
        .strip_suffix('.')
        .ok_or_else(|| format!("outline number {:?} must end with '.'", number))?;
    if path.split('.').any(|part| part.is_empty()) {
        return Err(format!("invalid outline number {:?}", number));
    }

    let rest = &line[number_end..];
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return Err(format!("expected whitespace after outline number {:?}", number));
    }
    let rest = rest.trim();

    let parent_path = path.rfind('.').map(|pos| &path[..pos]);

    if let Some(target) = rest.strip_prefix(REFERENCE_PREFIX) {
        if parent_path.is_none() {
            return Err("a root claim cannot be a cross-reference".to_string());
        }
        return Ok(Line::Reference {
            path,
            target: target.trim(),
        });
    }

    let marker = rest
        .split_once(':')
        .and_then(|(marker, text)| Polarity::parse_marker(marker.trim()).map(|p| (p, text)));

    let (parent, text) = match (parent_path, marker) {
        (None, Some((polarity, _))) => {
            return Err(format!(
                "root claim {} cannot carry a '{}:' marker",
                path, polarity
            ));
        }
        (None, None) => (None, rest),
        (Some(parent_path), Some((polarity, text))) => {
            (Some((parent_path, polarity)), text.trim())
        }
        (Some(_), None) => {
            return Err(format!("claim {} needs a 'Pro:' or 'Con:' marker", path));
        }
    };

    if text.is_empty() {
        return Err(format!("claim {} has no text", path));
    }

    Ok(Line::Claim { path, parent, text })
}

fn truncate(line: &str) -> String {
    const MAX: usize = 40;
    match line.char_indices().nth(MAX) {
        Some((pos, _)) => format!("{}...", &line[..pos]),
        None => line.to_string(),
    }
}
