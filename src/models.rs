//! Core data models for the relevance engine.
//!
//! These types represent the search terms, candidate documents, and scored
//! results that flow through the extraction and ranking pipeline.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Where a [`SearchTerm`] was extracted from.
///
/// The source determines the term's fixed weight: path-derived terms
/// always outrank compound identifiers, which outrank generic tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TermSource {
    /// Full path, bare filename, or filename-without-extension.
    Path,
    /// A directory segment of an extracted path.
    Directory,
    /// A snake_case, kebab-case, camelCase, or versioned identifier.
    Compound,
    /// A generic lowercase token surviving the stopword filter.
    Token,
}

impl TermSource {
    /// Fixed weight tier for this source. Not tunable per term.
    pub fn weight(self) -> f64 {
        match self {
            TermSource::Path => 1.0,
            TermSource::Directory => 0.8,
            TermSource::Compound => 0.6,
            TermSource::Token => 0.3,
        }
    }
}

/// A weighted, case-normalized search term produced by the extractor.
#[derive(Debug, Clone, Serialize)]
pub struct SearchTerm {
    /// Lowercased term text (paths are separator-normalized).
    pub text: String,
    /// Weight inherited from [`TermSource::weight`].
    pub weight: f64,
    /// Extraction stage that produced the term.
    pub source: TermSource,
}

impl SearchTerm {
    pub fn new(text: impl Into<String>, source: TermSource) -> Self {
        Self {
            text: text.into(),
            weight: source.weight(),
            source,
        }
    }
}

/// Raw candidate row as emitted by the external indexing subsystem.
///
/// Loosely typed on purpose: the index snapshot is produced by another
/// component and individual rows may be incomplete. Rows are validated
/// into [`CandidateDocument`]s at the engine boundary; malformed rows are
/// skipped with a diagnostic rather than aborting the query.
#[derive(Debug, Clone, Deserialize)]
pub struct CandidateRecord {
    pub path: String,
    #[serde(default)]
    pub extension: Option<String>,
    #[serde(default)]
    pub content_preview: Option<String>,
}

/// Parse a JSON-array index snapshot into candidate records.
pub fn parse_snapshot(json: &str) -> Result<Vec<CandidateRecord>> {
    serde_json::from_str(json).context("Failed to parse candidate index snapshot")
}

/// A validated, immutable candidate document.
///
/// `depth` and `is_root` are derived from the normalized path at the
/// index boundary so the scorer never re-parses paths.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateDocument {
    /// Separator-normalized path (`\` to `/`, no leading `./`).
    pub path: String,
    /// Lowercase extension without the leading dot; empty if none.
    pub extension: String,
    /// Bounded text excerpt supplied by the indexer; may be empty.
    pub content_preview: String,
    /// Number of path segments.
    pub depth: usize,
    /// True for documents directly at the corpus root.
    pub is_root: bool,
}

impl CandidateDocument {
    /// Validate a raw index record into a document.
    ///
    /// A record with an empty or whitespace-only path is malformed.
    /// A missing extension is derived from the path; a missing preview
    /// becomes empty.
    pub fn from_record(record: &CandidateRecord) -> Result<Self> {
        if record.path.trim().is_empty() {
            bail!("candidate record has an empty path");
        }

        let path = normalize_path(&record.path);
        if path.is_empty() {
            bail!("candidate record path normalizes to nothing: {:?}", record.path);
        }

        let extension = match &record.extension {
            Some(ext) if !ext.trim().is_empty() => {
                ext.trim().trim_start_matches('.').to_lowercase()
            }
            _ => extension_of(&path),
        };

        let depth = path.split('/').count();

        Ok(Self {
            path,
            extension,
            content_preview: record.content_preview.clone().unwrap_or_default(),
            depth,
            is_root: depth == 1,
        })
    }

    /// Final path segment.
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// Normalize a path for comparison and deduplication: backslashes to
/// forward slashes, leading `./` stripped, doubled and trailing
/// separators collapsed. Case is preserved for display; comparisons
/// lowercase separately.
pub fn normalize_path(path: &str) -> String {
    let replaced = path.trim().replace('\\', "/");
    let stripped = replaced.strip_prefix("./").unwrap_or(&replaced);
    let segments: Vec<&str> = stripped.split('/').filter(|s| !s.is_empty() && *s != ".").collect();
    segments.join("/")
}

/// Lowercase extension of the final path segment, without the dot.
fn extension_of(path: &str) -> String {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    match file_name.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < file_name.len() => file_name[idx + 1..].to_lowercase(),
        _ => String::new(),
    }
}

/// Identifies which boost produced a score contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    ExactPath,
    ExactFileName,
    ExactStem,
    Extension,
    Root,
    TermOverlap,
}

/// One entry in a [`ScoredCandidate`]'s explainability breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct Signal {
    pub kind: SignalKind,
    pub contribution: f64,
}

/// A candidate with its clamped relevance score and signal breakdown.
///
/// `signals` lists each non-zero contribution in evaluation order. It
/// exists for explainability and debugging; the score itself is the
/// clamped sum and never recomputed from the list.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredCandidate {
    pub document: CandidateDocument,
    pub score: f64,
    pub signals: Vec<Signal>,
}

/// Ordered, deduplicated, threshold-filtered, size-capped selection.
///
/// An empty result is a valid outcome ("no strong match"), not an error.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SelectionResult {
    pub entries: Vec<ScoredCandidate>,
}

impl SelectionResult {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScoredCandidate> {
        self.entries.iter()
    }
}

impl IntoIterator for SelectionResult {
    type Item = ScoredCandidate;
    type IntoIter = std::vec::IntoIter<ScoredCandidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
