//! Pipeline orchestration.
//!
//! `select_context` is the single entry point consumed by the upstream
//! orchestrator: build the query, extract terms, score every valid
//! candidate, and select. The whole pipeline is a synchronous pure
//! transformation over immutable inputs; concurrent invocations share
//! nothing.

use anyhow::Result;
use tracing::{debug, warn};

use crate::config::ScoringConfig;
use crate::extract::extract_terms;
use crate::models::{CandidateDocument, CandidateRecord, SelectionResult};
use crate::query::build_query;
use crate::score::score;
use crate::select::select;

/// Task metadata handed in by the orchestrator.
#[derive(Debug, Clone)]
pub struct ContextQuery<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub tags: &'a [String],
}

/// Rank the candidate index against a task and return the context set.
///
/// The only hard-failure path is an invalid [`ScoringConfig`]; every
/// data-dependent condition degrades gracefully:
/// - empty or stopword-only query text: empty result;
/// - empty index snapshot: empty result;
/// - malformed candidate rows: skipped with a diagnostic.
///
/// An empty [`SelectionResult`] means "no strong match"; the caller
/// falls back to context-free generation.
pub fn select_context(
    query: &ContextQuery<'_>,
    records: &[CandidateRecord],
    config: &ScoringConfig,
) -> Result<SelectionResult> {
    config.validate()?;

    let query_text = build_query(query.title, query.description, query.tags);
    let terms = extract_terms(&query_text, config.max_terms);
    debug!(term_count = terms.len(), "extracted search terms");

    if terms.is_empty() || records.is_empty() {
        debug!("nothing to rank: empty term list or candidate index");
        return Ok(SelectionResult::default());
    }

    let mut scored = Vec::with_capacity(records.len());
    for record in records {
        match CandidateDocument::from_record(record) {
            Ok(document) => scored.push(score(&document, &terms, config)),
            Err(e) => warn!(path = %record.path, error = %e, "skipping malformed candidate record"),
        }
    }

    let result = select(scored, config);
    debug!(selected = result.len(), "context selection complete");
    Ok(result)
}
