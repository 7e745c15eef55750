//! Multi-boost relevance scorer.
//!
//! The score is the clamped sum of independent boost contributions:
//! exact path match, extension affinity under the query intent,
//! root-directory promotion, and generic term overlap. Signals combine
//! additively, never multiplicatively or as a max.

use std::collections::HashSet;

use crate::config::ScoringConfig;
use crate::intent;
use crate::models::{CandidateDocument, ScoredCandidate, SearchTerm, Signal, SignalKind, TermSource};

/// Score a candidate against the extracted terms.
///
/// Pure and idempotent: the same `(document, terms, config)` triple
/// always produces the same score and signal breakdown. An empty term
/// list short-circuits to a zero score so "no strong match" propagates
/// cleanly to the selector.
pub fn score(
    document: &CandidateDocument,
    terms: &[SearchTerm],
    config: &ScoringConfig,
) -> ScoredCandidate {
    let mut signals: Vec<Signal> = Vec::new();

    if terms.is_empty() {
        return ScoredCandidate {
            document: document.clone(),
            score: 0.0,
            signals,
        };
    }

    let query_intent = intent::classify(terms);
    let path_lower = document.path.to_lowercase();
    let file_name_lower = document.file_name().to_lowercase();
    let stem_lower = match file_name_lower.rfind('.') {
        Some(idx) if idx > 0 => file_name_lower[..idx].to_string(),
        _ => file_name_lower.clone(),
    };
    let preview_lower = document.content_preview.to_lowercase();

    let mut total = 0.0;

    // Exact-match component: every path-sourced term is checked against
    // the three variants independently, but only the single highest hit
    // contributes. Matching terms are consumed so redundant path terms
    // cannot re-enter through the overlap signal.
    let mut consumed: HashSet<&str> = HashSet::new();
    let mut best_exact: Option<(SignalKind, f64)> = None;

    for term in terms.iter().filter(|t| t.source == TermSource::Path) {
        let hit = if term.text == path_lower {
            Some((SignalKind::ExactPath, config.exact_match_boost.full_path))
        } else if term.text == file_name_lower {
            Some((SignalKind::ExactFileName, config.exact_match_boost.file_name))
        } else if term.text == stem_lower {
            Some((SignalKind::ExactStem, config.exact_match_boost.stem))
        } else {
            None
        };

        if let Some((kind, boost)) = hit {
            consumed.insert(term.text.as_str());
            if best_exact.map_or(true, |(_, b)| boost > b) {
                best_exact = Some((kind, boost));
            }
        }
    }

    if let Some((kind, boost)) = best_exact {
        total += boost;
        signals.push(Signal {
            kind,
            contribution: boost,
        });
    }

    // Extension affinity under the query's coarse intent.
    let ext_boost = config
        .extension_boost_table
        .boost(query_intent, &document.extension);
    if ext_boost > 0.0 {
        total += ext_boost;
        signals.push(Signal {
            kind: SignalKind::Extension,
            contribution: ext_boost,
        });
    }

    // Root-directory promotion for entry-point queries. Counteracts the
    // lexical bias toward deeply nested historical documentation.
    if document.depth <= config.root_depth && intent::has_entry_point_vocabulary(terms) {
        total += config.root_boost;
        signals.push(Signal {
            kind: SignalKind::Root,
            contribution: config.root_boost,
        });
    }

    // Generic overlap for every unconsumed term, scaled by its source
    // weight (directory components above generic tokens).
    let mut overlap = 0.0;
    for term in terms {
        if consumed.contains(term.text.as_str()) {
            continue;
        }
        if path_lower.contains(&term.text) || preview_lower.contains(&term.text) {
            overlap += config.term_overlap_weight * term.weight;
        }
    }
    if overlap > 0.0 {
        total += overlap;
        signals.push(Signal {
            kind: SignalKind::TermOverlap,
            contribution: overlap,
        });
    }

    ScoredCandidate {
        document: document.clone(),
        score: total.min(config.cap),
        signals,
    }
}
