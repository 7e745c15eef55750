//! Final selection: threshold, dedup, deterministic ordering, truncation.

use std::collections::HashSet;

use crate::config::ScoringConfig;
use crate::models::{normalize_path, ScoredCandidate, SelectionResult};

/// Reduce scored candidates to the final context set.
///
/// 1. Drop entries below `config.threshold`.
/// 2. Deduplicate by normalized path, first occurrence wins (callers
///    should not submit a document twice, but duplicates are tolerated).
/// 3. Sort by score descending, ties broken by lexicographic path order
///    so identical inputs always produce identical output.
/// 4. Truncate to `config.top_n`.
pub fn select(scored: Vec<ScoredCandidate>, config: &ScoringConfig) -> SelectionResult {
    let mut seen: HashSet<String> = HashSet::new();
    let mut entries: Vec<ScoredCandidate> = scored
        .into_iter()
        .filter(|c| c.score >= config.threshold)
        .filter(|c| seen.insert(normalize_path(&c.document.path).to_lowercase()))
        .collect();

    entries.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.document.path.cmp(&b.document.path))
    });

    entries.truncate(config.top_n);

    SelectionResult { entries }
}
