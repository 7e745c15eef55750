//! Coarse query-intent classification.
//!
//! The intent drives the extension boost table lookup and, together with
//! the entry-point vocabulary, the root-directory boost. Classification
//! is deliberately shallow: it counts vocabulary hits over the extracted
//! terms and picks the dominant class.

use serde::Deserialize;

use crate::models::SearchTerm;

/// Coarse classification of what a query is about.
///
/// A boost of zero is neutral; the [`ExtensionBoostTable`](crate::config::ExtensionBoostTable)
/// maps each intent to the extensions it promotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryIntent {
    /// Installation, configuration, and build tasks.
    Setup,
    /// Documentation reading or writing tasks.
    Documentation,
    /// Test authoring and coverage tasks.
    Testing,
    /// Everything else.
    General,
}

fn is_setup_word(w: &str) -> bool {
    matches!(
        w,
        "setup" | "install" | "installation" | "installer" | "configure"
            | "configuration" | "deploy" | "deployment" | "build" | "bootstrap"
            | "init" | "provision"
    )
}

fn is_doc_word(w: &str) -> bool {
    matches!(
        w,
        "doc" | "docs" | "document" | "documentation" | "readme" | "guide"
            | "manual" | "tutorial" | "changelog"
    )
}

fn is_test_word(w: &str) -> bool {
    matches!(
        w,
        "test" | "tests" | "testing" | "coverage" | "fixture" | "fixtures" | "assertion"
    )
}

/// Entry-point vocabulary that triggers the root-directory boost.
pub fn is_entry_point_word(w: &str) -> bool {
    matches!(
        w,
        "setup" | "install" | "main" | "app" | "start" | "run" | "launch" | "entry" | "init"
    )
}

/// Classify the extracted terms into a coarse intent.
///
/// The dominant vocabulary wins; ties resolve Setup > Documentation >
/// Testing. No hits at all means [`QueryIntent::General`].
pub fn classify(terms: &[SearchTerm]) -> QueryIntent {
    let mut setup = 0usize;
    let mut docs = 0usize;
    let mut tests = 0usize;

    for term in terms {
        if is_setup_word(&term.text) {
            setup += 1;
        }
        if is_doc_word(&term.text) {
            docs += 1;
        }
        if is_test_word(&term.text) {
            tests += 1;
        }
    }

    if setup == 0 && docs == 0 && tests == 0 {
        QueryIntent::General
    } else if setup >= docs && setup >= tests {
        QueryIntent::Setup
    } else if docs >= tests {
        QueryIntent::Documentation
    } else {
        QueryIntent::Testing
    }
}

/// True when any extracted term is entry-point vocabulary.
pub fn has_entry_point_vocabulary(terms: &[SearchTerm]) -> bool {
    terms.iter().any(|t| is_entry_point_word(&t.text))
}
