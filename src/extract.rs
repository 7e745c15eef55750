//! Multi-signal term extraction.
//!
//! Turns free-form task text into an ordered set of weighted search
//! terms. Extraction runs in priority order: path references first
//! (their spans are consumed so later stages never re-tokenize them),
//! then compound identifiers, then stopword-filtered generic tokens.
//! Terms are case-normalized and unique per pass.

use std::collections::HashSet;

use crate::models::{normalize_path, SearchTerm, TermSource};

/// Extensions recognized when deciding whether a token is a file
/// reference. Covers the code and doc formats the indexer ingests.
fn is_known_extension(ext: &str) -> bool {
    matches!(
        ext,
        "rs" | "py" | "js" | "ts" | "jsx" | "tsx" | "go" | "java" | "kt"
            | "c" | "h" | "cc" | "cpp" | "hpp" | "cs" | "rb" | "php" | "swift"
            | "sh" | "bash" | "zsh" | "bat" | "cmd" | "ps1"
            | "toml" | "yaml" | "yml" | "json" | "ini" | "cfg" | "env"
            | "md" | "rst" | "txt" | "html" | "css" | "xml" | "sql" | "lock"
    )
}

/// Common words filtered out of generic tokenization.
pub fn is_stop_word(w: &str) -> bool {
    matches!(
        w,
        "a" | "an" | "the" | "and" | "or" | "but" | "if" | "then" | "else"
            | "when" | "while" | "where" | "why" | "how" | "of" | "to" | "in"
            | "on" | "at" | "by" | "for" | "with" | "about" | "from" | "into"
            | "over" | "after" | "before" | "between" | "through" | "during"
            | "without" | "within" | "is" | "are" | "was" | "were" | "be"
            | "been" | "being" | "do" | "does" | "did" | "doing" | "will"
            | "have" | "has" | "had" | "having" | "can" | "could" | "should"
            | "would" | "may" | "might" | "must" | "shall" | "such" | "as"
            | "it" | "its" | "this" | "that" | "these" | "those" | "he"
            | "she" | "they" | "them" | "their" | "there" | "here" | "we"
            | "you" | "your" | "i" | "me" | "my" | "our" | "us" | "not"
            | "no" | "yes" | "than" | "too" | "very" | "also" | "just"
            | "only" | "even" | "more" | "most" | "some" | "any" | "each"
            | "other" | "please" | "make" | "need" | "needs" | "want"
            | "simple" | "like" | "fix" | "add" | "use" | "used" | "using"
            | "new" | "get" | "set" | "see"
    )
}

/// Accumulates case-normalized, deduplicated terms.
struct TermSet {
    terms: Vec<SearchTerm>,
    seen: HashSet<String>,
}

impl TermSet {
    fn new() -> Self {
        Self {
            terms: Vec::new(),
            seen: HashSet::new(),
        }
    }

    fn push(&mut self, text: &str, source: TermSource) {
        let text = text.to_lowercase();
        if text.is_empty() {
            return;
        }
        if self.seen.insert(text.clone()) {
            self.terms.push(SearchTerm::new(text, source));
        }
    }
}

/// Extract weighted search terms from query text.
///
/// The result is ordered by source priority (path, directory, compound,
/// token) and capped at `max_terms` without evicting higher-priority
/// terms. A query with only stopwords yields an empty list; that is a
/// valid outcome, not an error.
pub fn extract_terms(query_text: &str, max_terms: usize) -> Vec<SearchTerm> {
    if query_text.trim().is_empty() || max_terms == 0 {
        return Vec::new();
    }

    let mut set = TermSet::new();

    // Stage 1a: quoted paths, spans consumed.
    let working = strip_quoted_paths(query_text, &mut set);

    // Stage 1b: unquoted path-like tokens, also consumed.
    let mut word_buf: Vec<&str> = Vec::new();
    for raw in working.split_whitespace() {
        let token = trim_punctuation(raw);
        if token.is_empty() {
            continue;
        }
        if looks_like_path(token) {
            push_path_terms(token, &mut set);
        } else {
            word_buf.push(token);
        }
    }

    // Stage 2: compound identifiers, kept whole plus their sub-tokens.
    let mut plain_words: Vec<&str> = Vec::new();
    for word in word_buf {
        if is_compound_word(word) {
            set.push(word, TermSource::Compound);
            for sub in split_compound(word) {
                if sub.len() >= 2 && !is_stop_word(&sub) {
                    set.push(&sub, TermSource::Token);
                }
            }
        } else {
            plain_words.push(word);
        }
    }

    // Stage 3: generic tokenization of whatever is left.
    for word in plain_words {
        for piece in word.split(|c: char| !c.is_alphanumeric()) {
            let piece = piece.to_lowercase();
            if piece.len() >= 2 && !is_stop_word(&piece) {
                set.push(&piece, TermSource::Token);
            }
        }
    }

    // Priority-preserving truncation: stable sort keeps insertion order
    // within a weight tier, so path terms are never evicted for tokens.
    let mut terms = set.terms;
    terms.sort_by(|a, b| b.weight.partial_cmp(&a.weight).unwrap_or(std::cmp::Ordering::Equal));
    terms.truncate(max_terms);
    terms
}

/// Remove quoted path spans from `text`, emitting their terms.
///
/// Quoted spans that are not path-like are left in place for the later
/// stages (an apostrophe inside prose must not eat half the sentence).
fn strip_quoted_paths(text: &str, set: &mut TermSet) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == '"' || c == '\'' {
            if let Some(end) = chars[i + 1..].iter().position(|&x| x == c) {
                let end = i + 1 + end;
                let inner: String = chars[i + 1..end].iter().collect();
                if looks_like_path(&inner) {
                    push_path_terms(&inner, set);
                    out.push(' ');
                    i = end + 1;
                    continue;
                }
            }
        }
        out.push(c);
        i += 1;
    }

    out
}

/// Strip punctuation from both ends of a token, keeping path separators
/// and underscores so `mods/ai/agent_mode.py,` survives intact.
fn trim_punctuation(token: &str) -> &str {
    token.trim_matches(|c: char| !(c.is_alphanumeric() || matches!(c, '/' | '\\' | '_')))
}

/// Heuristic for "this token is a file or directory reference".
fn looks_like_path(token: &str) -> bool {
    if token.is_empty() || token.chars().any(char::is_whitespace) {
        return false;
    }
    if !token
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '/' | '\\' | '.' | '_' | '-'))
    {
        return false;
    }

    let norm = token.replace('\\', "/");
    if norm.contains('/') {
        let segments: Vec<&str> = norm
            .split('/')
            .filter(|s| !s.is_empty() && *s != ".")
            .collect();
        match segments.len() {
            0 => false,
            1 => has_known_extension(segments[0]),
            // A dir/file pair counts even without an extension, unless it
            // is pure prose like "and/or".
            _ => {
                has_known_extension(segments[segments.len() - 1])
                    || !segments.iter().all(|s| is_stop_word(&s.to_lowercase()))
            }
        }
    } else {
        has_known_extension(&norm)
    }
}

fn has_known_extension(file_name: &str) -> bool {
    match file_name.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < file_name.len() => {
            is_known_extension(&file_name[idx + 1..].to_lowercase())
        }
        _ => false,
    }
}

/// Emit the full path, bare filename, stem, and directory segments of a
/// matched path reference.
fn push_path_terms(raw: &str, set: &mut TermSet) {
    let norm = normalize_path(raw);
    if norm.is_empty() {
        return;
    }

    let segments: Vec<&str> = norm.split('/').collect();
    let file_name = segments[segments.len() - 1];

    set.push(&norm, TermSource::Path);
    set.push(file_name, TermSource::Path);
    if let Some(idx) = file_name.rfind('.') {
        if idx > 0 {
            set.push(&file_name[..idx], TermSource::Path);
        }
    }
    for dir in &segments[..segments.len() - 1] {
        set.push(dir, TermSource::Directory);
    }
}

/// Snake_case, kebab-case, camelCase, or alphanumeric-with-version.
fn is_compound_word(word: &str) -> bool {
    if !word.chars().any(|c| c.is_alphabetic()) {
        return false;
    }
    word.contains('_')
        || word.contains('-')
        || has_camel_transition(word)
        || word.chars().any(|c| c.is_ascii_digit())
}

fn has_camel_transition(word: &str) -> bool {
    let mut prev_lower = false;
    for c in word.chars() {
        if c.is_uppercase() && prev_lower {
            return true;
        }
        prev_lower = c.is_lowercase();
    }
    false
}

/// Split a compound identifier into lowercase sub-tokens on separators,
/// case transitions, and alpha/digit boundaries.
fn split_compound(word: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut prev: Option<char> = None;

    for c in word.chars() {
        if !c.is_alphanumeric() {
            flush(&mut parts, &mut current);
            prev = None;
            continue;
        }
        let boundary = match prev {
            Some(p) => {
                (c.is_uppercase() && p.is_lowercase())
                    || (c.is_ascii_digit() && p.is_alphabetic())
                    || (c.is_alphabetic() && p.is_ascii_digit())
            }
            None => false,
        };
        if boundary {
            flush(&mut parts, &mut current);
        }
        current.push(c);
        prev = Some(c);
    }
    flush(&mut parts, &mut current);
    parts
}

fn flush(parts: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        parts.push(current.to_lowercase());
        current.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(terms: &[SearchTerm]) -> Vec<&str> {
        terms.iter().map(|t| t.text.as_str()).collect()
    }

    fn find<'a>(terms: &'a [SearchTerm], text: &str) -> &'a SearchTerm {
        terms
            .iter()
            .find(|t| t.text == text)
            .unwrap_or_else(|| panic!("term {:?} not extracted", text))
    }

    #[test]
    fn test_slash_path_expands_to_all_variants() {
        let terms = extract_terms("update mods/ai/agent_mode.py today", 24);
        assert_eq!(find(&terms, "mods/ai/agent_mode.py").source, TermSource::Path);
        assert_eq!(find(&terms, "agent_mode.py").source, TermSource::Path);
        assert_eq!(find(&terms, "agent_mode").source, TermSource::Path);
        assert_eq!(find(&terms, "mods").source, TermSource::Directory);
        assert_eq!(find(&terms, "ai").source, TermSource::Directory);
        // The matched span is consumed: no generic "py" token from it.
        assert!(!texts(&terms).contains(&"py"));
    }

    #[test]
    fn test_quoted_path_single_and_double() {
        let terms = extract_terms(r#"see "docs/guide.md" and 'src/main.rs'"#, 24);
        assert!(texts(&terms).contains(&"docs/guide.md"));
        assert!(texts(&terms).contains(&"src/main.rs"));
        assert!(texts(&terms).contains(&"guide"));
        assert!(texts(&terms).contains(&"main"));
    }

    #[test]
    fn test_apostrophe_prose_is_not_a_path() {
        let terms = extract_terms("it doesn't break the tokenizer", 24);
        assert!(texts(&terms).contains(&"break"));
        assert!(texts(&terms).contains(&"tokenizer"));
    }

    #[test]
    fn test_bare_filename_with_known_extension() {
        let terms = extract_terms("look at setup_windows.bat please", 24);
        assert_eq!(find(&terms, "setup_windows.bat").source, TermSource::Path);
        assert_eq!(find(&terms, "setup_windows").source, TermSource::Path);
    }

    #[test]
    fn test_dir_file_pair_without_extension() {
        let terms = extract_terms("entry lives in src/main somewhere", 24);
        assert!(texts(&terms).contains(&"src/main"));
        assert_eq!(find(&terms, "src").source, TermSource::Directory);
    }

    #[test]
    fn test_prose_slash_is_not_a_path() {
        let terms = extract_terms("choose one and/or the other", 24);
        assert!(!texts(&terms).contains(&"and/or"));
    }

    #[test]
    fn test_backslash_path_normalized() {
        let terms = extract_terms(r"broken: mods\ai\agent_mode.py", 24);
        assert!(texts(&terms).contains(&"mods/ai/agent_mode.py"));
    }

    #[test]
    fn test_trailing_punctuation_trimmed() {
        let terms = extract_terms("edit mods/ai/agent_mode.py, thanks", 24);
        assert!(texts(&terms).contains(&"mods/ai/agent_mode.py"));
    }

    #[test]
    fn test_snake_case_compound_and_subtokens() {
        let terms = extract_terms("rework agent_mode handling", 24);
        assert_eq!(find(&terms, "agent_mode").source, TermSource::Compound);
        assert_eq!(find(&terms, "agent").source, TermSource::Token);
        assert_eq!(find(&terms, "mode").source, TermSource::Token);
    }

    #[test]
    fn test_kebab_and_camel_compounds() {
        let terms = extract_terms("wire task-manager into TaskBoard", 24);
        assert_eq!(find(&terms, "task-manager").source, TermSource::Compound);
        assert_eq!(find(&terms, "taskboard").source, TermSource::Compound);
        assert!(texts(&terms).contains(&"task"));
        assert!(texts(&terms).contains(&"manager"));
        assert!(texts(&terms).contains(&"board"));
    }

    #[test]
    fn test_versioned_identifier_is_compound() {
        let terms = extract_terms("migrate api2 endpoints", 24);
        assert_eq!(find(&terms, "api2").source, TermSource::Compound);
        assert!(texts(&terms).contains(&"api"));
    }

    #[test]
    fn test_generic_tokens_lowercased_and_filtered() {
        let terms = extract_terms("Fix the Kanban board rendering", 24);
        assert_eq!(find(&terms, "kanban").source, TermSource::Token);
        assert!(texts(&terms).contains(&"board"));
        assert!(texts(&terms).contains(&"rendering"));
        assert!(!texts(&terms).contains(&"the"));
        assert!(!texts(&terms).contains(&"fix"));
    }

    #[test]
    fn test_stopword_only_query_yields_nothing() {
        assert!(extract_terms("the a of and", 24).is_empty());
        assert!(extract_terms("", 24).is_empty());
        assert!(extract_terms("   ", 24).is_empty());
    }

    #[test]
    fn test_case_normalized_dedup() {
        let terms = extract_terms("Windows windows WINDOWS", 24);
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].text, "windows");
    }

    #[test]
    fn test_truncation_keeps_path_terms() {
        let terms = extract_terms(
            "alpha beta gamma delta epsilon zeta mods/ai/agent_mode.py",
            4,
        );
        assert_eq!(terms.len(), 4);
        // All three path variants survive; generic tokens get evicted first.
        assert!(texts(&terms).contains(&"mods/ai/agent_mode.py"));
        assert!(texts(&terms).contains(&"agent_mode.py"));
        assert!(texts(&terms).contains(&"agent_mode"));
    }

    #[test]
    fn test_ordering_follows_source_priority() {
        let terms = extract_terms("kanban agent_mode mods/ai/helper.py", 24);
        let weights: Vec<f64> = terms.iter().map(|t| t.weight).collect();
        let mut sorted = weights.clone();
        sorted.sort_by(|a, b| b.partial_cmp(a).unwrap());
        assert_eq!(weights, sorted, "terms must be ordered by weight tier");
    }
}
