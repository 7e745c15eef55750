//! Query assembly from task metadata.
//!
//! The builder only concatenates; case and punctuation are preserved so
//! the term extractor can exploit path and identifier structure.

/// Build the raw query text from a task's title, description, and tags.
///
/// Fields are joined in a fixed order (title, description, then tags
/// joined by whitespace). Empty fields are skipped; all-empty input
/// yields an empty string, which downstream stages treat as "no terms".
pub fn build_query(title: &str, description: &str, tags: &[String]) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(2 + tags.len());
    if !title.trim().is_empty() {
        parts.push(title);
    }
    if !description.trim().is_empty() {
        parts.push(description);
    }
    for tag in tags {
        if !tag.trim().is_empty() {
            parts.push(tag);
        }
    }
    parts.join(" ")
}
