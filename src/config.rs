//! Scoring configuration.
//!
//! Every tuning constant of the ranking pipeline lives here as a named,
//! serde-deserializable field. Nothing in the engine falls back to
//! hidden defaults: callers pass a [`ScoringConfig`] explicitly on every
//! invocation. The `Default` impl and serde defaults below are the
//! recommended tuning, not engine-internal state.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::intent::QueryIntent;

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    /// Maximum entries in the final selection.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// Minimum score an entry needs to survive selection.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Upper bound the summed contributions are clamped to.
    #[serde(default = "default_cap")]
    pub cap: f64,
    /// Magnitudes for the three exact-match variants.
    #[serde(default)]
    pub exact_match_boost: ExactMatchBoost,
    /// Intent-keyed extension promotion table.
    #[serde(default)]
    pub extension_boost_table: ExtensionBoostTable,
    /// Contribution for root-level documents when the query carries
    /// entry-point vocabulary.
    #[serde(default = "default_root_boost")]
    pub root_boost: f64,
    /// Maximum depth still considered "at or near the corpus root".
    #[serde(default = "default_root_depth")]
    pub root_depth: usize,
    /// Per-term overlap contribution, scaled by the term's source weight.
    #[serde(default = "default_term_overlap_weight")]
    pub term_overlap_weight: f64,
    /// Cap on the number of extracted search terms.
    #[serde(default = "default_max_terms")]
    pub max_terms: usize,
}

fn default_top_n() -> usize {
    8
}
fn default_threshold() -> f64 {
    0.25
}
fn default_cap() -> f64 {
    1.0
}
fn default_root_boost() -> f64 {
    0.25
}
fn default_root_depth() -> usize {
    1
}
fn default_term_overlap_weight() -> f64 {
    0.35
}
fn default_max_terms() -> usize {
    24
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            threshold: default_threshold(),
            cap: default_cap(),
            exact_match_boost: ExactMatchBoost::default(),
            extension_boost_table: ExtensionBoostTable::default(),
            root_boost: default_root_boost(),
            root_depth: default_root_depth(),
            term_overlap_weight: default_term_overlap_weight(),
            max_terms: default_max_terms(),
        }
    }
}

/// Magnitudes awarded when a path-derived term equals a candidate's full
/// path, bare filename, or filename-without-extension. The single
/// highest-matching variant determines the exact-match component.
#[derive(Debug, Clone, Deserialize)]
pub struct ExactMatchBoost {
    #[serde(default = "default_full_path_boost")]
    pub full_path: f64,
    #[serde(default = "default_file_name_boost")]
    pub file_name: f64,
    #[serde(default = "default_stem_boost")]
    pub stem: f64,
}

fn default_full_path_boost() -> f64 {
    0.95
}
fn default_file_name_boost() -> f64 {
    0.90
}
fn default_stem_boost() -> f64 {
    0.85
}

impl Default for ExactMatchBoost {
    fn default() -> Self {
        Self {
            full_path: default_full_path_boost(),
            file_name: default_file_name_boost(),
            stem: default_stem_boost(),
        }
    }
}

/// Extension boost table: intent -> (extension -> boost).
///
/// A missing entry is neutral (0.0). Extensions are stored lowercase
/// without the leading dot.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct ExtensionBoostTable {
    weights: HashMap<QueryIntent, HashMap<String, f64>>,
}

impl ExtensionBoostTable {
    /// Recommended default weights.
    ///
    /// Setup queries promote shell/PowerShell/batch scripts, doc queries
    /// promote markdown and plain text, test queries mildly promote the
    /// common source extensions.
    pub fn default_weights() -> Self {
        let mut weights = HashMap::new();

        weights.insert(
            QueryIntent::Setup,
            Self::build_map(&[
                ("bat", 0.45),
                ("ps1", 0.45),
                ("cmd", 0.45),
                ("sh", 0.45),
                ("py", 0.10),
                ("toml", 0.10),
                ("cfg", 0.10),
            ]),
        );

        weights.insert(
            QueryIntent::Documentation,
            Self::build_map(&[("md", 0.40), ("rst", 0.30), ("txt", 0.30)]),
        );

        weights.insert(
            QueryIntent::Testing,
            Self::build_map(&[
                ("py", 0.15),
                ("rs", 0.15),
                ("ts", 0.15),
                ("js", 0.15),
            ]),
        );

        Self { weights }
    }

    fn build_map(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs.iter().map(|(ext, w)| (ext.to_string(), *w)).collect()
    }

    /// Boost for `extension` under `intent`; 0.0 when absent.
    pub fn boost(&self, intent: QueryIntent, extension: &str) -> f64 {
        self.weights
            .get(&intent)
            .and_then(|m| m.get(extension))
            .copied()
            .unwrap_or(0.0)
    }

    fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.weights.values().flat_map(|m| m.values().copied())
    }
}

impl Default for ExtensionBoostTable {
    fn default() -> Self {
        Self::default_weights()
    }
}

impl ScoringConfig {
    /// Reject programmer-error configurations.
    ///
    /// Invalid config is the one hard-failure path of the engine; every
    /// data-dependent condition (empty query, empty index, malformed
    /// rows) degrades to an empty result instead.
    pub fn validate(&self) -> Result<()> {
        if self.top_n == 0 {
            bail!("top_n must be positive");
        }
        if self.max_terms == 0 {
            bail!("max_terms must be positive");
        }
        if self.cap <= 0.0 || !self.cap.is_finite() {
            bail!("cap must be a positive finite number, got {}", self.cap);
        }
        if self.threshold < 0.0 || self.threshold > self.cap {
            bail!(
                "threshold must be within [0, cap], got {} with cap {}",
                self.threshold,
                self.cap
            );
        }
        for (name, value) in [
            ("exact_match_boost.full_path", self.exact_match_boost.full_path),
            ("exact_match_boost.file_name", self.exact_match_boost.file_name),
            ("exact_match_boost.stem", self.exact_match_boost.stem),
            ("root_boost", self.root_boost),
            ("term_overlap_weight", self.term_overlap_weight),
        ] {
            if value < 0.0 || !value.is_finite() {
                bail!("{} must be non-negative and finite, got {}", name, value);
            }
        }
        if self.extension_boost_table.values().any(|v| v < 0.0 || !v.is_finite()) {
            bail!("extension_boost_table entries must be non-negative and finite");
        }
        Ok(())
    }
}

/// Load and validate a [`ScoringConfig`] from a TOML file.
pub fn load_config(path: &Path) -> Result<ScoringConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: ScoringConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        ScoringConfig::default().validate().unwrap();
    }

    #[test]
    fn test_zero_top_n_rejected() {
        let config = ScoringConfig {
            top_n: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_threshold_above_cap_rejected() {
        let config = ScoringConfig {
            threshold: 2.0,
            cap: 1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_boost_rejected() {
        let config = ScoringConfig {
            root_boost: -0.1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_extension_table_lookup() {
        let table = ExtensionBoostTable::default_weights();
        assert!(table.boost(QueryIntent::Setup, "bat") > 0.0);
        assert!(table.boost(QueryIntent::Documentation, "md") > 0.0);
        assert_eq!(table.boost(QueryIntent::General, "bat"), 0.0);
        assert_eq!(table.boost(QueryIntent::Setup, "md"), 0.0);
    }

    #[test]
    fn test_toml_roundtrip_with_partial_fields() {
        let toml_str = r#"
            top_n = 4
            threshold = 0.5

            [extension_boost_table.setup]
            nsi = 0.3
        "#;
        let config: ScoringConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.top_n, 4);
        assert!((config.threshold - 0.5).abs() < f64::EPSILON);
        // Unlisted fields fall back to serde defaults.
        assert!((config.cap - 1.0).abs() < f64::EPSILON);
        assert!((config.extension_boost_table.boost(QueryIntent::Setup, "nsi") - 0.3).abs() < 1e-9);
        // An explicit table replaces the default weights entirely.
        assert_eq!(config.extension_boost_table.boost(QueryIntent::Setup, "bat"), 0.0);
    }

    #[test]
    fn test_load_config_from_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("relevance.toml");
        std::fs::write(&path, "top_n = 3\nroot_boost = 0.2\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.top_n, 3);
        assert!((config.root_boost - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_config_missing_file_fails() {
        let tmp = tempfile::TempDir::new().unwrap();
        assert!(load_config(&tmp.path().join("nope.toml")).is_err());
    }

    #[test]
    fn test_load_config_invalid_values_fail() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("relevance.toml");
        std::fs::write(&path, "top_n = 0\n").unwrap();
        assert!(load_config(&path).is_err());
    }
}
