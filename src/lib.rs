//! # Context Relevance
//!
//! A lexical relevance engine that selects, from a pre-indexed corpus of
//! source files, the subset most relevant to a task description, for
//! injection as context into an LLM prompt.
//!
//! The engine is a pure ranking function: it neither builds the index
//! nor talks to any model provider. An upstream orchestrator supplies
//! task metadata and a read-only index snapshot; a downstream prompt
//! assembler consumes the ordered selection.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────┐   ┌────────────────┐   ┌──────────────┐
//! │ Query Builder │──▶│ Term Extractor │──▶│   Scorer     │
//! │ title+desc+   │   │ paths/compound │   │ per-candidate│
//! │ tags          │   │ /tokens        │   │ boost sum    │
//! └───────────────┘   └────────────────┘   └──────┬───────┘
//!                                                 │
//!                                          ┌──────▼───────┐
//!                                          │   Selector   │
//!                                          │ dedup + sort │
//!                                          │ + truncate   │
//!                                          └──────────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Scoring configuration, TOML parsing, validation |
//! | [`models`] | Core data types and index-boundary validation |
//! | [`query`] | Query text assembly from task metadata |
//! | [`extract`] | Path-aware, multi-signal term extraction |
//! | [`intent`] | Coarse query-intent classification |
//! | [`score`] | Additive clamped multi-boost scoring |
//! | [`select`] | Threshold, dedup, deterministic ordering |
//! | [`engine`] | End-to-end pipeline entry point |

pub mod config;
pub mod engine;
pub mod extract;
pub mod intent;
pub mod models;
pub mod query;
pub mod score;
pub mod select;
