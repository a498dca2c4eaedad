//! Build-time generator for the Popfile syntax-highlighting grammar.
//!
//! Keyword data comes from several independently authored sources, grouped by
//! semantic category. The generator lowercases and merges them, assigns every
//! term to exactly one category under a fixed [`PrecedenceOrder`], and emits an
//! ordered rule list whose order is the matching precedence for the editor's
//! tokenizer.
//!
//! ```text
//! source ──► engine::aggregate ──► engine::resolve ──► engine::assemble ──► Grammar::to_json
//! ```

mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod grammar;
pub mod source;

pub use api::{
    CategorySummary, GenerationDetails, GenerationResult, build_rules, collect_candidates, generate, generate_verbose,
};
pub use config::GrammarConfig;
pub use engine::{Category, PrecedenceOrder, Rule, RuleList};
pub use error::{GrammarError, Result};
pub use grammar::Grammar;
