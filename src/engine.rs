//! Category merge and rule ordering engine.
//!
//! Generating a grammar is a single left-to-right pass:
//!
//! ```text
//! RawSource ── aggregate (aggregate.rs) ──► Candidates
//!                 └─ normalize (normalize.rs): lowercase + sigil → Role
//!
//! Candidates + PrecedenceOrder ── resolve (dedup.rs) ──► Vec<Category>
//!                                   - first category in precedence owns a term
//!                                   - outputs pairwise disjoint
//!
//! Vec<Category> ── assemble (emit.rs) ──► RuleList
//!                    Structural → Dynamic → Numeric → Fallback
//! ```
//!
//! Ordering matters twice. The precedence order decides which category keeps
//! a term listed by several sources; the rule order decides which rule a
//! tokenizer tries first at a given position. Both are fixed inputs, never
//! derived from the data.
//!
//! ## Responsibilities by module
//!
//! - `normalize.rs`: canonical lowercase form and the exclusion sigil.
//! - `aggregate.rs`: flattens mapping and list sources into per-category sets.
//! - `dedup.rs`: assigns every term to exactly one category.
//! - `emit.rs`: turns categories into alternation rules and assembles the list.

#[path = "engine/aggregate.rs"]
mod aggregate;
#[path = "engine/dedup.rs"]
mod dedup;
#[path = "engine/emit.rs"]
mod emit;
#[path = "engine/normalize.rs"]
mod normalize;

pub use aggregate::Aggregator;
pub use dedup::resolve;
pub use emit::{ASSEMBLY_ORDER, Capture, Phase, Rule, RuleList, alternation, assemble, category_rule};
pub use normalize::{EXCLUSION_SIGIL, Role, Term, normalize};

use std::collections::{BTreeMap, BTreeSet};

/// Category name → candidate terms, before cross-category deduplication.
pub type Candidates = BTreeMap<String, BTreeSet<String>>;

/// A named bucket of terms that becomes one match rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    /// Terms this category owns after deduplication.
    pub terms: BTreeSet<String>,
    /// Number of candidate terms before deduplication.
    pub candidates: usize,
}

impl Category {
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Candidate terms already owned by a higher-precedence category.
    pub fn shadowed(&self) -> usize {
        self.candidates - self.terms.len()
    }
}

/// Ranking of category names, highest priority first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PrecedenceOrder {
    names: Vec<String>,
}

impl PrecedenceOrder {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PrecedenceOrder { names: names.into_iter().map(Into::into).collect() }
    }

    /// Position of `name`, 0 being the highest priority.
    pub fn rank(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_follows_insertion_order() {
        let order = PrecedenceOrder::new(["keyword", "enummember"]);
        assert_eq!(order.rank("keyword"), Some(0));
        assert_eq!(order.rank("enummember"), Some(1));
        assert_eq!(order.rank("variable"), None);
        assert_eq!(order.iter().collect::<Vec<_>>(), vec!["keyword", "enummember"]);
    }
}
