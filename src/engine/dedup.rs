//! Cross-category deduplication.
//!
//! Several sources may list the same term under different categories (a
//! mapping's key is often also another mapping's value). The emitted grammar
//! must be unambiguous, so every term is assigned to exactly one category.
//!
//! ## Assignment
//!
//! Categories are walked in [`PrecedenceOrder`] with a running `claimed` set:
//!
//! ```text
//! keyword    {action, target}         claimed = {}
//!            keeps {action, target}   claimed = {action, target}
//! enummember {action.start, target}
//!            keeps {action.start}     claimed = {action, action.start, target}
//! ```
//!
//! A category adds its *whole* candidate set to `claimed`, not just what it
//! kept, so the owner of a term is always the first category in precedence
//! order that lists it.
//!
//! ## Invariants
//!
//! - Outputs are pairwise disjoint.
//! - The union of outputs equals the union of candidates.
//! - Every candidate category must be ranked; unranked ones are an error rather
//!   than falling through to the generic identifier rule.

use super::{Candidates, Category, PrecedenceOrder};
use crate::error::{GrammarError, Result};
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, warn};

/// Assign every candidate term to exactly one category.
///
/// Returns one [`Category`] per entry of `order`, in order. Ranked categories
/// with no candidates come back empty.
pub fn resolve(mut candidates: Candidates, order: &PrecedenceOrder) -> Result<Vec<Category>> {
    validate(&candidates, order)?;

    let mut claimed: HashSet<String> = HashSet::new();
    let mut categories = Vec::with_capacity(order.len());

    for name in order.iter() {
        let candidate = candidates.remove(name).unwrap_or_default();
        let terms: BTreeSet<String> = candidate.iter().filter(|t| !claimed.contains(*t)).cloned().collect();

        let category = Category { name: name.to_string(), terms, candidates: candidate.len() };
        if category.is_empty() && category.candidates > 0 {
            warn!(category = name, candidates = category.candidates, "every term is owned by a higher category");
        } else {
            debug!(category = name, kept = category.terms.len(), shadowed = category.shadowed(), "resolved category");
        }

        claimed.extend(candidate);
        categories.push(category);
    }

    Ok(categories)
}

fn validate(candidates: &Candidates, order: &PrecedenceOrder) -> Result<()> {
    let mut seen = HashSet::new();
    for name in order.iter() {
        if !seen.insert(name) {
            return Err(GrammarError::DuplicatePrecedence { category: name.to_string() });
        }
    }

    match candidates.keys().find(|name| !seen.contains(name.as_str())) {
        Some(name) => Err(GrammarError::UnlistedCategory { category: name.clone() }),
        None => Ok(()),
    }
}
