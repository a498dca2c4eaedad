use crate::config::GrammarConfig;
use crate::engine::{self, Aggregator, Candidates, Category, PrecedenceOrder, RuleList};
use crate::error::Result;
use crate::grammar::Grammar;
use crate::source;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing::info;

/// Per-category outcome of a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    pub name: String,
    /// Terms listed for this category by any source.
    pub candidates: usize,
    /// Terms this category kept after deduplication.
    pub kept: usize,
    /// Terms owned by a higher-precedence category.
    pub shadowed: usize,
    /// Whether a rule was emitted (empty categories are omitted).
    pub emitted: bool,
}

/// Additional details returned by [`generate_verbose`].
#[derive(Debug, Clone)]
pub struct GenerationDetails {
    /// Categories in precedence order.
    pub categories: Vec<CategorySummary>,
    /// Number of rules in the emitted list.
    pub rules: usize,
    pub elapsed: Duration,
}

/// Result from [`generate_verbose`].
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub grammar: Grammar,
    pub details: GenerationDetails,
}

/// Load every configured source and merge it into candidate sets.
pub fn collect_candidates(config: &GrammarConfig) -> Result<Candidates> {
    let mut aggregator = Aggregator::new();

    for spec in &config.sources {
        aggregator.add_source(source::load(&config.data_dir, spec)?);
    }
    for extra in &config.extra_terms {
        aggregator.add_extra(&extra.category, &extra.terms);
    }

    Ok(aggregator.finish())
}

/// Deduplicate `candidates` under `order` and assemble the rule list.
///
/// This is the whole pipeline minus I/O.
///
/// # Example
/// ```
/// use popgram::{PrecedenceOrder, build_rules};
/// use std::collections::{BTreeMap, BTreeSet};
///
/// let candidates = BTreeMap::from([
///     ("keyword".to_string(), BTreeSet::from(["action".to_string(), "target".to_string()])),
///     ("enummember".to_string(), BTreeSet::from(["action.start".to_string(), "target".to_string()])),
/// ]);
/// let (categories, rules) = build_rules(candidates, &PrecedenceOrder::new(["keyword", "enummember"])).unwrap();
///
/// assert_eq!(categories[1].terms.len(), 1);
/// assert_eq!(rules[4].pattern, r"(?i)\b(action|target)\b");
/// assert_eq!(rules[5].pattern, r"(?i)\b(action\.start)\b");
/// ```
pub fn build_rules(candidates: Candidates, order: &PrecedenceOrder) -> Result<(Vec<Category>, RuleList)> {
    let categories = engine::resolve(candidates, order)?;
    let rules = engine::assemble(&categories)?;
    Ok((categories, rules))
}

/// Generate the grammar described by `config`.
pub fn generate(config: &GrammarConfig) -> Result<Grammar> {
    generate_verbose(config).map(|res| res.grammar)
}

/// Generate the grammar described by `config` and report what happened to
/// each category.
pub fn generate_verbose(config: &GrammarConfig) -> Result<GenerationResult> {
    let start = Instant::now();

    let candidates = collect_candidates(config)?;
    let (categories, patterns) = build_rules(candidates, &config.precedence)?;

    let grammar = Grammar {
        schema: config.schema.clone(),
        name: config.name.clone(),
        patterns,
        repository: BTreeMap::new(),
        scope_name: config.scope_name.clone(),
    };

    let details = GenerationDetails {
        categories: categories.iter().map(summarize).collect(),
        rules: grammar.patterns.len(),
        elapsed: start.elapsed(),
    };

    info!(grammar = %grammar.name, rules = details.rules, "generated grammar");
    Ok(GenerationResult { grammar, details })
}

fn summarize(category: &Category) -> CategorySummary {
    CategorySummary {
        name: category.name.clone(),
        candidates: category.candidates,
        kept: category.terms.len(),
        shadowed: category.shadowed(),
        emitted: !category.is_empty(),
    }
}
