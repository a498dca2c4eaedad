//! Rule emission and assembly.
//!
//! Each non-empty [`Category`] becomes one case-insensitive, whole-word
//! alternation rule. The full rule list is then assembled in four fixed phases
//! ([`ASSEMBLY_ORDER`]): structural rules first, dynamic categories in
//! precedence order, then the numeric and identifier fallbacks. A tokenizer
//! tries rules in list order, so the identifier fallback must stay last to only
//! catch what nothing else claimed.

use super::Category;
use crate::error::{GrammarError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// A single grammar match rule.
///
/// Field order is the serialized order; consumers compare output byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    /// Semantic tag. Absent for rules that tag their capture groups instead.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "match")]
    pub pattern: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captures: Option<BTreeMap<String, Capture>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Capture {
    pub name: String,
}

pub type RuleList = Vec<Rule>;

impl Rule {
    pub fn named(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Rule { name: Some(name.into()), pattern: pattern.into(), captures: None }
    }

    /// Compile the pattern with the `regex` engine.
    pub fn compile(&self) -> Result<Regex> {
        Regex::new(&self.pattern).map_err(|source| GrammarError::InvalidPattern { rule: self.label(), source })
    }

    fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.pattern.clone(),
        }
    }
}

/// Groups of rules, in the order they appear in the emitted list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// `#base` directive, comments, bracketed constants, strings.
    Structural,
    /// One rule per non-empty category, in precedence order.
    Dynamic,
    /// Bare integers.
    Numeric,
    /// Any remaining word.
    Fallback,
}

pub const ASSEMBLY_ORDER: [Phase; 4] = [Phase::Structural, Phase::Dynamic, Phase::Numeric, Phase::Fallback];

static STRUCTURAL_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    let captures = BTreeMap::from([
        ("1".to_string(), Capture { name: "keyword.control".to_string() }),
        ("2".to_string(), Capture { name: "string".to_string() }),
    ]);

    vec![
        Rule { name: None, pattern: r#"^(\s?"?#base"?)\s+("?.*"?)$"#.to_string(), captures: Some(captures) },
        Rule::named("comment", "//.*$"),
        Rule::named("constant.character", r"\[.*\]"),
        Rule::named("string", r#"".*""#),
    ]
});

static NUMERIC_RULE: Lazy<Rule> = Lazy::new(|| Rule::named("constant.numeric", r"\b(\d+)\b"));

static FALLBACK_RULE: Lazy<Rule> = Lazy::new(|| Rule::named("variable", r"\b(\w+)\b"));

/// Case-insensitive whole-word alternation over `terms`, each regex-escaped.
pub fn alternation<'a>(terms: impl IntoIterator<Item = &'a String>) -> String {
    let body = terms.into_iter().map(|t| regex::escape(t)).collect::<Vec<_>>().join("|");
    format!(r"(?i)\b({body})\b")
}

/// The match rule for `category`, or `None` when it owns no terms.
pub fn category_rule(category: &Category) -> Result<Option<Rule>> {
    if category.is_empty() {
        return Ok(None);
    }

    let rule = Rule::named(&category.name, alternation(&category.terms));
    rule.compile()?;
    Ok(Some(rule))
}

/// Assemble the full rule list from resolved `categories` (precedence order).
pub fn assemble(categories: &[Category]) -> Result<RuleList> {
    let mut rules = RuleList::new();

    for phase in ASSEMBLY_ORDER {
        match phase {
            Phase::Structural => rules.extend(STRUCTURAL_RULES.iter().cloned()),
            Phase::Dynamic => {
                for category in categories {
                    match category_rule(category)? {
                        Some(rule) => rules.push(rule),
                        None => debug!(category = %category.name, "omitting empty category"),
                    }
                }
            }
            Phase::Numeric => rules.push(NUMERIC_RULE.clone()),
            Phase::Fallback => rules.push(FALLBACK_RULE.clone()),
        }
    }

    Ok(rules)
}
