//! Flattening sources into per-category candidate sets.
//!
//! A mapping source contributes to two categories: its primary keys (plus any
//! value marked with the exclusion sigil) to the key category, and its plain
//! values to the member category. A value the source marks as a key name is
//! never counted as a member of that source, even if it is also listed
//! unmarked. Plain values that merely equal some key stay members; which
//! category owns them is decided later by precedence. A list source feeds a
//! single category.

use super::Candidates;
use super::normalize::{Role, lower, normalize};
use crate::source::{RawEntry, RawSource};
use std::collections::BTreeSet;
use tracing::debug;

#[derive(Debug, Default)]
pub struct Aggregator {
    candidates: Candidates,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route every term of `source` into its categories.
    pub fn add_source(&mut self, source: RawSource) {
        match source {
            RawSource::Mapping { key_category, member_category, entries } => {
                self.add_mapping(&key_category, &member_category, entries)
            }
            RawSource::List { category, lines } => self.add_terms(&category, lines.iter().map(|l| lower(l))),
        }
    }

    fn add_mapping(&mut self, key_category: &str, member_category: &str, entries: Vec<RawEntry>) {
        let mut keys = BTreeSet::new();
        let mut marked = BTreeSet::new();
        let mut members = BTreeSet::new();

        for entry in entries {
            keys.insert(normalize(&entry.key).text);
            for value in &entry.values {
                let term = normalize(value);
                match term.role {
                    Role::KeyName => marked.insert(term.text),
                    Role::MemberValue => members.insert(term.text),
                };
            }
        }

        // Only sigil-marked names leave the member set; any other overlap with
        // the keys is settled by precedence in `dedup.rs`.
        members.retain(|m| !marked.contains(m));
        keys.append(&mut marked);

        debug!(key_category, keys = keys.len(), member_category, members = members.len(), "aggregated mapping");
        self.add_terms(key_category, keys);
        self.add_terms(member_category, members);
    }

    /// Merge already-collected terms into `category`, lowercasing them.
    pub fn add_extra<I, S>(&mut self, category: &str, terms: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.add_terms(category, terms.into_iter().map(|t| lower(t.as_ref())));
    }

    fn add_terms(&mut self, category: &str, terms: impl IntoIterator<Item = String>) {
        self.candidates.entry(category.to_string()).or_default().extend(terms);
    }

    pub fn finish(self) -> Candidates {
        self.candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: &str, values: &[&str]) -> RawEntry {
        RawEntry { key: key.to_string(), values: values.iter().map(|v| v.to_string()).collect() }
    }

    fn set(terms: &[&str]) -> BTreeSet<String> {
        terms.iter().map(|t| t.to_string()).collect()
    }

    fn mapping(entries: Vec<RawEntry>) -> RawSource {
        RawSource::Mapping { key_category: "keyword".into(), member_category: "enummember".into(), entries }
    }

    #[test]
    fn mapping_splits_keys_and_members_across_entries() {
        let mut agg = Aggregator::new();
        agg.add_source(mapping(vec![entry("Skill", &["Easy", "Hard"]), entry("Class", &["Scout", "EASY"])]));
        let out = agg.finish();

        assert_eq!(out["keyword"], set(&["class", "skill"]));
        assert_eq!(out["enummember"], set(&["easy", "hard", "scout"]));
    }

    #[test]
    fn sigil_value_goes_to_key_category_even_when_listed_plain() {
        let mut agg = Aggregator::new();
        agg.add_source(mapping(vec![entry("Gadget", &["~widget", "widget", "sprocket"])]));
        let out = agg.finish();

        assert_eq!(out["keyword"], set(&["gadget", "widget"]));
        assert_eq!(out["enummember"], set(&["sprocket"]));
    }

    #[test]
    fn plain_value_matching_another_key_stays_a_member() {
        let mut agg = Aggregator::new();
        agg.add_source(mapping(vec![entry("Action", &["Start"]), entry("Mode", &["Action"])]));
        let out = agg.finish();

        assert_eq!(out["keyword"], set(&["action", "mode"]));
        assert_eq!(out["enummember"], set(&["action", "start"]));
    }

    #[test]
    fn primary_key_sigil_is_stripped() {
        let mut agg = Aggregator::new();
        agg.add_source(mapping(vec![entry("~Widget", &["Cog"])]));
        let out = agg.finish();

        assert_eq!(out["keyword"], set(&["widget"]));
        assert_eq!(out["enummember"], set(&["cog"]));
    }

    #[test]
    fn list_feeds_one_category() {
        let mut agg = Aggregator::new();
        agg.add_source(RawSource::List { category: "keyword.control".into(), lines: vec!["Action".into(), "TARGET".into()] });
        let out = agg.finish();

        assert_eq!(out.len(), 1);
        assert_eq!(out["keyword.control"], set(&["action", "target"]));
    }

    #[test]
    fn list_lines_keep_a_leading_sigil() {
        let mut agg = Aggregator::new();
        agg.add_source(RawSource::List { category: "misc".into(), lines: vec!["~Odd".into()] });
        assert_eq!(agg.finish()["misc"], set(&["~odd"]));
    }

    #[test]
    fn sources_sharing_a_category_are_merged() {
        let mut agg = Aggregator::new();
        agg.add_source(mapping(vec![entry("Wave", &[])]));
        agg.add_source(mapping(vec![entry("wave", &[]), entry("Mission", &[])]));
        agg.add_extra("keyword", ["ItemName"]);
        let out = agg.finish();

        assert_eq!(out["keyword"], set(&["itemname", "mission", "wave"]));
        assert!(out["enummember"].is_empty());
    }
}
