//! Generation configuration.
//!
//! Everything that decides the shape of the grammar (which sources feed which
//! categories, the precedence order, the grammar's identity) is fixed here at
//! build time. Only the data directory is a runtime input, so that a build
//! step can point the generator at its own checkout.

use crate::engine::PrecedenceOrder;
use std::path::{Path, PathBuf};

/// Directory holding the Popfile keyword data shipped with this crate.
pub const DEFAULT_DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/popfile");

pub const SCHEMA_URL: &str = "https://raw.githubusercontent.com/martinring/tmlanguage/master/tmlanguage.json";

pub const KEYWORD_CONTROL: &str = "keyword.control";
pub const ENUM_TYPE: &str = "entity.name.type.enum";
pub const KEYWORD: &str = "keyword";
pub const ENUM_MEMBER: &str = "variable.other.enummember";

/// How a source file is read and routed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    /// JSON object of primary key → values. Keys (and sigil-marked values) go to
    /// `key_category`, other values to `member_category`.
    Mapping { key_category: String, member_category: String },
    /// Newline-delimited terms, all routed to the category named after the file.
    List,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpec {
    /// File name relative to the data directory.
    pub file: String,
    pub kind: SourceKind,
}

/// Hand-picked terms merged into a category alongside the sourced ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraTerms {
    pub category: String,
    pub terms: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct GrammarConfig {
    /// Grammar display name (`name` in the output document).
    pub name: String,
    pub scope_name: String,
    pub schema: Option<String>,
    pub data_dir: PathBuf,
    pub sources: Vec<SourceSpec>,
    pub extra_terms: Vec<ExtraTerms>,
    pub precedence: PrecedenceOrder,
}

impl GrammarConfig {
    /// The Popfile grammar, reading its data from `data_dir`.
    pub fn popfile(data_dir: impl AsRef<Path>) -> Self {
        GrammarConfig {
            name: "Popfile".to_string(),
            scope_name: "source.popfile".to_string(),
            schema: Some(SCHEMA_URL.to_string()),
            data_dir: data_dir.as_ref().to_path_buf(),
            sources: vec![
                SourceSpec { file: format!("{KEYWORD_CONTROL}.txt"), kind: SourceKind::List },
                SourceSpec {
                    file: "values.json".to_string(),
                    kind: SourceKind::Mapping {
                        key_category: ENUM_TYPE.to_string(),
                        member_category: ENUM_MEMBER.to_string(),
                    },
                },
                SourceSpec {
                    file: "keys.json".to_string(),
                    kind: SourceKind::Mapping { key_category: KEYWORD.to_string(), member_category: KEYWORD.to_string() },
                },
            ],
            extra_terms: vec![
                ExtraTerms { category: ENUM_TYPE.to_string(), terms: vec!["where".to_string()] },
                ExtraTerms { category: KEYWORD.to_string(), terms: vec!["ItemName".to_string()] },
                ExtraTerms { category: ENUM_MEMBER.to_string(), terms: vec!["spawnbot".to_string()] },
            ],
            precedence: PrecedenceOrder::new([KEYWORD_CONTROL, ENUM_TYPE, KEYWORD, ENUM_MEMBER]),
        }
    }
}

impl Default for GrammarConfig {
    fn default() -> Self {
        GrammarConfig::popfile(DEFAULT_DATA_DIR)
    }
}
