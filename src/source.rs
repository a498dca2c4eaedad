//! Source loading.
//!
//! A source is one file under the data directory, either a JSON mapping of
//! primary key → values, or a newline-delimited list of terms. Loading only
//! parses the file shape; normalization and routing happen in
//! `engine::aggregate`.
//!
//! Two mapping shapes are accepted, because the keyword data has been authored
//! in both over time:
//!
//! ```text
//! { "Skill": ["Easy", "Normal", "~Skill"] }
//! { "Skill": { "values": ["Easy", { "label": "Normal" }] } }
//! ```

use crate::config::{SourceKind, SourceSpec};
use crate::error::{GrammarError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// One `(key, values)` pair of a mapping source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub key: String,
    pub values: Vec<String>,
}

/// Raw contents of a loaded source, already tagged with the categories the
/// aggregator routes them into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawSource {
    Mapping { key_category: String, member_category: String, entries: Vec<RawEntry> },
    List { category: String, lines: Vec<String> },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MappingValue {
    Plain(Vec<String>),
    Described { values: Vec<ValueItem> },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ValueItem {
    Plain(String),
    Labelled { label: String },
}

impl ValueItem {
    fn into_string(self) -> String {
        match self {
            ValueItem::Plain(s) => s,
            ValueItem::Labelled { label } => label,
        }
    }
}

impl MappingValue {
    fn into_values(self) -> Vec<String> {
        match self {
            MappingValue::Plain(values) => values,
            MappingValue::Described { values } => values.into_iter().map(ValueItem::into_string).collect(),
        }
    }
}

/// Identifier of a source: its file name without the final extension.
///
/// `keyword.control.txt` is identified as `keyword.control`.
pub fn source_id(file: &str) -> String {
    Path::new(file).file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_else(|| file.to_string())
}

/// Load `spec` from `data_dir`.
pub fn load(data_dir: &Path, spec: &SourceSpec) -> Result<RawSource> {
    let path = data_dir.join(&spec.file);
    let text = fs::read_to_string(&path).map_err(|source| GrammarError::Io { path: path.clone(), source })?;

    let raw = match &spec.kind {
        SourceKind::Mapping { key_category, member_category } => RawSource::Mapping {
            key_category: key_category.clone(),
            member_category: member_category.clone(),
            entries: parse_mapping(&path, &text)?,
        },
        SourceKind::List => RawSource::List { category: source_id(&spec.file), lines: parse_list(&text) },
    };

    debug!(path = %path.display(), terms = raw.len(), "loaded source");
    Ok(raw)
}

fn parse_mapping(path: &Path, text: &str) -> Result<Vec<RawEntry>> {
    let map: BTreeMap<String, MappingValue> =
        serde_json::from_str(text).map_err(|source| GrammarError::Json { path: path.to_path_buf(), source })?;

    Ok(map.into_iter().map(|(key, value)| RawEntry { key, values: value.into_values() }).collect())
}

/// Split a flat list into trimmed, non-blank lines.
pub fn parse_list(text: &str) -> Vec<String> {
    text.lines().map(str::trim).filter(|line| !line.is_empty()).map(str::to_string).collect()
}

impl RawSource {
    /// Number of raw strings carried by this source (keys and values).
    pub fn len(&self) -> usize {
        match self {
            RawSource::Mapping { entries, .. } => entries.iter().map(|e| 1 + e.values.len()).sum(),
            RawSource::List { lines, .. } => lines.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
