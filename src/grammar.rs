//! The emitted grammar document and its JSON rendering.

use crate::engine::RuleList;
use crate::error::{GrammarError, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// A TextMate-style grammar.
///
/// Field order matches the documents existing editors already consume.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grammar {
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    pub name: String,
    pub patterns: RuleList,
    /// Always empty; present because consumers expect the key.
    pub repository: BTreeMap<String, serde_json::Value>,
    #[serde(rename = "scopeName")]
    pub scope_name: String,
}

impl Grammar {
    /// Render as JSON with four-space indentation and a trailing newline.
    pub fn to_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        self.serialize(&mut ser)?;

        let mut json = String::from_utf8(buf).map_err(<serde_json::Error as serde::ser::Error>::custom)?;
        json.push('\n');
        Ok(json)
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| GrammarError::Io { path: path.to_path_buf(), source })
    }
}
