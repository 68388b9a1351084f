//! JSON loading for rule lists and lexicons.
//!
//! Rule files are a JSON array, in priority order:
//!
//! ```text
//! [
//!   { "rule_id": "subject_verb", "pattern": ["SujV", "SV"],
//!     "result_category": "SV", "condition": "adjacent" },
//!   ...
//! ]
//! ```
//!
//! A file that cannot be read or is not an array is a [`ConfigError`]. Inside
//! the array, an entry that does not describe a usable rule (not an object,
//! unknown category code, empty pattern) is skipped with a warning so one bad
//! entry does not take the whole rule set down.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::rules::Lexicon;
use crate::{Category, Rule};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Deserialize)]
struct RawRule {
    #[serde(default)]
    rule_id: Option<String>,
    pattern: Vec<String>,
    result_category: String,
    #[serde(default)]
    condition: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl RawRule {
    fn into_rule(self, position: usize) -> Result<Rule, String> {
        let id = self.rule_id.filter(|id| !id.is_empty()).unwrap_or_else(|| format!("rule_{position}"));
        if self.pattern.is_empty() {
            return Err(format!("rule '{id}' has an empty pattern"));
        }
        let pattern = self
            .pattern
            .iter()
            .map(|code| code.parse::<Category>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| format!("rule '{id}': {e}"))?;
        let result = self.result_category.parse::<Category>().map_err(|e| format!("rule '{id}': {e}"))?;

        Ok(Rule { id, pattern, result, condition: self.condition, description: self.description })
    }
}

/// Parse a JSON rule list.
pub fn parse_rules(json: &str) -> Result<Vec<Rule>, ConfigError> {
    parse_rules_from(json, "<rules>")
}

/// Read and parse a JSON rule file.
pub fn load_rules(path: impl AsRef<Path>) -> Result<Vec<Rule>, ConfigError> {
    let path = path.as_ref();
    let json = read(path)?;
    parse_rules_from(&json, &path.display().to_string())
}

fn parse_rules_from(json: &str, origin: &str) -> Result<Vec<Rule>, ConfigError> {
    let entries: Vec<serde_json::Value> =
        serde_json::from_str(json).map_err(|source| ConfigError::Json { origin: origin.to_string(), source })?;

    let mut rules = Vec::with_capacity(entries.len());
    for (position, entry) in entries.into_iter().enumerate() {
        let converted = serde_json::from_value::<RawRule>(entry)
            .map_err(|e| format!("entry {position}: {e}"))
            .and_then(|raw| raw.into_rule(position));
        match converted {
            Ok(rule) => rules.push(rule),
            Err(reason) => tracing::warn!(origin, %reason, "skipping rule entry"),
        }
    }

    if rules.is_empty() {
        tracing::warn!(origin, "rule configuration holds no usable rules");
    }
    Ok(rules)
}

/// Parse a JSON lexicon. Missing lists fall back to the French defaults.
pub fn parse_lexicon(json: &str) -> Result<Lexicon, ConfigError> {
    serde_json::from_str::<Lexicon>(json)
        .map(Lexicon::normalized)
        .map_err(|source| ConfigError::Json { origin: "<lexicon>".to_string(), source })
}

pub fn load_lexicon(path: impl AsRef<Path>) -> Result<Lexicon, ConfigError> {
    let path = path.as_ref();
    let json = read(path)?;
    serde_json::from_str::<Lexicon>(&json)
        .map(Lexicon::normalized)
        .map_err(|source| ConfigError::Json { origin: path.display().to_string(), source })
}

fn read(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })
}
