//! YAML frontmatter extraction.
//!
//! A frontmatter block sits at the very start of a markdown file:
//!
//! ```text
//! ---
//! id: hello
//! tags: [rust, blog]
//! publishedAt: 2024-01-15T00:00:00Z
//! ---
//! # Hello
//! ```
//!
//! The block is decoded into a [`serde_yaml::Value`] mapping. Only four keys
//! are interpreted (`id`, `tags`, `createdAt`, `publishedAt`); the coercion
//! rules live on [`Frontmatter`].

use super::date::normalize_date;
use regex::Regex;
use serde_yaml::{Mapping, Value};
use std::sync::LazyLock;
use thiserror::Error;

/// Opening `---` line, block body, closing `---` line.
static FRONTMATTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A---[ \t]*\r?\n(.*?)\r?\n---[ \t]*(?:\r?\n|\z)").unwrap()
});

/// Errors for a delimited block that could not be decoded.
#[derive(Debug, Error)]
pub enum FrontmatterError {
    #[error("invalid yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("expected a mapping, found {0}")]
    NotAMapping(&'static str),
}

/// Decoded frontmatter mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frontmatter {
    fields: Mapping,
}

impl Frontmatter {
    pub fn from_mapping(fields: Mapping) -> Self {
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// `id` as a string; empty strings and non-scalars count as absent.
    pub fn id(&self) -> Option<String> {
        self.get("id").and_then(scalar_string)
    }

    /// `tags` as a list of strings.
    ///
    /// A sequence keeps its order and duplicates; null and nested entries
    /// are dropped. A single string is treated as a one-element list.
    pub fn tags(&self) -> Vec<String> {
        match self.get("tags").map(untag) {
            Some(Value::Sequence(items)) => items.iter().filter_map(tag_name).collect(),
            Some(Value::String(tag)) if !tag.is_empty() => vec![tag.clone()],
            _ => Vec::new(),
        }
    }

    /// `createdAt`, normalized to an ISO 8601 UTC timestamp when it parses.
    pub fn created_at(&self) -> Option<String> {
        self.date("createdAt")
    }

    /// `publishedAt`, normalized like [`Self::created_at`].
    pub fn published_at(&self) -> Option<String> {
        self.date("publishedAt")
    }

    fn date(&self, key: &str) -> Option<String> {
        self.get(key).and_then(scalar_string).map(normalize_date)
    }

    /// `(createdAt, publishedAt)`, each falling back to the other.
    pub fn dates(&self) -> (Option<String>, Option<String>) {
        let created = self.created_at();
        let published = self.published_at();
        (
            created.clone().or_else(|| published.clone()),
            published.or(created),
        )
    }
}

/// Extract and decode the frontmatter block at the start of `content`.
///
/// Returns `Ok(None)` when there is no delimited block or the block is empty.
pub fn extract_frontmatter(content: &str) -> Result<Option<Frontmatter>, FrontmatterError> {
    let Some(caps) = FRONTMATTER_RE.captures(content) else {
        return Ok(None);
    };

    match serde_yaml::from_str::<Value>(&caps[1])? {
        Value::Null => Ok(None),
        Value::Mapping(fields) => Ok(Some(Frontmatter::from_mapping(fields))),
        other => Err(FrontmatterError::NotAMapping(kind_of(&other))),
    }
}

/// Remove a leading frontmatter block without decoding it.
pub fn strip_frontmatter(content: &str) -> &str {
    match FRONTMATTER_RE.find(content) {
        Some(m) => &content[m.end()..],
        None => content,
    }
}

fn untag(value: &Value) -> &Value {
    match value {
        Value::Tagged(tagged) => untag(&tagged.value),
        other => other,
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match untag(value) {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn tag_name(value: &Value) -> Option<String> {
    match untag(value) {
        Value::Bool(b) => Some(b.to_string()),
        other => scalar_string(other),
    }
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
