//! Structural query trees.

use indexmap::IndexMap;
use regex::Regex;
use serde_json::Value;

use super::FilterConfig;
use super::compile::create_regex;
use crate::Result;
use crate::rules::{RuleTree, RuleValue};

/// A query value compared against the value at the same position in a target.
#[derive(Debug, Clone)]
pub enum QueryNode {
    /// Matches anything when undefined values are ignored, otherwise only a missing value.
    Undefined,
    /// Matches anything when `null` values are ignored, otherwise only `null`.
    Null,
    /// Matches a string target the regex finds a match in.
    Pattern(Regex),
    /// Matches an equal target.
    Literal(Value),
    /// Matches an object target whose entries match every query entry.
    Object(IndexMap<String, QueryNode>),
}

impl QueryNode {
    /// Build an object query from its entries.
    pub fn object<K: Into<String>>(entries: impl IntoIterator<Item = (K, QueryNode)>) -> Self {
        Self::Object(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )
    }

    /// Returns true for object queries.
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Copy the query, turning non-empty literal strings into regexes when
    /// the configuration asks for it.
    pub(crate) fn compile(&self, config: &FilterConfig) -> Result<Self> {
        Ok(match self {
            Self::Literal(Value::String(text)) if config.string_to_regex && !text.is_empty() => {
                Self::Pattern(create_regex(text)?)
            }
            Self::Object(entries) => Self::Object(
                entries
                    .iter()
                    .map(|(key, value)| Ok((key.clone(), value.compile(config)?)))
                    .collect::<Result<_>>()?,
            ),
            other => other.clone(),
        })
    }
}

impl From<Value> for QueryNode {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Object(map) => Self::object(map.into_iter().map(|(k, v)| (k, Self::from(v)))),
            other => Self::Literal(other),
        }
    }
}

impl From<Regex> for QueryNode {
    fn from(pattern: Regex) -> Self {
        Self::Pattern(pattern)
    }
}

impl From<&RuleTree> for QueryNode {
    fn from(tree: &RuleTree) -> Self {
        Self::object(tree.iter().map(|(key, value)| {
            let node = match value {
                RuleValue::Leaf(text) => Self::Literal(Value::String(text.clone())),
                RuleValue::Node(tree) => Self::from(tree),
                RuleValue::Absent => Self::Null,
            };
            (key.clone(), node)
        }))
    }
}
