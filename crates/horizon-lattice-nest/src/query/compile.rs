//! Compiling query text into [`Query`] values.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::handle::{STYLE_FIELD, TEXT_FIELD};
use super::{MatcherSpec, QueryNode};
use crate::Result;
use crate::parser::parse;
use crate::rules::RuleTree;

static QUERY_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?<text>[^{}]*)\{(?<style>[^{}]+)\}[^{}]*$").expect("query pattern is valid")
});

/// Build a whitespace-tolerant regex from plain text.
///
/// The text is trimmed, regex metacharacters are escaped and every run of
/// whitespace matches one or more whitespace characters.
pub fn create_regex(text: &str) -> Result<Regex> {
    let source = text
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");
    Ok(Regex::new(&source)?)
}

/// Matcher for the textual identity of a rule.
#[derive(Debug, Clone)]
pub enum TextMatcher {
    /// Plain text; becomes a regex when the filter converts strings.
    Text(String),
    /// An explicit regex.
    Pattern(Regex),
}

/// A compiled rule query: an optional text matcher plus an optional style
/// fragment matched against the rule's style mapping.
#[derive(Debug, Clone, Default)]
pub struct Query {
    /// Matched against the rule text.
    pub text: Option<TextMatcher>,
    /// Matched structurally against the rule style.
    pub style: Option<RuleTree>,
}

impl Query {
    /// Parse query text such as `".foo { width: 2rem; }"`.
    ///
    /// A single `{ ... }` block is parsed as style properties; the text before
    /// it is the text matcher and anything after it is ignored. Without a
    /// block the whole text is the text matcher. Returns `None` for empty text.
    pub fn parse(text: &str) -> Result<Option<Self>> {
        if text.is_empty() {
            return Ok(None);
        }

        let (matcher, style) = match QUERY_BLOCK.captures(text) {
            Some(captures) => (
                captures.name("text").map_or("", |m| m.as_str()),
                match captures.name("style") {
                    Some(block) => parse(block.as_str())?,
                    None => None,
                },
            ),
            None => (text, None),
        };

        let matcher = matcher.trim();
        Ok(Some(Self {
            text: (!matcher.is_empty()).then(|| TextMatcher::Text(matcher.to_string())),
            style,
        }))
    }

    /// A query matching rule text against a regex.
    pub fn from_pattern(pattern: Regex) -> Self {
        Self {
            text: Some(TextMatcher::Pattern(pattern)),
            style: None,
        }
    }

    /// Returns true if the query has neither a text matcher nor a style.
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.style.is_none()
    }

    /// The structural form of this query, keyed like a rule handle.
    pub fn to_node(&self) -> QueryNode {
        let mut entries = vec![];
        if let Some(text) = &self.text {
            let node = match text {
                TextMatcher::Text(text) => QueryNode::Literal(Value::String(text.clone())),
                TextMatcher::Pattern(pattern) => QueryNode::Pattern(pattern.clone()),
            };
            entries.push((TEXT_FIELD, node));
        }
        if let Some(style) = &self.style {
            entries.push((STYLE_FIELD, QueryNode::from(style)));
        }
        QueryNode::object(entries)
    }
}

/// Compile a text or regex spec into a [`Query`].
///
/// Predicate and function specs are used by filters as they are, so they
/// yield `None`, as does empty text.
pub fn compile_query(spec: &MatcherSpec) -> Result<Option<Query>> {
    match spec {
        MatcherSpec::Text(text) => Query::parse(text),
        MatcherSpec::Pattern(pattern) => Ok(Some(Query::from_pattern(pattern.clone()))),
        MatcherSpec::Predicate(_) | MatcherSpec::Function(_) => Ok(None),
    }
}
