//! Structural filters over JSON-like targets and rule handles.

use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde_json::Value;

use super::compile::compile_query;
use super::{FilterConfig, QueryNode, RuleHandle};
use crate::{Error, Result};

/// A custom predicate used as a filter unchanged.
pub type PredicateFn = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Anything a filter can be compiled from.
#[derive(Clone)]
pub enum MatcherSpec {
    /// Query text, optionally with a `{ ... }` style block.
    Text(String),
    /// A regex matched against the rule text.
    Pattern(Regex),
    /// A structural query; must be an object.
    Predicate(QueryNode),
    /// A custom predicate.
    Function(PredicateFn),
}

impl MatcherSpec {
    /// Wrap a closure as a function spec.
    pub fn function(predicate: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        Self::Function(Arc::new(predicate))
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Pattern(_) => "pattern",
            Self::Predicate(_) => "predicate",
            Self::Function(_) => "function",
        }
    }
}

impl fmt::Debug for MatcherSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Pattern(pattern) => f.debug_tuple("Pattern").field(pattern).finish(),
            Self::Predicate(node) => f.debug_tuple("Predicate").field(node).finish(),
            Self::Function(_) => f.write_str("Function(..)"),
        }
    }
}

impl From<&str> for MatcherSpec {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for MatcherSpec {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Regex> for MatcherSpec {
    fn from(pattern: Regex) -> Self {
        Self::Pattern(pattern)
    }
}

impl From<QueryNode> for MatcherSpec {
    fn from(node: QueryNode) -> Self {
        Self::Predicate(node)
    }
}

impl From<Value> for MatcherSpec {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text),
            other => Self::Predicate(QueryNode::from(other)),
        }
    }
}

impl From<PredicateFn> for MatcherSpec {
    fn from(predicate: PredicateFn) -> Self {
        Self::Function(predicate)
    }
}

#[derive(Clone)]
enum FilterKind {
    Structural {
        query: QueryNode,
        config: FilterConfig,
    },
    Function(PredicateFn),
}

/// A compiled, reusable predicate.
#[derive(Clone)]
pub struct Filter {
    kind: FilterKind,
}

impl Filter {
    /// Check a target.
    pub fn matches(&self, target: &Value) -> bool {
        match &self.kind {
            FilterKind::Structural { query, config } => matches_node(config, Some(target), query),
            FilterKind::Function(predicate) => predicate(target),
        }
    }

    /// Check a rule handle through its `{ text, style }` value.
    pub fn matches_rule<R: RuleHandle + ?Sized>(&self, rule: &R) -> bool {
        self.matches(&rule.to_value())
    }

    /// Lazily keep the matching targets.
    pub fn select<'a, I>(&'a self, targets: I) -> impl Iterator<Item = &'a Value> + 'a
    where
        I: IntoIterator<Item = &'a Value>,
        I::IntoIter: 'a,
    {
        targets.into_iter().filter(move |target| self.matches(target))
    }

    /// Lazily keep the matching rule handles.
    pub fn select_rules<'a, R, I>(&'a self, rules: I) -> impl Iterator<Item = &'a R> + 'a
    where
        R: RuleHandle + ?Sized + 'a,
        I: IntoIterator<Item = &'a R>,
        I::IntoIter: 'a,
    {
        rules.into_iter().filter(move |rule| self.matches_rule(*rule))
    }

    /// The custom predicate, for filters built from a function spec.
    pub fn predicate(&self) -> Option<&PredicateFn> {
        match &self.kind {
            FilterKind::Function(predicate) => Some(predicate),
            FilterKind::Structural { .. } => None,
        }
    }

    /// The compiled query, for structural filters.
    pub fn query(&self) -> Option<&QueryNode> {
        match &self.kind {
            FilterKind::Structural { query, .. } => Some(query),
            FilterKind::Function(_) => None,
        }
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            FilterKind::Structural { query, config } => f
                .debug_struct("Filter")
                .field("query", query)
                .field("config", config)
                .finish(),
            FilterKind::Function(_) => f.write_str("Filter(function)"),
        }
    }
}

/// Compiles filters under one configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterEngine {
    config: FilterConfig,
}

impl FilterEngine {
    /// Create an engine with the given configuration.
    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    /// The engine configuration.
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Compile a spec into a filter.
    ///
    /// Function specs are returned as they are. Text is parsed as a query
    /// (see [`Query::parse`](super::Query::parse)), a regex matches the rule
    /// text, and predicate objects are matched structurally.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidQuery`] for empty text or a predicate that is
    /// not an object, and propagates parse errors from the style block.
    pub fn compile(&self, spec: impl Into<MatcherSpec>) -> Result<Filter> {
        let spec = spec.into();
        tracing::debug!("Compiling {} filter", spec.kind());

        let query = match spec {
            MatcherSpec::Function(predicate) => {
                return Ok(Filter {
                    kind: FilterKind::Function(predicate),
                });
            }
            MatcherSpec::Predicate(node) if !node.is_object() => {
                return Err(Error::invalid_query("predicate must be an object"));
            }
            MatcherSpec::Predicate(node) => node,
            spec => match compile_query(&spec)? {
                Some(query) if !query.is_empty() => query.to_node(),
                _ => return Err(Error::invalid_query("query text must not be empty")),
            },
        };

        Ok(Filter {
            kind: FilterKind::Structural {
                query: query.compile(&self.config)?,
                config: self.config,
            },
        })
    }
}

/// Compile a filter with the default configuration.
pub fn filter(spec: impl Into<MatcherSpec>) -> Result<Filter> {
    FilterEngine::default().compile(spec)
}

fn matches_node(config: &FilterConfig, target: Option<&Value>, query: &QueryNode) -> bool {
    match query {
        QueryNode::Undefined => config.ignore_undefined || target.is_none(),
        QueryNode::Null => config.ignore_null || matches!(target, Some(Value::Null)),
        QueryNode::Pattern(pattern) => {
            matches!(target, Some(Value::String(text)) if pattern.is_match(text))
        }
        QueryNode::Literal(expected) => target == Some(expected),
        // An empty query object stands for itself.
        QueryNode::Object(entries) if entries.is_empty() => {
            matches!(target, Some(Value::Object(map)) if map.is_empty())
        }
        QueryNode::Object(entries) => {
            let object = target.and_then(Value::as_object);
            entries.iter().all(|(key, value)| match object.and_then(|o| o.get(key)) {
                Some(found) => matches_node(config, Some(found), value),
                None => {
                    tracing::trace!("Target has no '{}' key", key);
                    config.result_if_no_target
                }
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleTree;
    use serde_json::json;

    fn engine(config: FilterConfig) -> FilterEngine {
        FilterEngine::new(config)
    }

    #[test]
    fn function_is_returned_unchanged() {
        let predicate: PredicateFn = Arc::new(|_: &Value| true);
        let compiled = filter(predicate.clone()).unwrap();

        assert!(Arc::ptr_eq(compiled.predicate().unwrap(), &predicate));
        assert!(compiled.matches(&json!(null)));
    }

    #[test]
    fn invalid_specs() {
        assert!(filter("").unwrap_err().is_syntax());
        assert!(filter("   ").unwrap_err().is_syntax());
        assert!(filter(json!("")).unwrap_err().is_syntax());
        assert!(filter(json!(42)).unwrap_err().is_syntax());
    }

    #[test]
    fn json_strings_are_text_queries() {
        let flt = filter(json!(".foo")).unwrap();
        assert!(flt.matches(&json!({ "text": ".foo {}" })));
        assert!(!flt.matches(&json!({ "text": ".bar {}" })));
    }

    #[test]
    fn undefined_matches_missing_key() {
        let query = QueryNode::object([("x", QueryNode::Undefined)]);

        let flt = filter(query.clone()).unwrap();
        assert!(flt.matches(&json!({ "x": null })));

        let flt = engine(FilterConfig::default().ignore_undefined(false).result_if_no_target(true))
            .compile(query)
            .unwrap();
        assert!(flt.matches(&json!({ "y": 1 })));
        assert!(!flt.matches(&json!({ "x": null })));
    }

    #[test]
    fn ignore_null() {
        let query = json!({ "x": null });

        let flt = engine(FilterConfig::default().ignore_null(true)).compile(query.clone()).unwrap();
        assert!(flt.matches(&json!({ "x": 42 })));

        let flt = engine(FilterConfig::default().ignore_null(false)).compile(query).unwrap();
        assert!(!flt.matches(&json!({ "x": 42 })));
        assert!(flt.matches(&json!({ "x": null })));
    }

    #[test]
    fn ignore_undefined() {
        let query = QueryNode::object([("x", QueryNode::Undefined)]);

        let flt = engine(FilterConfig::default().ignore_undefined(true))
            .compile(query.clone())
            .unwrap();
        assert!(flt.matches(&json!({ "x": 42 })));

        let flt = engine(FilterConfig::default().ignore_undefined(false))
            .compile(query)
            .unwrap();
        assert!(!flt.matches(&json!({ "x": 42 })));
    }

    #[test]
    fn result_if_no_target() {
        let query = QueryNode::object([("x", QueryNode::Pattern(Regex::new("abc").unwrap()))]);
        let target = json!({ "y": 42 });

        let flt = engine(FilterConfig::default().result_if_no_target(false))
            .compile(query.clone())
            .unwrap();
        assert!(!flt.matches(&target));

        let flt = engine(FilterConfig::default().result_if_no_target(true))
            .compile(query)
            .unwrap();
        assert!(flt.matches(&target));
    }

    #[test]
    fn object_query_against_scalar() {
        let flt = filter(json!({ "x": 42, "y": {} })).unwrap();
        assert!(!flt.matches(&json!({ "x": 42, "y": "abc" })));
        assert!(flt.matches(&json!({ "x": 42, "y": {} })));
    }

    #[test]
    fn scalar_query_against_object() {
        let flt = filter(json!({ "x": 42 })).unwrap();
        assert!(!flt.matches(&json!({ "x": { "x": 42 } })));
        assert!(flt.matches(&json!({ "x": 42, "z": 1 })));
    }

    #[test]
    fn query_strings_are_matched_literally() {
        let flt = filter(json!({ "style": { "width": "^10" } })).unwrap();
        assert!(!flt.matches(&json!({ "style": { "width": "100px" } })));
        assert!(flt.matches(&json!({ "style": { "width": "^10px" } })));

        let flt = filter(json!({ "style": { "width": "10" } })).unwrap();
        assert!(flt.matches(&json!({ "style": { "width": "100px" } })));
        assert!(flt.matches(&json!({ "style": { "width": "210px" } })));
    }

    #[test]
    fn explicit_pattern_in_style() {
        let query = QueryNode::object([(
            "style",
            QueryNode::object([("width", QueryNode::Pattern(Regex::new("^10").unwrap()))]),
        )]);
        let flt = filter(query).unwrap();
        assert!(flt.matches(&json!({ "style": { "width": "100px" } })));
        assert!(!flt.matches(&json!({ "style": { "width": "210px" } })));
    }

    #[test]
    fn literal_strings_when_conversion_is_off() {
        let flt = engine(FilterConfig::default().string_to_regex(false))
            .compile(json!({ "color": "red" }))
            .unwrap();
        assert!(flt.matches(&json!({ "color": "red" })));
        assert!(!flt.matches(&json!({ "color": "darkred" })));
    }

    #[test]
    fn text_queries_match_rule_text() {
        let flt = filter(".foo   >  img").unwrap();
        assert!(flt.matches(&json!({ "text": ".foo > img { width: 1px; }" })));
        assert!(!flt.matches(&json!({ "text": ".bar > img { width: 1px; }" })));
    }

    #[test]
    fn text_query_with_style_block() {
        let flt = filter(".foo { width: 1rem; }").unwrap();
        assert!(flt.matches(&json!({
            "text": ".foo { width: 1rem; color: red; }",
            "style": { "width": "1rem", "color": "red" }
        })));
        assert!(!flt.matches(&json!({
            "text": ".foo { width: 2rem; }",
            "style": { "width": "2rem" }
        })));
    }

    #[test]
    fn regex_spec() {
        let flt = filter(Regex::new(r"^\.foo").unwrap()).unwrap();
        assert!(flt.matches(&json!({ "text": ".foo {}" })));
        assert!(!flt.matches(&json!({ "text": "div .foo {}" })));
    }

    struct Rule {
        text: String,
        style: RuleTree,
    }

    impl RuleHandle for Rule {
        fn text(&self) -> &str {
            &self.text
        }

        fn style(&self) -> Option<&RuleTree> {
            Some(&self.style)
        }
    }

    fn rule(text: &str) -> Rule {
        let tree = crate::parser::parse(text).unwrap().unwrap();
        let (selector, body) = tree.iter().next().unwrap();
        Rule {
            text: format!("{} {{ }}", selector),
            style: body.as_node().cloned().unwrap_or_default(),
        }
    }

    #[test]
    fn select_rule_handles() {
        let rules = [
            rule(".a { width: 100px; }"),
            rule(".b { width: 210px; }"),
            rule(".c { width: 10rem; }"),
        ];
        let flt = filter("{ width: 10 }").unwrap();
        let selected: Vec<&str> = flt.select_rules(&rules).map(|r| r.text()).collect();

        assert_eq!(selected, [".a { }", ".b { }", ".c { }"]);

        let query = QueryNode::object([(
            "style",
            QueryNode::object([("width", QueryNode::Pattern(Regex::new("^10").unwrap()))]),
        )]);
        let flt = filter(query).unwrap();
        let selected: Vec<&str> = flt.select_rules(&rules).map(|r| r.text()).collect();
        assert_eq!(selected, [".a { }", ".c { }"]);
    }

    #[test]
    fn select_values() {
        let targets = [json!({ "x": 42 }), json!({ "x": 1 }), json!(7)];
        let flt = filter(json!({ "x": 42 })).unwrap();
        assert_eq!(flt.select(&targets).count(), 1);
    }
}
