//! Property token helpers.

use std::sync::LazyLock;

use regex::Regex;

static PROPERTY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?<key>[A-Za-z0-9_-]+)\s*:\s*(?<value>[^:]*)").expect("property pattern is valid")
});

// `margin: auto {` needs whitespace (or nothing) after the colon.
static PROPERTY_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9_]:(\s|$)").expect("segment pattern is valid"));

/// A `key: value` pair found in a token. The value may be empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Property<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

/// Extract the first `key: value` pair of a token.
pub(crate) fn parse_property(token: &str) -> Option<Property<'_>> {
    let captures = PROPERTY.captures(token)?;
    Some(Property {
        key: captures.name("key")?.as_str(),
        value: captures.name("value").map_or("", |m| m.as_str()),
    })
}

/// Check whether a block header opens a nested property scope.
pub(crate) fn is_property_segment(token: &str) -> bool {
    PROPERTY_SEGMENT.is_match(token)
}

/// Check whether a token is an at-rule.
pub(crate) fn is_at_rule(token: &str) -> bool {
    token.starts_with('@')
}
