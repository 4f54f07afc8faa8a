//! Known pseudo-classes and pseudo-elements.

use std::sync::LazyLock;

use regex::Regex;

/// Pseudo-classes and pseudo-elements accepted in selectors.
pub const PSEUDO_CLASSES: &[&str] = &[
    ":active",
    "::after",
    ":any-link",
    "::backdrop",
    "::before",
    ":blank",
    ":checked",
    "::cue",
    "::cue-region",
    ":current",
    ":default",
    ":defined",
    ":dir",
    ":disabled",
    ":empty",
    ":enabled",
    ":first",
    ":first-child",
    "::first-letter",
    "::first-line",
    ":first-of-type",
    ":focus",
    ":focus-visible",
    ":focus-within",
    ":fullscreen",
    ":future",
    "::grammar-error",
    ":has",
    ":host",
    ":host-context",
    ":hover",
    ":in-range",
    ":indeterminate",
    ":invalid",
    ":is",
    ":lang",
    ":last-child",
    ":last-of-type",
    ":left",
    ":link",
    ":local-link",
    "::marker",
    ":not",
    ":nth-child",
    ":nth-col",
    ":nth-last-child",
    ":nth-last-col",
    ":nth-last-of-type",
    ":nth-of-type",
    ":only-child",
    ":only-of-type",
    ":optional",
    ":out-of-range",
    "::part",
    ":past",
    ":paused",
    ":picture-in-picture",
    "::placeholder",
    ":placeholder-shown",
    ":playing",
    ":read-only",
    ":read-write",
    ":required",
    ":right",
    ":root",
    ":scope",
    "::selection",
    "::slotted",
    "::spelling-error",
    ":target",
    "::target-text",
    ":target-within",
    ":user-invalid",
    ":user-valid",
    ":valid",
    ":visited",
    ":where",
];

static PSEUDO_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":[A-Za-z0-9_:-]*").expect("pseudo-class pattern is valid"));

static AT_RULE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*@").expect("at-rule pattern is valid"));

/// Check whether a pseudo-class or pseudo-element (with its colons) is known.
pub fn is_known_pseudo(name: &str) -> bool {
    PSEUDO_CLASSES.contains(&name)
}

/// Find the first colon-prefixed run of a selector that is not a known
/// pseudo-class.
///
/// Text starting with `@` is never a selector and always passes.
pub fn unknown_pseudo(selector: &str) -> Option<&str> {
    if !selector.contains(':') || AT_RULE_LINE.is_match(selector) {
        return None;
    }
    PSEUDO_RUN
        .find_iter(selector)
        .map(|m| m.as_str())
        .find(|name| !is_known_pseudo(name))
}

/// Check whether a block header can be used as a selector.
pub fn is_valid_selector(selector: &str) -> bool {
    unknown_pseudo(selector).is_none()
}
