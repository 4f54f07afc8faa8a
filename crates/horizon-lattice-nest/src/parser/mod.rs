//! Parser for nested rule text.
//!
//! The parser is a single pass over the delimiters `{`, `}` and `;`. The text
//! immediately preceding a delimiter decides what happens:
//!
//! - `@name ... {` opens an at-rule body, stored directly in the root tree
//!   whatever the current nesting (at-rule elevation);
//! - `selector {` opens a selector block; nested selectors are flattened into
//!   one key of the current grouping scope (see [`combine_selectors`]);
//! - `key: value? {` opens a nested property scope whose keys are joined
//!   with `-`;
//! - `key: value;` writes a property, `@name ...;` an at-rule statement.
//!
//! [`combine_selectors`]: crate::selector::combine_selectors

mod lexer;
mod property;
mod state;

use crate::Result;
use crate::rules::RuleTree;
use lexer::{Tokenizer, normalize};
use state::ParserState;

/// Parse nested rule text into a [`RuleTree`].
///
/// Comments (`/* ... */` and `// ...` lines) are removed and whitespace is
/// collapsed before scanning. Properties must be terminated by `;` unless
/// they are the last token of a block or of the input. Duplicate keys keep
/// the last value. Top-level rules without properties are dropped.
///
/// Returns `Ok(None)` for empty input or when nothing remains after dropping
/// empty rules.
///
/// # Errors
///
/// Returns a syntax error for unbalanced braces and an illegal-selector
/// error for block headers that are neither at-rules, valid selectors nor
/// property segments (for example an unknown pseudo-class, or `margin:auto {`
/// without a space after the colon).
///
/// # Example
///
/// ```ignore
/// let tree = parse("div { &__active { color: red; } }")?.unwrap();
/// assert_eq!(tree.node("div__active").unwrap().property("color"), Some("red"));
/// ```
pub fn parse(text: &str) -> Result<Option<RuleTree>> {
    if text.is_empty() {
        return Ok(None);
    }

    let normalized = normalize(text);
    let mut state = ParserState::new();
    let mut tokens = 0usize;
    for token in Tokenizer::new(&normalized) {
        state.feed(token)?;
        tokens += 1;
    }

    let tree = state.finish(normalized.len())?;
    tracing::debug!(
        "Parsed {} tokens into {} top-level entries",
        tokens,
        tree.as_ref().map_or(0, RuleTree::len)
    );
    Ok(tree)
}
