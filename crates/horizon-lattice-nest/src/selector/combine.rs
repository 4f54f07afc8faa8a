//! Flattening nested selector segments into one selector list.

use indexmap::IndexSet;

/// The placeholder substituted with the enclosing selector.
pub const PLACEHOLDER: char = '&';

/// Trim a selector and collapse its whitespace runs to single spaces.
pub fn normalize_selector(selector: &str) -> String {
    selector.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split a selector list on commas that are not nested in parentheses.
///
/// `"a, :is(b, c)"` splits into `["a", " :is(b, c)"]`. The pieces are not trimmed.
pub fn split_selector_list(segment: &str) -> Vec<&str> {
    let mut parts = vec![];
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in segment.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&segment[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&segment[start..]);
    parts
}

/// Combine an ordered sequence of nested selector segments into one flattened
/// selector list.
///
/// Every comma-separated alternative of a segment is combined with every
/// alternative built so far. An alternative containing `&` has each `&`
/// replaced by the enclosing selector; otherwise the two are joined with a
/// space (descendant combinator). Duplicates are dropped and the results are
/// joined with `", "`.
///
/// Returns `None` for an empty sequence.
///
/// # Example
///
/// ```ignore
/// assert_eq!(
///     combine_selectors(&["div, .foo", "img, > #bar"]).as_deref(),
///     Some("div img, div > #bar, .foo img, .foo > #bar"),
/// );
/// ```
pub fn combine_selectors<S: AsRef<str>>(segments: &[S]) -> Option<String> {
    let (first, rest) = segments.split_first()?;
    if rest.is_empty() {
        return Some(normalize_selector(first.as_ref()));
    }

    let mut prefixes: Vec<String> = split_selector_list(first.as_ref())
        .into_iter()
        .map(normalize_selector)
        .collect();

    for segment in rest {
        let alternatives = split_selector_list(segment.as_ref());
        prefixes = prefixes
            .iter()
            .flat_map(|prefix| {
                alternatives
                    .iter()
                    .map(move |alternative| combine_pair(prefix, alternative))
            })
            .collect();
    }

    let unique: IndexSet<String> = prefixes.into_iter().collect();
    Some(unique.into_iter().collect::<Vec<_>>().join(", "))
}

fn combine_pair(prefix: &str, alternative: &str) -> String {
    if alternative.contains(PLACEHOLDER) {
        normalize_selector(&alternative.replace(PLACEHOLDER, prefix))
    } else {
        normalize_selector(&format!("{} {}", prefix, alternative))
    }
}
