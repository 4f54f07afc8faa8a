//! Filter engine configuration.

use serde::{Deserialize, Serialize};

/// Switches controlling how queries are compiled and matched.
///
/// # Example
///
/// ```ignore
/// let config = FilterConfig::default()
///     .string_to_regex(false)
///     .result_if_no_target(true);
/// let engine = FilterEngine::new(config);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterConfig {
    /// Convert non-empty query strings into whitespace-tolerant regexes.
    pub string_to_regex: bool,
    /// Result for a query key the target does not have (`true` skips the key).
    pub result_if_no_target: bool,
    /// Whether a `null` query value matches anything.
    pub ignore_null: bool,
    /// Whether an undefined query value matches anything.
    pub ignore_undefined: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            string_to_regex: true,
            result_if_no_target: false,
            ignore_null: true,
            ignore_undefined: true,
        }
    }
}

impl FilterConfig {
    /// Set whether query strings become regexes.
    pub fn string_to_regex(mut self, enabled: bool) -> Self {
        self.string_to_regex = enabled;
        self
    }

    /// Set the result for query keys missing from the target.
    pub fn result_if_no_target(mut self, result: bool) -> Self {
        self.result_if_no_target = result;
        self
    }

    /// Set whether `null` query values match anything.
    pub fn ignore_null(mut self, ignore: bool) -> Self {
        self.ignore_null = ignore;
        self
    }

    /// Set whether undefined query values match anything.
    pub fn ignore_undefined(mut self, ignore: bool) -> Self {
        self.ignore_undefined = ignore;
        self
    }
}
