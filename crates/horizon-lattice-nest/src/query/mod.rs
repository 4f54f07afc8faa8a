//! Rule filters.
//!
//! A filter is compiled from a [`MatcherSpec`]: query text such as
//! `".foo { width: 2rem; }"`, a regex, a structural object or a custom
//! predicate. Structural matching walks the query and the target side by
//! side under the switches of a [`FilterConfig`].

mod compile;
mod config;
mod filter;
mod handle;
mod node;

pub use compile::{Query, TextMatcher, compile_query, create_regex};
pub use config::FilterConfig;
pub use filter::{Filter, FilterEngine, MatcherSpec, PredicateFn, filter};
pub use handle::{RuleHandle, STYLE_FIELD, TEXT_FIELD};
pub use node::QueryNode;
