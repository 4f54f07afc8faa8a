//! Nested rule text for Horizon Lattice stylesheets.
//!
//! This crate turns a small nested DSL into flat, insertable rules, and
//! helps find and patch those rules afterwards:
//!
//! - **Parsing**: nested selectors, `&` placeholders, nested properties and
//!   at-rules are flattened into a [`RuleTree`]
//! - **Stringifying**: a tree renders back into one text block per rule
//! - **Filtering**: text, regex or structural queries compile into reusable
//!   [`Filter`]s over JSON values and [`RuleHandle`]s
//! - **Patching**: a [`Setter`] writes properties into an object and returns
//!   a [`Patch`] that restores it
//!
//! # Example
//!
//! ```ignore
//! use horizon_lattice_nest::prelude::*;
//!
//! let tree = parse(".card { &:hover { color: red; } .title { margin: { top: 0; } } }")?
//!     .unwrap_or_default();
//! for block in tree.stringify() {
//!     store.insert(&block);
//! }
//!
//! let hovered = filter(".card:hover { color: red }")?;
//! let matching: Vec<_> = hovered.select_rules(store.rules()).collect();
//! ```

pub mod parser;
pub mod patch;
pub mod query;
pub mod rules;
pub mod selector;

mod error;

pub use error::{Error, Result};
pub use parser::parse;
pub use patch::{Patch, PropertySet, SetValue, Setter, SetterMode, create_setter};
pub use query::{Filter, FilterConfig, FilterEngine, MatcherSpec, QueryNode, RuleHandle, filter};
pub use rules::{RuleTree, RuleValue, stringify};
pub use selector::combine_selectors;

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::parser::parse;
    pub use crate::patch::{Patch, PropertySet, SetValue, Setter, SetterMode, create_setter};
    pub use crate::query::{
        Filter, FilterConfig, FilterEngine, MatcherSpec, Query, QueryNode, RuleHandle,
        compile_query, create_regex, filter,
    };
    pub use crate::rules::{DEFAULT_INDENTATION, RuleTree, RuleValue, stringify};
    pub use crate::selector::combine_selectors;
    pub use crate::{Error, Result};
}
