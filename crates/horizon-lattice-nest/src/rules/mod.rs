//! Rule trees and their text rendering.

mod stringify;
mod tree;

pub use stringify::{DEFAULT_INDENTATION, stringify};
pub use tree::{RuleTree, RuleValue};
