//! Selector flattening and validation.

mod combine;
mod pseudo;

pub use combine::{PLACEHOLDER, combine_selectors, normalize_selector, split_selector_list};
pub use pseudo::{PSEUDO_CLASSES, is_known_pseudo, is_valid_selector, unknown_pseudo};
