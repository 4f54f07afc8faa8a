//! Reversible patching of JSON objects.
//!
//! A [`Setter`] writes a [`PropertySet`] into a target object and returns a
//! [`Patch`]; applying the patch brings the target back.

mod mode;
mod set;

pub use mode::SetterMode;
pub use set::{Patch, PropertySet, SetValue, Setter, create_setter};
