//! The nested rule tree produced by the parser.

use std::fmt;

use indexmap::IndexMap;
use indexmap::map::{Iter, Keys};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A value stored under a [`RuleTree`] key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleValue {
    /// A property value (`width: 10rem`).
    Leaf(String),
    /// A nested block: the properties of a selector, or the body of an at-rule.
    Node(RuleTree),
    /// A statement-terminated at-rule such as `@import url(a.css);`.
    Absent,
}

impl RuleValue {
    /// Returns true if this value is a nested block.
    pub fn is_node(&self) -> bool {
        matches!(self, Self::Node(_))
    }

    /// Get the property value, if this is a leaf.
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Self::Leaf(value) => Some(value),
            _ => None,
        }
    }

    /// Get the nested tree, if this is a node.
    pub fn as_node(&self) -> Option<&RuleTree> {
        match self {
            Self::Node(tree) => Some(tree),
            _ => None,
        }
    }

    /// Convert to a JSON value: leaves become strings, nodes objects, absent entries `null`.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Leaf(value) => Value::String(value.clone()),
            Self::Node(tree) => tree.to_value(),
            Self::Absent => Value::Null,
        }
    }
}

impl From<&str> for RuleValue {
    fn from(value: &str) -> Self {
        Self::Leaf(value.to_string())
    }
}

impl From<String> for RuleValue {
    fn from(value: String) -> Self {
        Self::Leaf(value)
    }
}

impl From<RuleTree> for RuleValue {
    fn from(tree: RuleTree) -> Self {
        Self::Node(tree)
    }
}

/// Insertion-ordered mapping from flattened selectors, at-rules and property
/// names to their values.
///
/// Keys are unique per tree. Writing an existing key replaces its value but
/// keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleTree {
    entries: IndexMap<String, RuleValue>,
}

impl RuleTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of direct entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the tree has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the value stored under a key.
    pub fn get(&self, key: &str) -> Option<&RuleValue> {
        self.entries.get(key)
    }

    /// Get a property value stored directly under a key.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(RuleValue::as_leaf)
    }

    /// Get a nested block stored directly under a key.
    pub fn node(&self, key: &str) -> Option<&RuleTree> {
        self.get(key).and_then(RuleValue::as_node)
    }

    /// Check if a key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert a value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<RuleValue>) -> Option<RuleValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Remove a key, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<RuleValue> {
        self.entries.shift_remove(key)
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> Iter<'_, String, RuleValue> {
        self.entries.iter()
    }

    /// Iterate over keys in insertion order.
    pub fn keys(&self) -> Keys<'_, String, RuleValue> {
        self.entries.keys()
    }

    /// Returns true if no direct entry is a nested block.
    pub fn is_flat(&self) -> bool {
        !self.entries.values().any(RuleValue::is_node)
    }

    /// Get the node stored under `key`, creating it (or replacing a non-node
    /// value) when needed.
    pub(crate) fn node_entry(&mut self, key: &str) -> &mut RuleTree {
        let slot = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| RuleValue::Node(RuleTree::new()));
        if !slot.is_node() {
            *slot = RuleValue::Node(RuleTree::new());
        }
        match slot {
            RuleValue::Node(tree) => tree,
            _ => unreachable!("slot holds a node"),
        }
    }

    /// Drop direct entries that are empty blocks. Deeper levels are left alone.
    pub(crate) fn prune_empty_nodes(&mut self) {
        self.entries.retain(|key, value| {
            let empty = matches!(value, RuleValue::Node(tree) if tree.is_empty());
            if empty {
                tracing::debug!("Dropping empty rule '{}'", key);
            }
            !empty
        });
    }

    /// Convert to a JSON object.
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.entries
                .iter()
                .map(|(key, value)| (key.clone(), value.to_value()))
                .collect(),
        )
    }

    /// Render with the default indentation, one string per top-level entry.
    pub fn stringify(&self) -> Vec<String> {
        super::stringify(self, super::DEFAULT_INDENTATION)
    }
}

impl<K: Into<String>, V: Into<RuleValue>> FromIterator<(K, V)> for RuleTree {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RuleTree {
    type Item = (&'a String, &'a RuleValue);
    type IntoIter = Iter<'a, String, RuleValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl fmt::Display for RuleTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in self.stringify() {
            f.write_str(&segment)?;
        }
        Ok(())
    }
}
