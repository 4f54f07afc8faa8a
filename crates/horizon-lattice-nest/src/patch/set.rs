//! Reversible property setters.

use indexmap::IndexMap;
use indexmap::map::Iter;
use serde_json::{Map, Value};

use super::SetterMode;
use crate::{Error, Result};

/// A value written by a setter or recorded in a patch.
#[derive(Debug, Clone, PartialEq)]
pub enum SetValue {
    /// Replace the target value.
    Value(Value),
    /// Descend into an object target, or replace a non-object target with
    /// the flattened set.
    Nested(PropertySet),
    /// Remove the key.
    Deleted,
}

impl SetValue {
    /// The plain JSON form, or `None` for [`SetValue::Deleted`].
    pub fn to_value(&self) -> Option<Value> {
        match self {
            Self::Value(value) => Some(value.clone()),
            Self::Nested(set) => Some(set.to_value()),
            Self::Deleted => None,
        }
    }
}

impl From<Value> for SetValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) if !map.is_empty() => Self::Nested(PropertySet::from_map(map)),
            other => Self::Value(other),
        }
    }
}

/// Insertion-ordered keys to set on a target.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertySet(IndexMap<String, SetValue>);

/// The inverse of an applied setter: prior values, or
/// [`SetValue::Deleted`] for keys the target did not have.
pub type Patch = PropertySet;

impl PropertySet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    fn from_map(map: Map<String, Value>) -> Self {
        map.into_iter()
            .map(|(key, value)| (key, SetValue::from(value)))
            .collect()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the set has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the entry stored under a key.
    pub fn get(&self, key: &str) -> Option<&SetValue> {
        self.0.get(key)
    }

    /// Insert an entry, keeping the position of an existing key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<SetValue>) -> Option<SetValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> Iter<'_, String, SetValue> {
        self.0.iter()
    }

    /// The plain JSON object, without deleted entries.
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .filter_map(|(key, value)| Some((key.clone(), value.to_value()?)))
                .collect(),
        )
    }
}

impl<K: Into<String>> FromIterator<(K, SetValue)> for PropertySet {
    fn from_iter<T: IntoIterator<Item = (K, SetValue)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(key, value)| (key.into(), value)).collect())
    }
}

impl<'a> IntoIterator for &'a PropertySet {
    type Item = (&'a String, &'a SetValue);
    type IntoIter = Iter<'a, String, SetValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl TryFrom<Value> for PropertySet {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) if !map.is_empty() => Ok(Self::from_map(map)),
            _ => Err(Error::type_error(
                "properties",
                "should be an object with properties",
            )),
        }
    }
}

/// Writes a property set into JSON objects and hands back patches.
///
/// # Example
///
/// ```ignore
/// let setter = create_setter(json!({ "x": 42 }), "both")?;
/// let mut target = json!({ "x": 0 });
/// let patch = setter.apply(&mut target)?;
/// setter.restore(&mut target, &patch)?;
/// ```
#[derive(Debug, Clone)]
pub struct Setter {
    properties: PropertySet,
    mode: SetterMode,
}

impl Setter {
    /// Create a setter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Type`] for an empty property set.
    pub fn new(properties: PropertySet, mode: SetterMode) -> Result<Self> {
        if properties.is_empty() {
            return Err(Error::type_error(
                "properties",
                "should be an object with properties",
            ));
        }
        Ok(Self { properties, mode })
    }

    /// Create a setter from a JSON object.
    pub fn from_value(properties: Value, mode: SetterMode) -> Result<Self> {
        Self::new(PropertySet::try_from(properties)?, mode)
    }

    /// The properties this setter writes.
    pub fn properties(&self) -> &PropertySet {
        &self.properties
    }

    /// Which keys this setter may touch.
    pub fn mode(&self) -> SetterMode {
        self.mode
    }

    /// Write the property set into `target` in place.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Type`] if `target` is not an object; the target is
    /// left untouched.
    pub fn apply(&self, target: &mut Value) -> Result<Patch> {
        let Value::Object(map) = target else {
            return Err(Error::type_error("target", "should be an object"));
        };
        Ok(apply_set(&self.properties, self.mode, map))
    }

    /// Apply a patch returned by [`Setter::apply`], bringing the target back
    /// to its prior state. Returns the patch of the restore itself.
    pub fn restore(&self, target: &mut Value, patch: &Patch) -> Result<Patch> {
        if patch.is_empty() {
            return Ok(Patch::new());
        }
        Self::new(patch.clone(), SetterMode::Both)?.apply(target)
    }
}

/// Create a setter with a mode given by name.
pub fn create_setter(properties: Value, mode: &str) -> Result<Setter> {
    Setter::from_value(properties, mode.parse()?)
}

fn apply_set(properties: &PropertySet, mode: SetterMode, target: &mut Map<String, Value>) -> Patch {
    let mut patch = Patch::new();

    for (key, value) in properties {
        let exists = target.contains_key(key);
        let applies = match value {
            SetValue::Deleted => exists,
            _ if exists => mode.changes(),
            _ => mode.adds(),
        };
        if !applies {
            tracing::trace!("Skipping '{}' in {} mode", key, mode);
            continue;
        }

        if let (SetValue::Nested(set), Some(Value::Object(inner))) = (value, target.get_mut(key)) {
            let nested = apply_set(set, mode, inner);
            if !nested.is_empty() {
                patch.insert(key.clone(), SetValue::Nested(nested));
            }
        } else if let Some(new) = value.to_value() {
            tracing::trace!("Setting '{}'", key);
            let prior = target.insert(key.clone(), new);
            patch.insert(key.clone(), prior.map_or(SetValue::Deleted, SetValue::Value));
        } else if let Some(prior) = target.shift_remove(key) {
            tracing::trace!("Removing '{}'", key);
            patch.insert(key.clone(), SetValue::Value(prior));
        }
    }

    patch
}
