//! Boundary for rules held by an external stylesheet store.

use serde_json::{Map, Value};

use crate::rules::RuleTree;

/// Target field holding the rule text.
pub const TEXT_FIELD: &str = "text";

/// Target field holding the rule style mapping.
pub const STYLE_FIELD: &str = "style";

/// A compiled rule as exposed by a stylesheet store.
///
/// Filters see a rule handle as `{ "text": ..., "style": { ... } }`.
pub trait RuleHandle {
    /// The textual identity of the rule, e.g. `.foo { width: 1rem; }`.
    fn text(&self) -> &str;

    /// The rule's property mapping, if it has one.
    fn style(&self) -> Option<&RuleTree> {
        None
    }

    /// The filter target for this rule.
    fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert(TEXT_FIELD.to_string(), Value::String(self.text().to_string()));
        if let Some(style) = self.style() {
            map.insert(STYLE_FIELD.to_string(), style.to_value());
        }
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct TextOnly(&'static str);

    impl RuleHandle for TextOnly {
        fn text(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn text_only_handle() {
        assert_eq!(TextOnly("p { }").to_value(), json!({ "text": "p { }" }));
    }
}
