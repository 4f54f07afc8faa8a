//! Rendering rule trees back into DSL text.

use super::{RuleTree, RuleValue};

/// Indentation used by [`RuleTree::stringify`] and `Display`.
pub const DEFAULT_INDENTATION: usize = 2;

/// Render a rule tree as DSL text.
///
/// Each top-level selector or at-rule becomes its own string, so an at-rule
/// carries its whole nested body in one segment. A tree made only of
/// properties is rendered as a single bare style block without braces.
///
/// Nested lines are indented by `indentation` spaces per level. With an
/// indentation of zero no newlines are emitted and a single space separates
/// the pieces instead.
///
/// # Example
///
/// ```ignore
/// let tree = parse(".foo { width: 10rem; }")?.unwrap();
/// assert_eq!(stringify(&tree, 2), [".foo {\n  width: 10rem;\n}\n"]);
/// ```
pub fn stringify(tree: &RuleTree, indentation: usize) -> Vec<String> {
    if tree.is_empty() {
        return vec![];
    }

    let writer = BlockWriter::new(indentation);
    let segments: Vec<String> = tree
        .iter()
        .map(|(key, value)| {
            let mut out = String::new();
            writer.write_entry(&mut out, key, value, 0);
            out
        })
        .collect();

    if tree.is_flat() {
        vec![segments.concat()]
    } else {
        segments
    }
}

struct BlockWriter {
    indentation: usize,
    separator: char,
}

impl BlockWriter {
    fn new(indentation: usize) -> Self {
        Self {
            indentation,
            separator: if indentation > 0 { '\n' } else { ' ' },
        }
    }

    fn write_entry(&self, out: &mut String, key: &str, value: &RuleValue, depth: usize) {
        self.write_indent(out, depth);
        out.push_str(key);
        match value {
            RuleValue::Leaf(value) => {
                out.push_str(": ");
                out.push_str(value);
                out.push(';');
            }
            RuleValue::Absent => out.push(';'),
            RuleValue::Node(tree) => {
                out.push_str(" {");
                out.push(self.separator);
                for (key, value) in tree {
                    self.write_entry(out, key, value, depth + 1);
                }
                self.write_indent(out, depth);
                out.push('}');
            }
        }
        out.push(self.separator);
    }

    fn write_indent(&self, out: &mut String, depth: usize) {
        out.extend(std::iter::repeat_n(' ', self.indentation * depth));
    }
}
