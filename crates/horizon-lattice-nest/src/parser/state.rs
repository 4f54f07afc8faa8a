//! Scanning state of the rule parser.

use super::lexer::{Delimiter, Token};
use super::property::{is_at_rule, is_property_segment, parse_property};
use crate::rules::{RuleTree, RuleValue};
use crate::selector::{combine_selectors, unknown_pseudo};
use crate::{Error, Result};

/// The kind of block opened by a `{`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Selector,
    AtRule,
    PropertySegment,
}

/// Location of a writable node in the root tree.
///
/// At-rule bodies always live directly in the root and selector blocks
/// directly in a grouping scope, so two levels are enough.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ScopePath {
    Root,
    Group(String),
    Rule {
        group: Option<String>,
        selector: String,
    },
}

/// All stacks driving a single parse.
#[derive(Debug)]
pub(crate) struct ParserState {
    /// Kind of every open block; its length is the nesting depth.
    blocks: Vec<BlockKind>,
    /// Open selector and at-rule blocks; decides where properties land.
    active: Vec<BlockKind>,
    selector_segments: Vec<String>,
    current_selector: Option<String>,
    property_keys: Vec<String>,
    /// Nodes that properties are written to while a selector is active.
    selector_scopes: Vec<ScopePath>,
    /// At-rule bodies selectors are written into; `None` is the root.
    grouping_scopes: Vec<Option<String>>,
    tree: RuleTree,
}

impl ParserState {
    pub fn new() -> Self {
        Self {
            blocks: vec![],
            active: vec![],
            selector_segments: vec![],
            current_selector: None,
            property_keys: vec![],
            selector_scopes: vec![ScopePath::Root],
            grouping_scopes: vec![None],
            tree: RuleTree::new(),
        }
    }

    /// Process one token.
    pub fn feed(&mut self, token: Token<'_>) -> Result<()> {
        tracing::trace!(
            "token {:?} '{}' at depth {}",
            token.delimiter,
            token.text,
            self.blocks.len()
        );
        match token.delimiter {
            Delimiter::Open => self.open_block(token.text),
            Delimiter::Semicolon | Delimiter::End => {
                self.statement(token.text);
                Ok(())
            }
            Delimiter::Close => self.close_block(token.offset),
        }
    }

    /// Finish the parse, returning `None` when no rules remain.
    pub fn finish(mut self, offset: usize) -> Result<Option<RuleTree>> {
        if !self.blocks.is_empty() {
            return Err(Error::syntax("Unmatched '{'", offset));
        }
        self.tree.prune_empty_nodes();
        Ok((!self.tree.is_empty()).then_some(self.tree))
    }

    fn open_block(&mut self, token: &str) -> Result<()> {
        let kind = if is_at_rule(token) {
            self.tree.insert(token, RuleTree::new());
            self.grouping_scopes.push(Some(token.to_string()));
            BlockKind::AtRule
        } else if let Some(pseudo) = unknown_pseudo(token) {
            if !is_property_segment(token) {
                return Err(Error::illegal_selector(
                    token,
                    format!("unknown pseudo-class '{}'", pseudo),
                ));
            }
            self.open_property_segment(token)?;
            BlockKind::PropertySegment
        } else {
            self.open_selector(token)?;
            BlockKind::Selector
        };

        self.blocks.push(kind);
        if kind != BlockKind::PropertySegment {
            self.active.push(kind);
        }
        Ok(())
    }

    fn open_selector(&mut self, token: &str) -> Result<()> {
        self.selector_segments.push(token.to_string());
        let selector = combine_selectors(&self.selector_segments)
            .ok_or_else(|| Error::illegal_selector(token, "empty selector"))?;

        let group = self.grouping_scopes.last().cloned().flatten();
        let path = self.grouping_path();
        self.resolve(&path).node_entry(&selector);
        self.selector_scopes.push(ScopePath::Rule {
            group,
            selector: selector.clone(),
        });
        self.current_selector = Some(selector);
        Ok(())
    }

    fn open_property_segment(&mut self, token: &str) -> Result<()> {
        let property = parse_property(token)
            .ok_or_else(|| Error::illegal_selector(token, "expected a property segment"))?;
        self.property_keys.push(property.key.to_string());

        if !property.value.is_empty() {
            let key = self.property_keys.join("-");
            self.write_property(key, property.value);
        }
        Ok(())
    }

    fn statement(&mut self, token: &str) {
        if is_at_rule(token) {
            self.tree.insert(token, RuleValue::Absent);
            return;
        }

        if let Some(property) = parse_property(token) {
            if !property.key.is_empty() && !property.value.is_empty() {
                let key = self.full_key(property.key);
                self.write_property(key, property.value);
            }
        }
    }

    fn close_block(&mut self, offset: usize) -> Result<()> {
        let kind = self
            .blocks
            .pop()
            .ok_or_else(|| Error::syntax("Unmatched '}'", offset))?;

        match kind {
            BlockKind::PropertySegment => {
                self.property_keys.pop();
            }
            BlockKind::Selector => {
                self.selector_segments.pop();
                self.current_selector = combine_selectors(&self.selector_segments);
                self.selector_scopes.pop();
                tracing::trace!("back in selector {:?}", self.current_selector);
            }
            BlockKind::AtRule => {
                self.grouping_scopes.pop();
            }
        }

        if self.active.last() == Some(&kind) {
            self.active.pop();
        }
        Ok(())
    }

    fn full_key(&self, key: &str) -> String {
        if self.property_keys.is_empty() {
            return key.to_string();
        }
        format!("{}-{}", self.property_keys.join("-"), key)
    }

    fn write_property(&mut self, key: String, value: &str) {
        let path = if self.active.last() == Some(&BlockKind::AtRule) {
            self.grouping_path()
        } else {
            self.selector_scopes.last().cloned().unwrap_or(ScopePath::Root)
        };
        self.resolve(&path).insert(key, value);
    }

    fn grouping_path(&self) -> ScopePath {
        match self.grouping_scopes.last().cloned().flatten() {
            Some(group) => ScopePath::Group(group),
            None => ScopePath::Root,
        }
    }

    fn resolve(&mut self, path: &ScopePath) -> &mut RuleTree {
        match path {
            ScopePath::Root => &mut self.tree,
            ScopePath::Group(group) => self.tree.node_entry(group),
            ScopePath::Rule { group, selector } => {
                let scope = match group {
                    Some(group) => self.tree.node_entry(group),
                    None => &mut self.tree,
                };
                scope.node_entry(selector)
            }
        }
    }
}
