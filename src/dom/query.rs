//! DOM queries: scoped selector lookup over descendants and direct children.

use super::node::NodeId;
use super::tree::Dom;
use crate::css::matcher::matches_list;
use crate::css::model::SelectorList;
use crate::css::parser::{parse_selector_list, ParseError};

impl Dom {
    /// All descendants of `root` matching `selector`, in document order.
    ///
    /// `root` itself is never returned and ancestor steps of the selector must
    /// also lie inside `root`.
    pub fn find_all(&self, root: NodeId, selector: &SelectorList) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|&id| matches_list(selector, id, self, Some(root)))
            .collect()
    }

    /// The first descendant of `root` matching `selector`.
    pub fn find_first(&self, root: NodeId, selector: &SelectorList) -> Option<NodeId> {
        self.descendants(root)
            .into_iter()
            .find(|&id| matches_list(selector, id, self, Some(root)))
    }

    /// Direct children of `parent` matching `selector`, in order.
    pub fn children_matching(&self, parent: NodeId, selector: &SelectorList) -> Vec<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .filter(|&id| matches_list(selector, id, self, Some(parent)))
            .collect()
    }

    /// The first direct child of `parent` matching `selector`.
    pub fn first_child_matching(&self, parent: NodeId, selector: &SelectorList) -> Option<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|&id| matches_list(selector, id, self, Some(parent)))
    }

    /// Resolve a descendant chain of independently configured selectors.
    ///
    /// `find_nested(root, &[a, b, c])` behaves like the scoped query `a b c`:
    /// the first (document order) descendant of `root` matching `c` that has an
    /// ancestor matching `b`, which in turn has an ancestor matching `a`, all
    /// strictly inside `root`.
    pub fn find_nested(&self, root: NodeId, chain: &[&SelectorList]) -> Option<NodeId> {
        let (subject, steps) = chain.split_last()?;

        self.find_all(root, subject).into_iter().find(|&candidate| {
            let mut current = candidate;
            steps.iter().rev().all(|step| {
                let found = self
                    .ancestors(current)
                    .into_iter()
                    .take_while(|&a| a != root)
                    .find(|&a| matches_list(step, a, self, Some(root)));
                match found {
                    Some(ancestor) => {
                        current = ancestor;
                        true
                    }
                    None => false,
                }
            })
        })
    }

    /// Every element of the document matching `selector`, including the
    /// root, in document order.
    pub fn query(&self, selector: &SelectorList) -> Vec<NodeId> {
        let Some(root) = self.root() else {
            return Vec::new();
        };
        self.walk_depth_first(root)
            .into_iter()
            .filter(|&id| matches_list(selector, id, self, None))
            .collect()
    }

    /// Parse `selector` and [`query`](Self::query) the document with it.
    pub fn select(&self, selector: &str) -> Result<Vec<NodeId>, ParseError> {
        Ok(self.query(&parse_selector_list(selector)?))
    }
}
