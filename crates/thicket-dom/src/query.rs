//! Read-only, depth-first, pre-order traversal.
//!
//! All traversals use an explicit stack with children pushed in reverse so the
//! first child is visited first. Nothing here mutates the tree.

use crate::{Node, NodeKind, Tag};

/// Pre-order iterator over a node and all of its descendants.
pub struct DepthFirst<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Pre-order iterator over the nodes of a subtree that satisfy a predicate.
///
/// With pruning enabled the subtree below a match is skipped, so no yielded
/// node is an ancestor of another.
pub struct Matches<'a, P> {
    stack: Vec<&'a Node>,
    predicate: P,
    prune: bool,
}

impl<'a, P> Iterator for Matches<'a, P>
where
    P: Fn(&Node) -> bool,
{
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            let matched = (self.predicate)(node);
            if !(matched && self.prune) {
                self.stack.extend(node.children.iter().rev());
            }
            if matched {
                return Some(node);
            }
        }
        None
    }
}

impl Node {
    /// Iterate over this node and every descendant in document order.
    #[must_use]
    pub fn depth_first(&self) -> DepthFirst<'_> {
        DepthFirst { stack: vec![self] }
    }

    /// Iterate over the nodes of this subtree (including `self`) for which
    /// `predicate` holds, in document order.
    pub fn matches<P>(&self, predicate: P, prune: bool) -> Matches<'_, P>
    where
        P: Fn(&Node) -> bool,
    {
        Matches {
            stack: vec![self],
            predicate,
            prune,
        }
    }

    /// First element in this subtree named `name`, or the invalid sentinel.
    #[must_use]
    pub fn find(&self, name: &str) -> &Self {
        self.matches(|node| node.is_named(name), true)
            .next()
            .unwrap_or(Self::invalid())
    }

    /// First element in this subtree matching `tag`, or the invalid sentinel.
    #[must_use]
    pub fn find_tag(&self, tag: &Tag) -> &Self {
        self.matches(|node| node.matches_tag(tag), true)
            .next()
            .unwrap_or(Self::invalid())
    }

    /// Every element in this subtree named `name`, in document order.
    ///
    /// The prune flag stops the search from descending into a match, which
    /// yields a flat list where no result is the descendant of another.
    #[must_use]
    pub fn find_all(&self, name: &str, prune: bool) -> Vec<&Self> {
        self.matches(|node| node.is_named(name), prune).collect()
    }

    /// Every element in this subtree matching `tag`, in document order.
    ///
    /// See [`Node::find_all`] for the meaning of `prune`.
    #[must_use]
    pub fn find_tag_all(&self, tag: &Tag, prune: bool) -> Vec<&Self> {
        self.matches(|node| node.matches_tag(tag), prune).collect()
    }

    /// Concatenated contents of every text node in this subtree, with no
    /// separator.
    #[must_use]
    pub fn text(&self) -> String {
        self.depth_first()
            .filter(|node| node.kind == NodeKind::Text)
            .map(|node| node.content.as_str())
            .collect()
    }
}
