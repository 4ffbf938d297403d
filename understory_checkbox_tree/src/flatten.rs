// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flattening a forest into densely indexed items.

use alloc::string::String;
use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::node::TreeNode;

/// One node of a flattened forest.
///
/// Items are produced by [`flatten`] in depth-first pre-order. `index` is the
/// item's position in that order, so a flattened slice always satisfies
/// `items[i].index == i`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlatItem {
    /// Identifier copied from the source [`TreeNode`].
    pub id: String,
    /// Label copied from the source [`TreeNode`].
    pub label: String,
    /// Depth from the root; roots are at level `0`.
    pub level: usize,
    /// `true` iff the source node has no children.
    pub is_leaf: bool,
    /// Dense pre-order position, unique within one flattening.
    pub index: usize,
    /// Index of the parent item; `None` for roots.
    pub parent_index: Option<usize>,
}

impl FlatItem {
    /// Returns `true` for top-level items.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent_index.is_none()
    }
}

/// Flatten a forest into pre-order items.
///
/// Children are visited in the order they appear in [`TreeNode::children`],
/// so flattening the same forest always yields the same indices. An empty
/// forest yields an empty vector.
///
/// The input must be acyclic with unique ids; this is not checked here (see
/// [`build_relationships`](crate::build_relationships)).
pub fn flatten(roots: &[TreeNode]) -> Vec<FlatItem> {
    let len = roots.iter().map(TreeNode::subtree_len).sum();
    let mut out = Vec::with_capacity(len);
    // (node, level, parent index); siblings are pushed in reverse so the
    // first child pops first.
    let mut stack: SmallVec<[(&TreeNode, usize, Option<usize>); 16]> = SmallVec::new();
    stack.extend(roots.iter().rev().map(|root| (root, 0, None)));
    while let Some((node, level, parent)) = stack.pop() {
        let index = out.len();
        out.push(FlatItem {
            id: node.id.clone(),
            label: node.label.clone(),
            level,
            is_leaf: node.is_leaf(),
            index,
            parent_index: parent,
        });
        stack.extend(
            node.children
                .iter()
                .rev()
                .map(|child| (child, level + 1, Some(index))),
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::fixtures;

    #[test]
    fn empty_forest_flattens_to_nothing() {
        assert!(flatten(&[]).is_empty());
    }

    #[test]
    fn pre_order_indices_and_levels() {
        let items = flatten(&fixtures::skills());
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(
            ids,
            [
                "frontend", "react", "nextjs", "astro", "vue", "angular", "backend", "nodejs",
                "go"
            ]
        );
        for (pos, item) in items.iter().enumerate() {
            assert_eq!(item.index, pos, "index must match pre-order position");
        }
        let levels: Vec<usize> = items.iter().map(|i| i.level).collect();
        assert_eq!(levels, [0, 1, 2, 2, 1, 1, 0, 1, 1]);
    }

    #[test]
    fn parent_links_point_one_level_up() {
        let items = flatten(&fixtures::skills());
        for item in &items {
            match item.parent_index {
                Some(p) => assert_eq!(items[p].level + 1, item.level, "parent must be one level up"),
                None => assert_eq!(item.level, 0, "only roots lack a parent"),
            }
        }
        assert_eq!(items[2].parent_index, Some(1));
        assert_eq!(items[7].parent_index, Some(6));
    }

    #[test]
    fn empty_children_is_a_leaf() {
        let items = flatten(&[TreeNode::branch("empty", "Empty", Vec::new())]);
        assert_eq!(items.len(), 1);
        assert!(items[0].is_leaf);
        assert!(items[0].is_root());
    }

    #[test]
    fn deep_chain_flattens_in_order() {
        let depth = 100_000;
        let items = flatten(&[fixtures::deep_chain(depth)]);
        assert_eq!(items.len(), depth);
        let last = &items[depth - 1];
        assert!(last.is_leaf);
        assert_eq!(last.level, depth - 1);
        assert_eq!(last.parent_index, Some(depth - 2));
        assert_eq!(last.id, alloc::format!("n{}", depth - 1));
    }
}
