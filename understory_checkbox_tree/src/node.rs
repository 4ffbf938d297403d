// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hierarchical input data.

use alloc::string::String;
use alloc::vec::Vec;

use smallvec::SmallVec;

/// A node of the caller-supplied forest.
///
/// `id` must be unique across the whole forest. A node whose `children` is
/// empty is a leaf.
///
/// The forest is treated as read-only input: [`flatten`](crate::flatten)
/// copies what it needs and never mutates it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeNode {
    /// Stable, forest-unique identifier.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Ordered children.
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Create a leaf node.
    pub fn leaf(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            children: Vec::new(),
        }
    }

    /// Create a node with the given children.
    pub fn branch(
        id: impl Into<String>,
        label: impl Into<String>,
        children: impl IntoIterator<Item = Self>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            children: children.into_iter().collect(),
        }
    }

    /// Returns `true` if this node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this subtree, including `self`.
    #[must_use]
    pub fn subtree_len(&self) -> usize {
        let mut len = 0;
        let mut stack: SmallVec<[&Self; 16]> = SmallVec::new();
        stack.push(self);
        while let Some(node) = stack.pop() {
            len += 1;
            stack.extend(node.children.iter());
        }
        len
    }
}

// Unlinks children before they drop so deep chains do not recurse.
impl Drop for TreeNode {
    fn drop(&mut self) {
        let mut stack = core::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::TreeNode;
    use alloc::vec;
    use alloc::vec::Vec;

    /// `Frontend{React{NextJS, Astro}, Vue, Angular}, Backend{NodeJS, Go}`.
    ///
    /// Pre-order indices:
    /// 0 frontend, 1 react, 2 nextjs, 3 astro, 4 vue, 5 angular,
    /// 6 backend, 7 nodejs, 8 go.
    pub(crate) fn skills() -> Vec<TreeNode> {
        vec![
            TreeNode::branch(
                "frontend",
                "Frontend",
                [
                    TreeNode::branch(
                        "react",
                        "React",
                        [
                            TreeNode::leaf("nextjs", "Next.js"),
                            TreeNode::leaf("astro", "Astro"),
                        ],
                    ),
                    TreeNode::leaf("vue", "Vue.js"),
                    TreeNode::leaf("angular", "Angular"),
                ],
            ),
            TreeNode::branch(
                "backend",
                "Backend",
                [TreeNode::leaf("nodejs", "Node.js"), TreeNode::leaf("go", "Go")],
            ),
        ]
    }

    /// `n0 -> n1 -> ... -> n{depth - 1}`, built bottom-up.
    pub(crate) fn deep_chain(depth: usize) -> TreeNode {
        let mut node = TreeNode::leaf(alloc::format!("n{}", depth - 1), "");
        for i in (0..depth - 1).rev() {
            node = TreeNode::branch(alloc::format!("n{i}"), "", [node]);
        }
        node
    }
}
