// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parent/children lookup tables over a flattened forest.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::flatten::{FlatItem, flatten};
use crate::node::TreeNode;

type ChildList = SmallVec<[usize; 4]>;

/// Read-only relationship tables for one tree shape.
///
/// Built once from a flattened forest with [`build_relationships`] and never
/// mutated afterwards. Any structural change to the source data requires a
/// fresh flattening and a fresh index; checked/expanded changes do not.
///
/// `children` and `parent` are mutual inverses: `j` is listed in
/// [`children_of(i)`](Self::children_of) iff [`parent_of(j)`](Self::parent_of)
/// is `Some(i)`.
#[derive(Clone)]
pub struct RelationshipIndex {
    items: Vec<FlatItem>,
    children: Vec<ChildList>,
    parent: Vec<Option<usize>>,
    roots: ChildList,
    by_id: HashMap<String, usize>,
}

impl core::fmt::Debug for RelationshipIndex {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let leaves = self.items.iter().filter(|i| i.is_leaf).count();
        f.debug_struct("RelationshipIndex")
            .field("nodes", &self.items.len())
            .field("roots", &self.roots.len())
            .field("leaves", &leaves)
            .finish_non_exhaustive()
    }
}

/// Build the relationship tables in a single pass over `items`.
///
/// Child lists preserve the order in which items are encountered, which for
/// the output of [`flatten`] is the original sibling order.
///
/// `items` must be densely indexed (`items[i].index == i`) with unique ids and
/// in-range parent indices, as produced by [`flatten`]. Debug builds assert
/// this; release builds leave violations unspecified.
pub fn build_relationships(items: Vec<FlatItem>) -> RelationshipIndex {
    let len = items.len();
    let mut children: Vec<ChildList> = Vec::with_capacity(len);
    children.resize_with(len, ChildList::new);
    let mut parent = Vec::with_capacity(len);
    let mut roots = ChildList::new();
    let mut by_id = HashMap::with_capacity(len);

    for (pos, item) in items.iter().enumerate() {
        debug_assert_eq!(item.index, pos, "items must be densely indexed");
        let previous = by_id.insert(item.id.clone(), pos);
        debug_assert!(previous.is_none(), "duplicate node id {:?}", item.id);

        parent.push(item.parent_index);
        match item.parent_index {
            Some(p) => {
                debug_assert!(p < len, "parent index {p} out of range");
                children[p].push(pos);
            }
            None => roots.push(pos),
        }
    }

    RelationshipIndex {
        items,
        children,
        parent,
        roots,
        by_id,
    }
}

impl RelationshipIndex {
    /// Flatten `roots` and build the index in one step.
    pub fn from_forest(roots: &[TreeNode]) -> Self {
        build_relationships(flatten(roots))
    }

    /// Total number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the forest was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All items in pre-order.
    pub fn items(&self) -> &[FlatItem] {
        &self.items
    }

    /// The item at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<&FlatItem> {
        self.items.get(index)
    }

    /// Resolve a node id to its dense index.
    pub fn index_of_id(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    /// Direct children of `index` in sibling order.
    ///
    /// Returns `None` for leaves and out-of-range indices.
    pub fn children_of(&self, index: usize) -> Option<&[usize]> {
        self.children
            .get(index)
            .filter(|c| !c.is_empty())
            .map(|c| c.as_slice())
    }

    /// Parent of `index`; `None` for roots and out-of-range indices.
    pub fn parent_of(&self, index: usize) -> Option<usize> {
        self.parent.get(index).copied().flatten()
    }

    /// Top-level nodes in input order.
    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    /// All descendants of `index` in pre-order, excluding `index` itself.
    pub fn descendants(&self, index: usize) -> Descendants<'_> {
        let mut stack = SmallVec::new();
        if let Some(children) = self.children.get(index) {
            stack.extend(children.iter().rev().copied());
        }
        Descendants { index: self, stack }
    }

    /// Ancestors of `index`, nearest first, ending at a root.
    pub fn ancestors(&self, index: usize) -> Ancestors<'_> {
        Ancestors {
            index: self,
            next: self.parent_of(index),
        }
    }
}

/// Pre-order iterator over a subtree; see [`RelationshipIndex::descendants`].
#[derive(Clone, Debug)]
pub struct Descendants<'a> {
    index: &'a RelationshipIndex,
    stack: SmallVec<[usize; 16]>,
}

impl Iterator for Descendants<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let next = self.stack.pop()?;
        self.stack
            .extend(self.index.children[next].iter().rev().copied());
        Some(next)
    }
}

/// Upward iterator; see [`RelationshipIndex::ancestors`].
#[derive(Clone, Debug)]
pub struct Ancestors<'a> {
    index: &'a RelationshipIndex,
    next: Option<usize>,
}

impl Iterator for Ancestors<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let current = self.next?;
        self.next = self.index.parent_of(current);
        Some(current)
    }
}
