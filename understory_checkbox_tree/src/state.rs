// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Checked and expanded membership sets.

use alloc::vec::Vec;

use hashbrown::HashSet;

use crate::flatten::FlatItem;
use crate::key::NodeKey;
use crate::relationships::RelationshipIndex;

/// Checked/expanded state of one mounted tree.
///
/// This is purely a pair of membership sets; it carries no structural
/// information, so it is cheap to clone, compare, and replace. Structural
/// lookups go through a [`RelationshipIndex`].
///
/// Only binary "checked" membership is stored. The indeterminate display
/// state is derived on demand, see [`is_indeterminate`](crate::is_indeterminate).
#[derive(Clone, PartialEq, Eq)]
pub struct TreeState<K: NodeKey> {
    pub(crate) checked: HashSet<K>,
    pub(crate) expanded: HashSet<K>,
}

impl<K: NodeKey> core::fmt::Debug for TreeState<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TreeState")
            .field("checked", &self.checked.len())
            .field("expanded", &self.expanded.len())
            .finish()
    }
}

impl<K: NodeKey> Default for TreeState<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: NodeKey> TreeState<K> {
    /// Create a state with nothing checked and nothing expanded.
    pub fn new() -> Self {
        Self {
            checked: HashSet::new(),
            expanded: HashSet::new(),
        }
    }

    /// Returns `true` if `key` is in the checked set.
    #[must_use]
    pub fn is_checked(&self, key: &K) -> bool {
        self.checked.contains(key)
    }

    /// Returns `true` if `key` is in the expanded set.
    #[must_use]
    pub fn is_expanded(&self, key: &K) -> bool {
        self.expanded.contains(key)
    }

    /// Checked keys, in no particular order.
    pub fn checked(&self) -> impl Iterator<Item = &K> + '_ {
        self.checked.iter()
    }

    /// Expanded keys, in no particular order.
    pub fn expanded(&self) -> impl Iterator<Item = &K> + '_ {
        self.expanded.iter()
    }

    /// Number of checked nodes, internal nodes included.
    #[must_use]
    pub fn checked_len(&self) -> usize {
        self.checked.len()
    }

    /// Flip `key` in the expanded set, returning the new snapshot.
    ///
    /// Expansion never cascades. Descendants keep their own expanded flags
    /// while an ancestor is collapsed, so re-expanding restores them.
    ///
    /// The state holds no structure, so `key` is not validated and is
    /// recorded even if it names no node. Use the free [`toggle_expand`] to
    /// ignore unknown keys.
    #[must_use]
    pub fn toggle_expand(&self, key: &K) -> Self {
        let mut next = self.clone();
        let expanded = !next.is_expanded(key);
        next.set_expanded(key.clone(), expanded);
        next
    }

    /// Set expanded membership for `key`. Returns `true` if it changed.
    ///
    /// Like [`toggle_expand`](Self::toggle_expand), `key` is not validated.
    pub fn set_expanded(&mut self, key: K, expanded: bool) -> bool {
        if expanded {
            self.expanded.insert(key)
        } else {
            self.expanded.remove(&key)
        }
    }

    pub(crate) fn is_item_checked(&self, item: &FlatItem) -> bool {
        K::contained_in(&self.checked, item)
    }

    pub(crate) fn is_item_expanded(&self, item: &FlatItem) -> bool {
        K::contained_in(&self.expanded, item)
    }

    /// Set checked membership for `item` without propagation.
    pub(crate) fn set_item_checked(&mut self, item: &FlatItem, checked: bool) -> bool {
        if !checked {
            K::remove_from(&mut self.checked, item)
        } else if K::contained_in(&self.checked, item) {
            false
        } else {
            self.checked.insert(K::of(item))
        }
    }

    /// Drop every key that does not resolve in `index`.
    pub(crate) fn retain_resolvable(&mut self, index: &RelationshipIndex) {
        self.checked.retain(|k| k.resolve(index).is_some());
        self.expanded.retain(|k| k.resolve(index).is_some());
    }
}

/// Flip `target` in the expanded set, returning the new snapshot.
///
/// Unlike [`TreeState::toggle_expand`], keys that do not resolve in `index`
/// leave the state unchanged.
#[must_use]
pub fn toggle_expand<K: NodeKey>(
    state: &TreeState<K>,
    target: &K,
    index: &RelationshipIndex,
) -> TreeState<K> {
    if target.resolve(index).is_none() {
        return state.clone();
    }
    state.toggle_expand(target)
}

/// Initial membership for the checked or expanded set.
#[derive(Clone)]
pub enum Preset<K> {
    /// Start empty.
    None,
    /// Start with these keys. Keys that do not resolve are ignored.
    Keys(Vec<K>),
    /// Start with every item matching the predicate.
    Predicate(fn(&FlatItem) -> bool),
}

impl<K> Default for Preset<K> {
    fn default() -> Self {
        Self::None
    }
}

impl<K: core::fmt::Debug> core::fmt::Debug for Preset<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Keys(keys) => f.debug_tuple("Keys").field(keys).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

impl<K: NodeKey> Preset<K> {
    /// Dense indices selected by this preset.
    ///
    /// `Keys` keeps the caller's order; `Predicate` yields pre-order.
    pub fn select(&self, index: &RelationshipIndex) -> Vec<usize> {
        match self {
            Self::None => Vec::new(),
            Self::Keys(keys) => keys.iter().filter_map(|k| k.resolve(index)).collect(),
            Self::Predicate(pred) => index
                .items()
                .iter()
                .filter(|item| pred(item))
                .map(|item| item.index)
                .collect(),
        }
    }
}
