// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node addressing schemes.

use alloc::string::String;
use core::hash::Hash;

use hashbrown::HashSet;

use crate::flatten::FlatItem;
use crate::relationships::RelationshipIndex;

/// Identity used to address nodes in a [`TreeState`](crate::TreeState).
///
/// Two schemes are provided:
/// - `usize`: the dense pre-order index from [`flatten`](crate::flatten).
///   Cheap, but only meaningful for one flattening.
/// - `String`: the node's [`id`](FlatItem::id). Survives reshaping as long as
///   ids are kept.
///
/// One tree instance uses exactly one scheme; the type parameter enforces it.
pub trait NodeKey: Clone + Eq + Hash + core::fmt::Debug {
    /// Whether keys still name the same node after the forest is re-flattened.
    const STABLE_ACROSS_RESHAPE: bool;

    /// Resolve this key to a dense index, or `None` if no such node exists.
    fn resolve(&self, index: &RelationshipIndex) -> Option<usize>;

    /// The key naming `item`.
    fn of(item: &FlatItem) -> Self;

    /// Membership test for the key naming `item`.
    ///
    /// Override this to avoid building an owned key just to query the set.
    fn contained_in(set: &HashSet<Self>, item: &FlatItem) -> bool {
        set.contains(&Self::of(item))
    }

    /// Remove the key naming `item`, returning whether it was present.
    fn remove_from(set: &mut HashSet<Self>, item: &FlatItem) -> bool {
        set.remove(&Self::of(item))
    }
}

impl NodeKey for usize {
    const STABLE_ACROSS_RESHAPE: bool = false;

    fn resolve(&self, index: &RelationshipIndex) -> Option<usize> {
        (*self < index.len()).then_some(*self)
    }

    fn of(item: &FlatItem) -> Self {
        item.index
    }
}

impl NodeKey for String {
    const STABLE_ACROSS_RESHAPE: bool = true;

    fn resolve(&self, index: &RelationshipIndex) -> Option<usize> {
        index.index_of_id(self)
    }

    fn of(item: &FlatItem) -> Self {
        item.id.clone()
    }

    fn contained_in(set: &HashSet<Self>, item: &FlatItem) -> bool {
        set.contains(item.id.as_str())
    }

    fn remove_from(set: &mut HashSet<Self>, item: &FlatItem) -> bool {
        set.remove(item.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::fixtures;

    #[test]
    fn both_schemes_resolve_to_the_same_index() {
        let rel = RelationshipIndex::from_forest(&fixtures::skills());
        assert_eq!(String::from("vue").resolve(&rel), Some(4));
        assert_eq!(4_usize.resolve(&rel), Some(4));
        assert_eq!(9_usize.resolve(&rel), None);
        assert_eq!(String::from("svelte").resolve(&rel), None);
        assert_eq!(String::of(&rel.items()[7]), "nodejs");
        assert_eq!(usize::of(&rel.items()[7]), 7);
    }

    #[test]
    fn id_keys_look_up_without_allocating_a_key() {
        let rel = RelationshipIndex::from_forest(&fixtures::skills());
        let mut set: HashSet<String> = HashSet::new();
        set.insert("astro".into());
        assert!(String::contained_in(&set, &rel.items()[3]));
        assert!(!String::contained_in(&set, &rel.items()[2]));
        assert!(String::remove_from(&mut set, &rel.items()[3]));
        assert!(set.is_empty());
    }
}
