// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The owning controller a view layer talks to.

use alloc::boxed::Box;
use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::flags::NodeFlags;
use crate::flatten::FlatItem;
use crate::key::NodeKey;
use crate::node::TreeNode;
use crate::propagate::{self, CheckState};
use crate::relationships::RelationshipIndex;
use crate::state::{Preset, TreeState};

/// Initial state configuration for a [`CheckboxTree`].
#[derive(Clone, Debug)]
pub struct TreeOptions<K> {
    /// Nodes to check on construction.
    ///
    /// Each selected node is checked with full propagation, in preset order,
    /// so the initial state already has consensus ancestors.
    pub default_checked: Preset<K>,
    /// Nodes to expand on construction. No propagation.
    pub default_expanded: Preset<K>,
}

impl<K> Default for TreeOptions<K> {
    fn default() -> Self {
        Self {
            default_checked: Preset::None,
            default_expanded: Preset::None,
        }
    }
}

type SelectionListener = Box<dyn FnMut(&[&FlatItem])>;

/// A mounted checkbox tree: shape, state, and the selection listener.
///
/// The shape ([`RelationshipIndex`]) is built once and only replaced by
/// [`set_data`](Self::set_data). Commands mutate the [`TreeState`] in place,
/// which is observably the same as replacing it with the snapshot returned by
/// [`toggle`](crate::toggle). All commands addressed to unknown keys are
/// no-ops and return `false`.
///
/// `K` picks the addressing scheme: `usize` for pre-order indices or
/// `String` for node ids.
///
/// ## Example
///
/// ```rust
/// use understory_checkbox_tree::{CheckboxTree, TreeNode};
///
/// let data = vec![TreeNode::branch(
///     "react",
///     "React",
///     [TreeNode::leaf("nextjs", "Next.js"), TreeNode::leaf("astro", "Astro")],
/// )];
/// let mut tree: CheckboxTree<String> = CheckboxTree::new(&data);
///
/// tree.toggle_check(&"nextjs".to_string());
/// assert!(!tree.is_checked(&"react".to_string()));
///
/// tree.toggle_check(&"astro".to_string());
/// assert!(tree.is_checked(&"react".to_string()));
///
/// let leaves: Vec<&str> = tree.checked_leaves().iter().map(|i| i.id.as_str()).collect();
/// assert_eq!(leaves, ["nextjs", "astro"]);
/// ```
pub struct CheckboxTree<K: NodeKey> {
    index: RelationshipIndex,
    state: TreeState<K>,
    listener: Option<SelectionListener>,
}

impl<K: NodeKey> core::fmt::Debug for CheckboxTree<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CheckboxTree")
            .field("index", &self.index)
            .field("checked", &self.state.checked_len())
            .field("expanded", &self.state.expanded.len())
            .field("listener", &self.listener.is_some())
            .finish_non_exhaustive()
    }
}

impl<K: NodeKey> CheckboxTree<K> {
    /// Mount a tree over `roots` with nothing checked or expanded.
    pub fn new(roots: &[TreeNode]) -> Self {
        Self::with_options(roots, &TreeOptions::default())
    }

    /// Mount a tree over `roots` with initial presets.
    pub fn with_options(roots: &[TreeNode], options: &TreeOptions<K>) -> Self {
        let index = RelationshipIndex::from_forest(roots);
        let state = seed(&index, options);
        Self {
            index,
            state,
            listener: None,
        }
    }

    /// Register the callback fired after every change to the checked set.
    ///
    /// It receives the checked leaves in flatten order. Replaces any
    /// previously registered listener.
    pub fn on_selection_change(&mut self, listener: impl FnMut(&[&FlatItem]) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Remove the selection listener.
    pub fn clear_selection_listener(&mut self) {
        self.listener = None;
    }

    /// Replace the forest.
    ///
    /// The shape is re-flattened and the index rebuilt. With id keys, state
    /// for ids that still exist is kept and ancestors are recomputed from
    /// their children; with index keys, the state is reset. The listener fires
    /// if the checked set changed.
    pub fn set_data(&mut self, roots: &[TreeNode]) {
        let index = RelationshipIndex::from_forest(roots);
        let before = self.state.checked.clone();
        if K::STABLE_ACROSS_RESHAPE {
            self.state.retain_resolvable(&index);
            propagate::normalize(&mut self.state, &index);
        } else {
            self.state = TreeState::new();
        }
        self.index = index;
        log::debug!(
            "checkbox tree reshaped to {} nodes, {} checked",
            self.index.len(),
            self.state.checked_len()
        );
        if self.state.checked != before {
            self.notify();
        }
    }

    /// The relationship index of the current shape.
    pub fn relationships(&self) -> &RelationshipIndex {
        &self.index
    }

    /// The current checked/expanded state.
    pub fn state(&self) -> &TreeState<K> {
        &self.state
    }

    /// All items in pre-order.
    pub fn items(&self) -> &[FlatItem] {
        self.index.items()
    }

    /// The item addressed by `key`.
    pub fn get(&self, key: &K) -> Option<&FlatItem> {
        key.resolve(&self.index).and_then(|ix| self.index.get(ix))
    }

    /// Top-level items in input order.
    pub fn roots(&self) -> impl Iterator<Item = &FlatItem> + '_ {
        let items = self.index.items();
        self.index.roots().iter().map(move |&ix| &items[ix])
    }

    /// Direct children of `key` in sibling order; empty for leaves and
    /// unknown keys.
    pub fn children_of(&self, key: &K) -> impl Iterator<Item = &FlatItem> + '_ {
        let items = self.index.items();
        key.resolve(&self.index)
            .and_then(|ix| self.index.children_of(ix))
            .unwrap_or_default()
            .iter()
            .map(move |&c| &items[c])
    }

    /// Returns `true` if `key` is checked.
    #[must_use]
    pub fn is_checked(&self, key: &K) -> bool {
        self.state.is_checked(key)
    }

    /// Returns `true` if `key` is expanded.
    #[must_use]
    pub fn is_expanded(&self, key: &K) -> bool {
        self.state.is_expanded(key)
    }

    /// See [`is_indeterminate`](crate::is_indeterminate).
    #[must_use]
    pub fn is_indeterminate(&self, key: &K) -> bool {
        propagate::is_indeterminate(key, &self.state, &self.index)
    }

    /// Tri-state display value of `key`.
    #[must_use]
    pub fn check_state(&self, key: &K) -> CheckState {
        propagate::check_state(key, &self.state, &self.index)
    }

    /// Render flags for `key`; empty for unknown keys.
    #[must_use]
    pub fn node_flags(&self, key: &K) -> NodeFlags {
        key.resolve(&self.index)
            .map_or(NodeFlags::empty(), |ix| self.flags_at(ix))
    }

    fn flags_at(&self, ix: usize) -> NodeFlags {
        let item = &self.index.items()[ix];
        let mut flags = match propagate::check_state_at(&self.state, ix, &self.index) {
            CheckState::Checked => NodeFlags::CHECKED,
            CheckState::Indeterminate => NodeFlags::INDETERMINATE,
            CheckState::Unchecked => NodeFlags::empty(),
        };
        if self.state.is_item_expanded(item) {
            flags |= NodeFlags::EXPANDED;
        }
        if item.is_leaf {
            flags |= NodeFlags::LEAF;
        }
        flags
    }

    /// Checked leaves in flatten order.
    pub fn checked_leaves(&self) -> Vec<&FlatItem> {
        propagate::checked_leaves(&self.state, &self.index)
    }

    /// Items a recursive renderer would show: pre-order, descending only into
    /// expanded nodes.
    pub fn visible_items(&self) -> Vec<&FlatItem> {
        let items = self.index.items();
        let mut out = Vec::new();
        let mut stack: SmallVec<[usize; 16]> = self.index.roots().iter().rev().copied().collect();
        while let Some(ix) = stack.pop() {
            let item = &items[ix];
            out.push(item);
            if self.state.is_item_expanded(item)
                && let Some(children) = self.index.children_of(ix)
            {
                stack.extend(children.iter().rev().copied());
            }
        }
        out
    }

    /// Toggle the checked value of `key` and propagate.
    pub fn toggle_check(&mut self, key: &K) -> bool {
        match propagate::toggle_in_place(&mut self.state, key, &self.index) {
            Some(changed) => {
                log::trace!("toggled check on {key:?}");
                if changed {
                    self.notify();
                }
                true
            }
            None => {
                log::debug!("ignoring check toggle for unknown node {key:?}");
                false
            }
        }
    }

    /// Force `key` to `checked` and propagate.
    pub fn set_checked(&mut self, key: &K, checked: bool) -> bool {
        let Some(ix) = key.resolve(&self.index) else {
            log::debug!("ignoring check command for unknown node {key:?}");
            return false;
        };
        log::trace!("set check on {key:?} to {checked}");
        if propagate::apply(&mut self.state, ix, checked, &self.index) {
            self.notify();
        }
        true
    }

    /// Apply [`set_checked`](Self::set_checked) to each key in order, firing
    /// the listener at most once. Returns how many keys resolved.
    pub fn bulk_check<'k>(&mut self, keys: impl IntoIterator<Item = &'k K>, checked: bool) -> usize
    where
        K: 'k,
    {
        let mut applied = 0;
        let mut changed = false;
        for key in keys {
            match key.resolve(&self.index) {
                Some(ix) => {
                    applied += 1;
                    changed |= propagate::apply(&mut self.state, ix, checked, &self.index);
                }
                None => log::debug!("ignoring bulk check for unknown node {key:?}"),
            }
        }
        log::trace!("bulk check applied to {applied} nodes");
        if changed {
            self.notify();
        }
        applied
    }

    /// Flip the expanded flag of `key`. Never cascades.
    pub fn toggle_expand(&mut self, key: &K) -> bool {
        let expanded = !self.state.is_expanded(key);
        self.set_expanded(key, expanded)
    }

    /// Set the expanded flag of `key`. Never cascades.
    pub fn set_expanded(&mut self, key: &K, expanded: bool) -> bool {
        if key.resolve(&self.index).is_none() {
            log::debug!("ignoring expand command for unknown node {key:?}");
            return false;
        }
        log::trace!("set expanded on {key:?} to {expanded}");
        self.state.set_expanded(key.clone(), expanded);
        true
    }

    /// Apply [`set_expanded`](Self::set_expanded) to each key. Returns how
    /// many keys resolved.
    pub fn bulk_expand<'k>(&mut self, keys: impl IntoIterator<Item = &'k K>, expanded: bool) -> usize
    where
        K: 'k,
    {
        keys.into_iter()
            .filter(|key| self.set_expanded(key, expanded))
            .count()
    }

    fn notify(&mut self) {
        if let Some(listener) = self.listener.as_mut() {
            let leaves = propagate::checked_leaves(&self.state, &self.index);
            listener(&leaves);
        }
    }
}

fn seed<K: NodeKey>(index: &RelationshipIndex, options: &TreeOptions<K>) -> TreeState<K> {
    let mut state = TreeState::new();
    for ix in options.default_expanded.select(index) {
        state.set_expanded(K::of(&index.items()[ix]), true);
    }
    for ix in options.default_checked.select(index) {
        propagate::apply(&mut state, ix, true, index);
    }
    state
}
