// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Checked-state propagation and derived check queries.
//!
//! A toggle is an override downward and a consensus upward:
//!
//! 1. the target's new value is `!is_checked(target)`,
//! 2. every descendant of the target (all levels) is forced to that value,
//! 3. every ancestor, nearest first, becomes checked iff all of its direct
//!    children are checked.
//!
//! Step 3 runs at every level up to the root, even when an intermediate
//! ancestor keeps its value, since each ancestor reads its children's fresh
//! values. The downward pass costs the size of the subtree; the upward pass
//! costs depth times branching.

use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::flatten::FlatItem;
use crate::key::NodeKey;
use crate::relationships::RelationshipIndex;
use crate::state::TreeState;

/// Display state of a checkbox.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CheckState {
    /// In the checked set.
    Checked,
    /// Not checked and no checked or indeterminate children.
    Unchecked,
    /// Not checked, but some descendants are.
    Indeterminate,
}

/// Toggle `target` and propagate, returning the new snapshot.
///
/// Re-toggling an indeterminate node checks its whole subtree: only stored
/// membership is inverted, never the derived display state.
///
/// Unknown keys leave the state unchanged.
#[must_use]
pub fn toggle<K: NodeKey>(state: &TreeState<K>, target: &K, index: &RelationshipIndex) -> TreeState<K> {
    let mut next = state.clone();
    toggle_in_place(&mut next, target, index);
    next
}

/// Force `target` to `checked` and propagate, returning the new snapshot.
///
/// Unknown keys leave the state unchanged.
#[must_use]
pub fn set_checked<K: NodeKey>(
    state: &TreeState<K>,
    target: &K,
    checked: bool,
    index: &RelationshipIndex,
) -> TreeState<K> {
    let mut next = state.clone();
    if let Some(ix) = target.resolve(index) {
        apply(&mut next, ix, checked, index);
    }
    next
}

/// In-place [`toggle`].
///
/// Returns `None` if `target` does not resolve, otherwise whether the
/// checked set changed.
pub(crate) fn toggle_in_place<K: NodeKey>(
    state: &mut TreeState<K>,
    target: &K,
    index: &RelationshipIndex,
) -> Option<bool> {
    let ix = target.resolve(index)?;
    let should_check = !state.is_checked(target);
    Some(apply(state, ix, should_check, index))
}

/// Set `ix` to `checked`, override its subtree, and recompute its ancestors.
pub(crate) fn apply<K: NodeKey>(
    state: &mut TreeState<K>,
    ix: usize,
    checked: bool,
    index: &RelationshipIndex,
) -> bool {
    let items = index.items();
    let mut changed = state.set_item_checked(&items[ix], checked);
    for d in index.descendants(ix) {
        changed |= state.set_item_checked(&items[d], checked);
    }
    for a in index.ancestors(ix) {
        let consensus = all_children_checked(state, a, index);
        changed |= state.set_item_checked(&items[a], consensus);
    }
    changed
}

fn all_children_checked<K: NodeKey>(state: &TreeState<K>, ix: usize, index: &RelationshipIndex) -> bool {
    let items = index.items();
    index
        .children_of(ix)
        .is_some_and(|children| children.iter().all(|&c| state.is_item_checked(&items[c])))
}

/// Recompute every internal node from its direct children, bottom-up.
///
/// Leaves keep their membership. Afterwards every internal node is checked
/// iff all of its children are.
pub fn normalize<K: NodeKey>(state: &mut TreeState<K>, index: &RelationshipIndex) -> bool {
    let items = index.items();
    let mut changed = false;
    // Children always follow their parent in pre-order.
    for ix in (0..items.len()).rev() {
        if items[ix].is_leaf {
            continue;
        }
        let consensus = all_children_checked(state, ix, index);
        changed |= state.set_item_checked(&items[ix], consensus);
    }
    changed
}

/// Checked leaves in flatten order.
///
/// Leaves are the effective selection; checked internal nodes only summarize
/// their subtree.
pub fn checked_leaves<'a, K: NodeKey>(
    state: &TreeState<K>,
    index: &'a RelationshipIndex,
) -> Vec<&'a FlatItem> {
    index
        .items()
        .iter()
        .filter(|item| item.is_leaf && state.is_item_checked(item))
        .collect()
}

/// Returns `true` if `key` has children, not all of them are checked, and at
/// least one is checked or itself indeterminate.
///
/// This is never stored; it is derived from the checked set on each call.
/// Unknown keys and leaves are never indeterminate.
#[must_use]
pub fn is_indeterminate<K: NodeKey>(key: &K, state: &TreeState<K>, index: &RelationshipIndex) -> bool {
    key.resolve(index)
        .is_some_and(|ix| indeterminate_at(state, ix, index))
}

pub(crate) fn indeterminate_at<K: NodeKey>(
    state: &TreeState<K>,
    ix: usize,
    index: &RelationshipIndex,
) -> bool {
    let Some(children) = index.children_of(ix) else {
        return false;
    };
    let items = index.items();
    let checked = children
        .iter()
        .filter(|&&c| state.is_item_checked(&items[c]))
        .count();
    if checked == children.len() {
        return false;
    }
    if checked > 0 {
        return true;
    }

    // Reverse pre-order visits children before their parent, so each node's
    // activity (checked or indeterminate) is known when its parent needs it.
    let order: Vec<usize> = index.descendants(ix).collect();
    let mut active: HashMap<usize, bool> = HashMap::with_capacity(order.len());
    for &n in order.iter().rev() {
        let is_active =
            state.is_item_checked(&items[n]) || mixed(state, n, index, &active);
        active.insert(n, is_active);
    }
    mixed(state, ix, index, &active)
}

/// Not all children checked, and at least one child active.
fn mixed<K: NodeKey>(
    state: &TreeState<K>,
    ix: usize,
    index: &RelationshipIndex,
    active: &HashMap<usize, bool>,
) -> bool {
    let Some(children) = index.children_of(ix) else {
        return false;
    };
    let items = index.items();
    !children.iter().all(|&c| state.is_item_checked(&items[c]))
        && children.iter().any(|c| active.get(c).copied().unwrap_or(false))
}

/// Tri-state display value of `key`; unknown keys are [`CheckState::Unchecked`].
#[must_use]
pub fn check_state<K: NodeKey>(key: &K, state: &TreeState<K>, index: &RelationshipIndex) -> CheckState {
    match key.resolve(index) {
        Some(ix) => check_state_at(state, ix, index),
        None => CheckState::Unchecked,
    }
}

pub(crate) fn check_state_at<K: NodeKey>(
    state: &TreeState<K>,
    ix: usize,
    index: &RelationshipIndex,
) -> CheckState {
    if state.is_item_checked(&index.items()[ix]) {
        CheckState::Checked
    } else if indeterminate_at(state, ix, index) {
        CheckState::Indeterminate
    } else {
        CheckState::Unchecked
    }
}
