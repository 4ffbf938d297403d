// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests over randomly shaped forests.

use proptest::prelude::*;
use proptest::sample::Index;
use understory_checkbox_tree::{
    RelationshipIndex, TreeNode, TreeState, checked_leaves, flatten, toggle,
};

/// Build a forest from `(is_root, parent)` picks: node `i` hangs under some
/// node `< i` unless it is a root.
fn forest_from(shape: &[(bool, Index)]) -> Vec<TreeNode> {
    let n = shape.len();
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut roots = Vec::new();
    for (i, (is_root, parent)) in shape.iter().enumerate() {
        if i == 0 || *is_root {
            roots.push(i);
        } else {
            children[parent.index(i)].push(i);
        }
    }
    fn build(i: usize, children: &[Vec<usize>]) -> TreeNode {
        TreeNode::branch(
            format!("n{i}"),
            format!("Node {i}"),
            children[i].iter().map(|&c| build(c, children)),
        )
    }
    roots.into_iter().map(|r| build(r, &children)).collect()
}

fn shapes() -> impl Strategy<Value = Vec<(bool, Index)>> {
    prop::collection::vec((prop::bool::weighted(0.2), any::<Index>()), 1..40)
}

fn run(index: &RelationshipIndex, picks: &[Index]) -> TreeState<usize> {
    picks.iter().fold(TreeState::new(), |state, pick| {
        toggle(&state, &pick.index(index.len()), index)
    })
}

fn consensus_holds(state: &TreeState<usize>, index: &RelationshipIndex) -> bool {
    (0..index.len()).all(|i| match index.children_of(i) {
        Some(children) => state.is_checked(&i) == children.iter().all(|c| state.is_checked(c)),
        None => true,
    })
}

proptest! {
    #[test]
    fn flatten_is_dense_and_deterministic(shape in shapes()) {
        let forest = forest_from(&shape);
        let a = flatten(&forest);
        let b = flatten(&forest);
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.len(), shape.len());
        for (pos, item) in a.iter().enumerate() {
            prop_assert_eq!(item.index, pos);
            if let Some(p) = item.parent_index {
                prop_assert!(p < pos);
                prop_assert_eq!(a[p].level + 1, item.level);
            }
        }
    }

    #[test]
    fn children_and_parent_are_inverse(shape in shapes()) {
        let index = RelationshipIndex::from_forest(&forest_from(&shape));
        for i in 0..index.len() {
            for &c in index.children_of(i).unwrap_or_default() {
                prop_assert_eq!(index.parent_of(c), Some(i));
            }
            if let Some(p) = index.parent_of(i) {
                prop_assert!(index.children_of(p).is_some_and(|c| c.contains(&i)));
            }
        }
    }

    #[test]
    fn toggles_override_down_and_agree_up(
        shape in shapes(),
        picks in prop::collection::vec(any::<Index>(), 0..16),
        last in any::<Index>(),
    ) {
        let index = RelationshipIndex::from_forest(&forest_from(&shape));
        let before = run(&index, &picks);
        prop_assert!(consensus_holds(&before, &index));

        let target = last.index(index.len());
        let after = toggle(&before, &target, &index);
        let value = after.is_checked(&target);
        prop_assert_eq!(value, !before.is_checked(&target));
        for d in index.descendants(target) {
            prop_assert_eq!(after.is_checked(&d), value);
        }
        prop_assert!(consensus_holds(&after, &index));
    }

    #[test]
    fn double_toggle_restores_uniform_subtrees(
        shape in shapes(),
        picks in prop::collection::vec(any::<Index>(), 0..16),
        last in any::<Index>(),
    ) {
        let index = RelationshipIndex::from_forest(&forest_from(&shape));
        let before = run(&index, &picks);
        let target = last.index(index.len());
        let value = before.is_checked(&target);
        let uniform = index.descendants(target).all(|d| before.is_checked(&d) == value);
        prop_assume!(uniform);

        let twice = toggle(&toggle(&before, &target, &index), &target, &index);
        prop_assert_eq!(twice, before);
    }

    #[test]
    fn expand_is_independent(
        shape in shapes(),
        picks in prop::collection::vec(any::<Index>(), 0..16),
        expand in prop::collection::vec(any::<Index>(), 0..8),
        last in any::<Index>(),
    ) {
        let index = RelationshipIndex::from_forest(&forest_from(&shape));
        let mut state = run(&index, &picks);
        for e in &expand {
            state.set_expanded(e.index(index.len()), true);
        }
        let target = last.index(index.len());
        let next = state.toggle_expand(&target);
        prop_assert_eq!(next.is_expanded(&target), !state.is_expanded(&target));
        for i in (0..index.len()).filter(|&i| i != target) {
            prop_assert_eq!(next.is_expanded(&i), state.is_expanded(&i));
            prop_assert_eq!(next.is_checked(&i), state.is_checked(&i));
        }
        prop_assert_eq!(next.is_checked(&target), state.is_checked(&target));
    }

    #[test]
    fn checked_leaves_are_checked_leaves_in_order(
        shape in shapes(),
        picks in prop::collection::vec(any::<Index>(), 0..16),
    ) {
        let index = RelationshipIndex::from_forest(&forest_from(&shape));
        let state = run(&index, &picks);
        let got: Vec<usize> = checked_leaves(&state, &index).iter().map(|i| i.index).collect();
        let want: Vec<usize> = index
            .items()
            .iter()
            .filter(|i| i.is_leaf && state.is_checked(&i.index))
            .map(|i| i.index)
            .collect();
        prop_assert_eq!(got, want);
    }

    #[test]
    fn id_and_index_schemes_agree(
        shape in shapes(),
        picks in prop::collection::vec(any::<Index>(), 0..16),
    ) {
        let index = RelationshipIndex::from_forest(&forest_from(&shape));
        let by_ix = run(&index, &picks);
        let by_id = picks.iter().fold(TreeState::<String>::new(), |state, pick| {
            let id = index.items()[pick.index(index.len())].id.clone();
            toggle(&state, &id, &index)
        });
        for item in index.items() {
            prop_assert_eq!(by_ix.is_checked(&item.index), by_id.is_checked(&item.id));
        }
    }
}
