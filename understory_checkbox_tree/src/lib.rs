// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_checkbox_tree --heading-base-level=0

//! Understory Checkbox Tree: state for hierarchical tri-state checkboxes.
//!
//! This crate is the model behind a "select folders and files" style tree view.
//! It does not render anything; a host view draws rows and forwards clicks.
//!
//! The pipeline is:
//!
//! - [`TreeNode`]: caller-owned input forest (`id`, `label`, `children`).
//! - [`flatten`]: depth-first pre-order flattening into [`FlatItem`]s with
//!   dense indices, levels, and parent indices.
//! - [`build_relationships`]: a [`RelationshipIndex`] with O(1) parent and
//!   children lookups, built once per tree shape.
//! - [`TreeState`]: two membership sets, checked and expanded, keyed by a
//!   [`NodeKey`] (`usize` pre-order index or `String` id).
//! - [`toggle`] / [`set_checked`]: propagation. Toggling a node forces its
//!   whole subtree to the new value, then each ancestor becomes checked iff
//!   all of its direct children are checked.
//! - Derived queries: [`checked_leaves`], [`is_indeterminate`], [`check_state`].
//!
//! [`CheckboxTree`] bundles all of the above with a selection-change listener
//! and is what most hosts should hold on to.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_checkbox_tree::{
//!     CheckState, RelationshipIndex, TreeNode, TreeState, checked_leaves, check_state, toggle,
//! };
//!
//! let data = vec![
//!     TreeNode::branch(
//!         "frontend",
//!         "Frontend",
//!         [
//!             TreeNode::branch(
//!                 "react",
//!                 "React",
//!                 [TreeNode::leaf("nextjs", "Next.js"), TreeNode::leaf("astro", "Astro")],
//!             ),
//!             TreeNode::leaf("vue", "Vue.js"),
//!         ],
//!     ),
//! ];
//! let index = RelationshipIndex::from_forest(&data);
//!
//! // Index keys: 0 frontend, 1 react, 2 nextjs, 3 astro, 4 vue.
//! let state = toggle(&TreeState::new(), &2_usize, &index);
//! assert!(!state.is_checked(&1));
//! assert_eq!(check_state(&1, &state, &index), CheckState::Indeterminate);
//!
//! let state = toggle(&state, &3, &index);
//! assert!(state.is_checked(&1));
//! assert!(!state.is_checked(&0));
//!
//! let leaves: Vec<&str> = checked_leaves(&state, &index)
//!     .iter()
//!     .map(|item| item.id.as_str())
//!     .collect();
//! assert_eq!(leaves, ["nextjs", "astro"]);
//! ```
//!
//! ## Preconditions
//!
//! Ids must be unique and the input acyclic. Debug builds assert uniqueness
//! when building a [`RelationshipIndex`]; release builds leave duplicate ids
//! unspecified. Commands addressed to keys that do not exist are no-ops.
//!
//! ## Logging
//!
//! Commands are traced through the [`log`] facade at `trace` level; ignored
//! commands and reshapes log at `debug` level.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod flags;
mod flatten;
mod key;
mod node;
mod propagate;
mod relationships;
mod state;
mod tree;

pub use flags::NodeFlags;
pub use flatten::{FlatItem, flatten};
pub use key::NodeKey;
pub use node::TreeNode;
pub use propagate::{
    CheckState, check_state, checked_leaves, is_indeterminate, normalize, set_checked, toggle,
};
pub use relationships::{Ancestors, Descendants, RelationshipIndex, build_relationships};
pub use state::{Preset, TreeState, toggle_expand};
pub use tree::{CheckboxTree, TreeOptions};
