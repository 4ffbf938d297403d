// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node render flags.

bitflags::bitflags! {
    /// Everything a row renderer needs to draw one node.
    ///
    /// `CHECKED` and `INDETERMINATE` are mutually exclusive.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node is in the checked set.
        const CHECKED       = 0b0000_0001;
        /// Node is unchecked but part of its subtree is checked.
        const INDETERMINATE = 0b0000_0010;
        /// Node is expanded. Leaves may carry this too; renderers ignore it there.
        const EXPANDED      = 0b0000_0100;
        /// Node has no children.
        const LEAF          = 0b0000_1000;
    }
}
