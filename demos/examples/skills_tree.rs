// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drive a checkbox tree from the command line and print what a view would draw.
//!
//! Each argument is a node id. A bare id toggles its checkbox; an id prefixed
//! with `+` toggles its expansion instead.
//!
//! Run:
//! - `cargo run -p understory_demos --example skills_tree -- nextjs astro +react vue angular`

use understory_checkbox_tree::{CheckboxTree, NodeFlags, Preset, TreeNode, TreeOptions};

fn skills() -> Vec<TreeNode> {
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

/// Print the visible rows with a chevron and a tri-state box.
fn render(tree: &CheckboxTree<String>) {
    for item in tree.visible_items() {
        let flags = tree.node_flags(&item.id);
        let chevron = if flags.contains(NodeFlags::LEAF) {
            ' '
        } else if flags.contains(NodeFlags::EXPANDED) {
            'v'
        } else {
            '>'
        };
        let mark = if flags.contains(NodeFlags::CHECKED) {
            'x'
        } else if flags.contains(NodeFlags::INDETERMINATE) {
            '-'
        } else {
            ' '
        };
        println!("{:indent$}{chevron} [{mark}] {}", "", item.label, indent = item.level * 2);
    }
}

fn main() {
    let options = TreeOptions {
        default_checked: Preset::None,
        default_expanded: Preset::Keys(vec!["frontend".to_string(), "backend".to_string()]),
    };
    let mut tree = CheckboxTree::with_options(&skills(), &options);
    tree.on_selection_change(|leaves| {
        let labels: Vec<&str> = leaves.iter().map(|item| item.label.as_str()).collect();
        println!("  selection: {labels:?}");
    });

    println!("== initial ==");
    render(&tree);

    for arg in std::env::args().skip(1) {
        let applied = match arg.strip_prefix('+') {
            Some(id) => {
                println!("\n== expand {id} ==");
                tree.toggle_expand(&id.to_string())
            }
            None => {
                println!("\n== check {arg} ==");
                tree.toggle_check(&arg)
            }
        };
        if !applied {
            println!("  no such node");
            continue;
        }
        render(&tree);
    }
}
