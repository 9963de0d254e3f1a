// src/formatting/normalizer.rs
//! Groups consecutive list items into list containers.
//!
//! One left-to-right pass per groupable type, in the fixed order bulleted,
//! numbered, to-do. Each pass only collapses runs of its own type, so nodes
//! of other types keep their relative positions.

use super::node::{BlockNode, ListKind};

/// Collapses every maximal run of same-typed list items into one container.
///
/// A run of length one still becomes a one-item container.
pub fn normalize(nodes: Vec<BlockNode>) -> Vec<BlockNode> {
    ListKind::GROUPING_ORDER
        .into_iter()
        .fold(nodes, |nodes, kind| group_runs(nodes, kind))
}

fn group_runs(nodes: Vec<BlockNode>, kind: ListKind) -> Vec<BlockNode> {
    let mut output = Vec::with_capacity(nodes.len());
    let mut run = Vec::new();

    for node in nodes {
        if node.node_type() == kind.item_type() {
            run.push(node);
            continue;
        }
        if !run.is_empty() {
            output.push(BlockNode::list(kind, std::mem::take(&mut run)));
        }
        output.push(node);
    }

    if !run.is_empty() {
        output.push(BlockNode::list(kind, run));
    }
    output
}
