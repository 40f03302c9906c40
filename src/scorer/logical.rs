//! Flattening of logical-operator chains.
//!
//! A run of identical operators reads as one condition, so `a && b && c`
//! costs 1 while `a && b || c` costs 2. A chain is flattened the first time
//! the traversal reaches its outermost operator; every expression absorbed
//! along the way is recorded so the main pass does not rescore it when it
//! reaches the sub-expressions directly.

use std::collections::HashSet;

use crate::syntax::{NodeId, NodeKind, SyntaxTree};

/// Flatten the chain rooted at `node` into its in-order sequence of
/// operator nodes, marking every absorbed expression in `counted`.
///
/// Descent skips parenthesized wrappers and stops at operands that are not
/// themselves logical operators.
pub(super) fn flatten(
    tree: &SyntaxTree,
    node: NodeId,
    counted: &mut HashSet<NodeId>,
) -> Vec<NodeId> {
    let mut operators = Vec::new();
    collect(tree, node, counted, &mut operators);
    operators
}

fn collect(
    tree: &SyntaxTree,
    node: NodeId,
    counted: &mut HashSet<NodeId>,
    operators: &mut Vec<NodeId>,
) {
    if counted.contains(&node) {
        return;
    }
    if !matches!(
        tree.kind(node),
        NodeKind::LogicalAnd | NodeKind::LogicalOr
    ) {
        return;
    }
    counted.insert(node);

    let operands = tree.children(node);
    if let Some(&left) = operands.first() {
        collect(tree, skip_parenthesized(tree, left), counted, operators);
    }
    operators.push(node);
    if let Some(&right) = operands.get(1) {
        collect(tree, skip_parenthesized(tree, right), counted, operators);
    }
}

/// Cost of a flattened operator sequence: 1 for the leading operator plus 1
/// for every switch between operator kinds.
pub(super) fn chain_cost(tree: &SyntaxTree, operators: &[NodeId]) -> u32 {
    let mut cost = 0;
    let mut previous = None;
    for &op in operators {
        let kind = tree.kind(op);
        if previous != Some(kind) {
            cost += 1;
        }
        previous = Some(kind);
    }
    cost
}

fn skip_parenthesized(tree: &SyntaxTree, start: NodeId) -> NodeId {
    let mut node = start;
    while tree.kind(node) == NodeKind::Parenthesized {
        match tree.children(node).first() {
            Some(&inner) => node = inner,
            None => break,
        }
    }
    node
}
