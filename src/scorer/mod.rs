//! Cognitive complexity scoring.
//!
//! # Overview
//!
//! Cognitive complexity approximates how hard a function is for a human to
//! follow: every branching or looping construct costs 1, plus 1 for each
//! enclosing branching/looping/catch/closure construct around it. Chains of
//! logical operators are flattened so `a && b && c` costs 1 and each switch
//! between `&&` and `||` costs 1 more.
//!
//! The scorer works on the arena model in [`crate::syntax`] and performs a
//! single depth-first pre-order pass over one function.
//!
//! # Example
//!
//! ```
//! use cogmet::scorer::Scorer;
//! use cogmet::syntax::{NodeKind, TreeBuilder};
//!
//! let mut builder = TreeBuilder::new(NodeKind::Method);
//! let root = builder.root();
//! let outer = builder.push(NodeKind::For, root);
//! builder.push(NodeKind::If, outer);
//! let tree = builder.finish();
//!
//! let mut scorer = Scorer::new();
//! // for = 1, if = 1 + 1 for the enclosing loop
//! assert_eq!(scorer.score(&tree, tree.root()), 3);
//! ```

mod logical;

use std::collections::HashSet;

use crate::syntax::{NodeId, NodeKind, SyntaxTree};

/// Computes the cognitive complexity of one function.
///
/// A scorer may be reused across functions; all state is reset at the start
/// of every [`Scorer::score`] call, so successive calls never leak totals or
/// counted expressions into each other.
#[derive(Debug, Default)]
pub struct Scorer {
    total: u32,
    counted: HashSet<NodeId>,
}

impl Scorer {
    /// Create a fresh scorer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Score the function rooted at `node`.
    ///
    /// Deterministic and read-only with respect to the tree. A function
    /// with no qualifying constructs scores 0.
    pub fn score(&mut self, tree: &SyntaxTree, node: NodeId) -> u32 {
        self.total = 0;
        self.counted.clear();
        self.visit(tree, node);
        self.total
    }

    fn visit(&mut self, tree: &SyntaxTree, node: NodeId) {
        match tree.kind(node) {
            NodeKind::If
            | NodeKind::Switch
            | NodeKind::Conditional
            | NodeKind::For
            | NodeKind::ForEach
            | NodeKind::While
            | NodeKind::Do => {
                self.total += 1 + nesting_level(tree, node);
            }
            NodeKind::CatchDeclaration => {
                // Nesting is anchored at the enclosing try rather than the
                // catch itself, so sibling catch clauses all weigh the same.
                self.total += 1;
                if let Some(anchor) = tree
                    .ancestors(node)
                    .find(|&a| tree.kind(a) == NodeKind::Try)
                {
                    self.total += nesting_level(tree, anchor);
                }
            }
            NodeKind::Break => {
                // A break that terminates a switch case is part of the case
                // syntax; only breaks that exit a loop cost.
                let parent_kind = tree.parent(node).map(|p| tree.kind(p));
                if parent_kind != Some(NodeKind::SwitchSection) {
                    self.total += 1;
                }
            }
            NodeKind::Continue => {
                self.total += 1;
            }
            NodeKind::LogicalAnd | NodeKind::LogicalOr => {
                if !self.counted.contains(&node) {
                    let operators = logical::flatten(tree, node, &mut self.counted);
                    self.total += logical::chain_cost(tree, &operators);
                }
            }
            _ => {}
        }

        for &child in tree.children(node) {
            self.visit(tree, child);
        }
    }
}

/// Count enclosing branching/looping/catch/closure constructs.
///
/// Only ancestors count; a construct never adds nesting weight for itself.
fn nesting_level(tree: &SyntaxTree, node: NodeId) -> u32 {
    tree.ancestors(node)
        .filter(|&a| tree.kind(a).nests())
        .count() as u32
}
