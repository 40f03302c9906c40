//! Lowering from tree-sitter nodes into the scoring syntax model.
//!
//! Each supported grammar gets a table mapping its node kinds onto
//! [`NodeKind`]. Everything unlisted lowers to [`NodeKind::Other`], keeping
//! parent/child relationships (blocks included) literal so the scorer's
//! parent checks see the same shape the grammar produced.

use crate::core::Language;
use crate::syntax::{NodeId, NodeKind, SyntaxTree, TreeBuilder};

/// Lower one function declaration into an arena rooted at
/// [`NodeKind::Method`].
pub fn lower_function(
    node: &tree_sitter::Node<'_>,
    source: &[u8],
    lang: Language,
) -> SyntaxTree {
    let mut builder = TreeBuilder::new(NodeKind::Method);
    let root = builder.root();
    for child in node.named_children(&mut node.walk()) {
        lower_into(&child, source, lang, &mut builder, root);
    }
    builder.finish()
}

fn lower_into(
    node: &tree_sitter::Node<'_>,
    source: &[u8],
    lang: Language,
    builder: &mut TreeBuilder,
    parent: NodeId,
) {
    let id = builder.push(map_kind(node, source, lang), parent);
    for child in node.named_children(&mut node.walk()) {
        lower_into(&child, source, lang, builder, id);
    }
}

fn map_kind(node: &tree_sitter::Node<'_>, source: &[u8], lang: Language) -> NodeKind {
    match lang {
        Language::CSharp => map_csharp(node, source),
        Language::Java => map_java(node, source),
        Language::TypeScript | Language::JavaScript | Language::Tsx | Language::Jsx => {
            map_ecma(node, source)
        }
    }
}

fn map_csharp(node: &tree_sitter::Node<'_>, source: &[u8]) -> NodeKind {
    match node.kind() {
        "if_statement" => NodeKind::If,
        "switch_statement" => NodeKind::Switch,
        "switch_section" => NodeKind::SwitchSection,
        "conditional_expression" => NodeKind::Conditional,
        "for_statement" => NodeKind::For,
        "for_each_statement" => NodeKind::ForEach,
        "while_statement" => NodeKind::While,
        "do_statement" => NodeKind::Do,
        "try_statement" => NodeKind::Try,
        "catch_clause" => NodeKind::CatchClause,
        "catch_declaration" => NodeKind::CatchDeclaration,
        "break_statement" => NodeKind::Break,
        "continue_statement" => NodeKind::Continue,
        "parenthesized_expression" => NodeKind::Parenthesized,
        "lambda_expression" => NodeKind::Lambda,
        "binary_expression" => logical_operator_kind(node, source),
        _ => NodeKind::Other,
    }
}

fn map_java(node: &tree_sitter::Node<'_>, source: &[u8]) -> NodeKind {
    match node.kind() {
        "if_statement" => NodeKind::If,
        // tree-sitter-java parses statement and expression switches alike
        "switch_expression" | "switch_statement" => NodeKind::Switch,
        "switch_block_statement_group" | "switch_rule" => NodeKind::SwitchSection,
        "ternary_expression" => NodeKind::Conditional,
        "for_statement" => NodeKind::For,
        "enhanced_for_statement" => NodeKind::ForEach,
        "while_statement" => NodeKind::While,
        "do_statement" => NodeKind::Do,
        "try_statement" | "try_with_resources_statement" => NodeKind::Try,
        "catch_clause" => NodeKind::CatchClause,
        "catch_formal_parameter" => NodeKind::CatchDeclaration,
        "break_statement" => NodeKind::Break,
        "continue_statement" => NodeKind::Continue,
        "parenthesized_expression" => NodeKind::Parenthesized,
        "lambda_expression" => NodeKind::Lambda,
        "binary_expression" => logical_operator_kind(node, source),
        _ => NodeKind::Other,
    }
}

fn map_ecma(node: &tree_sitter::Node<'_>, source: &[u8]) -> NodeKind {
    match node.kind() {
        "if_statement" => NodeKind::If,
        "switch_statement" => NodeKind::Switch,
        "switch_case" | "switch_default" => NodeKind::SwitchSection,
        "ternary_expression" => NodeKind::Conditional,
        "for_statement" => NodeKind::For,
        // covers both for-in and for-of
        "for_in_statement" => NodeKind::ForEach,
        "while_statement" => NodeKind::While,
        "do_statement" => NodeKind::Do,
        "try_statement" => NodeKind::Try,
        "catch_clause" => NodeKind::CatchClause,
        "break_statement" => NodeKind::Break,
        "continue_statement" => NodeKind::Continue,
        "parenthesized_expression" => NodeKind::Parenthesized,
        "arrow_function" => NodeKind::Lambda,
        "binary_expression" => logical_operator_kind(node, source),
        _ => {
            // The grammar has no node for the catch binding itself; the
            // clause's parameter plays that role.
            if is_catch_parameter(node) {
                NodeKind::CatchDeclaration
            } else {
                NodeKind::Other
            }
        }
    }
}

fn is_catch_parameter(node: &tree_sitter::Node<'_>) -> bool {
    node.parent().is_some_and(|parent| {
        parent.kind() == "catch_clause"
            && parent
                .child_by_field_name("parameter")
                .is_some_and(|param| param.id() == node.id())
    })
}

fn logical_operator_kind(node: &tree_sitter::Node<'_>, source: &[u8]) -> NodeKind {
    let operator = node
        .child_by_field_name("operator")
        .and_then(|op| op.utf8_text(source).ok());
    match operator {
        Some("&&") => NodeKind::LogicalAnd,
        Some("||") => NodeKind::LogicalOr,
        _ => NodeKind::Other,
    }
}
