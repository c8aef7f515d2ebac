//! Printer that serializes a syntax tree as indented labelled text.
//!
//! One node per line, four spaces of indentation per level.

use std::fmt;
use std::fmt::Write as _;

use crate::ast::{NodeId, SyntaxTree};

const INDENT: &str = "    ";

/// Render a syntax tree, starting with the `Program:` line.
///
/// Every line, the last included, ends with a newline.
#[must_use]
pub fn format(tree: &SyntaxTree) -> String {
    let mut out = String::new();
    format_node(&mut out, tree, tree.root(), 0);
    out
}

fn format_node(out: &mut String, tree: &SyntaxTree, id: NodeId, depth: usize) {
    let node = tree.node(id);

    out.push_str(&INDENT.repeat(depth));
    let _ = writeln!(out, "{}", node.kind);

    for &child in &node.children {
        format_node(out, tree, child, depth + 1);
    }
}

impl fmt::Display for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format(self))
    }
}
