//! Structural tests on parsed syntax trees.

mod common;

use common::parse_ok;
use decaf_parser::{ArithmeticOp, NodeKind, RelationalOp};

const SAMPLE: &str = "\
int limit;
int clamp(int v, int hi) {
\tif >= v hi {
\t\treturn hi;
\t} else {
\t\treturn v;
\t}
}
void main() {
\tlimit = + 1 2;
\tPrint clamp;
}
";

#[test]
fn root_is_program() {
    let tree = parse_ok(SAMPLE);
    assert_eq!(*tree.kind(tree.root()), NodeKind::Program);
    assert_eq!(tree.children(tree.root()).len(), 3);
}

#[test]
fn every_non_root_node_has_exactly_one_parent() {
    let tree = parse_ok(SAMPLE);
    let mut owners = vec![0usize; tree.len()];
    for (_, node) in &tree {
        for child in &node.children {
            owners[child.index()] += 1;
        }
    }
    for (index, count) in owners.iter().enumerate() {
        if index == tree.root().index() {
            assert_eq!(*count, 0, "root must have no parent");
        } else {
            assert_eq!(*count, 1, "node {index} must have one parent");
        }
    }
}

#[test]
fn preorder_reaches_every_node() {
    let tree = parse_ok(SAMPLE);
    assert_eq!(tree.iter().count(), tree.len());
}

#[test]
fn children_are_allocated_before_parents() {
    let tree = parse_ok(SAMPLE);
    for (id, node) in &tree {
        for child in &node.children {
            assert!(child.index() < id.index());
        }
    }
}

#[test]
fn binary_operators_have_two_children() {
    let tree = parse_ok(SAMPLE);
    for (_, node) in &tree {
        match node.kind {
            NodeKind::ArithmeticExpr(_) | NodeKind::RelationalExpr(_) | NodeKind::AssignExpr => {
                assert_eq!(node.children.len(), 2);
            }
            NodeKind::FieldAccess(_) | NodeKind::Parameter { .. } | NodeKind::Declaration { .. } => {
                assert!(node.children.is_empty());
            }
            _ => {}
        }
    }
}

#[test]
fn operators_are_typed() {
    let tree = parse_ok(SAMPLE);
    let kinds: Vec<_> = tree.iter().map(|(_, n)| n.kind.clone()).collect();
    assert!(kinds.contains(&NodeKind::RelationalExpr(RelationalOp::GreaterEqual)));
    assert!(kinds.contains(&NodeKind::ArithmeticExpr(ArithmeticOp::Add)));
}

#[test]
fn get_rejects_out_of_range_ids() {
    let small = parse_ok("int x;");
    let large = parse_ok(SAMPLE);
    let (last, _) = large.iter().last().expect("non-empty tree");
    assert!(large.get(last).is_some());
    assert!(small.get(large.root()).is_none());
}
