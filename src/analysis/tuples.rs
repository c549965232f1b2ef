// src/analysis/tuples.rs
//! Collects one observation per tuple type in a syntax tree.

use crate::syntax::SyntaxNode;
use crate::types::SourcePosition;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TupleObservation {
    pub position: SourcePosition,
    pub member_count: usize,
    pub labeled_member_count: usize,
}

impl TupleObservation {
    #[must_use]
    pub fn is_fully_labeled(&self) -> bool {
        self.labeled_member_count == self.member_count
    }
}

/// Walks the whole tree once, outer tuples before the tuples nested in them.
#[must_use]
pub fn scan_tuples(root: &SyntaxNode) -> Vec<TupleObservation> {
    let mut out = Vec::new();
    visit(root, &mut out);
    out
}

fn visit(node: &SyntaxNode, out: &mut Vec<TupleObservation>) {
    if let SyntaxNode::TupleType(tuple) = node {
        out.push(TupleObservation {
            position: node.position(),
            member_count: tuple.elements.len(),
            labeled_member_count: tuple.elements.iter().filter(|e| e.is_labeled()).count(),
        });
    }
    for child in node.children() {
        visit(child, out);
    }
}
