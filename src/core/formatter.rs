//! Canonical plain-text rendering of formulas.
//!
//! Design notes:
//! - Operators always render as their Unicode glyph.
//! - Parentheses appear only where the parser needs them: a left operand of
//!   equal priority stays bare when it continues the same chain, a right
//!   operand of equal or lower priority is always wrapped.
//! - Re-parsing the output yields a structurally equal AST.

use std::fmt;

use crate::core::ast::{ASTNode, NodeKind};

pub fn format_formula(node: &ASTNode) -> String {
    node.to_string()
}

impl fmt::Display for ASTNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, self)
    }
}

fn write_node<W: fmt::Write>(out: &mut W, node: &ASTNode) -> fmt::Result {
    match &node.kind {
        NodeKind::Symbol { identifier } => out.write_str(identifier),
        NodeKind::UnaryFormula { operator, operand } => {
            out.write_str(operator.glyph())?;
            write_child(out, operand, operand.priority() < node.priority())
        }
        NodeKind::BinaryFormula { left, operator, right } => {
            let priority = node.priority();
            let continues_chain = matches!(
                &left.kind,
                NodeKind::BinaryFormula { operator: inner, .. } if inner == operator
            );
            let wrap_left = left.priority() < priority
                || (left.priority() == priority && !continues_chain);
            write_child(out, left, wrap_left)?;
            write!(out, " {operator} ")?;
            write_child(out, right, right.priority() <= priority)
        }
        NodeKind::QuantifiedFormula { quantifier, variable, formula } => {
            write!(out, "{quantifier}{variable}")?;
            if formula.priority() < node.priority() {
                write_child(out, formula, true)
            } else {
                out.write_char(' ')?;
                write_node(out, formula)
            }
        }
        NodeKind::Call { identifier, args } => {
            write!(out, "{identifier}(")?;
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    out.write_str(", ")?;
                }
                write_node(out, arg)?;
            }
            out.write_char(')')
        }
    }
}

fn write_child<W: fmt::Write>(out: &mut W, child: &ASTNode, wrap: bool) -> fmt::Result {
    if wrap {
        out.write_char('(')?;
        write_node(out, child)?;
        out.write_char(')')
    } else {
        write_node(out, child)
    }
}
