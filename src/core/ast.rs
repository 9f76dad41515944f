// src/core/ast.rs
//! Abstract Syntax Tree (AST) definitions for first-order formulas.
//!
//! Nodes are immutable once built. Height, degree and propositionality are
//! computed bottom-up in the constructors and stored on each node.

use crate::core::token::{BinaryOperator, Priority, Quantifier, UnaryOperator};

/// Half-open byte range into the normalized source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.start..self.end]
    }
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    Symbol {
        identifier: String,
    },
    UnaryFormula {
        operator: UnaryOperator,
        operand: Box<ASTNode>,
    },
    BinaryFormula {
        left: Box<ASTNode>,
        operator: BinaryOperator,
        right: Box<ASTNode>,
    },
    QuantifiedFormula {
        quantifier: Quantifier,
        variable: String,
        formula: Box<ASTNode>,
    },
    Call {
        identifier: String,
        args: Vec<ASTNode>,
    },
}

#[derive(Debug, Clone)]
pub struct ASTNode {
    pub kind: NodeKind,
    pub span: Span,
    height: usize,
    degree: usize,
    propositional: bool,
}

impl ASTNode {
    fn build(kind: NodeKind, span: Span) -> Self {
        let (height, degree, propositional) = match &kind {
            NodeKind::Symbol { .. } => (0, 0, true),
            NodeKind::UnaryFormula { operand, .. } => {
                (operand.height + 1, operand.degree, operand.propositional)
            }
            NodeKind::BinaryFormula { left, right, .. } => (
                left.height.max(right.height) + 1,
                left.degree + right.degree,
                left.propositional && right.propositional,
            ),
            NodeKind::QuantifiedFormula { variable, formula, .. } => {
                let effective = usize::from(formula.occurs_free(variable));
                (formula.height + 1, formula.degree + effective, false)
            }
            NodeKind::Call { args, .. } => (
                args.iter().map(|a| a.height).max().unwrap_or(0) + 1,
                args.iter().map(|a| a.degree).sum(),
                args.is_empty(),
            ),
        };
        ASTNode { kind, span, height, degree, propositional }
    }

    // Utility constructors
    pub fn new_symbol(identifier: &str, span: Span) -> Self {
        Self::build(NodeKind::Symbol { identifier: identifier.to_string() }, span)
    }
    pub fn new_unary(operator: UnaryOperator, operand: ASTNode, span: Span) -> Self {
        Self::build(NodeKind::UnaryFormula { operator, operand: Box::new(operand) }, span)
    }
    pub fn new_binary(left: ASTNode, operator: BinaryOperator, right: ASTNode, span: Span) -> Self {
        Self::build(
            NodeKind::BinaryFormula { left: Box::new(left), operator, right: Box::new(right) },
            span,
        )
    }
    pub fn new_quantified(quantifier: Quantifier, variable: &str, formula: ASTNode, span: Span) -> Self {
        Self::build(
            NodeKind::QuantifiedFormula {
                quantifier,
                variable: variable.to_string(),
                formula: Box::new(formula),
            },
            span,
        )
    }
    pub fn new_call(identifier: &str, args: Vec<ASTNode>, span: Span) -> Self {
        Self::build(NodeKind::Call { identifier: identifier.to_string(), args }, span)
    }

    /// Maximum nesting depth down to the deepest leaf.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of quantifiers whose variable actually occurs in their body.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// No quantifiers and no calls with arguments.
    pub fn is_propositional(&self) -> bool {
        self.propositional
    }

    pub fn priority(&self) -> Priority {
        match &self.kind {
            NodeKind::Symbol { .. } | NodeKind::Call { .. } => Priority::Atomic,
            NodeKind::UnaryFormula { .. } | NodeKind::QuantifiedFormula { .. } => Priority::Prefix,
            NodeKind::BinaryFormula { operator, .. } => operator.priority(),
        }
    }

    pub fn is_associative(&self) -> bool {
        match &self.kind {
            NodeKind::BinaryFormula { operator, .. } => operator.is_associative(),
            _ => false,
        }
    }

    /// True if `name` appears as a symbol not captured by an inner quantifier.
    pub fn occurs_free(&self, name: &str) -> bool {
        match &self.kind {
            NodeKind::Symbol { identifier } => identifier == name,
            NodeKind::UnaryFormula { operand, .. } => operand.occurs_free(name),
            NodeKind::BinaryFormula { left, right, .. } => {
                left.occurs_free(name) || right.occurs_free(name)
            }
            NodeKind::QuantifiedFormula { variable, formula, .. } => {
                variable != name && formula.occurs_free(name)
            }
            NodeKind::Call { args, .. } => args.iter().any(|a| a.occurs_free(name)),
        }
    }

    /// The text this node was parsed from.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        self.span.text(source)
    }
}

/// Equality is structural: spans are ignored.
impl PartialEq for ASTNode {
    fn eq(&self, other: &Self) -> bool {
        use NodeKind::*;
        match (&self.kind, &other.kind) {
            (Symbol { identifier: a }, Symbol { identifier: b }) => a == b,
            (
                UnaryFormula { operator: oa, operand: a },
                UnaryFormula { operator: ob, operand: b },
            ) => oa == ob && a == b,
            (
                BinaryFormula { left: la, operator: oa, right: ra },
                BinaryFormula { left: lb, operator: ob, right: rb },
            ) => oa == ob && la == lb && ra == rb,
            (
                QuantifiedFormula { quantifier: qa, variable: va, formula: fa },
                QuantifiedFormula { quantifier: qb, variable: vb, formula: fb },
            ) => qa == qb && va == vb && fa == fb,
            (Call { identifier: ia, args: aa }, Call { identifier: ib, args: ab }) => {
                ia == ib && aa == ab
            }
            _ => false,
        }
    }
}

impl Eq for ASTNode {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(name: &str) -> ASTNode {
        ASTNode::new_symbol(name, Span::default())
    }

    #[test]
    fn heights_follow_nesting() {
        let call = ASTNode::new_call("P", vec![sym("a"), ASTNode::new_call("f", vec![sym("b")], Span::default())], Span::default());
        assert_eq!(call.height(), 2);
        let not = ASTNode::new_unary(UnaryOperator::Not, call, Span::default());
        assert_eq!(not.height(), 3);
        assert_eq!(ASTNode::new_call("P", vec![], Span::default()).height(), 1);
        assert_eq!(sym("a").height(), 0);
    }

    #[test]
    fn vacuous_quantifier_has_no_degree() {
        let body = ASTNode::new_call("P", vec![sym("x")], Span::default());
        let effective = ASTNode::new_quantified(Quantifier::ForAll, "x", body.clone(), Span::default());
        let vacuous = ASTNode::new_quantified(Quantifier::Exists, "y", body, Span::default());
        assert_eq!(effective.degree(), 1);
        assert_eq!(vacuous.degree(), 0);
        let nested = ASTNode::new_quantified(Quantifier::Exists, "y", effective, Span::default());
        assert_eq!(nested.degree(), 1);
        assert!(!nested.is_propositional());
    }

    #[test]
    fn inner_quantifier_captures_its_variable() {
        let inner = ASTNode::new_quantified(Quantifier::Exists, "x", ASTNode::new_call("Q", vec![sym("x")], Span::default()), Span::default());
        assert!(!inner.occurs_free("x"));
        let outer = ASTNode::new_quantified(Quantifier::ForAll, "x", inner, Span::default());
        assert_eq!(outer.degree(), 1);
    }

    #[test]
    fn propositionality() {
        let ab = ASTNode::new_binary(sym("a"), BinaryOperator::And, sym("b"), Span::default());
        assert!(ab.is_propositional());
        assert!(ab.is_associative());
        assert_eq!(ab.priority(), Priority::AndOrXor);
        let call = ASTNode::new_call("P", vec![sym("a")], Span::default());
        assert!(!call.is_propositional());
        assert!(ASTNode::new_call("P", vec![], Span::default()).is_propositional());
    }

    #[test]
    fn equality_ignores_spans() {
        assert_eq!(ASTNode::new_symbol("a", Span::new(0, 1)), ASTNode::new_symbol("a", Span::new(4, 5)));
        assert_ne!(sym("a"), ASTNode::new_call("a", vec![], Span::default()));
    }
}
