//! Recursive-descent parser for first-order formulas with backtracking.
//!
//! One method per priority level, lowest first:
//!
//! ```text
//! formula        := impliesOrEquiv
//! impliesOrEquiv := andOrXor ( ("→"|"←"|"↔") andOrXor )*   one operator per chain
//! andOrXor       := not ( ("∧"|"∨"|"⊻") not )*              one operator per chain
//! not            := "¬" not | quantified
//! quantified     := ("∀"|"∃") identifier not | parenthesized
//! parenthesized  := "(" formula ")" | call
//! call           := identifier ( "(" formula ("," formula)* ")" )?
//! ```
//!
//! Every level returns `None` on failure with the cursor back where the
//! level started; the message is left on the cursor's error channel.

use crate::core::ast::{ASTNode, Span};
use crate::core::cursor::Cursor;
use crate::core::token::{
    first_starting, BinaryOperator, Quantifier, UnaryOperator, AND_OR_XOR_SPELLINGS,
    IMPLIES_OR_EQUIVALENCE_SPELLINGS, NOT_SPELLINGS, QUANTIFIER_SPELLINGS,
};
use unicode_ident::{is_xid_continue, is_xid_start};

pub const EXPECTED_FORMULA: &str = "Expected formula";
pub const EXPECTED_END_OF_INPUT: &str = "Expected end of input";
pub const EXPECTED_RIGHT_OPERAND: &str = "Expected right operand";
pub const EXPECTED_OPERAND: &str = "Expected operand";
pub const EXPECTED_CLOSING_PARENTHESIS: &str = "Expected closing parenthesis";
pub const EXPECTED_IDENTIFIER: &str = "Expected identifier";
pub const EXPECTED_VARIABLE: &str = "Expected variable";
pub const EXPECTED_CONSTANT_OR_VARIABLE: &str = "Expected constant or variable";
pub const NESTED_TOO_DEEPLY: &str = "Formula nested too deeply";

/// Upper bound on AST height and on parser recursion. Every consumer of the
/// tree (formatter, analyzer, evaluator, drop) recurses once per level.
pub const MAX_NESTING: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserError {
    pub message: String,
    /// Offset where correction should begin.
    pub position: usize,
    /// Length of the prefix that parsed successfully.
    pub consumed: usize,
}

impl std::fmt::Display for ParserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at offset {}", self.message, self.position)
    }
}

impl std::error::Error for ParserError {}

pub struct Parser {
    cursor: Cursor,
    depth: usize,
    /// Offset where the nesting bound was first hit during this parse.
    too_deep: Option<usize>,
}

impl Parser {
    /// Normalizes `input` to NFC; spans of the resulting AST index into
    /// [`Parser::source`].
    pub fn new(input: &str) -> Self {
        Parser { cursor: Cursor::new(input), depth: 0, too_deep: None }
    }

    pub fn source(&self) -> &str {
        self.cursor.source()
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Parses one formula spanning the whole input.
    pub fn parse(&mut self) -> Result<ASTNode, ParserError> {
        let start = self.cursor.position;
        self.depth = 0;
        self.too_deep = None;
        self.cursor.skip_whitespace();
        let formula = self.parse_formula();
        if let Some(position) = self.too_deep {
            self.cursor.position = position;
            self.fail(NESTED_TOO_DEEPLY);
            self.cursor.position = start;
            return Err(self.error(start));
        }
        let Some(formula) = formula else {
            self.fail(EXPECTED_FORMULA);
            self.cursor.position = start;
            return Err(self.error(start));
        };
        self.cursor.skip_whitespace();
        if !self.cursor.is_at_end() {
            self.fail(EXPECTED_END_OF_INPUT);
            self.cursor.position = start;
            return Err(self.error(formula.span.end));
        }
        Ok(formula)
    }

    fn parse_formula(&mut self) -> Option<ASTNode> {
        let formula = self.nested(Self::parse_implies_or_equivalence);
        if formula.is_none() {
            self.fail(EXPECTED_FORMULA);
        }
        formula
    }

    fn parse_implies_or_equivalence(&mut self) -> Option<ASTNode> {
        let start = self.cursor.position;
        let mut formula = self.parse_and_or_xor()?;

        let position = self.cursor.position;
        self.cursor.skip_whitespace();
        let peek = first_starting(self.cursor.peek(3), IMPLIES_OR_EQUIVALENCE_SPELLINGS);
        self.cursor.position = position;
        let Some(operator) = peek.and_then(BinaryOperator::from_spelling) else {
            return Some(formula);
        };

        loop {
            let position = self.cursor.position;
            self.cursor.skip_whitespace();
            let Some(spelling) = first_starting(self.cursor.peek(3), operator.spellings()) else {
                self.cursor.position = position;
                break;
            };
            self.cursor.advance(spelling.chars().count());
            self.cursor.skip_whitespace();
            match self.parse_and_or_xor() {
                Some(right) => {
                    let span = Span::new(start, self.cursor.position);
                    let Some(node) = self.bounded(ASTNode::new_binary(formula, operator, right, span))
                    else {
                        self.cursor.position = start;
                        return None;
                    };
                    formula = node;
                }
                None => {
                    self.fail(EXPECTED_RIGHT_OPERAND);
                    self.cursor.position = position;
                    break;
                }
            }
        }
        Some(formula)
    }

    fn parse_and_or_xor(&mut self) -> Option<ASTNode> {
        let start = self.cursor.position;
        let mut formula = self.parse_not()?;

        let position = self.cursor.position;
        self.cursor.skip_whitespace();
        let peek = first_starting(self.cursor.peek(1), AND_OR_XOR_SPELLINGS);
        self.cursor.position = position;
        let Some(operator) = peek.and_then(BinaryOperator::from_spelling) else {
            return Some(formula);
        };

        loop {
            let position = self.cursor.position;
            self.cursor.skip_whitespace();
            if first_starting(self.cursor.peek(1), operator.spellings()).is_none() {
                self.cursor.position = position;
                break;
            }
            self.cursor.advance(1);
            self.cursor.skip_whitespace();
            match self.parse_not() {
                Some(right) => {
                    let span = Span::new(start, self.cursor.position);
                    let Some(node) = self.bounded(ASTNode::new_binary(formula, operator, right, span))
                    else {
                        self.cursor.position = start;
                        return None;
                    };
                    formula = node;
                }
                None => {
                    self.fail(EXPECTED_RIGHT_OPERAND);
                    self.cursor.position = position;
                    break;
                }
            }
        }
        Some(formula)
    }

    fn parse_not(&mut self) -> Option<ASTNode> {
        if first_starting(self.cursor.peek(1), NOT_SPELLINGS).is_none() {
            return self.parse_quantified();
        }
        let start = self.cursor.position;
        self.cursor.advance(1);
        self.cursor.skip_whitespace();
        let Some(operand) = self.nested(Self::parse_not) else {
            self.fail(EXPECTED_OPERAND);
            self.cursor.position = start;
            return None;
        };
        let span = Span::new(start, self.cursor.position);
        let node = self.bounded(ASTNode::new_unary(UnaryOperator::Not, operand, span));
        if node.is_none() {
            self.cursor.position = start;
        }
        node
    }

    fn parse_quantified(&mut self) -> Option<ASTNode> {
        let Some((quantifier, length)) = first_starting(self.cursor.peek(2), QUANTIFIER_SPELLINGS)
            .and_then(|s| Quantifier::from_spelling(s).map(|q| (q, s.chars().count())))
        else {
            return self.parse_parenthesized();
        };
        let start = self.cursor.position;
        self.cursor.advance(length);
        self.cursor.skip_whitespace();
        let Some(variable) = self.parse_identifier() else {
            self.fail(EXPECTED_VARIABLE);
            self.cursor.position = start;
            return None;
        };
        self.cursor.skip_whitespace();
        let Some(formula) = self.nested(Self::parse_not) else {
            self.fail(EXPECTED_FORMULA);
            self.cursor.position = start;
            return None;
        };
        let span = Span::new(start, self.cursor.position);
        let node = self.bounded(ASTNode::new_quantified(quantifier, &variable, formula, span));
        if node.is_none() {
            self.cursor.position = start;
        }
        node
    }

    /// A failed group falls back to call parsing from the same position.
    fn parse_parenthesized(&mut self) -> Option<ASTNode> {
        if self.cursor.peek(1) != "(" {
            return self.parse_call();
        }
        let start = self.cursor.position;
        self.cursor.advance(1);
        self.cursor.skip_whitespace();
        let Some(formula) = self.parse_formula() else {
            self.fail(EXPECTED_FORMULA);
            self.cursor.position = start;
            return self.parse_call();
        };
        self.cursor.skip_whitespace();
        if self.cursor.peek(1) != ")" {
            self.fail(EXPECTED_CLOSING_PARENTHESIS);
            self.cursor.position = start;
            return self.parse_call();
        }
        self.cursor.advance(1);
        Some(formula)
    }

    /// A malformed argument list leaves the identifier as a bare symbol.
    fn parse_call(&mut self) -> Option<ASTNode> {
        let start = self.cursor.position;
        let Some(identifier) = self.parse_identifier() else {
            self.fail(EXPECTED_CONSTANT_OR_VARIABLE);
            return None;
        };
        let after_identifier = self.cursor.position;
        let symbol = |s: &str| ASTNode::new_symbol(s, Span::new(start, after_identifier));

        self.cursor.skip_whitespace();
        if self.cursor.peek(1) != "(" {
            self.cursor.position = after_identifier;
            return Some(symbol(&identifier));
        }
        self.cursor.advance(1);
        self.cursor.skip_whitespace();

        let mut args = Vec::new();
        if let Some(arg) = self.parse_formula() {
            args.push(arg);
            self.cursor.skip_whitespace();
            while self.cursor.peek(1) == "," {
                self.cursor.advance(1);
                self.cursor.skip_whitespace();
                let Some(arg) = self.parse_formula() else {
                    self.fail(EXPECTED_FORMULA);
                    self.cursor.position = after_identifier;
                    return Some(symbol(&identifier));
                };
                args.push(arg);
                self.cursor.skip_whitespace();
            }
        }
        if self.cursor.peek(1) != ")" {
            self.fail(EXPECTED_CLOSING_PARENTHESIS);
            self.cursor.position = after_identifier;
            return Some(symbol(&identifier));
        }
        self.cursor.advance(1);
        let span = Span::new(start, self.cursor.position);
        let node = self.bounded(ASTNode::new_call(&identifier, args, span));
        if node.is_none() {
            self.cursor.position = start;
        }
        node
    }

    fn parse_identifier(&mut self) -> Option<String> {
        if !self.cursor.peek(1).chars().next().is_some_and(is_identifier_start) {
            self.fail(EXPECTED_IDENTIFIER);
            return None;
        }
        let start = self.cursor.position;
        self.cursor.advance(1);
        while self.cursor.peek(1).chars().next().is_some_and(is_identifier_continue) {
            self.cursor.advance(1);
        }
        Some(self.cursor.source()[start..self.cursor.position].to_string())
    }

    /// Runs one nested level, refusing to go deeper than [`MAX_NESTING`].
    fn nested(&mut self, level: fn(&mut Self) -> Option<ASTNode>) -> Option<ASTNode> {
        if self.depth >= MAX_NESTING {
            self.too_deep.get_or_insert(self.cursor.position);
            return None;
        }
        self.depth += 1;
        let node = level(self);
        self.depth -= 1;
        node
    }

    fn bounded(&mut self, node: ASTNode) -> Option<ASTNode> {
        if node.height() > MAX_NESTING {
            self.too_deep.get_or_insert(node.span.start);
            return None;
        }
        Some(node)
    }

    fn fail(&mut self, message: &str) {
        crate::debug_log!("parse: {} at {}", message, self.cursor.position);
        self.cursor.fail(message);
    }

    fn error(&self, consumed: usize) -> ParserError {
        ParserError {
            message: self.cursor.error().unwrap_or(EXPECTED_FORMULA).to_string(),
            position: self.cursor.error_position(),
            consumed,
        }
    }
}

pub fn is_identifier_start(ch: char) -> bool {
    matches!(ch, '_' | '‿' | '⁀' | '⁔') || is_xid_start(ch)
}

pub fn is_identifier_continue(ch: char) -> bool {
    ch == '_' || is_xid_continue(ch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ast::NodeKind;

    fn parse(src: &str) -> ASTNode {
        Parser::new(src).parse().expect("parse")
    }

    #[test]
    fn identifier_runs_are_maximal() {
        let ast = parse("αβ12");
        assert!(matches!(&ast.kind, NodeKind::Symbol { identifier } if identifier == "αβ12"));
        assert_eq!(ast.span, Span::new(0, "αβ12".len()));
    }

    #[test]
    fn identifiers_reject_digits_and_operators() {
        assert!(!is_identifier_start('1'));
        assert!(!is_identifier_start('∧'));
        assert!(is_identifier_continue('1'));
        assert!(is_identifier_continue('\u{301}'));
    }

    #[test]
    fn negation_stacks_right_recursively() {
        let ast = parse("¬!~a");
        assert_eq!(ast.height(), 3);
        assert_eq!(ast.span, Span::new(0, ast.span.end));
        match &ast.kind {
            NodeKind::UnaryFormula { operand, .. } => {
                assert!(matches!(operand.kind, NodeKind::UnaryFormula { .. }))
            }
            other => panic!("expected unary, got {other:?}"),
        }
    }

    #[test]
    fn quantifier_body_binds_tighter_than_and() {
        let ast = parse("∀x P(x) ∧ Q");
        match &ast.kind {
            NodeKind::BinaryFormula { left, operator, .. } => {
                assert_eq!(*operator, BinaryOperator::And);
                assert!(matches!(left.kind, NodeKind::QuantifiedFormula { .. }));
            }
            other => panic!("expected binary, got {other:?}"),
        }
    }

    #[test]
    fn ascii_quantifiers() {
        assert_eq!(parse("\\Ax \\ey P(x,y)"), parse("∀x ∃y P(x, y)"));
    }

    #[test]
    fn empty_argument_list_is_a_call() {
        let ast = parse("P()");
        assert!(matches!(&ast.kind, NodeKind::Call { args, .. } if args.is_empty()));
    }

    #[test]
    fn unclosed_group_rewinds_to_start() {
        let err = Parser::new("(a ∧ b").parse().unwrap_err();
        assert_eq!(err.message, EXPECTED_FORMULA);
        assert_eq!(err.position, 0);
        assert_eq!(err.consumed, 0);
    }

    #[test]
    fn dangling_argument_list_falls_back_to_symbol() {
        let err = Parser::new("P(a,").parse().unwrap_err();
        assert_eq!(err.message, EXPECTED_END_OF_INPUT);
        assert_eq!(err.position, 1);
        assert_eq!(err.consumed, 1);
    }

    #[test]
    fn missing_right_operand_stops_the_chain() {
        let err = Parser::new("a ∧ ").parse().unwrap_err();
        assert_eq!(err.message, EXPECTED_END_OF_INPUT);
        assert_eq!(err.position, 2);
        assert_eq!(err.consumed, 1);
    }

    #[test]
    fn quantifier_without_variable_fails() {
        let err = Parser::new("∀ (P)").parse().unwrap_err();
        assert_eq!(err.message, EXPECTED_FORMULA);
        assert_eq!(err.position, 0);
    }

    #[test]
    fn nesting_is_bounded() {
        let ok = format!("{}a", "¬".repeat(MAX_NESTING - 1));
        assert_eq!(parse(&ok).height(), MAX_NESTING - 1);

        let deep = [
            format!("{}a", "¬".repeat(100_000)),
            format!("{}a{}", "(".repeat(100_000), ")".repeat(100_000)),
            vec!["a"; 100_000].join(" ∧ "),
            format!("{}a{}", "P(".repeat(10_000), ")".repeat(10_000)),
        ];
        for src in &deep {
            let mut p = Parser::new(src);
            let err = p.parse().unwrap_err();
            assert_eq!(err.message, NESTED_TOO_DEEPLY);
            assert_eq!(err.consumed, 0);
            assert_eq!(p.cursor().position, 0);
        }
    }

    #[test]
    fn failed_parse_restores_cursor() {
        let mut p = Parser::new("  a b");
        assert!(p.parse().is_err());
        assert_eq!(p.cursor().position, 0);
        assert_eq!(p.cursor().error(), Some(EXPECTED_END_OF_INPUT));
        assert_eq!(p.cursor().error_position(), 4);
    }
}
