//! Truth-table evaluation of propositional formulas.
//!
//! Terms are the distinct atom identifiers in first-encountered pre-order;
//! that order is the column order of the table, first term most significant.

use crate::core::ast::{ASTNode, NodeKind};
use serde::Serialize;

/// Distinct atom identifiers in pre-order, without duplicates.
pub fn collect_terms(formula: &ASTNode) -> Vec<String> {
    let mut terms = Vec::new();
    collect(formula, &mut terms);
    terms
}

fn collect(node: &ASTNode, terms: &mut Vec<String>) {
    match &node.kind {
        NodeKind::Symbol { identifier } | NodeKind::Call { identifier, .. } => {
            if !terms.iter().any(|t| t == identifier) {
                terms.push(identifier.clone());
            }
        }
        NodeKind::UnaryFormula { operand, .. } => collect(operand, terms),
        NodeKind::BinaryFormula { left, right, .. } => {
            collect(left, terms);
            collect(right, terms);
        }
        NodeKind::QuantifiedFormula { formula, .. } => collect(formula, terms),
    }
}

/// Evaluates `formula` with `values[i]` assigned to `terms[i]`.
///
/// # Panics
/// If the lengths differ, an atom is missing from `terms`, or the formula is
/// not propositional.
pub fn evaluate(formula: &ASTNode, terms: &[String], values: &[bool]) -> bool {
    assert_eq!(terms.len(), values.len(), "one value per term");
    eval(formula, terms, values)
}

fn eval(node: &ASTNode, terms: &[String], values: &[bool]) -> bool {
    match &node.kind {
        NodeKind::Symbol { identifier } => lookup(identifier, terms, values),
        NodeKind::Call { identifier, args } if args.is_empty() => lookup(identifier, terms, values),
        NodeKind::UnaryFormula { operand, .. } => !eval(operand, terms, values),
        NodeKind::BinaryFormula { left, operator, right } => {
            operator.apply(eval(left, terms, values), eval(right, terms, values))
        }
        NodeKind::Call { .. } | NodeKind::QuantifiedFormula { .. } => {
            panic!("cannot evaluate a non-propositional formula")
        }
    }
}

fn lookup(identifier: &str, terms: &[String], values: &[bool]) -> bool {
    match terms.iter().position(|t| t == identifier) {
        Some(i) => values[i],
        None => panic!("no value assigned to '{identifier}'"),
    }
}

/// Big-endian increment: the rightmost `false` becomes `true` and everything
/// right of it resets. Returns `false` once all values were `true`.
pub fn next_binary(values: &mut [bool]) -> bool {
    match values.iter().rposition(|v| !v) {
        Some(i) => {
            values[i] = true;
            values[i + 1..].iter_mut().for_each(|v| *v = false);
            true
        }
        None => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub values: Vec<bool>,
    pub result: bool,
}

pub struct TruthTable<'a> {
    formula: &'a ASTNode,
    terms: Vec<String>,
}

impl<'a> TruthTable<'a> {
    /// `None` unless the formula is propositional.
    pub fn new(formula: &'a ASTNode) -> Option<Self> {
        if !formula.is_propositional() {
            return None;
        }
        let terms = collect_terms(formula);
        crate::debug_log!("table: {} terms, 2^{} rows", terms.len(), terms.len());
        Some(Self { formula, terms })
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// All 2^n rows from all-false to all-true.
    pub fn rows(&self) -> Rows<'_> {
        Rows { table: self, next: Some(vec![false; self.terms.len()]) }
    }
}

pub struct Rows<'t> {
    table: &'t TruthTable<'t>,
    next: Option<Vec<bool>>,
}

impl Iterator for Rows<'_> {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        let values = self.next.take()?;
        let result = evaluate(self.table.formula, &self.table.terms, &values);
        let mut successor = values.clone();
        if next_binary(&mut successor) {
            self.next = Some(successor);
        }
        Some(Row { values, result })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parser::Parser;

    fn table(src: &str) -> (Vec<String>, Vec<Row>) {
        let ast = Parser::new(src).parse().expect("parse");
        let table = TruthTable::new(&ast).expect("propositional");
        (table.terms().to_vec(), table.rows().collect())
    }

    #[test]
    fn terms_are_unique_in_first_seen_order() {
        let ast = Parser::new("(b ∧ a) ∨ ¬b → c").parse().unwrap();
        assert_eq!(collect_terms(&ast), vec!["b", "a", "c"]);
    }

    #[test]
    fn counter_walks_big_endian() {
        let mut v = vec![false, true, true];
        assert!(next_binary(&mut v));
        assert_eq!(v, vec![true, false, false]);
        let mut v = vec![true, true];
        assert!(!next_binary(&mut v));
        assert!(!next_binary(&mut []));
    }

    #[test]
    fn implication_is_false_only_when_antecedent_holds() {
        let (_, rows) = table("a → b");
        let results: Vec<bool> = rows.iter().map(|r| r.result).collect();
        assert_eq!(results, vec![true, true, false, true]);
    }

    #[test]
    fn converse_implication() {
        let (_, rows) = table("a ← b");
        let results: Vec<bool> = rows.iter().map(|r| r.result).collect();
        assert_eq!(results, vec![true, false, true, true]);
    }

    #[test]
    fn xor_and_equivalence() {
        let (_, rows) = table("a ⊻ b");
        assert_eq!(rows.iter().map(|r| r.result).collect::<Vec<_>>(), vec![false, true, true, false]);
        let (_, rows) = table("a <-> b");
        assert_eq!(rows.iter().map(|r| r.result).collect::<Vec<_>>(), vec![true, false, false, true]);
    }

    #[test]
    fn row_count_is_two_to_the_terms() {
        let (terms, rows) = table("a ∧ b ∧ c ∧ a");
        assert_eq!(terms.len(), 3);
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[5].values, vec![true, false, true]);
    }

    #[test]
    fn empty_call_is_an_atom() {
        let (terms, rows) = table("P() ∨ ¬P()");
        assert_eq!(terms, vec!["P"]);
        assert!(rows.iter().all(|r| r.result));
    }

    #[test]
    fn quantified_formulas_have_no_table() {
        let ast = Parser::new("∀x P(x)").parse().unwrap();
        assert!(TruthTable::new(&ast).is_none());
        let ast = Parser::new("P(a)").parse().unwrap();
        assert!(TruthTable::new(&ast).is_none());
    }

    #[test]
    #[should_panic(expected = "one value per term")]
    fn mismatched_assignment_fails_fast() {
        let ast = Parser::new("a ∧ b").parse().unwrap();
        evaluate(&ast, &["a".to_string(), "b".to_string()], &[true]);
    }
}
