use folcheck::core::evaluator::{collect_terms, evaluate, Row, TruthTable};
use folcheck::core::parser::Parser;
use folcheck::core::report::TableReport;

fn rows(src: &str) -> (Vec<String>, Vec<Row>) {
    let ast = Parser::new(src).parse().expect("parse");
    let table = TruthTable::new(&ast).expect("propositional");
    (table.terms().to_vec(), table.rows().collect())
}

fn results(rows: &[Row]) -> Vec<bool> {
    rows.iter().map(|r| r.result).collect()
}

#[test]
fn conjunction_rows_in_binary_order() {
    let (terms, conjunction) = rows("a ∧ b");
    assert_eq!(terms, ["a", "b"]);
    let values: Vec<Vec<bool>> = conjunction.iter().map(|r| r.values.clone()).collect();
    assert_eq!(
        values,
        [[false, false], [false, true], [true, false], [true, true]].map(Vec::from)
    );
    assert_eq!(results(&conjunction), [false, false, false, true]);
}

#[test]
fn implication_is_false_only_for_true_then_false() {
    let (_, implies) = rows("a → b");
    assert_eq!(results(&implies), [true, true, false, true]);
    let (_, implied_by) = rows("a ← b");
    assert_eq!(results(&implied_by), [true, false, true, true]);
}

#[test]
fn xor_and_equivalence_chains() {
    let (_, xor) = rows("a ⊻ b ⊻ c");
    assert_eq!(results(&xor), [false, true, true, false, true, false, false, true]);
    let (_, equivalence) = rows("a ↔ b");
    assert_eq!(results(&equivalence), [true, false, false, true]);
}

#[test]
fn terms_are_distinct_in_first_seen_order() {
    let ast = Parser::new("b ∧ (a ∨ ¬b) → P()").parse().unwrap();
    assert_eq!(collect_terms(&ast), ["b", "a", "P"]);
    let terms = collect_terms(&ast);
    assert!(evaluate(&ast, &terms, &[false, false, false]));
    assert!(!evaluate(&ast, &terms, &[true, true, false]));
}

#[test]
fn quantified_formulas_have_no_table() {
    let ast = Parser::new("∀x P(x)").parse().unwrap();
    assert!(TruthTable::new(&ast).is_none());
    let ast = Parser::new("P(a) ∨ b").parse().unwrap();
    assert!(TruthTable::new(&ast).is_none());
}

#[test]
#[should_panic(expected = "one value per term")]
fn wrong_assignment_length_panics() {
    let ast = Parser::new("a ∧ b").parse().unwrap();
    evaluate(&ast, &collect_terms(&ast), &[true]);
}

#[test]
fn rendered_table_uses_truth_glyphs() {
    let ast = Parser::new("a ∧ b").parse().unwrap();
    let table = TruthTable::new(&ast).unwrap();
    let rendered = TableReport::new(&table).render("a ∧ b", ("𝕋", "𝔽"));
    insta::assert_snapshot!(rendered, @r"
    a b │ a ∧ b
    𝔽 𝔽 │ 𝔽
    𝔽 𝕋 │ 𝔽
    𝕋 𝔽 │ 𝔽
    𝕋 𝕋 │ 𝕋
    ");
}
