use folcheck::core::ast::Span;
use folcheck::core::parser::Parser;
use folcheck::core::semantic_analyzer::{analyze, AnalysisError, Role, RoleMap};

fn roles(src: &str) -> RoleMap {
    let ast = Parser::new(src).parse().expect("parse");
    analyze(&ast).unwrap_or_else(|e| panic!("{src:?}: {e}"))
}

fn conflict(src: &str) -> AnalysisError {
    let ast = Parser::new(src).parse().expect("parse");
    analyze(&ast).expect_err("expected a role conflict")
}

#[test]
fn roles_of_a_first_order_formula() {
    let map = roles("∀x (P(x) → ∃y R(x, f(y, c)))");
    let described: Vec<(String, String)> =
        map.iter().map(|(k, v)| (k.clone(), v.to_string())).collect();
    assert_eq!(
        described,
        [
            ("P", "1-ary predicate"),
            ("R", "2-ary predicate"),
            ("c", "individual constant"),
            ("f", "2-ary function"),
            ("x", "bound variable"),
            ("y", "bound variable"),
        ]
        .map(|(k, v)| (k.to_string(), v.to_string()))
    );
}

#[test]
fn arity_conflict_is_reported_at_second_use() {
    let src = "P(a) ∧ P(a,b)";
    let err = conflict(src);
    assert_eq!(err.span, Span::new("P(a) ∧ ".len(), src.len()));
    assert!(err.message.contains("2-ary"), "{}", err.message);
    assert!(err.message.contains("1-ary"), "{}", err.message);
}

#[test]
fn bound_variable_cannot_be_applied() {
    let err = conflict("∀x x(a)");
    assert!(err.message.starts_with("Bound variable 'x'"), "{}", err.message);
    assert_eq!(err.span, Span::new("∀x ".len(), "∀x x(a)".len()));
}

#[test]
fn constant_and_applied_use_conflict() {
    let err = conflict("a ∨ a(b)");
    assert_eq!(err.span, Span::new("a ∨ ".len(), "a ∨ a(b)".len()));
    let err = conflict("P() ∧ P");
    assert!(err.message.contains("individual constant"), "{}", err.message);
}

#[test]
fn shadowing_is_scoped() {
    // Outside the quantifier `x` is a free constant again.
    let map = roles("(∀x P(x)) ∧ Q(x)");
    assert_eq!(map["x"], Role::IndividualConstant);
    assert_eq!(map["P"], Role::Predicate { arity: 1 });
}

#[test]
fn predicate_and_function_of_same_arity_agree() {
    let map = roles("f(a) ∧ P(f(a))");
    assert_eq!(map["f"].arity(), Some(1));
}

#[test]
fn each_analysis_starts_fresh() {
    let ast = Parser::new("P(a)").parse().unwrap();
    assert_eq!(analyze(&ast).unwrap(), analyze(&ast).unwrap());
    let other = Parser::new("P(a, b)").parse().unwrap();
    assert_eq!(analyze(&other).unwrap()["P"].arity(), Some(2));
}
