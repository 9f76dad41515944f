// src/core/semantic_analyzer.rs
//! Identifier role analysis:
//! - Bare symbols outside a binding quantifier are individual constants
//! - Applied identifiers are predicates (formula position) or functions
//!   (argument position), tracked by arity
//! - Quantified variables shadow outer bindings for their body only and may
//!   never be applied
//!
//! The first conflict in a pre-order, left-to-right walk is reported at the
//! span of the offending occurrence.

use crate::core::ast::{ASTNode, NodeKind, Span};
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    IndividualConstant,
    Predicate { arity: usize },
    Function { arity: usize },
    BoundVariable,
}

impl Role {
    /// Number of arguments for applied identifiers.
    pub fn arity(&self) -> Option<usize> {
        match self {
            Role::Predicate { arity } | Role::Function { arity } => Some(*arity),
            Role::IndividualConstant | Role::BoundVariable => None,
        }
    }

    /// Same identifier usage up to the predicate/function label.
    fn agrees_with(&self, other: &Role) -> bool {
        match (self, other) {
            (Role::IndividualConstant, Role::IndividualConstant) => true,
            (Role::BoundVariable, Role::BoundVariable) => true,
            _ => self.arity().is_some() && self.arity() == other.arity(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::IndividualConstant => write!(f, "individual constant"),
            Role::Predicate { arity } => write!(f, "{arity}-ary predicate"),
            Role::Function { arity } => write!(f, "{arity}-ary function"),
            Role::BoundVariable => write!(f, "bound variable"),
        }
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

pub type RoleMap = BTreeMap<String, Role>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisError {
    pub message: String,
    pub span: Span,
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}..{}", self.message, self.span.start, self.span.end)
    }
}

impl std::error::Error for AnalysisError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    Formula,
    Term,
}

#[derive(Default)]
pub struct SemanticAnalyzer {
    bound: Vec<String>,
    free: BTreeMap<String, Role>,
    variables: BTreeSet<String>,
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the analyzer; every call starts from an empty role map.
    pub fn analyze(mut self, ast: &ASTNode) -> Result<RoleMap, AnalysisError> {
        self.visit(ast, Position::Formula)?;
        let mut roles = self.free;
        for variable in self.variables {
            roles.entry(variable).or_insert(Role::BoundVariable);
        }
        Ok(roles)
    }

    fn visit(&mut self, node: &ASTNode, position: Position) -> Result<(), AnalysisError> {
        match &node.kind {
            NodeKind::Symbol { identifier } => {
                if !self.is_bound(identifier) {
                    self.record(identifier, Role::IndividualConstant, node.span)?;
                }
                Ok(())
            }
            NodeKind::Call { identifier, args } => {
                let arity = args.len();
                let role = match position {
                    Position::Formula => Role::Predicate { arity },
                    Position::Term => Role::Function { arity },
                };
                if self.is_bound(identifier) {
                    return Err(AnalysisError {
                        message: format!("Bound variable '{identifier}' cannot be used as a {role}"),
                        span: node.span,
                    });
                }
                self.record(identifier, role, node.span)?;
                for arg in args {
                    self.visit(arg, Position::Term)?;
                }
                Ok(())
            }
            NodeKind::UnaryFormula { operand, .. } => self.visit(operand, Position::Formula),
            NodeKind::BinaryFormula { left, right, .. } => {
                self.visit(left, Position::Formula)?;
                self.visit(right, Position::Formula)
            }
            NodeKind::QuantifiedFormula { variable, formula, .. } => {
                self.variables.insert(variable.clone());
                self.bound.push(variable.clone());
                let result = self.visit(formula, Position::Formula);
                self.bound.pop();
                result
            }
        }
    }

    fn is_bound(&self, identifier: &str) -> bool {
        self.bound.iter().any(|v| v == identifier)
    }

    fn record(&mut self, identifier: &str, role: Role, span: Span) -> Result<(), AnalysisError> {
        match self.free.get(identifier) {
            Some(previous) if !previous.agrees_with(&role) => Err(AnalysisError {
                message: format!(
                    "'{identifier}' is used as a {role} but was previously used as a {previous}"
                ),
                span,
            }),
            Some(_) => Ok(()),
            None => {
                crate::debug_log!("sema: '{}' is a {}", identifier, role);
                self.free.insert(identifier.to_string(), role);
                Ok(())
            }
        }
    }
}

/// Runs a fresh [`SemanticAnalyzer`] over `ast`.
pub fn analyze(ast: &ASTNode) -> Result<RoleMap, AnalysisError> {
    SemanticAnalyzer::new().analyze(ast)
}
