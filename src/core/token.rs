// src/core/token.rs
//! Operator glyphs of the formula notation.
//!
//! Every operator has one canonical Unicode glyph (used when building nodes
//! and when rendering) and a list of accepted spellings. Spellings are
//! ordered longest first so that prefix matching picks `<->` over `<-`.

use std::fmt;

/// Binding strength of a node, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    ImpliesOrEquivalence,
    AndOrXor,
    Prefix,
    Atomic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Not, // ¬
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    And,         // ∧
    Or,          // ∨
    Xor,         // ⊻
    Implies,     // →
    ImpliedBy,   // ←
    Equivalence, // ↔
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantifier {
    ForAll, // ∀
    Exists, // ∃
}

pub const NOT_SPELLINGS: &[&str] = &["¬", "!", "~"];
pub const QUANTIFIER_SPELLINGS: &[&str] = &["∀", "∃", "\\A", "\\a", "\\E", "\\e"];
pub const IMPLIES_OR_EQUIVALENCE_SPELLINGS: &[&str] = &["<->", "<-", "->", "→", "←", "↔"];
pub const AND_OR_XOR_SPELLINGS: &[&str] = &["∧", "&", "∨", "|", "⊻", "^"];

impl UnaryOperator {
    pub fn glyph(self) -> &'static str {
        match self {
            UnaryOperator::Not => "¬",
        }
    }
}

impl BinaryOperator {
    pub fn glyph(self) -> &'static str {
        match self {
            BinaryOperator::And => "∧",
            BinaryOperator::Or => "∨",
            BinaryOperator::Xor => "⊻",
            BinaryOperator::Implies => "→",
            BinaryOperator::ImpliedBy => "←",
            BinaryOperator::Equivalence => "↔",
        }
    }

    /// All spellings that continue a chain of this operator.
    pub fn spellings(self) -> &'static [&'static str] {
        match self {
            BinaryOperator::And => &["∧", "&"],
            BinaryOperator::Or => &["∨", "|"],
            BinaryOperator::Xor => &["⊻", "^"],
            BinaryOperator::Implies => &["->", "→"],
            BinaryOperator::ImpliedBy => &["<-", "←"],
            BinaryOperator::Equivalence => &["<->", "↔"],
        }
    }

    /// Maps any accepted spelling to its operator.
    pub fn from_spelling(spelling: &str) -> Option<Self> {
        match spelling {
            "∧" | "&" => Some(BinaryOperator::And),
            "∨" | "|" => Some(BinaryOperator::Or),
            "⊻" | "^" => Some(BinaryOperator::Xor),
            "->" | "→" => Some(BinaryOperator::Implies),
            "<-" | "←" => Some(BinaryOperator::ImpliedBy),
            "<->" | "↔" => Some(BinaryOperator::Equivalence),
            _ => None,
        }
    }

    pub fn priority(self) -> Priority {
        match self {
            BinaryOperator::Implies | BinaryOperator::ImpliedBy | BinaryOperator::Equivalence => {
                Priority::ImpliesOrEquivalence
            }
            BinaryOperator::And | BinaryOperator::Or | BinaryOperator::Xor => Priority::AndOrXor,
        }
    }

    /// `(a ∘ b) ∘ c` and `a ∘ (b ∘ c)` mean the same thing.
    pub fn is_associative(self) -> bool {
        !matches!(self, BinaryOperator::Implies | BinaryOperator::ImpliedBy)
    }

    pub fn apply(self, left: bool, right: bool) -> bool {
        match self {
            BinaryOperator::And => left && right,
            BinaryOperator::Or => left || right,
            BinaryOperator::Xor => left != right,
            BinaryOperator::Implies => !left || right,
            BinaryOperator::ImpliedBy => left || !right,
            BinaryOperator::Equivalence => left == right,
        }
    }
}

impl Quantifier {
    pub fn glyph(self) -> &'static str {
        match self {
            Quantifier::ForAll => "∀",
            Quantifier::Exists => "∃",
        }
    }

    pub fn from_spelling(spelling: &str) -> Option<Self> {
        match spelling {
            "∀" | "\\A" | "\\a" => Some(Quantifier::ForAll),
            "∃" | "\\E" | "\\e" => Some(Quantifier::Exists),
            _ => None,
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

/// Returns the first entry of `candidates` that `text` starts with.
pub fn first_starting<'a>(text: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates.iter().copied().find(|c| text.starts_with(c))
}
