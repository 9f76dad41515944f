//! Parse + analyze pipeline and the summary shared by text and JSON output.

use serde::Serialize;

use crate::core::ast::{ASTNode, NodeKind};
use crate::core::error::CoreError;
use crate::core::evaluator::{Row, TruthTable};
use crate::core::parser::Parser;
use crate::core::formatter::format_formula;
use crate::core::semantic_analyzer::{self, Role, RoleMap};

pub struct Checked {
    pub ast: ASTNode,
    /// `None` when analysis was skipped.
    pub roles: Option<RoleMap>,
}

/// Parses `source` (expected to be NFC already) and optionally analyzes it.
pub fn check(source: &str, analyze: bool) -> Result<Checked, CoreError> {
    let ast = Parser::new(source).parse()?;
    let roles = if analyze { Some(semantic_analyzer::analyze(&ast)?) } else { None };
    Ok(Checked { ast, roles })
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub formula: String,
    pub height: usize,
    pub degree: usize,
    pub propositional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<RoleMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truth_table: Option<TableReport>,
}

impl Report {
    pub fn new(checked: &Checked) -> Self {
        let ast = &checked.ast;
        Self {
            formula: format_formula(ast),
            height: ast.height(),
            degree: ast.degree(),
            propositional: ast.is_propositional(),
            roles: checked.roles.clone(),
            truth_table: None,
        }
    }

    pub fn render_text(&self, glyphs: (&str, &str)) -> String {
        let mut out = String::new();
        out.push_str(&format!("formula: {}\n", self.formula));
        out.push_str(&format!("height: {}\n", self.height));
        out.push_str(&format!("degree: {}\n", self.degree));
        out.push_str(&format!("propositional: {}\n", if self.propositional { "yes" } else { "no" }));
        if let Some(roles) = &self.roles {
            out.push_str("interpretation:\n");
            for (identifier, role) in roles {
                out.push_str(&format!("  {}\n", describe_role(identifier, role)));
            }
        }
        if let Some(table) = &self.truth_table {
            out.push('\n');
            out.push_str(&table.render(&self.formula, glyphs));
        }
        out
    }
}

#[derive(Debug, Serialize)]
pub struct TableReport {
    pub terms: Vec<String>,
    pub rows: Vec<Row>,
}

impl TableReport {
    pub fn new(table: &TruthTable<'_>) -> Self {
        Self { terms: table.terms().to_vec(), rows: table.rows().collect() }
    }

    /// One column per term, then the formula's value. `glyphs` are the
    /// (true, false) cell texts.
    pub fn render(&self, formula: &str, glyphs: (&str, &str)) -> String {
        let glyph = |v: bool| if v { glyphs.0 } else { glyphs.1 };
        let widths: Vec<usize> = self
            .terms
            .iter()
            .map(|t| t.chars().count().max(glyphs.0.chars().count()).max(glyphs.1.chars().count()))
            .collect();

        let mut out = String::new();
        let header: Vec<String> =
            self.terms.iter().zip(&widths).map(|(t, w)| pad(t, *w)).collect();
        out.push_str(&format!("{} │ {}\n", header.join(" "), formula));
        for row in &self.rows {
            let cells: Vec<String> =
                row.values.iter().zip(&widths).map(|(v, w)| pad(glyph(*v), *w)).collect();
            out.push_str(&format!("{} │ {}\n", cells.join(" "), glyph(row.result)));
        }
        out
    }
}

/// Serializable AST dump for the `ast` subcommand.
#[derive(Debug, Serialize)]
pub struct TreeNode {
    pub kind: &'static str,
    pub label: String,
    pub start: usize,
    pub end: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(node: &ASTNode) -> Self {
        let (kind, label, children): (_, String, Vec<&ASTNode>) = match &node.kind {
            NodeKind::Symbol { identifier } => ("Symbol", identifier.clone(), vec![]),
            NodeKind::UnaryFormula { operator, operand } => {
                ("UnaryFormula", operator.to_string(), vec![operand.as_ref()])
            }
            NodeKind::BinaryFormula { left, operator, right } => {
                ("BinaryFormula", operator.to_string(), vec![left.as_ref(), right.as_ref()])
            }
            NodeKind::QuantifiedFormula { quantifier, variable, formula } => {
                ("QuantifiedFormula", format!("{quantifier}{variable}"), vec![formula.as_ref()])
            }
            NodeKind::Call { identifier, args } => ("Call", identifier.clone(), args.iter().collect()),
        };
        Self {
            kind,
            label,
            start: node.span.start,
            end: node.span.end,
            children: children.into_iter().map(TreeNode::new).collect(),
        }
    }

    /// Indented outline, one node per line: `Kind label [start..end]`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, 0);
        out
    }

    fn render_into(&self, out: &mut String, depth: usize) {
        out.push_str(&format!(
            "{}{} {} [{}..{}]\n",
            "  ".repeat(depth),
            self.kind,
            self.label,
            self.start,
            self.end
        ));
        for child in &self.children {
            child.render_into(out, depth + 1);
        }
    }
}

/// `“P” is a 2-ary predicate`, `“c” is an individual constant`.
pub fn describe_role(identifier: &str, role: &Role) -> String {
    let role = role.to_string();
    let article = if role.starts_with(['a', 'e', 'i', 'o', 'u']) { "an" } else { "a" };
    format!("“{identifier}” is {article} {role}")
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.chars().count());
    format!("{}{}", text, " ".repeat(fill))
}
