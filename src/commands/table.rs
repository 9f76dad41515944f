//! src/commands/table.rs
//! `check` plus the truth table of a propositional formula.

use anyhow::Result;
use colored::Colorize;

use super::{emit, load_formula, run_checked, to_json, Options};
use crate::cli::FormulaInput;
use crate::core::evaluator::TruthTable;
use crate::core::report::{Report, TableReport};

pub fn main(input: &FormulaInput, opts: &Options) -> Result<i32> {
    let formula = load_formula(input)?;
    let Some(checked) = run_checked(&formula, opts) else {
        return Ok(1);
    };
    let mut report = Report::new(&checked);

    match TruthTable::new(&checked.ast) {
        None => {
            eprintln!(
                "{} not propositional (quantifiers or applied identifiers), no truth table",
                "note:".yellow().bold()
            );
        }
        Some(table) if table.terms().len() > opts.settings.max_table_terms => {
            eprintln!(
                "{} {} distinct terms exceed max_table_terms = {}",
                "error:".bright_red(),
                table.terms().len(),
                opts.settings.max_table_terms
            );
            return Ok(1);
        }
        Some(table) => report.truth_table = Some(TableReport::new(&table)),
    }

    let text = if opts.json { to_json(&report)? } else { report.render_text(opts.settings.glyphs()) };
    emit(&text, opts)?;
    Ok(0)
}
