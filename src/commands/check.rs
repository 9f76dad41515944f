//! src/commands/check.rs
//! Canonical form, height, degree and the role map of one formula.

use anyhow::Result;
use colored::Colorize;

use super::{emit, load_formula, run_checked, to_json, Options};
use crate::cli::FormulaInput;
use crate::core::report::Report;

pub fn main(input: &FormulaInput, opts: &Options) -> Result<i32> {
    let formula = load_formula(input)?;
    let Some(checked) = run_checked(&formula, opts) else {
        return Ok(1);
    };
    if opts.no_sema && !opts.json {
        eprintln!("{} semantic analysis skipped (--no-sema)", "note:".yellow().bold());
    }
    let report = Report::new(&checked);
    let text = if opts.json { to_json(&report)? } else { report.render_text(opts.settings.glyphs()) };
    emit(&text, opts)?;
    Ok(0)
}
