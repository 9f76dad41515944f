//! Subcommand implementations plus the plumbing they share: reading the
//! formula, reporting rejected input, and writing output.

pub mod ast;
pub mod check;
pub mod table;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::cli::FormulaInput;
use crate::config::Settings;
use crate::core::cursor::normalize;
use crate::core::diagnostics::{print_error, Location};
use crate::core::error::CoreError;
use crate::core::report::{check, Checked};
use crate::io::atomic::atomic_write;

/// Global flags and settings every subcommand honors.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub pretty_errors: bool,
    pub no_sema: bool,
    pub json: bool,
    pub out: Option<PathBuf>,
    pub settings: Settings,
}

/// A formula ready for parsing. `source` is NFC, so parser offsets index it.
#[derive(Debug, Clone)]
pub struct Formula {
    pub origin: String,
    pub source: String,
}

pub fn load_formula(input: &FormulaInput) -> Result<Formula> {
    let (origin, raw) = match (&input.formula, &input.file) {
        (_, Some(path)) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Read formula {}", path.display()))?;
            (path.display().to_string(), text)
        }
        (Some(text), None) => ("<formula>".to_string(), text.clone()),
        (None, None) => anyhow::bail!("no formula given (pass FORMULA or --file)"),
    };
    let source = normalize(raw.trim_end_matches(['\r', '\n']));
    Ok(Formula { origin, source })
}

/// Parses (and unless `--no-sema`, analyzes) the formula. Rejections are
/// reported on stderr and yield `None`.
pub fn run_checked(formula: &Formula, opts: &Options) -> Option<Checked> {
    match check(&formula.source, !opts.no_sema) {
        Ok(checked) => Some(checked),
        Err(e) => {
            report_error(formula, &e, opts.pretty_errors);
            None
        }
    }
}

pub fn report_error(formula: &Formula, err: &CoreError, pretty: bool) {
    if pretty {
        let loc = Location::from_span(&formula.source, err.highlight(formula.source.len()));
        let title = match err {
            CoreError::Syntax(_) => format!("Syntax error: {}", err.message()),
            CoreError::Analysis(_) => format!("Analysis error: {}", err.message()),
        };
        print_error(&formula.origin, &formula.source, &title, loc);
    } else {
        eprintln!("{} {}", "error:".bright_red(), err);
    }
}

/// Writes `text` to `--out` (atomically) or stdout.
pub fn emit(text: &str, opts: &Options) -> Result<()> {
    match &opts.out {
        Some(path) => {
            atomic_write(path, text.as_bytes())
                .with_context(|| format!("Write output {}", path.display()))?;
            println!("{} wrote {}", "ok:".green().bold(), path.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}

pub fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    let mut text = serde_json::to_string_pretty(value).context("Serialize report")?;
    text.push('\n');
    Ok(text)
}
