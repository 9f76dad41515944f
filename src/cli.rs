use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "folcheck",
    about = "Parse, analyze and tabulate first-order logic formulas",
    version,
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct FolCli {
    /// Global: pretty diagnostics
    #[arg(long = "pretty-errors", action = ArgAction::SetTrue, global = true)]
    pub pretty_errors: bool,

    /// Global: disable semantic analysis
    #[arg(long = "no-sema", action = ArgAction::SetTrue, global = true)]
    pub no_sema: bool,

    /// Global: path to config (TOML); default: ~/.folcheck/config.toml
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Global: emit the report as JSON
    #[arg(long = "json", action = ArgAction::SetTrue, global = true)]
    pub json: bool,

    /// Global: write the report to FILE instead of stdout
    #[arg(long = "out", value_name = "FILE", global = true)]
    pub out: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Command,
}

/// Where the formula comes from: the positional argument or `-f FILE`.
#[derive(Debug, Args)]
pub struct FormulaInput {
    #[arg(value_name = "FORMULA", required_unless_present = "file", conflicts_with = "file")]
    pub formula: Option<String>,

    /// Read the formula from FILE
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse and analyze; print canonical form, height, degree and roles
    ///
    /// Examples:
    ///   folcheck check '\A x (P(x) -> Q(x, c))'
    ///   folcheck check -f formula.txt --json
    Check {
        #[command(flatten)]
        input: FormulaInput,
    },

    /// As `check`, then print the truth table of a propositional formula
    Table {
        #[command(flatten)]
        input: FormulaInput,
    },

    /// Debug: dump the AST with source offsets
    Ast {
        #[command(flatten)]
        input: FormulaInput,
    },
}

impl Command {
    pub fn input(&self) -> &FormulaInput {
        match self {
            Command::Check { input } | Command::Table { input } | Command::Ast { input } => input,
        }
    }
}
