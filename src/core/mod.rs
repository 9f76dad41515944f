//! Core module tree: cursor, parser, analyzer, evaluator and their reports.

pub mod ast;
pub mod cursor;
#[macro_use]
pub mod debug; // gated debug logging (FOLCHECK_DEBUG=1) provides debug_log! macro
pub mod diagnostics;
pub mod error;
pub mod evaluator;
pub mod formatter;
pub mod parser;
pub mod report;
pub mod semantic_analyzer;
pub mod token;
