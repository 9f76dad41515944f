// src/core/diagnostics.rs
//! Pretty, colored, line+column diagnostics for rejected formulas.

use colored::Colorize;

use crate::core::ast::Span;

/// 1-based line and character column of a highlighted region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub col: usize,
    pub len: usize, // underline length in characters (at least 1)
}

impl Location {
    /// Converts a byte span into a location on the span's first line.
    pub fn from_span(source: &str, span: Span) -> Self {
        let start = span.start.min(source.len());
        let before = &source[..start];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let col = source[line_start..start].chars().count() + 1;
        let end = span.end.clamp(start, source.len());
        let len = source[start..end]
            .split('\n')
            .next()
            .map_or(0, |s| s.chars().count());
        Self { line, col, len: len.max(1) }
    }
}

pub fn render_error(origin: &str, source: &str, title: &str, loc: Location) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} {}\n", "error:".bright_red().bold(), title.bright_white()));
    let line_text = source.lines().nth(loc.line.saturating_sub(1)).unwrap_or_default();

    // line number gutter
    let ln_str = format!("{:>4}", loc.line);
    out.push_str(&format!(
        "{} {}\n",
        "-->".bright_blue(),
        format!("{}:{}:{}", origin, loc.line, loc.col).bright_white()
    ));
    out.push_str(&format!(" {} {}\n", " ".repeat(ln_str.len()).dimmed(), "|".dimmed()));
    out.push_str(&format!("{} {} {}\n", ln_str.dimmed(), "|".dimmed(), line_text));

    // underline with ^^^^^
    let underline = " ".repeat(loc.col.saturating_sub(1)) + &"^".repeat(loc.len);
    out.push_str(&format!(
        " {} {} {}\n",
        " ".repeat(ln_str.len()).dimmed(),
        "|".dimmed(),
        underline.bright_red()
    ));
    out
}

pub fn print_error(origin: &str, source: &str, title: &str, loc: Location) {
    eprintln!("{}", render_error(origin, source, title, loc));
}
