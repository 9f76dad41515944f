use std::fmt;

use crate::core::ast::Span;
use crate::core::parser::ParserError;
use crate::core::semantic_analyzer::AnalysisError;

/// The two ways a formula can be rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    Syntax(ParserError),
    Analysis(AnalysisError),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::Syntax(e) => write!(f, "Syntax Error: {}", e),
            CoreError::Analysis(e) => write!(f, "Analysis Error: {}", e),
        }
    }
}

impl std::error::Error for CoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CoreError::Syntax(e) => Some(e),
            CoreError::Analysis(e) => Some(e),
        }
    }
}

impl From<ParserError> for CoreError {
    fn from(e: ParserError) -> Self { CoreError::Syntax(e) }
}

impl From<AnalysisError> for CoreError {
    fn from(e: AnalysisError) -> Self { CoreError::Analysis(e) }
}

impl CoreError {
    pub fn message(&self) -> &str {
        match self {
            CoreError::Syntax(e) => &e.message,
            CoreError::Analysis(e) => &e.message,
        }
    }

    /// Region to highlight: the unparsed remainder for syntax errors, the
    /// conflicting occurrence for analysis errors.
    pub fn highlight(&self, source_len: usize) -> Span {
        match self {
            CoreError::Syntax(e) => Span::new(e.position, source_len.max(e.position)),
            CoreError::Analysis(e) => e.span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test] fn test_syntax_error() {
        let err = CoreError::from(ParserError { message: "Expected formula".into(), position: 0, consumed: 0 });
        assert_eq!(format!("{}", err), "Syntax Error: Expected formula at offset 0");
        assert_eq!(err.highlight(3), Span::new(0, 3));
    }
    #[test] fn test_analysis_error() {
        let err = CoreError::from(AnalysisError { message: "conflict".into(), span: Span::new(2, 4) });
        assert_eq!(format!("{}", err), "Analysis Error: conflict at 2..4");
        assert_eq!(err.highlight(10), Span::new(2, 4));
        assert_eq!(err.message(), "conflict");
    }
}
