//! The fatal error returned by a parse run.

use std::fmt;

use crate::{error::Diagnostic, tasks::TaskKind};

/// A type alias for `Result<T, Diagnostic>`.
pub type Result<T> = std::result::Result<T, Diagnostic>;

/// A fatal diagnostic together with where it happened.
///
/// Carries the text of the file that failed so callers can render source
/// snippets for the diagnostic's labels.
#[derive(Debug, Clone)]
pub struct ParseError {
    diagnostic: Diagnostic,
    file: String,
    line: usize,
    task: Option<TaskKind>,
    src: String,
}

impl ParseError {
    pub fn new(diagnostic: Diagnostic, file: impl Into<String>, line: usize) -> Self {
        Self {
            diagnostic,
            file: file.into(),
            line,
            task: None,
            src: String::new(),
        }
    }

    /// Records the grammar task that was running.
    pub fn with_task(mut self, task: TaskKind) -> Self {
        self.task = Some(task);
        self
    }

    /// Attaches the source text of the failing file.
    pub fn with_source(mut self, src: impl Into<String>) -> Self {
        self.src = src.into();
        self
    }

    pub fn diagnostic(&self) -> &Diagnostic {
        &self.diagnostic
    }

    /// File that failed, as given to or resolved by the parser.
    pub fn file(&self) -> &str {
        &self.file
    }

    /// One-based line at which the failure was detected.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn task(&self) -> Option<TaskKind> {
        self.task
    }

    pub fn source_text(&self) -> &str {
        &self.src
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Line 0 marks errors that belong to the file as a whole.
        if self.line == 0 {
            write!(f, "{}: {}", self.file, self.diagnostic)?;
        } else {
            write!(f, "{}:{}: {}", self.file, self.line, self.diagnostic)?;
        }
        if let Some(task) = self.task {
            write!(f, " (while parsing {task})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_display_without_task() {
        let err = ParseError::new(
            Diagnostic::error("unknown symbol `)`").with_code(ErrorCode::E102),
            "map01.acs",
            3,
        );
        assert_eq!(err.to_string(), "map01.acs:3: error[E102]: unknown symbol `)`");
    }

    #[test]
    fn test_display_without_line() {
        let err = ParseError::new(
            Diagnostic::error("cancelled").with_code(ErrorCode::E300),
            "main.acs",
            0,
        );
        assert_eq!(err.to_string(), "main.acs: error[E300]: cancelled");
    }

    #[test]
    fn test_display_with_task() {
        let err = ParseError::new(Diagnostic::error("expected `;`"), "lib.acs", 9)
            .with_task(TaskKind::Variable)
            .with_source("int a = 1 }");
        assert_eq!(
            err.to_string(),
            "lib.acs:9: error: expected `;` (while parsing variable declaration)"
        );
        assert_eq!(err.source_text(), "int a = 1 }");
        assert_eq!(err.task(), Some(TaskKind::Variable));
    }
}
