//! Skipped source text kept for documentation and task-item harvesting.

use crate::span::Span;

/// The category of a trivia record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriviaKind {
    Newline,
    Whitespace,
    /// `// ...`; the text excludes the leading `//`.
    LineComment,
    /// `/* ... */`; the text excludes both markers.
    BlockComment,
}

/// A run of skipped text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trivia<'src> {
    kind: TriviaKind,
    line: usize,
    text: &'src str,
    span: Span,
}

impl<'src> Trivia<'src> {
    pub(crate) fn new(kind: TriviaKind, line: usize, text: &'src str, span: Span) -> Self {
        Self {
            kind,
            line,
            text,
            span,
        }
    }

    pub fn kind(&self) -> TriviaKind {
        self.kind
    }

    /// Line on which the trivia starts.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn text(&self) -> &'src str {
        self.text
    }

    /// Source range of the whole run, comment markers included.
    pub fn span(&self) -> Span {
        self.span
    }

    pub fn is_comment(&self) -> bool {
        matches!(self.kind, TriviaKind::LineComment | TriviaKind::BlockComment)
    }
}
