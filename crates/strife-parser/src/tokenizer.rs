//! Tokenizer for ACS source text.
//!
//! # Overview
//!
//! The [`Tokenizer`] walks a source buffer one [`Token`] at a time. Before each
//! token it skips the trivia categories enabled in its [`SkipMask`], recording
//! every skipped run as a [`Trivia`] entry so documentation comments and task
//! annotations can be recovered later. It also tracks the current line and the
//! brace and parenthesis depth, which the grammar tasks use to skip bodies.
//!
//! Lookahead is transactional: [`Tokenizer::begin_scope`] returns a [`Scope`]
//! that rolls every change back when dropped unless it is accepted.
//!
//! # Example
//!
//! ```
//! use strife_core::token::TokenKind;
//! use strife_parser::tokenizer::Tokenizer;
//!
//! let mut tokenizer = Tokenizer::new("#library \"GAME\" // main lib\n");
//! assert_eq!(tokenizer.advance().unwrap().kind(), TokenKind::Hash);
//! assert_eq!(tokenizer.peek().text(), "library");
//! assert_eq!(tokenizer.advance().unwrap().text(), "library");
//! assert_eq!(tokenizer.advance().unwrap().kind(), TokenKind::String);
//! assert_eq!(tokenizer.advance_allow_eof().kind(), TokenKind::Eof);
//! assert_eq!(tokenizer.trivia().iter().filter(|t| t.is_comment()).count(), 1);
//! ```

mod mask;
mod scan;
mod scope;
mod trivia;

pub use mask::SkipMask;
pub use scope::Scope;
pub use trivia::{Trivia, TriviaKind};

use strife_core::token::TokenKind;

use crate::{
    error::{Diagnostic, ErrorCode, Result},
    span::Span,
};

/// A lexical token borrowed from the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    kind: TokenKind,
    text: &'src str,
    span: Span,
    line: usize,
}

impl<'src> Token<'src> {
    fn start() -> Self {
        Self {
            kind: TokenKind::Eof,
            text: "",
            span: Span::default(),
            line: 1,
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The token text; for strings the quotes are excluded.
    pub fn text(&self) -> &'src str {
        self.text
    }

    /// The full source range of the token, quotes included.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Line on which the token starts.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// Returns `true` for a string literal cut off by the end of input.
    pub fn is_unterminated_string(&self) -> bool {
        self.kind == TokenKind::String && self.span.len() < self.text.len() + 2
    }
}

/// Everything a [`Scope`] needs to undo.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Snapshot<'src> {
    token: Token<'src>,
    mask: SkipMask,
    position: usize,
    brace_depth: i32,
    paren_depth: i32,
    line: usize,
    trivia_len: usize,
}

/// Scans ACS source into tokens.
#[derive(Debug)]
pub struct Tokenizer<'src> {
    src: &'src str,
    token: Token<'src>,
    mask: SkipMask,
    position: usize,
    brace_depth: i32,
    paren_depth: i32,
    line: usize,
    trivia: Vec<Trivia<'src>>,
}

impl<'src> Tokenizer<'src> {
    /// Creates a tokenizer positioned before the first token.
    pub fn new(src: &'src str) -> Self {
        Self {
            src,
            token: Token::start(),
            mask: SkipMask::default(),
            position: 0,
            brace_depth: 0,
            paren_depth: 0,
            line: 1,
            trivia: Vec::new(),
        }
    }

    pub fn source(&self) -> &'src str {
        self.src
    }

    /// The most recently scanned token.
    pub fn token(&self) -> Token<'src> {
        self.token
    }

    pub fn kind(&self) -> TokenKind {
        self.token.kind
    }

    pub fn mask(&self) -> SkipMask {
        self.mask
    }

    pub fn set_mask(&mut self, mask: SkipMask) {
        self.mask = mask;
    }

    /// Byte offset just past the current token.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Current line, one-based.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn brace_depth(&self) -> i32 {
        self.brace_depth
    }

    pub fn paren_depth(&self) -> i32 {
        self.paren_depth
    }

    /// All trivia recorded so far, in source order.
    pub fn trivia(&self) -> &[Trivia<'src>] {
        &self.trivia
    }

    /// Trivia recorded since `mark`, a value previously read from `trivia().len()`.
    pub fn trivia_since(&self, mark: usize) -> &[Trivia<'src>] {
        self.trivia.get(mark..).unwrap_or_default()
    }

    /// Advances to the next token.
    ///
    /// # Errors
    ///
    /// Returns an `E001` diagnostic when the new token is end of input.
    pub fn advance(&mut self) -> Result<Token<'src>> {
        let token = self.advance_allow_eof();
        if token.is_eof() {
            return Err(Diagnostic::error("unexpected end of input")
                .with_code(ErrorCode::E001)
                .with_label(token.span, "input ends here"));
        }
        Ok(token)
    }

    /// Advances to the next token, returning [`TokenKind::Eof`] at the end.
    pub fn advance_allow_eof(&mut self) -> Token<'src> {
        self.skip_trivia();

        let src = self.src;
        let start = self.position;
        let line = self.line;
        let mut input = &src[start..];
        let (kind, text) = scan::token(&mut input);
        self.position = src.len() - input.len();

        self.token = Token {
            kind,
            text,
            span: Span::new(start..self.position),
            line,
        };

        match kind {
            TokenKind::LBrace => self.brace_depth += 1,
            TokenKind::RBrace => self.brace_depth -= 1,
            TokenKind::LParen => self.paren_depth += 1,
            TokenKind::RParen => self.paren_depth -= 1,
            TokenKind::Newline => self.line += 1,
            TokenKind::String => self.line += scan::count_line_breaks(text),
            _ => {}
        }

        self.token
    }

    /// Returns the next token without consuming it.
    pub fn peek(&mut self) -> Token<'src> {
        let mut scope = self.begin_scope();
        scope.advance_allow_eof()
    }

    /// Starts a speculative region; see [`Scope`].
    pub fn begin_scope(&mut self) -> Scope<'_, 'src> {
        Scope::new(self)
    }

    pub(crate) fn snapshot(&self) -> Snapshot<'src> {
        Snapshot {
            token: self.token,
            mask: self.mask,
            position: self.position,
            brace_depth: self.brace_depth,
            paren_depth: self.paren_depth,
            line: self.line,
            trivia_len: self.trivia.len(),
        }
    }

    pub(crate) fn restore(&mut self, snapshot: Snapshot<'src>) {
        self.token = snapshot.token;
        self.mask = snapshot.mask;
        self.position = snapshot.position;
        self.brace_depth = snapshot.brace_depth;
        self.paren_depth = snapshot.paren_depth;
        self.line = snapshot.line;
        self.trivia.truncate(snapshot.trivia_len);
    }

    fn skip_trivia(&mut self) {
        let src = self.src;
        loop {
            let mut input = &src[self.position..];
            let Some((kind, text)) = self.scan_trivia(&mut input) else {
                break;
            };
            let end = src.len() - input.len();
            let span = Span::new(self.position..end);
            self.trivia.push(Trivia::new(kind, self.line, text, span));
            self.position = end;
            self.line += match kind {
                TriviaKind::Newline => 1,
                TriviaKind::BlockComment => scan::count_line_breaks(text),
                _ => 0,
            };
        }
    }

    fn scan_trivia(&self, input: &mut &'src str) -> Option<(TriviaKind, &'src str)> {
        if self.mask.contains(SkipMask::NEWLINE) {
            if let Some(text) = scan::attempt(input, scan::newline) {
                return Some((TriviaKind::Newline, text));
            }
        }
        if self.mask.contains(SkipMask::WHITESPACE) {
            if let Some(text) = scan::attempt(input, scan::whitespace) {
                return Some((TriviaKind::Whitespace, text));
            }
        }
        if self.mask.contains(SkipMask::LINE_COMMENT) {
            if let Some(text) = scan::attempt(input, scan::line_comment) {
                return Some((TriviaKind::LineComment, text));
            }
        }
        if self.mask.contains(SkipMask::BLOCK_COMMENT) {
            if let Some(text) = scan::attempt(input, scan::block_comment) {
                return Some((TriviaKind::BlockComment, text));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        let mut tokenizer = Tokenizer::new(src);
        let mut out = Vec::new();
        loop {
            let token = tokenizer.advance_allow_eof();
            if token.is_eof() {
                return out;
            }
            out.push(token.kind());
        }
    }

    #[test]
    fn test_trivia_is_skipped_and_recorded() {
        let mut tokenizer = Tokenizer::new("  // lead\n/* block */ x");
        let token = tokenizer.advance().unwrap();
        assert_eq!(token.text(), "x");
        assert_eq!(token.line(), 2);

        let comments: Vec<_> = tokenizer
            .trivia()
            .iter()
            .filter(|t| t.is_comment())
            .map(|t| (t.kind(), t.text(), t.line()))
            .collect();
        assert_eq!(
            comments,
            vec![
                (TriviaKind::LineComment, " lead", 1),
                (TriviaKind::BlockComment, " block ", 2),
            ]
        );
    }

    #[test]
    fn test_whitespace_recorded_per_character() {
        let mut tokenizer = Tokenizer::new("\t  x");
        tokenizer.advance().unwrap();
        assert_eq!(tokenizer.trivia().len(), 3);
        assert!(
            tokenizer
                .trivia()
                .iter()
                .all(|t| t.kind() == TriviaKind::Whitespace)
        );
    }

    #[test]
    fn test_unmasked_newline_is_a_token() {
        let mut tokenizer = Tokenizer::new("a\nb");
        tokenizer.set_mask(SkipMask::default() - SkipMask::NEWLINE);
        assert_eq!(tokenizer.advance().unwrap().text(), "a");
        assert_eq!(tokenizer.advance().unwrap().kind(), TokenKind::Newline);
        assert_eq!(tokenizer.line(), 2);
        assert_eq!(tokenizer.advance().unwrap().text(), "b");
    }

    #[test]
    fn test_crlf_newline_is_one_token() {
        let mut tokenizer = Tokenizer::new("a\r\nb");
        tokenizer.set_mask(SkipMask::default() - SkipMask::NEWLINE);
        tokenizer.advance().unwrap();
        assert_eq!(tokenizer.advance().unwrap().text(), "\r\n");
        assert_eq!(tokenizer.advance().unwrap().text(), "b");
    }

    #[test]
    fn test_unmasked_comment_markers() {
        let mut tokenizer = Tokenizer::new("// x");
        tokenizer.set_mask(SkipMask::NEWLINE | SkipMask::WHITESPACE);
        assert_eq!(
            tokenizer.advance().unwrap().kind(),
            TokenKind::LineCommentStart
        );
    }

    #[test]
    fn test_block_comment_counts_lines() {
        let mut tokenizer = Tokenizer::new("/* one\ntwo\nthree */ x");
        let token = tokenizer.advance().unwrap();
        assert_eq!(token.line(), 3);
        assert_eq!(tokenizer.trivia()[0].line(), 1);
    }

    #[test]
    fn test_depth_tracking() {
        let mut tokenizer = Tokenizer::new("{ ( ) { }");
        tokenizer.advance().unwrap();
        assert_eq!(tokenizer.brace_depth(), 1);
        tokenizer.advance().unwrap();
        assert_eq!(tokenizer.paren_depth(), 1);
        tokenizer.advance().unwrap();
        assert_eq!(tokenizer.paren_depth(), 0);
        tokenizer.advance().unwrap();
        tokenizer.advance().unwrap();
        assert_eq!(tokenizer.brace_depth(), 1);
    }

    #[test]
    fn test_braces_inside_strings_do_not_count() {
        let mut tokenizer = Tokenizer::new("\"{{\" {");
        tokenizer.advance().unwrap();
        assert_eq!(tokenizer.brace_depth(), 0);
        tokenizer.advance().unwrap();
        assert_eq!(tokenizer.brace_depth(), 1);
    }

    #[test]
    fn test_advance_fails_at_end() {
        let mut tokenizer = Tokenizer::new("  ");
        let err = tokenizer.advance().unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::E001));
        assert!(tokenizer.token().is_eof());
    }

    #[test]
    fn test_peek_has_no_side_effects() {
        let mut tokenizer = Tokenizer::new("a /* c */ b");
        tokenizer.advance().unwrap();
        let trivia_before = tokenizer.trivia().len();
        assert_eq!(tokenizer.peek().text(), "b");
        assert_eq!(tokenizer.token().text(), "a");
        assert_eq!(tokenizer.trivia().len(), trivia_before);
        assert_eq!(tokenizer.advance().unwrap().text(), "b");
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            kinds("strict namespace Foo"),
            vec![TokenKind::Strict, TokenKind::Namespace, TokenKind::Symbol]
        );
    }

    proptest! {
        #[test]
        fn prop_words_keep_text_and_line(
            words in prop::collection::vec(("[a-z_][a-z0-9_]{0,6}", any::<bool>()), 1..12)
        ) {
            let mut src = String::new();
            let mut expected = Vec::new();
            let mut line = 1;
            for (word, line_break) in &words {
                src.push_str(word);
                expected.push((word.clone(), line));
                if *line_break {
                    src.push('\n');
                    line += 1;
                } else {
                    src.push(' ');
                }
            }

            let mut tokenizer = Tokenizer::new(&src);
            let mut seen = Vec::new();
            loop {
                let token = tokenizer.advance_allow_eof();
                if token.is_eof() {
                    break;
                }
                seen.push((token.text().to_string(), token.line()));
            }
            prop_assert_eq!(seen, expected);
            prop_assert_eq!(tokenizer.brace_depth(), 0);
        }
    }
}
