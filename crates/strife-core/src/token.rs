//! Lexical token kinds.
//!
//! The tokenizer produces a [`TokenKind`] together with the exact source text
//! it covers. Keywords are never scanned directly: a generic symbol is looked
//! up in the keyword table with [`TokenKind::keyword`], case-insensitively.

use std::fmt;

/// The kind of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// End of input.
    Eof,

    // Punctuation
    Hash,
    Comma,
    Colon,
    Semicolon,
    Equals,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Dot,
    Dollar,
    Dash,

    // Trivia, only produced while the matching category is not skipped
    Newline,
    Whitespace,
    LineCommentStart,
    BlockCommentStart,
    BlockCommentEnd,

    // Literals
    /// A double-quoted string; the token text excludes the quotes.
    String,
    Number,
    Symbol,

    // Keywords
    Function,
    Script,
    Global,
    World,
    Strict,
    Namespace,
    Private,
    Typedef,
    Enum,
    Struct,
}

const KEYWORDS: [(&str, TokenKind); 10] = [
    ("function", TokenKind::Function),
    ("script", TokenKind::Script),
    ("global", TokenKind::Global),
    ("world", TokenKind::World),
    ("strict", TokenKind::Strict),
    ("namespace", TokenKind::Namespace),
    ("private", TokenKind::Private),
    ("typedef", TokenKind::Typedef),
    ("enum", TokenKind::Enum),
    ("struct", TokenKind::Struct),
];

impl TokenKind {
    /// Looks up `text` in the keyword table, ignoring ASCII case.
    ///
    /// # Examples
    ///
    /// ```
    /// use strife_core::token::TokenKind;
    ///
    /// assert_eq!(TokenKind::keyword("Script"), Some(TokenKind::Script));
    /// assert_eq!(TokenKind::keyword("scripts"), None);
    /// ```
    pub fn keyword(text: &str) -> Option<TokenKind> {
        KEYWORDS
            .iter()
            .find(|(word, _)| word.eq_ignore_ascii_case(text))
            .map(|(_, kind)| *kind)
    }

    /// Returns `true` for the keyword kinds.
    pub fn is_keyword(&self) -> bool {
        KEYWORDS.iter().any(|(_, kind)| kind == self)
    }

    /// Returns `true` for kinds that carry a name-like text (symbols and keywords).
    pub fn is_word(&self) -> bool {
        matches!(self, TokenKind::Symbol) || self.is_keyword()
    }

    /// A short human readable description used in diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Eof => "end of input",
            TokenKind::Hash => "`#`",
            TokenKind::Comma => "`,`",
            TokenKind::Colon => "`:`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Equals => "`=`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
            TokenKind::Dot => "`.`",
            TokenKind::Dollar => "`$`",
            TokenKind::Dash => "`-`",
            TokenKind::Newline => "newline",
            TokenKind::Whitespace => "whitespace",
            TokenKind::LineCommentStart => "`//`",
            TokenKind::BlockCommentStart => "`/*`",
            TokenKind::BlockCommentEnd => "`*/`",
            TokenKind::String => "string literal",
            TokenKind::Number => "number",
            TokenKind::Symbol => "identifier",
            TokenKind::Function => "`function`",
            TokenKind::Script => "`script`",
            TokenKind::Global => "`global`",
            TokenKind::World => "`world`",
            TokenKind::Strict => "`strict`",
            TokenKind::Namespace => "`namespace`",
            TokenKind::Private => "`private`",
            TokenKind::Typedef => "`typedef`",
            TokenKind::Enum => "`enum`",
            TokenKind::Struct => "`struct`",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup_ignores_case() {
        assert_eq!(TokenKind::keyword("NAMESPACE"), Some(TokenKind::Namespace));
        assert_eq!(TokenKind::keyword("Private"), Some(TokenKind::Private));
        assert_eq!(TokenKind::keyword("int"), None);
    }

    #[test]
    fn test_keyword_classification() {
        assert!(TokenKind::Struct.is_keyword());
        assert!(!TokenKind::Symbol.is_keyword());
        assert!(TokenKind::Symbol.is_word());
        assert!(TokenKind::Enum.is_word());
        assert!(!TokenKind::String.is_word());
    }
}
