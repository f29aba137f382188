//! Character-level scanners built on winnow.
//!
//! Every scanner works on the remaining input slice and consumes exactly the
//! text it recognises. [`token`] picks the first matching lexeme in priority
//! order; trivia scanners are driven by the tokenizer's skip loop.

use winnow::{
    Parser as _,
    combinator::{alt, opt, preceded, terminated},
    error::{ContextError, ErrMode},
    stream::Stream as _,
    token::{any, literal, one_of, rest, take_till, take_until, take_while},
};

use strife_core::token::TokenKind;

type Input<'src> = &'src str;
type ScanResult<O> = Result<O, ErrMode<ContextError>>;

/// Runs `parser`, restoring the input when it does not match.
pub(super) fn attempt<'src, O>(
    input: &mut Input<'src>,
    mut parser: impl FnMut(&mut Input<'src>) -> ScanResult<O>,
) -> Option<O> {
    let start = input.checkpoint();
    match parser(input) {
        Ok(output) => Some(output),
        Err(_) => {
            input.reset(&start);
            None
        }
    }
}

/// `\r\n`, `\n` or a lone `\r`.
pub(super) fn newline<'src>(input: &mut Input<'src>) -> ScanResult<&'src str> {
    alt((literal("\r\n"), literal("\n"), literal("\r"))).parse_next(input)
}

/// A single non-newline whitespace character.
pub(super) fn whitespace<'src>(input: &mut Input<'src>) -> ScanResult<&'src str> {
    one_of(|c: char| c.is_whitespace() && c != '\n' && c != '\r')
        .take()
        .parse_next(input)
}

/// `// text`, returning the text after the marker up to the line break.
pub(super) fn line_comment<'src>(input: &mut Input<'src>) -> ScanResult<&'src str> {
    preceded(literal("//"), take_till(0.., ['\r', '\n'])).parse_next(input)
}

/// `/* text */`, returning the text between the markers.
///
/// An unterminated comment runs to the end of input.
pub(super) fn block_comment<'src>(input: &mut Input<'src>) -> ScanResult<&'src str> {
    preceded(
        literal("/*"),
        alt((terminated(take_until(0.., "*/"), literal("*/")), rest)),
    )
    .parse_next(input)
}

fn punctuation<'src>(input: &mut Input<'src>) -> ScanResult<(TokenKind, &'src str)> {
    one_of([
        '#', ',', ':', ';', '=', '(', ')', '{', '}', '[', ']', '.', '$',
    ])
    .with_taken()
    .map(|(c, text)| {
        let kind = match c {
            '#' => TokenKind::Hash,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            ';' => TokenKind::Semicolon,
            '=' => TokenKind::Equals,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '.' => TokenKind::Dot,
            _ => TokenKind::Dollar,
        };
        (kind, text)
    })
    .parse_next(input)
}

/// A double-quoted string without escapes; the quotes are not returned.
fn string<'src>(input: &mut Input<'src>) -> ScanResult<&'src str> {
    preceded('"', terminated(take_till(0.., '"'), opt('"'))).parse_next(input)
}

/// Digits with embedded `_` and `.`, optionally signed.
///
/// Letters end the number, so `0x1F` scans as `0` then the symbol `x1F`.
fn number<'src>(input: &mut Input<'src>) -> ScanResult<&'src str> {
    (
        opt('-'),
        one_of(|c: char| c.is_ascii_digit()),
        take_while(0.., |c: char| c.is_ascii_digit() || c == '_' || c == '.'),
    )
        .take()
        .parse_next(input)
}

fn symbol<'src>(input: &mut Input<'src>) -> ScanResult<&'src str> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_').parse_next(input)
}

/// Newlines, whitespace and comment markers left unmasked.
fn trivia_lexeme<'src>(input: &mut Input<'src>) -> ScanResult<(TokenKind, &'src str)> {
    alt((
        newline.map(|text| (TokenKind::Newline, text)),
        whitespace.map(|text| (TokenKind::Whitespace, text)),
        literal("//").map(|text| (TokenKind::LineCommentStart, text)),
        literal("/*").map(|text| (TokenKind::BlockCommentStart, text)),
        literal("*/").map(|text| (TokenKind::BlockCommentEnd, text)),
    ))
    .parse_next(input)
}

fn lexeme<'src>(input: &mut Input<'src>) -> ScanResult<(TokenKind, &'src str)> {
    alt((
        punctuation,
        trivia_lexeme,
        string.map(|text| (TokenKind::String, text)),
        number.map(|text| (TokenKind::Number, text)),
        literal("-").map(|text| (TokenKind::Dash, text)),
        symbol.map(|text| (TokenKind::Symbol, text)),
        any.take().map(|text| (TokenKind::Symbol, text)),
    ))
    .parse_next(input)
}

/// Scans the next lexeme, with keywords resolved from plain symbols.
///
/// Trivia must already have been skipped. End of input, or a NUL
/// character, yields [`TokenKind::Eof`] without consuming anything.
pub(super) fn token<'src>(input: &mut Input<'src>) -> (TokenKind, &'src str) {
    if input.is_empty() || input.starts_with('\0') {
        return (TokenKind::Eof, "");
    }
    match attempt(input, lexeme) {
        Some((TokenKind::Symbol, text)) => {
            (TokenKind::keyword(text).unwrap_or(TokenKind::Symbol), text)
        }
        Some(found) => found,
        None => (TokenKind::Eof, ""),
    }
}

/// Counts line breaks, treating `\r\n` as one.
pub(super) fn count_line_breaks(text: &str) -> usize {
    let bytes = text.as_bytes();
    bytes
        .iter()
        .enumerate()
        .filter(|&(i, &b)| b == b'\n' || (b == b'\r' && bytes.get(i + 1) != Some(&b'\n')))
        .count()
}
