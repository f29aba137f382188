//! Opaque value-expression parsing.
//!
//! A value is read from the current token up to, but not including, the first
//! comma, semicolon, closing brace, unmasked newline or end of input. The
//! terminator is left as the current token. Parentheses become nested groups;
//! a `)` without a matching `(` is ignored.

use strife_core::{
    token::TokenKind,
    value::{Value, ValueSymbol},
};

use crate::{error::Result, tokenizer::Tokenizer};

fn is_terminator(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Eof
            | TokenKind::Comma
            | TokenKind::Semicolon
            | TokenKind::RBrace
            | TokenKind::Newline
    )
}

fn close_group(stack: &mut Vec<Vec<ValueSymbol>>) {
    if stack.len() < 2 {
        return;
    }
    if let Some(children) = stack.pop() {
        if let Some(parent) = stack.last_mut() {
            parent.push(ValueSymbol::Group(children));
        }
    }
}

/// Parses a value expression starting at the current token.
///
/// # Errors
///
/// Returns an `E001` diagnostic if the input ends directly after a `(`.
pub fn parse_value(tokenizer: &mut Tokenizer<'_>) -> Result<Value> {
    let mut stack: Vec<Vec<ValueSymbol>> = vec![Vec::new()];

    loop {
        let token = tokenizer.token();
        match token.kind() {
            kind if is_terminator(kind) => break,
            TokenKind::LParen => {
                stack.push(Vec::new());
                tokenizer.advance()?;
            }
            TokenKind::RParen => {
                close_group(&mut stack);
                tokenizer.advance_allow_eof();
            }
            kind => {
                if let Some(current) = stack.last_mut() {
                    current.push(ValueSymbol::leaf(kind, token.text()));
                }
                tokenizer.advance_allow_eof();
            }
        }
    }

    // Groups left open at the terminator are kept as groups.
    while stack.len() > 1 {
        close_group(&mut stack);
    }
    Ok(Value::new(stack.pop().unwrap_or_default()))
}
