//! Function definitions and prototypes.
//!
//! ```text
//! private? function? type name(type name = default, ...) clientside? { ... }
//! private? function? type name(void);
//! ```
//!
//! The body is skipped; only the signature is kept.

use strife_core::{
    feature::{FeatureKind, Function, FunctionParam},
    token::TokenKind,
};

use crate::{
    context::ParseContext,
    error::Result,
    tasks::{
        TaskOutcome, access_modifier, check, expect, is_function_head, is_word, literal_text,
        skip_body, unexpected,
    },
    tokenizer::Tokenizer,
};

pub(super) fn function(
    _: &mut ParseContext,
    tokenizer: &mut Tokenizer<'_>,
) -> Result<TaskOutcome> {
    let mut scope = tokenizer.begin_scope();
    let access = access_modifier(&mut scope);
    match scope.kind() {
        TokenKind::Function => {
            scope.advance()?;
        }
        TokenKind::Symbol if is_function_head(&mut scope) => {}
        _ => return Ok(TaskOutcome::Declined),
    }
    scope.accept();

    let return_type = check(tokenizer.token(), TokenKind::Symbol, "return type")?
        .text()
        .to_lowercase();
    let name = expect(tokenizer, TokenKind::Symbol, "function name")?
        .text()
        .to_string();
    expect(tokenizer, TokenKind::LParen, "`(` to open the parameter list")?;
    let params = parameters(tokenizer)?;

    let depth = tokenizer.brace_depth();
    let mut token = tokenizer.advance_allow_eof();
    let clientside = is_word(&token, "clientside");
    if clientside {
        token = tokenizer.advance_allow_eof();
    }
    match token.kind() {
        TokenKind::Semicolon => {}
        TokenKind::LBrace => skip_body(tokenizer, depth, "function", token.span())?,
        _ => return Err(unexpected(token, "`{` or `;` after the parameter list")),
    }

    TaskOutcome::feature(FeatureKind::Function(Function {
        access,
        return_type,
        name,
        params,
        clientside,
    }))
}

/// Reads parameters up to and including the `)`.
fn parameters(tokenizer: &mut Tokenizer<'_>) -> Result<Vec<FunctionParam>> {
    let mut params = Vec::new();
    let mut token = tokenizer.advance_allow_eof();
    if token.is(TokenKind::RParen) {
        return Ok(params);
    }
    if is_word(&token, "void") && tokenizer.peek().is(TokenKind::RParen) {
        tokenizer.advance()?;
        return Ok(params);
    }

    loop {
        let ty = check(token, TokenKind::Symbol, "parameter type")?
            .text()
            .to_lowercase();
        let name = expect(tokenizer, TokenKind::Symbol, "parameter name")?
            .text()
            .to_string();

        let mut next = tokenizer.advance_allow_eof();
        let mut default = None;
        if next.is(TokenKind::Equals) {
            default = Some(literal_text(&tokenizer.advance()?));
            next = tokenizer.advance_allow_eof();
        }
        params.push(FunctionParam { ty, name, default });

        match next.kind() {
            TokenKind::RParen => return Ok(params),
            TokenKind::Comma => token = tokenizer.advance_allow_eof(),
            _ => return Err(unexpected(next, "`,` or `)`")),
        }
    }
}
