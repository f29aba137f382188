//! `strict? namespace name(.name)* {` and the `}` that closes it.

use strife_core::{codebase::NamespaceKey, token::TokenKind};

use crate::{
    context::ParseContext,
    error::{Diagnostic, ErrorCode, Result},
    tasks::{TaskOutcome, expect, unexpected},
    tokenizer::Tokenizer,
};

pub(super) fn open(ctx: &mut ParseContext, tokenizer: &mut Tokenizer<'_>) -> Result<TaskOutcome> {
    let strict = match tokenizer.kind() {
        TokenKind::Strict => true,
        TokenKind::Namespace => false,
        _ => return Ok(TaskOutcome::Declined),
    };
    if strict {
        expect(tokenizer, TokenKind::Namespace, "`namespace` after `strict`")?;
    }

    let mut token = tokenizer.advance_allow_eof();
    if token.is(TokenKind::LBrace) {
        ctx.enter_namespace(NamespaceKey::anonymous(strict));
        return Ok(TaskOutcome::Matched(None));
    }

    // One level per dotted segment.
    loop {
        if !token.is(TokenKind::Symbol) {
            return Err(unexpected(token, "namespace name or `{`"));
        }
        let name = token.text();

        let next = tokenizer.advance_allow_eof();
        if !matches!(next.kind(), TokenKind::Dot | TokenKind::LBrace) {
            return Err(unexpected(next, "`.` or `{`"));
        }
        ctx.enter_namespace(NamespaceKey::named(strict, name));

        if next.is(TokenKind::LBrace) {
            return Ok(TaskOutcome::Matched(None));
        }
        token = tokenizer.advance_allow_eof();
    }
}

pub(super) fn close(ctx: &mut ParseContext, tokenizer: &mut Tokenizer<'_>) -> Result<TaskOutcome> {
    let token = tokenizer.token();
    if !token.is(TokenKind::RBrace) {
        return Ok(TaskOutcome::Declined);
    }

    ctx.leave_namespace().map_err(|_| {
        Diagnostic::error("`}` does not close any namespace")
            .with_code(ErrorCode::E104)
            .with_label(token.span(), "unmatched closing brace")
            .with_help("remove the brace or open a namespace before it")
    })?;
    Ok(TaskOutcome::Matched(None))
}
