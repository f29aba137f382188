//! `script id (params)? activator? net? clientside? { ... }`

use strife_core::{
    feature::{FeatureKind, Script, ScriptParam},
    token::TokenKind,
};

use crate::{
    context::ParseContext,
    error::{Diagnostic, ErrorCode, Result},
    tasks::{TaskOutcome, check, is_word, skip_body, unexpected},
    tokenizer::{Token, Tokenizer},
};

pub(super) fn script(_: &mut ParseContext, tokenizer: &mut Tokenizer<'_>) -> Result<TaskOutcome> {
    if tokenizer.kind() != TokenKind::Script {
        return Ok(TaskOutcome::Declined);
    }

    let id = tokenizer.advance_allow_eof();
    if id.is_unterminated_string()
        || !matches!(
            id.kind(),
            TokenKind::Number | TokenKind::String | TokenKind::Symbol
        )
    {
        return Err(unexpected(id, "script number or name"));
    }
    let quoted = id.is(TokenKind::String);

    let mut params = Vec::new();
    let mut depth = tokenizer.brace_depth();
    let mut token = tokenizer.advance_allow_eof();
    if token.is(TokenKind::LParen) {
        params = parameters(tokenizer)?;
        depth = tokenizer.brace_depth();
        token = tokenizer.advance_allow_eof();
    }

    let mut activator: Option<Token<'_>> = None;
    let mut clientside: Option<Token<'_>> = None;
    let mut net: Option<Token<'_>> = None;
    while !token.is(TokenKind::LBrace) {
        if !token.is(TokenKind::Symbol) {
            return Err(unexpected(token, "script type, flag or `{`"));
        }
        let slot = if is_word(&token, "clientside") {
            &mut clientside
        } else if is_word(&token, "net") {
            &mut net
        } else {
            &mut activator
        };
        if let Some(first) = slot.replace(token) {
            return Err(duplicate_modifier(first, token));
        }
        depth = tokenizer.brace_depth();
        token = tokenizer.advance_allow_eof();
    }
    skip_body(tokenizer, depth, "script", token.span())?;

    TaskOutcome::feature(FeatureKind::Script(Script {
        identifier: id.text().to_string(),
        quoted,
        activator: activator.map(|token| token.text().to_lowercase()),
        clientside: clientside.is_some(),
        net: net.is_some(),
        params,
    }))
}

fn duplicate_modifier(first: Token<'_>, second: Token<'_>) -> Diagnostic {
    let message = if is_word(&first, second.text()) {
        format!("`{}` is given twice", second.text())
    } else {
        format!(
            "script already has type `{}`, found `{}`",
            first.text(),
            second.text()
        )
    };
    Diagnostic::error(message)
        .with_code(ErrorCode::E101)
        .with_label(second.span(), "repeated here")
        .with_secondary_label(first.span(), "first given here")
}

/// Reads parameters up to and including the `)`.
fn parameters(tokenizer: &mut Tokenizer<'_>) -> Result<Vec<ScriptParam>> {
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
        let mut next = tokenizer.advance_allow_eof();
        let mut name = None;
        if next.is(TokenKind::Symbol) {
            name = Some(next.text().to_string());
            next = tokenizer.advance_allow_eof();
        }
        params.push(ScriptParam { ty, name });

        match next.kind() {
            TokenKind::RParen => return Ok(params),
            TokenKind::Comma => token = tokenizer.advance_allow_eof(),
            _ => return Err(unexpected(next, "`,` or `)`")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(src: &str) -> (Result<TaskOutcome>, Tokenizer<'_>) {
        let mut ctx = ParseContext::new();
        let mut tokenizer = Tokenizer::new(src);
        tokenizer.advance_allow_eof();
        let outcome = script(&mut ctx, &mut tokenizer);
        (outcome, tokenizer)
    }

    fn parsed(src: &str) -> Script {
        match run(src).0.unwrap() {
            TaskOutcome::Matched(Some(FeatureKind::Script(s))) => s,
            other => panic!("expected a script, got {other:?}"),
        }
    }

    #[test]
    fn test_numbered_script_with_activator() {
        let (outcome, tokenizer) = run("script 1 OPEN { Print(s:\"hi\"); }");
        match outcome.unwrap() {
            TaskOutcome::Matched(Some(FeatureKind::Script(s))) => {
                assert_eq!(s.identifier, "1");
                assert!(!s.quoted);
                assert_eq!(s.activator.as_deref(), Some("open"));
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_eq!(tokenizer.kind(), TokenKind::RBrace);
        assert_eq!(tokenizer.brace_depth(), 0);
    }

    #[test]
    fn test_named_script_with_params_and_flags() {
        let s = parsed("script \"Spawn Wave\" (int count, STR) NET CLIENTSIDE {}");
        assert_eq!(s.identifier, "Spawn Wave");
        assert!(s.quoted);
        assert!(s.net);
        assert!(s.clientside);
        assert_eq!(s.activator, None);
        assert_eq!(
            s.params,
            [
                ScriptParam {
                    ty: "int".to_string(),
                    name: Some("count".to_string()),
                },
                ScriptParam {
                    ty: "str".to_string(),
                    name: None,
                },
            ]
        );
    }

    #[test]
    fn test_void_params() {
        let s = parsed("script 3 (void) {}");
        assert!(s.params.is_empty());
    }

    #[test]
    fn test_duplicate_clientside() {
        let err = run("script 2 clientside clientside {}").0.unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::E101));
    }

    #[test]
    fn test_two_activators() {
        let err = run("script 2 OPEN ENTER {}").0.unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::E101));
        assert!(err.message().contains("OPEN"));
    }

    #[test]
    fn test_unclosed_body() {
        let err = run("script 4 { if (x) {").0.unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::E103));
    }
}
