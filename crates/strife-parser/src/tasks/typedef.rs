//! `typedef` in its variable and function-pointer forms.

use strife_core::{
    feature::{FeatureKind, Typedef},
    token::TokenKind,
};

use crate::{
    context::ParseContext,
    error::Result,
    tasks::{TaskOutcome, check, expect, is_word, unexpected},
    tokenizer::Tokenizer,
};

pub(super) fn typedef(_: &mut ParseContext, tokenizer: &mut Tokenizer<'_>) -> Result<TaskOutcome> {
    if tokenizer.kind() != TokenKind::Typedef {
        return Ok(TaskOutcome::Declined);
    }

    let ty = expect(tokenizer, TokenKind::Symbol, "type name")?
        .text()
        .to_lowercase();
    let name = expect(tokenizer, TokenKind::Symbol, "typedef name")?
        .text()
        .to_string();

    let next = tokenizer.advance_allow_eof();
    let typedef = match next.kind() {
        TokenKind::Semicolon => Typedef::Variable {
            ty,
            name,
            array_size: None,
        },
        TokenKind::LBracket => {
            let size = tokenizer.advance()?;
            let array_size = if size.is(TokenKind::RBracket) {
                None
            } else {
                expect(tokenizer, TokenKind::RBracket, "`]`")?;
                Some(size.text().to_string())
            };
            expect(tokenizer, TokenKind::Semicolon, "`;`")?;
            Typedef::Variable {
                ty,
                name,
                array_size,
            }
        }
        TokenKind::LParen => {
            let params = parameter_types(tokenizer)?;
            expect(tokenizer, TokenKind::Semicolon, "`;`")?;
            Typedef::Function {
                return_type: ty,
                name,
                params,
            }
        }
        _ => return Err(unexpected(next, "`;`, `[` or `(`")),
    };

    TaskOutcome::feature(FeatureKind::Typedef(typedef))
}

/// `int, str)` after the `(`; a lone `void` means no parameters.
fn parameter_types(tokenizer: &mut Tokenizer<'_>) -> Result<Vec<String>> {
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
        check(token, TokenKind::Symbol, "parameter type")?;
        params.push(token.text().to_lowercase());

        let next = tokenizer.advance_allow_eof();
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
    use crate::error::ErrorCode;

    fn run(src: &str) -> (Result<TaskOutcome>, Tokenizer<'_>) {
        let mut ctx = ParseContext::new();
        let mut tokenizer = Tokenizer::new(src);
        tokenizer.advance_allow_eof();
        let outcome = typedef(&mut ctx, &mut tokenizer);
        (outcome, tokenizer)
    }

    fn parsed(src: &str) -> Typedef {
        match run(src).0.unwrap() {
            TaskOutcome::Matched(Some(FeatureKind::Typedef(t))) => t,
            other => panic!("expected a typedef, got {other:?}"),
        }
    }

    #[test]
    fn test_variable_forms() {
        assert_eq!(
            parsed("typedef INT Handle;"),
            Typedef::Variable {
                ty: "int".to_string(),
                name: "Handle".to_string(),
                array_size: None,
            }
        );
        assert_eq!(
            parsed("typedef int Grid[16];"),
            Typedef::Variable {
                ty: "int".to_string(),
                name: "Grid".to_string(),
                array_size: Some("16".to_string()),
            }
        );
    }

    #[test]
    fn test_function_pointer_form() {
        let (outcome, tokenizer) = run("typedef void Callback(int, Str);");
        match outcome.unwrap() {
            TaskOutcome::Matched(Some(FeatureKind::Typedef(Typedef::Function {
                return_type,
                name,
                params,
            }))) => {
                assert_eq!(return_type, "void");
                assert_eq!(name, "Callback");
                assert_eq!(params, ["int", "str"]);
            }
            other => panic!("expected a function typedef, got {other:?}"),
        }
        assert_eq!(tokenizer.kind(), TokenKind::Semicolon);

        match parsed("typedef int Tick(void);") {
            Typedef::Function { params, .. } => assert!(params.is_empty()),
            other => panic!("expected a function typedef, got {other:?}"),
        }
    }

    #[test]
    fn test_other_keyword_declines() {
        let (outcome, tokenizer) = run("int x;");
        assert_eq!(outcome.unwrap(), TaskOutcome::Declined);
        assert_eq!(tokenizer.token().text(), "int");
    }

    #[test]
    fn test_missing_name_is_error() {
        let err = run("typedef int;").0.unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::E100));
        assert!(err.message().contains("typedef name"));
    }

    #[test]
    fn test_bad_parameter_separator_is_error() {
        let err = run("typedef void F(int; str);").0.unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::E100));
    }

    #[test]
    fn test_truncated_typedef_is_end_of_input() {
        let err = run("typedef int Handle").0.unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::E001));
    }
}
