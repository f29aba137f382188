//! `private? enum Name? (: type)? { A, B = value, ... };?`

use strife_core::{
    feature::{Enum, EnumMember, FeatureKind},
    token::TokenKind,
};

use crate::{
    context::ParseContext,
    error::Result,
    tasks::{TaskOutcome, access_modifier, check, expect, unexpected},
    tokenizer::Tokenizer,
    value_parser::parse_value,
};

pub(super) fn enumeration(
    _: &mut ParseContext,
    tokenizer: &mut Tokenizer<'_>,
) -> Result<TaskOutcome> {
    let mut scope = tokenizer.begin_scope();
    let access = access_modifier(&mut scope);
    if scope.kind() != TokenKind::Enum {
        return Ok(TaskOutcome::Declined);
    }
    scope.accept();

    let mut name = None;
    let mut underlying_type = None;
    let mut token = tokenizer.advance_allow_eof();
    if token.is(TokenKind::Symbol) {
        name = Some(token.text().to_string());
        token = tokenizer.advance_allow_eof();
    }
    if token.is(TokenKind::Colon) {
        let ty = expect(tokenizer, TokenKind::Symbol, "underlying enum type")?;
        underlying_type = Some(ty.text().to_lowercase());
        token = tokenizer.advance_allow_eof();
    }
    check(token, TokenKind::LBrace, "`{` to open the enum body")?;

    let members = members(tokenizer)?;
    if tokenizer.peek().is(TokenKind::Semicolon) {
        tokenizer.advance()?;
    }

    TaskOutcome::feature(FeatureKind::Enum(Enum {
        access,
        name,
        underlying_type,
        members,
    }))
}

/// Reads members up to and including the closing `}`.
fn members(tokenizer: &mut Tokenizer<'_>) -> Result<Vec<EnumMember>> {
    let mut members = Vec::new();
    loop {
        let token = tokenizer.advance_allow_eof();
        if token.is(TokenKind::RBrace) {
            return Ok(members);
        }
        check(token, TokenKind::Symbol, "enum member name or `}`")?;

        let mut next = tokenizer.advance_allow_eof();
        let value = if next.is(TokenKind::Equals) {
            tokenizer.advance()?;
            let value = parse_value(tokenizer)?;
            next = tokenizer.token();
            Some(value)
        } else {
            None
        };

        members.push(EnumMember {
            name: token.text().to_string(),
            value,
        });

        match next.kind() {
            TokenKind::RBrace => return Ok(members),
            TokenKind::Comma => {}
            _ => return Err(unexpected(next, "`,` or `}` after the enum member")),
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
        let outcome = enumeration(&mut ctx, &mut tokenizer);
        (outcome, tokenizer)
    }

    fn parsed(src: &str) -> Enum {
        match run(src).0.unwrap() {
            TaskOutcome::Matched(Some(FeatureKind::Enum(e))) => e,
            other => panic!("expected an enum, got {other:?}"),
        }
    }

    #[test]
    fn test_named_typed_enum() {
        let e = parsed("private enum Color : INT { Red, Green = 4, Blue = (1 + 2) };");
        assert!(e.access.is_private());
        assert_eq!(e.name.as_deref(), Some("Color"));
        assert_eq!(e.underlying_type.as_deref(), Some("int"));
        let names: Vec<_> = e.members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Red", "Green", "Blue"]);
        assert!(e.members[0].value.is_none());
        assert_eq!(e.members[1].value.as_ref().unwrap().to_string(), "4");
        assert_eq!(e.members[2].value.as_ref().unwrap().to_string(), "(1 + 2)");
    }

    #[test]
    fn test_anonymous_enum_leaves_semicolon_current() {
        let (outcome, tokenizer) = run("enum { A, B, };");
        assert!(matches!(outcome, Ok(TaskOutcome::Matched(Some(_)))));
        assert_eq!(tokenizer.kind(), TokenKind::Semicolon);
    }

    #[test]
    fn test_without_semicolon_leaves_brace_current() {
        let (_, tokenizer) = run("enum E { A } int x;");
        assert_eq!(tokenizer.kind(), TokenKind::RBrace);
    }

    #[test]
    fn test_private_non_enum_declines_without_consuming() {
        let (outcome, tokenizer) = run("private int x;");
        assert_eq!(outcome.unwrap(), TaskOutcome::Declined);
        assert_eq!(tokenizer.kind(), TokenKind::Private);
    }

    #[test]
    fn test_missing_separator_is_error() {
        let err = run("enum { A B }").0.unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::E100));
    }
}
