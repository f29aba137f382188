//! `private? struct Name? { type a, b[4]; ... } instance, ...;?`

use strife_core::{
    feature::{FeatureKind, Struct, StructMember},
    token::TokenKind,
};

use crate::{
    context::ParseContext,
    error::Result,
    tasks::{TaskOutcome, access_modifier, check, expect, unexpected},
    tokenizer::Tokenizer,
};

pub(super) fn structure(
    _: &mut ParseContext,
    tokenizer: &mut Tokenizer<'_>,
) -> Result<TaskOutcome> {
    let mut scope = tokenizer.begin_scope();
    let access = access_modifier(&mut scope);
    if scope.kind() != TokenKind::Struct {
        return Ok(TaskOutcome::Declined);
    }
    scope.accept();

    let mut name = None;
    let mut token = tokenizer.advance_allow_eof();
    if token.is(TokenKind::Symbol) {
        name = Some(token.text().to_string());
        token = tokenizer.advance_allow_eof();
    }
    check(token, TokenKind::LBrace, "`{` to open the struct body")?;

    let members = members(tokenizer)?;
    let instances = instances(tokenizer)?;

    TaskOutcome::feature(FeatureKind::Struct(Struct {
        access,
        name,
        members,
        instances,
    }))
}

/// Reads `type name[size], name;` groups up to and including the `}`.
fn members(tokenizer: &mut Tokenizer<'_>) -> Result<Vec<StructMember>> {
    let mut members = Vec::new();
    loop {
        let token = tokenizer.advance_allow_eof();
        if token.is(TokenKind::RBrace) {
            return Ok(members);
        }
        let ty = check(token, TokenKind::Symbol, "member type or `}`")?
            .text()
            .to_lowercase();

        loop {
            let name = expect(tokenizer, TokenKind::Symbol, "member name")?;
            let mut next = tokenizer.advance_allow_eof();
            let mut array_size = None;
            if next.is(TokenKind::LBracket) {
                let size = tokenizer.advance()?;
                if !size.is(TokenKind::RBracket) {
                    array_size = Some(size.text().to_string());
                    expect(tokenizer, TokenKind::RBracket, "`]`")?;
                }
                next = tokenizer.advance_allow_eof();
            }

            members.push(StructMember {
                ty: ty.clone(),
                name: name.text().to_string(),
                array_size,
            });

            match next.kind() {
                TokenKind::Comma => {}
                TokenKind::Semicolon => break,
                _ => return Err(unexpected(next, "`,` or `;` after the member")),
            }
        }
    }
}

/// Instance names after the closing brace, and the optional `;`.
///
/// The names are only taken when the tokens after `}` look like
/// `name,` or `name;`; anything else is the next declaration.
fn instances(tokenizer: &mut Tokenizer<'_>) -> Result<Vec<String>> {
    let mut instances = Vec::new();
    if tokenizer.peek().is(TokenKind::Semicolon) {
        tokenizer.advance()?;
        return Ok(instances);
    }

    let declares_instances = {
        let mut scope = tokenizer.begin_scope();
        let first = scope.advance_allow_eof();
        let second = scope.advance_allow_eof();
        first.is(TokenKind::Symbol)
            && matches!(second.kind(), TokenKind::Comma | TokenKind::Semicolon)
    };
    if !declares_instances {
        return Ok(instances);
    }

    loop {
        let name = expect(tokenizer, TokenKind::Symbol, "instance name")?;
        instances.push(name.text().to_string());
        let next = tokenizer.advance_allow_eof();
        match next.kind() {
            TokenKind::Comma => {}
            TokenKind::Semicolon => return Ok(instances),
            _ => return Err(unexpected(next, "`,` or `;` after the instance name")),
        }
    }
}
