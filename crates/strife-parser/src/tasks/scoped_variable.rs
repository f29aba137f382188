//! `world int 1:name;` and `global int 2:name[];`

use strife_core::{
    feature::{FeatureKind, ScopedVariable},
    token::TokenKind,
};

use crate::{
    context::ParseContext,
    error::Result,
    tasks::{TaskOutcome, check, expect},
    tokenizer::Tokenizer,
};

pub(super) fn world(_: &mut ParseContext, tokenizer: &mut Tokenizer<'_>) -> Result<TaskOutcome> {
    if tokenizer.kind() != TokenKind::World {
        return Ok(TaskOutcome::Declined);
    }
    parse_scoped(tokenizer).map(FeatureKind::WorldVariable).and_then(TaskOutcome::feature)
}

pub(super) fn global(_: &mut ParseContext, tokenizer: &mut Tokenizer<'_>) -> Result<TaskOutcome> {
    if tokenizer.kind() != TokenKind::Global {
        return Ok(TaskOutcome::Declined);
    }
    parse_scoped(tokenizer).map(FeatureKind::GlobalVariable).and_then(TaskOutcome::feature)
}

fn parse_scoped(tokenizer: &mut Tokenizer<'_>) -> Result<ScopedVariable> {
    let ty = expect(tokenizer, TokenKind::Symbol, "variable type")?;
    let index = expect(tokenizer, TokenKind::Number, "variable index")?;
    expect(tokenizer, TokenKind::Colon, "`:` after the index")?;
    let name = expect(tokenizer, TokenKind::Symbol, "variable name")?;

    let mut next = tokenizer.advance_allow_eof();
    let is_array = next.is(TokenKind::LBracket);
    if is_array {
        expect(tokenizer, TokenKind::RBracket, "`]`")?;
        next = tokenizer.advance_allow_eof();
    }
    check(next, TokenKind::Semicolon, "`;`")?;

    Ok(ScopedVariable {
        ty: ty.text().to_lowercase(),
        index: index.text().to_string(),
        name: name.text().to_string(),
        is_array,
    })
}
