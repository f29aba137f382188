//! Preprocessor-style directives: `#import`, `#library`, `#include`,
//! `#define` and `#libdefine`.
//!
//! All of them start with `#`, so each task looks at the keyword inside a
//! scope and declines without consuming anything when it is not its own.

use log::trace;
use strife_core::{
    feature::{Define, FeatureKind, Import, Include, Library},
    token::TokenKind,
};

use crate::{
    context::ParseContext,
    error::Result,
    tasks::{TaskOutcome, expect, is_word},
    tokenizer::{SkipMask, Tokenizer},
    value_parser::parse_value,
};

/// Moves past `#keyword` when the current position holds it.
fn directive(tokenizer: &mut Tokenizer<'_>, keyword: &str) -> bool {
    if !tokenizer.token().is(TokenKind::Hash) {
        return false;
    }
    let mut scope = tokenizer.begin_scope();
    let token = scope.advance_allow_eof();
    if !is_word(&token, keyword) {
        trace!(keyword, found = token.text(); "Directive keyword does not match");
        return false;
    }
    scope.accept();
    true
}

pub(super) fn import(_: &mut ParseContext, tokenizer: &mut Tokenizer<'_>) -> Result<TaskOutcome> {
    if !directive(tokenizer, "import") {
        return Ok(TaskOutcome::Declined);
    }
    let path = expect(tokenizer, TokenKind::String, "quoted import path")?;
    TaskOutcome::feature(FeatureKind::Import(Import {
        path: path.text().to_lowercase(),
    }))
}

pub(super) fn library(_: &mut ParseContext, tokenizer: &mut Tokenizer<'_>) -> Result<TaskOutcome> {
    if !directive(tokenizer, "library") {
        return Ok(TaskOutcome::Declined);
    }
    let name = expect(tokenizer, TokenKind::String, "quoted library name")?;
    TaskOutcome::feature(FeatureKind::Library(Library {
        name: name.text().to_uppercase(),
    }))
}

pub(super) fn include(_: &mut ParseContext, tokenizer: &mut Tokenizer<'_>) -> Result<TaskOutcome> {
    if !directive(tokenizer, "include") {
        return Ok(TaskOutcome::Declined);
    }
    let path = expect(tokenizer, TokenKind::String, "quoted include path")?;
    TaskOutcome::feature(FeatureKind::Include(Include {
        path: path.text().to_string(),
    }))
}

pub(super) fn define(_: &mut ParseContext, tokenizer: &mut Tokenizer<'_>) -> Result<TaskOutcome> {
    if !directive(tokenizer, "define") {
        return Ok(TaskOutcome::Declined);
    }
    parse_define(tokenizer).map(FeatureKind::Define).and_then(TaskOutcome::feature)
}

pub(super) fn lib_define(
    _: &mut ParseContext,
    tokenizer: &mut Tokenizer<'_>,
) -> Result<TaskOutcome> {
    if !directive(tokenizer, "libdefine") {
        return Ok(TaskOutcome::Declined);
    }
    parse_define(tokenizer).map(FeatureKind::LibDefine).and_then(TaskOutcome::feature)
}

/// `KEY value...` up to the end of the line.
fn parse_define(tokenizer: &mut Tokenizer<'_>) -> Result<Define> {
    let key = expect(tokenizer, TokenKind::Symbol, "define name")?;

    // The line break ends the value, so it must surface as a token.
    let mask = tokenizer.mask();
    tokenizer.set_mask(mask - SkipMask::NEWLINE);
    tokenizer.advance_allow_eof();
    let value = parse_value(tokenizer);
    tokenizer.set_mask(mask);

    Ok(Define {
        key: key.text().to_uppercase(),
        value: value?,
    })
}
