//! Variable declarations at map or namespace scope.
//!
//! ```text
//! private? type a, b = value, c[4], d[] = { ... }, e = { x, y };
//! ```
//!
//! This is the fallback task: it accepts any `type name` that is not the
//! head of a function.

use strife_core::{
    feature::{FeatureKind, VariableCollection, VariableItem},
    token::TokenKind,
};

use crate::{
    context::ParseContext,
    error::Result,
    tasks::{
        TaskOutcome, access_modifier, expect, is_function_head, literal_text, skip_body,
        unexpected,
    },
    tokenizer::Tokenizer,
    value_parser::parse_value,
};

pub(super) fn variables(
    _: &mut ParseContext,
    tokenizer: &mut Tokenizer<'_>,
) -> Result<TaskOutcome> {
    let mut scope = tokenizer.begin_scope();
    let access = access_modifier(&mut scope);
    if access.is_private() && !scope.token().is(TokenKind::Symbol) {
        return Err(unexpected(scope.token(), "a declaration after `private`"));
    }
    if scope.kind() != TokenKind::Symbol || is_function_head(&mut scope) {
        return Ok(TaskOutcome::Declined);
    }
    scope.accept();

    let ty = tokenizer.token().text().to_lowercase();
    let mut items = Vec::new();
    loop {
        items.push(item(tokenizer)?);
        let next = tokenizer.token();
        match next.kind() {
            TokenKind::Semicolon => break,
            TokenKind::Comma => {}
            _ => return Err(unexpected(next, "`,` or `;` after the variable")),
        }
    }

    TaskOutcome::feature(FeatureKind::Variables(VariableCollection { access, ty, items }))
}

/// Reads one declarator, leaving the following `,` or `;` current.
fn item(tokenizer: &mut Tokenizer<'_>) -> Result<VariableItem> {
    let name = expect(tokenizer, TokenKind::Symbol, "variable name")?
        .text()
        .to_string();

    let mut next = tokenizer.advance_allow_eof();
    if next.is(TokenKind::LBracket) {
        let token = tokenizer.advance()?;
        let size = if token.is(TokenKind::RBracket) {
            None
        } else {
            expect(tokenizer, TokenKind::RBracket, "`]`")?;
            Some(token.text().to_string())
        };

        next = tokenizer.advance_allow_eof();
        let mut initializer = None;
        if next.is(TokenKind::Equals) {
            initializer = Some(array_initializer(tokenizer)?);
            tokenizer.advance_allow_eof();
        }
        return Ok(VariableItem::Array {
            name,
            size,
            initializer,
        });
    }

    if !next.is(TokenKind::Equals) {
        return Ok(VariableItem::Scalar { name, value: None });
    }

    if tokenizer.peek().is(TokenKind::LBrace) {
        let values = struct_values(tokenizer)?;
        tokenizer.advance_allow_eof();
        return Ok(VariableItem::StructInit { name, values });
    }

    tokenizer.advance()?;
    let value = parse_value(tokenizer)?;
    Ok(VariableItem::Scalar {
        name,
        value: Some(value),
    })
}

/// Captures `{ ... }` after the `=` verbatim, leaving the `}` current.
fn array_initializer(tokenizer: &mut Tokenizer<'_>) -> Result<String> {
    let depth = tokenizer.brace_depth();
    let open = expect(tokenizer, TokenKind::LBrace, "`{` to open the array initializer")?;
    skip_body(tokenizer, depth, "array initializer", open.span())?;
    let close = tokenizer.token();
    Ok(tokenizer.source()[open.span().start()..close.span().end()].to_string())
}

/// Collects the literals of `{ a, b }` after the `=`, leaving the `}` current.
fn struct_values(tokenizer: &mut Tokenizer<'_>) -> Result<Vec<String>> {
    let depth = tokenizer.brace_depth();
    let open = tokenizer.advance()?;
    let mut values = Vec::new();
    loop {
        let token = tokenizer.advance_allow_eof();
        if token.is_eof() {
            skip_body(tokenizer, depth, "struct initializer", open.span())?;
        }
        if tokenizer.brace_depth() == depth {
            return Ok(values);
        }
        if !token.is(TokenKind::Comma) {
            values.push(literal_text(&token));
        }
    }
}
