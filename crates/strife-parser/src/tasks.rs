//! Grammar tasks for top-level declarations.
//!
//! # Overview
//!
//! Each task recognises one declaration form. It is called with the first
//! token of a declaration as the current token and either:
//!
//! - declines, leaving the tokenizer exactly where it was, so the next task
//!   can try;
//! - matches, leaving the last token of the declaration current and
//!   optionally producing a [`FeatureKind`];
//! - fails with a [`Diagnostic`], which aborts the run.
//!
//! Tasks run in the order of [`TASKS`]. The order matters where forms share a
//! prefix: `private` is tried as enum, struct and function before variable,
//! and function before script and variable.

mod directive;
mod enums;
mod function;
mod namespace;
mod scoped_variable;
mod script;
mod structs;
mod typedef;
mod variable;

use std::fmt;

use strife_core::{feature::Access, feature::FeatureKind, token::TokenKind};

use crate::{
    context::ParseContext,
    error::{Diagnostic, ErrorCode, Result},
    span::Span,
    tokenizer::{Token, Tokenizer},
};

/// Identifies a grammar task in logs and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    NamespaceOpen,
    NamespaceClose,
    Import,
    Library,
    Include,
    Define,
    LibDefine,
    Typedef,
    WorldVariable,
    GlobalVariable,
    Enum,
    Struct,
    Function,
    Script,
    Variable,
}

impl TaskKind {
    pub fn name(&self) -> &'static str {
        match self {
            TaskKind::NamespaceOpen => "namespace",
            TaskKind::NamespaceClose => "namespace close",
            TaskKind::Import => "#import",
            TaskKind::Library => "#library",
            TaskKind::Include => "#include",
            TaskKind::Define => "#define",
            TaskKind::LibDefine => "#libdefine",
            TaskKind::Typedef => "typedef",
            TaskKind::WorldVariable => "world variable",
            TaskKind::GlobalVariable => "global variable",
            TaskKind::Enum => "enum",
            TaskKind::Struct => "struct",
            TaskKind::Function => "function",
            TaskKind::Script => "script",
            TaskKind::Variable => "variable declaration",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a task did with the current position.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TaskOutcome {
    Declined,
    Matched(Option<FeatureKind>),
}

impl TaskOutcome {
    fn feature(kind: FeatureKind) -> Result<Self> {
        Ok(TaskOutcome::Matched(Some(kind)))
    }
}

pub(crate) type TaskFn = fn(&mut ParseContext, &mut Tokenizer<'_>) -> Result<TaskOutcome>;

pub(crate) const TASKS: [(TaskKind, TaskFn); 15] = [
    (TaskKind::NamespaceOpen, namespace::open),
    (TaskKind::NamespaceClose, namespace::close),
    (TaskKind::Import, directive::import),
    (TaskKind::Library, directive::library),
    (TaskKind::Include, directive::include),
    (TaskKind::Define, directive::define),
    (TaskKind::LibDefine, directive::lib_define),
    (TaskKind::Typedef, typedef::typedef),
    (TaskKind::WorldVariable, scoped_variable::world),
    (TaskKind::GlobalVariable, scoped_variable::global),
    (TaskKind::Enum, enums::enumeration),
    (TaskKind::Struct, structs::structure),
    (TaskKind::Function, function::function),
    (TaskKind::Script, script::script),
    (TaskKind::Variable, variable::variables),
];

fn found(token: &Token<'_>) -> String {
    match token.kind() {
        TokenKind::String => format!("\"{}\"", token.text()),
        TokenKind::Newline => "newline".to_string(),
        _ => format!("`{}`", token.text()),
    }
}

/// A string literal whose closing quote is missing.
pub(crate) fn unterminated_string(token: Token<'_>) -> Diagnostic {
    Diagnostic::error("string literal is never closed")
        .with_code(ErrorCode::E103)
        .with_label(token.span(), "string starts here")
        .with_help("add the missing `\"`")
}

/// Builds the diagnostic for a token that does not fit.
pub(crate) fn unexpected(token: Token<'_>, expected: &str) -> Diagnostic {
    if token.is_unterminated_string() {
        return unterminated_string(token);
    }
    if token.is_eof() {
        return Diagnostic::error(format!("unexpected end of input, expected {expected}"))
            .with_code(ErrorCode::E001)
            .with_label(token.span(), "input ends here");
    }
    Diagnostic::error(format!("expected {expected}, found {}", found(&token)))
        .with_code(ErrorCode::E100)
        .with_label(token.span(), "unexpected token")
}

/// Checks the kind of an already scanned token.
pub(crate) fn check<'src>(
    token: Token<'src>,
    kind: TokenKind,
    expected: &str,
) -> Result<Token<'src>> {
    if token.is(kind) && !token.is_unterminated_string() {
        Ok(token)
    } else {
        Err(unexpected(token, expected))
    }
}

/// Advances and checks the kind of the new token.
pub(crate) fn expect<'src>(
    tokenizer: &mut Tokenizer<'src>,
    kind: TokenKind,
    expected: &str,
) -> Result<Token<'src>> {
    let token = tokenizer.advance_allow_eof();
    check(token, kind, expected)
}

/// Returns `true` if the token is the symbol `word`, ignoring case.
pub(crate) fn is_word(token: &Token<'_>, word: &str) -> bool {
    token.is(TokenKind::Symbol) && token.text().eq_ignore_ascii_case(word)
}

/// Token text as written, with quotes restored around strings.
pub(crate) fn literal_text(token: &Token<'_>) -> String {
    match token.kind() {
        TokenKind::String => format!("\"{}\"", token.text()),
        _ => token.text().to_string(),
    }
}

/// Returns `true` if the current token starts `type name(`.
///
/// Looks ahead without consuming anything.
pub(crate) fn is_function_head(tokenizer: &mut Tokenizer<'_>) -> bool {
    if !tokenizer.token().is(TokenKind::Symbol) {
        return false;
    }
    let mut scope = tokenizer.begin_scope();
    let name = scope.advance_allow_eof();
    let open = scope.advance_allow_eof();
    name.is(TokenKind::Symbol) && open.is(TokenKind::LParen)
}

/// Consumes a leading `private`, leaving the following token current.
///
/// Never fails: a `private` with nothing usable after it is left for the
/// variable task to report.
pub(crate) fn access_modifier(tokenizer: &mut Tokenizer<'_>) -> Access {
    if tokenizer.kind() == TokenKind::Private {
        tokenizer.advance_allow_eof();
        return Access::Private;
    }
    Access::Public
}

/// Skips a brace-delimited body whose `{` is the current token.
///
/// `depth` is the brace depth before that `{`; scanning stops once the
/// matching `}` brings the depth back to it.
pub(crate) fn skip_body(
    tokenizer: &mut Tokenizer<'_>,
    depth: i32,
    what: &str,
    open: Span,
) -> Result<()> {
    while tokenizer.brace_depth() > depth {
        if tokenizer.advance_allow_eof().is_eof() {
            return Err(Diagnostic::error(format!("{what} body is never closed"))
                .with_code(ErrorCode::E103)
                .with_label(open, "body opened here")
                .with_help("add the missing `}`"));
        }
    }
    Ok(())
}
