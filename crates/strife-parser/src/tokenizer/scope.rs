//! Transactional lookahead over the tokenizer.

use std::ops::{Deref, DerefMut};

use crate::tokenizer::{Snapshot, Tokenizer};

/// A speculative region of tokenization.
///
/// Created by [`Tokenizer::begin_scope`]. The scope dereferences to the
/// tokenizer, so everything consumed through it is provisional: unless
/// [`Scope::accept`] is called, dropping the scope restores the tokenizer to
/// the exact state it had when the scope began, including trivia. This holds
/// on every exit path, `?` and early returns included.
///
/// Scopes nest. An inner scope borrows the outer one and only governs its own
/// extent; accepting it does not commit the outer scope.
pub struct Scope<'t, 'src> {
    tokenizer: &'t mut Tokenizer<'src>,
    snapshot: Snapshot<'src>,
    accepted: bool,
}

impl<'t, 'src> Scope<'t, 'src> {
    pub(crate) fn new(tokenizer: &'t mut Tokenizer<'src>) -> Self {
        let snapshot = tokenizer.snapshot();
        Self {
            tokenizer,
            snapshot,
            accepted: false,
        }
    }

    /// Keeps everything consumed within this scope.
    pub fn accept(mut self) {
        self.accepted = true;
    }
}

impl<'src> Deref for Scope<'_, 'src> {
    type Target = Tokenizer<'src>;

    fn deref(&self) -> &Self::Target {
        self.tokenizer
    }
}

impl DerefMut for Scope<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.tokenizer
    }
}

impl Drop for Scope<'_, '_> {
    fn drop(&mut self) {
        if !self.accepted {
            self.tokenizer.restore(self.snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use strife_core::token::TokenKind;

    use crate::tokenizer::Tokenizer;

    #[test]
    fn test_rollback_on_drop() {
        let mut tokenizer = Tokenizer::new("a b c");
        tokenizer.advance().unwrap();
        {
            let mut scope = tokenizer.begin_scope();
            scope.advance().unwrap();
            scope.advance().unwrap();
            assert_eq!(scope.token().text(), "c");
        }
        assert_eq!(tokenizer.token().text(), "a");
        assert_eq!(tokenizer.advance().unwrap().text(), "b");
    }

    #[test]
    fn test_accept_keeps_state() {
        let mut tokenizer = Tokenizer::new("a b c");
        tokenizer.advance().unwrap();
        let mut scope = tokenizer.begin_scope();
        scope.advance().unwrap();
        scope.accept();
        assert_eq!(tokenizer.token().text(), "b");
    }

    #[test]
    fn test_rollback_on_error_path() {
        fn speculate(tokenizer: &mut Tokenizer<'_>) -> Result<(), ()> {
            let mut scope = tokenizer.begin_scope();
            scope.advance().map_err(|_| ())?;
            if scope.token().kind() != TokenKind::LParen {
                return Err(());
            }
            scope.accept();
            Ok(())
        }

        let mut tokenizer = Tokenizer::new("x y");
        tokenizer.advance().unwrap();
        assert!(speculate(&mut tokenizer).is_err());
        assert_eq!(tokenizer.token().text(), "x");
    }

    #[test]
    fn test_nested_inner_rollback_outer_accept() {
        let mut tokenizer = Tokenizer::new("a b c d");
        tokenizer.advance().unwrap();
        {
            let mut outer = tokenizer.begin_scope();
            outer.advance().unwrap();
            {
                let mut inner = outer.begin_scope();
                inner.advance().unwrap();
                inner.advance().unwrap();
            }
            assert_eq!(outer.token().text(), "b");
            outer.accept();
        }
        assert_eq!(tokenizer.token().text(), "b");
    }

    #[test]
    fn test_rollback_restores_depth_line_and_trivia() {
        let mut tokenizer = Tokenizer::new("a\n{ // note\n(b");
        tokenizer.advance().unwrap();
        let before = (
            tokenizer.line(),
            tokenizer.brace_depth(),
            tokenizer.paren_depth(),
            tokenizer.trivia().len(),
            tokenizer.position(),
        );
        {
            let mut scope = tokenizer.begin_scope();
            scope.advance().unwrap();
            scope.advance().unwrap();
            scope.advance().unwrap();
            assert_eq!(scope.brace_depth(), 1);
            assert_eq!(scope.paren_depth(), 1);
        }
        let after = (
            tokenizer.line(),
            tokenizer.brace_depth(),
            tokenizer.paren_depth(),
            tokenizer.trivia().len(),
            tokenizer.position(),
        );
        assert_eq!(before, after);
    }
}
