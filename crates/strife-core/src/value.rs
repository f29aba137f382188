//! Un-evaluated value expressions.
//!
//! Right-hand sides of defines, enum members and variable initialisers are
//! kept as a tree of tokens: every parenthesis level becomes a
//! [`ValueSymbol::Group`], everything else a [`ValueSymbol::Leaf`]. Operators
//! are never interpreted.

use std::fmt;

use crate::token::TokenKind;

/// One element of a value expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSymbol {
    /// A single token. String text excludes the quotes.
    Leaf { kind: TokenKind, text: String },
    /// The contents of one parenthesis level.
    Group(Vec<ValueSymbol>),
}

impl ValueSymbol {
    /// Creates a leaf symbol.
    pub fn leaf(kind: TokenKind, text: impl Into<String>) -> Self {
        Self::Leaf {
            kind,
            text: text.into(),
        }
    }

    /// Returns the leaf's kind and text, or `None` for a group.
    pub fn as_leaf(&self) -> Option<(TokenKind, &str)> {
        match self {
            Self::Leaf { kind, text } => Some((*kind, text)),
            Self::Group(_) => None,
        }
    }

    /// Returns the group's children, or `None` for a leaf.
    pub fn as_group(&self) -> Option<&[ValueSymbol]> {
        match self {
            Self::Leaf { .. } => None,
            Self::Group(children) => Some(children),
        }
    }

    fn push_tokens(&self, out: &mut Vec<String>) {
        match self {
            Self::Leaf {
                kind: TokenKind::String,
                text,
            } => out.push(format!("\"{text}\"")),
            Self::Leaf { text, .. } => out.push(text.clone()),
            Self::Group(children) => {
                out.push("(".to_string());
                for child in children {
                    child.push_tokens(out);
                }
                out.push(")".to_string());
            }
        }
    }
}

/// A complete value expression.
///
/// # Examples
///
/// ```
/// use strife_core::{token::TokenKind, value::{Value, ValueSymbol}};
///
/// let value = Value::new(vec![
///     ValueSymbol::Group(vec![ValueSymbol::leaf(TokenKind::Symbol, "int")]),
///     ValueSymbol::leaf(TokenKind::Number, "5"),
/// ]);
/// assert_eq!(value.tokens(), ["(", "int", ")", "5"]);
/// assert_eq!(value.to_string(), "(int) 5");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Value(Vec<ValueSymbol>);

impl Value {
    pub fn new(symbols: Vec<ValueSymbol>) -> Self {
        Self(symbols)
    }

    pub fn symbols(&self) -> &[ValueSymbol] {
        &self.0
    }

    pub fn into_symbols(self) -> Vec<ValueSymbol> {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Flattens the tree back into its token texts, parentheses included.
    pub fn tokens(&self) -> Vec<String> {
        let mut out = Vec::new();
        for symbol in &self.0 {
            symbol.push_tokens(&mut out);
        }
        out
    }
}

impl From<Vec<ValueSymbol>> for Value {
    fn from(symbols: Vec<ValueSymbol>) -> Self {
        Self(symbols)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut previous: Option<String> = None;
        for token in self.tokens() {
            if let Some(prev) = &previous {
                if prev != "(" && token != ")" {
                    f.write_str(" ")?;
                }
            }
            f.write_str(&token)?;
            previous = Some(token);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(text: &str) -> ValueSymbol {
        ValueSymbol::leaf(TokenKind::Number, text)
    }

    #[test]
    fn test_nested_groups_flatten() {
        let value = Value::new(vec![ValueSymbol::Group(vec![
            num("1"),
            ValueSymbol::leaf(TokenKind::Symbol, "+"),
            ValueSymbol::Group(vec![num("2")]),
        ])]);

        assert_eq!(value.tokens(), ["(", "1", "+", "(", "2", ")", ")"]);
        assert_eq!(value.to_string(), "(1 + (2))");
    }

    #[test]
    fn test_string_leaf_is_quoted_when_flattened() {
        let value = Value::new(vec![ValueSymbol::leaf(TokenKind::String, "MAP01")]);
        assert_eq!(value.to_string(), "\"MAP01\"");
    }

    #[test]
    fn test_leaf_and_group_accessors() {
        let leaf = num("7");
        assert_eq!(leaf.as_leaf(), Some((TokenKind::Number, "7")));
        assert!(leaf.as_group().is_none());

        let group = ValueSymbol::Group(vec![leaf.clone()]);
        assert_eq!(group.as_group(), Some(&[leaf][..]));
    }
}
