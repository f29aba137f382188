//! Task annotations harvested from line comments.
//!
//! A comment such as `// TODO: spawn the boss later` becomes a [`TaskItem`]
//! with the tag `TODO` and the text `spawn the boss later`.

use std::fmt;

/// A `TODO`-style annotation found in a single-line comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    /// The tag as written in the source (`TODO`, `hack`, ...).
    pub tag: String,
    /// The annotation text with the tag and separator removed.
    pub text: String,
    /// File the comment was found in.
    pub file: String,
    /// One-based line of the comment.
    pub line: usize,
    /// Label of the declaration the comment was consumed with, if any.
    pub feature: Option<String>,
}

impl fmt::Display for TaskItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}: {}", self.file, self.line, self.tag, self.text)?;
        if let Some(feature) = &self.feature {
            write!(f, " ({feature})")?;
        }
        Ok(())
    }
}
