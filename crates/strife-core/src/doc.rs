//! Documentation comments attached to features.

/// A documented parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocParam {
    pub name: String,
    pub description: Option<String>,
}

/// A parsed `/** ... */` documentation comment.
///
/// Text before the first tag and after `@summary`/`@description` forms the
/// summary; `@param name text` adds a parameter; `@return`/`@returns` sets the
/// return description; `@hidden` marks the feature as excluded from output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocComment {
    pub summary: Option<String>,
    pub params: Vec<DocParam>,
    pub returns: Option<String>,
    pub hidden: bool,
}

impl DocComment {
    /// Looks up the description of a documented parameter.
    pub fn param(&self, name: &str) -> Option<&DocParam> {
        self.params.iter().find(|param| param.name == name)
    }

    /// Returns `true` if the comment documents nothing.
    pub fn is_empty(&self) -> bool {
        self.summary.is_none() && self.params.is_empty() && self.returns.is_none() && !self.hidden
    }
}
