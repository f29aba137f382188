//! Configuration types for the Strife front end.
//!
//! All types implement [`serde::Deserialize`] with every field defaulted, so
//! a configuration file only needs the settings it changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`ParseSection`] - Implicit includes and task item tags for parsing.
//! - [`LowerConfig`] - Type allow-list and cast names used by lowering.
//!
//! # Example
//!
//! ```
//! # use strife::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.lower().default_type(), "int");
//! assert!(config.parse().task_tags().iter().any(|tag| tag == "todo"));
//! ```

use serde::Deserialize;

use strife_parser::ParseConfig;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Parsing section.
    #[serde(default)]
    parse: ParseSection,

    /// Lowering section.
    #[serde(default)]
    lower: LowerConfig,
}

impl AppConfig {
    pub fn new(parse: ParseSection, lower: LowerConfig) -> Self {
        Self { parse, lower }
    }

    pub fn parse(&self) -> &ParseSection {
        &self.parse
    }

    pub fn lower(&self) -> &LowerConfig {
        &self.lower
    }

    /// Builds the options handed to the parser.
    pub fn parse_config(&self) -> ParseConfig {
        ParseConfig::new(
            self.parse.implicit_includes.clone(),
            self.parse.task_tags.clone(),
        )
    }
}

/// Settings for the parse run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ParseSection {
    /// File names an `#include` may name without being loaded.
    implicit_includes: Vec<String>,

    /// Comment tags collected as task items.
    task_tags: Vec<String>,
}

impl ParseSection {
    pub fn new(implicit_includes: Vec<String>, task_tags: Vec<String>) -> Self {
        Self {
            implicit_includes,
            task_tags,
        }
    }

    pub fn implicit_includes(&self) -> &[String] {
        &self.implicit_includes
    }

    pub fn task_tags(&self) -> &[String] {
        &self.task_tags
    }
}

impl Default for ParseSection {
    fn default() -> Self {
        let defaults = ParseConfig::default();
        Self {
            implicit_includes: defaults.implicit_includes,
            task_tags: defaults.task_tags,
        }
    }
}

/// Settings for lowering to the plain ACC dialect.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LowerConfig {
    /// Type names ACC understands; anything else becomes `default_type`.
    allowed_types: Vec<String>,

    /// Replacement for types outside `allowed_types`.
    default_type: String,

    /// Names that, alone in parentheses inside a value, are casts to drop.
    cast_types: Vec<String>,
}

impl LowerConfig {
    pub fn new(allowed_types: Vec<String>, default_type: String, cast_types: Vec<String>) -> Self {
        Self {
            allowed_types,
            default_type,
            cast_types,
        }
    }

    pub fn allowed_types(&self) -> &[String] {
        &self.allowed_types
    }

    pub fn default_type(&self) -> &str {
        &self.default_type
    }

    pub fn cast_types(&self) -> &[String] {
        &self.cast_types
    }

    /// Returns `ty` if it is allowed, otherwise the default type.
    ///
    /// The comparison ignores case; the allowed spelling is returned.
    pub fn coerce_type<'a>(&'a self, ty: &'a str) -> &'a str {
        self.allowed_types
            .iter()
            .find(|allowed| allowed.eq_ignore_ascii_case(ty))
            .map_or(self.default_type.as_str(), String::as_str)
    }

    /// Returns `true` if `name` is a cast type, ignoring case.
    pub fn is_cast_type(&self, name: &str) -> bool {
        self.cast_types
            .iter()
            .any(|cast| cast.eq_ignore_ascii_case(name))
    }
}

impl Default for LowerConfig {
    fn default() -> Self {
        let strings = |names: &[&str]| names.iter().map(|name| name.to_string()).collect();
        Self {
            allowed_types: strings(&["str", "int", "fixed", "void", "bool"]),
            default_type: "int".to_string(),
            cast_types: strings(&["int", "fixed", "str", "bool", "raw"]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_type() {
        let config = LowerConfig::default();
        assert_eq!(config.coerce_type("STR"), "str");
        assert_eq!(config.coerce_type("void"), "void");
        assert_eq!(config.coerce_type("Vector"), "int");
    }

    #[test]
    fn test_cast_types_ignore_case() {
        let config = LowerConfig::default();
        assert!(config.is_cast_type("Fixed"));
        assert!(config.is_cast_type("raw"));
        assert!(!config.is_cast_type("void"));
    }

    #[test]
    fn test_parse_config_uses_section() {
        let config = AppConfig::new(
            ParseSection::new(vec!["base.acs".to_string()], vec!["fixme".to_string()]),
            LowerConfig::default(),
        );
        let parse = config.parse_config();
        assert_eq!(parse.implicit_includes, ["base.acs"]);
        assert_eq!(parse.task_tags, ["fixme"]);
    }
}
