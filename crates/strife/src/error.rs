//! Error types for Strife operations.
//!
//! This module provides the main error type [`StrifeError`] which wraps the
//! error conditions that can occur while parsing and lowering ACS sources.

use std::io;

use thiserror::Error;

use strife_parser::ParseError;

/// The main error type for Strife operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant carries a [`ParseError`], which holds the diagnostic
/// with its labelled spans and the source text of the file that failed.
#[derive(Debug, Error)]
pub enum StrifeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A configuration file that is missing or does not deserialize.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Parse(#[from] ParseError),
}
