//! Error and diagnostic system for the Strife parser.
//!
//! # Overview
//!
//! Grammar tasks report problems as a [`Diagnostic`]: a message with an
//! optional [`ErrorCode`], labelled source spans and help text. Every
//! diagnostic with error severity is fatal to a parse run; the driver wraps it
//! in a [`ParseError`] that also records the file, line and task that failed.
//! Warnings are collected on the parser and never abort the run.
//!
//! # Example
//!
//! ```
//! # use strife_parser::error::{Diagnostic, ErrorCode};
//! # use strife_parser::Span;
//!
//! let diag = Diagnostic::error("expected `;`, found `}`")
//!     .with_code(ErrorCode::E100)
//!     .with_label(Span::new(42..43), "unexpected token")
//!     .with_help("terminate the declaration with `;`");
//! assert_eq!(diag.to_string(), "error[E100]: expected `;`, found `}`");
//! ```

mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use parse_error::Result;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
