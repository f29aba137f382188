//! # Strife Parser
//!
//! Declaration parser for ACS sources (ACC, BCC and GDCC dialects). It reads
//! the top-level declarations of a file and the files it includes into a
//! [`strife_core::codebase::Codebase`], skipping function and script bodies.
//!
//! ## Usage
//!
//! ```
//! # use strife_parser::{parse_str, ParseConfig, ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let source = r#"
//!         #library "game"
//!         namespace Game {
//!             enum Team { Red, Blue = 4 };
//!             function int Score(int team) { return 0; }
//!         }
//!     "#;
//!
//!     let codebase = parse_str("game.acs", source, ParseConfig::default())?;
//!     assert_eq!(codebase.total_features(), 3);
//!     Ok(())
//! }
//! ```

mod context;
mod doc_comment;
pub mod error;
mod parser;
mod span;
mod task_items;
mod tasks;
pub mod tokenizer;
mod value_parser;

pub use error::{Diagnostic, ErrorCode, ParseError};
pub use parser::{
    CancellationToken, FsLoader, LoadError, MemoryLoader, ParseConfig, ParseWarning, Parser,
    SourceLoader, normalize_path,
};
pub use span::Span;
pub use tasks::TaskKind;
pub use value_parser::parse_value;

use strife_core::codebase::Codebase;

/// Parses a single in-memory source.
///
/// Any `#include` other than the configured implicit ones fails with a
/// not-found error, since there is nothing to load it from.
///
/// # Errors
///
/// Returns the first fatal [`ParseError`].
pub fn parse_str(name: &str, src: &str, config: ParseConfig) -> Result<Codebase, ParseError> {
    let mut parser = Parser::with_loader(config, MemoryLoader::new());
    parser.parse_source(name, src)?;
    Ok(parser.finish())
}
