//! Strife - a declaration front end for ACS sources.
//!
//! Parses ACC, BCC and GDCC files into a namespace-scoped document tree,
//! follows their includes, lowers the tree to what plain ACC accepts, and
//! lists function bindings for editor tooling.

pub mod bindings;
pub mod config;
pub mod lower;

mod error;

pub use strife_core::{codebase, doc, feature, identifier, task_item, token, value};
pub use strife_parser::{
    CancellationToken, Diagnostic, ErrorCode, FsLoader, MemoryLoader, ParseError, ParseWarning,
    SourceLoader, Span, TaskKind,
};

pub use error::StrifeError;

use std::path::Path;

use log::{debug, info, trace, warn};

use strife_core::codebase::Codebase;
use strife_parser::Parser;

use bindings::FunctionBinding;
use config::AppConfig;

/// The result of a successful parse run.
#[derive(Debug, Clone)]
pub struct ParseOutput {
    codebase: Codebase,
    warnings: Vec<ParseWarning>,
    files: Vec<String>,
}

impl ParseOutput {
    /// The document tree.
    pub fn codebase(&self) -> &Codebase {
        &self.codebase
    }

    /// Non-fatal diagnostics, in the order they were found.
    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    /// Normalised paths of every parsed file, in parse order.
    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn into_codebase(self) -> Codebase {
        self.codebase
    }
}

/// Entry point for parsing, lowering and binding extraction.
///
/// # Examples
///
/// ```rust
/// use strife::{Frontend, config::AppConfig};
///
/// let frontend = Frontend::new(AppConfig::default());
/// let output = frontend
///     .parse_source("game.acs", "enum { RED, BLUE };\nfunction void Tick(void) {}")
///     .expect("Failed to parse");
///
/// let lowered = frontend.lower(output.codebase());
/// assert_eq!(lowered.features().len(), 3);
///
/// let bindings = frontend.bindings(output.codebase());
/// assert_eq!(bindings[0].qualified_name(), "Tick");
/// ```
#[derive(Debug, Default)]
pub struct Frontend {
    config: AppConfig,
    cancel: Option<CancellationToken>,
}

impl Frontend {
    /// Create a front end with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            cancel: None,
        }
    }

    /// Lets the caller stop a run from another thread.
    ///
    /// A cancelled run fails with [`ErrorCode::E300`].
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse the file at `path` and everything it includes.
    ///
    /// # Errors
    ///
    /// Returns `StrifeError::Parse` for the first fatal error in any file.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use strife::Frontend;
    ///
    /// let output = Frontend::default()
    ///     .parse_file("scripts/map01.acs")
    ///     .expect("Failed to parse");
    /// println!("{} files", output.files().len());
    /// ```
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<ParseOutput, StrifeError> {
        let path = path.as_ref();
        info!(path:? = path; "Parsing file");
        self.run(FsLoader, |parser| parser.parse_file(path))
    }

    /// Parse `source` as if it were the file `name`.
    ///
    /// Includes are read from disk relative to the directory of `name`.
    ///
    /// # Errors
    ///
    /// Returns `StrifeError::Parse` for the first fatal error.
    pub fn parse_source(&self, name: &str, source: &str) -> Result<ParseOutput, StrifeError> {
        self.parse_source_with(FsLoader, name, source)
    }

    /// Parse `source` with includes served by `loader`.
    ///
    /// # Errors
    ///
    /// Returns `StrifeError::Parse` for the first fatal error.
    pub fn parse_source_with<L: SourceLoader>(
        &self,
        loader: L,
        name: &str,
        source: &str,
    ) -> Result<ParseOutput, StrifeError> {
        info!(name; "Parsing source");
        self.run(loader, |parser| parser.parse_source(name, source))
    }

    /// Lower a parsed tree to the plain ACC dialect.
    pub fn lower(&self, codebase: &Codebase) -> Codebase {
        debug!("Lowering document tree");
        lower::lower(codebase, self.config.lower())
    }

    /// List every function in `codebase` with its namespace path.
    pub fn bindings(&self, codebase: &Codebase) -> Vec<FunctionBinding> {
        bindings::function_bindings(codebase)
    }

    fn run<L, F>(&self, loader: L, parse: F) -> Result<ParseOutput, StrifeError>
    where
        L: SourceLoader,
        F: FnOnce(&mut Parser<L>) -> Result<(), ParseError>,
    {
        let mut parser = Parser::with_loader(self.config.parse_config(), loader);
        if let Some(token) = &self.cancel {
            parser = parser.with_cancellation(token.clone());
        }

        parse(&mut parser)?;

        let warnings = parser.warnings().to_vec();
        for warning in &warnings {
            warn!(file = warning.file.as_str(), line = warning.line; "{}", warning.diagnostic);
        }
        let files: Vec<String> = parser.visited_files().map(str::to_string).collect();
        let codebase = parser.finish();

        debug!(
            files = files.len(),
            features = codebase.total_features();
            "Parse run finished"
        );
        trace!(codebase:?; "Parsed tree");
        Ok(ParseOutput {
            codebase,
            warnings,
            files,
        })
    }
}
