//! The parse driver.
//!
//! A [`Parser`] owns one document tree and one include guard. For every
//! file it walks the top-level declarations, offering each one to the
//! grammar tasks in order, and follows `#include` directives into the
//! included files as they are met.

use std::{
    fmt, fs, io,
    path::{Component, Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use indexmap::{IndexMap, IndexSet};
use log::{debug, info, trace, warn};
use strife_core::{
    codebase::Codebase, doc::DocComment, feature::FeatureKind, task_item::TaskItem,
};
use thiserror::Error;

use crate::{
    context::ParseContext,
    doc_comment::{is_doc_comment, parse_doc_comment},
    error::{Diagnostic, ErrorCode, ParseError},
    span::Span,
    task_items,
    tasks::{self, TASKS, TaskKind, TaskOutcome},
    tokenizer::{Tokenizer, Trivia, TriviaKind},
};

/// Options for a parse run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseConfig {
    /// File names that `#include` may name without them being parsed,
    /// compared case-insensitively against the last path component.
    pub implicit_includes: Vec<String>,
    /// Comment tags harvested as task items, compared case-insensitively.
    pub task_tags: Vec<String>,
}

impl ParseConfig {
    pub fn new(implicit_includes: Vec<String>, task_tags: Vec<String>) -> Self {
        Self {
            implicit_includes,
            task_tags,
        }
    }

    fn is_implicit(&self, path: &str) -> bool {
        let file_name = path.rsplit(['/', '\\']).next().unwrap_or(path);
        self.implicit_includes
            .iter()
            .any(|implicit| implicit.eq_ignore_ascii_case(file_name))
    }
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            implicit_includes: vec!["zcommon.acs".to_string()],
            task_tags: ["task", "todo", "hack", "undone"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Failure to read a source file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Where the parser gets file contents from.
pub trait SourceLoader {
    /// Turns a path as written (already joined with the including file's
    /// directory) into the path used for loading and re-inclusion checks.
    fn resolve(&self, path: &Path) -> PathBuf {
        normalize_path(path)
    }

    /// Reads the file at a resolved path.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::NotFound`] when there is no such file.
    fn load(&self, path: &Path) -> Result<String, LoadError>;
}

/// Loads files from the file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLoader;

impl SourceLoader for FsLoader {
    fn resolve(&self, path: &Path) -> PathBuf {
        let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        normalize_path(&absolute)
    }

    fn load(&self, path: &Path) -> Result<String, LoadError> {
        fs::read_to_string(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
            _ => LoadError::Io {
                path: path.to_path_buf(),
                source,
            },
        })
    }
}

/// Serves files from memory, keyed by normalized path.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    files: IndexMap<PathBuf, String>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file and returns the loader, for chaining.
    pub fn with_file(mut self, path: impl AsRef<Path>, src: impl Into<String>) -> Self {
        self.insert(path, src);
        self
    }

    pub fn insert(&mut self, path: impl AsRef<Path>, src: impl Into<String>) {
        self.files.insert(normalize_path(path.as_ref()), src.into());
    }
}

impl SourceLoader for MemoryLoader {
    fn load(&self, path: &Path) -> Result<String, LoadError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| LoadError::NotFound(path.to_path_buf()))
    }
}

/// Removes `.` and resolves `..` components without touching the file system.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::ParentDir => {
                result.pop();
            }
            Component::CurDir => {}
            _ => result.push(component),
        }
    }
    result
}

/// Cooperative cancellation flag shared between a parser and its caller.
///
/// The parser checks it before each file and between top-level
/// declarations; a body being skipped is always finished first.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// A non-fatal diagnostic produced during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    pub file: String,
    pub line: usize,
    pub diagnostic: Diagnostic,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.file, self.line, self.diagnostic)
    }
}

/// The `#include` directive that led to a file, for error reporting.
struct IncludeSite<'a> {
    file: &'a str,
    line: usize,
    span: Span,
    src: &'a str,
}

impl IncludeSite<'_> {
    fn error(&self, diagnostic: Diagnostic) -> ParseError {
        ParseError::new(diagnostic.with_label(self.span, "included here"), self.file, self.line)
            .with_task(TaskKind::Include)
            .with_source(self.src)
    }
}

/// Parses a root file and everything it includes into one [`Codebase`].
///
/// A parser is used for a single run: create it, feed it one or more roots
/// with [`Parser::parse_file`] or [`Parser::parse_source`], then take the
/// tree with [`Parser::finish`]. Files are never parsed twice in a run; a
/// second inclusion of the same file is an error.
///
/// # Examples
///
/// ```
/// use strife_parser::{MemoryLoader, ParseConfig, Parser};
///
/// let loader = MemoryLoader::new().with_file("lib.acs", "#define LIMIT 10\n");
/// let mut parser = Parser::with_loader(ParseConfig::default(), loader);
/// parser
///     .parse_source("main.acs", "#include \"lib.acs\"\nint counter;\n")
///     .unwrap();
///
/// let codebase = parser.finish();
/// assert_eq!(codebase.features().len(), 3);
/// ```
pub struct Parser<L: SourceLoader = FsLoader> {
    config: ParseConfig,
    loader: L,
    context: ParseContext,
    visited: IndexSet<String>,
    warnings: Vec<ParseWarning>,
    cancel: CancellationToken,
}

impl Parser<FsLoader> {
    /// Creates a parser that reads from the file system.
    pub fn new(config: ParseConfig) -> Self {
        Self::with_loader(config, FsLoader)
    }
}

impl<L: SourceLoader> Parser<L> {
    pub fn with_loader(config: ParseConfig, loader: L) -> Self {
        Self {
            config,
            loader,
            context: ParseContext::new(),
            visited: IndexSet::new(),
            warnings: Vec::new(),
            cancel: CancellationToken::new(),
        }
    }

    /// Uses `token` to stop the run early.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Parses the file at `path` and, recursively, its includes.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error met in any of the files.
    pub fn parse_file(&mut self, path: impl AsRef<Path>) -> Result<(), ParseError> {
        self.parse_path(path.as_ref(), None)
    }

    /// Parses `src` as if it were the file `name`.
    ///
    /// Includes are resolved relative to the directory of `name`.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error met in `src` or its includes.
    pub fn parse_source(&mut self, name: &str, src: &str) -> Result<(), ParseError> {
        let path = Path::new(name);
        let resolved = self.loader.resolve(path);
        self.visited.insert(visit_key(&resolved));
        self.parse_unit(name, src, path.parent())
    }

    /// Warnings collected so far.
    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }

    /// Resolved paths of every file parsed so far, in parse order.
    pub fn visited_files(&self) -> impl Iterator<Item = &str> {
        self.visited.iter().map(String::as_str)
    }

    /// Ends the run and returns the document tree.
    pub fn finish(self) -> Codebase {
        info!(
            files = self.visited.len(),
            warnings = self.warnings.len();
            "Parse finished"
        );
        self.context.finish()
    }

    fn parse_path(&mut self, path: &Path, site: Option<&IncludeSite<'_>>) -> Result<(), ParseError> {
        let display = path.display().to_string();
        let fail = |diagnostic: Diagnostic| match site {
            Some(site) => site.error(diagnostic),
            None => ParseError::new(diagnostic, display.as_str(), 0),
        };

        if self.cancel.is_cancelled() {
            return Err(fail(cancelled()));
        }

        let resolved = self.loader.resolve(path);
        let key = visit_key(&resolved);
        if self.visited.contains(&key) {
            return Err(fail(
                Diagnostic::error(format!("`{display}` was already parsed in this run"))
                    .with_code(ErrorCode::E201)
                    .with_help("remove the repeated #include"),
            ));
        }

        let src = self.loader.load(&resolved).map_err(|err| {
            let code = match err {
                LoadError::NotFound(_) => ErrorCode::E200,
                LoadError::Io { .. } => ErrorCode::E202,
            };
            fail(Diagnostic::error(err.to_string()).with_code(code))
        })?;
        self.visited.insert(key);

        let name = resolved
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or(display.clone());
        self.parse_unit(&name, &src, resolved.parent())
    }

    fn parse_unit(&mut self, name: &str, src: &str, dir: Option<&Path>) -> Result<(), ParseError> {
        info!(file = name, bytes = src.len(); "Parsing file");
        let mut tokenizer = Tokenizer::new(src);
        let mut declarations = 0usize;

        loop {
            if self.cancel.is_cancelled() {
                return Err(ParseError::new(cancelled(), name, tokenizer.line()).with_source(src));
            }

            let mark = tokenizer.trivia().len();
            let first = tokenizer.advance_allow_eof();
            let decl_mark = tokenizer.trivia().len();
            self.harvest_task_items(name, tokenizer.trivia_since(mark), None);
            if first.is_eof() {
                break;
            }

            // A documentation comment waits for the next feature, so one
            // written before a namespace goes to the first feature inside.
            if let Some(doc) = self
                .doc_comment(name, first.line(), tokenizer.trivia_since(mark))
                .map_err(|diag| ParseError::new(diag, name, first.line()).with_source(src))?
            {
                self.context.set_pending_doc(Some(doc));
            }

            let (task, feature) = self.dispatch(&mut tokenizer).map_err(|(task, diag)| {
                let err = ParseError::new(diag, name, tokenizer.token().line()).with_source(src);
                match task {
                    Some(task) => err.with_task(task),
                    None => err,
                }
            })?;
            declarations += 1;

            let Some(kind) = feature else {
                trace!(task:% = task, line = first.line(); "Matched declaration without feature");
                self.harvest_task_items(name, tokenizer.trivia_since(decl_mark), None);
                continue;
            };

            let label = kind.label();
            debug!(task:% = task, line = first.line(), feature = label.as_str(); "Parsed feature");
            let include = match &kind {
                FeatureKind::Include(include) => Some(include.path.clone()),
                _ => None,
            };
            self.context.add_feature(kind, first.line());
            self.harvest_task_items(name, tokenizer.trivia_since(decl_mark), Some(&label));

            if let Some(path) = include {
                let site = IncludeSite {
                    file: name,
                    line: first.line(),
                    span: first.span().union(tokenizer.token().span()),
                    src,
                };
                self.follow_include(&path, dir, &site)?;
            }
        }

        debug!(file = name, declarations; "Finished file");
        Ok(())
    }

    /// Offers the current token to each task in turn.
    fn dispatch(
        &mut self,
        tokenizer: &mut Tokenizer<'_>,
    ) -> Result<(TaskKind, Option<FeatureKind>), (Option<TaskKind>, Diagnostic)> {
        for (task, run) in TASKS {
            match run(&mut self.context, tokenizer) {
                Ok(TaskOutcome::Declined) => {}
                Ok(TaskOutcome::Matched(feature)) => return Ok((task, feature)),
                Err(diag) => return Err((Some(task), diag)),
            }
        }

        let token = tokenizer.token();
        if token.is_unterminated_string() {
            return Err((None, tasks::unterminated_string(token)));
        }
        Err((
            None,
            Diagnostic::error(format!("unknown symbol `{}`", token.text()))
                .with_code(ErrorCode::E102)
                .with_label(token.span(), "no declaration starts with this")
                .with_help("expected a directive, namespace, type, function or script"),
        ))
    }

    fn follow_include(
        &mut self,
        path: &str,
        dir: Option<&Path>,
        site: &IncludeSite<'_>,
    ) -> Result<(), ParseError> {
        if self.config.is_implicit(path) {
            debug!(path; "Skipping implicit include");
            return Ok(());
        }

        let relative = PathBuf::from(path.replace('\\', "/"));
        let target = match dir {
            Some(dir) => dir.join(relative),
            None => relative,
        };
        debug!(path, target:? = target; "Following include");
        self.parse_path(&target, Some(site))
    }

    /// The last documentation comment in `trivia`, parsed.
    fn doc_comment(
        &mut self,
        file: &str,
        line: usize,
        trivia: &[Trivia<'_>],
    ) -> Result<Option<DocComment>, Diagnostic> {
        let mut docs = trivia
            .iter()
            .filter(|t| t.kind() == TriviaKind::BlockComment && is_doc_comment(t.text()));
        let Some(mut last) = docs.next() else {
            return Ok(None);
        };

        let mut skipped = 0usize;
        for doc in docs {
            skipped += 1;
            last = doc;
        }
        if skipped > 0 {
            warn!(file, line, skipped; "Several documentation comments before one declaration, using the last");
            self.warnings.push(ParseWarning {
                file: file.to_string(),
                line,
                diagnostic: Diagnostic::warning(
                    "several documentation comments before one declaration",
                )
                .with_label(last.span(), "only this one is kept"),
            });
        }

        parse_doc_comment(last.text(), last.span()).map(Some)
    }

    fn harvest_task_items(&mut self, file: &str, trivia: &[Trivia<'_>], feature: Option<&str>) {
        for comment in trivia.iter().filter(|t| t.kind() == TriviaKind::LineComment) {
            let Some((tag, text)) = task_items::extract(comment.text(), &self.config.task_tags) else {
                continue;
            };
            trace!(file, line = comment.line(), tag; "Task item");
            self.context.add_task_item(TaskItem {
                tag: tag.to_string(),
                text: text.to_string(),
                file: file.to_string(),
                line: comment.line(),
                feature: feature.map(str::to_string),
            });
        }
    }
}

fn visit_key(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/").to_lowercase()
}

fn cancelled() -> Diagnostic {
    Diagnostic::error("parse cancelled").with_code(ErrorCode::E300)
}
