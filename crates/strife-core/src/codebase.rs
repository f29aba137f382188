//! The namespace-scoped document tree.
//!
//! # Overview
//!
//! A [`Codebase`] holds the features and task items declared at one namespace
//! level and an ordered map of child namespaces. Two namespaces are the same
//! child when their [`NamespaceKey`]s are equal, so reopening
//! `namespace Foo { ... }` later in a file, or in another file, adds to the
//! existing child.
//!
//! Trees are assembled with a [`CodebaseBuilder`], which keeps every node in a
//! flat arena and tracks the current position with a stack of indices. The
//! finished tree is an owned recursive value with no back references.
//!
//! # Example
//!
//! ```
//! use strife_core::{
//!     codebase::{CodebaseBuilder, NamespaceKey},
//!     feature::{Feature, FeatureKind, Library},
//! };
//!
//! let mut builder = CodebaseBuilder::new();
//! builder.enter_namespace(NamespaceKey::named(false, "Gameplay"));
//! builder.add_feature(Feature::new(
//!     FeatureKind::Library(Library { name: "GAME".to_string() }),
//!     1,
//! ));
//! builder.leave_namespace().unwrap();
//!
//! let codebase = builder.finish();
//! let child = codebase.namespace(&NamespaceKey::named(false, "Gameplay")).unwrap();
//! assert_eq!(child.features().len(), 1);
//! ```

use std::fmt;

use indexmap::IndexMap;
use log::trace;
use thiserror::Error;

use crate::{feature::Feature, identifier::Id, task_item::TaskItem};

/// Identity of a namespace: its strict flag and optional name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NamespaceKey {
    strict: bool,
    name: Option<Id>,
}

impl NamespaceKey {
    pub fn new(strict: bool, name: Option<Id>) -> Self {
        Self { strict, name }
    }

    /// A named namespace such as `strict namespace Foo`.
    pub fn named(strict: bool, name: &str) -> Self {
        Self::new(strict, Some(Id::new(name)))
    }

    /// An anonymous `namespace { ... }` block.
    pub fn anonymous(strict: bool) -> Self {
        Self::new(strict, None)
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn name(&self) -> Option<Id> {
        self.name
    }
}

impl fmt::Display for NamespaceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.strict {
            f.write_str("strict ")?;
        }
        match self.name {
            Some(name) => write!(f, "namespace {name}"),
            None => f.write_str("namespace <anonymous>"),
        }
    }
}

/// One level of the document tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Codebase {
    task_items: Vec<TaskItem>,
    features: Vec<Feature>,
    namespaces: IndexMap<NamespaceKey, Codebase>,
}

impl Codebase {
    /// Creates an empty codebase.
    pub fn new() -> Self {
        Self::default()
    }

    /// Features declared directly at this level, in declaration order.
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Task items harvested while this level was current.
    pub fn task_items(&self) -> &[TaskItem] {
        &self.task_items
    }

    /// Child namespaces in the order they were first opened.
    pub fn namespaces(&self) -> impl Iterator<Item = (&NamespaceKey, &Codebase)> {
        self.namespaces.iter()
    }

    /// Looks up a child namespace by key.
    pub fn namespace(&self, key: &NamespaceKey) -> Option<&Codebase> {
        self.namespaces.get(key)
    }

    pub fn push_feature(&mut self, feature: Feature) {
        self.features.push(feature);
    }

    pub fn push_task_item(&mut self, item: TaskItem) {
        self.task_items.push(item);
    }

    /// Inserts a child namespace, replacing any child with the same key.
    pub fn insert_namespace(&mut self, key: NamespaceKey, child: Codebase) {
        self.namespaces.insert(key, child);
    }

    /// Counts features at this level and below.
    pub fn total_features(&self) -> usize {
        self.features.len()
            + self
                .namespaces
                .values()
                .map(Codebase::total_features)
                .sum::<usize>()
    }

    /// Collects task items from this level and below, depth-first.
    pub fn all_task_items(&self) -> Vec<&TaskItem> {
        let mut items: Vec<&TaskItem> = self.task_items.iter().collect();
        for child in self.namespaces.values() {
            items.extend(child.all_task_items());
        }
        items
    }
}

/// Errors raised while assembling a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodebaseError {
    #[error("no namespace is open")]
    NoOpenNamespace,
}

#[derive(Debug, Default)]
struct Node {
    task_items: Vec<TaskItem>,
    features: Vec<Feature>,
    children: IndexMap<NamespaceKey, usize>,
}

const ROOT: usize = 0;

/// Arena-backed builder for a [`Codebase`].
#[derive(Debug)]
pub struct CodebaseBuilder {
    nodes: Vec<Node>,
    stack: Vec<usize>,
}

impl Default for CodebaseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CodebaseBuilder {
    /// Creates a builder positioned at an empty root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
            stack: vec![ROOT],
        }
    }

    fn current(&self) -> usize {
        self.stack.last().copied().unwrap_or(ROOT)
    }

    /// Number of namespaces currently open.
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    /// Makes the child keyed by `key` current, creating it if needed.
    pub fn enter_namespace(&mut self, key: NamespaceKey) {
        let current = self.current();
        let child = match self.nodes[current].children.get(&key) {
            Some(&existing) => existing,
            None => {
                let id = self.nodes.len();
                self.nodes.push(Node::default());
                self.nodes[current].children.insert(key, id);
                id
            }
        };
        self.stack.push(child);
        trace!(namespace:? = key, depth = self.depth(); "Entered namespace");
    }

    /// Returns to the parent of the current namespace.
    ///
    /// # Errors
    ///
    /// Returns [`CodebaseError::NoOpenNamespace`] at the root.
    pub fn leave_namespace(&mut self) -> Result<(), CodebaseError> {
        if self.stack.len() <= 1 {
            return Err(CodebaseError::NoOpenNamespace);
        }
        self.stack.pop();
        trace!(depth = self.depth(); "Left namespace");
        Ok(())
    }

    /// Appends a feature to the current namespace.
    pub fn add_feature(&mut self, feature: Feature) {
        let current = self.current();
        self.nodes[current].features.push(feature);
    }

    /// Appends a task item to the current namespace.
    pub fn add_task_item(&mut self, item: TaskItem) {
        let current = self.current();
        self.nodes[current].task_items.push(item);
    }

    /// Consumes the builder and produces the owned tree.
    ///
    /// Namespaces still open are closed implicitly.
    pub fn finish(mut self) -> Codebase {
        assemble(&mut self.nodes, ROOT)
    }
}

fn assemble(nodes: &mut [Node], id: usize) -> Codebase {
    let node = std::mem::take(&mut nodes[id]);
    let namespaces = node
        .children
        .into_iter()
        .map(|(key, child)| (key, assemble(nodes, child)))
        .collect();
    Codebase {
        task_items: node.task_items,
        features: node.features,
        namespaces,
    }
}
