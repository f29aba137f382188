//! Mutable state shared by the grammar tasks during one parse run.

use strife_core::{
    codebase::{Codebase, CodebaseBuilder, CodebaseError, NamespaceKey},
    doc::DocComment,
    feature::{Feature, FeatureKind},
    task_item::TaskItem,
};

/// The document tree under construction plus the documentation comment
/// waiting for the next feature.
#[derive(Debug, Default)]
pub(crate) struct ParseContext {
    codebase: CodebaseBuilder,
    pending_doc: Option<DocComment>,
}

impl ParseContext {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn enter_namespace(&mut self, key: NamespaceKey) {
        self.codebase.enter_namespace(key);
    }

    pub(crate) fn leave_namespace(&mut self) -> Result<(), CodebaseError> {
        self.codebase.leave_namespace()
    }

    pub(crate) fn set_pending_doc(&mut self, doc: Option<DocComment>) {
        self.pending_doc = doc;
    }

    /// Adds a feature to the current namespace, attaching and clearing the
    /// pending documentation comment.
    pub(crate) fn add_feature(&mut self, kind: FeatureKind, line: usize) {
        let feature = Feature::new(kind, line).with_doc(self.pending_doc.take());
        self.codebase.add_feature(feature);
    }

    pub(crate) fn add_task_item(&mut self, item: TaskItem) {
        self.codebase.add_task_item(item);
    }

    pub(crate) fn finish(self) -> Codebase {
        self.codebase.finish()
    }
}
