//! Function bindings for editor tooling.
//!
//! A binding pairs every function declared in a tree with the chain of
//! namespaces enclosing it, outermost first.

use strife_core::{
    codebase::{Codebase, NamespaceKey},
    doc::DocComment,
    feature::{FeatureKind, Function},
};

/// A function together with where it was declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionBinding {
    /// Enclosing namespaces, outermost first.
    pub namespaces: Vec<NamespaceKey>,
    pub function: Function,
    pub line: usize,
    pub doc: Option<DocComment>,
}

impl FunctionBinding {
    /// The dotted name, e.g. `Game.Rules.Score`.
    ///
    /// Anonymous namespaces add no component.
    pub fn qualified_name(&self) -> String {
        let mut parts: Vec<String> = self
            .namespaces
            .iter()
            .filter_map(|key| key.name().map(|id| id.to_text()))
            .collect();
        parts.push(self.function.name.clone());
        parts.join(".")
    }
}

/// Lists every function in `codebase`, in declaration order, depth first.
pub fn function_bindings(codebase: &Codebase) -> Vec<FunctionBinding> {
    let mut bindings = Vec::new();
    collect(codebase, &mut Vec::new(), &mut bindings);
    bindings
}

fn collect(codebase: &Codebase, path: &mut Vec<NamespaceKey>, out: &mut Vec<FunctionBinding>) {
    for feature in codebase.features() {
        if let FeatureKind::Function(function) = feature.kind() {
            out.push(FunctionBinding {
                namespaces: path.clone(),
                function: function.clone(),
                line: feature.line(),
                doc: feature.doc().cloned(),
            });
        }
    }
    for (key, child) in codebase.namespaces() {
        path.push(*key);
        collect(child, path, out);
        path.pop();
    }
}

#[cfg(test)]
mod tests {
    use strife_core::feature::{Access, Feature};

    use super::*;

    fn function(name: &str) -> Feature {
        Feature::new(
            FeatureKind::Function(Function {
                access: Access::Public,
                return_type: "void".to_string(),
                name: name.to_string(),
                params: Vec::new(),
                clientside: false,
            }),
            1,
        )
    }

    #[test]
    fn test_bindings_carry_namespace_path() {
        let mut rules = Codebase::new();
        rules.push_feature(function("Score"));
        let mut anonymous = Codebase::new();
        anonymous.push_feature(function("Hidden"));

        let mut game = Codebase::new();
        game.insert_namespace(NamespaceKey::named(true, "Rules"), rules);
        game.insert_namespace(NamespaceKey::anonymous(false), anonymous);

        let mut root = Codebase::new();
        root.push_feature(function("Main"));
        root.insert_namespace(NamespaceKey::named(false, "Game"), game);

        let names: Vec<String> = function_bindings(&root)
            .iter()
            .map(FunctionBinding::qualified_name)
            .collect();
        assert_eq!(names, ["Main", "Game.Rules.Score", "Game.Hidden"]);
    }

    #[test]
    fn test_namespace_keys_outermost_first() {
        let mut inner = Codebase::new();
        inner.push_feature(function("Tick"));
        let mut outer = Codebase::new();
        outer.insert_namespace(NamespaceKey::named(false, "B"), inner);
        let mut root = Codebase::new();
        root.insert_namespace(NamespaceKey::named(false, "A"), outer);

        let bindings = function_bindings(&root);
        assert_eq!(
            bindings[0].namespaces,
            [NamespaceKey::named(false, "A"), NamespaceKey::named(false, "B")]
        );
    }
}
