//! Top-level declarations ("features") recognised in ACS source.
//!
//! # Overview
//!
//! A [`Feature`] pairs a [`FeatureKind`] with the line it started on and an
//! optional [`DocComment`]. Features describe declarations only: function and
//! script bodies are skipped by the parser and never stored.
//!
//! Names are kept as written, with a few normalisations applied by the
//! parser: library names and define keys are upper-cased, type names,
//! import paths and script activators are lower-cased.

use std::fmt;

use crate::{doc::DocComment, value::Value};

/// Visibility modifier of enums, structs, variables and functions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Access {
    #[default]
    Public,
    Private,
}

impl Access {
    pub fn is_private(&self) -> bool {
        matches!(self, Access::Private)
    }
}

/// `#library "NAME"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Library {
    pub name: String,
}

/// `#import "path"`; recorded, never followed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    pub path: String,
}

/// `#include "path"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Include {
    pub path: String,
}

/// `#define KEY value` and `#libdefine KEY value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Define {
    pub key: String,
    pub value: Value,
}

/// `world int 1:name;` and `global int 1:name[];`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopedVariable {
    pub ty: String,
    pub index: String,
    pub name: String,
    pub is_array: bool,
}

/// One member of an enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMember {
    pub name: String,
    /// The explicit value; `None` when the member relies on auto-increment.
    pub value: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enum {
    pub access: Access,
    pub name: Option<String>,
    pub underlying_type: Option<String>,
    pub members: Vec<EnumMember>,
}

/// One field of a struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructMember {
    pub ty: String,
    pub name: String,
    pub array_size: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Struct {
    pub access: Access,
    pub name: Option<String>,
    pub members: Vec<StructMember>,
    /// Names declared directly after the closing brace.
    pub instances: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Typedef {
    /// `typedef int Alias;` or `typedef int Alias[4];`
    Variable {
        ty: String,
        name: String,
        array_size: Option<String>,
    },
    /// `typedef void Callback(int, str);`
    Function {
        return_type: String,
        name: String,
        params: Vec<String>,
    },
}

impl Typedef {
    pub fn name(&self) -> &str {
        match self {
            Typedef::Variable { name, .. } | Typedef::Function { name, .. } => name,
        }
    }
}

/// One declarator of a variable declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariableItem {
    /// `name` or `name = value`
    Scalar { name: String, value: Option<Value> },
    /// `name[size]` with an optional `= { ... }` initializer kept as raw text.
    Array {
        name: String,
        size: Option<String>,
        initializer: Option<String>,
    },
    /// `name = { a, b }` initialising a struct-typed variable.
    StructInit { name: String, values: Vec<String> },
}

impl VariableItem {
    pub fn name(&self) -> &str {
        match self {
            VariableItem::Scalar { name, .. }
            | VariableItem::Array { name, .. }
            | VariableItem::StructInit { name, .. } => name,
        }
    }
}

/// A declaration such as `int a = 1, b[4];` sharing one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableCollection {
    pub access: Access,
    pub ty: String,
    pub items: Vec<VariableItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptParam {
    pub ty: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    /// Script number or name; for quoted names the text excludes the quotes.
    pub identifier: String,
    pub quoted: bool,
    pub activator: Option<String>,
    pub clientside: bool,
    pub net: bool,
    pub params: Vec<ScriptParam>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionParam {
    pub ty: String,
    pub name: String,
    pub default: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub access: Access,
    pub return_type: String,
    pub name: String,
    pub params: Vec<FunctionParam>,
    pub clientside: bool,
}

/// Every kind of declaration the parser recognises.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureKind {
    Library(Library),
    Import(Import),
    Include(Include),
    Define(Define),
    LibDefine(Define),
    WorldVariable(ScopedVariable),
    GlobalVariable(ScopedVariable),
    Enum(Enum),
    Struct(Struct),
    Typedef(Typedef),
    Variables(VariableCollection),
    Script(Script),
    Function(Function),
}

impl FeatureKind {
    /// Returns the access modifier for kinds that carry one.
    pub fn access(&self) -> Access {
        match self {
            FeatureKind::Enum(e) => e.access,
            FeatureKind::Struct(s) => s.access,
            FeatureKind::Variables(v) => v.access,
            FeatureKind::Function(f) => f.access,
            _ => Access::Public,
        }
    }

    /// A short label naming the declaration, e.g. `function SpawnBoss`.
    pub fn label(&self) -> String {
        match self {
            FeatureKind::Library(lib) => format!("library \"{}\"", lib.name),
            FeatureKind::Import(import) => format!("import \"{}\"", import.path),
            FeatureKind::Include(include) => format!("include \"{}\"", include.path),
            FeatureKind::Define(define) => format!("define {}", define.key),
            FeatureKind::LibDefine(define) => format!("libdefine {}", define.key),
            FeatureKind::WorldVariable(var) => format!("world {}", var.name),
            FeatureKind::GlobalVariable(var) => format!("global {}", var.name),
            FeatureKind::Enum(e) => match &e.name {
                Some(name) => format!("enum {name}"),
                None => "enum".to_string(),
            },
            FeatureKind::Struct(s) => match &s.name {
                Some(name) => format!("struct {name}"),
                None => "struct".to_string(),
            },
            FeatureKind::Typedef(typedef) => format!("typedef {}", typedef.name()),
            FeatureKind::Variables(vars) => {
                let names: Vec<&str> = vars.items.iter().map(VariableItem::name).collect();
                format!("{} {}", vars.ty, names.join(", "))
            }
            FeatureKind::Script(script) if script.quoted => {
                format!("script \"{}\"", script.identifier)
            }
            FeatureKind::Script(script) => format!("script {}", script.identifier),
            FeatureKind::Function(function) => format!("function {}", function.name),
        }
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// A recognised declaration with its source line and documentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feature {
    kind: FeatureKind,
    line: usize,
    doc: Option<DocComment>,
}

impl Feature {
    /// Creates a feature that started on `line` (one-based).
    pub fn new(kind: FeatureKind, line: usize) -> Self {
        Self {
            kind,
            line,
            doc: None,
        }
    }

    /// Attaches a documentation comment.
    pub fn with_doc(mut self, doc: Option<DocComment>) -> Self {
        self.doc = doc;
        self
    }

    pub fn kind(&self) -> &FeatureKind {
        &self.kind
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn doc(&self) -> Option<&DocComment> {
        self.doc.as_ref()
    }

    /// Returns `true` if the documentation comment carries `@hidden`.
    pub fn is_hidden(&self) -> bool {
        self.doc.as_ref().is_some_and(|doc| doc.hidden)
    }

    pub fn into_parts(self) -> (FeatureKind, usize, Option<DocComment>) {
        (self.kind, self.line, self.doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        let script = FeatureKind::Script(Script {
            identifier: "start".to_string(),
            quoted: true,
            activator: Some("open".to_string()),
            clientside: false,
            net: false,
            params: Vec::new(),
        });
        assert_eq!(script.label(), "script \"start\"");

        let vars = FeatureKind::Variables(VariableCollection {
            access: Access::Public,
            ty: "int".to_string(),
            items: vec![
                VariableItem::Scalar {
                    name: "a".to_string(),
                    value: None,
                },
                VariableItem::Array {
                    name: "b".to_string(),
                    size: Some("4".to_string()),
                    initializer: None,
                },
            ],
        });
        assert_eq!(vars.label(), "int a, b");
    }

    #[test]
    fn test_hidden_follows_doc() {
        let kind = FeatureKind::Library(Library {
            name: "LIB".to_string(),
        });
        let plain = Feature::new(kind.clone(), 1);
        assert!(!plain.is_hidden());

        let hidden = Feature::new(kind, 1).with_doc(Some(DocComment {
            hidden: true,
            ..DocComment::default()
        }));
        assert!(hidden.is_hidden());
    }

    #[test]
    fn test_access_defaults_to_public() {
        let kind = FeatureKind::Include(Include {
            path: "zcommon.acs".to_string(),
        });
        assert_eq!(kind.access(), Access::Public);
    }
}
