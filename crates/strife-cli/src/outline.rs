//! Plain-text rendering of a document tree.
//!
//! Each feature is one line, indented two spaces per namespace level and
//! followed by its source line. Task items and function bindings get their
//! own sections.

use std::fmt::{self, Write};

use strife::{
    bindings::FunctionBinding,
    codebase::Codebase,
    feature::{Feature, FeatureKind, FunctionParam},
    task_item::TaskItem,
};

const INDENT: &str = "  ";

/// Writes the features and namespaces of `codebase`, depth first.
pub fn write_tree(out: &mut impl Write, codebase: &Codebase) -> fmt::Result {
    write_level(out, codebase, 0)
}

fn write_level(out: &mut impl Write, codebase: &Codebase, depth: usize) -> fmt::Result {
    let indent = INDENT.repeat(depth);
    for feature in codebase.features() {
        writeln!(out, "{indent}{}", describe(feature))?;
    }
    for (key, child) in codebase.namespaces() {
        writeln!(out, "{indent}{key}")?;
        write_level(out, child, depth + 1)?;
    }
    Ok(())
}

fn describe(feature: &Feature) -> String {
    let mut text = match feature.kind() {
        FeatureKind::Define(define) | FeatureKind::LibDefine(define) if !define.value.is_empty() => {
            format!("{} = {}", feature.kind().label(), define.value)
        }
        FeatureKind::Function(function) => format!(
            "function {} {}({})",
            function.return_type,
            function.name,
            params(&function.params)
        ),
        FeatureKind::Script(script) => {
            let mut text = feature.kind().label();
            if let Some(activator) = &script.activator {
                text.push(' ');
                text.push_str(activator);
            }
            if script.net {
                text.push_str(" net");
            }
            if script.clientside {
                text.push_str(" clientside");
            }
            text
        }
        kind => kind.label(),
    };
    if feature.kind().access().is_private() {
        text.insert_str(0, "private ");
    }
    text.push_str(&format!("  [line {}]", feature.line()));
    if let Some(summary) = feature.doc().and_then(|doc| doc.summary.as_deref()) {
        text.push_str(&format!("  // {summary}"));
    }
    text
}

fn params(params: &[FunctionParam]) -> String {
    params
        .iter()
        .map(|param| match &param.default {
            Some(default) => format!("{} {} = {default}", param.ty, param.name),
            None => format!("{} {}", param.ty, param.name),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Writes one line per task item: `file:line: tag: text (feature)`.
pub fn write_task_items(out: &mut impl Write, items: &[&TaskItem]) -> fmt::Result {
    writeln!(out, "tasks:")?;
    for item in items {
        write!(out, "{INDENT}{}:{}: {}: {}", item.file, item.line, item.tag, item.text)?;
        match &item.feature {
            Some(feature) => writeln!(out, " ({feature})")?,
            None => writeln!(out)?,
        }
    }
    Ok(())
}

/// Writes one line per binding: `Qualified.Name(params) -> type`.
pub fn write_bindings(out: &mut impl Write, bindings: &[FunctionBinding]) -> fmt::Result {
    writeln!(out, "bindings:")?;
    for binding in bindings {
        writeln!(
            out,
            "{INDENT}{}({}) -> {}  [line {}]",
            binding.qualified_name(),
            params(&binding.function.params),
            binding.function.return_type,
            binding.line
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use strife::{
        codebase::NamespaceKey,
        doc::DocComment,
        feature::{Access, Define, Function, Library},
        token::TokenKind,
        value::{Value, ValueSymbol},
    };

    use super::*;

    fn sample() -> Codebase {
        let mut game = Codebase::new();
        game.push_feature(
            Feature::new(
                FeatureKind::Function(Function {
                    access: Access::Private,
                    return_type: "int".to_string(),
                    name: "Add".to_string(),
                    params: vec![
                        FunctionParam {
                            ty: "int".to_string(),
                            name: "a".to_string(),
                            default: None,
                        },
                        FunctionParam {
                            ty: "int".to_string(),
                            name: "b".to_string(),
                            default: Some("1".to_string()),
                        },
                    ],
                    clientside: false,
                }),
                4,
            )
            .with_doc(Some(DocComment {
                summary: Some("Adds.".to_string()),
                ..DocComment::default()
            })),
        );

        let mut root = Codebase::new();
        root.push_feature(Feature::new(
            FeatureKind::Library(Library {
                name: "GAME".to_string(),
            }),
            1,
        ));
        root.push_feature(Feature::new(
            FeatureKind::Define(Define {
                key: "MAX".to_string(),
                value: Value::new(vec![ValueSymbol::leaf(TokenKind::Number, "8")]),
            }),
            2,
        ));
        root.insert_namespace(NamespaceKey::named(false, "Game"), game);
        root
    }

    #[test]
    fn test_tree_outline() {
        let mut out = String::new();
        write_tree(&mut out, &sample()).unwrap();
        assert_eq!(
            out,
            "library \"GAME\"  [line 1]\n\
             define MAX = 8  [line 2]\n\
             namespace Game\n  \
             private function int Add(int a, int b = 1)  [line 4]  // Adds.\n"
        );
    }

    #[test]
    fn test_task_items_section() {
        let item = TaskItem {
            tag: "TODO".to_string(),
            text: "split".to_string(),
            file: "main.acs".to_string(),
            line: 3,
            feature: Some("function Tick".to_string()),
        };
        let mut out = String::new();
        write_task_items(&mut out, &[&item]).unwrap();
        assert_eq!(out, "tasks:\n  main.acs:3: TODO: split (function Tick)\n");
    }

    #[test]
    fn test_bindings_section() {
        let bindings = strife::bindings::function_bindings(&sample());
        let mut out = String::new();
        write_bindings(&mut out, &bindings).unwrap();
        assert_eq!(out, "bindings:\n  Game.Add(int a, int b = 1) -> int  [line 4]\n");
    }
}
