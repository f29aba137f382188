//! Lowering of a parsed tree to what plain ACC accepts.
//!
//! The walk mirrors the namespace structure of the input and builds a new
//! tree; the input is left untouched. Per namespace it:
//!
//! - drops hidden features, includes (already inlined), structs and typedefs;
//! - drops private enums, variables and functions;
//! - removes struct-initialised variables, and whole declarations left empty;
//! - replaces types outside the allow-list with the default type;
//! - expands enums into one `#define` per member, in member order;
//! - removes casts such as `(fixed)` from define, enum and variable values.

use log::{debug, trace};

use strife_core::{
    codebase::Codebase,
    feature::{
        Define, Enum, Feature, FeatureKind, Function, FunctionParam, Script, ScriptParam,
        VariableCollection, VariableItem,
    },
    value::{Value, ValueSymbol},
};

use crate::config::LowerConfig;

/// Lowers `codebase` and everything below it.
pub fn lower(codebase: &Codebase, config: &LowerConfig) -> Codebase {
    let mut lowered = Codebase::new();
    for item in codebase.task_items() {
        lowered.push_task_item(item.clone());
    }

    for feature in codebase.features() {
        if feature.is_hidden() {
            trace!(feature:% = feature.kind(); "Dropping hidden feature");
            continue;
        }
        for out in lower_feature(feature, config) {
            lowered.push_feature(out);
        }
    }

    for (key, child) in codebase.namespaces() {
        debug!(namespace:% = key; "Lowering namespace");
        lowered.insert_namespace(*key, lower(child, config));
    }
    lowered
}

fn lower_feature(feature: &Feature, config: &LowerConfig) -> Vec<Feature> {
    let line = feature.line();
    let doc = feature.doc().cloned();
    let keep = |kind: FeatureKind| vec![Feature::new(kind, line).with_doc(doc.clone())];

    match feature.kind() {
        FeatureKind::Include(_) | FeatureKind::Struct(_) | FeatureKind::Typedef(_) => Vec::new(),
        kind if kind.access().is_private() => Vec::new(),
        FeatureKind::Define(define) => keep(FeatureKind::Define(lower_define(define, config))),
        FeatureKind::LibDefine(define) => {
            keep(FeatureKind::LibDefine(lower_define(define, config)))
        }
        FeatureKind::Enum(enumeration) => lower_enum(enumeration, feature, config),
        FeatureKind::Variables(vars) => match lower_variables(vars, config) {
            Some(vars) => keep(FeatureKind::Variables(vars)),
            None => Vec::new(),
        },
        FeatureKind::Script(script) => keep(FeatureKind::Script(lower_script(script, config))),
        FeatureKind::Function(function) => {
            keep(FeatureKind::Function(lower_function(function, config)))
        }
        kind @ (FeatureKind::Library(_)
        | FeatureKind::Import(_)
        | FeatureKind::WorldVariable(_)
        | FeatureKind::GlobalVariable(_)) => keep(kind.clone()),
    }
}

fn lower_define(define: &Define, config: &LowerConfig) -> Define {
    Define {
        key: define.key.clone(),
        value: strip_casts(&define.value, config),
    }
}

/// One define per member; the enum's documentation goes on the first.
fn lower_enum(enumeration: &Enum, feature: &Feature, config: &LowerConfig) -> Vec<Feature> {
    let mut doc = feature.doc().cloned();
    enumeration
        .members
        .iter()
        .map(|member| {
            let define = Define {
                key: member.name.clone(),
                value: member
                    .value
                    .as_ref()
                    .map(|value| strip_casts(value, config))
                    .unwrap_or_default(),
            };
            Feature::new(FeatureKind::Define(define), feature.line()).with_doc(doc.take())
        })
        .collect()
}

fn lower_variables(vars: &VariableCollection, config: &LowerConfig) -> Option<VariableCollection> {
    let items: Vec<VariableItem> = vars
        .items
        .iter()
        .filter_map(|item| match item {
            VariableItem::StructInit { .. } => None,
            VariableItem::Scalar { name, value } => Some(VariableItem::Scalar {
                name: name.clone(),
                value: value.as_ref().map(|value| strip_casts(value, config)),
            }),
            array @ VariableItem::Array { .. } => Some(array.clone()),
        })
        .collect();

    if items.is_empty() {
        return None;
    }
    Some(VariableCollection {
        access: vars.access,
        ty: config.coerce_type(&vars.ty).to_string(),
        items,
    })
}

fn lower_script(script: &Script, config: &LowerConfig) -> Script {
    Script {
        params: script
            .params
            .iter()
            .map(|param| ScriptParam {
                ty: config.coerce_type(&param.ty).to_string(),
                name: param.name.clone(),
            })
            .collect(),
        ..script.clone()
    }
}

fn lower_function(function: &Function, config: &LowerConfig) -> Function {
    Function {
        return_type: config.coerce_type(&function.return_type).to_string(),
        params: function
            .params
            .iter()
            .map(|param| FunctionParam {
                ty: config.coerce_type(&param.ty).to_string(),
                ..param.clone()
            })
            .collect(),
        ..function.clone()
    }
}

/// Removes every group holding nothing but a single cast type name.
pub fn strip_casts(value: &Value, config: &LowerConfig) -> Value {
    Value::new(strip_symbols(value.symbols(), config))
}

fn strip_symbols(symbols: &[ValueSymbol], config: &LowerConfig) -> Vec<ValueSymbol> {
    symbols
        .iter()
        .filter_map(|symbol| match symbol {
            ValueSymbol::Group(children) if is_cast(children, config) => None,
            ValueSymbol::Group(children) => Some(ValueSymbol::Group(strip_symbols(children, config))),
            leaf => Some(leaf.clone()),
        })
        .collect()
}

fn is_cast(children: &[ValueSymbol], config: &LowerConfig) -> bool {
    match children {
        [only] => only
            .as_leaf()
            .is_some_and(|(_, text)| config.is_cast_type(text)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use strife_core::{
        codebase::NamespaceKey,
        doc::DocComment,
        feature::{Access, EnumMember, Include, Struct},
        token::TokenKind,
    };

    use super::*;

    fn leaf(kind: TokenKind, text: &str) -> ValueSymbol {
        ValueSymbol::leaf(kind, text)
    }

    fn cast(name: &str) -> ValueSymbol {
        ValueSymbol::Group(vec![leaf(TokenKind::Symbol, name)])
    }

    fn labels(codebase: &Codebase) -> Vec<String> {
        codebase.features().iter().map(|f| f.kind().label()).collect()
    }

    #[test]
    fn test_strip_casts_recursively() {
        let value = Value::new(vec![
            cast("FIXED"),
            ValueSymbol::Group(vec![
                cast("int"),
                leaf(TokenKind::Symbol, "x"),
                leaf(TokenKind::Symbol, "+"),
                ValueSymbol::Group(vec![leaf(TokenKind::Number, "1")]),
            ]),
        ]);
        let stripped = strip_casts(&value, &LowerConfig::default());
        assert_eq!(stripped.to_string(), "(x + (1))");
    }

    #[test]
    fn test_enum_becomes_ordered_defines() {
        let mut codebase = Codebase::new();
        let doc = DocComment {
            summary: Some("Teams".to_string()),
            ..DocComment::default()
        };
        codebase.push_feature(
            Feature::new(
                FeatureKind::Enum(Enum {
                    access: Access::Public,
                    name: Some("Team".to_string()),
                    underlying_type: None,
                    members: vec![
                        EnumMember {
                            name: "RED".to_string(),
                            value: Some(Value::new(vec![
                                cast("int"),
                                leaf(TokenKind::Number, "3"),
                            ])),
                        },
                        EnumMember {
                            name: "BLUE".to_string(),
                            value: None,
                        },
                    ],
                }),
                4,
            )
            .with_doc(Some(doc)),
        );

        let lowered = lower(&codebase, &LowerConfig::default());
        let features = lowered.features();
        assert_eq!(labels(&lowered), ["define RED", "define BLUE"]);
        match features[0].kind() {
            FeatureKind::Define(define) => assert_eq!(define.value.to_string(), "3"),
            other => panic!("unexpected feature {other:?}"),
        }
        match features[1].kind() {
            FeatureKind::Define(define) => assert!(define.value.is_empty()),
            other => panic!("unexpected feature {other:?}"),
        }
        assert!(features[0].doc().is_some());
        assert!(features[1].doc().is_none());
        assert_eq!(features[1].line(), 4);
    }

    #[test]
    fn test_private_hidden_and_unsupported_are_dropped() {
        let mut codebase = Codebase::new();
        let private_vars = VariableCollection {
            access: Access::Private,
            ty: "int".to_string(),
            items: vec![VariableItem::Scalar {
                name: "secret".to_string(),
                value: None,
            }],
        };
        codebase.push_feature(Feature::new(FeatureKind::Variables(private_vars), 1));
        codebase.push_feature(Feature::new(
            FeatureKind::Include(Include {
                path: "lib.acs".to_string(),
            }),
            2,
        ));
        codebase.push_feature(Feature::new(
            FeatureKind::Struct(Struct {
                access: Access::Public,
                name: Some("Point".to_string()),
                members: Vec::new(),
                instances: Vec::new(),
            }),
            3,
        ));
        let hidden = Feature::new(
            FeatureKind::Variables(VariableCollection {
                access: Access::Public,
                ty: "int".to_string(),
                items: vec![VariableItem::Scalar {
                    name: "internal".to_string(),
                    value: None,
                }],
            }),
            4,
        )
        .with_doc(Some(DocComment {
            hidden: true,
            ..DocComment::default()
        }));
        codebase.push_feature(hidden);

        let lowered = lower(&codebase, &LowerConfig::default());
        assert!(lowered.features().is_empty());
    }

    #[test]
    fn test_variables_are_coerced_and_struct_items_removed() {
        let mut codebase = Codebase::new();
        let vars = VariableCollection {
            access: Access::Public,
            ty: "vector".to_string(),
            items: vec![
                VariableItem::StructInit {
                    name: "origin".to_string(),
                    values: vec!["0".to_string()],
                },
                VariableItem::Scalar {
                    name: "speed".to_string(),
                    value: Some(Value::new(vec![cast("fixed"), leaf(TokenKind::Number, "1.5")])),
                },
            ],
        };
        codebase.push_feature(Feature::new(FeatureKind::Variables(vars), 1));
        let only_struct = VariableCollection {
            access: Access::Public,
            ty: "point".to_string(),
            items: vec![VariableItem::StructInit {
                name: "p".to_string(),
                values: Vec::new(),
            }],
        };
        codebase.push_feature(Feature::new(FeatureKind::Variables(only_struct), 2));

        let lowered = lower(&codebase, &LowerConfig::default());
        assert_eq!(lowered.features().len(), 1);
        match lowered.features()[0].kind() {
            FeatureKind::Variables(vars) => {
                assert_eq!(vars.ty, "int");
                assert_eq!(
                    vars.items,
                    [VariableItem::Scalar {
                        name: "speed".to_string(),
                        value: Some(Value::new(vec![leaf(TokenKind::Number, "1.5")])),
                    }]
                );
            }
            other => panic!("unexpected feature {other:?}"),
        }
    }

    #[test]
    fn test_function_types_are_coerced() {
        let mut codebase = Codebase::new();
        let function = Function {
            access: Access::Public,
            return_type: "actor".to_string(),
            name: "Find".to_string(),
            params: vec![FunctionParam {
                ty: "str".to_string(),
                name: "tag".to_string(),
                default: Some("\"\"".to_string()),
            }],
            clientside: true,
        };
        codebase.push_feature(Feature::new(FeatureKind::Function(function.clone()), 1));

        let lowered = lower(&codebase, &LowerConfig::default());
        match lowered.features()[0].kind() {
            FeatureKind::Function(lowered) => {
                assert_eq!(lowered.return_type, "int");
                assert_eq!(lowered.params, function.params);
                assert!(lowered.clientside);
            }
            other => panic!("unexpected feature {other:?}"),
        }
    }

    #[test]
    fn test_namespace_shape_is_kept() {
        let mut inner = Codebase::new();
        inner.push_feature(Feature::new(
            FeatureKind::Include(Include {
                path: "x.acs".to_string(),
            }),
            1,
        ));
        let mut root = Codebase::new();
        root.insert_namespace(NamespaceKey::named(true, "Game"), inner);

        let lowered = lower(&root, &LowerConfig::default());
        let game = lowered
            .namespace(&NamespaceKey::named(true, "Game"))
            .expect("namespace kept");
        assert!(game.features().is_empty());
    }
}
