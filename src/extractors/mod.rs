//! Declaration extraction
//!
//! Walks the top-level declarations of every file in a forest and turns each
//! declared name into a [`Declaration`]. Only the top-level list of each file is
//! visited; function bodies and nested declarations are never entered.

mod declaration;
mod receiver;

pub use declaration::Declaration;
pub use receiver::resolve_receiver;

use crate::forest::ast::{Decl, File, ObjKind, Spec};
use crate::forest::Forest;

/// Extract declarations from every file, in forest order
pub fn extract_declarations(forest: &Forest) -> Vec<Declaration> {
    let mut decls = Vec::new();
    for (file_key, file) in forest {
        extract_file(file_key, file, &mut decls);
    }
    decls
}

/// Extract declarations from one file, in source order
pub fn extract_file(file_key: &str, file: &File, decls: &mut Vec<Declaration>) {
    for decl in &file.decls {
        match decl {
            Decl::Gen(group) => {
                for spec in &group.specs {
                    match spec {
                        Spec::Value(value) => {
                            decls.extend(value.names.iter().map(|name| Declaration {
                                label: name.name.clone(),
                                kind: name.obj,
                                file: file_key.to_string(),
                                line: name.line,
                                ..Declaration::default()
                            }));
                        }
                        Spec::Type(ty) => decls.push(Declaration {
                            label: ty.name.name.clone(),
                            kind: Some(ObjKind::Type),
                            file: file_key.to_string(),
                            line: ty.line,
                            ..Declaration::default()
                        }),
                        Spec::Import => {}
                    }
                }
            }
            Decl::Func(func) => decls.push(Declaration {
                label: func.name.name.clone(),
                receiver: resolve_receiver(func.recv.as_ref()),
                kind: Some(ObjKind::Func),
                file: file_key.to_string(),
                line: func.line,
                children: Vec::new(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forest::ast::{FuncDecl, GenDecl, Ident, ValueSpec};
    use crate::forest::parse_source;
    use pretty_assertions::assert_eq;

    fn extract(code: &str) -> Vec<Declaration> {
        let mut forest = Forest::new();
        forest.insert("widget.go".to_string(), parse_source("widget.go", code).unwrap());
        extract_declarations(&forest)
    }

    fn decl(label: &str, receiver: &str, kind: ObjKind, line: usize) -> Declaration {
        Declaration {
            label: label.to_string(),
            receiver: receiver.to_string(),
            kind: Some(kind),
            file: "widget.go".to_string(),
            line,
            children: Vec::new(),
        }
    }

    #[test]
    fn test_extracts_every_top_level_kind_in_source_order() {
        let code = r#"package widgets

import (
	"fmt"
	"net/http"
)

// Version of the widget protocol.
const Version = "1.0"

var (
	registry     = map[string]*Widget{}
	count, total int
)

// Widget renders things.
type Widget struct {
	Name string
}

type (
	Renderer interface{ Render() string }
	ID       = string
)

func New(name string) *Widget {
	inner := func() {}
	inner()
	return &Widget{Name: name}
}

func (w *Widget) Render() string {
	return fmt.Sprintf("<%s>", w.Name)
}

func (c *http.Client) Fetch() {}
"#;
        let decls = extract(code);

        assert_eq!(
            decls,
            vec![
                decl("Version", "", ObjKind::Const, 9),
                decl("registry", "", ObjKind::Var, 12),
                decl("count", "", ObjKind::Var, 13),
                decl("total", "", ObjKind::Var, 13),
                decl("Widget", "", ObjKind::Type, 17),
                decl("Renderer", "", ObjKind::Type, 22),
                decl("ID", "", ObjKind::Type, 23),
                decl("New", "", ObjKind::Func, 26),
                decl("Render", "Widget", ObjKind::Func, 32),
                decl("Fetch", "http.Client", ObjKind::Func, 36),
            ]
        );
    }

    #[test]
    fn test_func_count_matches_functions_and_methods() {
        let code = r#"package p

func A() {}
func (x X) B() {}
func (x *X) C() {}
func (x []*X) D() {}
func init() {}
func init() {}
"#;
        let funcs = extract(code)
            .into_iter()
            .filter(|d| d.kind == Some(ObjKind::Func))
            .count();
        assert_eq!(funcs, 6);
    }

    #[test]
    fn test_receiver_normalization_from_source() {
        let code = r#"package p

func (w *Widget) Pointer() {}
func (w []*Widget) SliceOfPointers() {}
func (w *[]Widget) PointerToSlice() {}
func (m map[string]int) Map() {}
func (s struct{}) Struct() {}
func Free() {}
"#;
        let receivers: Vec<(String, String)> = extract(code)
            .into_iter()
            .map(|d| (d.label, d.receiver))
            .collect();

        assert_eq!(
            receivers,
            vec![
                ("Pointer".to_string(), "Widget".to_string()),
                ("SliceOfPointers".to_string(), "Widget".to_string()),
                ("PointerToSlice".to_string(), "Widget".to_string()),
                ("Map".to_string(), "map[string]int".to_string()),
                ("Struct".to_string(), "struct{}".to_string()),
                ("Free".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn test_duplicate_names_across_files_are_kept() {
        let mut forest = Forest::new();
        for key in ["a.go", "b.go"] {
            forest.insert(
                key.to_string(),
                parse_source(key, "package p\n\nfunc Helper() {}\n").unwrap(),
            );
        }

        let decls = extract_declarations(&forest);
        let files: Vec<&str> = decls.iter().map(|d| d.file.as_str()).collect();
        assert_eq!(files, vec!["a.go", "b.go"]);
        assert!(decls.iter().all(|d| d.label == "Helper"));
    }

    #[test]
    fn test_unannotated_value_name_has_no_kind() {
        let file = File {
            package: Ident::new("x", 1),
            decls: vec![
                Decl::Gen(GenDecl {
                    specs: vec![Spec::Value(ValueSpec {
                        names: vec![Ident::new("orphan", 3)],
                    })],
                }),
                Decl::Func(FuncDecl {
                    name: Ident::new("F", 7),
                    recv: None,
                    line: 7,
                }),
            ],
        };

        let mut decls = Vec::new();
        extract_file("x.go", &file, &mut decls);

        assert_eq!(decls.len(), 2);
        assert_eq!(decls[0].kind, None);
        assert_eq!(
            serde_json::to_string(&decls[0]).unwrap(),
            r#"{"label":"orphan","file":"x.go","line":3}"#
        );
        assert_eq!(decls[1].label, "F");
    }

    #[test]
    fn test_empty_forest() {
        let decls = extract_declarations(&Forest::new());
        assert!(decls.is_empty());
        assert_eq!(serde_json::to_string(&decls).unwrap(), "[]");
    }
}
