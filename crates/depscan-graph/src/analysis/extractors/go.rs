//! Go: `import` declarations and capitalized top-level declarations.

use tree_sitter::Node;

use super::{children_by_field, line, named_children, preorder, string_value, text};
use crate::export::{Export, ExportKind};
use crate::import::Import;

pub(super) fn extract(root: Node<'_>, source: &str) -> (Vec<Import>, Vec<Export>) {
    let mut imports = Vec::new();
    let mut exports = Vec::new();

    for declaration in named_children(root) {
        match declaration.kind() {
            "import_declaration" => import_declaration(declaration, source, &mut imports),
            "function_declaration" | "method_declaration" => {
                if let Some(name) = declaration.child_by_field_name("name") {
                    push_exported(&mut exports, text(name, source), ExportKind::Function, name);
                }
            }
            "type_declaration" => {
                for spec in named_children(declaration) {
                    if !matches!(spec.kind(), "type_spec" | "type_alias") {
                        continue;
                    }
                    let Some(name) = spec.child_by_field_name("name") else {
                        continue;
                    };
                    let kind = match spec.child_by_field_name("type").map(|t| t.kind()) {
                        Some("struct_type") => ExportKind::Class,
                        Some("interface_type") => ExportKind::Interface,
                        _ => ExportKind::Type,
                    };
                    push_exported(&mut exports, text(name, source), kind, name);
                }
            }
            "const_declaration" | "var_declaration" => {
                preorder(declaration, |node| match node.kind() {
                    "const_spec" | "var_spec" => {
                        for name in children_by_field(node, "name") {
                            push_exported(&mut exports, text(name, source), ExportKind::Const, name);
                        }
                        false
                    }
                    "const_declaration" | "var_declaration" | "var_spec_list" => true,
                    _ => false,
                });
            }
            _ => {}
        }
    }

    (imports, exports)
}

fn import_declaration(declaration: Node<'_>, source: &str, imports: &mut Vec<Import>) {
    preorder(declaration, |node| match node.kind() {
        "import_spec" => {
            if let Some(raw) = node
                .child_by_field_name("path")
                .and_then(|path| string_value(path, source))
            {
                // alias, blank (`_`) or dot import
                let symbols = node
                    .child_by_field_name("name")
                    .map(|alias| vec![text(alias, source).to_string()])
                    .unwrap_or_default();
                imports.push(Import::new(raw, line(node)).with_symbols(symbols));
            }
            false
        }
        _ => true,
    });
}

fn push_exported(exports: &mut Vec<Export>, name: &str, kind: ExportKind, node: Node<'_>) {
    if name.chars().next().is_some_and(char::is_uppercase) {
        exports.push(Export::new(name, kind, line(node)));
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::run;
    use crate::export::ExportKind;
    use crate::language::Language;

    #[test]
    fn single_and_grouped_imports() {
        let source = r#"package main

import "fmt"

import (
	"os"
	str "strings"
	_ "embed"
	. "example.com/app/util"
)
"#;
        let (imports, _) = run(Language::Go, source);
        let found: Vec<(&str, Vec<String>, u32)> = imports
            .iter()
            .map(|i| (i.raw_path.as_str(), i.symbols.clone(), i.line))
            .collect();
        assert_eq!(
            found,
            vec![
                ("fmt", vec![], 3),
                ("os", vec![], 6),
                ("strings", vec!["str".to_string()], 7),
                ("embed", vec!["_".to_string()], 8),
                ("example.com/app/util", vec![".".to_string()], 9),
            ]
        );
        assert!(imports.iter().all(|i| !i.is_default));
    }

    #[test]
    fn only_capitalized_declarations_are_exported() {
        let source = r#"package shapes

type Shape interface { Area() float64 }
type Square struct { side float64 }
type Meters float64
type hidden struct{}

func New() Shape { return nil }
func helper() {}
func (s Square) Area() float64 { return s.side * s.side }

const Pi, tau = 3.14, 6.28
var (
	Default = Square{}
	cache   = 1
)
"#;
        let (_, exports) = run(Language::Go, source);
        let found: Vec<(&str, ExportKind)> =
            exports.iter().map(|e| (e.name.as_str(), e.kind)).collect();
        assert_eq!(
            found,
            vec![
                ("Shape", ExportKind::Interface),
                ("Square", ExportKind::Class),
                ("Meters", ExportKind::Type),
                ("New", ExportKind::Function),
                ("Area", ExportKind::Function),
                ("Pi", ExportKind::Const),
                ("Default", ExportKind::Const),
            ]
        );
        assert_eq!(exports[0].line, 3);
        assert_eq!(exports[6].line, 14);
    }
}
