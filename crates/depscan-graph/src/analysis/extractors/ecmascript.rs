//! TypeScript, TSX and JavaScript.
//!
//! Imports come from `import` statements, `export ... from` re-exports and
//! `require('...')` calls with a single string argument. Exports come from
//! top-level `export` statements only; declarations inside namespaces and
//! ambient modules are skipped.

use tree_sitter::Node;

use super::{child_of_kind, line, named_children, preorder, string_value, text};
use crate::export::{Export, ExportKind};
use crate::import::Import;

pub(super) fn extract(root: Node<'_>, source: &str) -> (Vec<Import>, Vec<Export>) {
    let mut imports = Vec::new();
    let mut exports = Vec::new();

    preorder(root, |node| match node.kind() {
        "import_statement" => {
            imports.extend(import_statement(node, source));
            false
        }
        "export_statement" => {
            export_statement(node, source, &mut imports, &mut exports);
            true
        }
        "call_expression" => {
            imports.extend(require_call(node, source));
            true
        }
        _ => true,
    });

    (imports, exports)
}

fn import_statement(node: Node<'_>, source: &str) -> Option<Import> {
    let require_clause = child_of_kind(node, "import_require_clause");
    let specifier = node
        .child_by_field_name("source")
        .or_else(|| require_clause.and_then(|c| c.child_by_field_name("source")))?;
    let raw = string_value(specifier, source)?;

    let mut symbols = Vec::new();
    let mut is_default = false;

    if let Some(clause) = child_of_kind(node, "import_clause") {
        for child in named_children(clause) {
            match child.kind() {
                "identifier" => {
                    is_default = true;
                    symbols.push(text(child, source).to_string());
                }
                "namespace_import" => {
                    if let Some(name) = child_of_kind(child, "identifier") {
                        symbols.push(text(name, source).to_string());
                    }
                }
                "named_imports" => {
                    for spec in named_children(child) {
                        if spec.kind() != "import_specifier" {
                            continue;
                        }
                        if let Some(name) = spec.child_by_field_name("name") {
                            symbols.push(specifier_name(name, source));
                        }
                    }
                }
                _ => {}
            }
        }
    }

    // import x = require('./x')
    if let Some(name) = require_clause.and_then(|c| child_of_kind(c, "identifier")) {
        symbols.push(text(name, source).to_string());
    }

    Some(
        Import::new(raw, line(node))
            .with_symbols(symbols)
            .with_default(is_default),
    )
}

fn export_statement(
    node: Node<'_>,
    source: &str,
    imports: &mut Vec<Import>,
    exports: &mut Vec<Export>,
) {
    let statement_line = line(node);

    if let Some(specifier) = node.child_by_field_name("source") {
        let Some(raw) = string_value(specifier, source) else {
            return;
        };
        imports.push(Import::new(raw, statement_line).with_symbols(reexported_names(node, source)));
        return;
    }

    if node.parent().map(|p| p.kind()) != Some("program") {
        return;
    }

    let is_default = child_of_kind(node, "default").is_some();

    if let Some(declaration) = node.child_by_field_name("declaration") {
        declaration_exports(declaration, source, is_default, exports);
    } else if let Some(value) = node.child_by_field_name("value") {
        let (name, kind) = default_value(value, source);
        exports.push(Export::new(name, kind, statement_line).default_export());
    } else if let Some(clause) = child_of_kind(node, "export_clause") {
        for spec in named_children(clause) {
            if spec.kind() != "export_specifier" {
                continue;
            }
            let Some(exported) = spec
                .child_by_field_name("alias")
                .or_else(|| spec.child_by_field_name("name"))
            else {
                continue;
            };
            let name = specifier_name(exported, source);
            let mut export = Export::new(name.clone(), ExportKind::Const, line(spec));
            if name == "default" {
                export = export.default_export();
            }
            exports.push(export);
        }
    }
}

/// Names made visible by `export { a, b as c } from` or `export * as ns from`.
/// A bare `export * from` yields `*`.
fn reexported_names(node: Node<'_>, source: &str) -> Vec<String> {
    if let Some(clause) = child_of_kind(node, "export_clause") {
        return named_children(clause)
            .into_iter()
            .filter(|spec| spec.kind() == "export_specifier")
            .filter_map(|spec| {
                spec.child_by_field_name("alias")
                    .or_else(|| spec.child_by_field_name("name"))
            })
            .map(|name| specifier_name(name, source))
            .collect();
    }
    if let Some(namespace) = child_of_kind(node, "namespace_export") {
        return named_children(namespace)
            .into_iter()
            .map(|name| specifier_name(name, source))
            .collect();
    }
    if child_of_kind(node, "*").is_some() {
        return vec!["*".to_string()];
    }
    Vec::new()
}

fn declaration_exports(
    declaration: Node<'_>,
    source: &str,
    is_default: bool,
    exports: &mut Vec<Export>,
) {
    let kind = match declaration.kind() {
        "function_declaration" | "generator_function_declaration" | "function_signature" => {
            ExportKind::Function
        }
        "class_declaration" | "abstract_class_declaration" => ExportKind::Class,
        "interface_declaration" => ExportKind::Interface,
        "type_alias_declaration" | "enum_declaration" => ExportKind::Type,
        "lexical_declaration" | "variable_declaration" => {
            for declarator in named_children(declaration) {
                if declarator.kind() != "variable_declarator" {
                    continue;
                }
                let Some(pattern) = declarator.child_by_field_name("name") else {
                    continue;
                };
                let mut names = Vec::new();
                pattern_names(pattern, source, &mut names);
                for name in names {
                    exports.push(Export::new(name, ExportKind::Const, line(declarator)));
                }
            }
            return;
        }
        // export declare const x: number;
        "ambient_declaration" => {
            if let Some(inner) = named_children(declaration).into_iter().next() {
                declaration_exports(inner, source, is_default, exports);
            }
            return;
        }
        _ => return,
    };

    let name = declaration
        .child_by_field_name("name")
        .map(|n| text(n, source).to_string())
        .unwrap_or_else(|| "default".to_string());
    let export = Export::new(name, kind, line(declaration));
    exports.push(if is_default { export.default_export() } else { export });
}

/// Name and kind for `export default <expression>`.
fn default_value(value: Node<'_>, source: &str) -> (String, ExportKind) {
    let kind = match value.kind() {
        "class" => ExportKind::Class,
        "function_expression" | "function" | "generator_function" | "arrow_function" => {
            ExportKind::Function
        }
        _ => ExportKind::Const,
    };
    let name = match value.kind() {
        "identifier" => text(value, source).to_string(),
        _ => value
            .child_by_field_name("name")
            .map(|n| text(n, source).to_string())
            .unwrap_or_else(|| "default".to_string()),
    };
    (name, kind)
}

/// Bound identifiers of a declarator pattern, including destructuring.
fn pattern_names(pattern: Node<'_>, source: &str, names: &mut Vec<String>) {
    match pattern.kind() {
        "identifier" | "shorthand_property_identifier_pattern" => {
            names.push(text(pattern, source).to_string());
        }
        "assignment_pattern" | "object_assignment_pattern" => {
            if let Some(left) = pattern.child_by_field_name("left") {
                pattern_names(left, source, names);
            }
        }
        "pair_pattern" => {
            if let Some(value) = pattern.child_by_field_name("value") {
                pattern_names(value, source, names);
            }
        }
        "object_pattern" | "array_pattern" | "rest_pattern" => {
            for child in named_children(pattern) {
                pattern_names(child, source, names);
            }
        }
        _ => {}
    }
}

/// `require('x')` with exactly one string argument.
fn require_call(node: Node<'_>, source: &str) -> Option<Import> {
    let callee = node.child_by_field_name("function")?;
    if callee.kind() != "identifier" || text(callee, source) != "require" {
        return None;
    }
    let arguments = node.child_by_field_name("arguments")?;
    let args: Vec<Node<'_>> = named_children(arguments)
        .into_iter()
        .filter(|arg| arg.kind() != "comment")
        .collect();
    let [arg] = args.as_slice() else {
        return None;
    };
    if arg.kind() != "string" {
        return None;
    }
    Some(Import::new(string_value(*arg, source)?, line(node)))
}

/// Specifier names may be string literals (`export { x as "y" }`).
fn specifier_name(node: Node<'_>, source: &str) -> String {
    if node.kind() == "string" {
        string_value(node, source).unwrap_or_default()
    } else {
        text(node, source).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::run;
    use crate::export::ExportKind;
    use crate::language::Language;

    #[test]
    fn import_forms() {
        let source = r#"import React from 'react';
import { useState, useEffect as effect } from "react";
import * as utils from './utils';
import './side-effect.css';
import Def, { named } from './mixed';
"#;
        let (imports, _) = run(Language::TypeScript, source);
        assert_eq!(imports.len(), 5);

        assert_eq!(imports[0].raw_path, "react");
        assert!(imports[0].is_default);
        assert_eq!(imports[0].symbols, vec!["React"]);

        assert_eq!(imports[1].symbols, vec!["useState", "useEffect"]);
        assert!(!imports[1].is_default);

        assert_eq!(imports[2].raw_path, "./utils");
        assert_eq!(imports[2].symbols, vec!["utils"]);

        assert_eq!(imports[3].raw_path, "./side-effect.css");
        assert!(imports[3].symbols.is_empty());
        assert_eq!(imports[3].line, 4);

        assert!(imports[4].is_default);
        assert_eq!(imports[4].symbols, vec!["Def", "named"]);
    }

    #[test]
    fn require_calls_are_imports() {
        let source = "const fs = require('fs');\nconst x = require(name);\nrequire('./a', 2);\nfunction f() { return require(\"./lazy\"); }\n";
        let (imports, _) = run(Language::JavaScript, source);
        let paths: Vec<&str> = imports.iter().map(|i| i.raw_path.as_str()).collect();
        assert_eq!(paths, vec!["fs", "./lazy"]);
        assert_eq!(imports[1].line, 4);
    }

    #[test]
    fn reexports_become_imports() {
        let source = "export { a, b as c } from './lib';\nexport * from './all';\nexport * as ns from './ns';\n";
        let (imports, exports) = run(Language::TypeScript, source);
        assert!(exports.is_empty());
        assert_eq!(imports.len(), 3);
        assert_eq!(imports[0].raw_path, "./lib");
        assert_eq!(imports[0].symbols, vec!["a", "c"]);
        assert_eq!(imports[1].symbols, vec!["*"]);
        assert_eq!(imports[2].symbols, vec!["ns"]);
    }

    #[test]
    fn declaration_exports() {
        let source = r#"export function run() {}
export class Widget {}
export const a = 1, b = 2;
export interface Props {}
export type Id = string;
export enum Color { Red }
export let { x, y: renamed } = obj;
"#;
        let (_, exports) = run(Language::TypeScript, source);
        let found: Vec<(&str, ExportKind, u32)> = exports
            .iter()
            .map(|e| (e.name.as_str(), e.kind, e.line))
            .collect();
        assert_eq!(
            found,
            vec![
                ("run", ExportKind::Function, 1),
                ("Widget", ExportKind::Class, 2),
                ("a", ExportKind::Const, 3),
                ("b", ExportKind::Const, 3),
                ("Props", ExportKind::Interface, 4),
                ("Id", ExportKind::Type, 5),
                ("Color", ExportKind::Type, 6),
                ("x", ExportKind::Const, 7),
                ("renamed", ExportKind::Const, 7),
            ]
        );
        assert!(exports.iter().all(|e| !e.is_default));
    }

    #[test]
    fn default_exports() {
        let (_, named) = run(Language::TypeScript, "export default function App() {}\n");
        assert_eq!(named[0].name, "App");
        assert_eq!(named[0].kind, ExportKind::Function);
        assert!(named[0].is_default);

        let (_, anonymous) = run(Language::JavaScript, "export default () => 1;\n");
        assert_eq!(anonymous[0].name, "default");
        assert!(anonymous[0].is_default);

        let (_, ident) = run(Language::JavaScript, "const x = 1;\nexport default x;\n");
        assert_eq!(ident[0].name, "x");
        assert_eq!(ident[0].line, 2);
    }

    #[test]
    fn export_clause_uses_exported_names() {
        let source = "const a = 1;\nconst b = 2;\nexport { a, b as c };\n";
        let (_, exports) = run(Language::JavaScript, source);
        let names: Vec<&str> = exports.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
        assert!(exports.iter().all(|e| e.kind == ExportKind::Const));
    }

    #[test]
    fn tsx_components() {
        let source = "import { Button } from './Button';\nexport const App = () => <Button />;\n";
        let (imports, exports) = run(Language::Tsx, source);
        assert_eq!(imports[0].raw_path, "./Button");
        assert_eq!(exports[0].name, "App");
    }

    #[test]
    fn nested_exports_are_ignored() {
        let source = "declare module 'x' {\n  export const inner: number;\n}\nexport const outer = 1;\n";
        let (_, exports) = run(Language::TypeScript, source);
        let names: Vec<&str> = exports.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["outer"]);
    }
}
