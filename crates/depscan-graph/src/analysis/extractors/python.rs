//! Python: `import` / `from ... import` statements anywhere in the file, and
//! public (non-underscore) top-level definitions.

use tree_sitter::Node;

use super::{child_of_kind, children_by_field, line, named_children, preorder, text};
use crate::export::{Export, ExportKind};
use crate::import::Import;

pub(super) fn extract(root: Node<'_>, source: &str) -> (Vec<Import>, Vec<Export>) {
    let mut imports = Vec::new();

    preorder(root, |node| match node.kind() {
        "import_statement" => {
            import_statement(node, source, &mut imports);
            false
        }
        "import_from_statement" => {
            imports.extend(import_from_statement(node, source));
            false
        }
        "future_import_statement" => false,
        _ => true,
    });

    let mut exports = Vec::new();
    for statement in named_children(root) {
        top_level_exports(statement, source, &mut exports);
    }

    (imports, exports)
}

/// `import a.b, c as d` yields one import per module.
fn import_statement(node: Node<'_>, source: &str, imports: &mut Vec<Import>) {
    for name in children_by_field(node, "name") {
        let import = match name.kind() {
            "aliased_import" => {
                let Some(module) = name.child_by_field_name("name") else {
                    continue;
                };
                let symbols = name
                    .child_by_field_name("alias")
                    .map(|alias| vec![text(alias, source).to_string()])
                    .unwrap_or_default();
                Import::new(text(module, source), line(node)).with_symbols(symbols)
            }
            _ => Import::new(text(name, source), line(node)),
        };
        imports.push(import);
    }
}

fn import_from_statement(node: Node<'_>, source: &str) -> Option<Import> {
    let module = node.child_by_field_name("module_name")?;
    let raw = text(module, source);
    if raw.is_empty() {
        return None;
    }

    let mut symbols: Vec<String> = children_by_field(node, "name")
        .into_iter()
        .filter_map(|name| match name.kind() {
            "aliased_import" => name
                .child_by_field_name("name")
                .map(|n| text(n, source).to_string()),
            _ => Some(text(name, source).to_string()),
        })
        .collect();
    if child_of_kind(node, "wildcard_import").is_some() {
        symbols.push("*".to_string());
    }

    Some(Import::new(raw, line(node)).with_symbols(symbols))
}

fn top_level_exports(statement: Node<'_>, source: &str, exports: &mut Vec<Export>) {
    match statement.kind() {
        "function_definition" => push_public(exports, statement, source, ExportKind::Function),
        "class_definition" => push_public(exports, statement, source, ExportKind::Class),
        "decorated_definition" => {
            if let Some(definition) = statement.child_by_field_name("definition") {
                top_level_exports(definition, source, exports);
            }
        }
        "expression_statement" => {
            let Some(assignment) = named_children(statement)
                .into_iter()
                .find(|child| child.kind() == "assignment")
            else {
                return;
            };
            let Some(left) = assignment.child_by_field_name("left") else {
                return;
            };
            let targets = match left.kind() {
                "identifier" => vec![left],
                "pattern_list" | "tuple_pattern" => named_children(left)
                    .into_iter()
                    .filter(|target| target.kind() == "identifier")
                    .collect(),
                _ => Vec::new(),
            };
            for target in targets {
                let name = text(target, source);
                if is_public(name) {
                    exports.push(Export::new(name, ExportKind::Const, line(target)));
                }
            }
        }
        _ => {}
    }
}

fn push_public(exports: &mut Vec<Export>, definition: Node<'_>, source: &str, kind: ExportKind) {
    if let Some(name) = definition.child_by_field_name("name") {
        let name = text(name, source);
        if is_public(name) {
            exports.push(Export::new(name, kind, line(definition)));
        }
    }
}

fn is_public(name: &str) -> bool {
    !name.is_empty() && !name.starts_with('_')
}

#[cfg(test)]
mod tests {
    use super::super::tests::run;
    use crate::export::ExportKind;
    use crate::language::Language;

    #[test]
    fn import_statements() {
        let source = r#"from __future__ import annotations
import os
import os.path as osp, json
from . import sibling
from ..pkg.mod import a, b as c
from .star import *
"#;
        let (imports, _) = run(Language::Python, source);
        let found: Vec<(&str, Vec<String>, u32)> = imports
            .iter()
            .map(|i| (i.raw_path.as_str(), i.symbols.clone(), i.line))
            .collect();
        assert_eq!(
            found,
            vec![
                ("os", vec![], 2),
                ("os.path", vec!["osp".to_string()], 3),
                ("json", vec![], 3),
                (".", vec!["sibling".to_string()], 4),
                ("..pkg.mod", vec!["a".to_string(), "b".to_string()], 5),
                (".star", vec!["*".to_string()], 6),
            ]
        );
    }

    #[test]
    fn nested_imports_are_found() {
        let source = "def load():\n    import yaml\n    return yaml\n";
        let (imports, _) = run(Language::Python, source);
        assert_eq!(imports.len(), 1);
        assert_eq!(imports[0].raw_path, "yaml");
        assert_eq!(imports[0].line, 2);
    }

    #[test]
    fn public_top_level_definitions_are_exported() {
        let source = r#"VERSION = "1.0"
_private = 1
a, b = 1, 2

def run():
    inner = 1

def _helper():
    pass

@dataclass
class Config:
    name: str
"#;
        let (_, exports) = run(Language::Python, source);
        let found: Vec<(&str, ExportKind, u32)> = exports
            .iter()
            .map(|e| (e.name.as_str(), e.kind, e.line))
            .collect();
        assert_eq!(
            found,
            vec![
                ("VERSION", ExportKind::Const, 1),
                ("a", ExportKind::Const, 3),
                ("b", ExportKind::Const, 3),
                ("run", ExportKind::Function, 5),
                ("Config", ExportKind::Class, 12),
            ]
        );
        assert!(exports.iter().all(|e| !e.is_default));
    }
}
