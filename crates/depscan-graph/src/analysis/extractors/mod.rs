//! Import/export extraction from syntax trees.
//!
//! One strategy per language family walks the tree and emits [`Import`] and
//! [`Export`] records in document order, so line numbers never decrease
//! within either sequence.

mod ecmascript;
mod go;
mod python;

use tree_sitter::{Node, Tree};

use crate::export::Export;
use crate::import::Import;
use crate::language::{Language, LanguageFamily};

/// Extract imports and exports from a parsed file.
///
/// Never fails: a construct the extractor does not understand is skipped.
pub fn extract(tree: &Tree, source: &str, language: Language) -> (Vec<Import>, Vec<Export>) {
    let root = tree.root_node();
    match language.family() {
        LanguageFamily::EcmaScript => ecmascript::extract(root, source),
        LanguageFamily::Go => go::extract(root, source),
        LanguageFamily::Python => python::extract(root, source),
    }
}

/// Pre-order depth-first walk using an explicit stack.
///
/// `visit` returns whether to descend into the node's children. Children
/// are visited in source order.
fn preorder<'t>(root: Node<'t>, mut visit: impl FnMut(Node<'t>) -> bool) {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if !visit(node) {
            continue;
        }
        let mut cursor = node.walk();
        let children: Vec<Node<'t>> = node.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
}

fn text<'s>(node: Node<'_>, source: &'s str) -> &'s str {
    source.get(node.byte_range()).unwrap_or("")
}

/// 1-based line of the node's first byte.
fn line(node: Node<'_>) -> u32 {
    node.start_position().row as u32 + 1
}

/// Contents of a string literal node, without quotes.
fn string_value(node: Node<'_>, source: &str) -> Option<String> {
    let value = text(node, source).trim_matches(|c| c == '"' || c == '\'' || c == '`');
    (!value.is_empty()).then(|| value.to_string())
}

fn named_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

fn child_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find(|child| child.kind() == kind);
    found
}

fn children_by_field<'t>(node: Node<'t>, field: &str) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.children_by_field_name(field, &mut cursor).collect()
}
