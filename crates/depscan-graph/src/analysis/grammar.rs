//! Grammar adapter: bytes in, tree-sitter syntax tree out.

use std::path::Path;

use tree_sitter::{Parser, Tree};

use crate::error::ParseError;
use crate::language::Language;

/// Parse `source` with the grammar for `language`.
///
/// tree-sitter recovers from syntax errors, so a tree containing `ERROR`
/// nodes is still returned and extraction works on whatever parsed. Only a
/// grammar that fails to load or a parser that produces no tree is an error.
pub fn parse_source(path: &Path, source: &[u8], language: Language) -> Result<Tree, ParseError> {
    let mut parser = Parser::new();
    parser
        .set_language(&language.grammar())
        .map_err(|e| ParseError::new(path, format!("failed to load {language} grammar: {e}")))?;

    parser
        .parse(source, None)
        .ok_or_else(|| ParseError::new(path, "parser produced no syntax tree"))
}
