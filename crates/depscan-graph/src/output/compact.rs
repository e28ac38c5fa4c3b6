//! Line-oriented compact graph format.
//!
//! ```text
//! FILE:/repo/src/a.ts
//! LANG:typescript
//! IMPORTS:/repo/src/b.ts:1,react:2
//! EXPORTS:App:function:4
//! IMPORTEDBY:/repo/src/main.ts
//! ---
//! CIRCULAR:/repo/src/a.ts>/repo/src/b.ts
//! ---
//! DEADCODE:/repo/src/main.ts
//! ---
//! META:lastUpdated=2024-05-01T12:00:00Z
//! ```
//!
//! Imports show the resolved path when there is one, else the raw
//! specifier. Symbols and default flags are not written.

use std::collections::BTreeSet;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::SerializationError;
use crate::export::{Export, ExportKind};
use crate::file_id::FileId;
use crate::file_node::FileNode;
use crate::graph::DependencyGraph;
use crate::import::Import;
use crate::language::Language;

const SECTION_END: &str = "---";

/// Render a graph. Output is identical for identical graphs, META included.
pub fn to_compact(graph: &DependencyGraph) -> String {
    let mut out = String::new();

    for node in graph.files.values() {
        push_line(&mut out, "FILE:", node.path.as_str());
        push_line(&mut out, "LANG:", node.language.as_str());

        let imports: Vec<String> = node
            .imports
            .iter()
            .map(|imp| format!("{}:{}", imp.display_path(), imp.line))
            .collect();
        push_line(&mut out, "IMPORTS:", &imports.join(","));

        let exports: Vec<String> = node
            .exports
            .iter()
            .map(|exp| format!("{}:{}:{}", exp.name, exp.kind, exp.line))
            .collect();
        push_line(&mut out, "EXPORTS:", &exports.join(","));

        let importers: Vec<&str> = node.imported_by.iter().map(FileId::as_str).collect();
        push_line(&mut out, "IMPORTEDBY:", &importers.join(","));

        out.push_str(SECTION_END);
        out.push('\n');
    }

    if !graph.circular.is_empty() {
        for cycle in &graph.circular {
            let members: Vec<&str> = cycle.iter().map(FileId::as_str).collect();
            push_line(&mut out, "CIRCULAR:", &members.join(">"));
        }
        out.push_str(SECTION_END);
        out.push('\n');
    }

    if !graph.dead_code.is_empty() {
        for dead in &graph.dead_code {
            push_line(&mut out, "DEADCODE:", dead.as_str());
        }
        out.push_str(SECTION_END);
        out.push('\n');
    }

    push_line(
        &mut out,
        "META:lastUpdated=",
        &graph.last_updated.to_rfc3339_opts(SecondsFormat::Secs, true),
    );

    out
}

fn push_line(out: &mut String, tag: &str, value: &str) {
    out.push_str(tag);
    out.push_str(value);
    out.push('\n');
}

/// File block being read; `first_line` is where its FILE tag was.
struct PendingFile {
    first_line: usize,
    path: FileId,
    language: Option<Language>,
    imports: Vec<(String, u32)>,
    exports: Vec<Export>,
    imported_by: BTreeSet<FileId>,
}

impl PendingFile {
    fn into_node(self) -> Result<(FileNode, Vec<(String, u32)>), SerializationError> {
        let language = self
            .language
            .ok_or_else(|| SerializationError::compact(self.first_line, "file block has no LANG"))?;
        let mut node = FileNode::new(self.path, language).with_exports(self.exports);
        node.imported_by = self.imported_by;
        Ok((node, self.imports))
    }
}

/// Read a compact document back into a graph.
///
/// An import whose written path is a file in the document becomes a
/// resolved import of that file; any other path is kept as the raw
/// specifier.
pub fn parse_compact(text: &str) -> Result<DependencyGraph, SerializationError> {
    let mut files: Vec<(FileNode, Vec<(String, u32)>)> = Vec::new();
    let mut current: Option<PendingFile> = None;
    let mut circular = Vec::new();
    let mut dead_code = Vec::new();
    let mut last_updated: Option<DateTime<Utc>> = None;

    for (index, raw_line) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw_line.trim_end_matches('\r');

        if line.is_empty() {
            continue;
        }
        if line == SECTION_END {
            if let Some(pending) = current.take() {
                files.push(pending.into_node()?);
            }
            continue;
        }

        let Some((tag, value)) = line.split_once(':') else {
            return Err(SerializationError::compact(line_no, format!("unrecognized line '{line}'")));
        };

        match tag {
            "FILE" => {
                if let Some(pending) = current.take() {
                    files.push(pending.into_node()?);
                }
                current = Some(PendingFile {
                    first_line: line_no,
                    path: FileId::from_canonical(value),
                    language: None,
                    imports: Vec::new(),
                    exports: Vec::new(),
                    imported_by: BTreeSet::new(),
                });
            }
            "LANG" => {
                let pending = in_file(&mut current, line_no, tag)?;
                let language = value
                    .parse::<Language>()
                    .map_err(|e| SerializationError::compact(line_no, e.to_string()))?;
                pending.language = Some(language);
            }
            "IMPORTS" => {
                let pending = in_file(&mut current, line_no, tag)?;
                for entry in list(value, ',') {
                    let (path, line) = entry
                        .rsplit_once(':')
                        .ok_or_else(|| SerializationError::compact(line_no, format!("import '{entry}' has no line")))?;
                    pending.imports.push((path.to_string(), parse_line(line, line_no)?));
                }
            }
            "EXPORTS" => {
                let pending = in_file(&mut current, line_no, tag)?;
                for entry in list(value, ',') {
                    pending.exports.push(parse_export(entry, line_no)?);
                }
            }
            "IMPORTEDBY" => {
                let pending = in_file(&mut current, line_no, tag)?;
                pending
                    .imported_by
                    .extend(list(value, ',').map(FileId::from_canonical));
            }
            "CIRCULAR" => {
                circular.push(list(value, '>').map(FileId::from_canonical).collect());
            }
            "DEADCODE" => {
                dead_code.push(FileId::from_canonical(value));
            }
            "META" => {
                let Some(stamp) = value.strip_prefix("lastUpdated=") else {
                    continue;
                };
                let parsed = DateTime::parse_from_rfc3339(stamp)
                    .map_err(|e| SerializationError::compact(line_no, format!("bad timestamp: {e}")))?;
                last_updated = Some(parsed.with_timezone(&Utc));
            }
            other => {
                return Err(SerializationError::compact(line_no, format!("unknown tag '{other}'")));
            }
        }
    }

    if let Some(pending) = current.take() {
        files.push(pending.into_node()?);
    }

    let last_updated = last_updated
        .ok_or_else(|| SerializationError::compact(text.lines().count(), "missing META:lastUpdated"))?;
    let mut graph = DependencyGraph::with_timestamp(last_updated);
    let known: BTreeSet<FileId> = files.iter().map(|(node, _)| node.path.clone()).collect();

    for (mut node, imports) in files {
        node.imports = imports
            .into_iter()
            .map(|(path, line)| {
                let mut import = Import::new(path.as_str(), line);
                let target = FileId::from_canonical(path);
                if known.contains(&target) {
                    import.resolved_path = Some(target);
                }
                import
            })
            .collect();
        graph.insert_file(node);
    }
    graph.circular = circular;
    graph.dead_code = dead_code;

    Ok(graph)
}

fn in_file<'a>(
    current: &'a mut Option<PendingFile>,
    line_no: usize,
    tag: &str,
) -> Result<&'a mut PendingFile, SerializationError> {
    current
        .as_mut()
        .ok_or_else(|| SerializationError::compact(line_no, format!("{tag} outside a FILE block")))
}

fn list(value: &str, separator: char) -> impl Iterator<Item = &str> {
    value.split(separator).filter(|entry| !entry.is_empty())
}

fn parse_line(value: &str, line_no: usize) -> Result<u32, SerializationError> {
    value
        .parse()
        .map_err(|_| SerializationError::compact(line_no, format!("'{value}' is not a line number")))
}

fn parse_export(entry: &str, line_no: usize) -> Result<Export, SerializationError> {
    let mut parts = entry.rsplitn(3, ':');
    let (Some(line), Some(kind), Some(name)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(SerializationError::compact(line_no, format!("export '{entry}' is incomplete")));
    };
    let kind: ExportKind = kind
        .parse()
        .map_err(|e: String| SerializationError::compact(line_no, e))?;
    let mut export = Export::new(name, kind, parse_line(line, line_no)?);
    if name == "default" {
        export = export.default_export();
    }
    Ok(export)
}
