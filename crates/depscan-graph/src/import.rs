use serde::{Deserialize, Serialize};

use crate::file_id::FileId;

/// One import statement (or import-like call) found in a source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Import {
    /// The specifier exactly as written, without quotes.
    pub raw_path: String,
    /// Graph key of the imported file; `None` when the import is unresolved.
    #[serde(with = "empty_as_none", default)]
    pub resolved_path: Option<FileId>,
    /// Imported names, best-effort. Empty for side-effect imports.
    #[serde(default)]
    pub symbols: Vec<String>,
    pub is_default: bool,
    /// 1-based line of the statement.
    pub line: u32,
}

impl Import {
    pub fn new(raw_path: impl Into<String>, line: u32) -> Self {
        Self {
            raw_path: raw_path.into(),
            resolved_path: None,
            symbols: Vec::new(),
            is_default: false,
            line,
        }
    }

    pub fn with_symbols(mut self, symbols: Vec<String>) -> Self {
        self.symbols = symbols;
        self
    }

    pub fn with_default(mut self, is_default: bool) -> Self {
        self.is_default = is_default;
        self
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved_path.is_some()
    }

    /// Path shown in compact output: the resolved file when known, else the
    /// raw specifier.
    pub fn display_path(&self) -> &str {
        self.resolved_path
            .as_ref()
            .map(FileId::as_str)
            .unwrap_or(&self.raw_path)
    }
}

// Unresolved imports serialize as "" rather than null
mod empty_as_none {
    use super::FileId;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<FileId>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(value.as_ref().map(FileId::as_str).unwrap_or(""))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<FileId>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw
            .filter(|s| !s.is_empty())
            .map(FileId::from_canonical))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolved_serializes_as_empty_string() {
        let import = Import::new("react", 3);
        let json = serde_json::to_value(&import).unwrap();
        assert_eq!(json["RawPath"], "react");
        assert_eq!(json["ResolvedPath"], "");
        assert_eq!(json["Line"], 3);

        let back: Import = serde_json::from_value(json).unwrap();
        assert_eq!(back.resolved_path, None);
    }

    #[test]
    fn null_resolved_path_reads_as_none() {
        let json = r#"{"RawPath":"x","ResolvedPath":null,"Symbols":[],"IsDefault":false,"Line":1}"#;
        let import: Import = serde_json::from_str(json).unwrap();
        assert!(!import.is_resolved());
    }

    #[test]
    fn display_path_prefers_resolved() {
        let mut import = Import::new("./b", 1);
        assert_eq!(import.display_path(), "./b");
        import.resolved_path = Some(FileId::new("/p/b.ts"));
        assert_eq!(import.display_path(), "/p/b.ts");
    }
}
