use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Source language of a scanned file.
///
/// The set is closed: dispatch to a grammar and an extractor happens once per
/// file with an exhaustive `match`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    TypeScript,
    Tsx,
    JavaScript,
    Go,
    Python,
}

/// Languages that share one import/export syntax and one resolution strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageFamily {
    /// TypeScript, TSX and JavaScript.
    EcmaScript,
    Go,
    Python,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::TypeScript,
        Language::Tsx,
        Language::JavaScript,
        Language::Go,
        Language::Python,
    ];

    /// Map a file extension (without the leading dot) to a language.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "ts" | "mts" | "cts" => Some(Self::TypeScript),
            "tsx" => Some(Self::Tsx),
            "js" | "jsx" | "mjs" | "cjs" => Some(Self::JavaScript),
            "go" => Some(Self::Go),
            "py" | "pyi" => Some(Self::Python),
            _ => None,
        }
    }

    /// Language of a path, judged by its extension.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TypeScript => "typescript",
            Self::Tsx => "tsx",
            Self::JavaScript => "javascript",
            Self::Go => "go",
            Self::Python => "python",
        }
    }

    pub fn family(&self) -> LanguageFamily {
        match self {
            Self::TypeScript | Self::Tsx | Self::JavaScript => LanguageFamily::EcmaScript,
            Self::Go => LanguageFamily::Go,
            Self::Python => LanguageFamily::Python,
        }
    }

    /// The tree-sitter grammar for this language.
    pub fn grammar(&self) -> tree_sitter::Language {
        match self {
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            // JSX is part of the JavaScript grammar
            Self::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            Self::Go => tree_sitter_go::LANGUAGE.into(),
            Self::Python => tree_sitter_python::LANGUAGE.into(),
        }
    }
}

impl LanguageFamily {
    /// Extensions appended to an extensionless import path, in probe order.
    pub fn probe_extensions(&self) -> &'static [&'static str] {
        match self {
            Self::EcmaScript => &["ts", "tsx", "js", "jsx", "mjs", "cjs"],
            Self::Go => &["go"],
            Self::Python => &["py", "pyi"],
        }
    }

    /// Files that stand in for a directory import, in probe order.
    pub fn index_files(&self) -> &'static [&'static str] {
        match self {
            Self::EcmaScript => &["index.ts", "index.tsx", "index.js", "index.jsx"],
            Self::Go => &[],
            Self::Python => &["__init__.py", "__init__.pyi"],
        }
    }

    /// Separator between a module name and the package path that follows it.
    pub fn module_separator(&self) -> char {
        match self {
            Self::EcmaScript | Self::Go => '/',
            Self::Python => '.',
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a language name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown language '{0}' (expected one of: typescript, tsx, javascript, go, python)")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "typescript" | "ts" => Ok(Self::TypeScript),
            "tsx" => Ok(Self::Tsx),
            "javascript" | "js" => Ok(Self::JavaScript),
            "go" | "golang" => Ok(Self::Go),
            "python" | "py" => Ok(Self::Python),
            other => Err(UnknownLanguage(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_mapping_covers_all_supported_suffixes() {
        let cases = [
            ("a.ts", Language::TypeScript),
            ("a.mts", Language::TypeScript),
            ("a.tsx", Language::Tsx),
            ("a.js", Language::JavaScript),
            ("a.jsx", Language::JavaScript),
            ("a.mjs", Language::JavaScript),
            ("a.cjs", Language::JavaScript),
            ("a.go", Language::Go),
            ("a.py", Language::Python),
            ("a.pyi", Language::Python),
        ];
        for (path, expected) in cases {
            assert_eq!(Language::from_path(path), Some(expected), "{path}");
        }
        assert_eq!(Language::from_path("README.md"), None);
        assert_eq!(Language::from_path("Makefile"), None);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Language::TypeScript).unwrap(),
            "\"typescript\""
        );
        assert_eq!(serde_json::to_string(&Language::Tsx).unwrap(), "\"tsx\"");
        let parsed: Language = serde_json::from_str("\"python\"").unwrap();
        assert_eq!(parsed, Language::Python);
    }

    #[test]
    fn parses_names_and_aliases() {
        assert_eq!("TypeScript".parse::<Language>(), Ok(Language::TypeScript));
        assert_eq!("js".parse::<Language>(), Ok(Language::JavaScript));
        assert!("rust".parse::<Language>().is_err());
    }

    #[test]
    fn every_grammar_loads() {
        for language in Language::ALL {
            let mut parser = tree_sitter::Parser::new();
            assert!(parser.set_language(&language.grammar()).is_ok(), "{language}");
        }
    }
}
