use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Export declaration kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    Function,
    Class,
    /// Variables and constants, including re-listed local bindings.
    Const,
    Interface,
    /// Type aliases and enums.
    Type,
}

impl ExportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Class => "class",
            Self::Const => "const",
            Self::Interface => "interface",
            Self::Type => "type",
        }
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "function" => Ok(Self::Function),
            "class" => Ok(Self::Class),
            "const" => Ok(Self::Const),
            "interface" => Ok(Self::Interface),
            "type" => Ok(Self::Type),
            other => Err(format!("unknown export kind '{other}'")),
        }
    }
}

/// A public symbol declared by a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Export {
    pub name: String,
    pub kind: ExportKind,
    pub is_default: bool,
    /// 1-based line of the declaration.
    pub line: u32,
}

impl Export {
    pub fn new(name: impl Into<String>, kind: ExportKind, line: u32) -> Self {
        Self {
            name: name.into(),
            kind,
            is_default: false,
            line,
        }
    }

    /// Mark as the file's default export.
    pub fn default_export(mut self) -> Self {
        self.is_default = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_shape_uses_pascal_case_keys() {
        let export = Export::new("Widget", ExportKind::Class, 7).default_export();
        let json = serde_json::to_value(&export).unwrap();
        assert_eq!(json["Name"], "Widget");
        assert_eq!(json["Kind"], "class");
        assert_eq!(json["IsDefault"], true);
        assert_eq!(json["Line"], 7);
    }

    #[test]
    fn kind_parses_its_display_form() {
        for kind in [
            ExportKind::Function,
            ExportKind::Class,
            ExportKind::Const,
            ExportKind::Interface,
            ExportKind::Type,
        ] {
            assert_eq!(kind.to_string().parse::<ExportKind>(), Ok(kind));
        }
        assert!("enum".parse::<ExportKind>().is_err());
    }
}
