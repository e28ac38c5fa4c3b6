use clap::ValueEnum;
use depscan_graph::{Language, OutputFormat};

/// Graph file format
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum FormatArg {
    /// Pretty-printed JSON, loadable as a graph again
    #[value(name = "json")]
    Json,

    /// Line-oriented FILE/IMPORTS/EXPORTS blocks
    #[value(name = "compact", alias = "toon")]
    Compact,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Compact => OutputFormat::Compact,
        }
    }
}

/// Source language
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum LanguageArg {
    #[value(name = "typescript", alias = "ts")]
    TypeScript,
    #[value(name = "tsx")]
    Tsx,
    #[value(name = "javascript", alias = "js")]
    JavaScript,
    #[value(name = "go")]
    Go,
    #[value(name = "python", alias = "py")]
    Python,
}

impl From<LanguageArg> for Language {
    fn from(arg: LanguageArg) -> Self {
        match arg {
            LanguageArg::TypeScript => Language::TypeScript,
            LanguageArg::Tsx => Language::Tsx,
            LanguageArg::JavaScript => Language::JavaScript,
            LanguageArg::Go => Language::Go,
            LanguageArg::Python => Language::Python,
        }
    }
}
