use crate::cli::ScanArgs;
use crate::config::{CONFIG_FILE, DepscanConfig};
use crate::error::{ConfigError, Result};
use depscan_graph::{Language, OutputFormat};
use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized},
    value::Uncased,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Prefix of environment variables read as configuration, e.g.
/// `DEPSCAN_JOBS=4` or `DEPSCAN_NO_DEFAULT_EXCLUDES=true`.
pub const ENV_PREFIX: &str = "DEPSCAN_";

const FIELDS: &[&str] = &[
    "root",
    "output",
    "format",
    "exclude",
    "noDefaultExcludes",
    "module",
    "languages",
    "jobs",
    "maxFileSize",
];

/// The flags a user actually passed. Unset fields leave lower layers alone.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CliOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_default_excludes: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jobs: Option<usize>,
}

impl From<&ScanArgs> for CliOverrides {
    fn from(args: &ScanArgs) -> Self {
        Self {
            root: args.path.clone(),
            output: args.output.clone(),
            format: args.format.map(Into::into),
            exclude: (!args.exclude.is_empty()).then(|| args.exclude.clone()),
            no_default_excludes: args.no_default_excludes.then_some(true),
            module: args.module.clone(),
            languages: (!args.language.is_empty()).then(|| {
                args.language
                    .iter()
                    .map(|lang| Language::from(*lang).as_str().to_string())
                    .collect()
            }),
            jobs: args.jobs,
        }
    }
}

impl DepscanConfig {
    /// Load and validate configuration for a scan.
    pub fn load(args: &ScanArgs) -> Result<Self> {
        let config_file = match &args.config {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound(path.clone()).into());
            }
            Some(path) => Some(path.clone()),
            None => {
                let root = args.path.as_deref().unwrap_or(Path::new("."));
                let default_path = root.join(CONFIG_FILE);
                default_path.exists().then_some(default_path)
            }
        };

        if let Some(path) = &config_file {
            tracing::debug!(path = %path.display(), "loading config file");
        }

        let config: Self = Self::figment(config_file.as_deref(), CliOverrides::from(args))
            .extract()
            .map_err(|e| ConfigError::Load(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// All configuration layers, lowest priority first.
    pub fn figment(config_file: Option<&Path>, overrides: CliOverrides) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        if let Some(path) = config_file {
            figment = figment.merge(Json::file(path));
        }

        figment
            .merge(env_provider())
            .merge(Serialized::defaults(overrides))
    }
}

/// `DEPSCAN_NO_DEFAULT_EXCLUDES` -> `noDefaultExcludes`. Unknown names are
/// ignored so unrelated `DEPSCAN_*` variables do not break loading.
fn env_provider() -> Env {
    Env::prefixed(ENV_PREFIX).lowercase(false).filter_map(|key| {
        let field = snake_to_camel(key.as_str());
        FIELDS
            .contains(&field.as_str())
            .then(|| Uncased::from(field))
    })
}

pub(crate) fn snake_to_camel(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper = false;
    for ch in key.chars() {
        if ch == '_' {
            upper = !out.is_empty();
        } else if upper {
            out.push(ch.to_ascii_uppercase());
            upper = false;
        } else {
            out.push(ch.to_ascii_lowercase());
        }
    }
    out
}
