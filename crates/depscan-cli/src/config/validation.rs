use crate::config::DepscanConfig;
use crate::error::{CliError, ConfigError, Result};
use depscan_graph::{Language, ScanConfig};
use std::collections::BTreeSet;

impl DepscanConfig {
    /// Reject values the scanner would refuse, naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if self.jobs == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "jobs".to_string(),
                value: "0".to_string(),
                hint: "Use at least 1, or leave it unset to match the CPU count".to_string(),
            }
            .into());
        }

        if self.max_file_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "maxFileSize".to_string(),
                value: "0".to_string(),
                hint: "Use a positive size in bytes".to_string(),
            }
            .into());
        }

        if let Some(module) = &self.module {
            if module.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "module".to_string(),
                    value: format!("{module:?}"),
                    hint: "Give a module name such as example.com/app, or remove the field"
                        .to_string(),
                }
                .into());
            }
        }

        self.parsed_languages()?;
        Ok(())
    }

    /// The enabled languages, or `None` for all of them.
    pub fn parsed_languages(&self) -> Result<Option<BTreeSet<Language>>> {
        let Some(names) = &self.languages else {
            return Ok(None);
        };

        if names.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "languages".to_string(),
                value: "[]".to_string(),
                hint: "List at least one language, or remove the field to scan all".to_string(),
            }
            .into());
        }

        names
            .iter()
            .map(|name| {
                name.parse::<Language>().map_err(|e| {
                    CliError::from(ConfigError::InvalidValue {
                        field: "languages".to_string(),
                        value: name.clone(),
                        hint: e.to_string(),
                    })
                })
            })
            .collect::<Result<BTreeSet<_>>>()
            .map(Some)
    }

    /// Translate into the library's scan options.
    pub fn to_scan_config(&self) -> Result<ScanConfig> {
        self.validate()?;

        let mut config = ScanConfig::new(self.root.clone());
        if self.no_default_excludes {
            config = config.without_default_excludes();
        }
        config = config
            .with_excludes(self.exclude.iter().cloned())
            .with_max_file_size(self.max_file_size);

        if let Some(languages) = self.parsed_languages()? {
            config = config.with_languages(languages);
        }
        if let Some(module) = &self.module {
            config = config.with_module(module.trim());
        }
        if let Some(jobs) = self.jobs {
            config = config.with_jobs(jobs);
        }
        Ok(config)
    }
}
