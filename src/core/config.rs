//! Configuration management with layered hierarchy

use chrono::{Local, NaiveDate};
use miette::Diagnostic;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use crate::form::submission::DATE_FORMAT;

/// Environment variable overriding the current date
pub const ENV_TODAY: &str = "BASIC_FORM_TODAY";

/// Environment variable selecting the default output format
pub const ENV_FORMAT: &str = "BASIC_FORM_FORMAT";

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    #[diagnostic(code(basic_form::config::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {message}")]
    #[diagnostic(
        code(basic_form::config::parse),
        help("Supported keys: today, default_format, interactive")
    )]
    Parse { path: String, message: String },

    #[error("Invalid date in {origin}: '{value}'")]
    #[diagnostic(code(basic_form::config::date), help("Use YYYY-MM-DD, e.g. 2025-05-01"))]
    InvalidDate { origin: String, value: String },
}

/// basic-form configuration with layered hierarchy
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Date used as "today" when checking ages
    pub today: Option<NaiveDate>,

    /// Default output format (text, json, yaml)
    pub default_format: Option<String>,

    /// Prompt for missing values when submitting from a terminal
    pub interactive: Option<bool>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    ///
    /// A broken global config is skipped with a warning; a broken file
    /// named explicitly is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        // 1. Built-in defaults (already in Default impl)
        let mut config = Config::default();

        // 2. Global user config (~/.config/basic-form/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                match Self::from_file(&global_path) {
                    Ok(global) => {
                        debug!(path = %global_path.display(), "loaded global config");
                        config.merge(global);
                    }
                    Err(e) => warn!("ignoring global config: {}", e),
                }
            }
        }

        // 3. Config file given on the command line
        if let Some(path) = explicit {
            debug!(path = %path.display(), "loading config file");
            config.merge(Self::from_file(path)?);
        }

        // 4. Environment variables
        config.apply_env(|name| std::env::var(name).ok())?;

        Ok(config)
    }

    /// Parse a single YAML config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&contents).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    fn from_yaml(contents: &str) -> Result<Self, serde_yml::Error> {
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_yml::from_str(contents)
    }

    /// Get the path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "basic-form")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Apply environment overrides through a variable lookup
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(today) = lookup(ENV_TODAY).filter(|v| !v.trim().is_empty()) {
            self.today = Some(parse_date(&today, ENV_TODAY)?);
        }
        if let Some(format) = lookup(ENV_FORMAT).filter(|v| !v.trim().is_empty()) {
            self.default_format = Some(format);
        }
        Ok(())
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.today.is_some() {
            self.today = other.today;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
        if other.interactive.is_some() {
            self.interactive = other.interactive;
        }
    }

    /// The date ages are computed against
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn interactive(&self) -> bool {
        self.interactive.unwrap_or(false)
    }
}

/// Parse a `YYYY-MM-DD` date, naming where it came from on failure
pub fn parse_date(value: &str, origin: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| ConfigError::InvalidDate {
        origin: origin.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_yaml() {
        let config = Config::from_yaml("today: 2025-05-01\ndefault_format: json\n").unwrap();
        assert_eq!(config.today, NaiveDate::from_ymd_opt(2025, 5, 1));
        assert_eq!(config.default_format.as_deref(), Some("json"));
        assert_eq!(config.interactive, None);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(Config::from_yaml("  \n").unwrap(), Config::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Config::from_yaml("todya: 2025-05-01\n").is_err());
    }

    #[test]
    fn test_merge_prefers_other() {
        let mut base = Config {
            today: NaiveDate::from_ymd_opt(2020, 1, 1),
            default_format: Some("yaml".to_string()),
            interactive: Some(true),
        };
        base.merge(Config {
            today: NaiveDate::from_ymd_opt(2025, 5, 1),
            ..Config::default()
        });

        assert_eq!(base.today, NaiveDate::from_ymd_opt(2025, 5, 1));
        assert_eq!(base.default_format.as_deref(), Some("yaml"));
        assert!(base.interactive());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [(ENV_TODAY, "2024-02-29"), (ENV_FORMAT, "json")]
            .into_iter()
            .collect();
        let mut config = Config::default();
        config
            .apply_env(|name| env.get(name).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.today(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(config.default_format.as_deref(), Some("json"));
    }

    #[test]
    fn test_bad_env_date() {
        let mut config = Config::default();
        let err = config
            .apply_env(|name| (name == ENV_TODAY).then(|| "tomorrow".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDate { .. }));
    }

    #[test]
    fn test_explicit_file_errors_surface() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "today: someday\n").unwrap();

        assert!(matches!(
            Config::from_file(&path),
            Err(ConfigError::Parse { .. })
        ));
        assert!(matches!(
            Config::from_file(&dir.path().join("missing.yaml")),
            Err(ConfigError::Io { .. })
        ));
    }
}
