use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;
use crate::view::{MatchMode, Record};

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        message: message.into(),
    }
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/dataview/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("dataview").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - Page sizes are non-empty and positive, and include the default
    /// - At least one column, each a known record field, none repeated
    /// - The default sort field is a sortable column
    /// - Option lists are only attached to `equals` filters
    pub fn validate(&self) -> Result<(), ConfigError> {
        let view = &self.view;
        if view.page_sizes.is_empty() {
            return Err(invalid("At least one page size must be configured"));
        }
        if view.page_sizes.contains(&0) {
            return Err(invalid("Page sizes must be greater than zero"));
        }
        if !view.page_sizes.contains(&view.default_page_size) {
            return Err(invalid(format!(
                "Default page size {} is not one of {:?}",
                view.default_page_size, view.page_sizes
            )));
        }

        if self.columns.is_empty() {
            return Err(invalid("At least one column must be configured"));
        }

        let mut seen = HashSet::new();
        for column in &self.columns {
            if !Record::FIELDS.contains(&column.field.as_str()) {
                return Err(invalid(format!(
                    "Column '{}' is not a record field (expected one of {:?})",
                    column.field,
                    Record::FIELDS
                )));
            }
            if !seen.insert(column.field.as_str()) {
                return Err(invalid(format!(
                    "Column '{}' is configured twice",
                    column.field
                )));
            }
            if let Some(filter) = &column.filter {
                if filter.options.is_some() && filter.match_mode != MatchMode::Equals {
                    return Err(invalid(format!(
                        "Column '{}' lists filter options but matches with {}",
                        column.field, filter.match_mode
                    )));
                }
            }
        }

        let sort_field = &view.default_sort_field;
        let sortable = self
            .columns
            .iter()
            .any(|c| &c.field == sort_field && c.sortable);
        if !sortable {
            return Err(invalid(format!(
                "Default sort field '{}' is not a sortable column",
                sort_field
            )));
        }

        if self.remote.endpoint.trim().is_empty() {
            return Err(invalid("Remote endpoint must not be empty"));
        }

        Ok(())
    }
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub endpoint: Option<String>,
    pub page_size: Option<usize>,
    pub filter_debounce_ms: Option<u64>,
}

impl Config {
    /// Applies `overrides` and validates the result.
    ///
    /// A page size override must be one of the configured page sizes.
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        if let Some(endpoint) = &overrides.endpoint {
            self.remote.endpoint = endpoint.clone();
        }
        if let Some(page_size) = overrides.page_size {
            if !self.view.page_sizes.contains(&page_size) {
                return Err(invalid(format!(
                    "Page size {} is not one of {:?}",
                    page_size, self.view.page_sizes
                )));
            }
            self.view.default_page_size = page_size;
        }
        if let Some(debounce) = overrides.filter_debounce_ms {
            self.view.filter_debounce_ms = debounce;
        }
        self.validate()?;
        Ok(self)
    }
}
