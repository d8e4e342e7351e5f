//! Configuration schema (dialplan.toml)

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::index::{AreaCodeIndex, PrefixWindow};

/// Number generation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Digits in every generated number, area code included
    #[serde(default = "default_total_length")]
    pub total_length: usize,

    /// Padding redraws allowed per number before giving up
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Fixed seed for reproducible output (random when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Longest number the generator will build
pub const MAX_TOTAL_LENGTH: usize = 64;

/// National significant number length (UK numbering plan)
fn default_total_length() -> usize {
    10
}

fn default_max_retries() -> u32 {
    10_000
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            total_length: default_total_length(),
            max_retries: default_max_retries(),
            seed: None,
        }
    }
}

/// Resolver settings
///
/// Unset bounds are taken from the shortest and longest codes in the index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_prefix_len: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_prefix_len: Option<usize>,
}

impl ResolverConfig {
    /// Scan window for `index`, with configured bounds taking precedence
    pub fn window_for(&self, index: &AreaCodeIndex) -> Result<PrefixWindow, ConfigurationError> {
        let derived = index.prefix_window();
        PrefixWindow::new(
            self.min_prefix_len.unwrap_or(derived.min()),
            self.max_prefix_len.unwrap_or(derived.max()),
        )
    }
}

/// Column names of the exchanged tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnConfig {
    #[serde(default = "default_phone_code_column")]
    pub phone_code: String,

    #[serde(default = "default_area_column")]
    pub area: String,

    #[serde(default = "default_phone_number_column")]
    pub phone_number: String,
}

fn default_phone_code_column() -> String {
    "Phone Code".to_string()
}

fn default_area_column() -> String {
    "Area".to_string()
}

fn default_phone_number_column() -> String {
    "Phone Number".to_string()
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            phone_code: default_phone_code_column(),
            area: default_area_column(),
            phone_number: default_phone_number_column(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub generator: GeneratorConfig,

    #[serde(default)]
    pub resolver: ResolverConfig,

    #[serde(default)]
    pub columns: ColumnConfig,
}

impl Config {
    /// Load config from TOML file
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        Self::from_toml(&contents)
    }

    /// Load config from TOML string
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(toml)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    /// Save config to TOML file
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        let toml = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path, toml)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Check settings that do not depend on the area-code table
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.generator.total_length == 0 {
            return Err(ConfigurationError::InvalidSetting {
                name: "generator.total_length",
                reason: "must be at least 1".to_string(),
            });
        }

        if self.generator.total_length > MAX_TOTAL_LENGTH {
            return Err(ConfigurationError::InvalidSetting {
                name: "generator.total_length",
                reason: format!("must be at most {}", MAX_TOTAL_LENGTH),
            });
        }

        if self.generator.max_retries == 0 {
            return Err(ConfigurationError::InvalidSetting {
                name: "generator.max_retries",
                reason: "must be at least 1".to_string(),
            });
        }

        if let (Some(min), Some(max)) = (self.resolver.min_prefix_len, self.resolver.max_prefix_len) {
            PrefixWindow::new(min, max)?;
        }

        Ok(())
    }
}

/// Config error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ConfigurationError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.generator.total_length, 10);
        assert_eq!(config.generator.seed, None);
        assert_eq!(config.columns.phone_code, "Phone Code");
        assert_eq!(config.columns.phone_number, "Phone Number");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [generator]
            total_length = 11
            seed = 7

            [columns]
            area = "Region"
            "#,
        )
        .unwrap();

        assert_eq!(config.generator.total_length, 11);
        assert_eq!(config.generator.max_retries, 10_000);
        assert_eq!(config.generator.seed, Some(7));
        assert_eq!(config.columns.area, "Region");
        assert_eq!(config.columns.phone_code, "Phone Code");
    }

    #[test]
    fn rejects_inverted_window() {
        let err = Config::from_toml(
            r#"
            [resolver]
            min_prefix_len = 5
            max_prefix_len = 3
            "#,
        )
        .unwrap_err();

        assert!(matches!(err, ConfigError::Invalid(ConfigurationError::InvalidWindow { min: 5, max: 3 })));
    }

    #[test]
    fn rejects_zero_length() {
        let err = Config::from_toml("[generator]\ntotal_length = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(ConfigurationError::InvalidSetting { .. })));
    }

    #[test]
    fn rejects_oversized_length() {
        let err = Config::from_toml("[generator]\ntotal_length = 65\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid(ConfigurationError::InvalidSetting { name: "generator.total_length", .. })
        ));
        assert!(Config::from_toml("[generator]\ntotal_length = 64\n").is_ok());
    }

    #[test]
    fn window_prefers_configured_bounds() {
        let index = AreaCodeIndex::build([("20", "London"), ("1632", "Fiction")]).unwrap();

        let derived = ResolverConfig::default().window_for(&index).unwrap();
        assert_eq!((derived.min(), derived.max()), (2, 4));

        let capped = ResolverConfig { min_prefix_len: None, max_prefix_len: Some(6) }
            .window_for(&index)
            .unwrap();
        assert_eq!((capped.min(), capped.max()), (2, 6));
    }

    #[test]
    fn config_toml_roundtrip() {
        let mut config = Config::default();
        config.generator.seed = Some(42);
        let toml = toml::to_string(&config).unwrap();
        let parsed = Config::from_toml(&toml).unwrap();
        assert_eq!(config, parsed);
    }
}
