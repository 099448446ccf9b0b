use crate::core::currency::Currency;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.frankfurter.app";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

fn default_source() -> String {
    "EUR".to_string()
}

fn default_target() -> String {
    "BGN".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Currency pair preselected when the interactive session starts.
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default = "default_target")]
    pub target: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            provider: ProviderConfig::default(),
            source: default_source(),
            target: default_target(),
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, falling back to defaults
    /// when no config file exists.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config file found, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("in", "codito", "fxconv")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// Validates the configured currency pair against the supported set.
    pub fn currency_pair(&self) -> Result<(Currency, Currency)> {
        let source = self
            .source
            .parse::<Currency>()
            .map_err(|e| anyhow::anyhow!(e))
            .context("Invalid `source` currency in configuration")?;
        let target = self
            .target
            .parse::<Currency>()
            .map_err(|e| anyhow::anyhow!(e))
            .context("Invalid `target` currency in configuration")?;
        Ok((source, target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
provider:
  base_url: "http://example.com/rates"
source: "USD"
target: "INR"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.provider.base_url, "http://example.com/rates");
        assert_eq!(config.source, "USD");
        assert_eq!(config.target, "INR");
        let (source, target) = config.currency_pair().unwrap();
        assert_eq!(source, Currency::USD);
        assert_eq!(target, Currency::INR);
    }

    #[test]
    fn test_config_defaults() {
        let config: AppConfig = serde_yaml::from_str("{}").expect("Failed to deserialize");
        assert_eq!(config.provider.base_url, DEFAULT_BASE_URL);
        let (source, target) = config.currency_pair().unwrap();
        assert_eq!(source, Currency::EUR);
        assert_eq!(target, Currency::BGN);
    }

    #[test]
    fn test_unsupported_configured_currency_is_rejected() {
        let yaml_str = r#"
source: "XYZ"
target: "BGN"
"#;
        let config: AppConfig = serde_yaml::from_str(yaml_str).unwrap();
        let result = config.currency_pair();
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Invalid `source` currency")
        );
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let result = AppConfig::load_from_path("/nonexistent/config.yaml");
        assert!(result.is_err());
    }
}
