//! # Configuration Module
//!
//! Runtime settings for the conversion engine: the unit system and currency
//! new recipes start in, the legibility passes applied by "Convert Units",
//! and the log output format.
//!
//! Settings come from `KITCHEN_*` environment variables (a `.env` file is
//! honored by the binary) or from a JSON file. Anything not set keeps its
//! default.

use crate::currency::Currency;
use crate::errors::KitchenError;
use crate::system_conversion::ConversionOptions;
use crate::units::UnitSystem;
use anyhow::Context;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const ENV_UNIT_SYSTEM: &str = "KITCHEN_UNIT_SYSTEM";
pub const ENV_CURRENCY: &str = "KITCHEN_CURRENCY";
pub const ENV_NORMALIZE_METRIC: &str = "KITCHEN_NORMALIZE_METRIC";
pub const ENV_NORMALIZE_IMPORTED: &str = "KITCHEN_NORMALIZE_IMPORTED";
pub const ENV_LOG_FORMAT: &str = "KITCHEN_LOG_FORMAT";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines via env_logger
    #[default]
    Text,
    /// Structured JSON events via tracing-subscriber
    Json,
}

/// Settings for the kitchen unit engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct KitchenConfig {
    /// Unit system new recipes start in
    pub default_system: UnitSystem,
    /// Currency new recipes display costs in
    pub currency: Currency,
    pub conversion: ConversionOptions,
    pub log_format: LogFormat,
}

impl KitchenConfig {
    /// Load settings from the process environment
    pub fn from_env() -> Result<Self, KitchenError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings from any key/value source, falling back to defaults
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kitchen_units::config::{KitchenConfig, LogFormat};
    /// use kitchen_units::units::UnitSystem;
    ///
    /// let config = KitchenConfig::from_lookup(|key| match key {
    ///     "KITCHEN_UNIT_SYSTEM" => Some("metric".to_string()),
    ///     "KITCHEN_LOG_FORMAT" => Some("json".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(config.default_system, UnitSystem::Metric);
    /// assert_eq!(config.log_format, LogFormat::Json);
    /// assert!(config.conversion.normalize_metric);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, KitchenError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_UNIT_SYSTEM) {
            config.default_system = value
                .parse()
                .map_err(|e| KitchenError::Config(format!("{ENV_UNIT_SYSTEM}: {e}")))?;
        }
        if let Some(value) = lookup(ENV_CURRENCY) {
            config.currency = value
                .parse()
                .map_err(|e| KitchenError::Config(format!("{ENV_CURRENCY}: {e}")))?;
        }
        if let Some(value) = lookup(ENV_NORMALIZE_METRIC) {
            config.conversion.normalize_metric = parse_flag(ENV_NORMALIZE_METRIC, &value)?;
        }
        if let Some(value) = lookup(ENV_NORMALIZE_IMPORTED) {
            config.conversion.normalize_imported_imperial = parse_flag(ENV_NORMALIZE_IMPORTED, &value)?;
        }
        if let Some(value) = lookup(ENV_LOG_FORMAT) {
            config.log_format = parse_log_format(&value)?;
        }

        debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Load settings from a JSON file; missing fields keep their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: KitchenConfig = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, KitchenError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(KitchenError::Config(format!("{key}: expected a boolean, got '{other}'"))),
    }
}

fn parse_log_format(value: &str) -> Result<LogFormat, KitchenError> {
    match value.trim().to_lowercase().as_str() {
        "text" | "" => Ok(LogFormat::Text),
        "json" => Ok(LogFormat::Json),
        other => Err(KitchenError::Config(format!(
            "{ENV_LOG_FORMAT}: expected text or json, got '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = KitchenConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, KitchenConfig::default());
        assert_eq!(config.default_system, UnitSystem::Imperial);
        assert_eq!(config.currency, Currency::Usd);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_values_read() {
        let config = KitchenConfig::from_lookup(lookup_from(&[
            (ENV_UNIT_SYSTEM, "Metric"),
            (ENV_CURRENCY, "gbp"),
            (ENV_NORMALIZE_METRIC, "false"),
            (ENV_NORMALIZE_IMPORTED, "0"),
        ]))
        .unwrap();
        assert_eq!(config.default_system, UnitSystem::Metric);
        assert_eq!(config.currency, Currency::Gbp);
        assert!(!config.conversion.normalize_metric);
        assert!(!config.conversion.normalize_imported_imperial);
    }

    #[test]
    fn test_malformed_values_rejected() {
        let err = KitchenConfig::from_lookup(lookup_from(&[(ENV_UNIT_SYSTEM, "cubits")])).unwrap_err();
        assert!(matches!(err, KitchenError::Config(_)));

        let err = KitchenConfig::from_lookup(lookup_from(&[(ENV_NORMALIZE_METRIC, "maybe")])).unwrap_err();
        assert!(err.to_string().contains(ENV_NORMALIZE_METRIC));

        assert!(KitchenConfig::from_lookup(lookup_from(&[(ENV_LOG_FORMAT, "xml")])).is_err());
    }

    #[test]
    fn test_json_partial_fields() {
        let config: KitchenConfig =
            serde_json::from_str(r#"{"currency": "EUR", "conversion": {"normalize_metric": false}}"#).unwrap();
        assert_eq!(config.currency, Currency::Eur);
        assert!(!config.conversion.normalize_metric);
        assert!(config.conversion.normalize_imported_imperial);
        assert_eq!(config.default_system, UnitSystem::Imperial);
    }
}
