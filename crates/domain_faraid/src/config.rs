//! Engine configuration

use serde::Deserialize;

use crate::engine::CalculationOptions;
use crate::registry::DEFAULT_MAX_HEIRS;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// Maximum number of heir records accepted per calculation
    pub max_heirs: usize,
    /// Whether a bequest above one third is allowed when all heirs consent
    pub honor_consent_override: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_heirs: DEFAULT_MAX_HEIRS,
            honor_consent_override: true,
        }
    }
}

impl EngineConfig {
    /// Loads configuration from environment
    ///
    /// Reads an optional `.env` file first, then `FARAID_*` variables such as
    /// `FARAID_MAX_HEIRS`. Unset keys keep their defaults.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_source(config::Environment::with_prefix("FARAID").try_parsing(true))
    }

    /// Loads configuration from an arbitrary source layered over the defaults
    pub fn from_source<S>(source: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let defaults = Self::default();
        config::Config::builder()
            .set_default("max_heirs", defaults.max_heirs as u64)?
            .set_default("honor_consent_override", defaults.honor_consent_override)?
            .add_source(source)
            .build()?
            .try_deserialize()
    }

    /// Options passed to each engine call
    pub fn calculation_options(&self) -> CalculationOptions {
        CalculationOptions {
            max_heirs: self.max_heirs,
            honor_consent_override: self.honor_consent_override,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.max_heirs, 64);
        assert!(config.honor_consent_override);
        assert_eq!(config.calculation_options(), CalculationOptions::default());
    }

    #[test]
    fn test_environment_overrides() {
        let mut vars = HashMap::new();
        vars.insert("FARAID_MAX_HEIRS".to_string(), "12".to_string());
        vars.insert(
            "FARAID_HONOR_CONSENT_OVERRIDE".to_string(),
            "false".to_string(),
        );
        let source = config::Environment::with_prefix("FARAID")
            .try_parsing(true)
            .source(Some(vars));

        let config = EngineConfig::from_source(source).unwrap();
        assert_eq!(config.max_heirs, 12);
        assert!(!config.honor_consent_override);
    }

    #[test]
    fn test_missing_keys_keep_defaults() {
        let source = config::Environment::with_prefix("FARAID").source(Some(HashMap::new()));
        let config = EngineConfig::from_source(source).unwrap();
        assert_eq!(config, EngineConfig::default());
    }
}
