//! Environment configuration via TOML files.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LookupPolicy;

/// Configuration for a sentence environment.
///
/// # Examples
///
/// ```
/// use gestalt_env::EnvConfig;
///
/// let config = EnvConfig::from_str("passive_prob = 0.2\nseed = 7").unwrap();
/// assert_eq!(config.seed, 7);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    /// Probability that a sentence without an explicit Case slot renders passive
    pub passive_prob: f64,
    /// Base random seed; run N reseeds with `seed + N`
    pub seed: u64,
    /// Strictness for vocabulary-lookup misses
    pub lookup: LookupPolicy,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            passive_prob: 0.2,
            seed: 42,
            lookup: LookupPolicy::default(),
        }
    }
}

impl EnvConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_str(&contents)
    }

    pub fn from_str(toml_str: &str) -> Result<Self, ConfigError> {
        let config: EnvConfig =
            toml::from_str(toml_str).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.passive_prob) {
            return Err(ConfigError::Parse(format!(
                "passive_prob must be in [0, 1], got {}",
                self.passive_prob
            )));
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "IO error: {}", err),
            ConfigError::Parse(err) => write!(f, "Parse error: {}", err),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_when_fields_missing() {
        let config = EnvConfig::from_str("").unwrap();
        assert_eq!(config.passive_prob, 0.2);
        assert_eq!(config.seed, 42);
        assert_eq!(config.lookup, LookupPolicy::LogAndContinue);
    }

    #[test]
    fn config_parses_custom_values() {
        let toml_str = "passive_prob = 1.0\nseed = 99\nlookup = \"fail_fast\"";
        let config = EnvConfig::from_str(toml_str).unwrap();
        assert_eq!(config.passive_prob, 1.0);
        assert_eq!(config.seed, 99);
        assert_eq!(config.lookup, LookupPolicy::FailFast);
    }

    #[test]
    fn config_rejects_out_of_range_probability() {
        let err = EnvConfig::from_str("passive_prob = 1.5").unwrap_err();
        assert!(err.to_string().contains("passive_prob"));
    }
}
