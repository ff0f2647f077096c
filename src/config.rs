use crate::Result;
use lib_config::{Config as LibConfig, Environment};
use serde::{Deserialize, Serialize};
use stats::Generation;
use std::path::PathBuf;

/// Knobs for the predictor, readable from the environment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Usage dump to load. The binary also accepts it as its first argument.
    pub stats_file: Option<PathBuf>,
    pub generation: Generation,
    /// Below this generation number, slot one is sampled from lead
    /// statistics instead of overall usage.
    pub lead_stats_cutoff: u8,
    pub default_level: u8,
    pub validation_budget: u32,
    pub json_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stats_file: None,
            generation: Generation::default(),
            lead_stats_cutoff: 5,
            default_level: 100,
            validation_budget: 0,
            json_output: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let mut config = LibConfig::new();

        config.set_default("generation", Generation::default().shorthand())?;
        config.set_default("lead_stats_cutoff", 5_i64)?;
        config.set_default("default_level", 100_i64)?;
        config.set_default("validation_budget", 0_i64)?;
        config.set_default("json_output", false)?;
        config.merge(Environment::new())?;

        let res = config.try_into()?;
        Ok(res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_line_up() {
        let config = Config::default();

        assert_eq!(config.generation, Generation::SwordShield);
        assert_eq!(config.lead_stats_cutoff, 5);
        assert_eq!(config.default_level, 100);
        assert_eq!(config.validation_budget, 0);
        assert!(!config.json_output);
        assert!(config.stats_file.is_none());
    }
}
