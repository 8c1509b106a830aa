//! Runtime configuration, stored as YAML.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::combine::{CombineMethod, CombineOptions, DEFAULT_GAP_THRESHOLD, DEFAULT_SHAVE_COUNT};

/// Settings for batch combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpliceConfig {
    /// Angular step above which adjacent samples are treated as a gap.
    #[serde(default = "default_gap_threshold")]
    pub gap_threshold: f64,

    /// Samples removed on each side of a gap.
    #[serde(default = "default_shave_count")]
    pub shave_count: usize,

    /// Splice or merge.
    #[serde(default)]
    pub method: CombineMethod,

    /// Number of worker threads for batch combination.
    #[serde(default = "default_worker_count")]
    pub worker_count: usize,
}

fn default_gap_threshold() -> f64 {
    DEFAULT_GAP_THRESHOLD
}

fn default_shave_count() -> usize {
    DEFAULT_SHAVE_COUNT
}

fn default_worker_count() -> usize {
    num_cpus::get()
}

impl Default for SpliceConfig {
    fn default() -> Self {
        Self {
            gap_threshold: default_gap_threshold(),
            shave_count: default_shave_count(),
            method: CombineMethod::default(),
            worker_count: default_worker_count(),
        }
    }
}

impl SpliceConfig {
    /// Read the configuration from a YAML file.
    pub fn read_config_file(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            return Err(ConfigError::BadFilePath(config_path.to_path_buf()));
        }

        let yaml_str = std::fs::read_to_string(config_path)?;
        Ok(serde_yaml::from_str::<Self>(&yaml_str)?)
    }

    /// Serialize to YAML, e.g. for a template file.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Gap handling parameters for the combine functions.
    pub fn combine_options(&self) -> CombineOptions {
        CombineOptions {
            gap_threshold: self.gap_threshold,
            shave_count: self.shave_count,
        }
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not open config file because {0:?} does not exist")]
    BadFilePath(PathBuf),
    #[error("Config failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Config could not be parsed from YAML: {0}")]
    ParsingError(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SpliceConfig::default();
        assert_eq!(config.gap_threshold, 0.1);
        assert_eq!(config.shave_count, 5);
        assert_eq!(config.method, CombineMethod::Splice);
        assert!(config.worker_count >= 1);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: SpliceConfig = serde_yaml::from_str("shave_count: 3\nmethod: merge\n").unwrap();
        assert_eq!(config.shave_count, 3);
        assert_eq!(config.method, CombineMethod::Merge);
        assert_eq!(config.gap_threshold, DEFAULT_GAP_THRESHOLD);
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = SpliceConfig {
            gap_threshold: 0.25,
            shave_count: 2,
            method: CombineMethod::Merge,
            worker_count: 4,
        };
        let yaml = config.to_yaml().unwrap();
        let parsed: SpliceConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_missing_file() {
        let result = SpliceConfig::read_config_file(Path::new("/nonexistent/pxrdrs.yaml"));
        assert!(matches!(result, Err(ConfigError::BadFilePath(_))));
    }

    #[test]
    fn test_combine_options() {
        let config = SpliceConfig {
            gap_threshold: 0.5,
            shave_count: 1,
            ..SpliceConfig::default()
        };
        assert_eq!(
            config.combine_options(),
            CombineOptions {
                gap_threshold: 0.5,
                shave_count: 1
            }
        );
    }
}
