//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine policy
//! from a configuration directory.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{EngineConfig, GraceDefaults};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// └── engine.yaml   # Overtime baseline, schedule defaults, rounding, grace defaults
/// ```
///
/// # Example
///
/// ```no_run
/// use timesheet_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Standard day: {} hours", loader.standard_day_hours());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns `ConfigNotFound` if `engine.yaml` is missing and
    /// `ConfigParseError` if it is not valid YAML for [`EngineConfig`].
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let engine_path = path.as_ref().join("engine.yaml");
        let config = Self::load_yaml::<EngineConfig>(&engine_path)?;
        Ok(Self { config })
    }

    /// Wraps an in-process configuration.
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Overtime baseline used when no schedule matches.
    pub fn standard_day_hours(&self) -> Decimal {
        self.config.standard_day_hours
    }

    /// Grace thresholds for outlets without a policy row.
    pub fn default_grace(&self) -> &GraceDefaults {
        &self.config.default_grace
    }
}
