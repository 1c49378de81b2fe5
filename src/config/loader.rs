//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

use super::types::{CalendarConfig, OvertimeConfig, PayrollConfig, PayrollRules, ServerConfig};

/// Loads and provides access to payroll configuration.
///
/// # File Structure
///
/// ```text
/// overtime:
///   daily_threshold_hours: 8
/// calendar:
///   timezone: "UTC"
/// server:
///   bind_address: "0.0.0.0:3000"
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/payroll.yaml").unwrap();
/// println!("Overtime after {} ms per day", loader.rules().daily_threshold_ms);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
    rules: PayrollRules,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing
    /// - The file contains invalid YAML or an unknown timezone
    /// - The daily threshold is not a positive number of hours
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml_str(&content).map_err(|err| match err {
            EngineError::ConfigParseError { message, .. } => EngineError::ConfigParseError {
                path: path_str,
                message,
            },
            other => other,
        })
    }

    /// Parses configuration from YAML text.
    pub fn from_yaml_str(content: &str) -> EngineResult<Self> {
        let config: PayrollConfig =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?;
        let rules = config.rules()?;

        Ok(Self { config, rules })
    }

    /// Returns the raw configuration file contents.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the calculation rules derived from the configuration.
    pub fn rules(&self) -> PayrollRules {
        self.rules
    }

    /// Returns the HTTP server settings.
    pub fn server(&self) -> &ServerConfig {
        &self.config.server
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        let rules = PayrollRules::default();
        Self {
            config: PayrollConfig {
                overtime: OvertimeConfig {
                    daily_threshold_hours: Decimal::from(8),
                },
                calendar: CalendarConfig {
                    timezone: rules.timezone,
                },
                server: ServerConfig::default(),
            },
            rules,
        }
    }
}
