//! Application state for the Payroll Engine API.

use std::sync::Arc;

use crate::config::{ConfigLoader, PayrollRules};

/// Shared application state.
///
/// Holds the loaded configuration, shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the calculation rules in effect.
    pub fn rules(&self) -> PayrollRules {
        self.config.rules()
    }
}
