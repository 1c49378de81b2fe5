//! Configuration loading and management for the payroll engine.
//!
//! This module loads the overtime threshold, calendar timezone and server
//! settings from a YAML file.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/payroll.yaml").unwrap();
//! println!("Calendar days in {}", config.rules().timezone);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CalendarConfig, DEFAULT_DAILY_THRESHOLD_MS, OvertimeConfig, PayrollConfig, PayrollRules,
    ServerConfig,
};
