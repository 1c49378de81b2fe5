//! Configuration types for payroll calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file, and the
//! [`PayrollRules`] the calculation functions take.

use chrono_tz::Tz;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::models::MS_PER_HOUR;

/// Default daily threshold: 8 hours in milliseconds.
pub const DEFAULT_DAILY_THRESHOLD_MS: i64 = 8 * MS_PER_HOUR;

/// Overtime section.
#[derive(Debug, Clone, Deserialize)]
pub struct OvertimeConfig {
    /// Hours per calendar day paid at the regular rate.
    pub daily_threshold_hours: Decimal,
}

/// Calendar section.
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    /// Timezone whose midnights separate calendar days.
    #[serde(default = "default_timezone")]
    pub timezone: Tz,
}

fn default_timezone() -> Tz {
    Tz::UTC
}

/// HTTP server section.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Socket address the API listens on.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

fn default_bind_address() -> String {
    "0.0.0.0:3000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

/// The complete configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct PayrollConfig {
    /// Overtime rules.
    pub overtime: OvertimeConfig,
    /// Calendar rules.
    pub calendar: CalendarConfig,
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
}

impl PayrollConfig {
    /// Converts the file settings into calculation rules.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] if the daily threshold is not
    /// positive or does not fit in milliseconds.
    pub fn rules(&self) -> EngineResult<PayrollRules> {
        let hours = self.overtime.daily_threshold_hours;
        if hours <= Decimal::ZERO {
            return Err(EngineError::InvalidConfig {
                field: "overtime.daily_threshold_hours".to_string(),
                message: format!("must be greater than zero, got {}", hours.normalize()),
            });
        }

        let daily_threshold_ms = (hours * Decimal::from(MS_PER_HOUR))
            .trunc()
            .to_i64()
            .ok_or_else(|| EngineError::InvalidConfig {
                field: "overtime.daily_threshold_hours".to_string(),
                message: format!("{} hours is out of range", hours.normalize()),
            })?;

        Ok(PayrollRules {
            daily_threshold_ms,
            timezone: self.calendar.timezone,
        })
    }
}

/// Rules the time calculation applies.
///
/// # Example
///
/// ```
/// use payroll_engine::config::{PayrollRules, DEFAULT_DAILY_THRESHOLD_MS};
/// use chrono_tz::Tz;
///
/// let rules = PayrollRules::default();
/// assert_eq!(rules.daily_threshold_ms, DEFAULT_DAILY_THRESHOLD_MS);
/// assert_eq!(rules.timezone, Tz::UTC);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayrollRules {
    /// Milliseconds per calendar day paid at the regular rate.
    pub daily_threshold_ms: i64,
    /// Timezone whose midnights separate calendar days.
    pub timezone: Tz,
}

impl Default for PayrollRules {
    fn default() -> Self {
        Self {
            daily_threshold_ms: DEFAULT_DAILY_THRESHOLD_MS,
            timezone: Tz::UTC,
        }
    }
}
