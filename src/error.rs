//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading configuration,
//! talking to the employee/shift store, or reconciling edits.

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application. It is
/// `Clone` so a single failure can be delivered through a reconciliation
/// event stream and kept by the caller.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/payroll.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/payroll.yaml");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds an unusable value.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// A shift was invalid or contained inconsistent data.
    #[error("Invalid shift '{shift_id}': {message}")]
    InvalidShift {
        /// The ID of the invalid shift.
        shift_id: String,
        /// A description of what made the shift invalid.
        message: String,
    },

    /// Fetching employees or shifts from the store failed.
    #[error("Store read failed: {message}")]
    StoreRead {
        /// The underlying reason reported by the store.
        message: String,
    },

    /// Persisting a single record to the store failed.
    #[error("Store write failed for {entity} '{id}': {message}")]
    StoreWrite {
        /// The kind of record ("employee" or "shift").
        entity: String,
        /// The identifier of the record being written.
        id: String,
        /// The underlying reason reported by the store.
        message: String,
    },

    /// No employee/shift snapshot has been loaded yet.
    #[error("Employee and shift data is not loaded yet")]
    SnapshotNotReady,

    /// A reconciliation task stopped without reporting an outcome.
    #[error("Reconciliation interrupted: {message}")]
    ReconcileInterrupted {
        /// Why the task stopped.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
