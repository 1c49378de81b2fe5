//! Write path of the payroll engine.
//!
//! This module keeps the in-process snapshot of employees and shifts, detects
//! which records an edit changed and writes those records back to the store
//! as one concurrent batch with progress reporting.

mod cache;
mod change_detection;
mod coordinator;
mod store;

pub use cache::SnapshotCache;
pub use change_detection::detect_changes;
pub use coordinator::{
    PayrollService, ReconcileEvent, ReconcileHandle, ReconcileOutcome, ReconcileSummary,
};
pub use store::{InMemoryStore, PayrollStore};
