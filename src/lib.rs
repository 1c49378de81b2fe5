//! Payroll Engine
//!
//! This crate computes working time from employee shifts, splits it into
//! calendar days at local midnight, allocates each day's time into regular
//! and overtime under a daily threshold, and aggregates the amounts owed.
//! It also reconciles edited employee and shift records back to an external
//! store, reporting progress while the updates run.
//!
//! The bundled binary serves only the stateless `POST /calculate` endpoint
//! from [`api`]. Loading from a store and reconciliation are library APIs:
//! embed a [`reconcile::PayrollService`] over your own
//! [`reconcile::PayrollStore`] to use them.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod reconcile;
