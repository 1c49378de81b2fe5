//! Payroll service and reconciliation coordinator.
//!
//! [`PayrollService`] owns the store handle and the snapshot cache. It loads
//! snapshots, answers payroll queries against the cached snapshot and writes
//! edited snapshots back to the store.
//!
//! Reconciliation runs in a background task. The updates for one edit are
//! issued concurrently; the first failure aborts the rest and nothing is
//! committed to the cache. Progress and the single terminal outcome are
//! delivered through a [`ReconcileHandle`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::{
    compute_payroll_totals, employee_time_info, group_employee_shifts, summarize_employees,
};
use crate::config::PayrollRules;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Employee, EmployeeSummary, EmployeeTimeInfo, EmployeeWithShifts, PayrollTotals, Shift,
    Snapshot,
};

use super::cache::SnapshotCache;
use super::change_detection::detect_changes;
use super::store::PayrollStore;

/// Number of records written by a successful reconciliation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileSummary {
    /// Employee records written.
    pub employees_updated: usize,
    /// Shift records written.
    pub shifts_updated: usize,
}

/// One notification from a running reconciliation.
///
/// A reconciliation emits zero or more strictly increasing `Progress` values
/// followed by exactly one `Completed` or `Failed`. `Progress(100)` is only
/// ever emitted when every update succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileEvent {
    /// Percentage of updates persisted so far, 0 to 100.
    Progress(u8),
    /// Every update succeeded and the cache now holds the edited values.
    Completed(ReconcileSummary),
    /// An update failed; the cache is unchanged.
    Failed(EngineError),
}

impl ReconcileEvent {
    /// Returns true for `Completed` and `Failed`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ReconcileEvent::Progress(_))
    }
}

/// Everything a reconciliation reported, collected by [`ReconcileHandle::finish`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// Progress values in emission order.
    pub progress: Vec<u8>,
    /// The terminal result.
    pub result: EngineResult<ReconcileSummary>,
}

/// Receiving end of a reconciliation started by [`PayrollService::reconcile`].
///
/// Dropping the handle does not cancel the reconciliation.
#[derive(Debug)]
pub struct ReconcileHandle {
    events: mpsc::UnboundedReceiver<ReconcileEvent>,
    task: JoinHandle<()>,
}

impl ReconcileHandle {
    /// Waits for the next event.
    ///
    /// Returns `None` once the terminal event has been received.
    pub async fn next_event(&mut self) -> Option<ReconcileEvent> {
        self.events.recv().await
    }

    /// Drains the remaining events and returns the outcome.
    pub async fn finish(mut self) -> ReconcileOutcome {
        let mut progress = Vec::new();

        while let Some(event) = self.events.recv().await {
            match event {
                ReconcileEvent::Progress(value) => progress.push(value),
                ReconcileEvent::Completed(summary) => {
                    return ReconcileOutcome {
                        progress,
                        result: Ok(summary),
                    };
                }
                ReconcileEvent::Failed(error) => {
                    return ReconcileOutcome {
                        progress,
                        result: Err(error),
                    };
                }
            }
        }

        let message = match self.task.await {
            Err(join_error) => join_error.to_string(),
            Ok(()) => "event stream closed without an outcome".to_string(),
        };
        ReconcileOutcome {
            progress,
            result: Err(EngineError::ReconcileInterrupted { message }),
        }
    }
}

/// Converts completed/total into a whole percentage, rounding half up.
///
/// Anything short of every update is capped at 99.
pub(crate) fn progress_percent(completed: usize, total: usize) -> u8 {
    if total == 0 || completed >= total {
        return 100;
    }
    let rounded = (200 * completed + total) / (2 * total);
    rounded.min(99) as u8
}

/// Tracks completed updates and yields each new progress value once.
#[derive(Debug)]
struct ProgressTracker {
    total: usize,
    completed: usize,
    last_emitted: Option<u8>,
}

impl ProgressTracker {
    fn new(total: usize) -> Self {
        Self {
            total,
            completed: 0,
            last_emitted: None,
        }
    }

    fn record_success(&mut self) -> Option<u8> {
        self.completed += 1;
        let percent = progress_percent(self.completed, self.total);
        if self.last_emitted.is_some_and(|last| percent <= last) {
            return None;
        }
        self.last_emitted = Some(percent);
        Some(percent)
    }
}

/// A record as returned by the store after a successful update.
#[derive(Debug)]
enum Persisted {
    Employee(Employee),
    Shift(Shift),
}

/// Loads, queries and reconciles payroll data against a [`PayrollStore`].
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use payroll_engine::config::PayrollRules;
/// use payroll_engine::reconcile::{InMemoryStore, PayrollService};
///
/// let runtime = tokio::runtime::Runtime::new().unwrap();
/// runtime.block_on(async {
///     let service = PayrollService::new(
///         Arc::new(InMemoryStore::new(vec![], vec![])),
///         PayrollRules::default(),
///     );
///     assert!(service.payroll_totals().is_err());
///
///     service.load().await.unwrap();
///     assert!(service.payroll_totals().unwrap().grand_total().is_zero());
/// });
/// ```
#[derive(Clone)]
pub struct PayrollService {
    store: Arc<dyn PayrollStore>,
    cache: SnapshotCache,
    rules: PayrollRules,
}

impl std::fmt::Debug for PayrollService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayrollService")
            .field("cache", &self.cache)
            .field("rules", &self.rules)
            .finish_non_exhaustive()
    }
}

impl PayrollService {
    /// Creates a service with an empty cache.
    pub fn new(store: Arc<dyn PayrollStore>, rules: PayrollRules) -> Self {
        Self {
            store,
            cache: SnapshotCache::new(),
            rules,
        }
    }

    /// The snapshot cache backing this service.
    pub fn cache(&self) -> &SnapshotCache {
        &self.cache
    }

    /// The calculation rules in effect.
    pub fn rules(&self) -> &PayrollRules {
        &self.rules
    }

    /// Fetches employees and shifts concurrently and publishes them.
    ///
    /// On failure the cache keeps whatever it held before.
    pub async fn load(&self) -> EngineResult<Arc<Snapshot>> {
        let (employees, shifts) =
            tokio::try_join!(self.store.fetch_employees(), self.store.fetch_shifts()).inspect_err(
                |error| warn!(error = %error, "Failed to load snapshot from store"),
            )?;

        info!(
            employees = employees.len(),
            shifts = shifts.len(),
            "Loaded snapshot from store"
        );

        self.cache.publish(Snapshot::new(employees, shifts));
        self.cache.require()
    }

    /// Returns the cached snapshot, loading it first if the cache is empty.
    pub async fn ensure_loaded(&self) -> EngineResult<Arc<Snapshot>> {
        match self.cache.current() {
            Some(snapshot) => Ok(snapshot),
            None => self.load().await,
        }
    }

    /// Returns the cached snapshot or [`EngineError::SnapshotNotReady`].
    pub fn snapshot(&self) -> EngineResult<Arc<Snapshot>> {
        self.cache.require()
    }

    /// Groups the cached snapshot by employee, optionally restricted to `ids`.
    ///
    /// An empty `ids` list means every employee.
    pub fn employees_with_shifts(&self, ids: &[String]) -> EngineResult<Vec<EmployeeWithShifts>> {
        let snapshot = self.snapshot()?;
        Ok(group_employee_shifts(
            &snapshot.employees,
            &snapshot.shifts,
            Some(ids),
        ))
    }

    /// Regular and overtime time for every employee in the cached snapshot.
    pub fn time_info(&self) -> EngineResult<Vec<EmployeeTimeInfo>> {
        let grouped = self.employees_with_shifts(&[])?;
        Ok(grouped
            .iter()
            .map(|employee| employee_time_info(employee, &self.rules))
            .collect())
    }

    /// Organization-wide pay totals for the cached snapshot.
    pub fn payroll_totals(&self) -> EngineResult<PayrollTotals> {
        Ok(compute_payroll_totals(&self.time_info()?))
    }

    /// One payroll row per employee in the cached snapshot.
    pub fn employee_summaries(&self) -> EngineResult<Vec<EmployeeSummary>> {
        Ok(summarize_employees(&self.time_info()?))
    }

    /// Writes the edits in `edited` back to the store.
    ///
    /// `edited` holds modified copies of some employees (with their shifts)
    /// from the cached snapshot. Changed employees and shifts are written
    /// concurrently; when all succeed the cache is updated in one step,
    /// otherwise it is left untouched. Must be called from within a tokio
    /// runtime.
    pub fn reconcile(&self, edited: Vec<EmployeeWithShifts>) -> ReconcileHandle {
        let (sender, events) = mpsc::unbounded_channel();
        let store = Arc::clone(&self.store);
        let cache = self.cache.clone();

        let task = tokio::spawn(async move {
            let reconciliation_id = Uuid::new_v4();
            let terminal = match run_reconciliation(store, &cache, edited, &sender).await {
                Ok(summary) => {
                    info!(
                        reconciliation_id = %reconciliation_id,
                        employees_updated = summary.employees_updated,
                        shifts_updated = summary.shifts_updated,
                        "Reconciliation committed"
                    );
                    ReconcileEvent::Completed(summary)
                }
                Err(error) => {
                    warn!(
                        reconciliation_id = %reconciliation_id,
                        error = %error,
                        "Reconciliation failed"
                    );
                    ReconcileEvent::Failed(error)
                }
            };
            // The receiver may have been dropped; the outcome is already logged.
            let _ = sender.send(terminal);
        });

        ReconcileHandle { events, task }
    }
}

async fn run_reconciliation(
    store: Arc<dyn PayrollStore>,
    cache: &SnapshotCache,
    edited: Vec<EmployeeWithShifts>,
    events: &mpsc::UnboundedSender<ReconcileEvent>,
) -> EngineResult<ReconcileSummary> {
    let snapshot = cache.require()?;
    let ids: Vec<String> = edited.iter().map(|e| e.id().to_string()).collect();
    let original = group_employee_shifts(&snapshot.employees, &snapshot.shifts, Some(&ids));
    let changes = detect_changes(&original, &edited);

    let summary = ReconcileSummary {
        employees_updated: changes.employees.len(),
        shifts_updated: changes.shifts.len(),
    };

    if changes.is_empty() {
        debug!("No changes to reconcile");
        let _ = events.send(ReconcileEvent::Progress(100));
        return Ok(summary);
    }

    info!(
        employees = summary.employees_updated,
        shifts = summary.shifts_updated,
        "Reconciling edited records"
    );

    let mut tracker = ProgressTracker::new(changes.len());
    let mut tasks = JoinSet::new();

    for employee in changes.employees {
        let store = Arc::clone(&store);
        tasks.spawn(async move { store.update_employee(employee).await.map(Persisted::Employee) });
    }
    for shift in changes.shifts {
        let store = Arc::clone(&store);
        tasks.spawn(async move { store.update_shift(shift).await.map(Persisted::Shift) });
    }

    let mut persisted = Vec::with_capacity(tracker.total);
    while let Some(joined) = tasks.join_next().await {
        let record = match joined {
            Ok(Ok(record)) => record,
            Ok(Err(error)) => {
                tasks.abort_all();
                return Err(error);
            }
            Err(join_error) => {
                tasks.abort_all();
                return Err(EngineError::ReconcileInterrupted {
                    message: join_error.to_string(),
                });
            }
        };
        persisted.push(record);

        if let Some(percent) = tracker.record_success() {
            let _ = events.send(ReconcileEvent::Progress(percent));
        }
    }

    cache.update(|snapshot| {
        for record in persisted {
            match record {
                Persisted::Employee(employee) => {
                    snapshot.replace_employee(employee);
                }
                Persisted::Shift(shift) => {
                    snapshot.replace_shift(shift);
                }
            }
        }
    })?;

    Ok(summary)
}
