//! Shared fixtures for reconciliation tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;

use payroll_engine::config::PayrollRules;
use payroll_engine::error::{EngineError, EngineResult};
use payroll_engine::models::{Employee, Shift};
use payroll_engine::reconcile::{InMemoryStore, PayrollService, PayrollStore};

pub fn at(s: &str) -> DateTime<Utc> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")
        .unwrap()
        .and_utc()
}

pub fn employee(id: &str, rate: i64, overtime_rate: i64) -> Employee {
    Employee {
        id: id.to_string(),
        name: format!("Employee {}", id),
        email: format!("{}@example.com", id),
        hourly_rate: Decimal::from(rate),
        hourly_rate_overtime: Decimal::from(overtime_rate),
    }
}

pub fn shift(id: &str, employee_id: &str, clock_in: &str, clock_out: &str) -> Shift {
    Shift {
        id: id.to_string(),
        employee_id: employee_id.to_string(),
        clock_in: at(clock_in),
        clock_out: at(clock_out),
    }
}

/// Two employees with two shifts each.
pub fn seed() -> (Vec<Employee>, Vec<Shift>) {
    (
        vec![employee("e1", 2, 1), employee("e2", 10, 15)],
        vec![
            shift("s1", "e1", "2023-02-03 23:00", "2023-02-04 11:00"),
            shift("s2", "e1", "2023-02-06 09:00", "2023-02-06 17:00"),
            shift("s3", "e2", "2023-02-03 09:00", "2023-02-03 13:00"),
            shift("s4", "e2", "2023-02-04 09:00", "2023-02-04 13:00"),
        ],
    )
}

/// A store wrapping [`InMemoryStore`] whose behaviour can be scripted per record.
#[derive(Clone, Default)]
pub struct ScriptedStore {
    inner: InMemoryStore,
    failing_reads: bool,
    failing_writes: HashSet<String>,
    delays: HashMap<String, Duration>,
    writes: Arc<AtomicUsize>,
    fetches: Arc<AtomicUsize>,
}

impl ScriptedStore {
    pub fn new(employees: Vec<Employee>, shifts: Vec<Shift>) -> Self {
        Self {
            inner: InMemoryStore::new(employees, shifts),
            ..Self::default()
        }
    }

    pub fn seeded() -> Self {
        let (employees, shifts) = seed();
        Self::new(employees, shifts)
    }

    pub fn failing_reads(mut self) -> Self {
        self.failing_reads = true;
        self
    }

    /// Makes the update of the record with `id` fail.
    pub fn fail_write(mut self, id: &str) -> Self {
        self.failing_writes.insert(id.to_string());
        self
    }

    /// Delays the update of the record with `id`.
    pub fn delay_write(mut self, id: &str, delay: Duration) -> Self {
        self.delays.insert(id.to_string(), delay);
        self
    }

    /// Number of completed successful writes.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Number of fetch calls made.
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn inner(&self) -> &InMemoryStore {
        &self.inner
    }

    async fn before_write(&self, entity: &str, id: &str) -> EngineResult<()> {
        if let Some(delay) = self.delays.get(id) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing_writes.contains(id) {
            return Err(EngineError::StoreWrite {
                entity: entity.to_string(),
                id: id.to_string(),
                message: "503 Service Unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl PayrollStore for ScriptedStore {
    async fn fetch_employees(&self) -> EngineResult<Vec<Employee>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.failing_reads {
            return Err(EngineError::StoreRead {
                message: "connection refused".to_string(),
            });
        }
        self.inner.fetch_employees().await
    }

    async fn fetch_shifts(&self) -> EngineResult<Vec<Shift>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.failing_reads {
            return Err(EngineError::StoreRead {
                message: "connection refused".to_string(),
            });
        }
        self.inner.fetch_shifts().await
    }

    async fn update_employee(&self, employee: Employee) -> EngineResult<Employee> {
        self.before_write("employee", &employee.id).await?;
        let saved = self.inner.update_employee(employee).await?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(saved)
    }

    async fn update_shift(&self, shift: Shift) -> EngineResult<Shift> {
        self.before_write("shift", &shift.id).await?;
        let saved = self.inner.update_shift(shift).await?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(saved)
    }
}

/// A service over `store` with a loaded snapshot.
pub async fn loaded_service(store: ScriptedStore) -> PayrollService {
    let service = PayrollService::new(Arc::new(store), PayrollRules::default());
    service.load().await.expect("Failed to load snapshot");
    service
}
