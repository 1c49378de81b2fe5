//! Access to the external employee/shift store.
//!
//! The store is the system of record. This module defines the operations the
//! engine needs from it and an in-memory implementation.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, Shift};

/// The external store the engine reads from and writes edits back to.
///
/// Implementations report read failures as [`EngineError::StoreRead`] and
/// write failures as [`EngineError::StoreWrite`].
#[async_trait]
pub trait PayrollStore: Send + Sync {
    /// Fetches every employee.
    async fn fetch_employees(&self) -> EngineResult<Vec<Employee>>;

    /// Fetches every shift.
    async fn fetch_shifts(&self) -> EngineResult<Vec<Shift>>;

    /// Persists an edited employee and returns the stored record.
    async fn update_employee(&self, employee: Employee) -> EngineResult<Employee>;

    /// Persists an edited shift and returns the stored record.
    async fn update_shift(&self, shift: Shift) -> EngineResult<Shift>;
}

const POISONED: &str = "in-memory store lock poisoned";

#[derive(Debug, Default)]
struct Tables {
    employees: Vec<Employee>,
    shifts: Vec<Shift>,
}

/// A [`PayrollStore`] kept in process memory.
///
/// Updates replace the record with the same identifier; updating an unknown
/// record fails with [`EngineError::StoreWrite`].
///
/// # Example
///
/// ```
/// use payroll_engine::reconcile::{InMemoryStore, PayrollStore};
///
/// let runtime = tokio::runtime::Runtime::new().unwrap();
/// runtime.block_on(async {
///     let store = InMemoryStore::new(vec![], vec![]);
///     assert!(store.fetch_employees().await.unwrap().is_empty());
/// });
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    /// Creates a store holding the given records.
    pub fn new(employees: Vec<Employee>, shifts: Vec<Shift>) -> Self {
        Self {
            tables: Arc::new(Mutex::new(Tables { employees, shifts })),
        }
    }

    fn read(&self) -> EngineResult<MutexGuard<'_, Tables>> {
        self.tables.lock().map_err(|_| EngineError::StoreRead {
            message: POISONED.to_string(),
        })
    }

    fn write(&self, entity: &str, id: &str) -> EngineResult<MutexGuard<'_, Tables>> {
        self.tables.lock().map_err(|_| EngineError::StoreWrite {
            entity: entity.to_string(),
            id: id.to_string(),
            message: POISONED.to_string(),
        })
    }
}

#[async_trait]
impl PayrollStore for InMemoryStore {
    async fn fetch_employees(&self) -> EngineResult<Vec<Employee>> {
        Ok(self.read()?.employees.clone())
    }

    async fn fetch_shifts(&self) -> EngineResult<Vec<Shift>> {
        Ok(self.read()?.shifts.clone())
    }

    async fn update_employee(&self, employee: Employee) -> EngineResult<Employee> {
        let mut tables = self.write("employee", &employee.id)?;
        let slot = tables
            .employees
            .iter_mut()
            .find(|e| e.id == employee.id)
            .ok_or_else(|| EngineError::StoreWrite {
                entity: "employee".to_string(),
                id: employee.id.clone(),
                message: "not found".to_string(),
            })?;
        *slot = employee.clone();
        Ok(employee)
    }

    async fn update_shift(&self, shift: Shift) -> EngineResult<Shift> {
        let mut tables = self.write("shift", &shift.id)?;
        let slot = tables
            .shifts
            .iter_mut()
            .find(|s| s.id == shift.id)
            .ok_or_else(|| EngineError::StoreWrite {
                entity: "shift".to_string(),
                id: shift.id.clone(),
                message: "not found".to_string(),
            })?;
        *slot = shift.clone();
        Ok(shift)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    fn employee(id: &str) -> Employee {
        Employee {
            id: id.to_string(),
            name: format!("Employee {id}"),
            email: format!("{id}@example.com"),
            hourly_rate: Decimal::from(20),
            hourly_rate_overtime: Decimal::from(30),
        }
    }

    fn shift(id: &str) -> Shift {
        Shift {
            id: id.to_string(),
            employee_id: "e1".to_string(),
            clock_in: Utc.with_ymd_and_hms(2026, 1, 15, 9, 0, 0).unwrap(),
            clock_out: Utc.with_ymd_and_hms(2026, 1, 15, 17, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_fetch_returns_seeded_records() {
        let store = InMemoryStore::new(vec![employee("e1")], vec![shift("s1"), shift("s2")]);

        assert_eq!(store.fetch_employees().await.unwrap().len(), 1);
        assert_eq!(store.fetch_shifts().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_employee_replaces_record() {
        let store = InMemoryStore::new(vec![employee("e1")], vec![]);
        let mut edited = employee("e1");
        edited.name = "Renamed".to_string();

        let saved = store.update_employee(edited.clone()).await.unwrap();

        assert_eq!(saved, edited);
        assert_eq!(store.fetch_employees().await.unwrap()[0].name, "Renamed");
    }

    #[tokio::test]
    async fn test_update_unknown_shift_fails() {
        let store = InMemoryStore::new(vec![], vec![shift("s1")]);

        let result = store.update_shift(shift("s9")).await;

        match result {
            Err(EngineError::StoreWrite { entity, id, .. }) => {
                assert_eq!(entity, "shift");
                assert_eq!(id, "s9");
            }
            other => panic!("Expected StoreWrite error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_clones_share_tables() {
        let store = InMemoryStore::new(vec![], vec![shift("s1")]);
        let other = store.clone();
        let mut later = shift("s1");
        later.clock_out = Utc.with_ymd_and_hms(2026, 1, 15, 18, 0, 0).unwrap();

        other.update_shift(later.clone()).await.unwrap();

        assert_eq!(store.fetch_shifts().await.unwrap(), vec![later]);
    }

    #[tokio::test]
    async fn test_poisoned_lock_reports_read_and_write_errors() {
        let store = InMemoryStore::new(vec![employee("e1")], vec![shift("s1")]);
        let poisoner = store.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.tables.lock().unwrap();
            panic!("writer crashed while holding the lock");
        })
        .join();

        match store.update_shift(shift("s1")).await {
            Err(EngineError::StoreWrite { entity, id, message }) => {
                assert_eq!(entity, "shift");
                assert_eq!(id, "s1");
                assert_eq!(message, POISONED);
            }
            other => panic!("Expected StoreWrite error, got {:?}", other),
        }
        assert!(matches!(
            store.update_employee(employee("e1")).await,
            Err(EngineError::StoreWrite { .. })
        ));
        assert!(matches!(
            store.fetch_shifts().await,
            Err(EngineError::StoreRead { .. })
        ));
    }
}
