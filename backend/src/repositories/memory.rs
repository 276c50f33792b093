//! In-process store used when no `DATABASE_URL` is configured, and by tests.
//!
//! Each operation takes a single lock for its whole duration, so an append is
//! either fully visible to readers or not at all.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::{PoisonError, RwLock};

use crate::{
    error::DomainError,
    models::{
        clock_event::{ClockEvent, NewClockEvent},
        employee::Employee,
    },
    repositories::{clock_event::ClockEventRepository, employee::EmployeeRepository},
    types::EmployeeId,
};

#[derive(Debug, Default)]
pub struct MemoryStore {
    employees: RwLock<Vec<Employee>>,
    ledger: RwLock<Ledger>,
}

#[derive(Debug, Default)]
struct Ledger {
    events: Vec<ClockEvent>,
    next_seq: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn employees_read(&self) -> std::sync::RwLockReadGuard<'_, Vec<Employee>> {
        self.employees.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn employees_write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<Employee>> {
        self.employees.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn ledger_read(&self) -> std::sync::RwLockReadGuard<'_, Ledger> {
        self.ledger.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn ledger_write(&self) -> std::sync::RwLockWriteGuard<'_, Ledger> {
        self.ledger.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn filtered<P>(&self, employee_id: &EmployeeId, predicate: P) -> Vec<ClockEvent>
    where
        P: Fn(&ClockEvent) -> bool,
    {
        let mut events: Vec<ClockEvent> = self
            .ledger_read()
            .events
            .iter()
            .filter(|e| &e.employee_id == employee_id && predicate(e))
            .cloned()
            .collect();
        events.sort_by_key(|e| (e.occurred_at, e.seq));
        events
    }
}

#[async_trait]
impl EmployeeRepository for MemoryStore {
    async fn insert(&self, employee: &Employee) -> Result<Employee, DomainError> {
        let mut employees = self.employees_write();
        if employees
            .iter()
            .any(|e| e.employee_id == employee.employee_id)
        {
            return Err(DomainError::Conflict(format!(
                "PIN {} is already issued",
                employee.employee_id
            )));
        }
        employees.push(employee.clone());
        Ok(employee.clone())
    }

    async fn find_by_id(&self, id: &EmployeeId) -> Result<Option<Employee>, DomainError> {
        Ok(self
            .employees_read()
            .iter()
            .find(|e| &e.employee_id == id)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Employee>, DomainError> {
        Ok(self.employees_read().clone())
    }

    async fn update(&self, employee: &Employee) -> Result<Employee, DomainError> {
        let mut employees = self.employees_write();
        let slot = employees
            .iter_mut()
            .find(|e| e.employee_id == employee.employee_id)
            .ok_or_else(|| DomainError::employee_not_found(&employee.employee_id))?;
        // PIN and creation time are immutable
        slot.name = employee.name.clone();
        slot.hourly_wage = employee.hourly_wage;
        slot.role = employee.role;
        slot.active = employee.active;
        slot.email = employee.email.clone();
        slot.updated_at = employee.updated_at;
        Ok(slot.clone())
    }

    async fn delete(&self, id: &EmployeeId) -> Result<bool, DomainError> {
        if self.ledger_read().events.iter().any(|e| &e.employee_id == id) {
            return Err(DomainError::Conflict(
                "Record is referenced by ledger history".to_string(),
            ));
        }
        let mut employees = self.employees_write();
        let before = employees.len();
        employees.retain(|e| &e.employee_id != id);
        Ok(employees.len() < before)
    }
}

#[async_trait]
impl ClockEventRepository for MemoryStore {
    async fn append(&self, event: NewClockEvent) -> Result<ClockEvent, DomainError> {
        let mut ledger = self.ledger_write();
        ledger.next_seq += 1;
        let event = event.into_event(ledger.next_seq);
        ledger.events.push(event.clone());
        Ok(event)
    }

    async fn last_for_employee(
        &self,
        employee_id: &EmployeeId,
    ) -> Result<Option<ClockEvent>, DomainError> {
        Ok(self.filtered(employee_id, |_| true).pop())
    }

    async fn last_before(
        &self,
        employee_id: &EmployeeId,
        before: DateTime<Utc>,
    ) -> Result<Option<ClockEvent>, DomainError> {
        Ok(self.filtered(employee_id, |e| e.occurred_at < before).pop())
    }

    async fn list_between(
        &self,
        employee_id: &EmployeeId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<ClockEvent>, DomainError> {
        Ok(self.filtered(employee_id, |e| from <= e.occurred_at && e.occurred_at < to))
    }

    async fn list_for_employee(
        &self,
        employee_id: &EmployeeId,
    ) -> Result<Vec<ClockEvent>, DomainError> {
        Ok(self.filtered(employee_id, |_| true))
    }

    async fn count_for_employee(&self, employee_id: &EmployeeId) -> Result<i64, DomainError> {
        Ok(self
            .ledger_read()
            .events
            .iter()
            .filter(|e| &e.employee_id == employee_id)
            .count() as i64)
    }
}
