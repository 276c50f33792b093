//! Employee directory: registration, lookup, updates and removal.

use chrono::Utc;
use std::{collections::HashSet, sync::Arc};

use crate::{
    error::DomainError,
    models::employee::{CreateEmployee, Employee, UpdateEmployee},
    repositories::{ClockEventRepository, EmployeeRepository},
    services::locks::EmployeeLocks,
    types::EmployeeId,
    validation::Validate,
};

/// Random draws attempted before scanning for a free PIN.
const RANDOM_PIN_ATTEMPTS: usize = 32;

#[derive(Clone)]
pub struct EmployeeDirectory {
    employees: Arc<dyn EmployeeRepository>,
    events: Arc<dyn ClockEventRepository>,
    locks: Arc<EmployeeLocks>,
}

impl EmployeeDirectory {
    pub fn new(
        employees: Arc<dyn EmployeeRepository>,
        events: Arc<dyn ClockEventRepository>,
        locks: Arc<EmployeeLocks>,
    ) -> Self {
        Self {
            employees,
            events,
            locks,
        }
    }

    pub async fn create(&self, payload: CreateEmployee) -> Result<Employee, DomainError> {
        payload.validate()?;
        let now = Utc::now();
        let mut employee = Employee::new(
            EmployeeId::from_index(0),
            payload.name.trim().to_string(),
            payload.hourly_wage,
            payload.role,
            payload.active,
            now,
        );
        employee.email = payload.email;

        let created = match payload.employee_id {
            Some(requested) => {
                employee.employee_id = EmployeeId::parse(&requested)
                    .map_err(|e| DomainError::validation(format!("employee_id: {}", e)))?;
                self.employees.insert(&employee).await?
            }
            None => self.insert_with_issued_pin(employee).await?,
        };

        tracing::info!(
            employee_id = %created.employee_id,
            role = created.role.as_str(),
            "Registered employee"
        );
        Ok(created)
    }

    async fn insert_with_issued_pin(&self, mut employee: Employee) -> Result<Employee, DomainError> {
        for _ in 0..RANDOM_PIN_ATTEMPTS {
            employee.employee_id = EmployeeId::random(&mut rand::thread_rng());
            match self.employees.insert(&employee).await {
                Err(DomainError::Conflict(_)) => continue,
                other => return other,
            }
        }

        // Directory is crowded; take the first free PIN instead.
        let taken: HashSet<EmployeeId> = self
            .employees
            .list()
            .await?
            .into_iter()
            .map(|e| e.employee_id)
            .collect();
        let free = (0..EmployeeId::issuable_count())
            .map(EmployeeId::from_index)
            .find(|pin| !taken.contains(pin))
            .ok_or_else(|| DomainError::Conflict("No unissued PIN remains".to_string()))?;
        employee.employee_id = free;
        self.employees.insert(&employee).await
    }

    pub async fn get(&self, id: &EmployeeId) -> Result<Employee, DomainError> {
        self.employees
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::employee_not_found(id))
    }

    pub async fn list(&self) -> Result<Vec<Employee>, DomainError> {
        self.employees.list().await
    }

    pub async fn list_active(&self) -> Result<Vec<Employee>, DomainError> {
        Ok(self
            .employees
            .list()
            .await?
            .into_iter()
            .filter(|e| e.active)
            .collect())
    }

    pub async fn update(
        &self,
        id: &EmployeeId,
        patch: UpdateEmployee,
    ) -> Result<Employee, DomainError> {
        patch.validate()?;
        let _guard = self.locks.acquire(id).await;
        let mut employee = self.get(id).await?;
        employee.apply(patch, Utc::now());
        let saved = self.employees.update(&employee).await?;
        tracing::info!(employee_id = %id, "Updated employee");
        Ok(saved)
    }

    /// Marks the employee inactive; ledger history stays intact.
    pub async fn deactivate(&self, id: &EmployeeId) -> Result<Employee, DomainError> {
        self.update(
            id,
            UpdateEmployee {
                active: Some(false),
                ..Default::default()
            },
        )
        .await
    }

    /// Hard delete, permitted only for employees without ledger events.
    pub async fn delete(&self, id: &EmployeeId) -> Result<(), DomainError> {
        let _guard = self.locks.acquire(id).await;
        self.get(id).await?;

        let recorded = self.events.count_for_employee(id).await?;
        if recorded > 0 {
            return Err(DomainError::Conflict(format!(
                "Employee {} has {} recorded clock events; deactivate instead",
                id, recorded
            )));
        }
        if !self.employees.delete(id).await? {
            return Err(DomainError::employee_not_found(id));
        }
        tracing::info!(employee_id = %id, "Deleted employee");
        Ok(())
    }
}
