//! Employee repository trait and its PostgreSQL implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::{
    error::DomainError,
    models::employee::{Employee, EmployeeRole},
    types::EmployeeId,
};

/// Storage for the employee directory.
///
/// Mockable with mockall in unit tests (`MockEmployeeRepository`).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Insert a new employee; `Conflict` if the PIN is already issued.
    async fn insert(&self, employee: &Employee) -> Result<Employee, DomainError>;

    async fn find_by_id(&self, id: &EmployeeId) -> Result<Option<Employee>, DomainError>;

    /// All employees in creation order.
    async fn list(&self) -> Result<Vec<Employee>, DomainError>;

    /// Overwrite the mutable fields of an existing employee.
    async fn update(&self, employee: &Employee) -> Result<Employee, DomainError>;

    /// Remove an employee; returns `false` when nothing was deleted.
    async fn delete(&self, id: &EmployeeId) -> Result<bool, DomainError>;
}

const SELECT_COLUMNS: &str =
    "employee_id, name, hourly_wage, role, active, email, created_at, updated_at";

#[derive(Debug, FromRow)]
struct EmployeeRow {
    employee_id: EmployeeId,
    name: String,
    hourly_wage: f64,
    role: String,
    active: bool,
    email: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = DomainError;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        let role: EmployeeRole = row
            .role
            .parse()
            .map_err(|e: String| DomainError::Storage(anyhow::anyhow!(e)))?;
        Ok(Employee {
            employee_id: row.employee_id,
            name: row.name,
            hourly_wage: row.hourly_wage,
            role,
            active: row.active,
            email: row.email,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone)]
pub struct PgEmployeeRepository {
    pool: PgPool,
}

impl PgEmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeRepository for PgEmployeeRepository {
    async fn insert(&self, employee: &Employee) -> Result<Employee, DomainError> {
        let query = format!(
            "INSERT INTO employees (employee_id, name, hourly_wage, role, active, email, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {}",
            SELECT_COLUMNS
        );
        let row = sqlx::query_as::<_, EmployeeRow>(&query)
            .bind(&employee.employee_id)
            .bind(&employee.name)
            .bind(employee.hourly_wage)
            .bind(employee.role.as_str())
            .bind(employee.active)
            .bind(&employee.email)
            .bind(employee.created_at)
            .bind(employee.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|err| match DomainError::from(err) {
                DomainError::Conflict(_) => DomainError::Conflict(format!(
                    "PIN {} is already issued",
                    employee.employee_id
                )),
                other => other,
            })?;
        row.try_into()
    }

    async fn find_by_id(&self, id: &EmployeeId) -> Result<Option<Employee>, DomainError> {
        let query = format!("SELECT {} FROM employees WHERE employee_id = $1", SELECT_COLUMNS);
        sqlx::query_as::<_, EmployeeRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Employee::try_from)
            .transpose()
    }

    async fn list(&self) -> Result<Vec<Employee>, DomainError> {
        let query = format!(
            "SELECT {} FROM employees ORDER BY created_at ASC, employee_id ASC",
            SELECT_COLUMNS
        );
        sqlx::query_as::<_, EmployeeRow>(&query)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(Employee::try_from)
            .collect()
    }

    async fn update(&self, employee: &Employee) -> Result<Employee, DomainError> {
        let query = format!(
            "UPDATE employees SET name = $2, hourly_wage = $3, role = $4, active = $5, email = $6, updated_at = $7 \
             WHERE employee_id = $1 \
             RETURNING {}",
            SELECT_COLUMNS
        );
        sqlx::query_as::<_, EmployeeRow>(&query)
            .bind(&employee.employee_id)
            .bind(&employee.name)
            .bind(employee.hourly_wage)
            .bind(employee.role.as_str())
            .bind(employee.active)
            .bind(&employee.email)
            .bind(employee.updated_at)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DomainError::employee_not_found(&employee.employee_id))?
            .try_into()
    }

    async fn delete(&self, id: &EmployeeId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM employees WHERE employee_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
