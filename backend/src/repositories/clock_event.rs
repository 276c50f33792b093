//! Append-only ledger storage.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::{
    error::DomainError,
    models::clock_event::{ClockEvent, ClockEventKind, NewClockEvent},
    types::EmployeeId,
};

/// Storage for ledger events. Events are never updated or removed.
///
/// Every listing is ordered by `(occurred_at, seq)`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClockEventRepository: Send + Sync {
    /// Atomically append one event and assign its sequence number.
    async fn append(&self, event: NewClockEvent) -> Result<ClockEvent, DomainError>;

    /// Most recent event of an employee.
    async fn last_for_employee(
        &self,
        employee_id: &EmployeeId,
    ) -> Result<Option<ClockEvent>, DomainError>;

    /// Most recent event strictly before `before`.
    async fn last_before(
        &self,
        employee_id: &EmployeeId,
        before: DateTime<Utc>,
    ) -> Result<Option<ClockEvent>, DomainError>;

    /// Events with `from <= occurred_at < to`.
    async fn list_between(
        &self,
        employee_id: &EmployeeId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<ClockEvent>, DomainError>;

    /// Complete history of an employee.
    async fn list_for_employee(
        &self,
        employee_id: &EmployeeId,
    ) -> Result<Vec<ClockEvent>, DomainError>;

    async fn count_for_employee(&self, employee_id: &EmployeeId) -> Result<i64, DomainError>;
}

const SELECT_COLUMNS: &str = "id, employee_id, kind, occurred_at, seq, recorded_at";

#[derive(Debug, FromRow)]
struct ClockEventRow {
    id: Uuid,
    employee_id: EmployeeId,
    kind: String,
    occurred_at: DateTime<Utc>,
    seq: i64,
    recorded_at: DateTime<Utc>,
}

impl TryFrom<ClockEventRow> for ClockEvent {
    type Error = DomainError;

    fn try_from(row: ClockEventRow) -> Result<Self, Self::Error> {
        let kind: ClockEventKind = row
            .kind
            .parse()
            .map_err(|e: String| DomainError::Storage(anyhow::anyhow!(e)))?;
        Ok(ClockEvent {
            id: row.id.into(),
            employee_id: row.employee_id,
            kind,
            occurred_at: row.occurred_at,
            seq: row.seq,
            recorded_at: row.recorded_at,
        })
    }
}

fn into_events(rows: Vec<ClockEventRow>) -> Result<Vec<ClockEvent>, DomainError> {
    rows.into_iter().map(ClockEvent::try_from).collect()
}

#[derive(Debug, Clone)]
pub struct PgClockEventRepository {
    pool: PgPool,
}

impl PgClockEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClockEventRepository for PgClockEventRepository {
    async fn append(&self, event: NewClockEvent) -> Result<ClockEvent, DomainError> {
        let query = format!(
            "INSERT INTO clock_events (id, employee_id, kind, occurred_at, recorded_at) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {}",
            SELECT_COLUMNS
        );
        sqlx::query_as::<_, ClockEventRow>(&query)
            .bind(event.id)
            .bind(&event.employee_id)
            .bind(event.kind.as_str())
            .bind(event.occurred_at)
            .bind(event.recorded_at)
            .fetch_one(&self.pool)
            .await?
            .try_into()
    }

    async fn last_for_employee(
        &self,
        employee_id: &EmployeeId,
    ) -> Result<Option<ClockEvent>, DomainError> {
        let query = format!(
            "SELECT {} FROM clock_events WHERE employee_id = $1 \
             ORDER BY occurred_at DESC, seq DESC LIMIT 1",
            SELECT_COLUMNS
        );
        sqlx::query_as::<_, ClockEventRow>(&query)
            .bind(employee_id)
            .fetch_optional(&self.pool)
            .await?
            .map(ClockEvent::try_from)
            .transpose()
    }

    async fn last_before(
        &self,
        employee_id: &EmployeeId,
        before: DateTime<Utc>,
    ) -> Result<Option<ClockEvent>, DomainError> {
        let query = format!(
            "SELECT {} FROM clock_events WHERE employee_id = $1 AND occurred_at < $2 \
             ORDER BY occurred_at DESC, seq DESC LIMIT 1",
            SELECT_COLUMNS
        );
        sqlx::query_as::<_, ClockEventRow>(&query)
            .bind(employee_id)
            .bind(before)
            .fetch_optional(&self.pool)
            .await?
            .map(ClockEvent::try_from)
            .transpose()
    }

    async fn list_between(
        &self,
        employee_id: &EmployeeId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<ClockEvent>, DomainError> {
        let query = format!(
            "SELECT {} FROM clock_events \
             WHERE employee_id = $1 AND occurred_at >= $2 AND occurred_at < $3 \
             ORDER BY occurred_at ASC, seq ASC",
            SELECT_COLUMNS
        );
        let rows = sqlx::query_as::<_, ClockEventRow>(&query)
            .bind(employee_id)
            .bind(from)
            .bind(to)
            .fetch_all(&self.pool)
            .await?;
        into_events(rows)
    }

    async fn list_for_employee(
        &self,
        employee_id: &EmployeeId,
    ) -> Result<Vec<ClockEvent>, DomainError> {
        let query = format!(
            "SELECT {} FROM clock_events WHERE employee_id = $1 ORDER BY occurred_at ASC, seq ASC",
            SELECT_COLUMNS
        );
        let rows = sqlx::query_as::<_, ClockEventRow>(&query)
            .bind(employee_id)
            .fetch_all(&self.pool)
            .await?;
        into_events(rows)
    }

    async fn count_for_employee(&self, employee_id: &EmployeeId) -> Result<i64, DomainError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM clock_events WHERE employee_id = $1")
                .bind(employee_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
