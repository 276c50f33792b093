//! Clock session ledger: validated appends and status reads.
//!
//! Status is never stored. Every read folds the ledger; every write checks
//! the folded state under the employee's lock before appending.

use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use chrono_tz::Tz;
use std::sync::Arc;

use crate::{
    error::DomainError,
    models::{
        clock_event::{ClockEvent, ClockEventKind, ClockState, NewClockEvent},
        day_status::DayStatus,
        employee::Employee,
    },
    repositories::{ClockEventRepository, EmployeeRepository},
    services::{aggregator::compute_day_totals, locks::EmployeeLocks},
    types::EmployeeId,
    utils::time::{self, DayWindow},
};

#[derive(Clone)]
pub struct ClockLedger {
    employees: Arc<dyn EmployeeRepository>,
    events: Arc<dyn ClockEventRepository>,
    locks: Arc<EmployeeLocks>,
    time_zone: Tz,
}

impl ClockLedger {
    pub fn new(
        employees: Arc<dyn EmployeeRepository>,
        events: Arc<dyn ClockEventRepository>,
        locks: Arc<EmployeeLocks>,
        time_zone: Tz,
    ) -> Self {
        Self {
            employees,
            events,
            locks,
            time_zone,
        }
    }

    pub fn time_zone(&self) -> &Tz {
        &self.time_zone
    }

    pub async fn record_clock_in(
        &self,
        employee_id: &EmployeeId,
        at: DateTime<Utc>,
    ) -> Result<DayStatus, DomainError> {
        self.record(employee_id, at, |_| Ok(ClockEventKind::ClockIn))
            .await
    }

    pub async fn record_clock_out(
        &self,
        employee_id: &EmployeeId,
        at: DateTime<Utc>,
    ) -> Result<DayStatus, DomainError> {
        self.record(employee_id, at, |_| Ok(ClockEventKind::ClockOut))
            .await
    }

    pub async fn record_break_start(
        &self,
        employee_id: &EmployeeId,
        at: DateTime<Utc>,
    ) -> Result<DayStatus, DomainError> {
        self.record(employee_id, at, |_| Ok(ClockEventKind::BreakStart))
            .await
    }

    pub async fn record_break_end(
        &self,
        employee_id: &EmployeeId,
        at: DateTime<Utc>,
    ) -> Result<DayStatus, DomainError> {
        self.record(employee_id, at, |_| Ok(ClockEventKind::BreakEnd))
            .await
    }

    /// Clocks in when out, clocks out when in. Fails while on break.
    pub async fn toggle_clock(
        &self,
        employee_id: &EmployeeId,
        at: DateTime<Utc>,
    ) -> Result<DayStatus, DomainError> {
        self.record(employee_id, at, |state| match state {
            ClockState::Out => Ok(ClockEventKind::ClockIn),
            ClockState::In => Ok(ClockEventKind::ClockOut),
            ClockState::OnBreak => Err(DomainError::InvalidTransition {
                state,
                event: ClockEventKind::ClockOut,
            }),
        })
        .await
    }

    /// Starts a break when working, ends it when on break. Fails while out.
    pub async fn toggle_break(
        &self,
        employee_id: &EmployeeId,
        at: DateTime<Utc>,
    ) -> Result<DayStatus, DomainError> {
        self.record(employee_id, at, |state| match state {
            ClockState::In => Ok(ClockEventKind::BreakStart),
            ClockState::OnBreak => Ok(ClockEventKind::BreakEnd),
            ClockState::Out => Err(DomainError::InvalidTransition {
                state,
                event: ClockEventKind::BreakStart,
            }),
        })
        .await
    }

    async fn record<F>(
        &self,
        employee_id: &EmployeeId,
        at: DateTime<Utc>,
        choose: F,
    ) -> Result<DayStatus, DomainError>
    where
        F: FnOnce(ClockState) -> Result<ClockEventKind, DomainError>,
    {
        // Microseconds, the precision PostgreSQL keeps.
        let at = at.trunc_subsecs(6);
        let _guard = self.locks.acquire(employee_id).await;

        let employee = self.load_employee(employee_id).await?;
        if !employee.active {
            return Err(DomainError::Inactive(format!(
                "Employee {} is inactive",
                employee_id
            )));
        }

        let last = self.events.last_for_employee(employee_id).await?;
        if let Some(last) = &last {
            if at < last.occurred_at {
                return Err(DomainError::validation(format!(
                    "occurred_at: {} precedes the last recorded event at {}",
                    at.to_rfc3339(),
                    last.occurred_at.to_rfc3339()
                )));
            }
        }

        let state = ClockState::from_last(last.map(|e| e.kind));
        let kind = choose(state)?;
        state.apply(kind)?;

        let event = self
            .events
            .append(NewClockEvent::new(
                employee_id.clone(),
                kind,
                at,
                Utc::now().trunc_subsecs(6),
            ))
            .await?;
        tracing::info!(
            employee_id = %employee_id,
            event = kind.as_str(),
            occurred_at = %event.occurred_at,
            seq = event.seq,
            "Recorded clock event"
        );

        let date = time::local_date(at, &self.time_zone);
        self.day_status_for(&employee, date, Utc::now().max(at))
            .await
    }

    /// State derived from the employee's latest event.
    pub async fn current_state(&self, employee_id: &EmployeeId) -> Result<ClockState, DomainError> {
        self.load_employee(employee_id).await?;
        let last = self.events.last_for_employee(employee_id).await?;
        Ok(ClockState::from_last(last.map(|e| e.kind)))
    }

    /// Today's status in the configured timezone.
    pub async fn current_status(&self, employee_id: &EmployeeId) -> Result<DayStatus, DomainError> {
        self.day_status(employee_id, time::today_local(&self.time_zone))
            .await
    }

    pub async fn day_status(
        &self,
        employee_id: &EmployeeId,
        date: NaiveDate,
    ) -> Result<DayStatus, DomainError> {
        let employee = self.load_employee(employee_id).await?;
        self.day_status_for(&employee, date, Utc::now()).await
    }

    /// Folds `date`'s events for an already loaded employee.
    pub async fn day_status_for(
        &self,
        employee: &Employee,
        date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<DayStatus, DomainError> {
        let window = DayWindow::for_date(date, &self.time_zone);
        let id = &employee.employee_id;
        let opening = self
            .events
            .last_before(id, window.start)
            .await?
            .map(|e| e.kind);
        let events = self.events.list_between(id, window.start, window.end).await?;
        Ok(compute_day_totals(
            employee,
            ClockState::from_last(opening),
            &events,
            &window,
            now,
        ))
    }

    /// The employee's ledger, optionally restricted to one local day.
    pub async fn events(
        &self,
        employee_id: &EmployeeId,
        date: Option<NaiveDate>,
    ) -> Result<Vec<ClockEvent>, DomainError> {
        self.load_employee(employee_id).await?;
        match date {
            Some(date) => {
                let window = DayWindow::for_date(date, &self.time_zone);
                self.events
                    .list_between(employee_id, window.start, window.end)
                    .await
            }
            None => self.events.list_for_employee(employee_id).await,
        }
    }

    async fn load_employee(&self, employee_id: &EmployeeId) -> Result<Employee, DomainError> {
        self.employees
            .find_by_id(employee_id)
            .await?
            .ok_or_else(|| DomainError::employee_not_found(employee_id))
    }
}
