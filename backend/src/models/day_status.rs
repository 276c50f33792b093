//! Derived per-day attendance snapshots and the status labels shown on the
//! employee dashboard.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    models::{clock_event::ClockState, employee::EmployeeRole},
    types::EmployeeId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ClockStatus {
    #[serde(rename = "Clocked in")]
    ClockedIn,
    #[serde(rename = "Clocked out")]
    ClockedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum BreakStatus {
    #[serde(rename = "On break")]
    OnBreak,
    #[serde(rename = "Not on break")]
    NotOnBreak,
}

impl From<ClockState> for ClockStatus {
    fn from(state: ClockState) -> Self {
        if state.is_clocked_in() {
            ClockStatus::ClockedIn
        } else {
            ClockStatus::ClockedOut
        }
    }
}

impl From<ClockState> for BreakStatus {
    fn from(state: ClockState) -> Self {
        if state.is_on_break() {
            BreakStatus::OnBreak
        } else {
            BreakStatus::NotOnBreak
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub status: ClockStatus,
    pub break_status: BreakStatus,
}

impl From<ClockState> for StatusResponse {
    fn from(state: ClockState) -> Self {
        Self {
            status: state.into(),
            break_status: state.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
/// Attendance totals for one employee on one calendar day.
pub struct DayStatus {
    pub employee_id: EmployeeId,
    pub employee_name: String,
    pub employee_role: EmployeeRole,
    pub date: NaiveDate,
    pub status: ClockStatus,
    pub break_status: BreakStatus,
    pub first_clock_in: Option<DateTime<Utc>>,
    pub last_clock_out: Option<DateTime<Utc>>,
    /// Fractional hours, millisecond precision.
    pub total_break_hours: f64,
    /// Fractional hours, millisecond precision; breaks excluded.
    pub total_hours_worked: f64,
    /// `hourlyWage × totalHoursWorked`, using the current rate.
    pub daily_wage: f64,
}

impl DayStatus {
    pub fn state(&self) -> ClockState {
        match (self.status, self.break_status) {
            (ClockStatus::ClockedOut, _) => ClockState::Out,
            (ClockStatus::ClockedIn, BreakStatus::OnBreak) => ClockState::OnBreak,
            (ClockStatus::ClockedIn, BreakStatus::NotOnBreak) => ClockState::In,
        }
    }
}
