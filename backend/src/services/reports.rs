//! Fleet-wide statistics, the per-day attendance table and payroll export.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::{
    error::DomainError,
    models::{day_status::DayStatus, stats::DailyStats},
    services::{directory::EmployeeDirectory, ledger::ClockLedger},
    utils::csv::write_csv,
};

/// Longest range accepted by [`StatsReporter::export_csv`], in days.
pub const MAX_EXPORT_DAYS: i64 = 93;

const EXPORT_HEADER: [&str; 10] = [
    "Date",
    "Employee ID",
    "Name",
    "Role",
    "First Clock In",
    "Last Clock Out",
    "Break Hours",
    "Hours Worked",
    "Hourly Wage",
    "Daily Wage",
];

#[derive(Clone)]
pub struct StatsReporter {
    directory: EmployeeDirectory,
    ledger: ClockLedger,
}

impl StatsReporter {
    pub fn new(directory: EmployeeDirectory, ledger: ClockLedger) -> Self {
        Self { directory, ledger }
    }

    /// One row per active employee for `date`, in directory order.
    pub async fn day_report(&self, date: NaiveDate) -> Result<Vec<DayStatus>, DomainError> {
        let now = Utc::now();
        let mut rows = Vec::new();
        for employee in self.directory.list_active().await? {
            rows.push(self.ledger.day_status_for(&employee, date, now).await?);
        }
        Ok(rows)
    }

    pub async fn daily_stats(&self, date: NaiveDate) -> Result<DailyStats, DomainError> {
        let rows = self.day_report(date).await?;
        let clocked_in = rows.iter().filter(|r| r.state().is_clocked_in()).count();
        let on_break = rows.iter().filter(|r| r.state().is_on_break()).count();
        Ok(DailyStats {
            date,
            total_employees: rows.len(),
            clocked_in,
            on_break,
        })
    }

    /// Payroll CSV covering `from..=to`, one row per active employee per day.
    pub async fn export_csv(&self, from: NaiveDate, to: NaiveDate) -> Result<String, DomainError> {
        if from > to {
            return Err(DomainError::validation("from: must be on or before `to`"));
        }
        let days = (to - from).num_days() + 1;
        if days > MAX_EXPORT_DAYS {
            return Err(DomainError::validation(format!(
                "to: export range is limited to {} days",
                MAX_EXPORT_DAYS
            )));
        }

        let employees = self.directory.list_active().await?;
        let now = Utc::now();
        let tz = *self.ledger.time_zone();
        let local = |at: Option<DateTime<Utc>>| {
            at.map(|t| t.with_timezone(&tz).format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default()
        };

        let mut rows = Vec::with_capacity(employees.len() * days as usize);
        for offset in 0..days {
            let date = from + Duration::days(offset);
            for employee in &employees {
                let day = self.ledger.day_status_for(employee, date, now).await?;
                rows.push(vec![
                    date.format("%Y-%m-%d").to_string(),
                    day.employee_id.to_string(),
                    day.employee_name.clone(),
                    day.employee_role.as_str().to_string(),
                    local(day.first_clock_in),
                    local(day.last_clock_out),
                    format!("{:.2}", day.total_break_hours),
                    format!("{:.2}", day.total_hours_worked),
                    format!("{:.2}", employee.hourly_wage),
                    format!("{:.2}", day.daily_wage),
                ]);
            }
        }

        let csv = write_csv(&EXPORT_HEADER, rows).map_err(DomainError::Storage)?;
        tracing::info!(%from, %to, days, "Exported payroll CSV");
        Ok(csv)
    }
}
