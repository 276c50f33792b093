use chrono::{DateTime, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{error::AppError, types::EmployeeId, utils::time};

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
pub struct DateQuery {
    /// Calendar day `YYYY-MM-DD`; today in the configured timezone when absent.
    pub date: Option<String>,
}

impl DateQuery {
    pub fn resolve(&self, tz: &Tz) -> Result<NaiveDate, AppError> {
        Ok(parse_optional_date("date", self.date.as_deref())?
            .unwrap_or_else(|| time::today_local(tz)))
    }
}

pub fn parse_date_value(value: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

pub fn parse_optional_date(field: &str, raw: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        Some(value) => parse_date_value(value).map(Some).ok_or_else(|| {
            AppError::Validation(vec![format!(
                "{}: must be a valid date (YYYY-MM-DD or RFC3339)",
                field
            )])
        }),
        None => Ok(None),
    }
}

/// PINs that cannot exist are reported as unknown employees.
pub fn parse_employee_id(raw: &str) -> Result<EmployeeId, AppError> {
    EmployeeId::parse(raw)
        .map_err(|_| AppError::NotFound(format!("Employee {} not found", raw.trim())))
}
