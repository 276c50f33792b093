use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
/// Fleet-wide attendance counts over active employees.
pub struct DailyStats {
    pub date: NaiveDate,
    pub total_employees: usize,
    /// Includes employees currently on break.
    pub clocked_in: usize,
    pub on_break: usize,
}
