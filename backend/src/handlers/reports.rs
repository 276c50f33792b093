use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppError,
    models::{day_status::DayStatus, stats::DailyStats},
    state::AppState,
    utils::time,
};

use super::common::{parse_optional_date, DateQuery};

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct ExportQuery {
    pub from: Option<String>, // YYYY-MM-DD
    pub to: Option<String>,   // YYYY-MM-DD
}

pub async fn get_today(
    State(state): State<AppState>,
    Query(q): Query<DateQuery>,
) -> Result<Json<Vec<DayStatus>>, AppError> {
    let date = q.resolve(&state.config.time_zone)?;
    Ok(Json(state.reports.day_report(date).await?))
}

pub async fn get_stats(
    State(state): State<AppState>,
    Query(q): Query<DateQuery>,
) -> Result<Json<DailyStats>, AppError> {
    let date = q.resolve(&state.config.time_zone)?;
    Ok(Json(state.reports.daily_stats(date).await?))
}

/// Payroll CSV. Either bound defaults to today.
pub async fn export_csv(
    State(state): State<AppState>,
    Query(q): Query<ExportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let today = time::today_local(&state.config.time_zone);
    let from = parse_optional_date("from", q.from.as_deref())?.unwrap_or(today);
    let to = parse_optional_date("to", q.to.as_deref())?.unwrap_or(today);

    let csv = state.reports.export_csv(from, to).await?;

    let filename = format!(
        "attachment; filename=\"timeclock_{}_{}.csv\"",
        from.format("%Y%m%d"),
        to.format("%Y%m%d")
    );
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&filename).map_err(|e| AppError::InternalServerError(e.into()))?,
    );
    Ok((headers, csv))
}
