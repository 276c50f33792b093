use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;

use crate::{
    error::AppError,
    models::{
        clock_event::ClockEvent,
        day_status::{DayStatus, StatusResponse},
        PaginatedResponse, PaginationQuery,
    },
    state::AppState,
};

use super::common::{parse_employee_id, parse_optional_date, DateQuery};

/// Dashboard status labels, derived from the latest ledger event.
pub async fn get_status(
    State(state): State<AppState>,
    Path(pin): Path<String>,
) -> Result<Json<StatusResponse>, AppError> {
    let id = parse_employee_id(&pin)?;
    let current = state.ledger.current_state(&id).await?;
    Ok(Json(current.into()))
}

pub async fn toggle_clock(
    State(state): State<AppState>,
    Path(pin): Path<String>,
) -> Result<Json<DayStatus>, AppError> {
    let id = parse_employee_id(&pin)?;
    Ok(Json(state.ledger.toggle_clock(&id, Utc::now()).await?))
}

pub async fn toggle_break(
    State(state): State<AppState>,
    Path(pin): Path<String>,
) -> Result<Json<DayStatus>, AppError> {
    let id = parse_employee_id(&pin)?;
    Ok(Json(state.ledger.toggle_break(&id, Utc::now()).await?))
}

pub async fn clock_in(
    State(state): State<AppState>,
    Path(pin): Path<String>,
) -> Result<Json<DayStatus>, AppError> {
    let id = parse_employee_id(&pin)?;
    Ok(Json(state.ledger.record_clock_in(&id, Utc::now()).await?))
}

pub async fn clock_out(
    State(state): State<AppState>,
    Path(pin): Path<String>,
) -> Result<Json<DayStatus>, AppError> {
    let id = parse_employee_id(&pin)?;
    Ok(Json(state.ledger.record_clock_out(&id, Utc::now()).await?))
}

pub async fn break_start(
    State(state): State<AppState>,
    Path(pin): Path<String>,
) -> Result<Json<DayStatus>, AppError> {
    let id = parse_employee_id(&pin)?;
    Ok(Json(state.ledger.record_break_start(&id, Utc::now()).await?))
}

pub async fn break_end(
    State(state): State<AppState>,
    Path(pin): Path<String>,
) -> Result<Json<DayStatus>, AppError> {
    let id = parse_employee_id(&pin)?;
    Ok(Json(state.ledger.record_break_end(&id, Utc::now()).await?))
}

pub async fn get_day_status(
    State(state): State<AppState>,
    Path(pin): Path<String>,
    Query(q): Query<DateQuery>,
) -> Result<Json<DayStatus>, AppError> {
    let id = parse_employee_id(&pin)?;
    let date = q.resolve(&state.config.time_zone)?;
    Ok(Json(state.ledger.day_status(&id, date).await?))
}

pub async fn list_events(
    State(state): State<AppState>,
    Path(pin): Path<String>,
    Query(q): Query<DateQuery>,
    Query(page): Query<PaginationQuery>,
) -> Result<Json<PaginatedResponse<ClockEvent>>, AppError> {
    let id = parse_employee_id(&pin)?;
    let date = parse_optional_date("date", q.date.as_deref())?;
    let events = state.ledger.events(&id, date).await?;
    Ok(Json(page.paginate(events)))
}
