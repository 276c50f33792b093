use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppError,
    models::employee::{CreateEmployee, Employee, UpdateEmployee},
    state::AppState,
    validation::ValidatedJson,
};

use super::common::parse_employee_id;

pub async fn list_employees(
    State(state): State<AppState>,
) -> Result<Json<Vec<Employee>>, AppError> {
    Ok(Json(state.directory.list().await?))
}

/// PIN lookup used by the keypad login.
pub async fn get_employee(
    State(state): State<AppState>,
    Path(pin): Path<String>,
) -> Result<Json<Employee>, AppError> {
    let id = parse_employee_id(&pin)?;
    Ok(Json(state.directory.get(&id).await?))
}

pub async fn create_employee(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateEmployee>,
) -> Result<(StatusCode, Json<Employee>), AppError> {
    let employee = state.directory.create(payload).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

pub async fn update_employee(
    State(state): State<AppState>,
    Path(pin): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateEmployee>,
) -> Result<Json<Employee>, AppError> {
    let id = parse_employee_id(&pin)?;
    Ok(Json(state.directory.update(&id, payload).await?))
}

pub async fn deactivate_employee(
    State(state): State<AppState>,
    Path(pin): Path<String>,
) -> Result<Json<Employee>, AppError> {
    let id = parse_employee_id(&pin)?;
    Ok(Json(state.directory.deactivate(&id).await?))
}

pub async fn delete_employee(
    State(state): State<AppState>,
    Path(pin): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_employee_id(&pin)?;
    state.directory.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
