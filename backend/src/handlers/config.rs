use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimeZoneResponse {
    pub time_zone: String,
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

pub async fn get_time_zone(State(state): State<AppState>) -> Json<TimeZoneResponse> {
    Json(TimeZoneResponse {
        time_zone: state.config.time_zone.to_string(),
    })
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok".to_string() })
}
