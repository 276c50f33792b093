#![allow(dead_code)]
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use std::env;
use timeclock_backend::{
    config::Config,
    models::employee::{CreateEmployee, Employee, EmployeeRole},
    routes,
    state::AppState,
};
use tower::ServiceExt;

pub fn test_config() -> Config {
    Config::default()
}

pub fn memory_state() -> AppState {
    AppState::in_memory(test_config())
}

pub fn test_router(state: AppState) -> Router {
    routes::app(state)
}

pub fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

pub fn new_employee(name: &str, pin: &str, hourly_wage: f64) -> CreateEmployee {
    CreateEmployee {
        name: name.to_string(),
        hourly_wage,
        active: true,
        role: EmployeeRole::Employee,
        employee_id: Some(pin.to_string()),
        email: None,
    }
}

pub async fn seed_employee(state: &AppState, name: &str, pin: &str, hourly_wage: f64) -> Employee {
    state
        .directory
        .create(new_employee(name, pin, hourly_wage))
        .await
        .expect("seed employee")
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("build request");
    app.clone().oneshot(request).await.expect("call app")
}

pub async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

pub async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

pub async fn expect_json(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    status: StatusCode,
) -> Value {
    let response = send(app, method, uri, body).await;
    assert_eq!(response.status(), status, "unexpected status for {}", uri);
    body_json(response).await
}

/// PostgreSQL URL for repository tests; `None` skips them.
pub fn test_database_url() -> Option<String> {
    env::var("TEST_DATABASE_URL").ok().filter(|v| !v.is_empty())
}
